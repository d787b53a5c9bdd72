use crate::component::Component;
use crate::component::ErrorSink;
use crate::component::PathSegment;
use crate::directives::DirectiveOwner;
use crate::directives::Event;
use crate::directives::ListenerError;

/// Walks the components of a request and decides the order (and
/// concurrency) in which they resolve.
pub trait Strategy {
    /// Runs `block` with `component` as the current context, restoring the
    /// previous context when `block` returns or unwinds.
    fn stacked<R>(&self, component: &Component<'_>, block: impl FnOnce() -> R) -> R;

    /// Dispatches `event` about `component`. Returns how many listeners ran.
    ///
    /// By default only the listeners of directives attached to `component`
    /// are considered.
    fn trigger_event(
        &self,
        component: &Component<'_>,
        event: &Event<'_>,
    ) -> Result<usize, ListenerError> {
        component.trigger_directive_event(event)
    }
}

/// The request a component resolves within.
pub trait Request {
    /// Where failures captured by components are recorded.
    fn errors(&self) -> &ErrorSink;

    /// The path from the root of the response to the component currently
    /// being resolved.
    fn stack_to_path(&self) -> Vec<PathSegment>;
}
