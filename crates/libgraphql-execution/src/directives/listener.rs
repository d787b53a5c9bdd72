use crate::directives::DirectiveInstance;
use crate::directives::Event;
use crate::directives::EventFilter;
use crate::directives::FilterValue;
use std::sync::Arc;

/// The error type listener callbacks may fail with.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// A listener callback. It receives the [`DirectiveInstance`] the listener
/// was bound to, so it observes that instance's own arguments.
pub type ListenerCallback =
    Arc<dyn Fn(&DirectiveInstance, &Event<'_>) -> ListenerResult + Send + Sync>;

/// One normalized filter guarding a [`Listener`].
#[derive(Clone, Debug)]
pub struct ListenerFilter {
    pub(crate) filter: Arc<EventFilter>,
    pub(crate) value: FilterValue,
}
impl ListenerFilter {
    pub fn name(&self) -> &str {
        self.filter.name()
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    pub fn matches(&self, event: &Event<'_>) -> bool {
        self.filter.matches(&self.value, event)
    }
}

/// A callback registered by a directive definition for a named event,
/// guarded by zero or more filters.
#[derive(Clone)]
pub struct Listener {
    pub(crate) callback: ListenerCallback,
    pub(crate) event_name: String,
    pub(crate) filters: Vec<ListenerFilter>,
}
impl Listener {
    pub fn event_name(&self) -> &str {
        self.event_name.as_str()
    }

    pub fn filters(&self) -> &[ListenerFilter] {
        &self.filters
    }

    /// Whether this listener should fire for `event`: the event names must
    /// agree and every filter must accept the event. A listener with no
    /// filters accepts every event carrying its name.
    pub fn accepts(&self, event: &Event<'_>) -> bool {
        self.event_name == event.name()
            && self.filters.iter().all(|filter| filter.matches(event))
    }
}
impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("event_name", &self.event_name)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// A [`Listener`] bound to the [`DirectiveInstance`] it executes for.
#[derive(Clone, Debug)]
pub struct BoundListener {
    pub(crate) instance: Arc<DirectiveInstance>,
    pub(crate) listener: Arc<Listener>,
}
impl BoundListener {
    pub fn instance(&self) -> &Arc<DirectiveInstance> {
        &self.instance
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn accepts(&self, event: &Event<'_>) -> bool {
        self.listener.accepts(event)
    }

    /// Runs the callback with the bound instance as its context.
    pub fn call(&self, event: &Event<'_>) -> ListenerResult {
        (self.listener.callback)(self.instance.as_ref(), event)
    }
}
