use crate::ast;
use crate::component::AstNode;
use crate::component::ComponentData;
use crate::component::ComponentKind;
use crate::component::ExecutionError;
use crate::component::ExecutionStage;
use crate::component::PathSegment;
use crate::component::Request;
use crate::component::ResolutionError;
use crate::component::Strategy;
use crate::directives::DirectiveLocation;
use crate::directives::DirectiveOwner;
use crate::directives::DirectiveSet;
use crate::directives::DirectiveUseError;
use crate::directives::Event;
use crate::directives::EventPhase;
use crate::directives::EventSource;
use crate::directives::ListenerError;
use crate::directives::TypeMap;
use indexmap::IndexMap;
use indexmap::IndexSet;
use inherent::inherent;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// The outcome of a block run through [`Component::capture_errors`].
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentResult<T> {
    Resolved(T),

    /// The block failed; the error was recorded with the request.
    Failed(ExecutionError),
}
impl<T> ComponentResult<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, ExecutionError> {
        match self {
            Self::Resolved(value) => Ok(value),
            Self::Failed(error) => Err(error),
        }
    }
}

/// A node in the execution tree of a request.
///
/// A component borrows the document node it was built from and exposes only
/// the [data](Self::data) its [kind](Self::kind) needs. Where it sits in the
/// tree is the concern of the [`Strategy`] resolving it.
#[derive(Debug)]
pub struct Component<'ast> {
    data: ComponentData<'ast>,
    directives: DirectiveSet,
    invalid: AtomicBool,
    kind: ComponentKind,
    node: AstNode<'ast>,
}
impl<'ast> Component<'ast> {
    pub fn new(node: AstNode<'ast>) -> Self {
        let kind = node.component_kind();
        Self {
            data: ComponentData::slice(&node, &kind.data_parts()),
            directives: DirectiveSet::new(),
            invalid: AtomicBool::new(false),
            kind,
            node,
        }
    }

    pub fn data(&self) -> &ComponentData<'ast> {
        &self.data
    }

    /// The names of the node attributes visible through [`data`](Self::data).
    pub fn data_parts(&self) -> IndexSet<&'static str> {
        self.kind.data_parts()
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn node(&self) -> AstNode<'ast> {
        self.node
    }

    /// The name this component contributes to response paths: the alias of
    /// an aliased field, otherwise the node's own name.
    pub fn name(&self) -> Option<&'ast str> {
        self.data.alias().or_else(|| self.data.name())
    }

    /// Marks this component as invalid. There is no way back.
    pub fn invalidate(&self) {
        self.invalid.store(true, Ordering::Release);
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid.load(Ordering::Acquire)
    }

    /// Resolves the directives annotating this component's node through
    /// `type_map` and attaches them. Variables referenced by directive
    /// arguments take their values from `variables`.
    #[track_caller]
    pub fn attach_directives(
        &mut self,
        type_map: &dyn TypeMap,
        variables: &IndexMap<String, serde_json::Value>,
    ) -> Result<(), DirectiveUseError> {
        let node = self.node;
        for directive in node.directives() {
            let args = directive.arguments.iter()
                .map(|(name, value)| (name, ast::value_to_json(value, variables)));
            self.use_directive_named(type_map, &directive.name, args)?;
        }
        Ok(())
    }

    pub fn stacked<S: Strategy, R>(&self, strategy: &S, block: impl FnOnce() -> R) -> R {
        strategy.stacked(self, block)
    }

    /// Dispatches an event named `event_name` about this component through
    /// `strategy`.
    pub fn trigger_event<S: Strategy>(
        &self,
        strategy: &S,
        event_name: &str,
        phase: Option<EventPhase>,
    ) -> Result<usize, ListenerError> {
        let mut event = Event::new(event_name, self);
        if let Some(phase) = phase {
            event = event.with_phase(phase);
        }
        strategy.trigger_event(self, &event)
    }

    /// Runs `block`, turning a failure into an [`ExecutionError`] recorded
    /// with `request` instead of passing it on.
    ///
    /// The recorded error carries this component's node position, the current
    /// path (ending with this component's name, if it has one) and `stage`.
    /// With `invalidate` set, a failure also invalidates this component.
    /// Nothing else is touched, so sibling components keep resolving.
    pub fn capture_errors<T, Q: Request + ?Sized>(
        &self,
        request: &Q,
        stage: ExecutionStage,
        invalidate: bool,
        block: impl FnOnce() -> Result<T, ResolutionError>,
    ) -> ComponentResult<T> {
        let err = match block() {
            Ok(value) => return ComponentResult::Resolved(value),
            Err(err) => err,
        };

        if invalidate {
            self.invalidate();
        }

        let mut path = request.stack_to_path();
        if let Some(name) = self.name()
            && path.last() != Some(&PathSegment::from(name)) {
            path.push(PathSegment::from(name));
        }

        let error = ExecutionError::new(
            err.to_string(),
            Some(self.node.position()),
            path,
            stage,
        );
        log::warn!(
            "Captured a failure during the {stage} stage of {} `{}`: {error}",
            self.kind,
            self.name().unwrap_or_default(),
        );
        request.errors().push(error.clone());
        ComponentResult::Failed(error)
    }
}

impl<'ast> DirectiveOwner for Component<'ast> {
    fn directive_location(&self) -> DirectiveLocation {
        self.node.directive_location()
    }

    fn directive_owner_name(&self) -> String {
        self.name()
            .unwrap_or(self.kind.name())
            .to_string()
    }

    fn directive_set(&self) -> &DirectiveSet {
        &self.directives
    }

    fn directive_set_mut(&mut self) -> &mut DirectiveSet {
        &mut self.directives
    }
}

#[inherent]
impl<'ast> EventSource for Component<'ast> {
    /// Whether this component is of the kind called `type_name` (e.g.
    /// `field` or `query`), or is a fragment on the type `type_name`.
    pub fn of_type(&self, type_name: &str) -> bool {
        let type_name = type_name.trim();
        self.kind.is_a(type_name)
            || self.data.type_condition().is_some_and(|type_condition| type_condition == type_name)
    }

    pub fn source_name(&self) -> Option<&str> {
        self.name()
    }
}
