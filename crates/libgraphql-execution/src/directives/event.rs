use indexmap::IndexMap;

/// The phase of schema construction or request execution during which an
/// [`Event`] is dispatched. Matched by the `during` event filter.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    Definition,
    Validation,
    Organize,
    Prepare,
    Execution,
    Resolve,
}
impl EventPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Validation => "validation",
            Self::Organize => "organize",
            Self::Prepare => "prepare",
            Self::Execution => "execution",
            Self::Resolve => "resolve",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches(':');
        [
            Self::Definition,
            Self::Validation,
            Self::Organize,
            Self::Prepare,
            Self::Execution,
            Self::Resolve,
        ].into_iter().find(|phase| phase.name().eq_ignore_ascii_case(name))
    }
}
impl std::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything an [`Event`] can be dispatched about: a component under
/// resolution, or any other directive-bearing element.
pub trait EventSource: std::fmt::Debug {
    /// Whether this source is compatible with the type named `type_name`.
    /// Matched by the `for` event filter.
    fn of_type(&self, type_name: &str) -> bool;

    /// A display name for the source, if it has one.
    fn source_name(&self) -> Option<&str> {
        None
    }
}

type OnPredicate<'a> = dyn Fn(&str) -> bool + 'a;

/// An ephemeral dispatch signal. An `Event` only lives for the duration of a
/// single dispatch.
pub struct Event<'a> {
    name: String,
    on: Option<Box<OnPredicate<'a>>>,
    parameters: IndexMap<String, serde_json::Value>,
    phase: Option<EventPhase>,
    source: &'a dyn EventSource,
}
impl<'a> Event<'a> {
    pub fn new(name: impl AsRef<str>, source: &'a dyn EventSource) -> Self {
        Self {
            name: name.as_ref().to_string(),
            on: None,
            parameters: IndexMap::new(),
            phase: None,
            source,
        }
    }

    /// Gives this event an `on` predicate, which makes it eligible for
    /// listeners guarded by the `on` filter.
    pub fn with_on(mut self, on: impl Fn(&str) -> bool + 'a) -> Self {
        self.on = Some(Box::new(on));
        self
    }

    pub fn with_parameter(
        mut self,
        name: impl AsRef<str>,
        value: serde_json::Value,
    ) -> Self {
        self.parameters.insert(name.as_ref().to_string(), value);
        self
    }

    pub fn with_phase(mut self, phase: EventPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Evaluates this event's `on` predicate against `type_name`. Returns
    /// `None` when the event has no `on` predicate at all.
    pub fn on(&self, type_name: &str) -> Option<bool> {
        self.on.as_ref().map(|on| on(type_name))
    }

    pub fn has_on(&self) -> bool {
        self.on.is_some()
    }

    pub fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.parameters.get(name)
    }

    pub fn parameters(&self) -> &IndexMap<String, serde_json::Value> {
        &self.parameters
    }

    pub fn phase(&self) -> Option<EventPhase> {
        self.phase
    }

    pub fn source(&self) -> &'a dyn EventSource {
        self.source
    }
}
impl std::fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("has_on", &self.on.is_some())
            .field("parameters", &self.parameters)
            .field("phase", &self.phase)
            .field("source", &self.source)
            .finish()
    }
}
