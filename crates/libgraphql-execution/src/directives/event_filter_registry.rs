use crate::directives::DirectiveDefinitionError;
use crate::directives::Event;
use crate::directives::EventPhase;
use indexmap::IndexMap;
use std::sync::Arc;
use std::sync::LazyLock;

type Result<T> = std::result::Result<T, DirectiveDefinitionError>;

/// A filter argument exactly as a listener declares it, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterArg {
    Single(String),
    List(Vec<String>),
}
impl FilterArg {
    /// The argument as a list, wrapping a single value.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value],
            Self::List(values) => values,
        }
    }
}
impl std::convert::From<&str> for FilterArg {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}
impl std::convert::From<String> for FilterArg {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}
impl std::convert::From<EventPhase> for FilterArg {
    fn from(value: EventPhase) -> Self {
        Self::Single(value.name().to_string())
    }
}
impl std::convert::From<Vec<&str>> for FilterArg {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}
impl std::convert::From<Vec<String>> for FilterArg {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}
impl<const N: usize> std::convert::From<[&str; N]> for FilterArg {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}
impl<const N: usize> std::convert::From<[EventPhase; N]> for FilterArg {
    fn from(values: [EventPhase; N]) -> Self {
        Self::List(values.into_iter().map(|p| p.name().to_string()).collect())
    }
}

/// A filter argument after its filter's normalizer has run.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    /// Canonical type names, as produced for `for` and `on`.
    TypeNames(Vec<String>),

    /// Phases, as produced for `during`.
    Phases(Vec<EventPhase>),

    /// Anything else a custom filter normalizes to.
    Names(Vec<String>),
}

pub type FilterNormalizer =
    Arc<dyn Fn(FilterArg) -> std::result::Result<FilterValue, String> + Send + Sync>;
pub type FilterPredicate =
    Arc<dyn Fn(&FilterValue, &Event<'_>) -> bool + Send + Sync>;

/// A named (normalizer, predicate) pair.
#[derive(Clone)]
pub struct EventFilter {
    name: String,
    normalizer: FilterNormalizer,
    predicate: FilterPredicate,
}
impl EventFilter {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn normalize(&self, raw: FilterArg) -> Result<FilterValue> {
        (self.normalizer)(raw).map_err(|reason| {
            DirectiveDefinitionError::InvalidFilterValue {
                filter_name: self.name.to_owned(),
                reason,
            }
        })
    }

    pub fn matches(&self, value: &FilterValue, event: &Event<'_>) -> bool {
        (self.predicate)(value, event)
    }
}
impl std::fmt::Debug for EventFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static BUILTIN_FILTERS: LazyLock<Arc<EventFilterRegistry>> =
    LazyLock::new(|| Arc::new(EventFilterRegistry::with_builtins()));

/// Maps filter names to the [`EventFilter`] that normalizes and evaluates
/// them.
#[derive(Clone, Debug, Default)]
pub struct EventFilterRegistry {
    filters: IndexMap<String, Arc<EventFilter>>,
}
impl EventFilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `for`, `on` and `during` filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert("for", Arc::new(normalize_type_names), Arc::new(match_for));
        registry.insert("on", Arc::new(normalize_type_names), Arc::new(match_on));
        registry.insert("during", Arc::new(normalize_phases), Arc::new(match_during));
        registry
    }

    /// The shared, immutable registry of built-in filters.
    pub fn builtin() -> Arc<EventFilterRegistry> {
        Arc::clone(&BUILTIN_FILTERS)
    }

    /// Registers a new filter. Filter names are unique within a registry.
    pub fn register(
        &mut self,
        filter_name: impl AsRef<str>,
        normalizer: impl Fn(FilterArg) -> std::result::Result<FilterValue, String>
            + Send + Sync + 'static,
        predicate: impl Fn(&FilterValue, &Event<'_>) -> bool + Send + Sync + 'static,
    ) -> Result<()> {
        let filter_name = filter_name.as_ref();
        if self.filters.contains_key(filter_name) {
            return Err(DirectiveDefinitionError::DuplicateEventFilter {
                filter_name: filter_name.to_string(),
            });
        }
        self.insert(filter_name, Arc::new(normalizer), Arc::new(predicate));
        Ok(())
    }

    pub fn get(&self, filter_name: &str) -> Option<&Arc<EventFilter>> {
        self.filters.get(filter_name)
    }

    pub fn contains(&self, filter_name: &str) -> bool {
        self.filters.contains_key(filter_name)
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Runs the normalizer of the filter named `filter_name` over `raw`.
    pub fn normalize(
        &self,
        filter_name: &str,
        raw: FilterArg,
    ) -> Result<(Arc<EventFilter>, FilterValue)> {
        let filter = self.filters.get(filter_name).ok_or_else(|| {
            DirectiveDefinitionError::UnknownEventFilter {
                filter_name: filter_name.to_string(),
            }
        })?;
        let value = filter.normalize(raw)?;
        Ok((Arc::clone(filter), value))
    }

    /// Evaluates the filter named `filter_name`. Unknown filters never match.
    pub fn matches(
        &self,
        filter_name: &str,
        value: &FilterValue,
        event: &Event<'_>,
    ) -> bool {
        self.filters.get(filter_name)
            .is_some_and(|filter| filter.matches(value, event))
    }

    fn insert(
        &mut self,
        filter_name: &str,
        normalizer: FilterNormalizer,
        predicate: FilterPredicate,
    ) {
        self.filters.insert(filter_name.to_string(), Arc::new(EventFilter {
            name: filter_name.to_string(),
            normalizer,
            predicate,
        }));
    }
}

fn normalize_type_names(raw: FilterArg) -> std::result::Result<FilterValue, String> {
    let mut type_names: Vec<String> = vec![];
    for name in raw.into_list() {
        let name = name.trim().trim_start_matches("::");
        if name.is_empty() {
            return Err("type references must not be empty".to_string());
        }
        if !type_names.iter().any(|existing| existing == name) {
            type_names.push(name.to_string());
        }
    }
    Ok(FilterValue::TypeNames(type_names))
}

fn normalize_phases(raw: FilterArg) -> std::result::Result<FilterValue, String> {
    let mut phases = vec![];
    for name in raw.into_list() {
        let phase = EventPhase::from_name(&name)
            .ok_or_else(|| format!("`{name}` is not a known event phase"))?;
        if !phases.contains(&phase) {
            phases.push(phase);
        }
    }
    Ok(FilterValue::Phases(phases))
}

fn match_for(value: &FilterValue, event: &Event<'_>) -> bool {
    match value {
        FilterValue::TypeNames(names) | FilterValue::Names(names) =>
            names.iter().any(|name| event.source().of_type(name)),
        FilterValue::Phases(_) => false,
    }
}

fn match_on(value: &FilterValue, event: &Event<'_>) -> bool {
    if !event.has_on() {
        return false;
    }
    match value {
        FilterValue::TypeNames(names) | FilterValue::Names(names) =>
            names.iter().any(|name| event.on(name) == Some(true)),
        FilterValue::Phases(_) => false,
    }
}

fn match_during(value: &FilterValue, event: &Event<'_>) -> bool {
    match (value, event.phase()) {
        (FilterValue::Phases(phases), Some(phase)) => phases.contains(&phase),
        _ => false,
    }
}
