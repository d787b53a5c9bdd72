use crate::directives::ArgumentSchema;
use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveInstance;
use crate::directives::DirectiveLocation;
use crate::directives::Event;
use crate::directives::EventFilterRegistry;
use crate::directives::FilterArg;
use crate::directives::Listener;
use crate::directives::ListenerFilter;
use crate::directives::ListenerResult;
use crate::directives::inherited::Inherited;
use crate::directives::inherited::Overlay;
use crate::naming;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, DirectiveDefinitionError>;

/// Declares a [`DirectiveDefinition`].
///
/// Locations, arguments and listeners declared here are layered over those
/// of the parent definition (if one is given via
/// [`inherit`](Self::inherit)):
///
/// - [`placed_on`](Self::placed_on) adds to the parent's locations, while
///   [`placed_on_only`](Self::placed_on_only) replaces them;
/// - arguments overlay the parent's arguments by internal name;
/// - listeners are appended to the parent's listeners for the same event.
///
/// ```
/// use libgraphql_execution::directives::Argument;
/// use libgraphql_execution::directives::ArgumentType;
/// use libgraphql_execution::directives::DirectiveDefinition;
/// use libgraphql_execution::directives::DirectiveLocation;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let cached = DirectiveDefinition::builder("cached")
///     .placed_on(["field", "fragment_spread"])?
///     .argument(Argument::new("max_age", ArgumentType::Int).with_default(60))?
///     .build()?;
///
/// assert!(cached.allows_location(DirectiveLocation::Field));
/// assert!(cached.argument("maxAge").is_some());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct DirectiveDefinitionBuilder {
    abstract_: bool,
    arguments: IndexMap<String, Arc<dyn ArgumentSchema>>,
    description: Option<String>,
    event_filters: Arc<EventFilterRegistry>,
    listeners: IndexMap<String, Vec<Arc<Listener>>>,
    locations: IndexSet<DirectiveLocation>,
    name: String,
    namespaces: Vec<String>,
    parent: Option<Arc<DirectiveDefinition>>,
    replaces_parent_locations: bool,
}
impl DirectiveDefinitionBuilder {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            abstract_: false,
            arguments: IndexMap::new(),
            description: None,
            event_filters: EventFilterRegistry::builtin(),
            listeners: IndexMap::new(),
            locations: IndexSet::new(),
            name: name.as_ref().trim().to_string(),
            namespaces: vec![],
            parent: None,
            replaces_parent_locations: false,
        }
    }

    /// Marks this definition as abstract: it can be inherited from but
    /// never registered or instantiated.
    pub fn abstract_directive(mut self) -> Self {
        self.abstract_ = true;
        self
    }

    /// Declares an argument. Declaring two arguments with the same internal
    /// name on one definition is an error; re-declaring an argument of the
    /// parent definition overrides it.
    pub fn argument(mut self, argument: impl ArgumentSchema + 'static) -> Result<Self> {
        let argument_name = argument.name().to_string();
        if self.arguments.contains_key(&argument_name) {
            return Err(DirectiveDefinitionError::DuplicateArgument {
                argument_name,
                directive_name: self.name,
            });
        }
        self.arguments.insert(argument_name, Arc::new(argument));
        Ok(self)
    }

    pub fn description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(description.as_ref().to_string());
        self
    }

    /// Uses `event_filters` (instead of the built-in filters) to normalize
    /// the filters of listeners declared after this call.
    pub fn event_filters(mut self, event_filters: Arc<EventFilterRegistry>) -> Self {
        self.event_filters = event_filters;
        self
    }

    pub fn inherit(mut self, parent: &Arc<DirectiveDefinition>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Registers `callback` for events named `event_name`. Each filter is
    /// normalized immediately.
    pub fn listener<K, F>(
        mut self,
        event_name: impl AsRef<str>,
        filters: impl IntoIterator<Item = (K, FilterArg)>,
        callback: F,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        F: Fn(&DirectiveInstance, &Event<'_>) -> ListenerResult + Send + Sync + 'static,
    {
        let mut listener_filters = vec![];
        for (filter_name, raw) in filters {
            let (filter, value) =
                self.event_filters.normalize(filter_name.as_ref(), raw)?;
            listener_filters.push(ListenerFilter { filter, value });
        }

        let event_name = event_name.as_ref().to_string();
        self.listeners.entry(event_name.to_owned())
            .or_default()
            .push(Arc::new(Listener {
                callback: Arc::new(callback),
                event_name,
                filters: listener_filters,
            }));
        Ok(self)
    }

    /// Adds a namespace this definition is registered under. Without any,
    /// a definition uses its parent's namespaces (or the base namespace).
    pub fn namespace(mut self, namespace: impl AsRef<str>) -> Self {
        let namespace = namespace.as_ref().to_string();
        if !self.namespaces.contains(&namespace) {
            self.namespaces.push(namespace);
        }
        self
    }

    /// Adds to the set of allowed locations (on top of those inherited from
    /// the parent definition). Nothing is added unless every name is valid.
    pub fn placed_on<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locations = DirectiveLocation::parse_all(names)?;
        self.locations.extend(locations);
        Ok(self)
    }

    /// Replaces the set of allowed locations, including any inherited from
    /// the parent definition. Nothing changes unless every name is valid.
    pub fn placed_on_only<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locations = DirectiveLocation::parse_all(names)?;
        self.locations = locations.into_iter().collect();
        self.replaces_parent_locations = true;
        Ok(self)
    }

    pub fn build(self) -> Result<Arc<DirectiveDefinition>> {
        let gql_name = naming::directive_gql_name(&self.name);
        if !is_id_segment(&gql_name) {
            return Err(DirectiveDefinitionError::InvalidName {
                name: self.name,
            });
        }
        if let Some(namespace) = self.namespaces.iter().find(|ns| !is_id_segment(ns)) {
            return Err(DirectiveDefinitionError::InvalidNamespace {
                namespace: namespace.to_owned(),
            });
        }

        let namespaces =
            if !self.namespaces.is_empty() {
                self.namespaces
            } else if let Some(parent) = &self.parent {
                parent.namespaces().to_vec()
            } else {
                vec![crate::directives::BASE_NAMESPACE.to_string()]
            };

        log::trace!(
            "Built directive definition `@{gql_name}` ({} own locations, {} own \
            arguments, {} own listened events).",
            self.locations.len(),
            self.arguments.len(),
            self.listeners.len(),
        );

        Ok(Arc::new(DirectiveDefinition {
            abstract_: self.abstract_,
            arguments: Inherited::new(Overlay(self.arguments), false),
            description: self.description,
            gql_name,
            listeners: Inherited::new(self.listeners, false),
            locations: Inherited::new(self.locations, self.replaces_parent_locations),
            name: self.name,
            namespaces,
            parent: self.parent,
        }))
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DirectiveDefinitionError {
    #[error("Directive `{directive_name}` may only be registered once in namespace `{namespace}`")]
    DuplicateDirectiveRegistration {
        directive_name: String,
        namespace: String,
    },

    #[error("Abstract directive `{directive_name}` cannot be registered")]
    AbstractDirectiveRegistration {
        directive_name: String,
    },

    #[error("Directive `{directive_name}` declares the argument `{argument_name}` more than once")]
    DuplicateArgument {
        argument_name: String,
        directive_name: String,
    },

    #[error("An event filter named `{filter_name}` is already registered")]
    DuplicateEventFilter {
        filter_name: String,
    },

    #[error("Invalid value for the `{filter_name}` event filter: {reason}")]
    InvalidFilterValue {
        filter_name: String,
        reason: String,
    },

    #[error("Invalid directive locations: {}", format_names(.names))]
    InvalidLocations {
        names: Vec<String>,
    },

    #[error("`{name}` is not a valid directive name")]
    InvalidName {
        name: String,
    },

    #[error("`{namespace}` is not a valid directive namespace")]
    InvalidNamespace {
        namespace: String,
    },

    #[error("Unknown event filter `{filter_name}`")]
    UnknownEventFilter {
        filter_name: String,
    },
}

/// Names and namespaces end up as path segments of a directive's global id.
fn is_id_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.chars().any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
}

fn format_names(names: &[String]) -> String {
    names.iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
