use crate::directives::ArgumentSchema;
use crate::directives::DirectiveDefinitionBuilder;
use crate::directives::DirectiveInstance;
use crate::directives::DirectiveLocation;
use crate::directives::DirectiveUsageError;
use crate::directives::Listener;
use crate::directives::inherited::Inherited;
use crate::directives::inherited::Overlay;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde_json::Value;
use std::sync::Arc;

type Result<T> = std::result::Result<T, DirectiveUsageError>;

pub(crate) type ArgumentMap = Overlay<String, Arc<dyn ArgumentSchema>>;
pub(crate) type ListenerMap = IndexMap<String, Vec<Arc<Listener>>>;

/// A kind of directive: its allowed locations, its argument schema and the
/// event listeners its instances contribute to whatever they are attached
/// to.
///
/// A definition may inherit from a parent definition. Locations, arguments
/// and listeners all compose with the parent's rather than replacing them
/// (see [`DirectiveDefinitionBuilder`]).
///
/// Definitions are immutable once built and are shared via [`Arc`].
#[derive(Debug)]
pub struct DirectiveDefinition {
    pub(super) abstract_: bool,
    pub(super) arguments: Inherited<ArgumentMap>,
    pub(super) description: Option<String>,
    pub(super) gql_name: String,
    pub(super) listeners: Inherited<ListenerMap>,
    pub(super) locations: Inherited<IndexSet<DirectiveLocation>>,
    pub(super) name: String,
    pub(super) namespaces: Vec<String>,
    pub(super) parent: Option<Arc<DirectiveDefinition>>,
}
impl DirectiveDefinition {
    pub fn builder(name: impl AsRef<str>) -> DirectiveDefinitionBuilder {
        DirectiveDefinitionBuilder::new(name)
    }

    /// The internal name this definition was declared with.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The name used to reference this directive from GraphQL documents.
    pub fn gql_name(&self) -> &str {
        self.gql_name.as_str()
    }

    /// The name prefixed with `@`, as used in diagnostics.
    pub fn display_name(&self) -> String {
        format!("@{}", self.gql_name)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Abstract definitions only exist to be inherited from; they cannot be
    /// registered or instantiated.
    pub fn is_abstract(&self) -> bool {
        self.abstract_
    }

    /// The namespaces this definition is registered under. The first one is
    /// its primary namespace.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn namespace(&self) -> &str {
        self.namespaces.first()
            .map(String::as_str)
            .unwrap_or(crate::directives::BASE_NAMESPACE)
    }

    pub fn parent(&self) -> Option<&Arc<DirectiveDefinition>> {
        self.parent.as_ref()
    }

    /// Whether this definition is `other` or inherits from it.
    pub fn is_kind_of(&self, other: &DirectiveDefinition) -> bool {
        std::ptr::eq(self, other)
            || self.parent.as_ref().is_some_and(|parent| parent.is_kind_of(other))
    }

    /// The locations this directive may be placed on.
    pub fn locations(&self) -> &IndexSet<DirectiveLocation> {
        self.locations.get(self.parent.as_ref().map(|parent| parent.locations()))
    }

    /// Only the locations declared by this definition itself.
    pub fn own_locations(&self) -> &IndexSet<DirectiveLocation> {
        self.locations.local()
    }

    /// Whether this definition's own locations replace (rather than extend)
    /// its parent's.
    pub fn replaces_parent_locations(&self) -> bool {
        self.locations.replaces_parent()
    }

    pub fn allows_location(&self, location: DirectiveLocation) -> bool {
        self.locations().contains(&location)
    }

    /// Every argument of this directive keyed by internal name, parent
    /// arguments first.
    pub fn arguments(&self) -> &IndexMap<String, Arc<dyn ArgumentSchema>> {
        &self.argument_map().0
    }

    /// Looks up an argument by either its internal or its GraphQL-facing
    /// name.
    pub fn argument(&self, name: &str) -> Option<&Arc<dyn ArgumentSchema>> {
        let arguments = self.arguments();
        arguments.get(name).or_else(|| {
            arguments.values().find(|argument| argument.gql_name() == name)
        })
    }

    /// Every listener of this directive keyed by event name. Listeners
    /// declared by a parent come first.
    pub fn listeners(&self) -> &IndexMap<String, Vec<Arc<Listener>>> {
        self.listeners.get(self.parent.as_ref().map(|parent| parent.listeners()))
    }

    pub fn listener_event_names(&self) -> impl Iterator<Item = &str> {
        self.listeners().keys().map(String::as_str)
    }

    /// Builds a new instance of this directive.
    ///
    /// `args` may be keyed by either the GraphQL-facing or the internal name
    /// of each argument. Each supplied value is deserialized by its argument's
    /// schema; arguments that are not supplied take their default value, if
    /// any. Keys which do not name an argument are ignored.
    pub fn build<K, I>(self: &Arc<Self>, args: I) -> Result<Arc<DirectiveInstance>>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        if self.abstract_ {
            return Err(DirectiveUsageError::AbstractDirective {
                directive: self.display_name(),
            });
        }

        let raw_args: IndexMap<String, Value> = args.into_iter()
            .map(|(key, value)| (key.as_ref().to_string(), value))
            .collect();

        let mut bound_args = IndexMap::new();
        for (name, schema) in self.arguments() {
            let raw = raw_args.get(schema.gql_name())
                .or_else(|| raw_args.get(name.as_str()));
            let value = match raw {
                Some(raw) => Some(schema.deserialize(raw)),
                None => schema.default_value().cloned(),
            };
            if let Some(value) = value {
                bound_args.insert(name.to_owned(), value);
            }
        }

        for key in raw_args.keys() {
            if self.argument(key).is_none() {
                log::trace!(
                    "Ignoring unknown argument `{key}` passed to {}.",
                    self.display_name(),
                );
            }
        }

        Ok(Arc::new(DirectiveInstance::new(Arc::clone(self), bound_args)))
    }

    fn argument_map(&self) -> &ArgumentMap {
        self.arguments.get(self.parent.as_ref().map(|parent| parent.argument_map()))
    }
}
