use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveDefinitionBuilder;
use crate::directives::DirectiveDefinitionError;
use crate::directives::DirectiveGlobalId;
use crate::directives::DirectiveInstance;
use crate::directives::DirectiveUsageError;
use crate::directives::EventFilterRegistry;
use crate::naming;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

type Result<T> = std::result::Result<T, DirectiveUsageError>;

/// The namespace every directive kind falls back to.
pub const BASE_NAMESPACE: &str = "base";

/// Looks up directive kinds by name. This is the contract directive owners
/// rely on to resolve directives referenced by name.
pub trait TypeMap {
    /// Finds the directive kind called `name`, searching `namespaces` in
    /// order and then the [base namespace](BASE_NAMESPACE).
    ///
    /// `prevent_register` names the directive kind (if any) the requesting
    /// owner is itself part of; resolving to that kind is an error, since
    /// the directive would then reference itself.
    fn fetch_directive(
        &self,
        name: &str,
        namespaces: &[String],
        prevent_register: Option<&str>,
    ) -> Result<Arc<DirectiveDefinition>>;
}

/// The result of decoding a [`DirectiveGlobalId`].
#[derive(Clone, Debug)]
pub enum DecodedDirective {
    /// The id carried no arguments: it names a directive kind.
    Definition(Arc<DirectiveDefinition>),

    /// The id carried arguments: a fresh instance built from them.
    Instance(Arc<DirectiveInstance>),
}

/// The set of concrete directive kinds known to a schema, keyed by namespace
/// and GraphQL-facing name.
///
/// This is the single, explicit factory through which directive kinds are
/// looked up by name and instantiated.
#[derive(Debug)]
pub struct DirectiveRegistry {
    directives: IndexMap<(String, String), Arc<DirectiveDefinition>>,
    event_filters: Arc<EventFilterRegistry>,
}
impl DirectiveRegistry {
    /// An empty registry using the built-in event filters.
    pub fn new() -> Self {
        Self::with_event_filters(EventFilterRegistry::builtin())
    }

    pub fn with_event_filters(event_filters: Arc<EventFilterRegistry>) -> Self {
        Self {
            directives: IndexMap::new(),
            event_filters,
        }
    }

    pub fn event_filters(&self) -> &Arc<EventFilterRegistry> {
        &self.event_filters
    }

    /// A [`DirectiveDefinitionBuilder`] whose listeners are normalized with
    /// this registry's event filters.
    pub fn definition_builder(&self, name: impl AsRef<str>) -> DirectiveDefinitionBuilder {
        DirectiveDefinitionBuilder::new(name)
            .event_filters(Arc::clone(&self.event_filters))
    }

    /// Registers a concrete directive kind under each of its namespaces.
    pub fn register(
        &mut self,
        definition: Arc<DirectiveDefinition>,
    ) -> std::result::Result<(), DirectiveDefinitionError> {
        if definition.is_abstract() {
            return Err(DirectiveDefinitionError::AbstractDirectiveRegistration {
                directive_name: definition.gql_name().to_string(),
            });
        }

        let keys: Vec<(String, String)> = definition.namespaces().iter()
            .map(|namespace| (namespace.to_owned(), definition.gql_name().to_string()))
            .collect();
        if let Some((namespace, directive_name)) =
            keys.iter().find(|key| self.directives.contains_key(*key)) {
            return Err(DirectiveDefinitionError::DuplicateDirectiveRegistration {
                directive_name: directive_name.to_owned(),
                namespace: namespace.to_owned(),
            });
        }

        log::debug!(
            "Registering directive {} in namespaces {:?}.",
            definition.display_name(),
            definition.namespaces(),
        );
        for key in keys {
            self.directives.insert(key, Arc::clone(&definition));
        }
        Ok(())
    }

    /// Resolves a directive kind by name in the base namespace. The name may
    /// be written with or without a leading `@`, in GraphQL-facing or
    /// internal form.
    pub fn resolve(&self, name: &str) -> Result<Arc<DirectiveDefinition>> {
        self.fetch_directive(name, &[], None)
    }

    /// Resolves the directive kind called `name` and builds an instance of it
    /// from `args`.
    pub fn instantiate<K, I>(&self, name: &str, args: I) -> Result<Arc<DirectiveInstance>>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        self.resolve(name)?.build(args)
    }

    /// Decodes a global id produced by
    /// [`DirectiveInstance::global_id`](crate::directives::DirectiveInstance::global_id).
    pub fn decode_global_id(&self, global_id: &str) -> Result<DecodedDirective> {
        let global_id = DirectiveGlobalId::parse(global_id)?;
        let definition = self.fetch_directive(
            global_id.directive(),
            &[global_id.namespace().to_string()],
            None,
        )?;
        Ok(match global_id.args() {
            None => DecodedDirective::Definition(definition),
            Some(args) => DecodedDirective::Instance(
                definition.build(args.iter().map(|(k, v)| (k, v.to_owned())))?,
            ),
        })
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Arc<DirectiveDefinition>> {
        self.directives.values()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
impl std::default::Default for DirectiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
impl TypeMap for DirectiveRegistry {
    fn fetch_directive(
        &self,
        name: &str,
        namespaces: &[String],
        prevent_register: Option<&str>,
    ) -> Result<Arc<DirectiveDefinition>> {
        let gql_name = naming::directive_gql_name(name);
        let base = [BASE_NAMESPACE.to_string()];
        let definition = namespaces.iter()
            .chain(base.iter())
            .find_map(|namespace| {
                self.directives.get(&(namespace.to_owned(), gql_name.to_owned()))
            })
            .ok_or_else(|| DirectiveUsageError::DirectiveNotFound {
                name: gql_name.to_owned(),
                namespaces: namespaces.iter()
                    .chain(base.iter())
                    .cloned()
                    .collect(),
            })?;

        if let Some(prevented) = prevent_register
            && naming::directive_gql_name(prevented) == definition.gql_name() {
            return Err(DirectiveUsageError::SelfReferentialDirective {
                directive: definition.display_name(),
            });
        }

        Ok(Arc::clone(definition))
    }
}
