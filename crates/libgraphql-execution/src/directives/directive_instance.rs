use crate::directives::ArgumentSchema;
use crate::directives::BoundListener;
use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveGlobalId;
use crate::directives::DirectiveOwnerRef;
use crate::directives::DirectiveUsageError;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use std::sync::OnceLock;
use thiserror::Error;

/// A use of a [`DirectiveDefinition`] with concrete argument values.
///
/// Arguments are bound once, when the instance is built, and never change
/// afterwards, so an instance can be shared freely between concurrently
/// resolving components. The owner of an instance can be assigned exactly
/// once.
#[derive(Debug)]
pub struct DirectiveInstance {
    args: IndexMap<String, Value>,
    definition: Arc<DirectiveDefinition>,
    owner: OnceLock<DirectiveOwnerRef>,
}
impl DirectiveInstance {
    pub(crate) fn new(
        definition: Arc<DirectiveDefinition>,
        args: IndexMap<String, Value>,
    ) -> Self {
        Self {
            args,
            definition,
            owner: OnceLock::new(),
        }
    }

    pub fn definition(&self) -> &Arc<DirectiveDefinition> {
        &self.definition
    }

    /// Whether this is an instance of exactly `definition` (not merely of a
    /// definition inheriting from it).
    pub fn is_instance_of(&self, definition: &DirectiveDefinition) -> bool {
        std::ptr::eq(self.definition.as_ref(), definition)
    }

    /// The bound argument values, keyed by internal argument name. Arguments
    /// which were neither supplied nor defaulted are absent.
    pub fn args(&self) -> &IndexMap<String, Value> {
        &self.args
    }

    /// Looks up a bound argument by internal or GraphQL-facing name.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name).or_else(|| {
            let argument = self.definition.argument(name)?;
            self.args.get(argument.name())
        })
    }

    pub fn owner(&self) -> Option<&DirectiveOwnerRef> {
        self.owner.get()
    }

    /// Binds this instance to its owner. An instance's owner cannot change
    /// once assigned.
    pub fn assign_owner(
        &self,
        owner: DirectiveOwnerRef,
    ) -> Result<(), DirectiveUsageError> {
        self.owner.set(owner).map_err(|rejected| {
            DirectiveUsageError::OwnerAlreadyAssigned {
                directive: self.definition.display_name(),
                current_owner: self.owner.get()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                rejected_owner: rejected.to_string(),
            }
        })
    }

    /// Checks every bound argument (absent arguments count as `null`) against
    /// its schema and reports all invalid arguments at once.
    pub fn validate(&self) -> Result<(), DirectiveValidationError> {
        let mut invalid_arguments = vec![];
        for (name, schema) in self.definition.arguments() {
            let value = self.args.get(name).unwrap_or(&Value::Null);
            if !schema.is_valid(value) {
                invalid_arguments.push(InvalidArgument {
                    name: schema.gql_name().to_string(),
                    value: value.to_owned(),
                });
            }
        }

        if !invalid_arguments.is_empty() {
            return Err(DirectiveValidationError {
                directive: self.definition.display_name(),
                invalid_arguments,
            });
        }

        Ok(())
    }

    /// The bound arguments keyed by GraphQL-facing name, each rendered by its
    /// argument's `as_json`. `null` and absent arguments are left out.
    pub fn args_as_json(&self) -> IndexMap<String, Value> {
        self.serialized_args(|schema, value| schema.as_json(value))
    }

    /// Like [`args_as_json`](Self::args_as_json), with each value rendered in
    /// GraphQL literal syntax.
    pub fn args_to_json(&self) -> IndexMap<String, String> {
        self.serialized_args(|schema, value| schema.to_json(value))
    }

    /// The event names this instance listens to.
    pub fn listener_event_names(&self) -> impl Iterator<Item = &str> {
        self.definition.listener_event_names()
    }

    /// The definition's listeners, keyed by event name, each bound to this
    /// instance.
    pub fn all_events(self: &Arc<Self>) -> IndexMap<String, Vec<BoundListener>> {
        self.definition.listeners().iter()
            .map(|(event_name, listeners)| {
                let bound = listeners.iter()
                    .map(|listener| BoundListener {
                        instance: Arc::clone(self),
                        listener: Arc::clone(listener),
                    })
                    .collect();
                (event_name.to_owned(), bound)
            })
            .collect()
    }

    /// An opaque, URL-safe identifier from which this instance can be rebuilt
    /// (see [`DirectiveRegistry::decode_global_id`](crate::directives::DirectiveRegistry::decode_global_id)).
    pub fn global_id(&self) -> DirectiveGlobalId {
        let args = self.args_as_json();
        DirectiveGlobalId::new(
            self.definition.namespace(),
            self.definition.gql_name(),
            (!args.is_empty()).then_some(args),
        )
    }

    fn serialized_args<T>(
        &self,
        serialize: impl Fn(&dyn ArgumentSchema, &Value) -> T,
    ) -> IndexMap<String, T> {
        self.definition.arguments().iter()
            .filter_map(|(name, schema)| {
                let value = self.args.get(name).filter(|value| !value.is_null())?;
                Some((schema.gql_name().to_string(), serialize(schema.as_ref(), value)))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvalidArgument {
    pub name: String,
    pub value: Value,
}

/// Every invalid argument of one directive instance.
#[derive(Clone, Debug, Error, PartialEq)]
#[error(
    "Invalid arguments for the {directive} directive: {}",
    format_invalid_arguments(.invalid_arguments)
)]
pub struct DirectiveValidationError {
    pub directive: String,
    pub invalid_arguments: Vec<InvalidArgument>,
}

fn format_invalid_arguments(invalid_arguments: &[InvalidArgument]) -> String {
    invalid_arguments.iter()
        .map(|argument| format!("`{}` ({})", argument.name, argument.value))
        .collect::<Vec<_>>()
        .join(", ")
}
