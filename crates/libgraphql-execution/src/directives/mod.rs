mod argument;
mod directive_definition;
mod directive_definition_builder;
mod directive_instance;
mod directive_location;
mod directive_owner;
mod directive_registry;
mod directive_usage_error;
mod event;
mod event_filter_registry;
mod global_id;
mod inherited;
mod listener;

pub use argument::Argument;
pub use argument::ArgumentSchema;
pub use argument::ArgumentType;
pub use directive_definition::DirectiveDefinition;
pub use directive_definition_builder::DirectiveDefinitionBuilder;
pub use directive_definition_builder::DirectiveDefinitionError;
pub use directive_instance::DirectiveInstance;
pub use directive_instance::DirectiveValidationError;
pub use directive_instance::InvalidArgument;
pub use directive_location::DirectiveLocation;
pub use directive_location::LocationCategory;
pub use directive_owner::DirectiveOwner;
pub use directive_owner::DirectiveOwnerRef;
pub use directive_owner::DirectiveSet;
pub use directive_registry::BASE_NAMESPACE;
pub use directive_registry::DecodedDirective;
pub use directive_registry::DirectiveRegistry;
pub use directive_registry::TypeMap;
pub use directive_usage_error::DirectiveUsageError;
pub use directive_usage_error::DirectiveUseError;
pub use event::Event;
pub use event::EventPhase;
pub use event::EventSource;
pub use event_filter_registry::EventFilter;
pub use event_filter_registry::EventFilterRegistry;
pub use event_filter_registry::FilterArg;
pub use event_filter_registry::FilterNormalizer;
pub use event_filter_registry::FilterPredicate;
pub use event_filter_registry::FilterValue;
pub use global_id::DirectiveGlobalId;
pub use listener::BoundListener;
pub use listener::Listener;
pub use listener::ListenerCallback;
pub use listener::ListenerError;
pub use listener::ListenerFilter;
pub use listener::ListenerResult;

#[cfg(test)]
mod tests;
