use crate::directives::Argument;
use crate::directives::ArgumentType;
use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveDefinitionError;
use crate::directives::DirectiveLocation;
use crate::directives::DirectiveUsageError;
use crate::directives::tests::test_utils::no_filters;
use indexmap::IndexSet;
use serde_json::json;
use std::sync::Arc;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn base_definition() -> Result<Arc<DirectiveDefinition>> {
    Ok(DirectiveDefinition::builder("base")
        .abstract_directive()
        .placed_on(["field", "fragment_spread"])?
        .argument(Argument::new("reason", ArgumentType::String))?
        .argument(Argument::new("max_age", ArgumentType::Int).with_default(60))?
        .listener("attach", no_filters(), |_, _| Ok(()))?
        .build()?)
}

#[test]
fn names_are_camelized_and_lose_the_directive_suffix() -> Result<()> {
    let def = DirectiveDefinition::builder("cache_control_directive")
        .placed_on(["field"])?
        .build()?;
    assert_eq!(def.name(), "cache_control_directive");
    assert_eq!(def.gql_name(), "cacheControl");
    assert_eq!(def.display_name(), "@cacheControl");
    Ok(())
}

#[test]
fn empty_names_are_rejected() {
    let err = DirectiveDefinition::builder("  ").build().unwrap_err();
    assert!(matches!(err, DirectiveDefinitionError::InvalidName { .. }));
}

#[test]
fn namespaces_must_fit_in_a_global_id() {
    for namespace in ["admin/v2", "admin v2", "?x", ""] {
        let err = DirectiveDefinition::builder("cache")
            .namespace(namespace)
            .build()
            .unwrap_err();
        assert_eq!(err, DirectiveDefinitionError::InvalidNamespace {
            namespace: namespace.to_string(),
        });
    }
}

#[test]
fn placed_on_adds_to_the_parent_locations() -> Result<()> {
    let parent = base_definition()?;
    let child = DirectiveDefinition::builder("child")
        .inherit(&parent)
        .placed_on(["inline_fragment", "field"])?
        .build()?;

    let expected: IndexSet<_> = [
        DirectiveLocation::Field,
        DirectiveLocation::FragmentSpread,
        DirectiveLocation::InlineFragment,
    ].into_iter().collect();
    assert_eq!(child.locations(), &expected);
    assert!(!child.replaces_parent_locations());
    assert_eq!(child.own_locations().len(), 2);
    Ok(())
}

#[test]
fn placed_on_only_replaces_the_parent_locations() -> Result<()> {
    let parent = base_definition()?;
    let child = DirectiveDefinition::builder("child")
        .inherit(&parent)
        .placed_on_only(["enum_value"])?
        .build()?;

    let expected: IndexSet<_> = [DirectiveLocation::EnumValue].into_iter().collect();
    assert_eq!(child.locations(), &expected);
    assert!(child.replaces_parent_locations());
    assert!(!child.allows_location(DirectiveLocation::Field));
    Ok(())
}

#[test]
fn invalid_locations_are_reported_by_name() -> Result<()> {
    let builder = DirectiveDefinition::builder("probe").placed_on(["field"])?;
    let err = builder.placed_on(["field", "fieldz"]).unwrap_err();
    assert_eq!(err, DirectiveDefinitionError::InvalidLocations {
        names: vec!["fieldz".to_string()],
    });
    Ok(())
}

#[test]
fn locations_are_inherited_when_none_are_declared() -> Result<()> {
    let parent = base_definition()?;
    let child = DirectiveDefinition::builder("child").inherit(&parent).build()?;
    assert_eq!(child.locations(), parent.locations());
    assert!(child.own_locations().is_empty());
    assert_eq!(child.namespaces(), parent.namespaces());
    Ok(())
}

#[test]
fn arguments_overlay_the_parent_arguments() -> Result<()> {
    let parent = base_definition()?;
    let child = DirectiveDefinition::builder("child")
        .inherit(&parent)
        .argument(Argument::new("max_age", ArgumentType::Int).with_default(5))?
        .argument(Argument::new("scope", ArgumentType::Enum(vec![
            "PUBLIC".to_string(),
            "PRIVATE".to_string(),
        ])))?
        .build()?;

    let names: Vec<_> = child.arguments().keys().map(String::as_str).collect();
    assert_eq!(names, ["reason", "max_age", "scope"]);
    assert_eq!(
        child.argument("maxAge").and_then(|arg| arg.default_value().cloned()),
        Some(json!(5)),
    );
    assert_eq!(
        parent.argument("max_age").and_then(|arg| arg.default_value().cloned()),
        Some(json!(60)),
    );
    Ok(())
}

#[test]
fn duplicate_arguments_are_rejected() {
    let err = DirectiveDefinition::builder("probe")
        .argument(Argument::new("reason", ArgumentType::String))
        .and_then(|builder| builder.argument(Argument::new("reason", ArgumentType::Int)))
        .unwrap_err();
    assert_eq!(err, DirectiveDefinitionError::DuplicateArgument {
        argument_name: "reason".to_string(),
        directive_name: "probe".to_string(),
    });
}

#[test]
fn listeners_accumulate_across_the_hierarchy() -> Result<()> {
    let parent = base_definition()?;
    let child = DirectiveDefinition::builder("child")
        .inherit(&parent)
        .listener("attach", no_filters(), |_, _| Ok(()))?
        .listener("finalize", no_filters(), |_, _| Ok(()))?
        .build()?;

    assert_eq!(parent.listeners()["attach"].len(), 1);
    assert_eq!(child.listeners()["attach"].len(), 2);
    assert_eq!(child.listeners()["finalize"].len(), 1);
    let event_names: Vec<_> = child.listener_event_names().collect();
    assert_eq!(event_names, ["attach", "finalize"]);
    Ok(())
}

#[test]
fn is_kind_of_follows_the_parent_chain() -> Result<()> {
    let parent = base_definition()?;
    let child = DirectiveDefinition::builder("child").inherit(&parent).build()?;
    let other = DirectiveDefinition::builder("other").build()?;

    assert!(child.is_kind_of(&parent));
    assert!(child.is_kind_of(&child));
    assert!(!parent.is_kind_of(&child));
    assert!(!child.is_kind_of(&other));
    Ok(())
}

#[test]
fn build_accepts_gql_and_internal_names() -> Result<()> {
    let parent = base_definition()?;
    let def = DirectiveDefinition::builder("cached").inherit(&parent).build()?;

    let by_gql_name = def.build([("maxAge", json!(10))])?;
    let by_internal_name = def.build([("max_age", json!(10))])?;
    assert_eq!(by_gql_name.args(), by_internal_name.args());
    assert_eq!(by_gql_name.arg("maxAge"), Some(&json!(10)));
    Ok(())
}

#[test]
fn build_ignores_unknown_arguments_and_applies_defaults() -> Result<()> {
    let parent = base_definition()?;
    let def = DirectiveDefinition::builder("cached").inherit(&parent).build()?;

    let instance = def.build([("unknown", json!(true)), ("reason", json!("stale"))])?;
    assert_eq!(instance.arg("reason"), Some(&json!("stale")));
    assert_eq!(instance.arg("max_age"), Some(&json!(60)));
    assert_eq!(instance.arg("unknown"), None);
    assert_eq!(instance.args().len(), 2);
    Ok(())
}

#[test]
fn build_deserializes_through_the_argument_schema() -> Result<()> {
    let def = DirectiveDefinition::builder("sample")
        .argument(Argument::new("rate", ArgumentType::Float))?
        .argument(Argument::new("ids", ArgumentType::ID).list())?
        .build()?;

    let instance = def.build([("rate", json!("0.5")), ("ids", json!(7))])?;
    assert_eq!(instance.arg("rate"), Some(&json!(0.5)));
    assert_eq!(instance.arg("ids"), Some(&json!(["7"])));
    Ok(())
}

#[test]
fn abstract_definitions_cannot_be_built() -> Result<()> {
    let parent = base_definition()?;
    assert!(parent.is_abstract());
    let err = parent.build(Vec::<(&str, serde_json::Value)>::new()).unwrap_err();
    assert_eq!(err, DirectiveUsageError::AbstractDirective {
        directive: "@base".to_string(),
    });
    Ok(())
}
