use crate::directives::Argument;
use crate::directives::ArgumentType;
use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveInstance;
use crate::directives::DirectiveLocation;
use crate::directives::DirectiveOwner;
use crate::directives::DirectiveRegistry;
use crate::directives::DirectiveUsageError;
use crate::directives::Event;
use crate::directives::EventPhase;
use crate::directives::FilterArg;
use crate::directives::ListenerResult;
use crate::directives::tests::test_utils::TestOwner;
use crate::directives::tests::test_utils::TestSource;
use crate::directives::tests::test_utils::no_filters;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn deprecated_definition() -> Result<Arc<DirectiveDefinition>> {
    Ok(DirectiveDefinition::builder("deprecated")
        .placed_on(["field"])?
        .argument(Argument::new("reason", ArgumentType::String).non_null())?
        .build()?)
}

#[test]
fn field_directive_attaches_to_fields_but_not_fragments() -> Result<()> {
    let definition = deprecated_definition()?;
    let instance = definition.build([("reason", json!("test"))])?;

    let mut field = TestOwner::new("name", DirectiveLocation::Field);
    field.use_directive(Arc::clone(&instance))?;
    assert_eq!(field.directives().len(), 1);
    assert!(field.is_using(&definition));
    assert!(field.has_directive(&definition));

    let mut fragment = TestOwner::new("UserParts", DirectiveLocation::FragmentDefinition);
    let err = fragment.use_directive(instance).unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::LocationMismatch { .. }));
    assert!(err.to_string().contains("@deprecated"), "{err}");
    assert!(fragment.directives().is_empty());
    Ok(())
}

#[test]
fn location_mismatch_leaves_the_directive_set_unchanged() -> Result<()> {
    let definition = deprecated_definition()?;
    let mut owner = TestOwner::new("Status", DirectiveLocation::EnumValue);
    let before = owner.directives().len();

    let instance = definition.build([("reason", json!("test"))])?;
    let err = owner.use_directive(Arc::clone(&instance)).unwrap_err();
    match err.error() {
        DirectiveUsageError::LocationMismatch { allowed_locations, location, .. } => {
            assert_eq!(allowed_locations, &[DirectiveLocation::Field]);
            assert_eq!(*location, DirectiveLocation::EnumValue);
        },
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(owner.directives().len(), before);
    assert_eq!(instance.owner(), None);
    Ok(())
}

#[test]
fn use_errors_report_the_call_site() -> Result<()> {
    let definition = deprecated_definition()?;
    let mut owner = TestOwner::new("Status", DirectiveLocation::EnumValue);
    let instance = definition.build([("reason", json!("test"))])?;

    let line = line!() + 1;
    let err = owner.use_directive(instance).unwrap_err();
    assert_eq!(err.call_site.file(), file!());
    assert_eq!(err.call_site.line(), line);
    assert!(err.to_string().contains(file!()), "{err}");
    Ok(())
}

#[test]
fn an_instance_belongs_to_a_single_owner() -> Result<()> {
    let instance = deprecated_definition()?.build([("reason", json!("test"))])?;
    let mut name = TestOwner::new("name", DirectiveLocation::Field);
    let mut email = TestOwner::new("email", DirectiveLocation::Field);

    name.use_directive(Arc::clone(&instance))?;
    name.use_directive(Arc::clone(&instance))?;
    assert_eq!(name.directives().len(), 1);

    let err = email.use_directive(instance).unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::OwnerAlreadyAssigned { .. }));
    assert!(email.directives().is_empty());
    Ok(())
}

#[test]
fn batch_attachment_is_all_or_nothing() -> Result<()> {
    let deprecated = deprecated_definition()?;
    let fragment_only = DirectiveDefinition::builder("fragment_only")
        .placed_on(["fragment_definition"])?
        .build()?;
    let first = deprecated.build([("reason", json!("one"))])?;
    let second = deprecated.build([("reason", json!("two"))])?;
    let misplaced = fragment_only.build(Vec::<(&str, Value)>::new())?;

    let mut field = TestOwner::new("name", DirectiveLocation::Field);
    let err = field
        .use_directives([Arc::clone(&first), Arc::clone(&second), misplaced])
        .unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::LocationMismatch { .. }));
    assert!(field.directives().is_empty());
    assert_eq!(first.owner(), None);
    assert_eq!(second.owner(), None);

    let added = field.use_directives([
        Arc::clone(&first),
        Arc::clone(&second),
        Arc::clone(&first),
    ])?;
    assert_eq!(added, 2);
    assert_eq!(field.directives().len(), 2);
    assert_eq!(first.owner(), Some(&field.directive_owner_ref()));
    Ok(())
}

#[test]
fn batch_attachment_rejects_instances_owned_elsewhere() -> Result<()> {
    let definition = deprecated_definition()?;
    let owned = definition.build([("reason", json!("taken"))])?;
    let fresh = definition.build([("reason", json!("fresh"))])?;
    let mut email = TestOwner::new("email", DirectiveLocation::Field);
    email.use_directive(Arc::clone(&owned))?;

    let mut name = TestOwner::new("name", DirectiveLocation::Field);
    let err = name.use_directives([Arc::clone(&fresh), owned]).unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::OwnerAlreadyAssigned { .. }));
    assert!(name.directives().is_empty());
    assert_eq!(fresh.owner(), None);
    Ok(())
}

#[test]
fn two_instances_of_one_kind_can_coexist() -> Result<()> {
    let definition = deprecated_definition()?;
    let mut owner = TestOwner::new("name", DirectiveLocation::Field);
    owner.use_directive(definition.build([("reason", json!("one"))])?)?;
    owner.use_directive(definition.build([("reason", json!("two"))])?)?;
    assert_eq!(owner.directives().len(), 2);
    Ok(())
}

#[test]
fn validate_freezes_the_directive_set() -> Result<()> {
    let definition = deprecated_definition()?;
    let mut owner = TestOwner::new("name", DirectiveLocation::Field);
    owner.use_directive(definition.build([("reason", json!("old"))])?)?;

    owner.validate_directives().map_err(|errors| format!("{errors:?}"))?;
    assert!(owner.directive_set().is_frozen());

    let err = owner
        .use_directive(definition.build([("reason", json!("new"))])?)
        .unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::DirectivesFrozen { .. }));
    assert_eq!(owner.directives().len(), 1);
    Ok(())
}

#[test]
fn failed_validation_reports_each_directive_and_does_not_freeze() -> Result<()> {
    let definition = deprecated_definition()?;
    let mut owner = TestOwner::new("name", DirectiveLocation::Field);
    owner.use_directive(definition.build([("reason", Value::Null)])?)?;
    owner.use_directive(definition.build([("reason", json!(42))])?)?;

    let errors = owner.validate_directives().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|err| err.directive == "@deprecated"));
    assert!(!owner.directive_set().is_frozen());
    Ok(())
}

#[test]
fn directives_are_resolved_by_name() -> Result<()> {
    let mut registry = DirectiveRegistry::new();
    let definition = deprecated_definition()?;
    registry.register(Arc::clone(&definition))?;

    let mut owner = TestOwner::new("name", DirectiveLocation::Field);
    let instance = owner.use_directive_named(&registry, "@deprecated", [
        ("reason", json!("use fullName")),
    ])?;
    assert!(instance.is_instance_of(&definition));
    assert!(owner.is_using_named(&registry, "deprecated"));
    assert!(!owner.is_using_named(&registry, "missing"));

    let err = owner
        .use_directive_named(&registry, "missing", Vec::<(&str, Value)>::new())
        .unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::DirectiveNotFound { .. }));
    Ok(())
}

#[test]
fn owner_namespaces_are_searched_before_the_base_namespace() -> Result<()> {
    let mut registry = DirectiveRegistry::new();
    let base = deprecated_definition()?;
    let admin = DirectiveDefinition::builder("deprecated")
        .namespace("admin")
        .placed_on(["field"])?
        .build()?;
    registry.register(Arc::clone(&base))?;
    registry.register(Arc::clone(&admin))?;

    let mut admin_field = TestOwner::new("name", DirectiveLocation::Field).in_namespace("admin");
    let instance = admin_field.use_directive_named(&registry, "deprecated", [
        ("reason", json!("x")),
    ])?;
    assert!(instance.is_instance_of(&admin));

    let mut plain_field = TestOwner::new("name", DirectiveLocation::Field);
    let instance = plain_field.use_directive_named(&registry, "deprecated", [
        ("reason", json!("x")),
    ])?;
    assert!(instance.is_instance_of(&base));
    Ok(())
}

#[test]
fn an_element_cannot_use_the_directive_it_belongs_to() -> Result<()> {
    let mut registry = DirectiveRegistry::new();
    let definition = DirectiveDefinition::builder("constraint")
        .placed_on(["argument_definition"])?
        .build()?;
    registry.register(definition)?;

    let mut argument = TestOwner::new("min", DirectiveLocation::ArgumentDefinition)
        .owned_by("constraint");
    let err = argument
        .use_directive_named(&registry, "constraint", Vec::<(&str, Value)>::new())
        .unwrap_err();
    assert!(matches!(err.error(), DirectiveUsageError::SelfReferentialDirective { .. }));
    assert!(argument.directives().is_empty());
    Ok(())
}

#[test]
fn events_merge_across_attached_directives() -> Result<()> {
    let seen = Arc::new(Mutex::new(vec![]));
    let log_reason = {
        let seen = Arc::clone(&seen);
        move |instance: &DirectiveInstance, event: &Event<'_>| -> ListenerResult {
            let reason = instance.arg("reason").cloned().unwrap_or_default();
            seen.lock().unwrap().push(format!("{}:{reason}", event.name()));
            Ok(())
        }
    };
    let audit = DirectiveDefinition::builder("audit")
        .placed_on(["field"])?
        .argument(Argument::new("reason", ArgumentType::String))?
        .listener("resolve", no_filters(), log_reason.clone())?
        .listener("finalize", no_filters(), log_reason)?
        .build()?;
    let trace = DirectiveDefinition::builder("trace")
        .placed_on(["field"])?
        .listener("resolve", [("during", FilterArg::from(EventPhase::Execution))], |_, _| Ok(()))?
        .build()?;

    let mut owner = TestOwner::new("name", DirectiveLocation::Field);
    owner.use_directive(audit.build([("reason", json!("a"))])?)?;
    owner.use_directive(audit.build([("reason", json!("b"))])?)?;
    owner.use_directive(trace.build(Vec::<(&str, Value)>::new())?)?;

    let listeners: Vec<_> = owner.all_directive_listeners().into_iter().collect();
    assert_eq!(listeners, ["resolve", "finalize"]);
    assert_eq!(owner.all_directive_events()["resolve"].len(), 3);
    assert_eq!(owner.all_directive_events()["finalize"].len(), 2);

    let source = TestSource(vec![]);
    let fired = owner.trigger_directive_event(&Event::new("resolve", &source))?;
    assert_eq!(fired, 2);
    let fired = owner.trigger_directive_event(
        &Event::new("resolve", &source).with_phase(EventPhase::Execution),
    )?;
    assert_eq!(fired, 3);
    assert_eq!(owner.trigger_directive_event(&Event::new("unknown", &source))?, 0);

    assert_eq!(*seen.lock().unwrap(), [
        "resolve:\"a\"",
        "resolve:\"b\"",
        "resolve:\"a\"",
        "resolve:\"b\"",
    ]);
    Ok(())
}

#[test]
fn attaching_a_directive_resets_the_event_cache() -> Result<()> {
    let definition = DirectiveDefinition::builder("audit")
        .placed_on(["field"])?
        .listener("resolve", no_filters(), |_, _| Ok(()))?
        .build()?;
    let mut owner = TestOwner::new("name", DirectiveLocation::Field);

    owner.use_directive(definition.build(Vec::<(&str, Value)>::new())?)?;
    assert_eq!(owner.all_directive_events()["resolve"].len(), 1);
    owner.use_directive(definition.build(Vec::<(&str, Value)>::new())?)?;
    assert_eq!(owner.all_directive_events()["resolve"].len(), 2);
    Ok(())
}

#[test]
fn the_first_listener_error_stops_dispatch() -> Result<()> {
    let calls = Arc::new(Mutex::new(0));
    let failing = DirectiveDefinition::builder("failing")
        .placed_on(["field"])?
        .listener("resolve", no_filters(), |_, _| Err("boom".into()))?
        .build()?;
    let counting = {
        let calls = Arc::clone(&calls);
        DirectiveDefinition::builder("counting")
            .placed_on(["field"])?
            .listener("resolve", no_filters(), move |_, _| {
                *calls.lock().unwrap() += 1;
                Ok(())
            })?
            .build()?
    };

    let mut owner = TestOwner::new("name", DirectiveLocation::Field);
    owner.use_directive(failing.build(Vec::<(&str, Value)>::new())?)?;
    owner.use_directive(counting.build(Vec::<(&str, Value)>::new())?)?;

    let source = TestSource(vec![]);
    let err = owner.trigger_directive_event(&Event::new("resolve", &source)).unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(*calls.lock().unwrap(), 0);
    Ok(())
}
