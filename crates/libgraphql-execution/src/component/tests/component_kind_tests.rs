use crate::ast;
use crate::component::AstNode;
use crate::component::ComponentKind;
use crate::component::OperationKind;
use crate::component::tests::test_utils::children;
use crate::component::tests::test_utils::fragment;
use crate::component::tests::test_utils::operation;
use crate::directives::DirectiveLocation;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[test]
fn data_parts_start_with_the_shared_parts() {
    let field: Vec<_> = ComponentKind::Field.data_parts().into_iter().collect();
    assert_eq!(field, ["directives", "name", "alias", "arguments", "selection"]);

    let operation: Vec<_> = ComponentKind::Operation(OperationKind::Query)
        .data_parts()
        .into_iter()
        .collect();
    assert_eq!(operation, ["directives", "name", "variables", "selection"]);

    let spread: Vec<_> = ComponentKind::Spread.data_parts().into_iter().collect();
    assert_eq!(spread, ["directives", "name"]);
}

#[test]
fn operations_answer_to_their_operation_kind() {
    let query = ComponentKind::Operation(OperationKind::Query);
    assert!(query.is_a("operation"));
    assert!(query.is_a("Query"));
    assert!(!query.is_a("mutation"));
    assert!(!ComponentKind::Field.is_a("query"));
    assert_eq!(query.to_string(), "operation (query)");
    assert_eq!(ComponentKind::Typename.to_string(), "typename");
}

#[test]
fn nodes_map_to_component_kinds_and_locations() -> Result<()> {
    let doc = ast::operation::parse(
        "mutation Rename { user { __typename ...UserParts ... on User { id } } }
         fragment UserParts on User { name }",
    )?;
    let op = AstNode::Operation(operation(&doc).ok_or("missing operation")?);
    assert_eq!(op.component_kind(), ComponentKind::Operation(OperationKind::Mutation));
    assert_eq!(op.directive_location(), DirectiveLocation::Mutation);

    let user = children(op)[0];
    assert_eq!(user.component_kind(), ComponentKind::Field);
    assert_eq!(user.directive_location(), DirectiveLocation::Field);

    let kinds: Vec<_> = children(user).iter().map(AstNode::component_kind).collect();
    assert_eq!(kinds, [
        ComponentKind::Typename,
        ComponentKind::Spread,
        ComponentKind::Fragment,
    ]);
    let locations: Vec<_> = children(user).iter().map(AstNode::directive_location).collect();
    assert_eq!(locations, [
        DirectiveLocation::Field,
        DirectiveLocation::FragmentSpread,
        DirectiveLocation::InlineFragment,
    ]);

    let user_parts = AstNode::FragmentDefinition(
        fragment(&doc, "UserParts").ok_or("missing fragment")?,
    );
    assert_eq!(user_parts.component_kind(), ComponentKind::Fragment);
    assert_eq!(user_parts.directive_location(), DirectiveLocation::FragmentDefinition);
    assert_eq!(user_parts.type_condition(), Some("User"));
    Ok(())
}

#[test]
fn shorthand_queries_are_anonymous_queries() -> Result<()> {
    let doc = ast::operation::parse("{ viewer { id } }")?;
    let op = AstNode::Operation(operation(&doc).ok_or("missing operation")?);
    assert_eq!(op.component_kind(), ComponentKind::Operation(OperationKind::Query));
    assert_eq!(op.directive_location(), DirectiveLocation::Query);
    assert_eq!(op.name(), None);
    assert!(op.directives().is_empty());
    Ok(())
}
