use crate::ast::AstPos;
use crate::component::ErrorLocation;
use crate::component::ErrorSink;
use crate::component::ExecutionError;
use crate::component::ExecutionStage;
use crate::component::PathSegment;
use serde_json::json;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[test]
fn serializes_as_a_graphql_response_error() -> Result<()> {
    let error = ExecutionError::new(
        "user not found",
        Some(AstPos { line: 2, column: 5 }),
        vec![PathSegment::from("users"), PathSegment::Index(0), PathSegment::from("name")],
        ExecutionStage::Resolve,
    );
    assert_eq!(error.locations, [ErrorLocation { line: 2, column: 5 }]);
    assert_eq!(error.to_string(), "user not found");

    let serialized = serde_json::to_value(&error)?;
    assert_eq!(serialized, json!({
        "message": "user not found",
        "locations": [{ "line": 2, "column": 5 }],
        "path": ["users", 0, "name"],
        "extensions": { "stage": "resolve" },
    }));

    let deserialized: ExecutionError = serde_json::from_value(serialized)?;
    assert_eq!(deserialized, error);
    Ok(())
}

#[test]
fn empty_locations_and_paths_are_omitted() -> Result<()> {
    let error = ExecutionError::new("bad document", None, vec![], ExecutionStage::Organize);
    assert_eq!(error.stage(), ExecutionStage::Organize);
    assert_eq!(serde_json::to_value(&error)?, json!({
        "message": "bad document",
        "extensions": { "stage": "organize" },
    }));
    Ok(())
}

#[test]
fn error_sinks_keep_insertion_order() {
    let sink = ErrorSink::new();
    assert!(sink.is_empty());
    for message in ["first", "second", "third"] {
        sink.push(ExecutionError::new(message, None, vec![], ExecutionStage::Prepare));
    }

    let snapshot: Vec<_> = sink.errors().into_iter().map(|err| err.message).collect();
    assert_eq!(snapshot, ["first", "second", "third"]);
    assert_eq!(sink.len(), 3);
    assert_eq!(sink.into_errors().len(), 3);
}
