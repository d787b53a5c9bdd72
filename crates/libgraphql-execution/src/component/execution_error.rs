use crate::ast;
use crate::component::PathSegment;
use thiserror::Error;

/// Any failure raised while a component resolves.
pub type ResolutionError = Box<dyn std::error::Error + Send + Sync>;

/// The stage of a request during which an [`ExecutionError`] was captured.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStage {
    Organize,
    Prepare,
    Resolve,
}
impl ExecutionStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Organize => "organize",
            Self::Prepare => "prepare",
            Self::Resolve => "resolve",
        }
    }
}
impl std::fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorLocation {
    pub line: usize,
    pub column: usize,
}
impl std::convert::From<ast::AstPos> for ErrorLocation {
    fn from(pos: ast::AstPos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorExtensions {
    pub stage: ExecutionStage,
}

/// A failure recorded against a single component. Serializes into the error
/// shape of a GraphQL response.
#[derive(Clone, Debug, Error, PartialEq, serde::Deserialize, serde::Serialize)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    pub extensions: ErrorExtensions,
}
impl ExecutionError {
    pub fn new(
        message: impl AsRef<str>,
        position: Option<ast::AstPos>,
        path: Vec<PathSegment>,
        stage: ExecutionStage,
    ) -> Self {
        Self {
            message: message.as_ref().to_string(),
            locations: position.into_iter().map(ErrorLocation::from).collect(),
            path,
            extensions: ErrorExtensions { stage },
        }
    }

    pub fn stage(&self) -> ExecutionStage {
        self.extensions.stage
    }
}
