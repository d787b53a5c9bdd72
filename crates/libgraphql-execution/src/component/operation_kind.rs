use crate::ast;
use crate::directives::DirectiveLocation;

/// The kind of an operation, without the operation itself. Useful when
/// representing a group or category of operations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }

    pub fn directive_location(&self) -> DirectiveLocation {
        match self {
            Self::Mutation => DirectiveLocation::Mutation,
            Self::Query => DirectiveLocation::Query,
            Self::Subscription => DirectiveLocation::Subscription,
        }
    }
}
impl std::convert::From<&ast::operation::OperationDefinition> for OperationKind {
    fn from(def: &ast::operation::OperationDefinition) -> Self {
        match def {
            ast::operation::OperationDefinition::Mutation(_) => Self::Mutation,
            ast::operation::OperationDefinition::Query(_)
                | ast::operation::OperationDefinition::SelectionSet(_) => Self::Query,
            ast::operation::OperationDefinition::Subscription(_) => Self::Subscription,
        }
    }
}
impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
