use crate::component::OperationKind;
use indexmap::IndexSet;

/// Data every component reads from its node.
const BASE_PARTS: &[&str] = &["directives"];
const OPERATION_PARTS: &[&str] = &["name", "variables", "selection"];
const FIELD_PARTS: &[&str] = &["name", "alias", "arguments", "selection"];
const FRAGMENT_PARTS: &[&str] = &["name", "type", "selection"];
const SPREAD_PARTS: &[&str] = &["name"];
const TYPENAME_PARTS: &[&str] = &["name", "alias"];

/// The kind of node a [`Component`](crate::component::Component) represents
/// in a request's execution tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Field,
    /// A fragment definition or an inline fragment.
    Fragment,
    Operation(OperationKind),
    /// A fragment spread.
    Spread,
    /// A `__typename` field.
    Typename,
}
impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Fragment => "fragment",
            Self::Operation(_) => "operation",
            Self::Spread => "spread",
            Self::Typename => "typename",
        }
    }

    /// The names this kind answers to, most general first. An operation
    /// answers to `operation` as well as to its operation kind.
    pub fn type_names(&self) -> Vec<&'static str> {
        match self {
            Self::Operation(kind) => vec![self.name(), kind.name()],
            _ => vec![self.name()],
        }
    }

    /// Whether this kind answers to `type_name` (case-insensitive).
    pub fn is_a(&self, type_name: &str) -> bool {
        self.type_names()
            .into_iter()
            .any(|name| name.eq_ignore_ascii_case(type_name))
    }

    /// The node attributes a component of this kind reads: those shared by
    /// every component followed by this kind's own, without repeats.
    pub fn data_parts(&self) -> IndexSet<&'static str> {
        let own_parts = match self {
            Self::Field => FIELD_PARTS,
            Self::Fragment => FRAGMENT_PARTS,
            Self::Operation(_) => OPERATION_PARTS,
            Self::Spread => SPREAD_PARTS,
            Self::Typename => TYPENAME_PARTS,
        };
        BASE_PARTS.iter()
            .chain(own_parts.iter())
            .copied()
            .collect()
    }
}
impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operation(kind) => write!(f, "{} ({kind})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
