use crate::naming;
use inherent::inherent;
use serde_json::Value;

/// The contract every argument declared by a
/// [`DirectiveDefinition`](crate::directives::DirectiveDefinition) satisfies.
pub trait ArgumentSchema: std::fmt::Debug + Send + Sync {
    /// The internal (snake_case) name of the argument.
    fn name(&self) -> &str;

    /// The name of the argument as it appears in GraphQL documents.
    fn gql_name(&self) -> &str;

    /// The value bound when no value is supplied.
    fn default_value(&self) -> Option<&Value>;

    /// Coerces a raw, externally-supplied value. Values which cannot be
    /// coerced are returned as-is so that [`is_valid`](Self::is_valid) can
    /// report them.
    fn deserialize(&self, raw: &Value) -> Value;

    fn is_valid(&self, value: &Value) -> bool;

    /// The JSON-compatible representation of `value`.
    fn as_json(&self, value: &Value) -> Value;

    /// `value` rendered in GraphQL literal syntax.
    fn to_json(&self, value: &Value) -> String;
}

/// The type of an [`Argument`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentType {
    Boolean,
    Enum(Vec<String>),
    Float,
    ID,
    Int,
    /// Any JSON value.
    Json,
    String,
}
impl ArgumentType {
    pub fn name(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Enum(_) => "Enum",
            Self::Float => "Float",
            Self::ID => "ID",
            Self::Int => "Int",
            Self::Json => "JSON",
            Self::String => "String",
        }
    }

    fn coerce(&self, raw: &Value) -> Value {
        match (self, raw) {
            (Self::Int, Value::String(s)) => s.trim().parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| raw.to_owned()),
            (Self::Float, Value::String(s)) => s.trim().parse::<f64>().ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| raw.to_owned()),
            (Self::Boolean, Value::String(s)) => match s.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => raw.to_owned(),
            },
            (Self::ID, Value::Number(num)) if num.is_i64() || num.is_u64() =>
                Value::String(num.to_string()),
            _ => raw.to_owned(),
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Enum(values), Value::String(s)) => values.iter().any(|v| v == s),
            (Self::Float, Value::Number(_)) => true,
            (Self::ID, Value::String(_)) => true,
            (Self::Int, Value::Number(num)) => num.as_i64()
                .is_some_and(|n| i32::try_from(n).is_ok()),
            (Self::Json, _) => true,
            (Self::String, Value::String(_)) => true,
            _ => false,
        }
    }

    fn literal(&self, value: &Value) -> String {
        match (self, value) {
            (Self::Enum(_), Value::String(s)) => s.to_owned(),
            (_, Value::Array(items)) => format!(
                "[{}]",
                items.iter()
                    .map(|item| self.literal(item))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            // Input object literals use bare field names.
            (_, Value::Object(fields)) => format!(
                "{{{}}}",
                fields.iter()
                    .map(|(key, field)| format!("{key}: {}", self.literal(field)))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => value.to_string(),
        }
    }
}

/// A concrete [`ArgumentSchema`] for the built-in scalar kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    default_value: Option<Value>,
    description: Option<String>,
    gql_name: String,
    list: bool,
    name: String,
    nullable: bool,
    type_: ArgumentType,
}
impl Argument {
    /// A nullable, non-list argument with no default value.
    pub fn new(name: impl AsRef<str>, type_: ArgumentType) -> Self {
        let name = name.as_ref().trim().to_string();
        Self {
            default_value: None,
            description: None,
            gql_name: naming::camelize(&name),
            list: false,
            name,
            nullable: true,
            type_,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(description.as_ref().to_string());
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_list(&self) -> bool {
        self.list
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn type_(&self) -> &ArgumentType {
        &self.type_
    }
}
#[inherent]
impl ArgumentSchema for Argument {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn gql_name(&self) -> &str {
        self.gql_name.as_str()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn deserialize(&self, raw: &Value) -> Value {
        match raw {
            Value::Null => Value::Null,
            Value::Array(items) if self.list => Value::Array(
                items.iter().map(|item| self.type_.coerce(item)).collect(),
            ),
            // Input coercion wraps a single value into a list.
            _ if self.list => Value::Array(vec![self.type_.coerce(raw)]),
            _ => self.type_.coerce(raw),
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.nullable,
            Value::Array(items) if self.list =>
                items.iter().all(|item| item.is_null() || self.type_.accepts(item)),
            _ if self.list => false,
            _ => self.type_.accepts(value),
        }
    }

    pub fn as_json(&self, value: &Value) -> Value {
        value.to_owned()
    }

    pub fn to_json(&self, value: &Value) -> String {
        match value {
            Value::Array(items) if self.list => format!(
                "[{}]",
                items.iter()
                    .map(|item| self.type_.literal(item))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => self.type_.literal(value),
        }
    }
}
