#[allow(dead_code)]
pub mod operation {
    pub type Definition = graphql_parser::query::Definition<'static, String>;
    pub type Directive = graphql_parser::query::Directive<'static, String>;
    pub type Document = graphql_parser::query::Document<'static, String>;
    pub type Field = graphql_parser::query::Field<'static, String>;
    pub type FragmentDefinition = graphql_parser::query::FragmentDefinition<'static, String>;
    pub type FragmentSpread = graphql_parser::query::FragmentSpread<'static, String>;
    pub type InlineFragment = graphql_parser::query::InlineFragment<'static, String>;
    pub type Mutation = graphql_parser::query::Mutation<'static, String>;
    pub type OperationDefinition = graphql_parser::query::OperationDefinition<'static, String>;
    pub type Query = graphql_parser::query::Query<'static, String>;
    pub type Selection = graphql_parser::query::Selection<'static, String>;
    pub type SelectionSet = graphql_parser::query::SelectionSet<'static, String>;
    pub type Subscription = graphql_parser::query::Subscription<'static, String>;
    pub type TypeCondition = graphql_parser::query::TypeCondition<'static, String>;
    pub type VariableDefinition = graphql_parser::query::VariableDefinition<'static, String>;

    pub type ParseError = graphql_parser::query::ParseError;
    pub fn parse(query_src: &str) -> Result<Document, ParseError> {
        Ok(graphql_parser::query::parse_query::<String>(query_src)?.into_static())
    }
}

#[allow(dead_code)]
pub mod schema {
    pub type DirectiveLocation = graphql_parser::schema::DirectiveLocation;
}

pub type AstPos = graphql_parser::Pos;
pub type Value = graphql_parser::query::Value<'static, String>;

/// Converts a GraphQL input [`Value`] into its JSON representation.
///
/// Variables are looked up in `variables`; a variable with no provided value
/// becomes `null`.
pub fn value_to_json(
    value: &Value,
    variables: &indexmap::IndexMap<String, serde_json::Value>,
) -> serde_json::Value {
    match value {
        Value::Variable(name) =>
            variables.get(name).cloned().unwrap_or(serde_json::Value::Null),
        Value::Int(num) => match num.as_i64() {
            Some(num) => serde_json::Value::from(num),
            None => serde_json::Value::Null,
        },
        Value::Float(num) => serde_json::Number::from_f64(*num)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.to_owned()),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Null => serde_json::Value::Null,
        Value::Enum(name) => serde_json::Value::String(name.to_owned()),
        Value::List(items) => serde_json::Value::Array(
            items.iter().map(|item| value_to_json(item, variables)).collect(),
        ),
        Value::Object(fields) => serde_json::Value::Object(
            fields.iter()
                .map(|(key, val)| (key.to_owned(), value_to_json(val, variables)))
                .collect(),
        ),
    }
}
