use crate::ast;
use crate::directives::DirectiveDefinitionError;

type Result<T> = std::result::Result<T, DirectiveDefinitionError>;

/// A structural position within a schema or executable document at which a
/// directive may be placed.
///
/// See
/// [Directive Locations](https://spec.graphql.org/October2021/#DirectiveLocations)
/// in the GraphQL reference.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,

    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

/// Which half of the taxonomy a [`DirectiveLocation`] belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LocationCategory {
    /// Positions evaluated while running a request.
    Execution,

    /// Positions evaluated while building a schema.
    Definition,
}

/// The taxonomy, in order. Entries before `EXECUTION_BOUNDARY` are execution
/// locations, the rest are definition locations.
static TAXONOMY: [DirectiveLocation; 18] = [
    DirectiveLocation::Query,
    DirectiveLocation::Mutation,
    DirectiveLocation::Subscription,
    DirectiveLocation::Field,
    DirectiveLocation::FragmentDefinition,
    DirectiveLocation::FragmentSpread,
    DirectiveLocation::InlineFragment,
    DirectiveLocation::Schema,
    DirectiveLocation::Scalar,
    DirectiveLocation::Object,
    DirectiveLocation::FieldDefinition,
    DirectiveLocation::ArgumentDefinition,
    DirectiveLocation::Interface,
    DirectiveLocation::Union,
    DirectiveLocation::Enum,
    DirectiveLocation::EnumValue,
    DirectiveLocation::InputObject,
    DirectiveLocation::InputFieldDefinition,
];
const EXECUTION_BOUNDARY: usize = 7;

impl DirectiveLocation {
    /// Every location, in taxonomy order.
    pub fn all() -> &'static [DirectiveLocation] {
        &TAXONOMY
    }

    pub fn execution_locations() -> &'static [DirectiveLocation] {
        &TAXONOMY[..EXECUTION_BOUNDARY]
    }

    pub fn definition_locations() -> &'static [DirectiveLocation] {
        &TAXONOMY[EXECUTION_BOUNDARY..]
    }

    pub fn category(&self) -> LocationCategory {
        if self.index() < EXECUTION_BOUNDARY {
            LocationCategory::Execution
        } else {
            LocationCategory::Definition
        }
    }

    pub fn is_execution(&self) -> bool {
        self.category() == LocationCategory::Execution
    }

    pub fn is_definition(&self) -> bool {
        self.category() == LocationCategory::Definition
    }

    /// The name of this location as it is written in a GraphQL document
    /// (e.g. `FIELD_DEFINITION`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::Schema => "SCHEMA",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::InputObject => "INPUT_OBJECT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }

    /// Looks up a location by name, ignoring case and word separators, so
    /// `FIELD_DEFINITION`, `field_definition`, `fieldDefinition` and
    /// `field-definition` all resolve to
    /// [`FieldDefinition`](Self::FieldDefinition).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize_name(name);
        TAXONOMY.iter()
            .copied()
            .find(|location| normalize_name(location.name()) == normalized)
    }

    /// Resolves every name in `names` against the taxonomy.
    ///
    /// If any name is not a known location the whole list is rejected and the
    /// error lists every unknown name, in the order they were given.
    pub fn parse_all<I, S>(names: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locations = vec![];
        let mut invalid_names = vec![];
        for name in names {
            let name = name.as_ref();
            match Self::from_name(name) {
                Some(location) => locations.push(location),
                None => invalid_names.push(name.to_string()),
            }
        }

        if !invalid_names.is_empty() {
            return Err(DirectiveDefinitionError::InvalidLocations {
                names: invalid_names,
            });
        }

        Ok(locations)
    }

    fn index(&self) -> usize {
        TAXONOMY.iter()
            .position(|location| location == self)
            .unwrap_or(TAXONOMY.len())
    }
}

impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DirectiveLocation {
    type Err = DirectiveDefinitionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| DirectiveDefinitionError::InvalidLocations {
            names: vec![s.to_string()],
        })
    }
}

impl std::convert::TryFrom<&ast::schema::DirectiveLocation> for DirectiveLocation {
    type Error = DirectiveDefinitionError;

    fn try_from(value: &ast::schema::DirectiveLocation) -> Result<Self> {
        value.as_str().parse()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
