use crate::ast;
use crate::component::ComponentKind;
use crate::component::OperationKind;
use crate::directives::DirectiveLocation;

const TYPENAME_FIELD: &str = "__typename";

/// A borrowed reference to the executable-document node a
/// [`Component`](crate::component::Component) was built from. The document
/// outlives every component referring to it.
#[derive(Clone, Copy, Debug)]
pub enum AstNode<'ast> {
    Field(&'ast ast::operation::Field),
    FragmentDefinition(&'ast ast::operation::FragmentDefinition),
    FragmentSpread(&'ast ast::operation::FragmentSpread),
    InlineFragment(&'ast ast::operation::InlineFragment),
    Operation(&'ast ast::operation::OperationDefinition),
}

/// One attribute of an [`AstNode`], as exposed through
/// [`ComponentData`](crate::component::ComponentData).
#[derive(Clone, Copy, Debug)]
pub enum NodePart<'ast> {
    Alias(Option<&'ast str>),
    Arguments(&'ast [(String, ast::Value)]),
    Directives(&'ast [ast::operation::Directive]),
    Name(Option<&'ast str>),
    Selection(Option<&'ast ast::operation::SelectionSet>),
    Type(Option<&'ast str>),
    Variables(&'ast [ast::operation::VariableDefinition]),
}

impl<'ast> AstNode<'ast> {
    /// The kind of component this node produces.
    pub fn component_kind(&self) -> ComponentKind {
        match self {
            Self::Field(field) if field.name == TYPENAME_FIELD => ComponentKind::Typename,
            Self::Field(_) => ComponentKind::Field,
            Self::FragmentDefinition(_)
                | Self::InlineFragment(_) => ComponentKind::Fragment,
            Self::FragmentSpread(_) => ComponentKind::Spread,
            Self::Operation(def) => ComponentKind::Operation(OperationKind::from(*def)),
        }
    }

    /// The location a directive annotating this node occupies.
    pub fn directive_location(&self) -> DirectiveLocation {
        match self {
            Self::Field(_) => DirectiveLocation::Field,
            Self::FragmentDefinition(_) => DirectiveLocation::FragmentDefinition,
            Self::FragmentSpread(_) => DirectiveLocation::FragmentSpread,
            Self::InlineFragment(_) => DirectiveLocation::InlineFragment,
            Self::Operation(def) => OperationKind::from(*def).directive_location(),
        }
    }

    pub fn directives(&self) -> &'ast [ast::operation::Directive] {
        match self {
            Self::Field(field) => &field.directives,
            Self::FragmentDefinition(frag) => &frag.directives,
            Self::FragmentSpread(spread) => &spread.directives,
            Self::InlineFragment(frag) => &frag.directives,
            Self::Operation(def) => match def {
                ast::operation::OperationDefinition::Mutation(op) => &op.directives,
                ast::operation::OperationDefinition::Query(op) => &op.directives,
                ast::operation::OperationDefinition::SelectionSet(_) => &[],
                ast::operation::OperationDefinition::Subscription(op) => &op.directives,
            },
        }
    }

    pub fn name(&self) -> Option<&'ast str> {
        match self {
            Self::Field(field) => Some(field.name.as_str()),
            Self::FragmentDefinition(frag) => Some(frag.name.as_str()),
            Self::FragmentSpread(spread) => Some(spread.fragment_name.as_str()),
            Self::InlineFragment(_) => None,
            Self::Operation(def) => match def {
                ast::operation::OperationDefinition::Mutation(op) => op.name.as_deref(),
                ast::operation::OperationDefinition::Query(op) => op.name.as_deref(),
                ast::operation::OperationDefinition::SelectionSet(_) => None,
                ast::operation::OperationDefinition::Subscription(op) => op.name.as_deref(),
            },
        }
    }

    /// Reads the attribute called `part_name`. Attributes this kind of node
    /// does not have are `None`.
    pub fn part(&self, part_name: &str) -> Option<NodePart<'ast>> {
        Some(match part_name {
            "alias" => NodePart::Alias(match self {
                Self::Field(field) => field.alias.as_deref(),
                _ => None,
            }),
            "arguments" => NodePart::Arguments(match self {
                Self::Field(field) => field.arguments.as_slice(),
                _ => &[],
            }),
            "directives" => NodePart::Directives(self.directives()),
            "name" => NodePart::Name(self.name()),
            "selection" => NodePart::Selection(self.selection_set()),
            "type" => NodePart::Type(self.type_condition()),
            "variables" => NodePart::Variables(match self {
                Self::Operation(ast::operation::OperationDefinition::Mutation(op)) =>
                    op.variable_definitions.as_slice(),
                Self::Operation(ast::operation::OperationDefinition::Query(op)) =>
                    op.variable_definitions.as_slice(),
                Self::Operation(ast::operation::OperationDefinition::Subscription(op)) =>
                    op.variable_definitions.as_slice(),
                _ => &[],
            }),
            _ => return None,
        })
    }

    pub fn position(&self) -> ast::AstPos {
        match self {
            Self::Field(field) => field.position,
            Self::FragmentDefinition(frag) => frag.position,
            Self::FragmentSpread(spread) => spread.position,
            Self::InlineFragment(frag) => frag.position,
            Self::Operation(def) => match def {
                ast::operation::OperationDefinition::Mutation(op) => op.position,
                ast::operation::OperationDefinition::Query(op) => op.position,
                ast::operation::OperationDefinition::SelectionSet(set) => set.span.0,
                ast::operation::OperationDefinition::Subscription(op) => op.position,
            },
        }
    }

    pub fn selection_set(&self) -> Option<&'ast ast::operation::SelectionSet> {
        match self {
            Self::Field(field) => Some(&field.selection_set),
            Self::FragmentDefinition(frag) => Some(&frag.selection_set),
            Self::FragmentSpread(_) => None,
            Self::InlineFragment(frag) => Some(&frag.selection_set),
            Self::Operation(def) => Some(match def {
                ast::operation::OperationDefinition::Mutation(op) => &op.selection_set,
                ast::operation::OperationDefinition::Query(op) => &op.selection_set,
                ast::operation::OperationDefinition::SelectionSet(set) => set,
                ast::operation::OperationDefinition::Subscription(op) => &op.selection_set,
            }),
        }
    }

    /// The type condition of a fragment, if any.
    pub fn type_condition(&self) -> Option<&'ast str> {
        let type_condition = match self {
            Self::FragmentDefinition(frag) => Some(&frag.type_condition),
            Self::InlineFragment(frag) => frag.type_condition.as_ref(),
            _ => None,
        }?;
        let ast::operation::TypeCondition::On(type_name) = type_condition;
        Some(type_name.as_str())
    }
}
