use crate::ast;
use crate::component::AstNode;
use crate::component::NodePart;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// A read-only view over the attributes of an [`AstNode`] that a component
/// kind declares it needs. Attributes outside that set are not visible.
#[derive(Clone, Debug)]
pub struct ComponentData<'ast> {
    parts: IndexMap<&'static str, NodePart<'ast>>,
}
impl<'ast> ComponentData<'ast> {
    pub(crate) fn slice(node: &AstNode<'ast>, part_names: &IndexSet<&'static str>) -> Self {
        Self {
            parts: part_names.iter()
                .filter_map(|name| Some((*name, node.part(name)?)))
                .collect(),
        }
    }

    pub fn contains(&self, part_name: &str) -> bool {
        self.parts.contains_key(part_name)
    }

    pub fn get(&self, part_name: &str) -> Option<&NodePart<'ast>> {
        self.parts.get(part_name)
    }

    pub fn part_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts.keys().copied()
    }

    pub fn alias(&self) -> Option<&'ast str> {
        match self.get("alias")? {
            NodePart::Alias(alias) => *alias,
            _ => None,
        }
    }

    pub fn arguments(&self) -> Option<&'ast [(String, ast::Value)]> {
        match self.get("arguments")? {
            NodePart::Arguments(arguments) => Some(*arguments),
            _ => None,
        }
    }

    pub fn directives(&self) -> Option<&'ast [ast::operation::Directive]> {
        match self.get("directives")? {
            NodePart::Directives(directives) => Some(*directives),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&'ast str> {
        match self.get("name")? {
            NodePart::Name(name) => *name,
            _ => None,
        }
    }

    pub fn selection_set(&self) -> Option<&'ast ast::operation::SelectionSet> {
        match self.get("selection")? {
            NodePart::Selection(selection_set) => *selection_set,
            _ => None,
        }
    }

    pub fn type_condition(&self) -> Option<&'ast str> {
        match self.get("type")? {
            NodePart::Type(type_name) => *type_name,
            _ => None,
        }
    }

    pub fn variables(&self) -> Option<&'ast [ast::operation::VariableDefinition]> {
        match self.get("variables")? {
            NodePart::Variables(variables) => Some(*variables),
            _ => None,
        }
    }
}
