use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_execution::ast;
use libgraphql_execution::component::AstNode;
use libgraphql_execution::component::Component;
use libgraphql_execution::component::ComponentStack;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ComponentsCmd {
    #[arg(
        help="Path to a GraphQL file containing operations and/or fragments.",
        name="FILE_PATH",
    )]
    file_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for ComponentsCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let file_path = self.file_path.as_path();
        let src = match std::fs::read_to_string(file_path) {
            Ok(src) => src,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Failed to read {file_path:#?}: {e}",
                output_utils::RED_X,
            )),
        };

        let doc = match ast::operation::parse(&src) {
            Ok(doc) => doc,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Failed to parse {file_path:#?}: {e}",
                output_utils::RED_X,
            )),
        };

        let stack = ComponentStack::new();
        let mut lines = vec![];
        for def in &doc.definitions {
            let node = match def {
                ast::operation::Definition::Operation(op) => AstNode::Operation(op),
                ast::operation::Definition::Fragment(frag) => AstNode::FragmentDefinition(frag),
            };
            describe_component(node, &stack, &mut lines);
        }
        log::debug!(
            "Built {} components from {} definitions in {file_path:#?}.",
            lines.len(),
            doc.definitions.len(),
        );

        CommandResult::stdout(format_args!(
            "{} {} components:\n{}",
            output_utils::GREEN_CHECK,
            lines.len(),
            lines.join("\n"),
        ))
    }
}

fn describe_component(node: AstNode<'_>, stack: &ComponentStack, lines: &mut Vec<String>) {
    let component = Component::new(node);
    let directives: Vec<String> = node.directives().iter()
        .map(|directive| format!(" @{}", directive.name))
        .collect();

    stack.stacked(&component, || {
        let indent = "  ".repeat(stack.depth());
        let name = component.name()
            .map(|name| format!(" `{name}`"))
            .unwrap_or_default();
        let path = stack.to_path().iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        let parts = component.data_parts()
            .into_iter()
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "{indent}* {}{name} (path: `{path}`, data: [{parts}]){}",
            component.kind(),
            directives.concat(),
        ));

        let Some(selection_set) = node.selection_set() else {
            return;
        };
        for selection in &selection_set.items {
            let child = match selection {
                ast::operation::Selection::Field(field) => AstNode::Field(field),
                ast::operation::Selection::FragmentSpread(spread) =>
                    AstNode::FragmentSpread(spread),
                ast::operation::Selection::InlineFragment(frag) =>
                    AstNode::InlineFragment(frag),
            };
            describe_component(child, stack, lines);
        }
    });
}
