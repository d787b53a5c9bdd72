use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_execution::directives::DirectiveGlobalId;

#[derive(Debug, clap::Args)]
pub(crate) struct DecodeIdCmd {
    #[arg(
        help="An opaque directive id, as in \
             `gid://base/Directive/cache?args=eyJtYXhBZ2UiOjMwfQ`.",
        name="ID",
    )]
    id: String,
}

#[inherent::inherent]
impl RunnableCommand for DecodeIdCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let global_id = match DirectiveGlobalId::parse(self.id.trim()) {
            Ok(global_id) => global_id,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };

        let decoded = serde_json::json!({
            "namespace": global_id.namespace(),
            "directive": global_id.directive(),
            "args": global_id.args(),
        });
        match serde_json::to_string_pretty(&decoded) {
            Ok(json) => CommandResult::stdout(format_args!("{json}")),
            Err(e) => CommandResult::stderr(format_args!(
                "{} Failed to render the decoded id: {e}",
                output_utils::RED_X,
            )),
        }
    }
}
