use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_execution::directives::DirectiveLocation;
use libgraphql_execution::directives::LocationCategory;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CategoryArg {
    Definition,
    Execution,
}

#[derive(Debug, clap::Args)]
pub(crate) struct LocationsCmd {
    #[arg(
        help="Only list the locations of one half of the taxonomy.",
        long,
        value_enum,
    )]
    category: Option<CategoryArg>,
}

#[inherent::inherent]
impl RunnableCommand for LocationsCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let locations = match self.category {
            None => DirectiveLocation::all(),
            Some(CategoryArg::Definition) => DirectiveLocation::definition_locations(),
            Some(CategoryArg::Execution) => DirectiveLocation::execution_locations(),
        };
        log::debug!("Listing {} directive locations.", locations.len());

        CommandResult::stdout(format_args!(
            "{}",
            locations.iter()
                .map(|location| format!(
                    "{location} ({})",
                    match location.category() {
                        LocationCategory::Definition => "definition",
                        LocationCategory::Execution => "execution",
                    },
                ))
                .collect::<Vec<_>>()
                .join("\n"),
        ))
    }
}
