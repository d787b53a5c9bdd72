use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_execution::directives::DirectiveDefinitionError;
use libgraphql_execution::directives::DirectiveLocation;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckLocationsCmd {
    #[arg(
        help="Candidate directive location names (e.g. `field`, \
             `FRAGMENT_SPREAD`, `inlineFragment`).",
        name="NAMES",
        required=true,
    )]
    names: Vec<String>,
}

#[inherent::inherent]
impl RunnableCommand for CheckLocationsCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        log::debug!("Checking {} location names...", self.names.len());
        match DirectiveLocation::parse_all(&self.names) {
            Ok(locations) => CommandResult::stdout(format_args!(
                "{} All {} location names are valid:\n{}",
                output_utils::GREEN_CHECK,
                locations.len(),
                self.names.iter()
                    .zip(locations.iter())
                    .map(|(name, location)| format!("  * `{name}` -> {location}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )),

            Err(DirectiveDefinitionError::InvalidLocations { names }) =>
                CommandResult::stderr(format_args!(
                    "{} {} invalid location names:\n{}",
                    output_utils::RED_X,
                    names.len(),
                    names.iter()
                        .map(|name| format!("  * `{name}`"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                )),

            Err(e) => CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        }
    }
}
