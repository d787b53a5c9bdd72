mod check_locations;
mod components;
mod decode_id;
mod locations;

use crate::Cli;
use crate::CommandResult;
use check_locations::CheckLocationsCmd;
use components::ComponentsCmd;
use decode_id::DecodeIdCmd;
use locations::LocationsCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-execution")]
pub(crate) enum CommandEnum {
    /// Validate directive location names against the location taxonomy.
    CheckLocations(CheckLocationsCmd),

    /// Print the components an executable GraphQL document resolves into.
    Components(ComponentsCmd),

    /// Decode an opaque directive id.
    DecodeId(DecodeIdCmd),

    /// List the directive locations.
    Locations(LocationsCmd),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::CheckLocations(cmd) => cmd.run(cli).await,
            Self::Components(cmd) => cmd.run(cli).await,
            Self::DecodeId(cmd) => cmd.run(cli).await,
            Self::Locations(cmd) => cmd.run(cli).await,
        }
    }
}
