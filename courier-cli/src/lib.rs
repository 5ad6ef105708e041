//! Command-line interface for planning courier delivery tours.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_DELIVERIES: &str = "deliveries";
pub(crate) const ARG_PLAN_MAP: &str = "map";
pub(crate) const ARG_PLAN_SEED: &str = "seed";
pub(crate) const ARG_PLAN_MAX_EXPANSIONS: &str = "max-expansions";
pub(crate) const ARG_PLAN_FORMAT: &str = "format";
pub(crate) const ENV_PLAN_DELIVERIES: &str = "COURIER_CMDS_PLAN_DELIVERIES";
pub(crate) const ENV_PLAN_MAP: &str = "COURIER_CMDS_PLAN_MAP";

/// Run the courier CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments are invalid, inputs cannot be
/// loaded, planning fails or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Plan multi-stop delivery tours over a street map",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order deliveries and print turn-by-turn directions.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
