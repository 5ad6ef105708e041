//! Plan command implementation for the courier CLI.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use courier_data::{load_deliveries, load_street_map};
use courier_solver::{AStarRouter, AnnealingOptimizer, DeliveryPlan, DeliveryPlanner, RouterConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_PLAN_DELIVERIES, ARG_PLAN_FORMAT, ARG_PLAN_MAP, ARG_PLAN_MAX_EXPANSIONS, ARG_PLAN_SEED,
    CliError, ENV_PLAN_DELIVERIES, ENV_PLAN_MAP,
};

/// Seed used for stop ordering when none is configured.
pub(crate) const DEFAULT_SEED: u64 = 0;

/// How the plan is written to standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// One instruction per line followed by the total distance.
    #[default]
    Text,
    /// The serialized plan as pretty-printed JSON.
    Json,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a street map and a delivery manifest, order the stops \
                 to shorten the tour, route every leg over the street graph \
                 and print turn-by-turn directions. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Plan a delivery tour"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PlanArgs {
    /// Path to the delivery manifest (depot line, then `lat lon:item` lines).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) deliveries: Option<Utf8PathBuf>,
    /// Path to the street map file.
    #[arg(long = ARG_PLAN_MAP, value_name = "path")]
    #[serde(default)]
    pub(crate) map: Option<Utf8PathBuf>,
    /// Seed for the stop-order optimiser.
    #[arg(long = ARG_PLAN_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Give up on a leg after this many node expansions.
    #[arg(long = ARG_PLAN_MAX_EXPANSIONS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_expansions: Option<usize>,
    /// Output format.
    #[arg(long = ARG_PLAN_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) deliveries: Utf8PathBuf,
    pub(crate) map: Utf8PathBuf,
    pub(crate) seed: u64,
    pub(crate) max_expansions: Option<usize>,
    pub(crate) format: OutputFormat,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.deliveries, ARG_PLAN_DELIVERIES)?;
        Self::require_existing(&self.map, ARG_PLAN_MAP)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match courier_data::is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    const fn router_config(&self) -> RouterConfig {
        RouterConfig {
            max_expansions: self.max_expansions,
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let deliveries = args.deliveries.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_DELIVERIES,
            env: ENV_PLAN_DELIVERIES,
        })?;
        let map = args.map.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_MAP,
            env: ENV_PLAN_MAP,
        })?;
        Ok(Self {
            deliveries,
            map,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            max_expansions: args.max_expansions,
            format: args.format.unwrap_or_default(),
        })
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config)?;
    write_plan(writer, &plan, config.format)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(config: &PlanConfig) -> Result<DeliveryPlan, CliError> {
    let map = load_street_map(&config.map)?;
    let manifest = load_deliveries(&config.deliveries)?;
    let planner = DeliveryPlanner::new(
        AStarRouter::with_config(&map, config.router_config()),
        AnnealingOptimizer::new(config.seed),
    );
    Ok(planner.plan(&manifest.depot, &manifest.deliveries)?)
}

pub(super) fn write_plan(
    writer: &mut dyn Write,
    plan: &DeliveryPlan,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for command in &plan.commands {
                writeln!(writer, "{command}").map_err(CliError::WriteOutput)?;
            }
            writeln!(
                writer,
                "Total distance: {:.2} miles",
                plan.total_distance_miles
            )
            .map_err(CliError::WriteOutput)?;
        }
        OutputFormat::Json => {
            let payload =
                serde_json::to_string_pretty(plan).map_err(CliError::SerializePlan)?;
            writer
                .write_all(payload.as_bytes())
                .map_err(CliError::WriteOutput)?;
            writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
