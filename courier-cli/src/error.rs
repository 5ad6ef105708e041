//! Error types emitted by the courier CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_data::{DeliveryLoadError, MapLoadError};
use courier_solver::PlanError;
use thiserror::Error;

/// Errors emitted by the courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The street map could not be loaded.
    #[error("failed to load street map: {0}")]
    LoadMap(#[from] MapLoadError),
    /// The delivery manifest could not be loaded.
    #[error("failed to load deliveries: {0}")]
    LoadDeliveries(#[from] DeliveryLoadError),
    /// Planning the tour failed.
    #[error("failed to plan deliveries: {0}")]
    Plan(#[from] PlanError),
    /// Serializing the plan failed.
    #[error("failed to serialize delivery plan: {0}")]
    SerializePlan(#[source] serde_json::Error),
    /// Writing the plan failed.
    #[error("failed to write plan output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
