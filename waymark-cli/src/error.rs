//! Error types emitted by the Waymark CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waymark_core::{CoordinateError, ProgressStoreError, TransportModeParseError};

/// Errors emitted by the Waymark CLI.
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
    /// A coordinate option could not be parsed.
    #[error("invalid {field}: {source}")]
    InvalidCoordinate {
        field: &'static str,
        #[source]
        source: CoordinateError,
    },
    /// The transport preference is not a known mode.
    #[error(transparent)]
    InvalidTransport(#[from] TransportModeParseError),
    /// The waypoint status is not one of the known statuses.
    #[error("unknown waypoint status: {0}")]
    InvalidStatus(String),
    /// Opening the waypoints file failed.
    #[error("failed to open waypoints at {path:?}: {source}")]
    OpenWaypoints {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The waypoints file is not a JSON list of waypoints.
    #[error("failed to parse waypoints JSON at {path:?}: {source}")]
    ParseWaypoints {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Loading or saving trip progress failed.
    #[error(transparent)]
    Progress(#[from] ProgressStoreError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
