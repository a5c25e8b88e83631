//! Directions command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{DirectionsPlan, JsonProgressStore, ProgressStore};

use crate::itinerary::TripConfig;
use crate::{
    ARG_STATE_FILE, ARG_TERMINAL, ARG_WAYPOINTS, CliError, load_waypoints, parse_coordinate,
    write_json,
};

pub(crate) const ARG_CURRENT: &str = "current";
pub(crate) const ENV_DIRECTIONS_WAYPOINTS: &str = "WAYMARK_CMDS_DIRECTIONS_WAYPOINTS";

/// CLI arguments for the `directions` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the origin, destination and intermediate stops for the \
                 waypoints not yet completed, ready to hand to a maps \
                 application.",
    about = "Plan directions through the unvisited waypoints"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct DirectionsArgs {
    /// Path to a JSON list of waypoints in visiting order.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) waypoints: Option<Utf8PathBuf>,
    /// Current location as `lat,lon`, used once every waypoint is visited.
    #[arg(long = ARG_CURRENT, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) current: Option<String>,
    /// Progress state file.
    #[arg(long = ARG_STATE_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) state_file: Option<Utf8PathBuf>,
    /// Exit terminal as `lat,lon`.
    #[arg(long = ARG_TERMINAL, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) terminal: Option<String>,
}

pub(crate) fn run_directions_with(
    args: DirectionsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let waypoints_path = merged.waypoints.ok_or(CliError::MissingArgument {
        field: ARG_WAYPOINTS,
        env: ENV_DIRECTIONS_WAYPOINTS,
    })?;
    let current = merged
        .current
        .as_deref()
        .map(|text| parse_coordinate(text, ARG_CURRENT))
        .transpose()?;
    let config = TripConfig::resolve(
        waypoints_path,
        merged.state_file,
        merged.terminal.as_deref(),
        None,
    )?;

    let waypoints = load_waypoints(&config.waypoints)?;
    let progress = JsonProgressStore::new(config.state_file).load()?;
    let plan = DirectionsPlan::for_remaining(&waypoints, &progress, current, &config.itinerary);
    write_json(writer, &plan)
}
