//! Optimize command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{
    Coordinate, ItineraryConfig, JsonProgressStore, ProgressStore, Waypoint, path_length_km,
};
use waymark_sequencer::{optimize, optimize_from_base};

use crate::{
    ARG_DEFAULT_ORIGIN, ARG_STATE_FILE, ARG_WAYPOINTS, CliError, DEFAULT_STATE_FILE,
    coordinate_or, load_waypoints, parse_coordinate, write_json,
};

pub(crate) const ARG_START: &str = "start";
pub(crate) const ENV_OPTIMIZE_WAYPOINTS: &str = "WAYMARK_CMDS_OPTIMIZE_WAYPOINTS";

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order waypoints greedily, always visiting the nearest \
                 remaining one next. Without --start the sequence begins at \
                 the trip base recorded in the state file, or at the default \
                 origin when no base is set.",
    about = "Order waypoints with the nearest-neighbour heuristic"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON list of waypoints.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) waypoints: Option<Utf8PathBuf>,
    /// Start coordinate as `lat,lon`.
    #[arg(long = ARG_START, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Progress state file holding the trip base.
    #[arg(long = ARG_STATE_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) state_file: Option<Utf8PathBuf>,
    /// Start used when neither --start nor a base is available.
    #[arg(long = ARG_DEFAULT_ORIGIN, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) default_origin: Option<String>,
}

impl OptimizeArgs {
    fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Where the sequence begins.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StartPoint {
    /// A coordinate given on the command line.
    Explicit(Coordinate),
    /// The stored trip base, else `default_origin`.
    TripBase {
        state_file: Utf8PathBuf,
        default_origin: Coordinate,
    },
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizeConfig {
    pub(crate) waypoints: Utf8PathBuf,
    pub(crate) start: StartPoint,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let waypoints = args.waypoints.ok_or(CliError::MissingArgument {
            field: ARG_WAYPOINTS,
            env: ENV_OPTIMIZE_WAYPOINTS,
        })?;
        let start = match args.start {
            Some(text) => StartPoint::Explicit(parse_coordinate(&text, ARG_START)?),
            None => StartPoint::TripBase {
                state_file: args
                    .state_file
                    .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_FILE)),
                default_origin: coordinate_or(
                    args.default_origin.as_deref(),
                    ARG_DEFAULT_ORIGIN,
                    ItineraryConfig::default().default_origin,
                )?,
            },
        };
        Ok(Self { waypoints, start })
    }
}

/// JSON printed by `waymark optimize`.
#[derive(Debug, Serialize)]
struct OptimizeReport {
    start: Coordinate,
    path_length_km: f64,
    waypoints: Vec<Waypoint>,
}

pub(crate) fn run_optimize_with(args: OptimizeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let waypoints = load_waypoints(&config.waypoints)?;
    let (start, ordered) = match config.start {
        StartPoint::Explicit(start) => (start, optimize(start, &waypoints)),
        StartPoint::TripBase {
            state_file,
            default_origin,
        } => {
            let progress = JsonProgressStore::new(state_file).load()?;
            let start = progress.base_location().unwrap_or(default_origin);
            (
                start,
                optimize_from_base(&progress, &waypoints, default_origin),
            )
        }
    };
    let report = OptimizeReport {
        start,
        path_length_km: path_length_km(start, &ordered),
        waypoints: ordered,
    };
    write_json(writer, &report)
}
