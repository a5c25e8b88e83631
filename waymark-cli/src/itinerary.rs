//! Itinerary command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{
    Coordinate, Itinerary, ItineraryConfig, JsonProgressStore, ProgressStore, Stage,
};

use crate::{
    ARG_DEFAULT_ORIGIN, ARG_STATE_FILE, ARG_TERMINAL, ARG_WAYPOINTS, CliError,
    DEFAULT_STATE_FILE, coordinate_or, load_waypoints, write_json,
};

pub(crate) const ENV_ITINERARY_WAYPOINTS: &str = "WAYMARK_CMDS_ITINERARY_WAYPOINTS";

/// CLI arguments for the `itinerary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Lay out the waypoints, in the given order, as a trip: \
                 arrival at the base, one stage per waypoint, and the \
                 extraction leg. Each stage carries its status from the \
                 stored progress and the estimated road distance from the \
                 stage before it.",
    about = "Lay out the stored trip as an itinerary"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct ItineraryArgs {
    /// Path to a JSON list of waypoints in visiting order.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) waypoints: Option<Utf8PathBuf>,
    /// Progress state file.
    #[arg(long = ARG_STATE_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) state_file: Option<Utf8PathBuf>,
    /// Exit terminal as `lat,lon`.
    #[arg(long = ARG_TERMINAL, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) terminal: Option<String>,
    /// Map centre used for an empty itinerary, as `lat,lon`.
    #[arg(long = ARG_DEFAULT_ORIGIN, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) default_origin: Option<String>,
}

impl ItineraryArgs {
    fn into_config(self) -> Result<TripConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TripConfig::try_from(merged)
    }
}

/// Inputs shared by the commands that read a stored trip.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TripConfig {
    pub(crate) waypoints: Utf8PathBuf,
    pub(crate) state_file: Utf8PathBuf,
    pub(crate) itinerary: ItineraryConfig,
}

impl TripConfig {
    pub(crate) fn resolve(
        waypoints: Utf8PathBuf,
        state_file: Option<Utf8PathBuf>,
        terminal: Option<&str>,
        default_origin: Option<&str>,
    ) -> Result<Self, CliError> {
        let defaults = ItineraryConfig::default();
        let itinerary = ItineraryConfig {
            terminal: coordinate_or(terminal, ARG_TERMINAL, defaults.terminal)?,
            default_origin: coordinate_or(
                default_origin,
                ARG_DEFAULT_ORIGIN,
                defaults.default_origin,
            )?,
        };
        Ok(Self {
            waypoints,
            state_file: state_file.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_FILE)),
            itinerary,
        })
    }
}

impl TryFrom<ItineraryArgs> for TripConfig {
    type Error = CliError;

    fn try_from(args: ItineraryArgs) -> Result<Self, Self::Error> {
        let waypoints = args.waypoints.ok_or(CliError::MissingArgument {
            field: ARG_WAYPOINTS,
            env: ENV_ITINERARY_WAYPOINTS,
        })?;
        Self::resolve(
            waypoints,
            args.state_file,
            args.terminal.as_deref(),
            args.default_origin.as_deref(),
        )
    }
}

/// JSON printed by `waymark itinerary`.
#[derive(Debug, Serialize)]
struct ItineraryReport<'a> {
    stages: &'a [Stage],
    total_km: f64,
    initial_map_center: Coordinate,
}

pub(crate) fn run_itinerary_with(args: ItineraryArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let waypoints = load_waypoints(&config.waypoints)?;
    let progress = JsonProgressStore::new(config.state_file).load()?;
    let itinerary = Itinerary::assemble(&waypoints, &progress, &config.itinerary);
    write_json(
        writer,
        &ItineraryReport {
            stages: itinerary.stages(),
            total_km: itinerary.total_km(),
            initial_map_center: itinerary.initial_map_center(),
        },
    )
}
