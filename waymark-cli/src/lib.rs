//! Command-line interface for the Waymark itinerary engine.
//!
//! Every engine operation is exposed as a subcommand that reads waypoints
//! from JSON files, keeps trip progress in a JSON state file, and prints its
//! result as JSON. Options layer through `ortho_config` under the `WAYMARK`
//! prefix: CLI flags win over environment variables, which win over
//! configuration files.
#![forbid(unsafe_code)]

use std::io::{BufReader, Write};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;
use waymark_core::{Coordinate, Waypoint};

mod action;
mod directions;
mod distance;
mod error;
mod itinerary;
mod optimize;
mod progress;

pub use error::CliError;

use action::ActionArgs;
use directions::DirectionsArgs;
use distance::DistanceArgs;
use itinerary::ItineraryArgs;
use optimize::OptimizeArgs;
use progress::ProgressArgs;

pub(crate) const ARG_WAYPOINTS: &str = "waypoints";
pub(crate) const ARG_STATE_FILE: &str = "state-file";
pub(crate) const ARG_TERMINAL: &str = "terminal";
pub(crate) const ARG_DEFAULT_ORIGIN: &str = "default-origin";

/// State file used when none is configured.
pub const DEFAULT_STATE_FILE: &str = "waymark-progress.json";

/// Run the Waymark CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli, &mut stdout)
}

fn run_with(cli: Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    match cli.command {
        Command::Optimize(args) => optimize::run_optimize_with(args, writer),
        Command::Distance(args) => distance::run_distance_with(&args, writer),
        Command::Progress(args) => progress::run_progress_with(args, writer),
        Command::Action(args) => action::run_action_with(args, writer),
        Command::Itinerary(args) => itinerary::run_itinerary_with(args, writer),
        Command::Directions(args) => directions::run_directions_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Sequence itineraries and track trip progress",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order waypoints with the nearest-neighbour heuristic.
    Optimize(OptimizeArgs),
    /// Measure the distance between two coordinates.
    Distance(DistanceArgs),
    /// Apply one progress event to the state file.
    Progress(ProgressArgs),
    /// Resolve the action offered for a waypoint.
    Action(ActionArgs),
    /// Lay out the stored trip as an itinerary.
    Itinerary(ItineraryArgs),
    /// Plan directions through the unvisited waypoints.
    Directions(DirectionsArgs),
}

/// Parse an optional `lat,lon` option, falling back to `default`.
pub(crate) fn coordinate_or(
    text: Option<&str>,
    field: &'static str,
    default: Coordinate,
) -> Result<Coordinate, CliError> {
    text.map_or(Ok(default), |value| parse_coordinate(value, field))
}

pub(crate) fn parse_coordinate(text: &str, field: &'static str) -> Result<Coordinate, CliError> {
    text.parse()
        .map_err(|source| CliError::InvalidCoordinate { field, source })
}

/// Loads a JSON list of [`Waypoint`]s from disk.
pub(crate) fn load_waypoints(path: &Utf8Path) -> Result<Vec<Waypoint>, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenWaypoints {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    let waypoints: Vec<Waypoint> =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseWaypoints {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("loaded {} waypoints from {path}", waypoints.len());
    Ok(waypoints)
}

pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
