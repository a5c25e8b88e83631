//! Distance command implementation for the Waymark CLI.

use std::io::Write;

use clap::Parser;
use serde::Serialize;
use waymark_core::{Coordinate, distance_km, road_estimate_km};

use crate::{CliError, parse_coordinate, write_json};

const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";

/// CLI arguments for the `distance` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Print the great-circle distance between two `lat,lon` \
                 coordinates. An endpoint at 0,0 is treated as unknown and \
                 yields 0. With --road the distance is scaled by the winding \
                 factor used for itinerary legs.",
    about = "Measure the distance between two coordinates"
)]
pub(crate) struct DistanceArgs {
    /// First coordinate as `lat,lon`.
    #[arg(value_name = "lat,lon", allow_hyphen_values = true)]
    pub(crate) from: String,
    /// Second coordinate as `lat,lon`.
    #[arg(value_name = "lat,lon", allow_hyphen_values = true)]
    pub(crate) to: String,
    /// Estimate the road distance instead of the direct one.
    #[arg(long)]
    pub(crate) road: bool,
}

/// JSON printed by `waymark distance`.
#[derive(Debug, Serialize)]
struct DistanceReport {
    from: Coordinate,
    to: Coordinate,
    road: bool,
    distance_km: f64,
}

pub(crate) fn run_distance_with(args: &DistanceArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let from = parse_coordinate(&args.from, ARG_FROM)?;
    let to = parse_coordinate(&args.to, ARG_TO)?;
    let distance = if args.road {
        road_estimate_km(from, to)
    } else {
        distance_km(from, to)
    };
    write_json(
        writer,
        &DistanceReport {
            from,
            to,
            road: args.road,
            distance_km: distance,
        },
    )
}
