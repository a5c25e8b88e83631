//! Action command implementation for the Waymark CLI.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{Action, ActionResolver, TransportMode, WaypointStatus};

use crate::CliError;
use crate::write_json;

pub(crate) const ARG_STATUS: &str = "status";
pub(crate) const ARG_DISTANCE: &str = "distance";
pub(crate) const ARG_TRANSPORT: &str = "transport";
pub(crate) const ARG_RIDE_HAILING: &str = "ride-hailing";
pub(crate) const ENV_ACTION_STATUS: &str = "WAYMARK_CMDS_ACTION_STATUS";
pub(crate) const ENV_ACTION_DISTANCE: &str = "WAYMARK_CMDS_ACTION_DISTANCE";

/// CLI arguments for the `action` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve the single action offered for a waypoint from its \
                 status, its distance and the traveller's transport \
                 preference. The transport preference and ride-hailing \
                 availability are usually set once in configuration.",
    about = "Resolve the action offered for a waypoint"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct ActionArgs {
    /// Waypoint status: AVAILABLE, ENGAGED or NEUTRALIZED.
    #[arg(long = ARG_STATUS, value_name = "status")]
    #[serde(default)]
    pub(crate) status: Option<String>,
    /// Distance to the waypoint in kilometres.
    #[arg(long = ARG_DISTANCE, value_name = "km")]
    #[serde(default)]
    pub(crate) distance: Option<f64>,
    /// Transport preference, e.g. RENTAL_4X4 or PUBLIC_TRANSPORT.
    #[arg(long = ARG_TRANSPORT, value_name = "mode")]
    #[serde(default)]
    pub(crate) transport: Option<String>,
    /// Whether a ride-hailing service can be offered.
    #[arg(long = ARG_RIDE_HAILING, value_name = "bool")]
    #[serde(default)]
    pub(crate) ride_hailing: Option<bool>,
}

impl ActionArgs {
    fn into_config(self) -> Result<ActionConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ActionConfig::try_from(merged)
    }
}

/// Resolved `action` command configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ActionConfig {
    pub(crate) status: WaypointStatus,
    pub(crate) distance_km: f64,
    pub(crate) transport: TransportMode,
    pub(crate) ride_hailing: bool,
}

/// Parse a status name, ignoring case.
pub(crate) fn parse_status(text: &str) -> Result<WaypointStatus, CliError> {
    match text.trim().to_ascii_uppercase().as_str() {
        "AVAILABLE" => Ok(WaypointStatus::Available),
        "ENGAGED" => Ok(WaypointStatus::Engaged),
        "NEUTRALIZED" => Ok(WaypointStatus::Neutralized),
        _ => Err(CliError::InvalidStatus(text.to_owned())),
    }
}

impl TryFrom<ActionArgs> for ActionConfig {
    type Error = CliError;

    fn try_from(args: ActionArgs) -> Result<Self, Self::Error> {
        let status = args.status.ok_or(CliError::MissingArgument {
            field: ARG_STATUS,
            env: ENV_ACTION_STATUS,
        })?;
        let distance_km = args.distance.ok_or(CliError::MissingArgument {
            field: ARG_DISTANCE,
            env: ENV_ACTION_DISTANCE,
        })?;
        let transport = match args.transport {
            Some(text) => text.parse()?,
            None => TransportMode::default(),
        };
        Ok(Self {
            status: parse_status(&status)?,
            distance_km,
            transport,
            ride_hailing: args.ride_hailing.unwrap_or(true),
        })
    }
}

/// JSON printed by `waymark action`.
#[derive(Debug, Serialize)]
struct ActionReport {
    status: WaypointStatus,
    distance_km: f64,
    transport: TransportMode,
    #[serde(flatten)]
    action: Action,
}

pub(crate) fn run_action_with(args: ActionArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let action = ActionResolver::default()
        .with_ride_hailing(config.ride_hailing)
        .resolve(config.status, config.distance_km, config.transport);
    write_json(
        writer,
        &ActionReport {
            status: config.status,
            distance_km: config.distance_km,
            transport: config.transport,
            action,
        },
    )
}
