//! Progress command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{JsonProgressStore, ProgressEvent, ProgressSession, Transition, TripProgress};

use crate::{ARG_STATE_FILE, CliError, DEFAULT_STATE_FILE, parse_coordinate, write_json};

pub(crate) const ARG_EVENT: &str = "event";
pub(crate) const ARG_INDEX: &str = "index";
pub(crate) const ARG_BASE: &str = "base";
pub(crate) const ARG_WAYPOINT_COUNT: &str = "waypoint-count";
pub(crate) const ENV_PROGRESS_EVENT: &str = "WAYMARK_CMDS_PROGRESS_EVENT";
pub(crate) const ENV_PROGRESS_INDEX: &str = "WAYMARK_CMDS_PROGRESS_INDEX";
pub(crate) const ENV_PROGRESS_BASE: &str = "WAYMARK_CMDS_PROGRESS_BASE";
pub(crate) const ENV_PROGRESS_WAYPOINT_COUNT: &str = "WAYMARK_CMDS_PROGRESS_WAYPOINT_COUNT";

/// Progress operations accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ProgressOp {
    /// Print the stored progress without changing it.
    Show,
    /// Record the base location unless one is set.
    SetBase,
    /// Replace the base location.
    ForceBase,
    /// Engage a waypoint.
    Engage,
    /// Complete the engaged waypoint.
    Complete,
    /// Complete the engaged waypoint and engage the next one.
    Advance,
    /// Switch between returning to base and exiting via the terminal.
    ToggleExtraction,
    /// Abort the trip.
    Reset,
}

/// CLI arguments for the `progress` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load trip progress from the state file, apply one event, \
                 and save it again when it changed. The resulting progress \
                 is printed as JSON together with the transition outcome.",
    about = "Apply one progress event to the state file"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct ProgressArgs {
    /// Operation to apply.
    #[arg(value_enum, value_name = "event")]
    #[serde(default)]
    pub(crate) event: Option<ProgressOp>,
    /// Waypoint index for engage, complete and advance.
    #[arg(long = ARG_INDEX, value_name = "n")]
    #[serde(default)]
    pub(crate) index: Option<usize>,
    /// Base coordinate as `lat,lon` for set-base and force-base.
    #[arg(long = ARG_BASE, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) base: Option<String>,
    /// Number of waypoints in the route, bounding advance.
    #[arg(long = ARG_WAYPOINT_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) waypoint_count: Option<usize>,
    /// Progress state file.
    #[arg(long = ARG_STATE_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) state_file: Option<Utf8PathBuf>,
}

impl ProgressArgs {
    fn into_config(self) -> Result<ProgressConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ProgressConfig::try_from(merged)
    }
}

/// What the command does with the stored progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ProgressRequest {
    Show,
    Apply(ProgressEvent),
}

/// Resolved `progress` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProgressConfig {
    pub(crate) state_file: Utf8PathBuf,
    pub(crate) request: ProgressRequest,
}

fn require<T>(value: Option<T>, field: &'static str, env: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

impl TryFrom<ProgressArgs> for ProgressConfig {
    type Error = CliError;

    fn try_from(args: ProgressArgs) -> Result<Self, Self::Error> {
        let op = require(args.event, ARG_EVENT, ENV_PROGRESS_EVENT)?;
        let index = || require(args.index, ARG_INDEX, ENV_PROGRESS_INDEX);
        let base = || {
            let text = require(args.base.as_deref(), ARG_BASE, ENV_PROGRESS_BASE)?;
            parse_coordinate(text, ARG_BASE)
        };
        let request = match op {
            ProgressOp::Show => ProgressRequest::Show,
            ProgressOp::SetBase => ProgressRequest::Apply(ProgressEvent::SetBase(base()?)),
            ProgressOp::ForceBase => ProgressRequest::Apply(ProgressEvent::ForceBase(base()?)),
            ProgressOp::Engage => ProgressRequest::Apply(ProgressEvent::Engage(index()?)),
            ProgressOp::Complete => ProgressRequest::Apply(ProgressEvent::Complete(index()?)),
            ProgressOp::Advance => ProgressRequest::Apply(ProgressEvent::CompleteAndAdvance {
                index: index()?,
                waypoint_count: require(
                    args.waypoint_count,
                    ARG_WAYPOINT_COUNT,
                    ENV_PROGRESS_WAYPOINT_COUNT,
                )?,
            }),
            ProgressOp::ToggleExtraction => ProgressRequest::Apply(ProgressEvent::ToggleExtraction),
            ProgressOp::Reset => ProgressRequest::Apply(ProgressEvent::Reset),
        };
        let state_file = args
            .state_file
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_FILE));
        Ok(Self {
            state_file,
            request,
        })
    }
}

/// JSON printed by `waymark progress`.
#[derive(Debug, Serialize)]
struct ProgressReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    transition: Option<Transition>,
    progress: TripProgress,
}

pub(crate) fn run_progress_with(args: ProgressArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut session = ProgressSession::new(JsonProgressStore::new(config.state_file));
    let report = match config.request {
        ProgressRequest::Show => ProgressReport {
            transition: None,
            progress: session.current()?,
        },
        ProgressRequest::Apply(event) => {
            let update = session.apply(event)?;
            ProgressReport {
                transition: Some(update.transition),
                progress: update.progress,
            }
        }
    };
    write_json(writer, &report)
}
