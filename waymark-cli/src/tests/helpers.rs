//! Test helpers for running CLI invocations against a scratch workspace.

use super::*;
use camino::Utf8PathBuf;
use tempfile::TempDir;
use waymark_core::test_support::sample_waypoints;

/// Temporary directory holding the waypoints and progress files of a test.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn state_file(&self) -> Utf8PathBuf {
        self.path("progress.json")
    }

    /// Writes the shared Tbilisi sample route and returns its path.
    pub(super) fn write_sample_waypoints(&self) -> Utf8PathBuf {
        let path = self.path("waypoints.json");
        let payload =
            serde_json::to_string_pretty(&sample_waypoints()).expect("serialize waypoints");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8PathBuf, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Parses `argv` and runs it, capturing everything written to stdout.
pub(super) fn run_cli<I, S>(argv: I) -> (Result<(), CliError>, String)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = std::iter::once("waymark".to_owned())
        .chain(argv.into_iter().map(Into::into))
        .collect();
    let mut stdout = Vec::new();
    let outcome = Cli::try_parse_from(argv)
        .map_err(CliError::from)
        .and_then(|cli| run_with(cli, &mut stdout));
    let printed = String::from_utf8(stdout).expect("stdout utf-8");
    (outcome, printed)
}

/// Parses printed JSON output.
pub(super) fn parse_output(printed: &str) -> serde_json::Value {
    serde_json::from_str(printed).expect("output should be JSON")
}

/// Ids of the `waypoints` array in printed `optimize` output.
pub(super) fn printed_ids(output: &serde_json::Value) -> Vec<i64> {
    output
        .get("waypoints")
        .and_then(serde_json::Value::as_array)
        .expect("waypoints array")
        .iter()
        .map(|waypoint| {
            waypoint
                .get("id")
                .and_then(serde_json::Value::as_i64)
                .expect("waypoint id")
        })
        .collect()
}
