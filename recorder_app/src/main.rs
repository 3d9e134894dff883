//! Recording server binary
//!
//! Serves the render-client protocol locally and records every request's
//! object poses as animation keyframes instead of rendering. See `server`
//! for the endpoint behavior.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command};

use stage_engine::recording::store::DUMP_EXTENSION;
use stage_engine::recording::{KeyframeStore, RecordingSession, SessionConfig};
use stage_engine::stage::STAGE_EXTENSION;

mod server;

use server::ServerConfig;

fn main() -> Result<()> {
    let matches = Command::new("recording_server")
        .about("Records simulation render requests as stage animation keyframes")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("ADDR")
                .help("Address to host on")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Port to host on")
                .value_parser(clap::value_parser!(u16))
                .default_value("8000"),
        )
        .arg(
            Arg::new("stage-file")
                .long("stage-file")
                .value_name("FILE")
                .help("Path to a *.stage project loaded as the base scene before each import")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("settings-file")
                .long("settings-file")
                .value_name("FILE")
                .help(
                    "Path to a *.ron or *.toml stage-settings file applied after the base \
                     scene so that it has priority. Declarative values only; settings files \
                     cannot run code",
                )
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("export-path")
                .long("export-path")
                .value_name("PATH")
                .help("Path to export the stage project to after the first recorded frame")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("frame-dump-path")
                .long("frame-dump-path")
                .value_name("PATH")
                .help("Path to dump recorded keyframes to. Must be a *.ron file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    stage_engine::foundation::logging::init();

    let host = matches
        .get_one::<String>("host")
        .cloned()
        .context("missing --host")?;
    let port = *matches.get_one::<u16>("port").context("missing --port")?;
    let base_stage = matches.get_one::<PathBuf>("stage-file").cloned();
    let settings_file = matches.get_one::<PathBuf>("settings-file").cloned();
    let export_path = matches
        .get_one::<PathBuf>("export-path")
        .cloned()
        .context("missing --export-path")?;
    let dump_path = matches
        .get_one::<PathBuf>("frame-dump-path")
        .cloned()
        .context("missing --frame-dump-path")?;

    ensure_extension(&export_path, STAGE_EXTENSION, "--export-path")?;
    ensure_extension(&dump_path, DUMP_EXTENSION, "--frame-dump-path")?;

    // Fails on a pre-existing dump path, before any listener starts.
    let store = KeyframeStore::create(&dump_path)?;
    let session = RecordingSession::new(
        SessionConfig {
            base_stage,
            settings_file,
            export_path: Some(export_path),
        },
        store,
    );

    let scratch = tempfile::Builder::new()
        .prefix("pose_recorder_")
        .tempdir()
        .context("failed to create scratch directory for scene uploads")?;

    let config = ServerConfig { host, port };
    server::serve(&config, session, scratch.path().to_path_buf())
}

/// Reject a path whose extension does not match the format written to it
fn ensure_extension(path: &Path, extension: &str, flag: &str) -> Result<()> {
    if path.extension().and_then(OsStr::to_str) != Some(extension) {
        anyhow::bail!(
            "expected {flag} to have a '.{extension}' suffix, got '{}'",
            path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_check_accepts_matching_suffix() {
        assert!(ensure_extension(Path::new("out/base.stage"), "stage", "--export-path").is_ok());
        assert!(ensure_extension(Path::new("poses.ron"), "ron", "--frame-dump-path").is_ok());
    }

    #[test]
    fn test_extension_check_rejects_other_suffixes() {
        assert!(ensure_extension(Path::new("poses.pkl"), "ron", "--frame-dump-path").is_err());
        assert!(ensure_extension(Path::new("poses"), "ron", "--frame-dump-path").is_err());
    }
}
