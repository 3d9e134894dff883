//! Keyframe importer
//!
//! One-shot companion to the recording server: reads a persisted frame list
//! and writes it into a stage project's keyframe timeline. The recommended
//! workflow is to point `--stage` at the project the server exported, so the
//! frame list's object names match the stage's objects.
//!
//! Poses with no matching object are skipped with a warning; any other
//! failure aborts the import without writing the project file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command};

use stage_engine::recording::{replay_frames, KeyframeStore};
use stage_engine::stage::Stage;

fn main() -> Result<()> {
    let matches = Command::new("keyframe_importer")
        .about("Imports a recorded frame list into a stage project's timeline")
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_name("FILE")
                .help("Frame list recorded by the server (*.ron)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("stage")
                .long("stage")
                .value_name("FILE")
                .help("Stage project to key, typically the server's exported *.stage file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("FILE")
                .help("Where to write the keyed project; defaults to overwriting --stage")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    stage_engine::foundation::logging::init();

    let frames_path = matches
        .get_one::<PathBuf>("frames")
        .cloned()
        .context("missing --frames")?;
    let stage_path = matches
        .get_one::<PathBuf>("stage")
        .cloned()
        .context("missing --stage")?;
    let output_path = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| stage_path.clone());

    let frames = KeyframeStore::load(&frames_path)
        .with_context(|| format!("failed to read frame list '{}'", frames_path.display()))?;
    let mut stage = Stage::load(&stage_path)
        .with_context(|| format!("failed to load stage project '{}'", stage_path.display()))?;

    let stats = replay_frames(&mut stage, &frames);

    stage
        .save(&output_path)
        .with_context(|| format!("failed to save keyed project '{}'", output_path.display()))?;

    log::info!(
        "imported {} frames into '{}': {} poses keyed, {} unmatched",
        stats.frames,
        output_path.display(),
        stats.applied,
        stats.unmatched
    );
    Ok(())
}
