//! scene-editor CLI - headless scene editing
//!
//! Loads or creates a scene, runs a JSON batch of editor actions against it
//! and prints the responses.

use std::path::{Path, PathBuf};

use clap::Parser;
use scene_editor_lib::command::execute_json_batch;
use scene_editor_lib::state::EditorSettings;
use scene_editor_lib::EditorHarness;

#[derive(Parser, Debug)]
#[command(name = "scene-editor")]
#[command(about = "Headless 3D scene editor driven by JSON actions", long_about = None)]
struct Cli {
    /// Scene JSON file to open (default: a new scene from settings)
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// JSON array of actions to run against the scene
    #[arg(long, value_name = "PATH")]
    commands: Option<PathBuf>,

    /// Write the autosave file when done
    #[arg(long)]
    autosave: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_editor=info,scene_editor_lib=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut harness = EditorHarness::with_settings(EditorSettings::load());

    match &cli.scene {
        Some(path) => load_scene(&mut harness, path),
        None => harness.new_scene(None),
    }

    if let Some(path) = &cli.commands {
        run_commands(&mut harness, path);
    }

    if cli.autosave {
        match harness.autosave() {
            Ok(Some(path)) => tracing::info!("Autosaved to {}", path.display()),
            Ok(None) => tracing::info!("Autosave skipped (disabled or no changes)"),
            Err(e) => tracing::error!("Autosave failed: {e}"),
        }
    }
}

fn load_scene(harness: &mut EditorHarness, path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(json) => match harness.load_scene_json(&json) {
            Ok(()) => tracing::info!(
                "Loaded scene from {} ({} objects)",
                path.display(),
                harness.object_count()
            ),
            Err(e) => tracing::error!("Failed to parse scene JSON from {}: {e}", path.display()),
        },
        Err(e) => tracing::error!("Failed to read scene file {}: {e}", path.display()),
    }
}

fn run_commands(harness: &mut EditorHarness, path: &Path) {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read commands file {}: {e}", path.display());
            return;
        }
    };
    match execute_json_batch(harness, &json) {
        Ok(responses) => match serde_json::to_string_pretty(&responses) {
            Ok(out) => println!("{out}"),
            Err(e) => tracing::error!("Failed to serialize responses: {e}"),
        },
        Err(e) => tracing::error!("{e}"),
    }
}
