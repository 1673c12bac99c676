//! Headless escape room runner.
//!
//! Builds the world from the INI config and the scene definitions, then runs
//! fixed-step frames while an [`Autopilot`] plays the game: walk out of the
//! forest, solve the button puzzle, throw the crystal at the exit door and
//! leave. A host with a window would replace the autopilot with device input
//! and draw from [`Camera3D`](escaperoom::resources::camera::Camera3D).
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and merge an optional scene file
//! 2. Build the world and register observers and state hooks
//! 3. Run frames until the autopilot finishes, the quit flag is raised or
//!    the frame limit is hit
//! 4. Enter `Quitting`, which logs a session summary
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --fumbles 2
//! ```

use clap::Parser;
use escaperoom::game::{BUTTON_OBJECTS, build_update_schedule, builtin_scenes, init_world, run_frame};
use escaperoom::resources::autopilot::Autopilot;
use escaperoom::resources::gameconfig::GameConfig;
use escaperoom::resources::gamestate::{GameStates, NextGameState};
use escaperoom::resources::scenestore::SceneStore;
use escaperoom::resources::worldsignals::{FLAG_QUIT_GAME, WorldSignals};
use log::{error, info, warn};
use std::path::PathBuf;

/// Escape room gameplay, played by a scripted autopilot.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Gameplay settings (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON scene file; scenes are added to the built-in ones, replacing
    /// those with the same name.
    #[arg(long, value_name = "PATH")]
    scene_file: Option<PathBuf>,

    /// Scene loaded first (overrides the config).
    #[arg(long)]
    start_scene: Option<String>,

    /// Frame limit (overrides the config).
    #[arg(long)]
    frames: Option<u64>,

    /// Seconds per frame (overrides the config).
    #[arg(long)]
    dt: Option<f32>,

    /// Seed for the autopilot's wrong presses.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Wrong button sequences to try before the right one.
    #[arg(long, default_value_t = 0)]
    fumbles: u32,

    /// Write the effective configuration and exit.
    /// Optionally provide a path (default: the --config path).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,

    /// Write all scenes as JSON and exit.
    /// Optionally provide a path (default: stdout).
    #[arg(long, value_name = "PATH")]
    dump_scenes: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // Early-exit: write the config and quit
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    let mut scenes = SceneStore::from_scenes(builtin_scenes());
    if let Some(path) = &cli.scene_file {
        if let Err(e) = scenes.merge_file(path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    // Early-exit: dump scenes and quit
    if let Some(maybe_path) = cli.dump_scenes {
        let json = match scenes.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        match maybe_path {
            Some(path) => {
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("Error writing {}: {e}", path.display());
                    std::process::exit(1);
                }
                println!("Scenes written to {}", path.display());
            }
            None => println!("{json}"),
        }
        return;
    }

    if let Some(scene) = cli.start_scene {
        config.session.start_scene = scene;
    }
    if let Some(frames) = cli.frames {
        config.session.max_frames = frames;
    }
    if let Some(dt) = cli.dt {
        config.session.fixed_dt = dt;
    }
    if !scenes.contains(&config.session.start_scene) {
        eprintln!(
            "Error: unknown start scene '{}' (known: {})",
            config.session.start_scene,
            scenes.names().join(", ")
        );
        std::process::exit(1);
    }

    let max_frames = config.session.max_frames;
    let dt = config.session.fixed_dt;
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let pilot = Autopilot::playthrough(&BUTTON_OBJECTS, cli.fumbles, &mut rng);

    let mut world = init_world(config, scenes);
    world.insert_resource(pilot);
    let mut update = build_update_schedule();

    info!("Running up to {} frames at {:.4}s", max_frames, dt);
    let mut frame: u64 = 0;
    while frame < max_frames {
        run_frame(&mut world, &mut update, dt);
        frame += 1;
        if world.resource::<WorldSignals>().has_flag(FLAG_QUIT_GAME) {
            break;
        }
        if world.resource::<Autopilot>().is_finished() {
            break;
        }
    }
    info!("Stopped after {} frames", frame);

    world.resource_mut::<NextGameState>().set(GameStates::Quitting);
    run_frame(&mut world, &mut update, dt);

    let pilot = world.resource::<Autopilot>();
    if let Some(reason) = pilot.failure() {
        error!("Autopilot failed: {}", reason);
        std::process::exit(1);
    }
    if !pilot.is_finished() {
        warn!("Frame limit reached with {} step(s) left", pilot.remaining());
    }
}
