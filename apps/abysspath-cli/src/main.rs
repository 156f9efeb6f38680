mod scenario;

use std::path::PathBuf;

use abysspath_overlay::{AbyssOverlay, OverlaySettings};
use abysspath_projection::{
    grid_to_world, minimap_delta, tilt_cos_sin, HostScene, CAMERA_TILT_RADIANS, GRID_TO_WORLD,
    MINIMAP_HEIGHT_REFERENCE,
};
use abysspath_render::RecordingPainter;
use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "abysspath-cli", about = "Abyss path overlay tooling")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and projection constants
    Info,
    /// Project one grid point onto the minimap
    Project {
        /// Player grid position
        #[arg(
            long,
            num_args = 2,
            value_names = ["X", "Y"],
            allow_negative_numbers = true,
            default_values_t = [0.0, 0.0]
        )]
        player: Vec<f32>,
        /// Target grid position
        #[arg(
            long,
            num_args = 2,
            value_names = ["X", "Y"],
            allow_negative_numbers = true,
            required = true
        )]
        point: Vec<f32>,
        /// Height of the target above the player, in world units
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        elevation: f32,
        /// Minimap pixels per grid unit
        #[arg(short, long, default_value = "1")]
        scale: f32,
    },
    /// Replay a recorded frame through the overlay and print what it draws
    Replay {
        /// Scenario file (.yaml, .yml or .json)
        scenario: PathBuf,
        /// Settings file overriding the scenario's settings
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let (cos, sin) = tilt_cos_sin();
            println!("abysspath-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("projection: {}", abysspath_projection::crate_info());
            println!("tracker: {}", abysspath_tracker::crate_info());
            println!("render: {}", abysspath_render::crate_info());
            println!("overlay: {}", abysspath_overlay::crate_info());
            println!(
                "camera tilt: {:.4} rad (cos={cos:.6}, sin={sin:.6})",
                CAMERA_TILT_RADIANS
            );
            println!("grid to world: {GRID_TO_WORLD:.6}");
            println!("minimap height reference: {MINIMAP_HEIGHT_REFERENCE}");
        }
        Commands::Project {
            player,
            point,
            elevation,
            scale,
        } => {
            let player = Vec2::new(player[0], player[1]);
            let point = Vec2::new(point[0], point[1]);
            let delta = minimap_delta(scale, point - player, elevation);
            let world = grid_to_world(point);
            println!(
                "grid=({:.2}, {:.2}) world=({:.2}, {:.2})",
                point.x, point.y, world.x, world.y
            );
            println!("minimap delta=({:.4}, {:.4})", delta.x, delta.y);
        }
        Commands::Replay { scenario, settings } => {
            let mut scenario = Scenario::load(&scenario)?;
            if let Some(path) = settings {
                scenario.settings = OverlaySettings::load(&path)
                    .with_context(|| format!("loading settings {}", path.display()))?;
            }

            let mut overlay = AbyssOverlay::new(scenario.settings.clone())?;
            let mut tracked = 0;
            for sighting in scenario.entities {
                if overlay.entity_added(sighting) {
                    tracked += 1;
                }
            }
            for id in &scenario.removed {
                overlay.entity_removed(*id);
            }
            tracing::info!(tracked, removed = scenario.removed.len(), "entities loaded");

            overlay.tick(&scenario.host);
            let scene = HostScene::new(scenario.terrain, scenario.camera);
            let mut painter = RecordingPainter::new();
            let stats = overlay.render(&scene, &mut painter);

            println!(
                "Draw order: {}",
                overlay
                    .draw_order()
                    .ids()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            for segment in painter.segments() {
                println!("  {segment}");
            }
            println!(
                "Pairs: {} skipped: {} (far={}, same={}, unresolved={}, terminal={})",
                stats.pairs,
                stats.skipped(),
                stats.skipped_too_far,
                stats.skipped_same_position,
                stats.skipped_unresolved,
                stats.skipped_terminal
            );
            println!(
                "Minimap: drawn={} offscreen={}  World: drawn={} out_of_range={}",
                stats.map_drawn, stats.map_offscreen, stats.world_drawn, stats.world_out_of_range
            );
        }
    }

    Ok(())
}
