//! Countdown demo: a headless host driving the ECS registry.
//!
//! One entity carries a counter that a shared [`CountDown`] system decrements
//! and prints (registered as both updater and drawer). A few sprites bounce
//! around a character grid and a chaser follows the first of them, looking up
//! its target's position through the cross-entity component map.
//!
//! Each frame the registry is updated, drawn onto a [`TextSurface`], and the
//! surface is logged.

mod components;
mod surface;
mod systems;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use ecs_component::Component;
use ecs_registry::{FrameConfig, FrameLoop, Registry, RegistryConfig};
use glam::Vec2;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use components::{Chase, Counter, Glyph, Position, Velocity};
use surface::TextSurface;
use systems::{CountDown, Movement, Pursuit, SpriteDrawer};

/// Z-index of the sprite layer.
const SPRITE_LAYER: i32 = 10;

/// Z-index of the counter caption, drawn over the sprites.
const CAPTION_LAYER: i32 = 254;

#[derive(Parser)]
#[command(name = "countdown", about = "Headless ECS registry demo")]
struct Args {
    /// Number of frames to run (0 = until interrupted)
    #[arg(short, long, default_value_t = 10)]
    frames: u64,

    /// Frames per second (0 = as fast as possible)
    #[arg(short, long, default_value_t = 10.0)]
    rate: f64,

    /// Initial counter value
    #[arg(short, long, default_value_t = 1_000_000)]
    start: i64,

    /// JSON file with `registry` and `frames` sections; overrides the flags
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    registry: RegistryConfig,
    frames: Option<FrameConfig>,
}

fn load_config(path: &Path) -> Result<DemoConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "countdown=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DemoConfig::default(),
    };
    let frames = config.frames.unwrap_or(FrameConfig {
        frame_rate: args.rate,
        max_frames: args.frames,
    });

    let mut surface = TextSurface::new(24, 8);
    let bounds = Vec2::new(23.0, 7.0);
    let mut registry = Registry::<TextSurface>::with_config(&config.registry);

    // Counter entity, handled by one system registered for both phases.
    let counter = registry.spawn();
    registry.register_entity(counter, [Component::new(Counter { value: args.start })]);
    let countdown = Rc::new(RefCell::new(CountDown::new(registry.next_system_id())));
    registry.register_updater(Rc::clone(&countdown), &[counter]);
    registry.register_drawer(countdown, CAPTION_LAYER, &[]);

    // Bouncing sprites.
    let sprites = [
        ('@', Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)),
        ('#', Vec2::new(12.0, 6.0), Vec2::new(-2.0, 1.0)),
        ('*', Vec2::new(20.0, 2.0), Vec2::new(1.0, -1.0)),
    ];
    let sprite_ids: Vec<_> = sprites
        .iter()
        .map(|&(glyph, position, velocity)| {
            let e = registry.spawn();
            registry.register_entity(
                e,
                [
                    Component::new(Glyph(glyph)),
                    Component::new(Position(position)),
                    Component::new(Velocity(velocity)),
                ],
            );
            e
        })
        .collect();

    let chaser = registry.spawn();
    registry.register_entity(
        chaser,
        [
            Component::new(Glyph('o')),
            Component::new(Position(Vec2::ZERO)),
            Component::new(Chase {
                target: sprite_ids[0],
                speed: 0.75,
            }),
        ],
    );

    let movement = Movement::new(registry.next_system_id(), bounds);
    registry.register_updater(movement, &sprite_ids);
    let pursuit = Pursuit::new(registry.next_system_id());
    registry.register_updater(pursuit, &[chaser]);

    let mut drawn = sprite_ids.clone();
    drawn.push(chaser);
    let sprite_drawer = SpriteDrawer::new(registry.next_system_id());
    registry.register_drawer(sprite_drawer, SPRITE_LAYER, &drawn);

    info!(
        entities = registry.entity_count(),
        updaters = registry.updater_ids().len(),
        layers = registry.drawer_layers().len(),
        "world ready"
    );

    let mut frame_loop = FrameLoop::new(registry, frames);
    frame_loop.run(&mut surface, |frame, surface| {
        for line in surface.lines() {
            info!(frame, "{line}");
        }
        surface.clear();
    })?;

    info!(frames = frame_loop.frame_id(), "countdown demo finished");
    Ok(())
}
