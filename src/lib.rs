// Library exports for the binary and the integration tests
pub use animator::{Animator, GameEvent, Phase};
pub use app::App;
pub use audio::{AudioManager, SoundEffect, SoundSink};
pub use collision::{CollisionReport, resolve_collisions};
pub use color::Color;
pub use config::{AudioConfig, GameConfig};
pub use entities::{Enemy, GameState, Particle, Player, Projectile, Tween};
pub use surface::{DrawCommand, RecordingSurface, RenderSurface};

pub mod animator;
pub mod app;
pub mod audio;
pub mod canvas;
pub mod collision;
pub mod color;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod schedule;
pub mod spawner;
pub mod surface;
