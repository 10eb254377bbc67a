mod enemy;
mod game_state;
mod particle;
mod player;
mod projectile;
mod tween;

use glam::Vec2;

use crate::color::Color;
use crate::surface::RenderSurface;

// Re-export all public types
pub use enemy::Enemy;
pub use game_state::GameState;
pub use particle::{FADE_STEP, Particle, burst_size, create_hit_burst};
pub use player::Player;
pub use projectile::Projectile;
pub use tween::Tween;

/// Every entity is a filled disc. Degenerate radii draw nothing.
fn fill_disc(surface: &mut dyn RenderSurface, center: Vec2, radius: f32, color: Color) {
    if radius > 0.0 {
        surface.fill_circle(center, radius, color);
    }
}
