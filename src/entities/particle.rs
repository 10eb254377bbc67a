use glam::Vec2;
use rand::Rng;

use super::fill_disc;
use crate::color::Color;
use crate::surface::{RenderSurface, with_global_alpha};

/// Alpha lost per frame
pub const FADE_STEP: f32 = 0.01;
/// Frames from fully opaque to invisible
const FADE_STEPS: u8 = 100;
/// Particle radius is sampled from `[0, MAX_PARTICLE_RADIUS)`
const MAX_PARTICLE_RADIUS: f32 = 2.0;
/// Upper bound on a burst particle's speed along each axis
const BURST_SPREAD: f32 = 6.0;

/// A fading spark thrown off by a hit
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub velocity: Vec2,
    /// Velocity multiplier applied each frame
    pub friction: f32,
    /// Remaining fade steps; alpha is this times [`FADE_STEP`]
    fade: u8,
}

impl Particle {
    pub fn new(position: Vec2, radius: f32, color: Color, velocity: Vec2, friction: f32) -> Self {
        Self {
            position,
            radius,
            color,
            velocity,
            friction,
            fade: FADE_STEPS,
        }
    }

    pub fn alpha(&self) -> f32 {
        f32::from(self.fade) * FADE_STEP
    }

    /// Remaining frames before the particle is fully transparent
    pub fn fade_steps(&self) -> u8 {
        self.fade
    }

    pub fn is_faded(&self) -> bool {
        self.fade == 0
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        with_global_alpha(surface, self.alpha(), |s| {
            fill_disc(s, self.position, self.radius, self.color);
        });
    }

    /// Move, fade one step and slow down by the friction factor
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.fade = self.fade.saturating_sub(1);
        self.velocity *= self.friction;
    }

    /// Sparks draw where they are before moving, so the first frame shows the hit point
    pub fn update(&mut self, surface: &mut dyn RenderSurface) {
        self.draw(surface);
        self.advance();
    }
}

/// Number of sparks thrown off by hitting an enemy of `enemy_radius`
pub fn burst_size(enemy_radius: f32) -> usize {
    (enemy_radius * 2.0).round().max(0.0) as usize
}

/// Creates the spark burst for a projectile hitting an enemy.
///
/// Each axis gets `(rand - 0.5) * rand * 6`, which clusters sparks near the
/// impact point rather than spreading them uniformly.
pub fn create_hit_burst<R: Rng + ?Sized>(
    rng: &mut R,
    at: Vec2,
    enemy_radius: f32,
    color: Color,
    friction: f32,
) -> Vec<Particle> {
    (0..burst_size(enemy_radius))
        .map(|_| {
            let radius = rng.random::<f32>() * MAX_PARTICLE_RADIUS;
            let velocity = Vec2::new(
                (rng.random::<f32>() - 0.5) * rng.random::<f32>() * BURST_SPREAD,
                (rng.random::<f32>() - 0.5) * rng.random::<f32>() * BURST_SPREAD,
            );
            Particle::new(at, radius, color, velocity, friction)
        })
        .collect()
}
