use glam::Vec2;
use std::time::{Duration, Instant};

use super::{Tween, fill_disc};
use crate::color::Color;
use crate::surface::RenderSurface;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub velocity: Vec2,
    /// Running shrink animation, if the enemy was hit recently
    pub shrink: Option<Tween>,
}

impl Enemy {
    pub fn new(position: Vec2, radius: f32, color: Color, velocity: Vec2) -> Self {
        Self {
            position,
            radius,
            color,
            velocity,
            shrink: None,
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        fill_disc(surface, self.position, self.radius, self.color);
    }

    /// Sample the shrink animation at `now` and move one frame along the velocity
    pub fn advance(&mut self, now: Instant) {
        if let Some(tween) = self.shrink {
            self.radius = tween.sample(now);
            if tween.is_finished(now) {
                self.shrink = None;
            }
        }
        self.position += self.velocity;
    }

    pub fn update(&mut self, now: Instant, surface: &mut dyn RenderSurface) {
        self.advance(now);
        self.draw(surface);
    }

    /// Animate the radius from its current value down to `target`.
    /// A second hit mid-animation restarts from wherever the radius is now.
    pub fn shrink_to(&mut self, target: f32, now: Instant, duration: Duration) {
        self.shrink = Some(Tween::new(self.radius, target, now, duration));
    }
}
