use glam::Vec2;

use super::fill_disc;
use crate::color::Color;
use crate::surface::RenderSurface;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub velocity: Vec2,
}

impl Projectile {
    pub fn new(position: Vec2, radius: f32, color: Color, velocity: Vec2) -> Self {
        Self {
            position,
            radius,
            color,
            velocity,
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        fill_disc(surface, self.position, self.radius, self.color);
    }

    /// Move one frame along the velocity
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    pub fn update(&mut self, surface: &mut dyn RenderSurface) {
        self.advance();
        self.draw(surface);
    }

    /// True once the whole projectile has left the viewport on any side
    pub fn is_off_screen(&self, width: f32, height: f32) -> bool {
        self.position.x + self.radius < 0.0
            || self.position.y + self.radius < 0.0
            || self.position.x - self.radius > width
            || self.position.y - self.radius > height
    }
}
