use glam::Vec2;

use super::fill_disc;
use crate::color::Color;
use crate::surface::RenderSurface;

/// The stationary turret in the middle of the viewport
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Player {
    pub fn new(position: Vec2, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        fill_disc(surface, self.position, self.radius, self.color);
    }
}
