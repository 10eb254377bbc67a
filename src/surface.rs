//! Drawing target for the simulation.
//!
//! The simulation only ever emits filled circles and filled rectangles, plus a
//! global alpha that scales every fill while it is set. Hosts implement
//! [`RenderSurface`] for whatever they draw on; [`RecordingSurface`] keeps the
//! commands in memory for headless runs and tests.

use glam::Vec2;

use crate::color::Color;

pub trait RenderSurface {
    /// Viewport width in world units. Fixed for the lifetime of a session.
    fn width(&self) -> f32;

    /// Viewport height in world units. Fixed for the lifetime of a session.
    fn height(&self) -> f32;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill an axis-aligned rectangle, blended with `alpha` on top of the global alpha.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32);

    fn global_alpha(&self) -> f32;

    fn set_global_alpha(&mut self, alpha: f32);

    fn center(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }
}

/// Run `draw` with the global alpha set to `alpha`, restoring the previous value afterwards.
pub fn with_global_alpha<S, F>(surface: &mut S, alpha: f32, draw: F)
where
    S: RenderSurface + ?Sized,
    F: FnOnce(&mut S),
{
    let previous = surface.global_alpha();
    surface.set_global_alpha(alpha);
    draw(surface);
    surface.set_global_alpha(previous);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
    },
}

/// In-memory surface that records every fill with the alpha it was drawn at.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    global_alpha: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            global_alpha: 1.0,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded circles only, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha: self.global_alpha,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
            alpha: alpha * self.global_alpha,
        });
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }
}
