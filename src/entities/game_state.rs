use glam::Vec2;

use super::{Enemy, Particle, Player, Projectile};
use crate::color::Color;
use crate::config::GameConfig;

/// Everything that belongs to one play session
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub running: bool,
}

impl GameState {
    /// Fresh session with the player at `center` and nothing else on screen
    pub fn new(center: Vec2, config: &GameConfig) -> Self {
        Self {
            player: Player::new(center, config.player_radius, Color::WHITE),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            running: true,
        }
    }

    /// Add points. Ignored once the session has ended so the final score stays put.
    pub fn award(&mut self, points: u32) {
        if self.running {
            self.score = self.score.saturating_add(points);
        }
    }
}
