use glam::Vec2;
use rand::Rng;
use std::time::Instant;

use crate::color::Color;
use crate::config::GameConfig;
use crate::entities::Enemy;
use crate::geometry::velocity_towards;
use crate::schedule::RepeatingTimer;

/// Drops a new enemy onto the edge of the viewport every spawn interval
#[derive(Debug, Clone)]
pub struct Spawner {
    timer: RepeatingTimer,
}

impl Spawner {
    pub fn start(now: Instant, config: &GameConfig) -> Self {
        Self {
            timer: RepeatingTimer::start(now, config.spawn_interval()),
        }
    }

    /// Append one enemy per interval elapsed since the last poll. Returns how many were added.
    pub fn spawn_due<R: Rng + ?Sized>(
        &mut self,
        now: Instant,
        rng: &mut R,
        viewport: Vec2,
        config: &GameConfig,
        enemies: &mut Vec<Enemy>,
    ) -> usize {
        let due = self.timer.poll(now) as usize;
        for _ in 0..due {
            let enemy = spawn_enemy(rng, viewport, config);
            log::debug!(
                "Spawned enemy r={:.1} at ({:.0}, {:.0})",
                enemy.radius,
                enemy.position.x,
                enemy.position.y
            );
            enemies.push(enemy);
        }
        due
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }
}

/// Build an enemy just outside a random edge, heading for the center of `viewport`
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, viewport: Vec2, config: &GameConfig) -> Enemy {
    let radius = rng.random_range(config.enemy_radius_min..config.enemy_radius_max);

    let position = if rng.random_bool(0.5) {
        // Left or right edge
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            viewport.x + radius
        };
        Vec2::new(x, rng.random::<f32>() * viewport.y)
    } else {
        // Top or bottom edge
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            viewport.y + radius
        };
        Vec2::new(rng.random::<f32>() * viewport.x, y)
    };

    let color = Color::from_hsl(rng.random::<f32>() * 360.0, 0.5, 0.5);
    let velocity = velocity_towards(position, viewport / 2.0, config.enemy_speed);

    Enemy::new(position, radius, color, velocity)
}
