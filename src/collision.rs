//! Per-frame collision detection, scoring and culling.
//!
//! Removals are never made while a collection is being scanned: the pairwise
//! pass only records which projectiles were spent and which enemies were
//! destroyed, and the collections are compacted once the scan is over.

use rand::Rng;
use std::time::Instant;

use crate::animator::GameEvent;
use crate::audio::{SoundEffect, SoundSink};
use crate::config::GameConfig;
use crate::entities::{GameState, create_hit_burst};
use crate::geometry::circles_touch;

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// An enemy reached the player; the session must end
    pub player_hit: bool,
    /// Enemies that survived a hit and started shrinking
    pub shrunk: u32,
    /// Enemies destroyed outright
    pub destroyed: u32,
    pub points: u32,
}

/// Test enemies against the player, then every enemy against every live projectile.
///
/// If any enemy touches the player nothing else is resolved, so the score
/// stays at its value from before the fatal frame.
pub fn resolve_collisions<R: Rng + ?Sized>(
    state: &mut GameState,
    now: Instant,
    rng: &mut R,
    config: &GameConfig,
    sound: &mut dyn SoundSink,
    events: &mut Vec<GameEvent>,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    let player = &state.player;
    if state
        .enemies
        .iter()
        .any(|e| circles_touch(e.position, e.radius, player.position, player.radius))
    {
        report.player_hit = true;
        return report;
    }

    let mut spent = vec![false; state.projectiles.len()];
    let mut destroyed = vec![false; state.enemies.len()];

    for (e_idx, enemy) in state.enemies.iter_mut().enumerate() {
        for (p_idx, projectile) in state.projectiles.iter().enumerate() {
            if spent[p_idx]
                || !circles_touch(
                    projectile.position,
                    projectile.radius,
                    enemy.position,
                    enemy.radius,
                )
            {
                continue;
            }
            spent[p_idx] = true;

            state.particles.extend(create_hit_burst(
                rng,
                projectile.position,
                enemy.radius,
                enemy.color,
                config.particle_friction,
            ));

            // Judged on the current, possibly mid-animation, radius
            let remaining = enemy.radius - config.shrink_step;
            let points = if remaining > config.min_enemy_radius {
                enemy.shrink_to(remaining, now, config.shrink_duration());
                report.shrunk += 1;
                config.shrink_points
            } else {
                destroyed[e_idx] = true;
                report.destroyed += 1;
                log::debug!("Enemy destroyed at ({:.0}, {:.0})", enemy.position.x, enemy.position.y);
                config.kill_points
            };

            report.points += points;
            events.push(GameEvent::ScoreChanged(
                state.score.saturating_add(report.points),
            ));
            sound.play(SoundEffect::Explosion);

            if destroyed[e_idx] {
                break;
            }
        }
    }

    state.award(report.points);

    let mut idx = 0;
    state.projectiles.retain(|_| {
        let keep = !spent[idx];
        idx += 1;
        keep
    });

    let mut idx = 0;
    state.enemies.retain(|_| {
        let keep = !destroyed[idx];
        idx += 1;
        keep
    });

    report
}

/// Drop projectiles that have completely left the viewport. Returns how many were removed.
pub fn cull_off_screen_projectiles(state: &mut GameState, width: f32, height: f32) -> usize {
    let before = state.projectiles.len();
    state
        .projectiles
        .retain(|p| !p.is_off_screen(width, height));
    before - state.projectiles.len()
}

/// Drop fully transparent particles. Returns how many were removed.
pub fn cull_faded_particles(state: &mut GameState) -> usize {
    let before = state.particles.len();
    state.particles.retain(|p| !p.is_faded());
    before - state.particles.len()
}
