//! The session state machine and per-frame simulation loop.
//!
//! `Idle -> Running` on [`Animator::start`], `Running -> GameOver` when an
//! enemy reaches the player, `GameOver -> Idle` on [`Animator::restart`].
//! While running, the animator owns two scheduling handles: the frame clock
//! and the spawner's timer. [`Animator::stop`] cancels both.

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Instant;

use crate::audio::{SoundEffect, SoundSink};
use crate::collision::{cull_faded_particles, cull_off_screen_projectiles, resolve_collisions};
use crate::color::Color;
use crate::config::GameConfig;
use crate::entities::{GameState, Projectile};
use crate::geometry::velocity_towards;
use crate::schedule::FrameClock;
use crate::spawner::Spawner;
use crate::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// Notifications for the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The score changed (also sent with 0 when a session starts)
    ScoreChanged(u32),
    GameOver { final_score: u32 },
}

pub struct Animator<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    phase: Phase,
    /// Present while running, and kept frozen after game over
    state: Option<GameState>,
    viewport: Vec2,
    frame_clock: Option<FrameClock>,
    spawner: Option<Spawner>,
    events: Vec<GameEvent>,
}

impl Animator<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> Animator<R> {
    /// Use a caller-provided RNG, e.g. a seeded one for reproducible runs
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            phase: Phase::Idle,
            state: None,
            viewport: Vec2::ZERO,
            frame_clock: None,
            spawner: None,
            events: Vec::new(),
        }
    }

    /// Begin a fresh session sized to `surface`. Only valid from `Idle`.
    pub fn start(&mut self, now: Instant, surface: &dyn RenderSurface) -> bool {
        if self.phase != Phase::Idle {
            log::warn!("Ignoring start while {:?}", self.phase);
            return false;
        }

        self.viewport = Vec2::new(surface.width(), surface.height());
        self.state = Some(GameState::new(surface.center(), &self.config));
        self.spawner = Some(Spawner::start(now, &self.config));
        self.frame_clock = Some(FrameClock::start(now, self.config.frame_interval()));
        self.phase = Phase::Running;
        self.events.push(GameEvent::ScoreChanged(0));

        log::info!(
            "Session started on a {:.0}x{:.0} viewport",
            self.viewport.x,
            self.viewport.y
        );
        true
    }

    /// Run one simulation frame if the frame clock says one is due.
    /// Returns whether a frame ran.
    pub fn frame(
        &mut self,
        now: Instant,
        surface: &mut dyn RenderSurface,
        sound: &mut dyn SoundSink,
    ) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(clock) = self.frame_clock.as_mut() else {
            return false;
        };
        if !clock.tick(now) {
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        let viewport = self.viewport;

        // Wash over the last frame instead of clearing it, leaving motion trails
        surface.fill_rect(Vec2::ZERO, viewport, Color::BLACK, self.config.trail_alpha);
        state.player.draw(surface);

        for particle in state.particles.iter_mut().filter(|p| !p.is_faded()) {
            particle.update(surface);
        }
        cull_faded_particles(state);

        for projectile in &mut state.projectiles {
            projectile.update(surface);
        }
        cull_off_screen_projectiles(state, viewport.x, viewport.y);

        if let Some(spawner) = self.spawner.as_mut() {
            spawner.spawn_due(
                now,
                &mut self.rng,
                viewport,
                &self.config,
                &mut state.enemies,
            );
        }

        for enemy in &mut state.enemies {
            enemy.update(now, surface);
        }

        let report = resolve_collisions(
            state,
            now,
            &mut self.rng,
            &self.config,
            sound,
            &mut self.events,
        );

        if report.player_hit {
            self.game_over();
        }
        true
    }

    /// Shoot from the center towards `target` (viewport coordinates). Only while running.
    pub fn fire(&mut self, target: Vec2, sound: &mut dyn SoundSink) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        let origin = state.player.position;
        let velocity = velocity_towards(origin, target, self.config.projectile_speed);
        state.projectiles.push(Projectile::new(
            origin,
            self.config.projectile_radius,
            Color::WHITE,
            velocity,
        ));
        sound.play(SoundEffect::Hit);
        log::trace!("Fired at ({:.0}, {:.0})", target.x, target.y);
        true
    }

    /// Cancel the frame clock and the spawn timer. Nothing is simulated or spawned afterwards.
    pub fn stop(&mut self) {
        if let Some(clock) = self.frame_clock.as_mut() {
            clock.cancel();
        }
        if let Some(spawner) = self.spawner.as_mut() {
            spawner.cancel();
        }
    }

    /// Drop the finished session and go back to `Idle`. Only valid from `GameOver`.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            log::warn!("Ignoring restart while {:?}", self.phase);
            return false;
        }
        self.stop();
        self.state = None;
        self.frame_clock = None;
        self.spawner = None;
        self.phase = Phase::Idle;
        log::info!("Session reset");
        true
    }

    fn game_over(&mut self) {
        self.stop();
        let final_score = match self.state.as_mut() {
            Some(state) => {
                state.running = false;
                state.score
            }
            None => 0,
        };
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("Game over, final score {final_score}");
    }

    /// Drain the notifications produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.score)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_frame_clock_active(&self) -> bool {
        self.frame_clock.as_ref().is_some_and(FrameClock::is_active)
    }

    pub fn is_spawner_active(&self) -> bool {
        self.spawner.as_ref().is_some_and(Spawner::is_active)
    }
}
