//! Runtime tuning loaded from `nova-defense.toml`.
//!
//! Every field has a compiled-in default, so the file only needs the values
//! you want to change. A missing file means "all defaults"; a file that fails
//! to parse or holds nonsensical values is a startup error.

use color_eyre::eyre::{Result, WrapErr, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no override is given
pub const DEFAULT_CONFIG_FILE: &str = "nova-defense.toml";
/// Environment variable that points at an alternative config file
pub const CONFIG_ENV_VAR: &str = "NOVA_DEFENSE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Clocks ──────────────────────────────────────────────────────────────
    /// Wall-clock time between enemy spawns
    pub spawn_interval_ms: u64,
    /// Target time between simulation frames
    pub frame_interval_ms: u64,

    // ── Player & projectiles ────────────────────────────────────────────────
    pub player_radius: f32,
    pub projectile_radius: f32,
    pub projectile_speed: f32,

    // ── Enemies ─────────────────────────────────────────────────────────────
    pub enemy_speed: f32,
    /// Spawn radius is sampled from `[enemy_radius_min, enemy_radius_max)`
    pub enemy_radius_min: f32,
    pub enemy_radius_max: f32,
    /// Radius lost per hit
    pub shrink_step: f32,
    /// A hit that would leave the radius at or below this destroys the enemy instead
    pub min_enemy_radius: f32,
    pub shrink_duration_ms: u64,
    pub shrink_points: u32,
    pub kill_points: u32,

    // ── Effects ─────────────────────────────────────────────────────────────
    pub particle_friction: f32,
    /// Opacity of the black wash drawn over the previous frame
    pub trail_alpha: f32,

    // ── Display ─────────────────────────────────────────────────────────────
    /// World units per framebuffer pixel
    pub world_scale: f32,

    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub hit_sound: PathBuf,
    pub explosion_sound: PathBuf,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1300,
            frame_interval_ms: 16,
            player_radius: 20.0,
            projectile_radius: 5.0,
            projectile_speed: 5.0,
            enemy_speed: 1.0,
            enemy_radius_min: 4.0,
            enemy_radius_max: 30.0,
            shrink_step: 10.0,
            min_enemy_radius: 5.0,
            shrink_duration_ms: 500,
            shrink_points: 100,
            kill_points: 250,
            particle_friction: 0.97,
            trail_alpha: 0.1,
            world_scale: 4.0,
            audio: AudioConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            hit_sound: PathBuf::from("assets/sounds/hit.wav"),
            explosion_sound: PathBuf::from("assets/sounds/explosion.wav"),
            volume: 0.3,
        }
    }
}

impl GameConfig {
    /// Load from `$NOVA_DEFENSE_CONFIG`, falling back to `nova-defense.toml`
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from `path`, using defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml(&text)
            .wrap_err_with(|| format!("invalid config in {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.spawn_interval_ms > 0, "spawn_interval_ms must be positive");
        ensure!(self.frame_interval_ms > 0, "frame_interval_ms must be positive");
        ensure!(self.player_radius > 0.0, "player_radius must be positive");
        ensure!(self.projectile_radius > 0.0, "projectile_radius must be positive");
        // Stationary projectiles or enemies would never be culled
        ensure!(self.projectile_speed > 0.0, "projectile_speed must be positive");
        ensure!(self.enemy_speed > 0.0, "enemy_speed must be positive");
        ensure!(
            self.enemy_radius_min > 0.0 && self.enemy_radius_min < self.enemy_radius_max,
            "enemy radius range [{}, {}) is empty or not positive",
            self.enemy_radius_min,
            self.enemy_radius_max
        );
        ensure!(self.shrink_step > 0.0, "shrink_step must be positive");
        ensure!(self.min_enemy_radius > 0.0, "min_enemy_radius must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.particle_friction),
            "particle_friction must be within 0.0 - 1.0"
        );
        ensure!(
            (0.0..=1.0).contains(&self.trail_alpha),
            "trail_alpha must be within 0.0 - 1.0"
        );
        ensure!(self.world_scale > 0.0, "world_scale must be positive");
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn shrink_duration(&self) -> Duration {
        Duration::from_millis(self.shrink_duration_ms)
    }
}
