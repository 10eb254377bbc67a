/// Integration tests for game logic
///
/// These tests drive whole sessions through the animator with a recording
/// surface, a seeded RNG and a fake clock, and check gameplay outcomes.
use glam::Vec2;
use nova_defense::{
    Animator, Color, Enemy, GameConfig, GameEvent, Phase, RecordingSurface, SoundEffect,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

/// A running session where nothing spawns on its own
struct Session {
    animator: Animator<StdRng>,
    surface: RecordingSurface,
    sounds: Vec<SoundEffect>,
    start: Instant,
    frames: u32,
}

impl Session {
    fn new() -> Self {
        let config = GameConfig {
            spawn_interval_ms: 3_600_000,
            ..GameConfig::default()
        };
        let mut animator = Animator::with_rng(config, StdRng::seed_from_u64(42));
        let surface = RecordingSurface::new(800.0, 600.0);
        let start = Instant::now();
        assert!(animator.start(start, &surface));
        Self {
            animator,
            surface,
            sounds: Vec::new(),
            start,
            frames: 0,
        }
    }

    fn place_enemy(&mut self, position: Vec2, radius: f32, velocity: Vec2) {
        self.animator.state_mut().unwrap().enemies.push(Enemy::new(
            position,
            radius,
            Color::rgb(191, 64, 64),
            velocity,
        ));
    }

    fn fire(&mut self, target: Vec2) {
        assert!(self.animator.fire(target, &mut self.sounds));
    }

    /// Run the next frame on the frame clock's schedule
    fn step(&mut self) -> bool {
        let now = self.start + FRAME * self.frames;
        self.frames += 1;
        self.surface.clear();
        self.animator.frame(now, &mut self.surface, &mut self.sounds)
    }

    fn score_events(&mut self) -> Vec<u32> {
        self.animator
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::ScoreChanged(score) => Some(score),
                GameEvent::GameOver { .. } => None,
            })
            .collect()
    }
}

#[test]
fn test_missed_shot_leaves_screen_without_scoring() {
    let mut session = Session::new();
    session.fire(Vec2::new(800.0, 300.0));

    for _ in 0..100 {
        assert!(session.step());
    }

    let state = session.animator.state().unwrap();
    assert!(state.projectiles.is_empty());
    assert_eq!(state.score, 0);
    assert_eq!(session.animator.phase(), Phase::Running);
    assert_eq!(session.sounds, vec![SoundEffect::Hit]);
}

#[test]
fn test_enemy_reaches_player_after_expected_frames() {
    let mut session = Session::new();
    session.animator.state_mut().unwrap().score = 600;
    // 300 units from the center, closing at one unit per frame
    session.place_enemy(Vec2::new(700.0, 300.0), 30.0, Vec2::new(-1.0, 0.0));
    session.animator.take_events();

    for _ in 0..249 {
        assert!(session.step());
        assert_eq!(session.animator.phase(), Phase::Running);
    }
    assert!(session.step());

    assert_eq!(session.animator.phase(), Phase::GameOver);
    assert_eq!(
        session.animator.take_events(),
        vec![GameEvent::GameOver { final_score: 600 }]
    );
    assert!(!session.animator.is_frame_clock_active());
    assert!(!session.animator.is_spawner_active());
    assert!(!session.step());
}

#[test]
fn test_small_enemy_is_destroyed_by_one_hit() {
    let mut session = Session::new();
    session.place_enemy(Vec2::new(460.0, 300.0), 12.0, Vec2::ZERO);
    session.fire(Vec2::new(800.0, 300.0));
    session.animator.take_events();

    while session.animator.score() == 0 {
        assert!(session.frames < 50, "projectile never reached the enemy");
        session.step();
    }

    let state = session.animator.state().unwrap();
    assert_eq!(state.score, 250);
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
    assert_eq!(state.particles.len(), 24);
    assert_eq!(session.score_events(), vec![250]);
    assert_eq!(session.sounds, vec![SoundEffect::Hit, SoundEffect::Explosion]);
}

#[test]
fn test_large_enemy_shrinks_then_dies() {
    let mut session = Session::new();
    session.place_enemy(Vec2::new(480.0, 300.0), 20.0, Vec2::ZERO);
    session.fire(Vec2::new(800.0, 300.0));

    while session.animator.score() == 0 {
        assert!(session.frames < 50, "projectile never reached the enemy");
        session.step();
    }
    {
        let state = session.animator.state().unwrap();
        assert_eq!(state.score, 100);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].shrink.map(|t| t.to), Some(10.0));
    }

    // Let the shrink animation finish, then hit it again
    for _ in 0..40 {
        session.step();
    }
    assert_eq!(session.animator.state().unwrap().enemies[0].radius, 10.0);

    session.fire(Vec2::new(800.0, 300.0));
    while session.animator.score() == 100 {
        assert!(session.frames < 150, "second projectile never reached the enemy");
        session.step();
    }

    let state = session.animator.state().unwrap();
    assert_eq!(state.score, 350);
    assert!(state.enemies.is_empty());
    assert_eq!(session.score_events(), vec![0, 100, 350]);
}

#[test]
fn test_quick_second_hit_shrinks_from_animated_radius() {
    let mut session = Session::new();
    session.place_enemy(Vec2::new(480.0, 300.0), 24.0, Vec2::ZERO);
    session.fire(Vec2::new(800.0, 300.0));

    while session.animator.score() == 0 {
        assert!(session.frames < 50, "projectile never reached the enemy");
        session.step();
    }

    // Fire again right away; it lands while the enemy is still above 15
    session.fire(Vec2::new(800.0, 300.0));
    while session.animator.score() == 100 {
        assert!(session.frames < 80, "second projectile never reached the enemy");
        session.step();
    }

    let state = session.animator.state().unwrap();
    assert_eq!(state.score, 200);
    assert_eq!(state.enemies.len(), 1);
    let tween = state.enemies[0].shrink.expect("enemy should still be shrinking");
    assert!(tween.from > 15.0 && tween.from < 24.0);
    assert!((tween.to - (tween.from - 10.0)).abs() < 1e-4);
}

#[test]
fn test_hit_sparks_fade_out_and_are_removed() {
    let mut session = Session::new();
    session.place_enemy(Vec2::new(460.0, 300.0), 12.0, Vec2::ZERO);
    session.fire(Vec2::new(800.0, 300.0));

    while session.animator.score() == 0 {
        assert!(session.frames < 50, "projectile never reached the enemy");
        session.step();
    }
    assert_eq!(session.animator.state().unwrap().particles.len(), 24);

    for _ in 0..99 {
        session.step();
    }
    let state = session.animator.state().unwrap();
    assert_eq!(state.particles.len(), 24);
    assert!(state.particles.iter().all(|p| p.fade_steps() == 1));

    session.step();
    assert!(session.animator.state().unwrap().particles.is_empty());
}

#[test]
fn test_score_never_decreases() {
    let mut session = Session::new();
    for (i, radius) in [12.0, 20.0, 28.0, 6.0].into_iter().enumerate() {
        let y = 150.0 + 100.0 * i as f32;
        session.place_enemy(Vec2::new(600.0, y), radius, Vec2::ZERO);
    }

    for i in 0..200 {
        if i % 5 == 0 {
            let y = 150.0 + 100.0 * (i / 5 % 4) as f32;
            session.fire(Vec2::new(600.0, y));
        }
        session.step();
    }

    let scores = session.score_events();
    assert!(scores.len() > 1);
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        scores.last().copied(),
        Some(session.animator.score()),
        "the last event carries the current score"
    );
}

#[test]
fn test_stop_freezes_session() {
    let mut session = Session::new();
    session.place_enemy(Vec2::new(700.0, 300.0), 10.0, Vec2::new(-1.0, 0.0));
    assert!(session.step());

    session.animator.stop();
    assert!(!session.animator.is_frame_clock_active());
    assert!(!session.animator.is_spawner_active());

    for _ in 0..10 {
        assert!(!session.step());
    }
    assert_eq!(
        session.animator.state().unwrap().enemies[0].position,
        Vec2::new(699.0, 300.0)
    );
}

#[test]
fn test_spawned_enemies_head_for_the_player() {
    let config = GameConfig::default();
    let mut animator = Animator::with_rng(config, StdRng::seed_from_u64(7));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let mut sounds: Vec<SoundEffect> = Vec::new();
    let start = Instant::now();
    animator.start(start, &surface);

    // Long enough for four spawn periods
    for i in 0..=330 {
        animator.frame(start + FRAME * i, &mut surface, &mut sounds);
    }

    let state = animator.state().unwrap();
    assert_eq!(state.enemies.len(), 4);
    let center = Vec2::new(400.0, 300.0);
    for enemy in &state.enemies {
        assert!((4.0..30.0).contains(&enemy.radius));
        assert!((enemy.velocity.length() - 1.0).abs() < 1e-4);
        let to_center = (center - enemy.position).normalize();
        assert!(to_center.dot(enemy.velocity) > 0.99);
    }
}
