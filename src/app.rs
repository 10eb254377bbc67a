use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::animator::{Animator, GameEvent};
use crate::audio::AudioManager;
use crate::canvas::PixelCanvas;
use crate::config::GameConfig;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The main application which wires the simulation to the terminal, mouse and speakers.
pub struct App {
    running: bool,
    animator: Animator,
    /// Framebuffer of the current session; replaced on every start
    canvas: PixelCanvas,
    /// HUD score, fed by score events
    score: u32,
    final_score: Option<u32>,
    /// Terminal dimensions in cells
    screen_width: u16,
    screen_height: u16,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// Session timers
    session_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`] in the idle phase.
    pub fn new(config: GameConfig, screen_width: u16, screen_height: u16) -> Self {
        let now = Instant::now();
        let audio_manager = AudioManager::new(&config.audio);
        if !audio_manager.is_enabled() {
            log::info!("Audio disabled");
        }

        Self {
            running: true,
            canvas: PixelCanvas::new(screen_width, screen_height, config.world_scale),
            animator: Animator::new(config),
            score: 0,
            final_score: None,
            screen_width,
            screen_height,
            last_frame_time: now,
            fps: 0,
            session_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Track terminal size; it only takes effect at the next session start
            let area = terminal.size()?;
            self.screen_width = area.width;
            self.screen_height = area.height;

            terminal.draw(|frame| {
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.session_start_time.elapsed().as_secs());
                let (enemies, particles) = self
                    .animator
                    .state()
                    .map_or((0, 0), |s| (s.enemies.len(), s.particles.len()));
                let view = RenderView {
                    phase: self.animator.phase(),
                    canvas: &self.canvas,
                    score: self.score,
                    final_score: self.final_score,
                    enemies,
                    particles,
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.animator.phase())?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);

            let now = Instant::now();
            if self
                .animator
                .frame(now, &mut self.canvas, &mut self.audio_manager)
            {
                let frame_time = now.duration_since(self.last_frame_time);
                self.last_frame_time = now;
                if frame_time.as_micros() > 0 {
                    self.fps = (1_000_000 / frame_time.as_micros()) as u32;
                }
            }
            self.apply_events();

            // Small sleep to prevent CPU spinning; the frame clock does the pacing
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    /// Process input actions and update the session accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.animator.stop();
                    self.running = false;
                }
                InputAction::Start => {
                    self.start_session();
                }
                InputAction::Restart => {
                    if self.animator.restart() {
                        self.start_session();
                    }
                }
                InputAction::Fire { column, row } => {
                    let target = self.canvas.world_from_cell(*column, *row);
                    self.animator.fire(target, &mut self.audio_manager);
                }
            }
        }
    }

    fn start_session(&mut self) {
        let now = Instant::now();
        // Fresh, black framebuffer sized to the terminal as it is right now
        self.canvas = PixelCanvas::new(
            self.screen_width,
            self.screen_height,
            self.animator.config().world_scale,
        );
        if self.animator.start(now, &self.canvas) {
            self.final_score = None;
            self.final_time_secs = None;
            self.session_start_time = now;
            self.last_frame_time = now;
        }
    }

    /// Push score and game-over notifications into the HUD
    fn apply_events(&mut self) {
        for event in self.animator.take_events() {
            match event {
                GameEvent::ScoreChanged(score) => self.score = score,
                GameEvent::GameOver { final_score } => {
                    self.final_score = Some(final_score);
                    self.final_time_secs = Some(self.session_start_time.elapsed().as_secs());
                }
            }
        }
    }
}
