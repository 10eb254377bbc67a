use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::animator::Phase;
use crate::canvas::PixelCanvas;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub phase: Phase,
    pub canvas: &'a PixelCanvas,
    pub score: u32,
    pub final_score: Option<u32>,
    pub enemies: usize,
    pub particles: usize,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            Phase::Idle => self.render_title(frame, view),
            Phase::Running => self.render_game(frame, view),
            Phase::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the playfield and the stats header
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        frame.render_widget(view.canvas, area);

        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let stats_left = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(format!("{}", view.score), value(Color::Yellow)),
            Span::styled("  Enemies: ", label),
            Span::styled(format!("{}", view.enemies), value(Color::Cyan)),
            Span::styled("  Sparks: ", label),
            Span::styled(format!("{}", view.particles), value(Color::Magenta)),
            Span::styled("  FPS: ", label),
            Span::styled(format!("{}", view.fps), value(Color::White)),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats_left), stats_area);

        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer_text = Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(format!("{:02}:{:02}", minutes, seconds), value(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(timer_text).right_aligned(), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[Click: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the start screen
    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        let text = vec![
            Line::from(""),
            Line::from("NOVA DEFENSE").centered().bold().cyan(),
            Line::from(""),
            Line::from("Enemies close in from every edge.").centered().white(),
            Line::from("Click where you want to shoot.").centered().white(),
            Line::from(""),
            Line::from("Click or press Enter to start").centered().yellow().bold(),
            Line::from("Press Q to quit").centered().dark_gray(),
        ];
        self.render_dialog(frame, view.area, text, Color::Cyan, 44, 10);
    }

    /// Renders the frozen last frame with the final score on top
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let final_score = view.final_score.unwrap_or(view.score);

        let text = vec![
            Line::from(""),
            Line::from("GAME OVER").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", final_score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Time Survived: {:02}:{:02}", minutes, seconds))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];
        self.render_dialog(frame, view.area, text, Color::Red, 34, 10);
    }

    fn render_dialog(
        &self,
        frame: &mut Frame,
        area: Rect,
        text: Vec<Line>,
        border: Color,
        width: u16,
        height: u16,
    ) {
        let width = width.min(area.width);
        let height = height.min(area.height);
        let dialog_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                )
                .alignment(Alignment::Center),
            dialog_area,
        );
    }
}
