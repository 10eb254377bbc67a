use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::animator::Phase;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    /// Shoot towards a terminal cell
    Fire { column: u16, row: u16 },
    Restart,
    Quit,
}

/// Polls terminal input and translates raw key and mouse events into game actions
#[derive(Debug, Default)]
pub struct InputManager {
    actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per loop before `take_actions()`.
    pub fn poll_events(&mut self, phase: Phase) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(&event, phase);
        }
        Ok(())
    }

    /// Translate one terminal event. Actions that make no sense in `phase` are dropped here.
    pub fn handle_event(&mut self, event: &Event, phase: Phase) {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_press(key_event, phase);
            }
            Event::Mouse(mouse_event) => {
                self.handle_mouse(mouse_event, phase);
            }
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: &KeyEvent, phase: Phase) {
        // Quit keys work in any phase
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.actions.push(InputAction::Quit);
            return;
        }

        match phase {
            Phase::Idle => {
                if matches!(key_event.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.actions.push(InputAction::Start);
                }
            }
            Phase::GameOver => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.actions.push(InputAction::Restart);
                }
            }
            Phase::Running => {}
        }
    }

    fn handle_mouse(&mut self, mouse_event: &MouseEvent, phase: Phase) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        match phase {
            Phase::Idle => self.actions.push(InputAction::Start),
            Phase::Running => self.actions.push(InputAction::Fire {
                column: mouse_event.column,
                row: mouse_event.row,
            }),
            Phase::GameOver => {}
        }
    }

    /// Returns and clears the actions gathered since the last call
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }
}
