use std::{mem, time::Duration};

use blockfall_engine::{GameSession, InputCommands, SessionState};
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["a", "←"], "Left"),
    (&["d", "→"], "Right"),
    (&["s", "↓"], "Soft Drop"),
    (&["w", "↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["u"], "Undo"),
    (&["p"], "Pause"),
    (&["r"], "Restart"),
    (&["x", "q"], "Quit"),
];
const PLAYING_NO_UNDO_BINDINGS: &[KeyBinding] = &[
    (&["a", "←"], "Left"),
    (&["d", "→"], "Right"),
    (&["s", "↓"], "Soft Drop"),
    (&["w", "↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["p"], "Pause"),
    (&["r"], "Restart"),
    (&["x", "q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[
    (&["p"], "Resume"),
    (&["r"], "Restart"),
    (&["x", "q"], "Quit"),
];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["r"], "Restart"), (&["x", "q"], "Quit")];

/// Manual play: turns key presses into per-tick input and drives the session.
///
/// Keys pressed between two ticks are merged into one [`InputCommands`].
/// When a lock completes rows, the rows stay on screen for the clear pause
/// before they are collapsed; the game does not advance meanwhile.
#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    input: InputCommands,
    clear_pause_ticks: u32,
    clear_pause_remaining: u32,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession, tick_interval: Duration, clear_pause: Duration) -> Self {
        let tick_nanos = tick_interval.as_nanos().max(1);
        let clear_pause_ticks =
            u32::try_from(clear_pause.as_nanos().div_ceil(tick_nanos)).unwrap_or(u32::MAX);
        Self {
            session,
            input: InputCommands::default(),
            clear_pause_ticks,
            clear_pause_remaining: 0,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    fn is_clear_pausing(&self) -> bool {
        self.clear_pause_remaining > 0
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.session.session_state() {
            SessionState::Playing if self.session.can_undo() => PLAYING_BINDINGS,
            SessionState::Playing => PLAYING_NO_UNDO_BINDINGS,
            SessionState::Paused => PAUSED_BINDINGS,
            SessionState::GameOver => GAME_OVER_BINDINGS,
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let bindings = self.key_bindings();
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(32), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_press_event() else {
            return;
        };
        let is_playing = self.session.session_state().is_playing();

        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.is_exiting = true;
            }
            KeyCode::Char('x' | 'q') | KeyCode::Esc => self.is_exiting = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('p') if !self.session.session_state().is_game_over() => {
                self.session.toggle_pause();
            }
            KeyCode::Char('d') | KeyCode::Right if is_playing => self.input.move_right = true,
            KeyCode::Char('a') | KeyCode::Left if is_playing => self.input.move_left = true,
            KeyCode::Char('s') | KeyCode::Down if is_playing => self.input.soft_drop = true,
            KeyCode::Char('w') | KeyCode::Up if is_playing => self.input.rotate = true,
            KeyCode::Char(' ') if is_playing => self.input.hard_drop = true,
            KeyCode::Char('u') if is_playing => self.input.undo = true,
            _ => {}
        }
    }

    /// Advances the game by one tick.
    pub fn update(&mut self) {
        if self.session.session_state().is_paused() {
            return;
        }
        if self.is_clear_pausing() {
            self.input = InputCommands::default();
            self.clear_pause_remaining -= 1;
            if !self.is_clear_pausing() {
                self.session.collapse_completed_rows();
            }
            return;
        }

        let input = mem::take(&mut self.input);
        self.session.apply_input(input);
        let result = self.session.tick();
        if !result.lines_just_completed.is_empty() {
            if self.clear_pause_ticks == 0 {
                self.session.collapse_completed_rows();
            } else {
                self.clear_pause_remaining = self.clear_pause_ticks;
            }
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.input = InputCommands::default();
        self.clear_pause_remaining = 0;
    }
}
