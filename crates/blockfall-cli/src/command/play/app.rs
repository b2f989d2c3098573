use std::time::Duration;

use blockfall_engine::GameSession;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    tick_interval: Duration,
}

impl PlayApp {
    pub fn new(session: GameSession, tick_interval: Duration, clear_pause: Duration) -> Self {
        Self {
            screen: PlayScreen::new(session, tick_interval, clear_pause),
            tick_interval,
        }
    }

    pub fn session(&self) -> &GameSession {
        self.screen.session()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.tick_interval));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update();
    }
}
