use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui_runtime::{App, RenderMode, Runtime};
use stackfall_engine::GameSession;

use crate::{input::KeyAction, ui::widgets::SessionDisplay};

/// Hosts a [`GameSession`]: forwards mapped keys and measured ticks, and draws its snapshot.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    fps: f64,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: f64, show_ghost: bool) -> Self {
        Self {
            session,
            fps,
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.is_exiting = true,
            KeyAction::Command(command) => {
                if self.session.advance(command).is_exit() {
                    self.is_exiting = true;
                }
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.fps));
        runtime.set_render_mode(RenderMode::interval_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(action) = event
            .as_key_press_event()
            .and_then(|key| KeyAction::from_key_event(&key))
        {
            self.handle_key_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let display = SessionDisplay::new(self.session.snapshot(), self.show_ghost);
        frame.render_widget(display, frame.area());
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.session.advance(elapsed);
    }
}
