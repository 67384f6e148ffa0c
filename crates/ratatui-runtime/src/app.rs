use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// An application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure tick rate and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    /// Checked before every event; the loop stops as soon as this returns `true`.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);

    /// Advances the application clock by `elapsed`, the wall time since the previous update.
    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration);
}
