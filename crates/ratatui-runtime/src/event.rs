use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Logic update, carrying the time measured since the previous tick.
    #[from(ignore)]
    Tick(Duration),
    /// Time to redraw.
    Render,
    /// Key input, resize, and other terminal events.
    Crossterm(CrosstermEvent),
}
