//! Game rules on top of the core data structures.
//!
//! - [`GameSession`]: the controller state machine driven by commands and ticks
//! - [`Progression`]: score, level and fall speed
//! - [`PieceGenerator`]: seeded uniform piece sequence

pub use self::{game_session::*, piece_generator::*, progression::*};

mod game_session;
mod piece_generator;
mod progression;
