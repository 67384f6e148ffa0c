use std::time::Duration;

use crate::{
    PieceCollisionError,
    core::{
        field::Field,
        piece::{OccupiedCell, Piece, PieceMatrix},
    },
};

use super::{
    piece_generator::{PieceGenerator, PieceSeed},
    progression::Progression,
};

/// Top-level state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Title screen; a fresh game is ready but not running.
    Start,
    /// A game is running.
    Playing,
    /// The last spawned piece could not be placed. Waits for restart or cancel.
    GameOver,
}

/// Logical player commands, already decoupled from any key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Confirm,
    Cancel,
    RestartConfirm,
}

/// Everything that drives a session forward: a command or elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Input {
    Command(Command),
    Tick(Duration),
}

/// What the host should do after an input has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Flow {
    Continue,
    /// The player left from the start screen.
    Exit,
}

/// A single-player game: field, current and next pieces, and progression,
/// driven by [`Input`]s.
///
/// The session owns all game state; hosts only push inputs through
/// [`Self::advance`] and read through [`Self::snapshot`]. Time only moves via
/// [`Input::Tick`], so a seed plus an input script replays a game exactly.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use stackfall_engine::{Command, GameSession, SessionState};
///
/// let mut session = GameSession::new();
/// assert_eq!(session.session_state(), SessionState::Start);
///
/// session.advance(Command::Confirm);
/// session.advance(Command::MoveLeft);
/// session.advance(Duration::from_millis(16));
/// session.advance(Command::HardDrop);
///
/// assert_eq!(session.snapshot().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: Field,
    current: Piece,
    next: Piece,
    progression: Progression,
    generator: PieceGenerator,
    seed: PieceSeed,
    state: SessionState,
    fall_timer: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session on the start screen with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Like [`Self::new`], but with a fixed piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let current = Piece::spawn(generator.next_kind());
        let next = Piece::spawn(generator.next_kind());
        Self {
            field: Field::new(),
            current,
            next,
            progression: Progression::new(),
            generator,
            seed,
            state: SessionState::Start,
            fall_timer: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn fall_timer(&self) -> Duration {
        self.fall_timer
    }

    /// Where the current piece would land if hard-dropped now.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.current.simulate_drop_position(&self.field)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { session: self }
    }

    /// Single entry point for the host loop.
    pub fn advance(&mut self, input: impl Into<Input>) -> Flow {
        match input.into() {
            Input::Command(command) => self.handle_command(command),
            Input::Tick(elapsed) => {
                self.tick(elapsed);
                Flow::Continue
            }
        }
    }

    /// Applies a command. Commands that do not apply in the current state, and
    /// moves that would collide, are silently ignored.
    pub fn handle_command(&mut self, command: Command) -> Flow {
        match (self.state, command) {
            (SessionState::Start, Command::Confirm) => self.state = SessionState::Playing,
            (SessionState::Start, Command::Cancel) => return Flow::Exit,
            (SessionState::Playing, Command::MoveLeft) => _ = self.try_move_left(),
            (SessionState::Playing, Command::MoveRight) => _ = self.try_move_right(),
            (SessionState::Playing, Command::SoftDrop) => _ = self.try_soft_drop(),
            (SessionState::Playing, Command::Rotate) => _ = self.try_rotate(),
            (SessionState::Playing, Command::HardDrop) => self.hard_drop_and_lock(),
            (SessionState::GameOver, Command::RestartConfirm) => {
                self.reset();
                self.state = SessionState::Playing;
            }
            (SessionState::Playing | SessionState::GameOver, Command::Cancel) => {
                self.reset();
                self.state = SessionState::Start;
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Advances gravity by `elapsed`. Only runs while playing.
    ///
    /// Once the accumulated time reaches the fall delay, the piece moves down one
    /// row, or locks where it is if it cannot. At most one row per tick.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.state.is_playing() {
            return;
        }
        self.fall_timer += elapsed;
        if self.fall_timer >= self.progression.fall_delay() {
            self.auto_drop_and_lock();
            self.fall_timer = Duration::ZERO;
        }
    }

    fn set_current_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.field.can_place(&piece) {
            return Err(PieceCollisionError);
        }
        self.current = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current_piece(self.current.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current_piece(self.current.right())
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current_piece(self.current.down())
    }

    /// Rotates clockwise in place. There is no wall kick: if the rotated matrix
    /// does not fit at the same anchor, nothing happens.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current_piece(self.current.rotated_right())
    }

    /// Drops the current piece as far as it goes and locks it. Always locks.
    pub fn hard_drop_and_lock(&mut self) {
        self.current = self.simulate_drop_position();
        self.lock_current_piece();
    }

    fn auto_drop_and_lock(&mut self) {
        if self.try_soft_drop().is_ok() {
            return;
        }
        self.lock_current_piece();
    }

    /// Locks the current piece, clears lines, and brings in the next piece.
    ///
    /// The game is over when the promoted piece cannot be placed; this is the
    /// only top-out rule.
    fn lock_current_piece(&mut self) {
        self.field.lock_piece(self.current.occupied_cells());
        let cleared_lines = self.field.clear_full_lines();
        self.progression.complete_piece_lock(cleared_lines);

        self.current = self.next;
        self.next = Piece::spawn(self.generator.next_kind());
        if !self.field.can_place(&self.current) {
            self.state = SessionState::GameOver;
        }
    }

    /// Clears the field and progression and deals two fresh pieces.
    ///
    /// The piece generator keeps going, so a restarted game continues the
    /// seeded sequence rather than repeating it.
    fn reset(&mut self) {
        self.field.reset();
        self.progression.reset();
        self.current = Piece::spawn(self.generator.next_kind());
        self.next = Piece::spawn(self.generator.next_kind());
        self.fall_timer = Duration::ZERO;
    }
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    session: &'a GameSession,
}

impl<'a> Snapshot<'a> {
    #[must_use]
    pub fn field(&self) -> &'a Field {
        &self.session.field
    }

    /// The falling piece, or `None` once the game is over.
    ///
    /// After a top-out the promoted piece overlaps the stack and is not part of
    /// the board anymore.
    #[must_use]
    pub fn current_piece(&self) -> Option<&'a Piece> {
        (!self.is_game_over()).then_some(&self.session.current)
    }

    /// Cells of the current piece with their color index. Empty once the game is over.
    pub fn current_cells(&self) -> impl Iterator<Item = OccupiedCell> + 'a {
        self.current_piece()
            .into_iter()
            .flat_map(Piece::occupied_cells)
    }

    /// Landing position of the current piece, for a drop preview.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.current_piece()
            .map(|piece| piece.simulate_drop_position(&self.session.field))
    }

    #[must_use]
    pub fn next_matrix(&self) -> &'a PieceMatrix {
        self.session.next.matrix()
    }

    #[must_use]
    pub fn next_color_index(&self) -> u8 {
        self.session.next.color_index()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.session.progression.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.session.progression.level()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.session.progression.lines_cleared()
    }

    #[must_use]
    pub fn completed_pieces(&self) -> usize {
        self.session.progression.completed_pieces()
    }

    #[must_use]
    pub fn line_cleared_counter(&self) -> &'a [usize; 5] {
        self.session.progression.line_cleared_counter()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session.state.is_game_over()
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.session.seed
    }
}
