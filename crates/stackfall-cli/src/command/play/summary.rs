use serde::Serialize;
use stackfall_engine::{PieceSeed, SessionState, Snapshot};

/// Final state of a session, printed with `--summary-json`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    seed: PieceSeed,
    state: SessionState,
    score: usize,
    level: usize,
    lines_cleared: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl SessionSummary {
    pub fn from_snapshot(snapshot: Snapshot<'_>) -> Self {
        Self {
            seed: snapshot.seed(),
            state: snapshot.session_state(),
            score: snapshot.score(),
            level: snapshot.level(),
            lines_cleared: snapshot.lines_cleared(),
            completed_pieces: snapshot.completed_pieces(),
            line_cleared_counter: *snapshot.line_cleared_counter(),
        }
    }
}
