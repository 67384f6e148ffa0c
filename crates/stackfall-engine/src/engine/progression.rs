use std::time::Duration;

/// Points per cleared line, before the level multiplier.
const POINTS_PER_LINE: usize = 100;

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

const BASE_FALL_DELAY: Duration = Duration::from_millis(600);
const FALL_DELAY_STEP: Duration = Duration::from_millis(50);
const MIN_FALL_DELAY: Duration = Duration::from_millis(50);

/// Time between forced one-row descents at the given level.
///
/// `max(50ms, 600ms - (level - 1) * 50ms)`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use stackfall_engine::fall_delay_for_level;
///
/// assert_eq!(fall_delay_for_level(1), Duration::from_millis(600));
/// assert_eq!(fall_delay_for_level(5), Duration::from_millis(400));
/// assert_eq!(fall_delay_for_level(100), Duration::from_millis(50));
/// ```
#[must_use]
pub fn fall_delay_for_level(level: usize) -> Duration {
    let steps = u32::try_from(level.saturating_sub(1)).unwrap_or(u32::MAX);
    BASE_FALL_DELAY
        .saturating_sub(FALL_DELAY_STEP.saturating_mul(steps))
        .max(MIN_FALL_DELAY)
}

/// Score, level and line counters of a single game.
///
/// - **Score**: `cleared * 100 * level`, using the level in effect *before* the
///   clear is counted
/// - **Level**: `lines_cleared / 10 + 1`, recomputed after every clear
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 and 4 lines
///
/// # Example
///
/// ```
/// use stackfall_engine::Progression;
///
/// let mut progression = Progression::new();
/// progression.register_cleared_lines(4);
/// progression.register_cleared_lines(6);
///
/// assert_eq!(progression.score(), 1000);
/// assert_eq!(progression.lines_cleared(), 10);
/// assert_eq!(progression.level(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    score: usize,
    level: usize,
    lines_cleared: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of locks by number of lines they cleared.
    ///
    /// Index `n` counts locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Current fall delay, derived from the level.
    #[must_use]
    pub fn fall_delay(&self) -> Duration {
        fall_delay_for_level(self.level)
    }

    /// Adds cleared lines to the score and counters. `0` is a no-op.
    pub fn register_cleared_lines(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.score += count * POINTS_PER_LINE * self.level;
        self.lines_cleared += count;
        self.level = self.lines_cleared / LINES_PER_LEVEL + 1;
    }

    /// Records a locked piece and the lines its lock cleared.
    pub fn complete_piece_lock(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        self.register_cleared_lines(cleared_lines);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progression() {
        let progression = Progression::new();
        assert_eq!(progression.score(), 0);
        assert_eq!(progression.level(), 1);
        assert_eq!(progression.lines_cleared(), 0);
        assert_eq!(progression.fall_delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_zero_lines_is_noop() {
        let mut progression = Progression::new();
        progression.register_cleared_lines(3);
        let before = progression.clone();
        progression.register_cleared_lines(0);
        assert_eq!(progression, before);
    }

    #[test]
    fn test_ten_lines_reach_level_two() {
        let mut progression = Progression::new();
        progression.reset();
        progression.register_cleared_lines(10);
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.lines_cleared(), 10);
    }

    #[test]
    fn test_level_follows_lines_cleared() {
        for (lines, level) in [(0, 1), (9, 1), (10, 2), (19, 2), (20, 3)] {
            let mut progression = Progression::new();
            for _ in 0..lines {
                progression.register_cleared_lines(1);
            }
            progression.register_cleared_lines(0);
            assert_eq!(progression.lines_cleared(), lines);
            assert_eq!(progression.level(), level, "lines = {lines}");
        }
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let mut progression = Progression::new();
        progression.register_cleared_lines(9);
        assert_eq!(progression.score(), 900);

        // crosses into level 2, but is still scored at level 1
        progression.register_cleared_lines(2);
        assert_eq!(progression.score(), 900 + 200);
        assert_eq!(progression.level(), 2);

        progression.register_cleared_lines(1);
        assert_eq!(progression.score(), 1100 + 200);
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut progression = Progression::new();
        let mut last = 0;
        for count in [0, 1, 0, 4, 2, 0, 3, 1] {
            progression.register_cleared_lines(count);
            assert!(progression.score() >= last);
            last = progression.score();
        }
    }

    #[test]
    fn test_complete_piece_lock_counts() {
        let mut progression = Progression::new();
        progression.complete_piece_lock(0);
        progression.complete_piece_lock(1);
        progression.complete_piece_lock(4);
        progression.complete_piece_lock(0);

        assert_eq!(progression.completed_pieces(), 4);
        assert_eq!(progression.line_cleared_counter(), &[2, 1, 0, 0, 1]);
        assert_eq!(progression.lines_cleared(), 5);
        assert_eq!(progression.score(), 500);
    }

    #[test]
    fn test_reset() {
        let mut progression = Progression::new();
        progression.complete_piece_lock(4);
        progression.register_cleared_lines(10);
        progression.reset();
        assert_eq!(progression, Progression::new());
    }

    #[test]
    fn test_fall_delay_table() {
        assert_eq!(fall_delay_for_level(1), Duration::from_millis(600));
        assert_eq!(fall_delay_for_level(2), Duration::from_millis(550));
        assert_eq!(fall_delay_for_level(5), Duration::from_millis(400));
        assert_eq!(fall_delay_for_level(11), Duration::from_millis(100));
        assert_eq!(fall_delay_for_level(12), Duration::from_millis(50));
        assert_eq!(fall_delay_for_level(13), Duration::from_millis(50));
        assert_eq!(fall_delay_for_level(100), Duration::from_millis(50));
        assert_eq!(fall_delay_for_level(usize::MAX), Duration::from_millis(50));
    }

    #[test]
    fn test_fall_delay_is_non_increasing() {
        let mut last = fall_delay_for_level(1);
        for level in 2..200 {
            let delay = fall_delay_for_level(level);
            assert!(delay <= last);
            assert!(delay >= MIN_FALL_DELAY);
            last = delay;
        }
    }
}
