//! Scoring module - line-clear points and the 4-line streak
//!
//! - A lock without clears adds a small placement bonus.
//! - 1-3 lines add 100 per line and break the streak.
//! - A 4-line clear adds 800, or 1200 when the previous clear was also
//!   4 lines.

use crate::types::{
    BACK_TO_BACK_TETRIS_POINTS, LINE_CLEAR_POINTS, PLACEMENT_BONUS, TETRIS_POINTS,
};

/// Points awarded for a lock, given the streak flag before it.
pub fn calculate_line_score(lines: usize, tetris_streak: bool) -> u32 {
    match lines {
        0 => PLACEMENT_BONUS,
        1..=3 => lines as u32 * LINE_CLEAR_POINTS,
        _ if tetris_streak => BACK_TO_BACK_TETRIS_POINTS,
        _ => TETRIS_POINTS,
    }
}

/// Score and the "last clear was a 4-line clear" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoreState {
    score: u32,
    tetris_streak: bool,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tetris_streak(&self) -> bool {
        self.tetris_streak
    }

    /// Apply the result of one lock and return the points awarded.
    ///
    /// More than four lines can only come from hand-built boards and is
    /// scored as a 4-line clear.
    pub fn update(&mut self, lines: usize) -> u32 {
        let points = calculate_line_score(lines, self.tetris_streak);
        match lines {
            0 => {}
            1..=3 => self.tetris_streak = false,
            _ => self.tetris_streak = true,
        }
        self.score = self.score.saturating_add(points);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, false), 10);
        assert_eq!(calculate_line_score(1, false), 100);
        assert_eq!(calculate_line_score(2, true), 200);
        assert_eq!(calculate_line_score(3, false), 300);
        assert_eq!(calculate_line_score(4, false), 800);
        assert_eq!(calculate_line_score(4, true), 1200);
    }

    #[test]
    fn test_back_to_back_sequence() {
        let mut s = ScoreState::new();

        assert_eq!(s.update(1), 100);
        assert_eq!(s.score(), 100);
        assert!(!s.tetris_streak());

        assert_eq!(s.update(4), 800);
        assert_eq!(s.score(), 900);
        assert!(s.tetris_streak());

        assert_eq!(s.update(4), 1200);
        assert_eq!(s.score(), 2100);
        assert!(s.tetris_streak());

        assert_eq!(s.update(2), 200);
        assert_eq!(s.score(), 2300);
        assert!(!s.tetris_streak());
    }

    #[test]
    fn test_placement_keeps_streak() {
        let mut s = ScoreState::new();
        s.update(4);
        s.update(0);
        assert!(s.tetris_streak());
        assert_eq!(s.update(4), 1200);
        assert_eq!(s.score(), 800 + 10 + 1200);
    }

    #[test]
    fn test_score_saturates() {
        let mut s = ScoreState {
            score: u32::MAX - 5,
            tetris_streak: false,
        };
        s.update(1);
        assert_eq!(s.score(), u32::MAX);
    }
}
