//! Game state module - manages the complete game state
//!
//! This module ties together the catalog, rotation engine, board, scoring and
//! next-piece queue. `GameState::tick` is the single entry point that mutates
//! them, once per fixed time quantum.

use log::{debug, info};

use crate::board::Board;
use crate::catalog::{canonical_shape, Shape};
use crate::config::EngineConfig;
use crate::rng::NextPieceQueue;
use crate::rotation::shape_at;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub orientation: Orientation,
    /// Column of the shape matrix's top-left corner
    pub x: i8,
    /// Row of the shape matrix's top-left corner
    pub y: i8,
    /// Shape for `orientation`, derived from the canonical matrix
    pub shape: Shape,
}

impl ActivePiece {
    /// Create a new piece at the spawn anchor, orientation 0°
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            orientation: Orientation::Deg0,
            x: SPAWN_X,
            y: SPAWN_Y,
            shape: canonical_shape(kind),
        }
    }

    /// Check if the piece fits the board at its current anchor
    pub fn is_valid(&self, board: &Board) -> bool {
        board.can_place(&self.shape, self.x, self.y)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    queue: NextPieceQueue,
    scoring: ScoreState,
    phase: TickPhase,
    game_over: bool,
    /// Monotonic count of `tick` calls in this game.
    tick_count: u64,
    /// Ticks since the last gravity step.
    gravity_counter: u32,
    /// Horizontal direction held on the previous tick (-1, 0, 1).
    shift_dir: i8,
    /// Ticks the current horizontal direction has been held since its last move.
    shift_hold_ticks: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(config: EngineConfig, seed: u32) -> Self {
        Self::with_queue(config, Board::new(), NextPieceQueue::new(seed))
    }

    /// Create a game from an arbitrary board and a known first kind.
    ///
    /// The first tick spawns `next`; later kinds come from `seed`.
    pub fn from_parts(config: EngineConfig, board: Board, next: PieceKind, seed: u32) -> Self {
        Self::with_queue(config, board, NextPieceQueue::with_next(seed, next))
    }

    fn with_queue(config: EngineConfig, board: Board, queue: NextPieceQueue) -> Self {
        Self {
            config,
            board,
            active: None,
            queue,
            scoring: ScoreState::new(),
            phase: TickPhase::Spawning,
            game_over: false,
            tick_count: 0,
            gravity_counter: 0,
            shift_dir: 0,
            shift_hold_ticks: 0,
            last_event: None,
        }
    }

    /// Start a new game, keeping the configuration.
    ///
    /// This is the only way to clear the score and the game-over flag.
    pub fn restart(&mut self, seed: u32) {
        info!("new game (seed {})", seed);
        *self = Self::new(self.config, seed);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the locked cell at (row, col) is occupied
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        self.board.is_occupied(row, col)
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn tetris_streak(&self) -> bool {
        self.scoring.tetris_streak()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.queue.peek();
        out.score = self.scoring.score();
        out.tetris_streak = self.scoring.tetris_streak();
        out.game_over = self.game_over;
        out.phase = self.phase;
        out.tick = self.tick_count;
        out.seed = self.queue.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the queued kind to the active piece.
    ///
    /// Returns false and ends the game when the spawn anchor is blocked.
    pub(crate) fn spawn(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let kind = self.queue.advance();
        let piece = ActivePiece::new(kind);

        if !piece.is_valid(&self.board) {
            info!(
                "spawn of {} blocked, game over (score {})",
                kind.as_str(),
                self.scoring.score()
            );
            self.active = None;
            self.game_over = true;
            self.phase = TickPhase::GameOver;
            return false;
        }

        debug!(
            "spawned {} (next {})",
            kind.as_str(),
            self.queue.peek().as_str()
        );
        self.active = Some(piece);
        self.phase = TickPhase::Falling;
        self.gravity_counter = 0;
        true
    }

    /// Try to move the active piece; state is untouched on failure
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let x = active.x + dx;
        let y = active.y + dy;
        if !self.board.can_place(&active.shape, x, y) {
            return false;
        }

        self.active = Some(ActivePiece { x, y, ..active });
        true
    }

    /// Try to advance the active piece one quarter turn clockwise.
    ///
    /// The new shape comes from the canonical matrix. There are no kicks: a
    /// rotation that does not fit at the current anchor is discarded.
    pub(crate) fn try_rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let orientation = active.orientation.next();
        let shape = shape_at(active.kind, orientation);
        if !self.board.can_place(&shape, active.x, active.y) {
            return false;
        }

        self.active = Some(ActivePiece {
            orientation,
            shape,
            ..active
        });
        true
    }

    /// Lock the active piece, clear lines and score.
    ///
    /// Returns the number of lines cleared.
    pub(crate) fn lock_piece(&mut self) -> usize {
        let Some(active) = self.active.take() else {
            return 0;
        };

        self.board.lock_shape(&active.shape, active.x, active.y);

        let lines = self.board.clear_full_rows();
        let points = self.scoring.update(lines);

        debug!(
            "locked {} at ({}, {}), {} line(s), +{}",
            active.kind.as_str(),
            active.x,
            active.y,
            lines,
            points
        );

        self.last_event = Some(LockEvent {
            lines_cleared: lines as u32,
            points,
            tetris_streak: self.scoring.tetris_streak(),
        });
        self.phase = TickPhase::Clearing;
        lines
    }

    /// Apply a horizontal intent with hold throttling.
    ///
    /// The first tick of a hold moves at once; after that the piece moves
    /// every `shift_repeat_ticks` ticks while the same direction stays held.
    fn apply_shift(&mut self, dir: i8) -> bool {
        if dir == 0 {
            self.shift_dir = 0;
            self.shift_hold_ticks = 0;
            return false;
        }

        if dir != self.shift_dir {
            self.shift_dir = dir;
            self.shift_hold_ticks = 0;
            return self.try_move(dir, 0);
        }

        self.shift_hold_ticks += 1;
        if self.shift_hold_ticks >= self.config.shift_repeat_ticks {
            self.shift_hold_ticks = 0;
            return self.try_move(dir, 0);
        }
        false
    }

    /// Advance the game by one time quantum.
    ///
    /// Returns true when anything observable changed and a redraw is needed.
    pub fn tick(&mut self, intents: Intents) -> bool {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self.game_over {
            return false;
        }

        let mut changed = false;

        if self.active.is_none() {
            self.phase = TickPhase::Spawning;
            changed = true;
            if !self.spawn() {
                return true;
            }
        }

        if intents.rotate && self.try_rotate() {
            changed = true;
        }

        if self.apply_shift(intents.horizontal()) {
            changed = true;
        }

        if intents.soft_drop && self.try_move(0, 1) {
            changed = true;
        }

        self.gravity_counter += 1;
        if self.gravity_counter >= self.config.gravity_period_ticks {
            self.gravity_counter = 0;
            if !self.try_move(0, 1) {
                self.lock_piece();
            }
            changed = true;
        }

        changed
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EngineConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> EngineConfig {
        EngineConfig {
            gravity_period_ticks: 1,
            shift_repeat_ticks: 3,
            tick_hz: 100,
        }
    }

    fn started(kind: PieceKind) -> GameState {
        let mut state = GameState::from_parts(EngineConfig::default(), Board::new(), kind, 42);
        assert!(state.spawn());
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(EngineConfig::default(), 12345);

        assert!(!state.game_over);
        assert_eq!(state.phase, TickPhase::Spawning);
        assert_eq!(state.score(), 0);
        assert!(!state.tetris_streak());
        assert!(state.active.is_none());
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn test_first_tick_spawns_queued_kind() {
        let mut state = GameState::from_parts(EngineConfig::default(), Board::new(), PieceKind::T, 9);
        assert!(state.tick(Intents::NONE));

        let active = state.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.orientation, Orientation::Deg0);
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.shape, canonical_shape(PieceKind::T));
        assert_eq!(state.phase, TickPhase::Falling);
    }

    #[test]
    fn test_try_move() {
        let mut state = started(PieceKind::O);

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, SPAWN_X + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, SPAWN_X);

        // Can't move above row 0
        assert!(!state.try_move(0, -1));
        assert_eq!(state.active.unwrap().y, SPAWN_Y);
    }

    #[test]
    fn test_try_move_stops_at_wall() {
        let mut state = started(PieceKind::O);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_try_rotate_cycles_orientation() {
        let mut state = started(PieceKind::T);
        state.try_move(0, 2);

        for expected in [
            Orientation::Deg90,
            Orientation::Deg180,
            Orientation::Deg270,
            Orientation::Deg0,
        ] {
            assert!(state.try_rotate());
            let active = state.active.unwrap();
            assert_eq!(active.orientation, expected);
            assert_eq!(active.shape, shape_at(PieceKind::T, expected));
        }
    }

    #[test]
    fn test_blocked_rotation_is_discarded() {
        let mut state = started(PieceKind::I);
        // Vertical bar in column 1 of the matrix; slide the matrix so the bar
        // hugs the left wall (x = -1). Rotating to horizontal would need column -1.
        for _ in 0..4 {
            state.try_move(-1, 0);
        }
        let before = state.active.unwrap();
        assert_eq!(before.x, -1);

        assert!(!state.try_rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_gravity_period_controls_fall() {
        let mut state = GameState::from_parts(
            EngineConfig {
                gravity_period_ticks: 5,
                ..EngineConfig::default()
            },
            Board::new(),
            PieceKind::O,
            1,
        );

        // Tick 1 spawns; gravity fires on tick 5.
        for _ in 0..4 {
            state.tick(Intents::NONE);
        }
        assert_eq!(state.active.unwrap().y, 0);
        assert!(state.tick(Intents::NONE));
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_quiet_tick_reports_no_change() {
        let mut state = started(PieceKind::O);
        assert!(!state.tick(Intents::NONE));
    }

    #[test]
    fn test_shift_is_throttled_while_held() {
        let mut state = GameState::from_parts(
            EngineConfig {
                gravity_period_ticks: 1000,
                shift_repeat_ticks: 3,
                tick_hz: 100,
            },
            Board::new(),
            PieceKind::O,
            1,
        );
        state.tick(Intents::NONE);
        let right = Intents {
            right: true,
            ..Intents::NONE
        };

        // Immediate move, then one move every third tick.
        let xs: Vec<i8> = (0..7)
            .map(|_| {
                state.tick(right);
                state.active.unwrap().x
            })
            .collect();
        assert_eq!(xs, vec![4, 4, 4, 5, 5, 5, 6]);

        // Releasing and pressing again moves immediately.
        state.tick(Intents::NONE);
        state.tick(right);
        assert_eq!(state.active.unwrap().x, 7);
    }

    #[test]
    fn test_soft_drop_moves_every_tick() {
        let mut state = GameState::from_parts(
            EngineConfig {
                gravity_period_ticks: 1000,
                ..EngineConfig::default()
            },
            Board::new(),
            PieceKind::O,
            1,
        );
        state.tick(Intents::NONE);
        let down = Intents {
            soft_drop: true,
            ..Intents::NONE
        };
        for expected in 1..=3 {
            assert!(state.tick(down));
            assert_eq!(state.active.unwrap().y, expected);
        }
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let board = Board::from_rows(&["####..####"]);
        let mut state = GameState::from_parts(fast_config(), board, PieceKind::O, 5);

        // Spawn at x = 3; shift right once so the O covers columns 4 and 5.
        let right = Intents {
            right: true,
            ..Intents::NONE
        };
        state.tick(right);
        assert_eq!(state.active.unwrap().x, 4);

        // Fall to the bottom (rows 18, 19), then the failed step locks.
        let mut ticks = 0;
        while state.phase != TickPhase::Clearing {
            state.tick(Intents::NONE);
            ticks += 1;
            assert!(ticks < 40, "piece never locked");
        }

        assert!(state.active.is_none());
        assert_eq!(state.score(), 100);
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.points, 100);
        // Row 19 now holds the top half of the O.
        assert!(state.is_occupied(19, 4));
        assert!(state.is_occupied(19, 5));
        assert_eq!(state.board.occupied_count(), 2);

        // Next tick spawns again.
        assert!(state.tick(Intents::NONE));
        assert_eq!(state.phase, TickPhase::Falling);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_blocked_spawn_sets_game_over() {
        let mut board = Board::new();
        for row in 0..4 {
            board.fill_row(row);
        }
        // Keep rows from being full so nothing could clear them.
        for row in 0..4 {
            board.set(row, 9, false);
        }
        let mut state = GameState::from_parts(EngineConfig::default(), board.clone(), PieceKind::T, 3);

        assert!(state.tick(Intents::NONE));
        assert!(state.game_over());
        assert_eq!(state.phase, TickPhase::GameOver);
        assert!(state.active.is_none());

        let score = state.score();
        for _ in 0..100 {
            assert!(!state.tick(Intents {
                rotate: true,
                left: true,
                ..Intents::NONE
            }));
        }
        assert_eq!(state.board, board);
        assert_eq!(state.score(), score);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_restart_clears_game_over() {
        let mut board = Board::new();
        board.set(0, 4, true);
        let mut state = GameState::from_parts(EngineConfig::default(), board, PieceKind::T, 3);
        state.tick(Intents::NONE);
        assert!(state.game_over());

        state.restart(77);
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.board.occupied_count(), 0);
        assert!(state.tick(Intents::NONE));
        assert!(state.active.is_some());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(PieceKind::L);
        state.board.set(19, 0, true);
        let snap = state.snapshot();

        assert!(snap.board[19][0]);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::L);
        assert!(snap.is_filled(0, 3));
        assert!(snap.is_filled(2, 4));
        assert!(!snap.is_filled(0, 4));
        assert_eq!(snap.next, state.next_kind());
        assert!(!snap.game_over);
    }
}
