//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the falling-block game-state engine. It has **no
//! dependencies** on terminals, threads or clocks beyond what callers hand
//! in, which makes it:
//!
//! - **Deterministic**: same seed and intent stream produce the same game
//! - **Testable**: any board can be constructed and driven tick by tick
//! - **Allocation-free at steady state**: shapes, board and snapshots are fixed-size
//!
//! # Module Structure
//!
//! - [`catalog`]: canonical shape matrices for the seven kinds
//! - [`rotation`]: shape for a kind at an absolute orientation
//! - [`board`]: 10x20 locked-cell grid, placement checks, line clearing
//! - [`scoring`]: line-clear points and the 4-line streak
//! - [`rng`]: LCG and the one-deep next-piece queue
//! - [`game_state`]: active piece, spawner and the tick state machine
//! - [`snapshot`] / [`publish`]: read-only copies for renderers on other threads
//! - [`config`]: tick-rate dependent tunables
//!
//! # Game Rules
//!
//! - Rotation is always derived from the canonical matrix; there are no wall kicks.
//! - A piece locks when a gravity step cannot move it down.
//! - 1-3 lines score 100 per line, a 4-line clear scores 800, or 1200 when the
//!   previous clear was also 4 lines. A lock without clears scores 10.
//! - The next kind is drawn uniformly from all seven kinds.
//!
//! # Example
//!
//! ```
//! use fallblock_core::{EngineConfig, GameState};
//! use fallblock_types::Intents;
//!
//! let mut game = GameState::new(EngineConfig::default(), 12345);
//!
//! // First tick spawns the first piece.
//! assert!(game.tick(Intents::NONE));
//! assert!(game.active().is_some());
//!
//! let right = Intents { right: true, ..Intents::NONE };
//! game.tick(right);
//! assert!(!game.game_over());
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game_state;
pub mod publish;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use fallblock_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{canonical_shape, Shape};
pub use config::EngineConfig;
pub use error::PlacementError;
pub use game_state::{ActivePiece, GameState};
pub use publish::SnapshotSlot;
pub use rng::{NextPieceQueue, SimpleRng};
pub use rotation::{rotate_cw, shape_at};
pub use scoring::ScoreState;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
