//! Terminal rendering collaborator.
//!
//! Snapshots are drawn into a plain framebuffer (no widgets or layout engine)
//! which is then diffed against the previous frame and flushed. Board cells
//! are 2 columns wide by default to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fallblock_core as core;
pub use fallblock_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
