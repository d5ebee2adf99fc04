//! Fallblock (workspace facade crate).
//!
//! Re-exports the engine and its collaborators so binaries, integration tests
//! and benches can use `fallblock::{core,input,term,types}` paths.

pub use fallblock_core as core;
pub use fallblock_input as input;
pub use fallblock_term as term;
pub use fallblock_types as types;
