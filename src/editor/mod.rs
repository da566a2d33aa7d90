//! Rope-backed text editing.
//!
//! Provides the text buffer with cursor management and undo history,
//! designed for integration into the TEA architecture.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
