//! Data models for todomd.

pub mod todo;

pub use todo::{generate_id, is_valid_id, TodoItem, TodoPatch};
