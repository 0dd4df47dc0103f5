//! Shared building blocks for the dashboard UI.

pub mod forms;
pub mod task;
pub mod text;
