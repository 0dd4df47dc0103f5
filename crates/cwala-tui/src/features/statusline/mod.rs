//! Status line feature slice.
//!
//! One-line bar at the bottom of every screen: running-call spinner on the
//! left, transient info/error messages on the right.

mod render;
mod state;

pub use render::render_status_line;
pub use state::{StatusKind, StatusLineState};
