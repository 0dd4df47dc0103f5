//! Session feature slice.
//!
//! Holds the in-memory mirror of `session.json` and the route guard that
//! resolves which screen a given session may see.

mod state;

pub use state::{SessionState, route_for};
