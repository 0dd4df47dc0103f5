//! One module per screen area, each owning its state, reducer and view.

pub mod auth;
pub mod dashboard;
pub mod notifications;
pub mod profile;
pub mod session;
pub mod statusline;
pub mod team;
