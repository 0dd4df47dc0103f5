//! Team feature slice (admin and TL only): member table, add/remove.

mod render;
mod state;
mod update;

pub use render::render_team;
pub use state::TeamState;
pub use update::{handle_member_added, handle_member_removed, handle_team_key, handle_team_loaded};
