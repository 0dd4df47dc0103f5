mod render;
mod update;

pub use render::render_home;
pub use update::{handle_home_key, refresh_home};
