mod render;
mod state;
mod update;

pub use render::render_profile;
pub use state::{
    EDIT_NAME, EDIT_PHONE, PW_CONFIRM, PW_CURRENT, PW_NEW, ProfileMode, ProfileState,
};
pub use update::{
    handle_password_changed, handle_profile_key, handle_profile_loaded, handle_profile_saved,
};
