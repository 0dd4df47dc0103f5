//! Auth feature slice: sign-in, registration, password reset, approval gate.
//!
//! The one-time-code popup itself lives in `overlays::otp`; this slice owns
//! the screens around it and the result handling for every auth call.

mod render;
mod state;
mod update;

pub use render::{render_forgot, render_login, render_pending, render_register};
pub use state::{
    APPROVAL_POLL_INTERVAL, APPROVAL_TIMEOUT, AuthState, ForgotPhase, ForgotState, LOGIN_EMAIL,
    LOGIN_PASSWORD, PendingState, REGISTER_EMAIL, REGISTER_NAME, REGISTER_PASSWORD, REGISTER_PHONE,
};
pub use update::{
    ChallengeAction, VerifyAction, handle_approval_result, handle_forgot_key, handle_login_key,
    handle_login_result, handle_pending_key, handle_register_key, handle_register_result,
    handle_reset_code_result, handle_reset_result, handle_verify_result,
};
