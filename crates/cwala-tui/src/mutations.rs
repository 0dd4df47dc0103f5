//! Cross-slice state mutations.
//!
//! Overlays return these mutations to request changes outside their own
//! state. The main reducer applies them in order.

use cwala_core::api::types::{User, WalletBalance};

use crate::state::Screen;

/// Mutations for cross-slice state changes.
#[derive(Debug)]
pub enum StateMutation {
    Session(SessionMutation),
    Auth(AuthMutation),
    Nav(NavMutation),
    Status(StatusMutation),
}

/// Session slice mutations requested by other slices.
#[derive(Debug)]
pub enum SessionMutation {
    /// Store a fresh token + user after login or verification.
    Establish { access_token: String, user: User },
    /// Replace the cached user (profile refresh, approval).
    SetUser(User),
    /// Replace the cached wallet balance.
    SetWallet(WalletBalance),
    /// Record a notification id as read.
    MarkNotificationRead(String),
    /// Drop the in-memory session (logout, approval timeout).
    Clear,
}

/// Auth slice mutations requested by overlays.
#[derive(Debug)]
pub enum AuthMutation {
    /// Password-reset code collected; advance to the new-password form.
    AdvanceResetWithCode { otp: String },
    /// Clear every auth form (leaving the auth screens).
    ResetForms,
}

/// Navigation mutations.
#[derive(Debug)]
pub enum NavMutation {
    /// Switch to a specific screen.
    Goto(Screen),
    /// Re-resolve the screen from the current session (route guard).
    RouteBySession,
}

/// Status line mutations.
#[derive(Debug)]
pub enum StatusMutation {
    Info(String),
    Error(String),
    Clear,
}
