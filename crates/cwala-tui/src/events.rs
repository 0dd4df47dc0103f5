//! UI event types.
//!
//! This module defines the unified event enum for the dashboard.
//! All external inputs (terminal, async API results) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Events follow the "inbox" pattern where async operations send events
//! directly to the runtime's event inbox. Results arrive as separate events.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`

use crossterm::event::Event as CrosstermEvent;
use cwala_core::api::errors::ApiError;
use cwala_core::api::types::{
    LoginResponse, MessageResponse, Notification, User, VerifyResponse, WalletBalance,
};

use crate::common::task::{TaskCompleted, TaskKind, TaskStarted};

/// Results of authentication calls.
///
/// Login, registration and forgot-password all answer with the challenge
/// shape (`requireOTP` + target email); the reducer opens or refreshes the
/// OTP overlay from them. `requireOTP: false` short-circuits to a session.
#[derive(Debug)]
pub enum AuthUiEvent {
    /// Login (user/TL or admin) completed.
    LoginResult(Result<LoginResponse, ApiError>),

    /// Registration completed.
    RegisterResult(Result<LoginResponse, ApiError>),

    /// OTP verification completed.
    VerifyResult(Result<VerifyResponse, ApiError>),

    /// Forgot-password code send completed.
    ResetCodeResult(Result<LoginResponse, ApiError>),

    /// Password reset (email + code + new password) completed.
    ResetResult(Result<MessageResponse, ApiError>),

    /// Server-side logout completed (failures are swallowed).
    LogoutResult(Result<MessageResponse, ApiError>),

    /// Pending-approval profile poll completed.
    ApprovalResult(Result<User, ApiError>),
}

/// Results of dashboard data calls.
#[derive(Debug)]
pub enum DataUiEvent {
    /// Profile fetch completed.
    ProfileLoaded(Result<User, ApiError>),

    /// Profile update completed with the saved user.
    ProfileSaved(Result<User, ApiError>),

    /// Password change completed.
    PasswordChanged(Result<MessageResponse, ApiError>),

    /// Team member list fetch completed.
    TeamLoaded(Result<Vec<User>, ApiError>),

    /// Add-member completed with the created user.
    MemberAdded(Result<User, ApiError>),

    /// Remove-member completed for the given id.
    MemberRemoved {
        id: String,
        result: Result<MessageResponse, ApiError>,
    },

    /// Wallet balance fetch completed.
    WalletLoaded(Result<WalletBalance, ApiError>),

    /// Notifications fetch completed.
    NotificationsLoaded(Result<Vec<Notification>, ApiError>),
}

/// Unified event enum for the dashboard.
///
/// All inputs are converted to this type before processing. The reducer
/// (`update`) pattern-matches on these events to update state.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (animation, deadline checks, polling).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime started a task (cancel token optional).
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Authentication call results.
    Auth(AuthUiEvent),

    /// Dashboard data call results.
    Data(DataUiEvent),
}
