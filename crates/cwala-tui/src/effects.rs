//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.
//!
//! ## Cancellation Effects
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes these by calling `token.cancel()` on the provided
//! token.

use cwala_core::api::types::{AddMemberRequest, OtpPurpose, RegisterRequest, UpdateProfileRequest};
use cwala_core::config::Theme;
use tokio_util::sync::CancellationToken;

use crate::common::task::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
///
/// The reducer returns `Vec<UiEffect>` from each update call.
/// The runtime executes these effects after rendering.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Submit login credentials (user/TL, or the admin endpoint).
    SubmitLogin {
        task: Option<TaskId>,
        email: String,
        password: String,
        admin: bool,
    },

    /// Submit a registration.
    SubmitRegister {
        task: Option<TaskId>,
        request: RegisterRequest,
    },

    /// Submit a collected one-time code for verification.
    SubmitOtp {
        task: Option<TaskId>,
        email: String,
        otp: String,
        purpose: OtpPurpose,
    },

    /// Request a password-reset code for an email.
    SendResetCode {
        task: Option<TaskId>,
        email: String,
    },

    /// Submit the password reset (email + code + new password together).
    SubmitPasswordReset {
        task: Option<TaskId>,
        email: String,
        otp: String,
        new_password: String,
    },

    /// Best-effort server logout. The token travels in the effect because
    /// the local session is already cleared when this runs.
    Logout {
        task: Option<TaskId>,
        access_token: Option<String>,
    },

    /// Poll the profile endpoint while waiting for account approval.
    CheckApproval { task: Option<TaskId> },

    /// Fetch the signed-in profile.
    FetchProfile { task: Option<TaskId> },

    /// Save profile edits.
    SaveProfile {
        task: Option<TaskId>,
        request: UpdateProfileRequest,
    },

    /// Change the account password.
    ChangePassword {
        task: Option<TaskId>,
        old_password: String,
        new_password: String,
    },

    /// Fetch the team member list.
    FetchTeam { task: Option<TaskId> },

    /// Add a team member.
    AddMember {
        task: Option<TaskId>,
        request: AddMemberRequest,
    },

    /// Remove a team member by id.
    RemoveMember { task: Option<TaskId>, id: String },

    /// Fetch the wallet balance.
    FetchWallet { task: Option<TaskId> },

    /// Fetch notifications.
    FetchNotifications { task: Option<TaskId> },

    /// Persist the current session cache to disk. The runtime snapshots
    /// state at execution time, after every mutation has applied.
    SaveSession,

    /// Delete the session file.
    ClearSessionFile,

    /// Persist the theme preference to config.
    PersistTheme { theme: Theme },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}

impl UiEffect {
    /// Mutable access to the task id slot for effects that spawn tasks.
    ///
    /// Handlers build effects with `task: None`; the reducer fills every
    /// empty slot from the task sequence before handing effects to the
    /// runtime.
    pub(crate) fn task_slot(&mut self) -> Option<&mut Option<TaskId>> {
        match self {
            UiEffect::SubmitLogin { task, .. }
            | UiEffect::SubmitRegister { task, .. }
            | UiEffect::SubmitOtp { task, .. }
            | UiEffect::SendResetCode { task, .. }
            | UiEffect::SubmitPasswordReset { task, .. }
            | UiEffect::Logout { task, .. }
            | UiEffect::CheckApproval { task }
            | UiEffect::FetchProfile { task }
            | UiEffect::SaveProfile { task, .. }
            | UiEffect::ChangePassword { task, .. }
            | UiEffect::FetchTeam { task }
            | UiEffect::AddMember { task, .. }
            | UiEffect::RemoveMember { task, .. }
            | UiEffect::FetchWallet { task }
            | UiEffect::FetchNotifications { task } => Some(task),
            UiEffect::Quit
            | UiEffect::SaveSession
            | UiEffect::ClearSessionFile
            | UiEffect::PersistTheme { .. }
            | UiEffect::CancelTask { .. } => None,
        }
    }
}
