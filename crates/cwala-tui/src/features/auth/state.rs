//! Auth feature state: the signed-out screens and the approval gate.

use std::time::{Duration, Instant};

use crate::common::forms::{Field, Form};

/// How long a pending account keeps polling before giving up.
pub const APPROVAL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Interval between approval polls.
pub const APPROVAL_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Field order in the sign-in form.
pub const LOGIN_EMAIL: usize = 0;
pub const LOGIN_PASSWORD: usize = 1;

/// Field order in the registration form.
pub const REGISTER_NAME: usize = 0;
pub const REGISTER_EMAIL: usize = 1;
pub const REGISTER_PHONE: usize = 2;
pub const REGISTER_PASSWORD: usize = 3;
pub const REGISTER_CONFIRM: usize = 4;

/// Field order in the reset form (new-password phase).
pub const RESET_PASSWORD: usize = 0;
pub const RESET_CONFIRM: usize = 1;

/// Where the password-reset flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotPhase {
    /// Collecting the account email before requesting a code.
    Email,
    /// Code collected; choosing the replacement password.
    NewPassword,
}

/// Password-reset flow state.
///
/// The one-time code never gets verified on its own here; it is held until
/// the new password submits and travels with it.
#[derive(Debug, Clone)]
pub struct ForgotState {
    pub phase: ForgotPhase,
    pub email_form: Form,
    pub password_form: Form,
    /// Code collected by the challenge popup.
    pub otp: Option<String>,
}

impl ForgotState {
    pub fn new() -> Self {
        Self {
            phase: ForgotPhase::Email,
            email_form: Form::new(vec![Field::new("Email")]),
            password_form: Form::new(vec![
                Field::masked("New password"),
                Field::masked("Confirm password"),
            ]),
            otp: None,
        }
    }

    /// Email the reset flow is operating on.
    pub fn email(&self) -> String {
        self.email_form.value(0).to_string()
    }

    /// Moves to the new-password phase once the code is in hand.
    pub fn advance_with_code(&mut self, otp: String) {
        self.otp = Some(otp);
        self.phase = ForgotPhase::NewPassword;
    }

    /// Drops the collected code and returns to the email phase.
    pub fn back_to_email(&mut self) {
        self.otp = None;
        self.phase = ForgotPhase::Email;
        self.password_form = ForgotState::new().password_form;
    }
}

impl Default for ForgotState {
    fn default() -> Self {
        Self::new()
    }
}

/// Approval-wait timers. Polls the profile until the account is approved
/// or the deadline passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingState {
    pub deadline: Option<Instant>,
    pub next_poll: Option<Instant>,
}

impl PendingState {
    /// Arms the timers; the first poll fires immediately.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + APPROVAL_TIMEOUT);
        self.next_poll = Some(now);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
        self.next_poll = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn poll_due(&self, now: Instant) -> bool {
        self.next_poll.is_some_and(|at| now >= at)
    }

    pub fn schedule_next(&mut self, now: Instant) {
        self.next_poll = Some(now + APPROVAL_POLL_INTERVAL);
    }

    pub fn timed_out(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|at| now >= at)
    }
}

/// State behind the signed-out screens.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub login: Form,
    /// Sign-in submits to the admin endpoint when set (Ctrl+A).
    pub admin_mode: bool,
    pub register: Form,
    pub forgot: ForgotState,
    pub pending: PendingState,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            login: login_form(),
            admin_mode: false,
            register: register_form(),
            forgot: ForgotState::new(),
            pending: PendingState::default(),
        }
    }

    /// Drops everything typed so far (logout, successful sign-in).
    pub fn reset_forms(&mut self) {
        *self = Self::new();
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

fn login_form() -> Form {
    Form::new(vec![Field::new("Email"), Field::masked("Password")])
}

fn register_form() -> Form {
    Form::new(vec![
        Field::new("Full name"),
        Field::new("Email"),
        Field::new("Phone number"),
        Field::masked("Password"),
        Field::masked("Confirm password"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_polls_immediately_then_on_interval() {
        let now = Instant::now();
        let mut pending = PendingState::default();
        assert!(!pending.poll_due(now));

        pending.start(now);
        assert!(pending.poll_due(now));

        pending.schedule_next(now);
        assert!(!pending.poll_due(now + APPROVAL_POLL_INTERVAL - Duration::from_millis(1)));
        assert!(pending.poll_due(now + APPROVAL_POLL_INTERVAL));
    }

    #[test]
    fn test_pending_times_out_at_deadline() {
        let now = Instant::now();
        let mut pending = PendingState::default();
        pending.start(now);

        assert!(!pending.timed_out(now + APPROVAL_TIMEOUT - Duration::from_secs(1)));
        assert!(pending.timed_out(now + APPROVAL_TIMEOUT));

        pending.stop();
        assert!(!pending.is_active());
        assert!(!pending.timed_out(now + APPROVAL_TIMEOUT));
    }

    #[test]
    fn test_forgot_advances_with_code_and_backs_out() {
        let mut forgot = ForgotState::new();
        forgot.email_form.fields[0].value = "asha@example.com".to_string();
        assert_eq!(forgot.phase, ForgotPhase::Email);

        forgot.advance_with_code("4821".to_string());
        assert_eq!(forgot.phase, ForgotPhase::NewPassword);
        assert_eq!(forgot.otp.as_deref(), Some("4821"));
        assert_eq!(forgot.email(), "asha@example.com");

        forgot.password_form.fields[0].value = "secret".to_string();
        forgot.back_to_email();
        assert_eq!(forgot.phase, ForgotPhase::Email);
        assert!(forgot.otp.is_none());
        assert_eq!(forgot.password_form.raw_value(0), "");
        // Typed email survives the round trip
        assert_eq!(forgot.email(), "asha@example.com");
    }

    #[test]
    fn test_reset_forms_drops_everything() {
        let mut auth = AuthState::new();
        auth.admin_mode = true;
        auth.login.fields[0].value = "asha@example.com".to_string();
        auth.register.fields[0].value = "Asha".to_string();

        auth.reset_forms();
        assert!(!auth.admin_mode);
        assert_eq!(auth.login.raw_value(LOGIN_EMAIL), "");
        assert_eq!(auth.register.raw_value(REGISTER_NAME), "");
    }
}
