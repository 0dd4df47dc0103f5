//! Auth feature reducer.
//!
//! Key handling for the signed-out screens and result processing for the
//! credential, verification, and reset calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cwala_core::api::ApiError;
use cwala_core::api::types::{
    LoginResponse, MessageResponse, OtpPurpose, RegisterRequest, User, VerifyResponse,
};
use cwala_core::validate;

use super::state::{
    AuthState, ForgotPhase, LOGIN_EMAIL, LOGIN_PASSWORD, PendingState, REGISTER_CONFIRM,
    REGISTER_EMAIL, REGISTER_NAME, REGISTER_PASSWORD, REGISTER_PHONE, RESET_CONFIRM,
    RESET_PASSWORD,
};
use crate::common::forms::Form;
use crate::common::task::{TaskKind, Tasks};
use crate::effects::UiEffect;
use crate::mutations::{
    AuthMutation, NavMutation, SessionMutation, StateMutation, StatusMutation,
};
use crate::state::Screen;

/// What the caller should do with the challenge popup after a credential
/// submission came back.
#[derive(Debug)]
pub enum ChallengeAction {
    /// Open (or refresh) the code popup for this email and purpose.
    Open { email: String, purpose: OtpPurpose },
    /// The server skipped the challenge and returned a session directly.
    Established { user: User },
    /// Leave the popup alone.
    None,
}

/// What the caller should do with the popup after code verification.
#[derive(Debug)]
pub enum VerifyAction {
    /// Session established; close the popup.
    Established { user: User },
    /// Keep the popup open and surface the failure on it.
    Failed { message: String },
}

// ============================================================================
// Key handling (signed-out screens)
// ============================================================================

pub fn handle_login_key(
    auth: &mut AuthState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => {
                auth.admin_mode = !auth.admin_mode;
                return (vec![], vec![]);
            }
            KeyCode::Char('r') => {
                return (vec![], goto(Screen::Register));
            }
            KeyCode::Char('f') => {
                return (vec![], goto(Screen::ForgotPassword));
            }
            _ => {}
        }
    }

    if auth.login.handle_key(key) {
        return (vec![], vec![]);
    }

    if key.code == KeyCode::Enter && !tasks.state(TaskKind::Login).is_running() {
        let effects = submit_login(auth).into_iter().collect();
        return (effects, vec![]);
    }

    (vec![], vec![])
}

pub fn handle_register_key(
    auth: &mut AuthState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if key.code == KeyCode::Esc {
        return (vec![], goto(Screen::Login));
    }

    if auth.register.handle_key(key) {
        return (vec![], vec![]);
    }

    if key.code == KeyCode::Enter && !tasks.state(TaskKind::Register).is_running() {
        let effects = submit_register(auth).into_iter().collect();
        return (effects, vec![]);
    }

    (vec![], vec![])
}

pub fn handle_forgot_key(
    auth: &mut AuthState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if key.code == KeyCode::Esc {
        return match auth.forgot.phase {
            ForgotPhase::Email => (vec![], goto(Screen::Login)),
            ForgotPhase::NewPassword => {
                auth.forgot.back_to_email();
                (vec![], vec![])
            }
        };
    }

    let consumed = match auth.forgot.phase {
        ForgotPhase::Email => auth.forgot.email_form.handle_key(key),
        ForgotPhase::NewPassword => auth.forgot.password_form.handle_key(key),
    };
    if consumed {
        return (vec![], vec![]);
    }

    if key.code == KeyCode::Enter {
        let busy = match auth.forgot.phase {
            ForgotPhase::Email => tasks.state(TaskKind::SendReset).is_running(),
            ForgotPhase::NewPassword => tasks.state(TaskKind::ResetPassword).is_running(),
        };
        if !busy {
            let effects = submit_forgot(auth).into_iter().collect();
            return (effects, vec![]);
        }
    }

    (vec![], vec![])
}

/// Esc on the approval screen abandons the wait and signs out locally.
pub fn handle_pending_key(
    auth: &mut AuthState,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if key.code == KeyCode::Esc {
        auth.pending.stop();
        return (
            vec![UiEffect::ClearSessionFile],
            vec![
                StateMutation::Session(SessionMutation::Clear),
                StateMutation::Nav(NavMutation::Goto(Screen::Login)),
                StateMutation::Status(StatusMutation::Info("Signed out.".to_string())),
            ],
        );
    }
    (vec![], vec![])
}

fn goto(screen: Screen) -> Vec<StateMutation> {
    vec![StateMutation::Nav(NavMutation::Goto(screen))]
}

// ============================================================================
// Submission helpers (validate, then build the effect)
// ============================================================================

fn submit_login(auth: &mut AuthState) -> Option<UiEffect> {
    let email_ok = auth.login.check(LOGIN_EMAIL, validate::email);
    let password_ok = auth.login.check(LOGIN_PASSWORD, validate::password);
    if !(email_ok && password_ok) {
        return None;
    }
    Some(UiEffect::SubmitLogin {
        task: None,
        email: auth.login.value(LOGIN_EMAIL).to_string(),
        password: auth.login.raw_value(LOGIN_PASSWORD).to_string(),
        admin: auth.admin_mode,
    })
}

fn submit_register(auth: &mut AuthState) -> Option<UiEffect> {
    let form = &mut auth.register;
    let name_ok = form.check(REGISTER_NAME, validate::name);
    let email_ok = form.check(REGISTER_EMAIL, validate::email);
    let phone_ok = form.check(REGISTER_PHONE, validate::phone);
    let password_ok = form.check(REGISTER_PASSWORD, validate::password);
    let confirm_ok = passwords_match(form, REGISTER_PASSWORD, REGISTER_CONFIRM);
    if !(name_ok && email_ok && phone_ok && password_ok && confirm_ok) {
        return None;
    }
    Some(UiEffect::SubmitRegister {
        task: None,
        request: RegisterRequest {
            name: form.value(REGISTER_NAME).to_string(),
            email: form.value(REGISTER_EMAIL).to_string(),
            phone_number: form.value(REGISTER_PHONE).to_string(),
            password: form.raw_value(REGISTER_PASSWORD).to_string(),
        },
    })
}

fn submit_forgot(auth: &mut AuthState) -> Option<UiEffect> {
    match auth.forgot.phase {
        ForgotPhase::Email => {
            if !auth.forgot.email_form.check(0, validate::email) {
                return None;
            }
            Some(UiEffect::SendResetCode {
                task: None,
                email: auth.forgot.email(),
            })
        }
        ForgotPhase::NewPassword => {
            let form = &mut auth.forgot.password_form;
            let password_ok = form.check(RESET_PASSWORD, validate::password);
            let confirm_ok = passwords_match(form, RESET_PASSWORD, RESET_CONFIRM);
            if !(password_ok && confirm_ok) {
                return None;
            }
            let otp = auth.forgot.otp.clone()?;
            Some(UiEffect::SubmitPasswordReset {
                task: None,
                email: auth.forgot.email(),
                otp,
                new_password: auth.forgot.password_form.raw_value(RESET_PASSWORD).to_string(),
            })
        }
    }
}

fn passwords_match(form: &mut Form, password: usize, confirm: usize) -> bool {
    if form.raw_value(password) == form.raw_value(confirm) {
        true
    } else {
        form.set_error(confirm, "Passwords do not match");
        false
    }
}

// ============================================================================
// Result handling
// ============================================================================

pub fn handle_login_result(
    result: Result<LoginResponse, ApiError>,
) -> (Vec<StateMutation>, ChallengeAction) {
    match result {
        Ok(resp) => challenge_or_session(resp, OtpPurpose::Login),
        Err(err) => (status_error(&err), ChallengeAction::None),
    }
}

pub fn handle_register_result(
    result: Result<LoginResponse, ApiError>,
) -> (Vec<StateMutation>, ChallengeAction) {
    match result {
        Ok(resp) => challenge_or_session(resp, OtpPurpose::Registration),
        Err(err) => (status_error(&err), ChallengeAction::None),
    }
}

pub fn handle_reset_code_result(
    result: Result<LoginResponse, ApiError>,
) -> (Vec<StateMutation>, ChallengeAction) {
    match result {
        Ok(resp) if resp.require_otp => match resp.data {
            Some(target) => (
                vec![],
                ChallengeAction::Open {
                    email: target.email,
                    purpose: OtpPurpose::PasswordReset,
                },
            ),
            None => (unexpected_response(), ChallengeAction::None),
        },
        Ok(_) => (unexpected_response(), ChallengeAction::None),
        Err(err) => (status_error(&err), ChallengeAction::None),
    }
}

pub fn handle_verify_result(
    result: Result<VerifyResponse, ApiError>,
) -> (Vec<StateMutation>, VerifyAction) {
    match result {
        Ok(resp) => {
            let user = resp.user.clone();
            (
                vec![
                    StateMutation::Session(SessionMutation::Establish {
                        access_token: resp.access_token,
                        user: resp.user,
                    }),
                    StateMutation::Auth(AuthMutation::ResetForms),
                    StateMutation::Nav(NavMutation::RouteBySession),
                ],
                VerifyAction::Established { user },
            )
        }
        Err(err) => (
            vec![],
            VerifyAction::Failed {
                message: err.display_message(),
            },
        ),
    }
}

pub fn handle_reset_result(result: Result<MessageResponse, ApiError>) -> Vec<StateMutation> {
    match result {
        Ok(_) => vec![
            StateMutation::Auth(AuthMutation::ResetForms),
            StateMutation::Nav(NavMutation::Goto(Screen::Login)),
            StateMutation::Status(StatusMutation::Info(
                "Password updated. Sign in with your new password.".to_string(),
            )),
        ],
        Err(err) => status_error(&err),
    }
}

/// Processes one approval poll answer. Returns true when the account
/// came back approved; failures keep polling silently.
pub fn handle_approval_result(
    pending: &mut PendingState,
    result: Result<User, ApiError>,
) -> (Vec<StateMutation>, bool) {
    match result {
        Ok(user) if user.registration_status.is_approved() => {
            pending.stop();
            (
                vec![
                    StateMutation::Session(SessionMutation::SetUser(user)),
                    StateMutation::Nav(NavMutation::RouteBySession),
                    StateMutation::Status(StatusMutation::Info(
                        "Account approved. Welcome!".to_string(),
                    )),
                ],
                true,
            )
        }
        Ok(_) => (vec![], false),
        Err(err) => {
            tracing::debug!(error = %err, "approval poll failed");
            (vec![], false)
        }
    }
}

fn challenge_or_session(
    resp: LoginResponse,
    purpose: OtpPurpose,
) -> (Vec<StateMutation>, ChallengeAction) {
    if resp.require_otp {
        return match resp.data {
            Some(target) => (
                vec![],
                ChallengeAction::Open {
                    email: target.email,
                    purpose,
                },
            ),
            None => (unexpected_response(), ChallengeAction::None),
        };
    }
    match (resp.access_token, resp.user) {
        (Some(access_token), Some(user)) => (
            vec![
                StateMutation::Session(SessionMutation::Establish {
                    access_token,
                    user: user.clone(),
                }),
                StateMutation::Auth(AuthMutation::ResetForms),
                StateMutation::Nav(NavMutation::RouteBySession),
            ],
            ChallengeAction::Established { user },
        ),
        _ => (unexpected_response(), ChallengeAction::None),
    }
}

fn status_error(err: &ApiError) -> Vec<StateMutation> {
    vec![StateMutation::Status(StatusMutation::Error(
        err.display_message(),
    ))]
}

fn unexpected_response() -> Vec<StateMutation> {
    vec![StateMutation::Status(StatusMutation::Error(
        "Unexpected response from the server.".to_string(),
    ))]
}
