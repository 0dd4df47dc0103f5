//! Profile feature reducer: mode switching, form submission, call results.

use crossterm::event::{KeyCode, KeyEvent};
use cwala_core::api::ApiError;
use cwala_core::api::types::{MessageResponse, UpdateProfileRequest, User};
use cwala_core::validate;

use super::state::{
    EDIT_NAME, EDIT_PHONE, PW_CONFIRM, PW_CURRENT, PW_NEW, ProfileMode, ProfileState,
};
use crate::common::task::{TaskKind, Tasks};
use crate::effects::UiEffect;
use crate::features::session::SessionState;
use crate::mutations::{SessionMutation, StateMutation, StatusMutation};

pub fn handle_profile_key(
    profile: &mut ProfileState,
    session: &SessionState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match profile.mode {
        ProfileMode::View => handle_view_key(profile, session, tasks, key),
        ProfileMode::Edit => handle_edit_key(profile, tasks, key),
        ProfileMode::Password => handle_password_key(profile, tasks, key),
    }
}

fn handle_view_key(
    profile: &mut ProfileState,
    session: &SessionState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match key.code {
        KeyCode::Char('e') => {
            if let Some(user) = session.user() {
                profile.enter_edit(user);
            }
            (vec![], vec![])
        }
        KeyCode::Char('p') => {
            profile.enter_password();
            (vec![], vec![])
        }
        KeyCode::Char('r') if !tasks.state(TaskKind::ProfileFetch).is_running() => {
            (vec![UiEffect::FetchProfile { task: None }], vec![])
        }
        _ => (vec![], vec![]),
    }
}

fn handle_edit_key(
    profile: &mut ProfileState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if key.code == KeyCode::Esc {
        profile.back_to_view();
        return (vec![], vec![]);
    }
    if profile.edit.handle_key(key) {
        return (vec![], vec![]);
    }
    if key.code == KeyCode::Enter && !tasks.state(TaskKind::ProfileUpdate).is_running() {
        return (submit_edit(profile), vec![]);
    }
    (vec![], vec![])
}

fn handle_password_key(
    profile: &mut ProfileState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if key.code == KeyCode::Esc {
        profile.back_to_view();
        return (vec![], vec![]);
    }
    if profile.password.handle_key(key) {
        return (vec![], vec![]);
    }
    if key.code == KeyCode::Enter && !tasks.state(TaskKind::PasswordChange).is_running() {
        return (submit_password(profile), vec![]);
    }
    (vec![], vec![])
}

fn submit_edit(profile: &mut ProfileState) -> Vec<UiEffect> {
    let form = &mut profile.edit;
    let mut ok = form.check(EDIT_NAME, validate::name);
    ok &= form.check(EDIT_PHONE, validate::phone);
    if !ok {
        return vec![];
    }
    vec![UiEffect::SaveProfile {
        task: None,
        request: UpdateProfileRequest {
            name: form.value(EDIT_NAME).to_string(),
            phone_number: form.value(EDIT_PHONE).to_string(),
        },
    }]
}

fn submit_password(profile: &mut ProfileState) -> Vec<UiEffect> {
    let form = &mut profile.password;
    let mut ok = form.check(PW_CURRENT, |v| {
        if v.is_empty() {
            Err("Enter your current password")
        } else {
            Ok(())
        }
    });
    ok &= form.check(PW_NEW, validate::password);
    ok &= form.check(PW_CONFIRM, validate::password);
    if ok && form.raw_value(PW_NEW) != form.raw_value(PW_CONFIRM) {
        form.fields[PW_CONFIRM].error = Some("Passwords do not match");
        ok = false;
    }
    if !ok {
        return vec![];
    }
    vec![UiEffect::ChangePassword {
        task: None,
        old_password: form.raw_value(PW_CURRENT).to_string(),
        new_password: form.raw_value(PW_NEW).to_string(),
    }]
}

pub fn handle_profile_loaded(result: Result<User, ApiError>) -> Vec<StateMutation> {
    match result {
        Ok(user) => vec![StateMutation::Session(SessionMutation::SetUser(user))],
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

pub fn handle_profile_saved(
    profile: &mut ProfileState,
    result: Result<User, ApiError>,
) -> Vec<StateMutation> {
    match result {
        Ok(user) => {
            profile.back_to_view();
            vec![
                StateMutation::Session(SessionMutation::SetUser(user)),
                StateMutation::Status(StatusMutation::Info("Profile updated.".to_string())),
            ]
        }
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

pub fn handle_password_changed(
    profile: &mut ProfileState,
    result: Result<MessageResponse, ApiError>,
) -> Vec<StateMutation> {
    match result {
        Ok(_) => {
            profile.back_to_view();
            vec![StateMutation::Status(StatusMutation::Info(
                "Password changed.".to_string(),
            ))]
        }
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use cwala_core::api::types::{RegistrationStatus, Role};
    use cwala_core::session::SessionCache;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            role: Role::User,
            registration_status: RegistrationStatus::Approved,
        }
    }

    fn signed_in() -> SessionState {
        let mut cache = SessionCache::default();
        cache.access_token = Some("token".to_string());
        cache.user = Some(user());
        SessionState::new(cache)
    }

    fn type_str(form: &mut crate::common::forms::Form, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// `e` prefills the edit form and starts capturing keystrokes.
    #[test]
    fn test_edit_key_prefills_and_captures() {
        let mut profile = ProfileState::new();
        let session = signed_in();
        let tasks = Tasks::default();

        handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Char('e')));
        assert_eq!(profile.mode, ProfileMode::Edit);
        assert!(profile.capturing_input());
        assert_eq!(profile.edit.raw_value(EDIT_NAME), "Asha Verma");
    }

    /// Submitting an edit with a bad phone number stays local.
    #[test]
    fn test_edit_submit_rejects_bad_phone() {
        let mut profile = ProfileState::new();
        let session = signed_in();
        let tasks = Tasks::default();
        handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Char('e')));

        profile.edit.fields[EDIT_PHONE].value = "12345".to_string();
        let (effects, _) = handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(profile.edit.fields[EDIT_PHONE].error.is_some());
    }

    /// A valid edit submission carries the trimmed values.
    #[test]
    fn test_edit_submit_builds_request() {
        let mut profile = ProfileState::new();
        let session = signed_in();
        let tasks = Tasks::default();
        handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Char('e')));

        profile.edit.fields[EDIT_NAME].value = " Asha V ".to_string();
        let (effects, _) = handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SaveProfile { request, .. }]
                if request.name == "Asha V" && request.phone_number == "9876543210"
        ));
    }

    /// Mismatched password confirmation is caught before any call.
    #[test]
    fn test_password_submit_requires_matching_confirmation() {
        let mut profile = ProfileState::new();
        let session = signed_in();
        let tasks = Tasks::default();
        handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Char('p')));

        type_str(&mut profile.password, "old-secret");
        profile.password.handle_key(key(KeyCode::Tab));
        type_str(&mut profile.password, "new-secret");
        profile.password.handle_key(key(KeyCode::Tab));
        type_str(&mut profile.password, "new-secret-typo");

        let (effects, _) = handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(
            profile.password.fields[PW_CONFIRM].error,
            Some("Passwords do not match")
        );
    }

    /// A matching password pair produces the change-password call.
    #[test]
    fn test_password_submit_builds_effect() {
        let mut profile = ProfileState::new();
        let session = signed_in();
        let tasks = Tasks::default();
        handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Char('p')));

        type_str(&mut profile.password, "old-secret");
        profile.password.handle_key(key(KeyCode::Tab));
        type_str(&mut profile.password, "new-secret");
        profile.password.handle_key(key(KeyCode::Tab));
        type_str(&mut profile.password, "new-secret");

        let (effects, _) = handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ChangePassword {
                old_password,
                new_password,
                ..
            }] if old_password == "old-secret" && new_password == "new-secret"
        ));
    }

    /// Esc leaves a form mode without submitting.
    #[test]
    fn test_esc_returns_to_view() {
        let mut profile = ProfileState::new();
        let session = signed_in();
        let tasks = Tasks::default();
        handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Char('p')));

        let (effects, _) = handle_profile_key(&mut profile, &session, &tasks, key(KeyCode::Esc));
        assert!(effects.is_empty());
        assert_eq!(profile.mode, ProfileMode::View);
    }

    /// A saved profile updates the cached user and reports success.
    #[test]
    fn test_profile_saved_sets_user_and_returns_to_view() {
        let mut profile = ProfileState::new();
        profile.mode = ProfileMode::Edit;

        let mut updated = user();
        updated.name = "Asha V".to_string();
        let mutations = handle_profile_saved(&mut profile, Ok(updated));

        assert_eq!(profile.mode, ProfileMode::View);
        assert!(matches!(
            mutations.first(),
            Some(StateMutation::Session(SessionMutation::SetUser(u))) if u.name == "Asha V"
        ));
    }

    /// A rejected save keeps the form open so the values can be fixed.
    #[test]
    fn test_profile_save_failure_stays_in_edit() {
        let mut profile = ProfileState::new();
        profile.mode = ProfileMode::Edit;

        let mutations = handle_profile_saved(
            &mut profile,
            Err(ApiError::rejected(400, r#"{"message":"Phone in use"}"#)),
        );
        assert_eq!(profile.mode, ProfileMode::Edit);
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Status(StatusMutation::Error(msg))] if msg == "Phone in use"
        ));
    }

    /// A wrong current password surfaces the server message in place.
    #[test]
    fn test_password_change_failure_stays_in_form() {
        let mut profile = ProfileState::new();
        profile.mode = ProfileMode::Password;

        let mutations = handle_password_changed(
            &mut profile,
            Err(ApiError::rejected(401, r#"{"message":"Incorrect password"}"#)),
        );
        assert_eq!(profile.mode, ProfileMode::Password);
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Status(StatusMutation::Error(msg))] if msg == "Incorrect password"
        ));
    }
}
