//! Profile feature state.

use cwala_core::api::types::User;

use crate::common::forms::{Field, Form};

/// Field order in the edit form.
pub const EDIT_NAME: usize = 0;
pub const EDIT_PHONE: usize = 1;

/// Field order in the change-password form.
pub const PW_CURRENT: usize = 0;
pub const PW_NEW: usize = 1;
pub const PW_CONFIRM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode {
    View,
    Edit,
    Password,
}

/// Profile screen state: read-only view plus two form modes.
#[derive(Debug)]
pub struct ProfileState {
    pub mode: ProfileMode,
    pub edit: Form,
    pub password: Form,
}

impl ProfileState {
    pub fn new() -> Self {
        Self {
            mode: ProfileMode::View,
            edit: edit_form("", ""),
            password: password_form(),
        }
    }

    /// Whether the profile screen currently owns plain keystrokes.
    pub fn capturing_input(&self) -> bool {
        !matches!(self.mode, ProfileMode::View)
    }

    /// Enters edit mode with the current values prefilled.
    pub fn enter_edit(&mut self, user: &User) {
        self.edit = edit_form(&user.name, &user.phone_number);
        self.mode = ProfileMode::Edit;
    }

    /// Enters change-password mode with empty fields.
    pub fn enter_password(&mut self) {
        self.password = password_form();
        self.mode = ProfileMode::Password;
    }

    pub fn back_to_view(&mut self) {
        self.mode = ProfileMode::View;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::new()
    }
}

fn edit_form(name: &str, phone: &str) -> Form {
    Form::new(vec![
        Field::with_value("Full name", name),
        Field::with_value("Phone number", phone),
    ])
}

fn password_form() -> Form {
    Form::new(vec![
        Field::masked("Current password"),
        Field::masked("New password"),
        Field::masked("Confirm password"),
    ])
}

#[cfg(test)]
mod tests {
    use cwala_core::api::types::{RegistrationStatus, Role};

    use super::*;

    #[test]
    fn test_enter_edit_prefills_current_values() {
        let user = User {
            id: "u-1".to_string(),
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            role: Role::User,
            registration_status: RegistrationStatus::Approved,
        };
        let mut profile = ProfileState::new();
        assert!(!profile.capturing_input());

        profile.enter_edit(&user);
        assert!(profile.capturing_input());
        assert_eq!(profile.edit.raw_value(EDIT_NAME), "Asha Verma");
        assert_eq!(profile.edit.raw_value(EDIT_PHONE), "9876543210");
    }

    #[test]
    fn test_enter_password_resets_fields() {
        let mut profile = ProfileState::new();
        profile.enter_password();
        profile.password.fields[PW_NEW].value = "secret".to_string();

        profile.back_to_view();
        profile.enter_password();
        assert_eq!(profile.password.raw_value(PW_NEW), "");
    }
}
