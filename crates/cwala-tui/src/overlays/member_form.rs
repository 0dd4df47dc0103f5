//! Add-member form popup (admin/TL only).

use crossterm::event::{KeyCode, KeyEvent};
use cwala_core::api::types::{AddMemberRequest, Role};
use cwala_core::validate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::PopupChrome;
use crate::common::forms::{Field, Form, form_lines};
use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::state::TuiState;

pub const MEMBER_NAME: usize = 0;
pub const MEMBER_EMAIL: usize = 1;
pub const MEMBER_PHONE: usize = 2;

/// State for the add-member popup.
#[derive(Debug)]
pub struct MemberFormState {
    pub form: Form,
    /// Role for the new account, toggled with Left/Right.
    pub role: Role,
}

impl MemberFormState {
    pub fn open() -> Self {
        Self {
            form: Form::new(vec![
                Field::new("Full name"),
                Field::new("Email"),
                Field::new("Phone number"),
            ]),
            role: Role::User,
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc => return OverlayUpdate::close(),
            KeyCode::Left | KeyCode::Right => {
                self.toggle_role();
                return OverlayUpdate::stay();
            }
            _ => {}
        }
        if self.form.handle_key(key) {
            return OverlayUpdate::stay();
        }
        if key.code == KeyCode::Enter && !tui.tasks.state(TaskKind::MemberAdd).is_running() {
            return self.submit();
        }
        OverlayUpdate::stay()
    }

    pub fn handle_paste(&mut self, text: &str) -> OverlayUpdate {
        self.form.paste(text);
        OverlayUpdate::stay()
    }

    fn toggle_role(&mut self) {
        self.role = match self.role {
            Role::User => Role::TeamLead,
            _ => Role::User,
        };
    }

    fn submit(&mut self) -> OverlayUpdate {
        let form = &mut self.form;
        let mut ok = form.check(MEMBER_NAME, validate::name);
        ok &= form.check(MEMBER_EMAIL, validate::email);
        ok &= form.check(MEMBER_PHONE, validate::phone);
        if !ok {
            return OverlayUpdate::stay();
        }
        OverlayUpdate::close().with_ui_effects(vec![UiEffect::AddMember {
            task: None,
            request: AddMemberRequest {
                name: form.value(MEMBER_NAME).to_string(),
                email: form.value(MEMBER_EMAIL).to_string(),
                phone_number: form.value(MEMBER_PHONE).to_string(),
                role: self.role,
            },
        }])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let content = PopupChrome::new("Add team member", accent)
            .size(52, 15)
            .hints(&[("Enter", "add"), ("←/→", "role"), ("Esc", "cancel")])
            .draw(frame, area);

        let mut lines = form_lines(&self.form, accent);
        let label_width = self.form.label_width();
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{:<label_width$}", "Role"),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  "),
            Span::styled("◄ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.role.label().to_string(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ►", Style::default().fg(Color::DarkGray)),
        ]));

        frame.render_widget(Paragraph::new(lines), content);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use cwala_core::config::Config;
    use cwala_core::session::SessionCache;

    use super::super::OverlayTransition;
    use super::*;

    fn tui() -> TuiState {
        TuiState::new(Config::default(), SessionCache::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut MemberFormState, tui: &TuiState, text: &str) {
        for c in text.chars() {
            state.handle_key(tui, key(KeyCode::Char(c)));
        }
    }

    /// A complete form closes the popup and submits the new member.
    #[test]
    fn test_submit_builds_request() {
        let tui = tui();
        let mut state = MemberFormState::open();

        type_str(&mut state, &tui, "Ravi Kumar");
        state.handle_key(&tui, key(KeyCode::Tab));
        type_str(&mut state, &tui, "ravi@example.com");
        state.handle_key(&tui, key(KeyCode::Tab));
        type_str(&mut state, &tui, "9876543210");
        state.handle_key(&tui, key(KeyCode::Right));

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::AddMember { request, .. }]
                if request.name == "Ravi Kumar" && request.role == Role::TeamLead
        ));
    }

    /// Validation failures keep the popup open with field errors.
    #[test]
    fn test_invalid_email_stays_open() {
        let tui = tui();
        let mut state = MemberFormState::open();

        type_str(&mut state, &tui, "Ravi Kumar");
        state.handle_key(&tui, key(KeyCode::Tab));
        type_str(&mut state, &tui, "not-an-email");
        state.handle_key(&tui, key(KeyCode::Tab));
        type_str(&mut state, &tui, "9876543210");

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(update.effects.is_empty());
        assert!(state.form.fields[MEMBER_EMAIL].error.is_some());
    }

    /// Left/Right flip the role both ways.
    #[test]
    fn test_role_toggle() {
        let tui = tui();
        let mut state = MemberFormState::open();
        assert_eq!(state.role, Role::User);

        state.handle_key(&tui, key(KeyCode::Right));
        assert_eq!(state.role, Role::TeamLead);
        state.handle_key(&tui, key(KeyCode::Left));
        assert_eq!(state.role, Role::User);
    }
}
