//! Yes/no confirmation popup (logout, member removal).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::PopupChrome;
use crate::effects::UiEffect;
use crate::mutations::{NavMutation, SessionMutation, StateMutation, StatusMutation};
use crate::state::{Screen, TuiState};

#[derive(Debug, Clone)]
pub enum ConfirmAction {
    Logout,
    RemoveMember { id: String, name: String },
}

/// State for a confirmation popup.
#[derive(Debug)]
pub struct ConfirmState {
    pub title: &'static str,
    pub body: String,
    action: ConfirmAction,
}

impl ConfirmState {
    pub fn logout() -> Self {
        Self {
            title: "Sign out",
            body: "Sign out on this device? The saved session will be removed.".to_string(),
            action: ConfirmAction::Logout,
        }
    }

    pub fn remove_member(id: String, name: String) -> Self {
        Self {
            title: "Remove member",
            body: format!("Remove {name} from the team? This cannot be undone."),
            action: ConfirmAction::RemoveMember { id, name },
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => self.confirm(tui),
            KeyCode::Esc | KeyCode::Char('n') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    fn confirm(&self, tui: &TuiState) -> OverlayUpdate {
        match &self.action {
            ConfirmAction::Logout => {
                // The token rides in the effect: by the time it executes
                // the local session is already cleared.
                let access_token = tui.session.cache.access_token.clone();
                OverlayUpdate::close()
                    .with_mutations(vec![
                        StateMutation::Session(SessionMutation::Clear),
                        StateMutation::Nav(NavMutation::Goto(Screen::Login)),
                        StateMutation::Status(StatusMutation::Info("Signed out.".to_string())),
                    ])
                    .with_ui_effects(vec![
                        UiEffect::Logout {
                            task: None,
                            access_token,
                        },
                        UiEffect::ClearSessionFile,
                    ])
            }
            ConfirmAction::RemoveMember { id, .. } => {
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::RemoveMember {
                    task: None,
                    id: id.clone(),
                }])
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let content = PopupChrome::new(self.title, Color::Yellow)
            .size(52, 8)
            .hints(&[("Enter", "confirm"), ("Esc", "cancel")])
            .draw(frame, area);

        let body = Paragraph::new(Line::from(Span::raw(self.body.clone())))
            .style(Style::default())
            .wrap(Wrap { trim: true });
        frame.render_widget(body, content);
    }
}
