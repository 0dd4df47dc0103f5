//! Notifications feature reducer.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use cwala_core::api::ApiError;
use cwala_core::api::types::Notification;

use super::state::NotificationsState;
use crate::common::task::{TaskKind, Tasks};
use crate::effects::UiEffect;
use crate::features::session::SessionState;
use crate::mutations::{SessionMutation, StateMutation, StatusMutation};

pub fn handle_notifications_key(
    notifications: &mut NotificationsState,
    session: &SessionState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            notifications.select_next();
            (vec![], vec![])
        }
        KeyCode::Char('k') | KeyCode::Up => {
            notifications.select_prev();
            (vec![], vec![])
        }
        KeyCode::Enter => match notifications.selected_notification() {
            Some(n) if !session.cache.is_notification_read(&n.id) => (
                vec![UiEffect::SaveSession],
                vec![StateMutation::Session(SessionMutation::MarkNotificationRead(
                    n.id.clone(),
                ))],
            ),
            _ => (vec![], vec![]),
        },
        KeyCode::Char('r') if !tasks.state(TaskKind::NotificationsFetch).is_running() => {
            (vec![UiEffect::FetchNotifications { task: None }], vec![])
        }
        _ => (vec![], vec![]),
    }
}

/// Applies a fetch result: stores the list and may raise the toast for the
/// newest unread notification.
pub fn handle_notifications_loaded(
    notifications: &mut NotificationsState,
    session: &SessionState,
    popup_ttl: Duration,
    now: Instant,
    result: Result<Vec<Notification>, ApiError>,
) -> Vec<StateMutation> {
    match result {
        Ok(items) => {
            notifications.set_items(items);
            notifications.maybe_show_popup(
                |id| session.cache.is_notification_read(id),
                now,
                popup_ttl,
            );
            vec![]
        }
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;
    use cwala_core::api::types::{RegistrationStatus, Role, User};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn notification(id: &str, hour: u32) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Title {id}"),
            message: "message".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap(),
        }
    }

    fn signed_in_session() -> SessionState {
        let mut session = SessionState::default();
        session.cache.establish(
            "token".to_string(),
            User {
                id: "u-1".to_string(),
                name: "Asha Verma".to_string(),
                email: "asha@example.com".to_string(),
                phone_number: "9876543210".to_string(),
                role: Role::User,
                registration_status: RegistrationStatus::Approved,
            },
        );
        session
    }

    /// Enter on an unread row marks it read and persists the session.
    #[test]
    fn test_enter_marks_unread_and_saves() {
        let mut notifications = NotificationsState::default();
        notifications.set_items(vec![notification("n-1", 12)]);
        let session = signed_in_session();
        let tasks = Tasks::default();

        let (effects, mutations) =
            handle_notifications_key(&mut notifications, &session, &tasks, key(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [UiEffect::SaveSession]));
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Session(SessionMutation::MarkNotificationRead(id))] if id == "n-1"
        ));
    }

    /// Enter on an already-read row is a no-op.
    #[test]
    fn test_enter_ignores_read_rows() {
        let mut notifications = NotificationsState::default();
        notifications.set_items(vec![notification("n-1", 12)]);
        let mut session = signed_in_session();
        session.cache.mark_notification_read("n-1");
        let tasks = Tasks::default();

        let (effects, mutations) =
            handle_notifications_key(&mut notifications, &session, &tasks, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(mutations.is_empty());
    }

    /// A fetch that finds an unread notification raises the toast.
    #[test]
    fn test_loaded_raises_popup_for_unread() {
        let mut notifications = NotificationsState::default();
        let session = signed_in_session();

        let mutations = handle_notifications_loaded(
            &mut notifications,
            &session,
            Duration::from_secs(6),
            Instant::now(),
            Ok(vec![notification("n-1", 12), notification("n-2", 8)]),
        );
        assert!(mutations.is_empty());
        assert_eq!(
            notifications.popup.as_ref().map(|p| p.id.as_str()),
            Some("n-1")
        );
    }

    /// Fetch failures surface on the status line and keep the old list.
    #[test]
    fn test_loaded_failure_keeps_list() {
        let mut notifications = NotificationsState::default();
        notifications.set_items(vec![notification("n-1", 12)]);
        let session = signed_in_session();

        let mutations = handle_notifications_loaded(
            &mut notifications,
            &session,
            Duration::from_secs(6),
            Instant::now(),
            Err(ApiError::rejected(500, "")),
        );
        assert_eq!(notifications.items.len(), 1);
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Status(StatusMutation::Error(_))]
        ));
    }
}
