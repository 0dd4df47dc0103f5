//! Notifications feature state: the list screen and the toast popup.

use std::time::{Duration, Instant};

use cwala_core::api::types::Notification;

/// One toast, shown over whatever screen is active.
#[derive(Debug, Clone)]
pub struct NotificationPopup {
    pub id: String,
    pub title: String,
    pub message: String,
    pub deadline: Instant,
}

#[derive(Debug, Default)]
pub struct NotificationsState {
    /// Newest first.
    pub items: Vec<Notification>,
    pub selected: usize,
    pub loaded: bool,
    pub popup: Option<NotificationPopup>,
    /// Each notification pops up at most once per run.
    last_popup_id: Option<String>,
}

impl NotificationsState {
    /// Replaces the list, keeping newest first.
    pub fn set_items(&mut self, mut items: Vec<Notification>) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.items = items;
        self.loaded = true;
        self.clamp_selection();
    }

    pub fn selected_notification(&self) -> Option<&Notification> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Shows the newest unread notification as a toast, at most once per id.
    pub fn maybe_show_popup(
        &mut self,
        is_read: impl Fn(&str) -> bool,
        now: Instant,
        ttl: Duration,
    ) {
        let Some(newest_unread) = self.items.iter().find(|n| !is_read(&n.id)) else {
            return;
        };
        if self.last_popup_id.as_deref() == Some(newest_unread.id.as_str()) {
            return;
        }
        self.last_popup_id = Some(newest_unread.id.clone());
        self.popup = Some(NotificationPopup {
            id: newest_unread.id.clone(),
            title: newest_unread.title.clone(),
            message: newest_unread.message.clone(),
            deadline: now + ttl,
        });
    }

    /// Closes the popup once its deadline passes.
    pub fn on_tick(&mut self, now: Instant) {
        if self.popup.as_ref().is_some_and(|p| now >= p.deadline) {
            self.popup = None;
        }
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn clamp_selection(&mut self) {
        if self.items.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.items.len() {
            self.selected = self.items.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn notification(id: &str, hour: u32) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Title {id}"),
            message: "message".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_set_items_sorts_newest_first() {
        let mut state = NotificationsState::default();
        state.set_items(vec![
            notification("old", 8),
            notification("new", 12),
            notification("mid", 10),
        ]);
        let ids: Vec<&str> = state.items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn test_popup_shows_newest_unread_once() {
        let now = Instant::now();
        let ttl = Duration::from_secs(6);
        let mut state = NotificationsState::default();
        state.set_items(vec![notification("new", 12), notification("old", 8)]);

        // "new" is read, so "old" pops
        state.maybe_show_popup(|id| id == "new", now, ttl);
        assert_eq!(state.popup.as_ref().map(|p| p.id.as_str()), Some("old"));

        // Dismissed popups do not reappear for the same id
        state.dismiss_popup();
        state.maybe_show_popup(|id| id == "new", now, ttl);
        assert!(state.popup.is_none());
    }

    #[test]
    fn test_popup_expires_on_tick() {
        let now = Instant::now();
        let ttl = Duration::from_secs(6);
        let mut state = NotificationsState::default();
        state.set_items(vec![notification("n", 12)]);
        state.maybe_show_popup(|_| false, now, ttl);
        assert!(state.popup.is_some());

        state.on_tick(now + Duration::from_secs(5));
        assert!(state.popup.is_some());
        state.on_tick(now + ttl);
        assert!(state.popup.is_none());
    }

    #[test]
    fn test_no_popup_when_everything_read() {
        let mut state = NotificationsState::default();
        state.set_items(vec![notification("n", 12)]);
        state.maybe_show_popup(|_| true, Instant::now(), Duration::from_secs(6));
        assert!(state.popup.is_none());
    }
}
