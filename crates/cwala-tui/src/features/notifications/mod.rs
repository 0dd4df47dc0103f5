//! Notifications feature slice: list screen, unread tracking, toast popup.

mod render;
mod state;
mod update;

pub use render::{render_notification_popup, render_notifications};
pub use state::{NotificationPopup, NotificationsState};
pub use update::{handle_notifications_key, handle_notifications_loaded};
