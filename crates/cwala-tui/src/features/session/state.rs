use cwala_core::api::types::{Role, User};
use cwala_core::session::SessionCache;

use crate::state::Screen;

/// In-memory session slice, mirroring the on-disk cache.
///
/// Mutated only by the reducer; the runtime persists snapshots via
/// `UiEffect::SaveSession`.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub cache: SessionCache,
}

impl SessionState {
    pub fn new(cache: SessionCache) -> Self {
        Self { cache }
    }

    pub fn user(&self) -> Option<&User> {
        self.cache.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.cache.role()
    }

    /// Whether the signed-in user may see the team screen.
    pub fn manages_team(&self) -> bool {
        self.role().is_some_and(Role::manages_team)
    }

    /// Unread count for the given notification ids.
    pub fn unread_count<'a>(&self, ids: impl Iterator<Item = &'a str>) -> usize {
        ids.filter(|id| !self.cache.is_notification_read(id))
            .count()
    }
}

/// Resolves the screen a session is allowed to land on.
///
/// A signed-out session can never reach a protected screen, and an
/// unapproved account can never reach a role dashboard.
pub fn route_for(session: &SessionState) -> Screen {
    if !session.cache.is_authenticated() {
        return Screen::Login;
    }
    let approved = session
        .user()
        .is_some_and(|u| u.registration_status.is_approved());
    if approved { Screen::Home } else { Screen::PendingApproval }
}
