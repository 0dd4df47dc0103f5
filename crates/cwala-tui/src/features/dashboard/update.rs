//! Home screen reducer: refresh only, navigation is global.

use crossterm::event::{KeyCode, KeyEvent};

use crate::common::task::{TaskKind, Tasks};
use crate::effects::UiEffect;
use crate::features::session::SessionState;

pub fn handle_home_key(session: &SessionState, tasks: &Tasks, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('r') => refresh_home(session, tasks),
        _ => vec![],
    }
}

/// Re-fetches everything the home screen summarizes, skipping calls
/// that are already in flight.
pub fn refresh_home(session: &SessionState, tasks: &Tasks) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if !tasks.state(TaskKind::WalletFetch).is_running() {
        effects.push(UiEffect::FetchWallet { task: None });
    }
    if !tasks.state(TaskKind::NotificationsFetch).is_running() {
        effects.push(UiEffect::FetchNotifications { task: None });
    }
    if session.manages_team() && !tasks.state(TaskKind::TeamFetch).is_running() {
        effects.push(UiEffect::FetchTeam { task: None });
    }
    effects
}
