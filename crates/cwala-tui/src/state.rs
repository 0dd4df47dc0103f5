//! Application state composition.
//!
//! Top-level state hierarchy:
//! - `AppState` - combined state (`TuiState` + overlay)
//! - `TuiState` - non-overlay UI state (screen, session, feature slices)
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── screen: Screen             (which view is on display)
//! │   ├── auth: AuthState            (sign-in, registration, reset flows)
//! │   ├── session: SessionState      (token, cached user, wallet, read ids)
//! │   ├── team: TeamState            (member table)
//! │   ├── notifications: NotificationsState
//! │   ├── profile: ProfileState      (view/edit/password modes)
//! │   ├── statusline: StatusLineState
//! │   ├── task_seq: TaskSeq          (async task id generator)
//! │   └── tasks: Tasks               (task lifecycle state)
//! └── overlay: Option<Overlay>       (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can take `&mut self` and `&TuiState` without borrow conflicts.

use cwala_core::config::Config;
use cwala_core::session::SessionCache;

use crate::common::task::{TaskSeq, Tasks};
use crate::features::auth::AuthState;
use crate::features::notifications::NotificationsState;
use crate::features::profile::ProfileState;
use crate::features::session::{SessionState, route_for};
use crate::features::statusline::StatusLineState;
use crate::features::team::TeamState;
use crate::overlays::Overlay;

/// The views the dashboard can show.
///
/// The first four render without the header chrome; the rest require an
/// established session and share the header, nav tabs and status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    ForgotPassword,
    PendingApproval,
    Home,
    Team,
    Notifications,
    Profile,
}

impl Screen {
    /// Whether this screen sits behind the session guard.
    pub fn is_signed_in(self) -> bool {
        matches!(
            self,
            Screen::Home | Screen::Team | Screen::Notifications | Screen::Profile
        )
    }
}

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, cache: SessionCache) -> Self {
        Self {
            tui: TuiState::new(config, cache),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// View currently on display.
    pub screen: Screen,
    /// Sign-in, registration, reset and approval-wait flows.
    pub auth: AuthState,
    /// In-memory session, mirroring the on-disk cache.
    pub session: SessionState,
    pub team: TeamState,
    pub notifications: NotificationsState,
    pub profile: ProfileState,
    /// Transient status-line message.
    pub statusline: StatusLineState,
    /// Task id sequence for async calls.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async calls.
    pub tasks: Tasks,
    pub config: Config,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    /// Builds the initial state from loaded config and session cache.
    ///
    /// The starting screen comes from the route guard, so a cached
    /// session skips the login form entirely.
    pub fn new(config: Config, cache: SessionCache) -> Self {
        let session = SessionState::new(cache);
        let screen = route_for(&session);
        Self {
            should_quit: false,
            screen,
            auth: AuthState::new(),
            session,
            team: TeamState::default(),
            notifications: NotificationsState::default(),
            profile: ProfileState::default(),
            statusline: StatusLineState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            config,
            spinner_frame: 0,
        }
    }
}
