//! TUI runtime: owns the terminal and executes effects.
//!
//! The reducer never performs I/O; everything it wants done comes back as
//! a `UiEffect` and lands here. API calls are spawned onto tokio and
//! report through a single unbounded inbox channel the loop drains every
//! frame, so there is exactly one place async results re-enter the app.
//!
//! - `mod.rs`: the loop, effect dispatch, task spawning
//! - `inbox.rs`: the channel aliases
//! - `handlers.rs`: one async fn per API call

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use cwala_core::api::ApiClient;
use cwala_core::config::Config;
use cwala_core::session::SessionCache;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::task::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while a call is in flight or the user is typing.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence when nothing is happening. The approval poll and the
/// toast timer ride this; both are far coarser than 100ms.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen dashboard runtime.
///
/// Construction claims the terminal; Drop gives it back, including on
/// panic via the installed hook.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Cloned into every spawned handler.
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    /// Drives the fast/idle tick decision while the user types.
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Claims the terminal and builds the initial state from the loaded
    /// config and cached session.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn new(config: Config, cache: SessionCache) -> Result<Self> {
        // The hook must be in place before the alternate screen is
        // entered, or a panic during setup leaves raw mode on.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to claim the terminal")?;

        let state = AppState::new(config, cache);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn run(&mut self) -> Result<()> {
        // Kick off the initial fetches (or the approval wait) for the
        // restored screen before any input arrives.
        let effects = update::startup(&mut self.state);
        self.apply_effects(effects);

        self.main_loop()
    }

    fn main_loop(&mut self) -> Result<()> {
        let mut needs_redraw = true;

        while !self.state.tui.should_quit {
            let batch = self.gather_events()?;

            for event in batch {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Renders happen on Tick only; input events mutate state
                // and wait for the next tick to paint. Ticks arrive every
                // 16ms during interaction, so the lag is invisible.
                let is_tick = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if is_tick {
                    needs_redraw = true;
                }
                self.apply_effects(effects);
            }

            if needs_redraw {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                needs_redraw = false;
            }
        }

        Ok(())
    }

    /// One pass over all event sources: inbox, terminal, tick clock.
    fn gather_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut batch = Vec::new();

        // Spinners and form echo need 60fps; an idle dashboard does not.
        let recently_active = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let cadence = if self.state.tui.tasks.is_any_running() || recently_active {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(event) = self.inbox_rx.try_recv() {
            batch.push(event);
        }

        // Block on the terminal until the tick is due, unless something
        // already needs processing. Input wakes the poll early; the clock
        // check below fires the Tick either way once its time comes.
        let until_tick = cadence.saturating_sub(self.last_tick.elapsed());
        let wait = if batch.is_empty() {
            until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(wait)? {
            batch.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                batch.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= cadence {
            batch.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(batch)
    }

    fn apply_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    /// Client without credentials, for the auth endpoints.
    fn anon_client(&self) -> ApiClient {
        ApiClient::from_config(&self.state.tui.config)
    }

    /// Client with the current session token attached.
    fn api_client(&self) -> ApiClient {
        self.anon_client()
            .with_token(self.state.tui.session.cache.access_token.clone())
    }

    /// Spawns one API call with the TaskStarted/TaskCompleted lifecycle.
    ///
    /// TaskStarted goes into the inbox before the spawn, so the reducer
    /// always sees the start before the completion, even for a call that
    /// finishes immediately.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let inbox = self.inbox_tx.clone();
        let token = cancelable.then(CancellationToken::new);
        let _ = inbox.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted {
                id,
                cancel: token.clone(),
            },
        });
        tokio::spawn(async move {
            let outcome = f(token).await;
            let _ = inbox.send(UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(outcome),
                },
            });
        });
    }

    fn apply_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Auth calls
            UiEffect::SubmitLogin {
                task,
                email,
                password,
                admin,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.anon_client();
                self.spawn_task(TaskKind::Login, task, false, move |_| {
                    handlers::login(client, email, password, admin)
                });
            }
            UiEffect::SubmitRegister { task, request } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.anon_client();
                self.spawn_task(TaskKind::Register, task, false, move |_| {
                    handlers::register(client, request)
                });
            }
            UiEffect::SubmitOtp {
                task,
                email,
                otp,
                purpose,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.anon_client();
                self.spawn_task(TaskKind::VerifyOtp, task, true, move |cancel| {
                    handlers::verify_otp(client, email, otp, purpose, cancel)
                });
            }
            UiEffect::SendResetCode { task, email } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.anon_client();
                self.spawn_task(TaskKind::SendReset, task, false, move |_| {
                    handlers::send_reset_code(client, email)
                });
            }
            UiEffect::SubmitPasswordReset {
                task,
                email,
                otp,
                new_password,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.anon_client();
                self.spawn_task(TaskKind::ResetPassword, task, false, move |_| {
                    handlers::reset_password(client, email, otp, new_password)
                });
            }
            UiEffect::Logout { task, access_token } => {
                let Some(task) = task else {
                    return;
                };
                // The token rides in the effect; the session cache is
                // already cleared at this point.
                let client = self.anon_client().with_token(access_token);
                self.spawn_task(TaskKind::Logout, task, false, move |_| {
                    handlers::logout(client)
                });
            }
            UiEffect::CheckApproval { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::ApprovalPoll, task, false, move |_| {
                    handlers::check_approval(client)
                });
            }

            // Dashboard data calls
            UiEffect::FetchProfile { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::ProfileFetch, task, false, move |_| {
                    handlers::fetch_profile(client)
                });
            }
            UiEffect::SaveProfile { task, request } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::ProfileUpdate, task, false, move |_| {
                    handlers::save_profile(client, request)
                });
            }
            UiEffect::ChangePassword {
                task,
                old_password,
                new_password,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::PasswordChange, task, false, move |_| {
                    handlers::change_password(client, old_password, new_password)
                });
            }
            UiEffect::FetchTeam { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::TeamFetch, task, false, move |_| {
                    handlers::fetch_team(client)
                });
            }
            UiEffect::AddMember { task, request } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::MemberAdd, task, false, move |_| {
                    handlers::add_member(client, request)
                });
            }
            UiEffect::RemoveMember { task, id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::MemberRemove, task, false, move |_| {
                    handlers::remove_member(client, id)
                });
            }
            UiEffect::FetchWallet { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::WalletFetch, task, false, move |_| {
                    handlers::fetch_wallet(client)
                });
            }
            UiEffect::FetchNotifications { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.api_client();
                self.spawn_task(TaskKind::NotificationsFetch, task, false, move |_| {
                    handlers::fetch_notifications(client)
                });
            }

            // Persistence
            UiEffect::SaveSession => {
                // State is final here; every mutation from this update has
                // already applied.
                if let Err(err) = self.state.tui.session.cache.save() {
                    tracing::warn!(error = %err, "failed to persist session");
                }
            }
            UiEffect::ClearSessionFile => {
                if let Err(err) = SessionCache::clear() {
                    tracing::warn!(error = %err, "failed to delete session file");
                }
            }
            UiEffect::PersistTheme { theme } => {
                // The theme is already active on screen; a failed write
                // only costs persistence across restarts.
                let _ = Config::save_theme(theme);
            }

            UiEffect::CancelTask { token, .. } => {
                if let Some(token) = token {
                    token.cancel();
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
