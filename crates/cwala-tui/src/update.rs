//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use cwala_core::api::types::{OtpPurpose, RegisterRequest, User};
use cwala_core::config::Theme;
use cwala_core::session::SessionCache;

use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, DataUiEvent, UiEvent};
use crate::features::auth::{self, ChallengeAction, ForgotPhase, VerifyAction};
use crate::features::dashboard;
use crate::features::notifications;
use crate::features::profile::{self, ProfileMode};
use crate::features::session::route_for;
use crate::features::team;
use crate::mutations::{AuthMutation, NavMutation, SessionMutation, StateMutation, StatusMutation};
use crate::overlays::{
    self, ConfirmState, MemberFormState, Overlay, OtpState, OverlayRequest, ResendAction,
};
use crate::state::{AppState, Screen, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute. Handlers leave task id slots empty; this is
/// the one place ids are allocated, so every spawned call gets a fresh one.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let mut effects = dispatch(app, event);
    for effect in &mut effects {
        if let Some(slot) = effect.task_slot()
            && slot.is_none()
        {
            *slot = Some(app.tui.task_seq.next_id());
        }
    }
    effects
}

/// Effects to run once at startup, after state is built from disk.
///
/// A resumed session lands directly on its screen; this arms the approval
/// timers or spawns the first dashboard fetches accordingly.
pub fn startup(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    match app.tui.screen {
        Screen::PendingApproval => app.tui.auth.pending.start(Instant::now()),
        Screen::Home => {
            effects.extend(dashboard::refresh_home(&app.tui.session, &app.tui.tasks));
        }
        _ => {}
    }
    for effect in &mut effects {
        if let Some(slot) = effect.task_slot()
            && slot.is_none()
        {
            *slot = Some(app.tui.task_seq.next_id());
        }
    }
    effects
}

fn dispatch(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            let now = Instant::now();
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.statusline.on_tick(now);
            app.tui.notifications.on_tick(now);
            handle_approval_tick(&mut app.tui, now)
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = {
                let state = app.tui.tasks.state_mut(kind);
                state.finish_if_active(completed.id)
            };
            if !ok {
                vec![]
            } else {
                update(app, *completed.result)
            }
        }
        UiEvent::Auth(auth_event) => handle_auth_event(app, auth_event),
        UiEvent::Data(data_event) => handle_data_event(app, data_event),
    }
}

// ============================================================================
// Tick
// ============================================================================

/// Drives the approval-wait timers: fires due polls and enforces the
/// give-up deadline.
fn handle_approval_tick(tui: &mut TuiState, now: Instant) -> Vec<UiEffect> {
    if !tui.auth.pending.is_active() || tui.screen != Screen::PendingApproval {
        return vec![];
    }
    if tui.auth.pending.timed_out(now) {
        tui.auth.pending.stop();
        apply_mutations(
            tui,
            vec![
                StateMutation::Session(SessionMutation::Clear),
                StateMutation::Nav(NavMutation::Goto(Screen::Login)),
                StateMutation::Status(StatusMutation::Error(
                    "Account still awaiting approval. Sign in again later.".to_string(),
                )),
            ],
        );
        return vec![UiEffect::ClearSessionFile];
    }
    if tui.auth.pending.poll_due(now) && !tui.tasks.state(TaskKind::ApprovalPoll).is_running() {
        tui.auth.pending.schedule_next(now);
        return vec![UiEffect::CheckApproval { task: None }];
    }
    vec![]
}

// ============================================================================
// Auth results
// ============================================================================

fn handle_auth_event(app: &mut AppState, event: AuthUiEvent) -> Vec<UiEffect> {
    match event {
        AuthUiEvent::LoginResult(result) => {
            let (mutations, action) = auth::handle_login_result(result);
            apply_mutations(&mut app.tui, mutations);
            handle_challenge_action(app, action)
        }
        AuthUiEvent::RegisterResult(result) => {
            let (mutations, action) = auth::handle_register_result(result);
            apply_mutations(&mut app.tui, mutations);
            handle_challenge_action(app, action)
        }
        AuthUiEvent::ResetCodeResult(result) => {
            let (mutations, action) = auth::handle_reset_code_result(result);
            apply_mutations(&mut app.tui, mutations);
            handle_challenge_action(app, action)
        }
        AuthUiEvent::VerifyResult(result) => {
            let (mutations, action) = auth::handle_verify_result(result);
            apply_mutations(&mut app.tui, mutations);
            match action {
                VerifyAction::Established { user } => {
                    app.overlay = None;
                    session_started(&mut app.tui, &user)
                }
                VerifyAction::Failed { message } => {
                    match app.overlay.as_mut().and_then(Overlay::as_otp_mut) {
                        Some(otp) => otp.reject(message),
                        None => apply_mutations(
                            &mut app.tui,
                            vec![StateMutation::Status(StatusMutation::Error(message))],
                        ),
                    }
                    vec![]
                }
            }
        }
        AuthUiEvent::ResetResult(result) => {
            let mutations = auth::handle_reset_result(result);
            apply_mutations(&mut app.tui, mutations);
            vec![]
        }
        AuthUiEvent::LogoutResult(result) => {
            // Best effort; the local session is already gone.
            if let Err(err) = result {
                tracing::debug!(error = %err, "server logout failed");
            }
            vec![]
        }
        AuthUiEvent::ApprovalResult(result) => {
            // Stale answer: the user already left the approval screen.
            if !app.tui.auth.pending.is_active() {
                return vec![];
            }
            let (mutations, approved) =
                auth::handle_approval_result(&mut app.tui.auth.pending, result);
            apply_mutations(&mut app.tui, mutations);
            if approved {
                let mut effects = vec![UiEffect::SaveSession];
                effects.extend(dashboard::refresh_home(&app.tui.session, &app.tui.tasks));
                effects
            } else {
                vec![]
            }
        }
    }
}

/// Opens or refreshes the code popup for a server challenge.
fn handle_challenge_action(app: &mut AppState, action: ChallengeAction) -> Vec<UiEffect> {
    match action {
        ChallengeAction::Open { email, purpose } => {
            // A popup already waiting on the same challenge refreshes in
            // place; this is how a resend answer lands.
            if let Some(otp) = app.overlay.as_mut().and_then(Overlay::as_otp_mut)
                && otp.purpose == purpose
            {
                otp.refresh();
                apply_mutations(
                    &mut app.tui,
                    vec![StateMutation::Status(StatusMutation::Info(format!(
                        "Code re-sent to {email}."
                    )))],
                );
                return vec![];
            }
            let resend = resend_action_for(&app.tui, purpose);
            app.overlay = Some(Overlay::Otp(OtpState::open(email, purpose, resend)));
            vec![]
        }
        ChallengeAction::Established { user } => session_started(&mut app.tui, &user),
        ChallengeAction::None => vec![],
    }
}

/// Rebuilds the submission that minted the current challenge, for resend.
fn resend_action_for(tui: &TuiState, purpose: OtpPurpose) -> ResendAction {
    match purpose {
        OtpPurpose::Login => ResendAction::Login {
            email: tui.auth.login.value(auth::LOGIN_EMAIL).to_string(),
            password: tui.auth.login.raw_value(auth::LOGIN_PASSWORD).to_string(),
            admin: tui.auth.admin_mode,
        },
        OtpPurpose::Registration => ResendAction::Register(RegisterRequest {
            name: tui.auth.register.value(auth::REGISTER_NAME).to_string(),
            email: tui.auth.register.value(auth::REGISTER_EMAIL).to_string(),
            phone_number: tui.auth.register.value(auth::REGISTER_PHONE).to_string(),
            password: tui.auth.register.raw_value(auth::REGISTER_PASSWORD).to_string(),
        }),
        OtpPurpose::PasswordReset => ResendAction::Reset {
            email: tui.auth.forgot.email(),
        },
    }
}

/// A session was just established. Persists it, greets, and loads the
/// dashboards (or arms the approval wait for an unapproved account).
fn session_started(tui: &mut TuiState, user: &User) -> Vec<UiEffect> {
    let mut effects = vec![UiEffect::SaveSession];
    if user.registration_status.is_approved() {
        tui.statusline
            .info(format!("Signed in as {}.", user.name), Instant::now());
        effects.extend(dashboard::refresh_home(&tui.session, &tui.tasks));
    } else {
        tui.auth.pending.start(Instant::now());
    }
    effects
}

// ============================================================================
// Data results
// ============================================================================

fn handle_data_event(app: &mut AppState, event: DataUiEvent) -> Vec<UiEffect> {
    match event {
        DataUiEvent::ProfileLoaded(result) => {
            let mutations = profile::handle_profile_loaded(result);
            let effects = save_if_session_changed(&mutations);
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        DataUiEvent::ProfileSaved(result) => {
            let mutations = profile::handle_profile_saved(&mut app.tui.profile, result);
            let effects = save_if_session_changed(&mutations);
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        DataUiEvent::PasswordChanged(result) => {
            let mutations = profile::handle_password_changed(&mut app.tui.profile, result);
            apply_mutations(&mut app.tui, mutations);
            vec![]
        }
        DataUiEvent::TeamLoaded(result) => {
            let mutations = team::handle_team_loaded(&mut app.tui.team, result);
            apply_mutations(&mut app.tui, mutations);
            vec![]
        }
        DataUiEvent::MemberAdded(result) => {
            let mutations = team::handle_member_added(&mut app.tui.team, result);
            apply_mutations(&mut app.tui, mutations);
            vec![]
        }
        DataUiEvent::MemberRemoved { id, result } => {
            let mutations = team::handle_member_removed(&mut app.tui.team, &id, result);
            apply_mutations(&mut app.tui, mutations);
            vec![]
        }
        DataUiEvent::WalletLoaded(result) => match result {
            Ok(balance) => {
                apply_mutations(
                    &mut app.tui,
                    vec![StateMutation::Session(SessionMutation::SetWallet(balance))],
                );
                vec![UiEffect::SaveSession]
            }
            Err(err) => {
                // The cached balance stays on screen.
                apply_mutations(
                    &mut app.tui,
                    vec![StateMutation::Status(StatusMutation::Error(
                        err.display_message(),
                    ))],
                );
                vec![]
            }
        },
        DataUiEvent::NotificationsLoaded(result) => {
            let popup_ttl = Duration::from_secs(app.tui.config.notification_popup_secs);
            let mutations = notifications::handle_notifications_loaded(
                &mut app.tui.notifications,
                &app.tui.session,
                popup_ttl,
                Instant::now(),
                result,
            );
            apply_mutations(&mut app.tui, mutations);
            vec![]
        }
    }
}

/// Session-cache mutations are the ones worth persisting.
fn save_if_session_changed(mutations: &[StateMutation]) -> Vec<UiEffect> {
    if mutations
        .iter()
        .any(|m| matches!(m, StateMutation::Session(_)))
    {
        vec![UiEffect::SaveSession]
    } else {
        vec![]
    }
}

// ============================================================================
// Mutations
// ============================================================================

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Session(mutation) => apply_session_mutation(tui, mutation),
            StateMutation::Auth(mutation) => apply_auth_mutation(tui, mutation),
            StateMutation::Nav(mutation) => apply_nav_mutation(tui, mutation),
            StateMutation::Status(mutation) => apply_status_mutation(tui, mutation),
        }
    }
}

fn apply_session_mutation(tui: &mut TuiState, mutation: SessionMutation) {
    match mutation {
        SessionMutation::Establish { access_token, user } => {
            tui.session.cache.establish(access_token, user);
        }
        SessionMutation::SetUser(user) => {
            tui.session.cache.user = Some(user);
        }
        SessionMutation::SetWallet(balance) => {
            tui.session.cache.wallet_balance = Some(balance);
        }
        SessionMutation::MarkNotificationRead(id) => {
            tui.session.cache.mark_notification_read(&id);
        }
        SessionMutation::Clear => {
            // Dropping the session also drops everything fetched with it.
            tui.session.cache = SessionCache::default();
            tui.team.clear();
            tui.notifications.clear();
            tui.profile.clear();
            tui.auth.reset_forms();
        }
    }
}

fn apply_auth_mutation(tui: &mut TuiState, mutation: AuthMutation) {
    match mutation {
        AuthMutation::AdvanceResetWithCode { otp } => tui.auth.forgot.advance_with_code(otp),
        AuthMutation::ResetForms => tui.auth.reset_forms(),
    }
}

fn apply_nav_mutation(tui: &mut TuiState, mutation: NavMutation) {
    match mutation {
        NavMutation::Goto(screen) => tui.screen = screen,
        NavMutation::RouteBySession => tui.screen = route_for(&tui.session),
    }
}

fn apply_status_mutation(tui: &mut TuiState, mutation: StatusMutation) {
    match mutation {
        StatusMutation::Info(text) => tui.statusline.info(text, Instant::now()),
        StatusMutation::Error(text) => tui.statusline.error(text),
        StatusMutation::Clear => tui.statusline.clear(),
    }
}

// ============================================================================
// Overlay plumbing
// ============================================================================

fn apply_overlay_update(app: &mut AppState, update: overlays::OverlayUpdate) -> Vec<UiEffect> {
    let mut effects = update.effects;
    match update.transition {
        overlays::OverlayTransition::Stay => {}
        overlays::OverlayTransition::Close => {
            // Closing the code popup abandons any in-flight verification;
            // clearing the slot makes the late completion a no-op.
            if matches!(app.overlay.as_ref(), Some(Overlay::Otp(_))) {
                let verify = app.tui.tasks.state_mut(TaskKind::VerifyOtp);
                if verify.is_running() {
                    effects.push(UiEffect::CancelTask {
                        kind: TaskKind::VerifyOtp,
                        token: verify.cancel.clone(),
                    });
                    verify.clear();
                }
            }
            app.overlay = None;
        }
        overlays::OverlayTransition::Open(request) => {
            effects.extend(open_overlay_request(app, request));
        }
    }
    effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    match request {
        OverlayRequest::MemberForm => {
            app.overlay = Some(Overlay::MemberForm(MemberFormState::open()));
        }
        OverlayRequest::ConfirmRemoveMember { id, name } => {
            app.overlay = Some(Overlay::Confirm(ConfirmState::remove_member(id, name)));
        }
        OverlayRequest::ConfirmLogout => {
            app.overlay = Some(Overlay::Confirm(ConfirmState::logout()));
        }
    }
    vec![]
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => handle_paste(app, &text),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits, mid-call or under an overlay included.
    if ctrl && key.code == KeyCode::Char('c') {
        app.tui.should_quit = true;
        return vec![UiEffect::Quit];
    }

    // An active overlay takes the keyboard first.
    if let Some(mut update) = overlays::handle_overlay_key(&app.tui, &mut app.overlay, key) {
        apply_mutations(&mut app.tui, std::mem::take(&mut update.mutations));
        return apply_overlay_update(app, update);
    }

    // The toast dismisses on Enter/Esc without marking anything read.
    if app.tui.notifications.popup.is_some() && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        app.tui.notifications.dismiss_popup();
        return vec![];
    }

    match app.tui.screen {
        Screen::Login => {
            let (effects, mutations) =
                auth::handle_login_key(&mut app.tui.auth, &app.tui.tasks, key);
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        Screen::Register => {
            let (effects, mutations) =
                auth::handle_register_key(&mut app.tui.auth, &app.tui.tasks, key);
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        Screen::ForgotPassword => {
            let (effects, mutations) =
                auth::handle_forgot_key(&mut app.tui.auth, &app.tui.tasks, key);
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        Screen::PendingApproval => {
            let (effects, mutations) = auth::handle_pending_key(&mut app.tui.auth, key);
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        Screen::Home | Screen::Team | Screen::Notifications | Screen::Profile => {
            handle_dashboard_key(app, key)
        }
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Profile form modes own plain keystrokes; global keys stand back.
    let capturing = app.tui.screen == Screen::Profile && app.tui.profile.capturing_input();
    if !capturing {
        if ctrl && key.code == KeyCode::Char('l') {
            return open_overlay_request(app, OverlayRequest::ConfirmLogout);
        }
        match key.code {
            KeyCode::Char('1') => return goto_screen(&mut app.tui, Screen::Home),
            KeyCode::Char('2') if app.tui.session.manages_team() => {
                return goto_screen(&mut app.tui, Screen::Team);
            }
            KeyCode::Char('3') => return goto_screen(&mut app.tui, Screen::Notifications),
            KeyCode::Char('4') => return goto_screen(&mut app.tui, Screen::Profile),
            KeyCode::Char('t') => return toggle_theme(&mut app.tui),
            _ => {}
        }
    }

    match app.tui.screen {
        Screen::Home => dashboard::handle_home_key(&app.tui.session, &app.tui.tasks, key),
        Screen::Team => {
            let (effects, request) = team::handle_team_key(&mut app.tui.team, &app.tui.tasks, key);
            match request {
                Some(request) => {
                    let mut all = effects;
                    all.extend(open_overlay_request(app, request));
                    all
                }
                None => effects,
            }
        }
        Screen::Notifications => {
            let (effects, mutations) = notifications::handle_notifications_key(
                &mut app.tui.notifications,
                &app.tui.session,
                &app.tui.tasks,
                key,
            );
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        Screen::Profile => {
            let (effects, mutations) = profile::handle_profile_key(
                &mut app.tui.profile,
                &app.tui.session,
                &app.tui.tasks,
                key,
            );
            apply_mutations(&mut app.tui, mutations);
            effects
        }
        _ => vec![],
    }
}

/// Switches to a dashboard screen and spawns its entry fetches.
fn goto_screen(tui: &mut TuiState, screen: Screen) -> Vec<UiEffect> {
    if tui.screen == screen {
        return vec![];
    }
    tui.screen = screen;
    entry_effects(tui, screen)
}

/// What to fetch when a screen comes on display. Home refreshes the
/// wallet every visit; list screens fetch once and then rely on `r`.
fn entry_effects(tui: &TuiState, screen: Screen) -> Vec<UiEffect> {
    match screen {
        Screen::Home if !tui.tasks.state(TaskKind::WalletFetch).is_running() => {
            vec![UiEffect::FetchWallet { task: None }]
        }
        Screen::Team
            if !tui.team.loaded && !tui.tasks.state(TaskKind::TeamFetch).is_running() =>
        {
            vec![UiEffect::FetchTeam { task: None }]
        }
        Screen::Notifications
            if !tui.notifications.loaded
                && !tui.tasks.state(TaskKind::NotificationsFetch).is_running() =>
        {
            vec![UiEffect::FetchNotifications { task: None }]
        }
        _ => vec![],
    }
}

fn toggle_theme(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.config.theme = match tui.config.theme {
        Theme::Dark => Theme::Light,
        Theme::Light => Theme::Dark,
    };
    vec![UiEffect::PersistTheme {
        theme: tui.config.theme,
    }]
}

fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if let Some(overlay) = app.overlay.as_mut() {
        let mut update = overlay.handle_paste(&app.tui, text);
        apply_mutations(&mut app.tui, std::mem::take(&mut update.mutations));
        return apply_overlay_update(app, update);
    }

    match app.tui.screen {
        Screen::Login => app.tui.auth.login.paste(text),
        Screen::Register => app.tui.auth.register.paste(text),
        Screen::ForgotPassword => match app.tui.auth.forgot.phase {
            ForgotPhase::Email => app.tui.auth.forgot.email_form.paste(text),
            ForgotPhase::NewPassword => app.tui.auth.forgot.password_form.paste(text),
        },
        Screen::Profile => match app.tui.profile.mode {
            ProfileMode::Edit => app.tui.profile.edit.paste(text),
            ProfileMode::Password => app.tui.profile.password.paste(text),
            ProfileMode::View => {}
        },
        _ => {}
    }
    vec![]
}
