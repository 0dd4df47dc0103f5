//! Modal popups.
//!
//! While an overlay is up it owns the keyboard; the screens underneath
//! keep rendering but receive nothing. Each popup returns an
//! [`OverlayUpdate`] from its key handler instead of touching state:
//! the reducer applies the mutations, performs the transition and queues
//! the effects, in that order.
//!
//! - `otp.rs`: one-time-code entry (login, registration, reset)
//! - `confirm.rs`: yes/no confirmation (logout, member removal)
//! - `member_form.rs`: add-member form
//! - `render_utils.rs`: shared popup chrome (border, title, hint footer)

pub mod confirm;
pub mod member_form;
pub mod otp;
pub mod render_utils;

pub use confirm::{ConfirmAction, ConfirmState};
use crossterm::event::KeyEvent;
pub use member_form::MemberFormState;
pub use otp::{OTP_LEN, OtpState, RESEND_COOLDOWN, ResendAction};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::render::palette;
use crate::state::TuiState;

/// Which popup a handler wants opened next.
#[derive(Debug)]
pub enum OverlayRequest {
    MemberForm,
    ConfirmRemoveMember { id: String, name: String },
    ConfirmLogout,
}

/// What happens to the popup after a key press.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Everything a popup key handler wants done, described, not executed.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    /// Applied by the reducer before the transition.
    pub mutations: Vec<StateMutation>,
    /// Queued after mutations and transition have settled.
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            ..Self::stay()
        }
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self {
            transition: OverlayTransition::Open(request),
            ..Self::stay()
        }
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// The active popup.
#[derive(Debug)]
pub enum Overlay {
    Otp(OtpState),
    Confirm(ConfirmState),
    MemberForm(MemberFormState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let pal = palette(tui.config.theme);
        match self {
            Overlay::Otp(o) => o.render(
                frame,
                area,
                pal.accent,
                tui.tasks.state(TaskKind::VerifyOtp).is_running(),
            ),
            Overlay::Confirm(c) => c.render(frame, area),
            Overlay::MemberForm(m) => m.render(frame, area, pal.accent),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Otp(o) => o.handle_key(tui, key),
            Overlay::Confirm(c) => c.handle_key(tui, key),
            Overlay::MemberForm(m) => m.handle_key(tui, key),
        }
    }

    /// Confirmation popups ignore pasted text rather than treating it
    /// as an answer.
    pub fn handle_paste(&mut self, tui: &TuiState, text: &str) -> OverlayUpdate {
        match self {
            Overlay::Otp(o) => o.handle_paste(tui, text),
            Overlay::MemberForm(m) => m.handle_paste(text),
            Overlay::Confirm(_) => OverlayUpdate::stay(),
        }
    }

    pub fn as_otp_mut(&mut self) -> Option<&mut OtpState> {
        match self {
            Overlay::Otp(o) => Some(o),
            _ => None,
        }
    }
}

/// Lets the render path treat "no overlay" as a no-op draw.
pub trait OverlayExt {
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tui);
        }
    }
}

/// Routes a key press to the active overlay, if any.
pub fn handle_overlay_key(
    tui: &TuiState,
    overlay: &mut Option<Overlay>,
    key: KeyEvent,
) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|o| o.handle_key(tui, key))
}
