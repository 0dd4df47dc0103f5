//! One-time-code popup shared by login, registration and password reset.
//!
//! The popup owns the typed digits and the resend cooldown. Verification
//! results come back through the reducer, which calls `reject` or closes
//! the popup; the popup itself never talks to the API.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cwala_core::api::types::{OtpPurpose, RegisterRequest};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::PopupChrome;
use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::mutations::{AuthMutation, StateMutation};
use crate::state::TuiState;

/// Number of digits in a code.
pub const OTP_LEN: usize = 4;

/// Cooldown between resend requests.
pub const RESEND_COOLDOWN: Duration = Duration::from_secs(30);

/// How to repeat the original submission when the user asks for a new code.
#[derive(Debug, Clone)]
pub enum ResendAction {
    Login {
        email: String,
        password: String,
        admin: bool,
    },
    Register(RegisterRequest),
    Reset {
        email: String,
    },
}

impl ResendAction {
    fn effect(&self) -> UiEffect {
        match self {
            ResendAction::Login {
                email,
                password,
                admin,
            } => UiEffect::SubmitLogin {
                task: None,
                email: email.clone(),
                password: password.clone(),
                admin: *admin,
            },
            ResendAction::Register(request) => UiEffect::SubmitRegister {
                task: None,
                request: request.clone(),
            },
            ResendAction::Reset { email } => UiEffect::SendResetCode {
                task: None,
                email: email.clone(),
            },
        }
    }
}

/// State for the one-time-code popup.
#[derive(Debug)]
pub struct OtpState {
    /// Digits typed so far, capped at `OTP_LEN`.
    pub code: String,
    /// Server rejection shown inside the popup.
    pub error: Option<String>,
    /// Where the code was sent.
    pub email: String,
    pub purpose: OtpPurpose,
    /// Earliest instant a resend is allowed.
    pub resend_at: Instant,
    resend: ResendAction,
}

impl OtpState {
    pub fn open(email: String, purpose: OtpPurpose, resend: ResendAction) -> Self {
        Self {
            code: String::new(),
            error: None,
            email,
            purpose,
            resend_at: Instant::now() + RESEND_COOLDOWN,
            resend,
        }
    }

    /// A fresh code landed for the same challenge (resend answered).
    pub fn refresh(&mut self) {
        self.code.clear();
        self.error = None;
    }

    /// A verification attempt was rejected; the code restarts from empty.
    pub fn reject(&mut self, message: String) {
        self.error = Some(message);
        self.code.clear();
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('r') if ctrl => self.request_resend(Instant::now()),
            KeyCode::Backspace => {
                self.code.pop();
                self.error = None;
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if c.is_ascii_digit() && !ctrl => self.push_digit(c, tui),
            _ => OverlayUpdate::stay(),
        }
    }

    /// Pasting a code works like typing it: digits only, capped.
    pub fn handle_paste(&mut self, tui: &TuiState, text: &str) -> OverlayUpdate {
        let mut update = OverlayUpdate::stay();
        for c in text.chars().filter(|c| c.is_ascii_digit()) {
            update = self.push_digit(c, tui);
        }
        update
    }

    fn push_digit(&mut self, c: char, tui: &TuiState) -> OverlayUpdate {
        if self.code.len() >= OTP_LEN {
            return OverlayUpdate::stay();
        }
        self.error = None;
        self.code.push(c);
        if self.code.len() < OTP_LEN {
            return OverlayUpdate::stay();
        }
        self.submit(tui)
    }

    /// The fourth digit submits on its own, no Enter required.
    fn submit(&mut self, tui: &TuiState) -> OverlayUpdate {
        match self.purpose {
            // The reset flow collects the code locally; the server sees it
            // together with the new password in one call.
            OtpPurpose::PasswordReset => {
                OverlayUpdate::close().with_mutations(vec![StateMutation::Auth(
                    AuthMutation::AdvanceResetWithCode {
                        otp: self.code.clone(),
                    },
                )])
            }
            OtpPurpose::Login | OtpPurpose::Registration => {
                if tui.tasks.state(TaskKind::VerifyOtp).is_running() {
                    return OverlayUpdate::stay();
                }
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::SubmitOtp {
                    task: None,
                    email: self.email.clone(),
                    otp: self.code.clone(),
                    purpose: self.purpose,
                }])
            }
        }
    }

    fn request_resend(&mut self, now: Instant) -> OverlayUpdate {
        if now < self.resend_at {
            self.error = Some("Wait a moment before requesting another code.".to_string());
            return OverlayUpdate::stay();
        }
        self.resend_at = now + RESEND_COOLDOWN;
        self.code.clear();
        self.error = None;
        OverlayUpdate::stay().with_ui_effects(vec![self.resend.effect()])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color, verifying: bool) {
        let content = PopupChrome::new("Enter code", accent)
            .size(46, 10)
            .hints(&[("Ctrl+R", "resend code"), ("Esc", "cancel")])
            .draw(frame, area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("We sent a {OTP_LEN}-digit code to"),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::raw(self.email.clone())),
            Line::from(""),
            self.code_line(accent),
            Line::from(""),
        ];

        if verifying {
            lines.push(Line::from(Span::styled(
                "Verifying...",
                Style::default().fg(Color::DarkGray),
            )));
        } else if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "The last digit submits the code.",
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), content);
    }

    fn code_line(&self, accent: Color) -> Line<'static> {
        let mut spans = Vec::with_capacity(OTP_LEN * 2);
        for i in 0..OTP_LEN {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            match self.code.chars().nth(i) {
                Some(d) => spans.push(Span::styled(
                    format!("[{d}]"),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )),
                None => spans.push(Span::styled(
                    "[ ]".to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            }
        }
        Line::from(spans)
    }
}
