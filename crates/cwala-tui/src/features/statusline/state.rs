use std::time::{Duration, Instant};

/// How long info messages stay visible. Errors stay until replaced.
const INFO_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    kind: StatusKind,
    text: String,
    expires_at: Option<Instant>,
}

/// Status line message state. Mutated only by the reducer.
#[derive(Debug, Default, Clone)]
pub struct StatusLineState {
    message: Option<StatusMessage>,
}

impl StatusLineState {
    pub fn info(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
            expires_at: Some(now + INFO_TTL),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
            expires_at: None,
        });
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Drops an expired info message. Called on every tick.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(message) = &self.message
            && message.expires_at.is_some_and(|at| now >= at)
        {
            self.message = None;
        }
    }

    pub fn current(&self) -> Option<(StatusKind, &str)> {
        self.message.as_ref().map(|m| (m.kind, m.text.as_str()))
    }
}
