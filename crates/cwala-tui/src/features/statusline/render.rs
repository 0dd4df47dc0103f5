//! Status line rendering (bottom row of every screen).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::StatusKind;
use crate::state::{Screen, TuiState};

/// Spinner frames for status line animation.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame advance.
const SPINNER_SPEED_DIVISOR: usize = 4;

/// Renders the status line at the bottom of the screen.
///
/// Priority: a running background task wins the line, then the most recent
/// status message, then keyboard hints for the current screen.
pub fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let spinner_idx = (state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
    let spinner = SPINNER_FRAMES[spinner_idx];

    let spans: Vec<Span> = if let Some(kind) = state.tasks.running_kind() {
        let mut spans = vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(
                format!("{}...", kind.label()),
                Style::default().fg(Color::Cyan),
            ),
        ];
        if state.tasks.state(kind).cancel.is_some() {
            spans.extend([
                Span::raw("  "),
                Span::styled("Esc", Style::default().fg(Color::DarkGray)),
                Span::raw(" to cancel"),
            ]);
        }
        spans
    } else if let Some((kind, text)) = state.statusline.current() {
        let style = match kind {
            StatusKind::Info => Style::default().fg(Color::Gray),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        vec![Span::styled(text.to_string(), style)]
    } else {
        hint_spans(state)
    };

    let status = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(status, area);
}

/// Keyboard hints for the current screen, shown when nothing else needs the line.
fn hint_spans(state: &TuiState) -> Vec<Span<'static>> {
    let key = Style::default().fg(Color::DarkGray);
    match state.screen {
        Screen::Login => vec![
            Span::styled("Enter", key),
            Span::raw(" sign in  "),
            Span::styled("Ctrl+A", key),
            Span::raw(" admin  "),
            Span::styled("Ctrl+R", key),
            Span::raw(" register  "),
            Span::styled("Ctrl+F", key),
            Span::raw(" reset password"),
        ],
        Screen::Register | Screen::ForgotPassword => vec![
            Span::styled("Enter", key),
            Span::raw(" submit  "),
            Span::styled("Esc", key),
            Span::raw(" back"),
        ],
        Screen::PendingApproval => vec![
            Span::styled("Esc", key),
            Span::raw(" back to sign-in  "),
            Span::styled("Ctrl+C", key),
            Span::raw(" quit"),
        ],
        Screen::Home | Screen::Team | Screen::Notifications | Screen::Profile => vec![
            Span::styled("1-4", key),
            Span::raw(" switch view  "),
            Span::styled("r", key),
            Span::raw(" refresh  "),
            Span::styled("t", key),
            Span::raw(" theme  "),
            Span::styled("Ctrl+L", key),
            Span::raw(" log out"),
        ],
    }
}
