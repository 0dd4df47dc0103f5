//! Pure view/render functions for the TUI.
//!
//! This module contains all rendering logic. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never mutate state or return effects
//!
//! Layout: optional header bar (signed-in screens only), screen body,
//! one-line status bar. The notification toast and any overlay draw on
//! top of the whole frame, overlay last.

use cwala_core::config::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::features::auth::{render_forgot, render_login, render_pending, render_register};
use crate::features::dashboard::render_home;
use crate::features::notifications::{render_notification_popup, render_notifications};
use crate::features::profile::render_profile;
use crate::features::statusline::render_status_line;
use crate::features::team::render_team;
use crate::overlays::OverlayExt;
use crate::state::{AppState, Screen, TuiState};

/// Height of the header bar on signed-in screens (content + separator).
const HEADER_HEIGHT: u16 = 2;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Colors derived from the configured theme.
///
/// Semantic colors stay fixed across themes: errors red, warnings and
/// pending states yellow, money green.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: Color::Cyan,
            text: Color::White,
            dim: Color::DarkGray,
        },
        Theme::Light => Palette {
            accent: Color::Blue,
            text: Color::Black,
            dim: Color::Gray,
        },
    }
}

/// Renders the entire TUI to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
/// No mutations, no side effects.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let header_height = if state.screen.is_signed_in() {
        HEADER_HEIGHT
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    if state.screen.is_signed_in() {
        render_header(state, frame, chunks[0]);
    }

    match state.screen {
        Screen::Login => render_login(state, frame, chunks[1]),
        Screen::Register => render_register(state, frame, chunks[1]),
        Screen::ForgotPassword => render_forgot(state, frame, chunks[1]),
        Screen::PendingApproval => render_pending(state, frame, chunks[1]),
        Screen::Home => render_home(state, frame, padded(chunks[1])),
        Screen::Team => render_team(state, frame, padded(chunks[1])),
        Screen::Notifications => render_notifications(state, frame, padded(chunks[1])),
        Screen::Profile => render_profile(state, frame, padded(chunks[1])),
    }

    render_status_line(state, frame, chunks[2]);

    // The toast sits under any overlay.
    render_notification_popup(state, frame, area);
    app.overlay.render(frame, area, state);
}

/// Centers a fixed-size box in `area`, clamped to fit.
pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Bordered block with a bold title, shared by the sign-in screens.
pub fn titled_block(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(border).add_modifier(Modifier::BOLD))
}

/// Fixed digit per tab; hidden tabs keep their digit so muscle memory
/// survives role changes.
fn header_tabs() -> [(Screen, char, &'static str); 4] {
    [
        (Screen::Home, '1', "Home"),
        (Screen::Team, '2', "Team"),
        (Screen::Notifications, '3', "Notifications"),
        (Screen::Profile, '4', "Profile"),
    ]
}

fn render_header(state: &TuiState, frame: &mut Frame, area: Rect) {
    let pal = palette(state.config.theme);
    if area.height == 0 {
        return;
    }

    let mut spans: Vec<Span> = vec![
        Span::styled(
            "cwala",
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    for (screen, digit, label) in header_tabs() {
        if screen == Screen::Team && !state.session.manages_team() {
            continue;
        }
        let style = if state.screen == screen {
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.dim)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("{digit} {label}"), style));
    }
    let top = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), top);

    if let Some(user) = state.session.user() {
        let who = Line::from(vec![
            Span::styled(user.name.clone(), Style::default().fg(pal.text)),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", user.role.label()),
                Style::default().fg(pal.dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(who).alignment(Alignment::Right), top);
    }

    if area.height > 1 {
        let sep = "─".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                sep,
                Style::default().fg(pal.dim),
            ))),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
    }
}

fn padded(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(1),
    )
}
