//! Profile feature view: read-only details plus the two form modes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::ProfileMode;
use crate::common::forms::form_lines;
use crate::render::palette;
use crate::state::TuiState;

const LABEL_WIDTH: usize = 16;

pub fn render_profile(state: &TuiState, frame: &mut Frame, area: Rect) {
    let pal = palette(state.config.theme);
    if area.height < 4 {
        return;
    }

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            title_for(state.profile.mode),
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match state.profile.mode {
        ProfileMode::View => view_lines(state, &mut lines, pal.accent, pal.text, pal.dim),
        ProfileMode::Edit => {
            lines.extend(form_lines(&state.profile.edit, pal.accent));
            lines.push(submit_hint(pal.accent, pal.dim, "save"));
        }
        ProfileMode::Password => {
            lines.extend(form_lines(&state.profile.password, pal.accent));
            lines.push(submit_hint(pal.accent, pal.dim, "change password"));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn title_for(mode: ProfileMode) -> &'static str {
    match mode {
        ProfileMode::View => "Profile",
        ProfileMode::Edit => "Edit profile",
        ProfileMode::Password => "Change password",
    }
}

fn view_lines(
    state: &TuiState,
    lines: &mut Vec<Line<'static>>,
    accent: Color,
    text: Color,
    dim: Color,
) {
    let Some(user) = state.session.user() else {
        lines.push(Line::from(Span::styled(
            "Loading profile...",
            Style::default().fg(dim),
        )));
        return;
    };

    lines.push(detail_row("Full name", user.name.clone(), text, dim));
    lines.push(detail_row("Email", user.email.clone(), text, dim));
    lines.push(detail_row("Phone", user.phone_number.clone(), text, dim));
    lines.push(detail_row("Role", user.role.label().to_string(), text, dim));

    let (status, status_color) = if user.registration_status.is_approved() {
        ("approved", Color::Green)
    } else {
        ("pending approval", Color::Yellow)
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{:<LABEL_WIDTH$}", "Status"),
            Style::default().fg(dim),
        ),
        Span::raw("  "),
        Span::styled(status, Style::default().fg(status_color)),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("e", Style::default().fg(accent)),
        Span::styled(" edit  ", Style::default().fg(dim)),
        Span::styled("p", Style::default().fg(accent)),
        Span::styled(" change password", Style::default().fg(dim)),
    ]));
}

fn detail_row(label: &'static str, value: String, text: Color, dim: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{label:<LABEL_WIDTH$}"), Style::default().fg(dim)),
        Span::raw("  "),
        Span::styled(value, Style::default().fg(text)),
    ])
}

fn submit_hint(accent: Color, dim: Color, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("Enter", Style::default().fg(accent)),
        Span::styled(format!(" {action}  "), Style::default().fg(dim)),
        Span::styled("Esc", Style::default().fg(accent)),
        Span::styled(" back", Style::default().fg(dim)),
    ])
}
