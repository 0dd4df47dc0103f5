//! Team feature view: the member table.

use cwala_core::api::types::User;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::text::fit_to_width;
use crate::render::palette;
use crate::state::TuiState;

const PHONE_WIDTH: usize = 12;
const ROLE_WIDTH: usize = 11;
const STATUS_WIDTH: usize = 9;

pub fn render_team(state: &TuiState, frame: &mut Frame, area: Rect) {
    let team = &state.team;
    let pal = palette(state.config.theme);
    if area.height < 4 {
        return;
    }

    let mut lines: Vec<Line<'static>> = vec![Line::from(Span::styled(
        format!("Team members ({})", team.members.len()),
        Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));

    if !team.loaded {
        lines.push(Line::from(Span::styled(
            "Loading team members...",
            Style::default().fg(pal.dim),
        )));
    } else if team.members.is_empty() {
        lines.push(Line::from(Span::styled(
            "No team members yet. Press a to add one.",
            Style::default().fg(pal.dim),
        )));
    } else {
        let (name_w, email_w) = flex_widths(area.width as usize);
        lines.push(header_row(name_w, email_w, pal.dim));

        // Keep the selected row on screen: title, blank, header, hints
        let visible = area.height.saturating_sub(5) as usize;
        let offset = (team.selected + 1).saturating_sub(visible.max(1));
        for (idx, member) in team.members.iter().enumerate().skip(offset).take(visible) {
            lines.push(member_row(
                member,
                idx == team.selected,
                name_w,
                email_w,
                pal.accent,
                pal.text,
            ));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("a", Style::default().fg(pal.accent)),
        Span::styled(" add  ", Style::default().fg(pal.dim)),
        Span::styled("d", Style::default().fg(pal.accent)),
        Span::styled(" remove  ", Style::default().fg(pal.dim)),
        Span::styled("j/k", Style::default().fg(pal.accent)),
        Span::styled(" select", Style::default().fg(pal.dim)),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}

fn flex_widths(total: usize) -> (usize, usize) {
    // Pointer column (2) + three gaps of two around the fixed columns
    let fixed = 2 + PHONE_WIDTH + ROLE_WIDTH + STATUS_WIDTH + 8;
    let flex = total.saturating_sub(fixed);
    let name_w = (flex * 2 / 5).clamp(10, 24);
    let email_w = flex.saturating_sub(name_w).max(12);
    (name_w, email_w)
}

fn header_row(name_w: usize, email_w: usize, dim: Color) -> Line<'static> {
    let text = format!(
        "  {}  {}  {}  {}  {}",
        fit_to_width("NAME", name_w),
        fit_to_width("EMAIL", email_w),
        fit_to_width("PHONE", PHONE_WIDTH),
        fit_to_width("ROLE", ROLE_WIDTH),
        fit_to_width("STATUS", STATUS_WIDTH),
    );
    Line::from(Span::styled(text, Style::default().fg(dim)))
}

fn member_row(
    member: &User,
    selected: bool,
    name_w: usize,
    email_w: usize,
    accent: Color,
    text: Color,
) -> Line<'static> {
    let pointer = if selected { "> " } else { "  " };
    let row_style = if selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(text)
    };
    let status_style = if member.registration_status.is_approved() {
        row_style
    } else {
        Style::default().fg(Color::Yellow)
    };

    Line::from(vec![
        Span::styled(pointer.to_string(), Style::default().fg(accent)),
        Span::styled(
            format!(
                "{}  {}  {}  {}  ",
                fit_to_width(&member.name, name_w),
                fit_to_width(&member.email, email_w),
                fit_to_width(&member.phone_number, PHONE_WIDTH),
                fit_to_width(member.role.label(), ROLE_WIDTH),
            ),
            row_style,
        ),
        Span::styled(
            fit_to_width(
                if member.registration_status.is_approved() {
                    "approved"
                } else {
                    "pending"
                },
                STATUS_WIDTH,
            ),
            status_style,
        ),
    ])
}
