//! Home screen view: greeting, wallet card, and activity summary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::render::palette;
use crate::state::TuiState;

pub fn render_home(state: &TuiState, frame: &mut Frame, area: Rect) {
    let pal = palette(state.config.theme);
    if area.height < 4 {
        return;
    }
    let Some(user) = state.session.user() else {
        return;
    };

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(vec![
            Span::styled(
                format!("Welcome back, {}", user.name),
                Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", user.role.label()),
                Style::default().fg(pal.dim),
            ),
        ]),
        Line::from(""),
    ];

    // Wallet card. The cached balance shows immediately, the fetch
    // replaces it when it lands.
    match &state.session.cache.wallet_balance {
        Some(balance) => {
            lines.push(Line::from(vec![
                Span::styled("  Wallet balance  ", Style::default().fg(pal.dim)),
                Span::styled(
                    balance.display(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(vec![
                Span::styled("  Wallet balance  ", Style::default().fg(pal.dim)),
                Span::styled("loading...", Style::default().fg(pal.dim)),
            ]));
        }
    }
    lines.push(Line::from(""));

    let unread = state
        .session
        .unread_count(state.notifications.items.iter().map(|n| n.id.as_str()));
    lines.push(summary_row(
        "Notifications",
        if !state.notifications.loaded {
            "loading...".to_string()
        } else if unread == 0 {
            "no unread".to_string()
        } else {
            format!("{unread} unread")
        },
        if unread > 0 { Color::Yellow } else { pal.text },
        pal.dim,
    ));

    if state.session.manages_team() {
        let value = if !state.team.loaded {
            "loading...".to_string()
        } else {
            let pending = state.team.pending_count();
            if pending == 0 {
                format!("{} members", state.team.members.len())
            } else {
                format!("{} members, {pending} awaiting approval", state.team.members.len())
            }
        };
        lines.push(summary_row("Team", value, pal.text, pal.dim));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Use 1-4 to switch views.",
        Style::default().fg(pal.dim),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn summary_row(label: &'static str, value: String, color: Color, dim: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<15} "), Style::default().fg(dim)),
        Span::styled(value, Style::default().fg(color)),
    ])
}
