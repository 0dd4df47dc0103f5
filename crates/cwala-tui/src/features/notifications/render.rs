//! Notifications feature views: the list screen and the toast popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::common::text::truncate_to_width;
use crate::render::palette;
use crate::state::TuiState;

pub fn render_notifications(state: &TuiState, frame: &mut Frame, area: Rect) {
    let notifications = &state.notifications;
    let pal = palette(state.config.theme);
    if area.height < 4 {
        return;
    }

    let unread = state
        .session
        .unread_count(notifications.items.iter().map(|n| n.id.as_str()));

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            format!("Notifications ({unread} unread)"),
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if !notifications.loaded {
        lines.push(Line::from(Span::styled(
            "Loading notifications...",
            Style::default().fg(pal.dim),
        )));
    } else if notifications.items.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing here yet.",
            Style::default().fg(pal.dim),
        )));
    } else {
        // Two rows per entry at worst (selected rows show the message)
        let visible = (area.height.saturating_sub(4) as usize).max(1);
        let offset = (notifications.selected + 1).saturating_sub(visible);
        let width = area.width as usize;

        for (idx, n) in notifications
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
        {
            let selected = idx == notifications.selected;
            let read = state.session.cache.is_notification_read(&n.id);
            let pointer = if selected { "> " } else { "  " };
            let marker = if read { "  " } else { "● " };
            let marker_style = if read {
                Style::default().fg(pal.dim)
            } else {
                Style::default().fg(pal.accent)
            };
            let title_style = if selected {
                Style::default().fg(pal.accent)
            } else if read {
                Style::default().fg(pal.dim)
            } else {
                Style::default().fg(pal.text)
            };

            let stamp = n.created_at.format("%b %d %H:%M").to_string();
            let title_width = width.saturating_sub(stamp.len() + 8);
            lines.push(Line::from(vec![
                Span::styled(pointer.to_string(), Style::default().fg(pal.accent)),
                Span::styled(marker.to_string(), marker_style),
                Span::styled(truncate_to_width(&n.title, title_width), title_style),
                Span::raw("  "),
                Span::styled(stamp, Style::default().fg(pal.dim)),
            ]));
            if selected {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        truncate_to_width(&n.message, width.saturating_sub(6)),
                        Style::default().fg(pal.dim),
                    ),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(pal.accent)),
        Span::styled(" mark read  ", Style::default().fg(pal.dim)),
        Span::styled("j/k", Style::default().fg(pal.accent)),
        Span::styled(" select", Style::default().fg(pal.dim)),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the toast in the bottom-right corner, above the status line.
pub fn render_notification_popup(state: &TuiState, frame: &mut Frame, area: Rect) {
    let Some(popup) = &state.notifications.popup else {
        return;
    };
    let pal = palette(state.config.theme);

    let width = 44.min(area.width.saturating_sub(4));
    let height = 6.min(area.height.saturating_sub(3));
    if width < 10 || height < 4 {
        return;
    }
    let x = area.x + area.width - width - 2;
    let y = area.y + area.height.saturating_sub(height + 2);
    let popup_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.accent))
        .title(" Notification ")
        .title_style(Style::default().fg(pal.accent).add_modifier(Modifier::BOLD));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(Span::styled(
            popup.title.clone(),
            Style::default().fg(pal.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            popup.message.clone(),
            Style::default().fg(pal.dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
