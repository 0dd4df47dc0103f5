//! Shared popup chrome.
//!
//! Every overlay draws the same shell: a cleared centered box, an accent
//! border with a bold title and a key-hint footer. `PopupChrome::draw`
//! paints the shell and hands back the rect the content goes in.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::render::{centered_box, titled_block};

/// Declarative popup shell: title, accent colour, size and key hints.
pub struct PopupChrome<'a> {
    title: &'a str,
    accent: Color,
    width: u16,
    height: u16,
    hints: &'a [(&'a str, &'a str)],
}

impl<'a> PopupChrome<'a> {
    pub fn new(title: &'a str, accent: Color) -> Self {
        Self {
            title,
            accent,
            width: 40,
            height: 8,
            hints: &[],
        }
    }

    /// Requested size; clamped so a small terminal still shows the border.
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Key/action pairs for the footer line.
    pub fn hints(mut self, hints: &'a [(&'a str, &'a str)]) -> Self {
        self.hints = hints;
        self
    }

    /// Draws the shell and returns the content area.
    pub fn draw(&self, frame: &mut Frame, area: Rect) -> Rect {
        let popup = centered_box(
            area,
            self.width.min(area.width.saturating_sub(4)),
            self.height.min(area.height.saturating_sub(2)),
        );
        frame.render_widget(Clear, popup);
        frame.render_widget(titled_block(self.title, self.accent), popup);

        // Border plus one column of breathing room on each side.
        let inner = Rect::new(
            popup.x + 2,
            popup.y + 1,
            popup.width.saturating_sub(4),
            popup.height.saturating_sub(2),
        );
        if self.hints.is_empty() {
            return inner;
        }

        let footer = Rect::new(
            inner.x,
            inner.y + inner.height.saturating_sub(1),
            inner.width,
            1,
        );
        frame.render_widget(hint_line(self.hints, self.accent), footer);

        Rect::new(
            inner.x,
            inner.y,
            inner.width,
            inner.height.saturating_sub(1),
        )
    }
}

/// "Enter confirm • Esc cancel" footer, keys in the accent colour.
fn hint_line<'s>(hints: &[(&'s str, &'s str)], accent: Color) -> Paragraph<'s> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(accent)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
