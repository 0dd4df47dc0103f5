//! Auth feature views: sign-in, registration, password reset, approval wait.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::ForgotPhase;
use crate::common::forms::form_lines;
use crate::render::{centered_box, palette, titled_block};
use crate::state::TuiState;

pub fn render_login(state: &TuiState, frame: &mut Frame, area: Rect) {
    let auth = &state.auth;
    let pal = palette(state.config.theme);
    let border = if auth.admin_mode {
        Color::Yellow
    } else {
        pal.accent
    };

    let box_area = centered_box(area, 56, 12);
    frame.render_widget(titled_block("Campaignwala", border), box_area);
    let inner = inner_area(box_area);

    let subtitle = if auth.admin_mode {
        Line::from(Span::styled(
            "Admin sign-in",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "Sign in to your dashboard",
            Style::default().fg(pal.dim),
        ))
    };

    let mut lines = vec![subtitle, Line::from("")];
    lines.extend(form_lines(&auth.login, pal.accent));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_register(state: &TuiState, frame: &mut Frame, area: Rect) {
    let pal = palette(state.config.theme);

    let box_area = centered_box(area, 56, 18);
    frame.render_widget(titled_block("Campaignwala", pal.accent), box_area);
    let inner = inner_area(box_area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Create your account",
            Style::default().fg(pal.dim),
        )),
        Line::from(""),
    ];
    lines.extend(form_lines(&state.auth.register, pal.accent));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_forgot(state: &TuiState, frame: &mut Frame, area: Rect) {
    let forgot = &state.auth.forgot;
    let pal = palette(state.config.theme);

    let height = match forgot.phase {
        ForgotPhase::Email => 10,
        ForgotPhase::NewPassword => 12,
    };
    let box_area = centered_box(area, 56, height);
    frame.render_widget(titled_block("Campaignwala", pal.accent), box_area);
    let inner = inner_area(box_area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Reset your password",
            Style::default().fg(pal.dim),
        )),
        Line::from(""),
    ];
    match forgot.phase {
        ForgotPhase::Email => {
            lines.push(Line::from(Span::styled(
                "We'll email you a one-time code.",
                Style::default().fg(pal.text),
            )));
            lines.push(Line::from(""));
            lines.extend(form_lines(&forgot.email_form, pal.accent));
        }
        ForgotPhase::NewPassword => {
            lines.push(Line::from(Span::styled(
                format!("Choose a new password for {}.", forgot.email()),
                Style::default().fg(pal.text),
            )));
            lines.push(Line::from(""));
            lines.extend(form_lines(&forgot.password_form, pal.accent));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_pending(state: &TuiState, frame: &mut Frame, area: Rect) {
    let pal = palette(state.config.theme);

    let box_area = centered_box(area, 56, 9);
    frame.render_widget(titled_block("Campaignwala", Color::Yellow), box_area);
    let inner = inner_area(box_area);

    let who = state
        .session
        .user()
        .map(|u| u.email.clone())
        .unwrap_or_else(|| "Your account".to_string());

    let lines = vec![
        Line::from(Span::styled(
            "Awaiting approval",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} is waiting for admin approval.", who),
            Style::default().fg(pal.text),
        )),
        Line::from(Span::styled(
            "This screen checks again every few seconds.",
            Style::default().fg(pal.dim),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to go back to sign-in",
            Style::default().fg(pal.dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn inner_area(box_area: Rect) -> Rect {
    Rect::new(
        box_area.x + 2,
        box_area.y + 1,
        box_area.width.saturating_sub(4),
        box_area.height.saturating_sub(2),
    )
}
