//! Single-line form fields with focus cycling.
//!
//! Fields are append-only editors (type and backspace), which keeps the
//! key handling identical across every form in the dashboard. Validation
//! messages attach per field and clear on the next keystroke.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// One text field in a form.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Render as bullets (passwords).
    pub masked: bool,
    pub error: Option<&'static str>,
}

impl Field {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
            error: None,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
            error: None,
        }
    }

    pub fn with_value(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            masked: false,
            error: None,
        }
    }

    /// Value as shown on screen (bullets when masked).
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// A stack of fields with one focused at a time.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focused_mut(&mut self) -> &mut Field {
        &mut self.fields[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Trimmed value of a field by index.
    pub fn value(&self, index: usize) -> &str {
        self.fields[index].value.trim()
    }

    /// Raw (untrimmed) value; passwords keep their whitespace.
    pub fn raw_value(&self, index: usize) -> &str {
        &self.fields[index].value
    }

    pub fn set_error(&mut self, index: usize, message: &'static str) {
        self.fields[index].error = Some(message);
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Applies a validator to one field, recording its message on failure.
    /// Returns true when the field passed.
    pub fn check(
        &mut self,
        index: usize,
        validator: impl Fn(&str) -> Result<(), &'static str>,
    ) -> bool {
        let value = self.fields[index].value.clone();
        match validator(&value) {
            Ok(()) => true,
            Err(message) => {
                self.fields[index].error = Some(message);
                false
            }
        }
    }

    /// Inserts pasted text into the focused field, dropping control chars.
    pub fn paste(&mut self, text: &str) {
        let field = self.focused_mut();
        field
            .value
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Widest label, for column alignment.
    pub fn label_width(&self) -> usize {
        self.fields.iter().map(|f| f.label.len()).max().unwrap_or(0)
    }

    /// Handles editing and focus keys. Returns true when consumed.
    /// Enter and Esc are left for the screen to interpret.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Any edit clears stale validation messages
        if matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace) && !ctrl {
            self.clear_errors();
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            KeyCode::Backspace => {
                self.focused_mut().value.pop();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.focused_mut().value.push(c);
                true
            }
            _ => false,
        }
    }
}

/// Builds display lines for a form: aligned labels, a cursor block on the
/// focused field, and any validation message under its field.
pub fn form_lines(form: &Form, accent: Color) -> Vec<Line<'static>> {
    let label_width = form.label_width();
    let mut lines = Vec::new();
    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focus;
        let label_style = if focused {
            Style::default().fg(accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(format!("{:<label_width$}", field.label), label_style),
            Span::raw("  "),
            Span::raw(field.display_value()),
        ];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(accent)));
        }
        lines.push(Line::from(spans));
        if let Some(error) = field.error {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(label_width + 4)),
                Span::styled(error, Style::default().fg(Color::Red)),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}
