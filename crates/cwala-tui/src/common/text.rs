//! Small text helpers for table and list rendering.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Truncates to a display width, appending an ellipsis when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

/// Pads or truncates to exactly the given display width (table columns).
pub fn fit_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let used = UnicodeWidthStr::width(truncated.as_str());
    let mut out = truncated;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
