//! Pre-wrapping text to a display width.
//!
//! History is wrapped here and rendered without ratatui's own wrapping so the
//! scroll math and what is drawn always agree on the row count.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap one logical line into rows no wider than `width` columns.
///
/// Breaks at spaces when possible; words wider than a row are split. An
/// empty line yields one empty row.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        let word_width = word.width();
        let separator = usize::from(!current.is_empty());

        if current_width + separator + word_width <= width {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += separator + word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    rows.push(current);
    rows
}

/// Wrap multi-line text, keeping its explicit line breaks.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    text.lines().flat_map(|line| wrap_line(line, width)).collect()
}
