//! Display and key helpers shared by the modal forms.

use crossterm::event::KeyCode;

use crate::tui::widgets::input_buffer::InputBuffer;

/// What a text field shows: the buffer with a cursor bar when focused,
/// otherwise the text or a placeholder.
pub fn text_value(buf: &InputBuffer, focused: bool, required: bool) -> String {
    if focused {
        format!("{}▎", buf.text())
    } else if buf.text().is_empty() {
        if required {
            "(required)".to_string()
        } else {
            "(optional)".to_string()
        }
    } else {
        buf.text().to_string()
    }
}

/// What a selector field shows: arrows around the choice when focused.
pub fn selector_value(label: &str, focused: bool) -> String {
    if focused {
        format!("◂ {label} ▸")
    } else {
        label.to_string()
    }
}

/// Left/Right (or Space) steps a selector field through its choices.
pub fn cycle_index(current: usize, len: usize, code: KeyCode) -> usize {
    match code {
        KeyCode::Left => {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        }
        KeyCode::Right | KeyCode::Char(' ') => (current + 1) % len,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_value_placeholders() {
        let buf = InputBuffer::new();
        assert_eq!(text_value(&buf, false, true), "(required)");
        assert_eq!(text_value(&buf, false, false), "(optional)");
        assert_eq!(text_value(&buf, true, true), "▎");
    }

    #[test]
    fn test_cycle_index_wraps_both_ways() {
        assert_eq!(cycle_index(0, 3, KeyCode::Left), 2);
        assert_eq!(cycle_index(2, 3, KeyCode::Right), 0);
        assert_eq!(cycle_index(1, 3, KeyCode::Char(' ')), 2);
        assert_eq!(cycle_index(1, 3, KeyCode::Char('x')), 1);
    }
}
