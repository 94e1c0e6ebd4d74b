//! Shared text input buffer with cursor management.
//!
//! Used by every modal form field, the search bars, and the reply composer.

/// A single-line text input with a byte-offset cursor kept on char
/// boundaries.
#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole content, cursor at the end (form editing).
    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }
}

/// Map editing keys onto a buffer. Character keys (with or without Shift)
/// insert; everything else the buffer does not understand is ignored.
pub fn route_text_input(
    buf: &mut InputBuffer,
    code: crossterm::event::KeyCode,
    modifiers: crossterm::event::KeyModifiers,
) {
    use crossterm::event::{KeyCode, KeyModifiers};
    match (modifiers, code) {
        (KeyModifiers::NONE, KeyCode::Char(c)) | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            buf.insert_char(c);
        }
        (KeyModifiers::NONE, KeyCode::Backspace) => buf.backspace(),
        (KeyModifiers::NONE, KeyCode::Delete) => buf.delete(),
        (KeyModifiers::NONE, KeyCode::Left) => buf.move_left(),
        (KeyModifiers::NONE, KeyCode::Right) => buf.move_right(),
        (KeyModifiers::NONE, KeyCode::Home) => buf.move_home(),
        (KeyModifiers::NONE, KeyCode::End) => buf.move_end(),
        _ => {}
    }
}
