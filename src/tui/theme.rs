//! Centralized color theme for the opsdesk TUI.
//!
//! All colors are RGB truecolor. Views take a `&Theme` instead of using
//! inline `Color::*` literals, so the settings dark-mode toggle can swap
//! the whole palette at runtime.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// The resolved palette for one rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary accent, active items, focused borders.
    pub primary: Color,
    /// Highlights, hints, secondary focus.
    pub primary_light: Color,
    /// Calls to action, important items.
    pub accent: Color,
    /// Base background.
    pub bg_base: Color,
    /// Elevated panels, sidebar.
    pub bg_surface: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary labels, inactive borders.
    pub text_muted: Color,
    /// Disabled items, faint hints.
    pub text_dim: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    /// Indigo-on-charcoal palette (the default).
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(0x5C, 0x6B, 0xC0),
            primary_light: Color::Rgb(0x7E, 0x8C, 0xE0),
            accent: Color::Rgb(0xFF, 0xB7, 0x4D),
            bg_base: Color::Rgb(0x10, 0x12, 0x1A),
            bg_surface: Color::Rgb(0x1A, 0x1D, 0x29),
            text: Color::Rgb(0xE0, 0xE0, 0xE0),
            text_muted: Color::Rgb(0x80, 0x80, 0x80),
            text_dim: Color::Rgb(0x50, 0x50, 0x50),
            error: Color::Rgb(0xEF, 0x53, 0x50),
            success: Color::Rgb(0x66, 0xBB, 0x6A),
            warning: Color::Rgb(0xFF, 0xA7, 0x26),
            info: Color::Rgb(0x42, 0xA5, 0xF5),
        }
    }

    /// Light palette for bright terminals.
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(0x3F, 0x51, 0xB5),
            primary_light: Color::Rgb(0x56, 0x66, 0xC8),
            accent: Color::Rgb(0xE6, 0x8A, 0x00),
            bg_base: Color::Rgb(0xFA, 0xFA, 0xF5),
            bg_surface: Color::Rgb(0xEC, 0xEC, 0xE4),
            text: Color::Rgb(0x20, 0x20, 0x20),
            text_muted: Color::Rgb(0x60, 0x60, 0x60),
            text_dim: Color::Rgb(0xA0, 0xA0, 0xA0),
            error: Color::Rgb(0xC6, 0x28, 0x28),
            success: Color::Rgb(0x2E, 0x7D, 0x32),
            warning: Color::Rgb(0xE6, 0x51, 0x00),
            info: Color::Rgb(0x15, 0x65, 0xC0),
        }
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────────

    /// Accent-colored bold text (titles, active items).
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Section header style.
    pub fn heading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn border_default(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Highlighted/selected item.
    pub fn highlight(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Key hint style (e.g., "[q]:quit").
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Status bar brand badge.
    pub fn brand_badge(&self) -> Style {
        Style::default()
            .fg(self.bg_base)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    // ── Block builders ──────────────────────────────────────────────────────

    /// A bordered block with focused styling.
    pub fn block_focused<'a>(&self, title: impl Into<String>) -> Block<'a> {
        Block::default()
            .title(format!(" {} ", title.into()))
            .borders(Borders::ALL)
            .border_style(self.border_focused())
    }

    /// A bordered block with default (unfocused) styling.
    pub fn block_default<'a>(&self, title: impl Into<String>) -> Block<'a> {
        Block::default()
            .title(format!(" {} ", title.into()))
            .borders(Borders::ALL)
            .border_style(self.border_default())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
