//! Settings view — session profile plus the dark-mode preference.
//!
//! Profile fields come from the config file and are read-only here.
//! `Space`/`Enter` flips dark mode (persisted immediately), `s` saves
//! explicitly and confirms with the short-lived "Settings saved" toast.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::auth::SessionUser;
use crate::core::notify::Toast;
use crate::core::prefs::Prefs;
use crate::tui::services::Services;
use crate::tui::theme::Theme;

pub struct SettingsViewState {
    session: SessionUser,
    prefs_path: String,
    dark_mode: bool,
}

impl SettingsViewState {
    pub fn new(session: SessionUser, prefs_path: String, dark_mode: bool) -> Self {
        Self {
            session,
            prefs_path,
            dark_mode,
        }
    }

    /// The current theme choice; the app derives its palette from this.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = event else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Enter) => {
                self.dark_mode = !self.dark_mode;
                self.persist(services, false);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.persist(services, true);
                true
            }
            _ => false,
        }
    }

    /// Writes the preference file. The confirmation toast is only shown
    /// for an explicit save; toggles write silently.
    fn persist(&self, services: &Services, confirm: bool) {
        let prefs = Prefs {
            dark_mode: self.dark_mode,
        };
        match services.prefs.save(&prefs) {
            Ok(()) => {
                if confirm {
                    services.toast(Toast::settings_saved());
                }
            }
            Err(e) => {
                log::warn!("Failed to save preferences: {e}");
                services.toast(Toast::error(format!("Could not save preferences: {e}")));
            }
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = theme.block_focused("Settings");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.extend(section_header("Profile", theme));
        lines.push(kv_row("Name", &self.session.name, theme));
        lines.push(kv_row("Email", &self.session.email, theme));
        lines.push(kv_row("Department", &self.session.department, theme));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<14}", "Role"), Style::default().fg(theme.primary)),
            Span::raw(self.session.role.clone()),
            Span::styled(
                format!("  ({} sections)", self.session.permissions().len()),
                theme.dim(),
            ),
        ]));

        lines.extend(section_header("Appearance", theme));
        let (mark, palette) = if self.dark_mode {
            ("[x]", "dark")
        } else {
            ("[ ]", "light")
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(mark.to_string(), theme.highlight()),
            Span::raw(" Dark mode"),
            Span::styled(format!("  ({palette} palette)"), theme.muted()),
        ]));

        lines.extend(section_header("Storage", theme));
        lines.push(kv_row("Preferences", &self.prefs_path, theme));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<14}", "Collections"), Style::default().fg(theme.primary)),
            Span::styled("in-memory, reset on restart", theme.muted()),
        ]));

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Space", theme.key_hint()),
            Span::raw(":toggle dark mode "),
            Span::styled("s", theme.key_hint()),
            Span::raw(":save"),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn section_header(title: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("  {}", "─".repeat(40)), theme.dim())),
    ]
}

fn kv_row(key: &str, value: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<14}", key), Style::default().fg(theme.primary)),
        Span::raw(value.to_string()),
    ])
}
