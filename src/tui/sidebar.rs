//! Collapsible left sidebar with grouped navigation.
//!
//! Only sections the session role can access are listed. A group whose
//! sections are all gated disappears entirely.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::{AreaFocus, Section, SidebarGroup};
use super::layout::SidebarVisibility;
use super::theme::Theme;

/// Sidebar navigation state over the permitted sections.
pub struct SidebarState {
    /// Sections the session may open, in display order.
    allowed: Vec<Section>,
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Currently highlighted index (into `allowed`).
    pub selected: usize,
}

impl SidebarState {
    pub fn new(allowed: Vec<Section>) -> Self {
        Self {
            allowed,
            user_collapsed: false,
            selected: 0,
        }
    }

    pub fn allowed(&self) -> &[Section] {
        &self.allowed
    }

    /// Toggle user collapse preference.
    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.allowed.is_empty() {
            self.selected = (self.selected + 1) % self.allowed.len();
        }
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        if self.allowed.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.allowed.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// The currently highlighted section.
    pub fn selected_section(&self) -> Option<Section> {
        self.allowed.get(self.selected).copied()
    }

    /// Sync selection to match the active section (e.g., after Tab).
    pub fn sync_to_section(&mut self, section: Section) {
        if let Some(idx) = self.allowed.iter().position(|&s| s == section) {
            self.selected = idx;
        }
    }

    /// Groups that still have at least one permitted section.
    fn visible_groups(&self) -> impl Iterator<Item = (SidebarGroup, Vec<Section>)> + '_ {
        SidebarGroup::ALL.into_iter().filter_map(|group| {
            let sections: Vec<Section> = group
                .sections()
                .iter()
                .copied()
                .filter(|s| self.allowed.contains(s))
                .collect();
            if sections.is_empty() {
                None
            } else {
                Some((group, sections))
            }
        })
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current: Section,
        area_focus: AreaFocus,
        theme: &Theme,
    ) {
        match visibility {
            SidebarVisibility::Hidden => {}
            SidebarVisibility::Collapsed => {
                self.render_collapsed(frame, area, current, theme);
            }
            SidebarVisibility::Expanded => {
                self.render_expanded(frame, area, current, area_focus, theme);
            }
        }
    }

    fn render_collapsed(&self, frame: &mut Frame, area: Rect, current: Section, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        for (_, sections) in self.visible_groups() {
            for section in sections {
                if lines.len() >= area.height as usize {
                    break;
                }
                let style = if section == current {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_muted)
                };
                lines.push(Line::from(Span::styled(
                    format!(" {}", section.icon()),
                    style,
                )));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.bg_surface)),
            area,
        );
    }

    fn render_expanded(
        &self,
        frame: &mut Frame,
        area: Rect,
        current: Section,
        area_focus: AreaFocus,
        theme: &Theme,
    ) {
        let mut lines: Vec<Line> = Vec::new();
        let sidebar_focused = area_focus == AreaFocus::Sidebar;

        // Index into `allowed`, advanced per rendered item
        let mut item_idx = 0usize;

        for (group, sections) in self.visible_groups() {
            if lines.len() >= area.height as usize {
                break;
            }

            lines.push(Line::from(Span::styled(
                format!(" {}", group.label()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));

            for section in sections {
                if lines.len() >= area.height as usize {
                    break;
                }

                let is_current = section == current;
                let is_selected = sidebar_focused && item_idx == self.selected;

                let (prefix, style) = if is_selected {
                    (
                        "▸ ",
                        Style::default()
                            .fg(if is_current { theme.accent } else { theme.text })
                            .add_modifier(Modifier::BOLD),
                    )
                } else if is_current {
                    (
                        "  ",
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default().fg(theme.text_muted))
                };

                let label = format!("{prefix}{} {}", section.icon(), section.label());
                let padded = format!("{:<width$}", label, width = area.width as usize);
                lines.push(Line::from(Span::styled(padded, style)));

                item_idx += 1;
            }
        }

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.bg_surface)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sections() -> Vec<Section> {
        Section::ALL.to_vec()
    }

    #[test]
    fn test_initial_state() {
        let state = SidebarState::new(all_sections());
        assert!(!state.user_collapsed);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_section(), Some(Section::Dashboard));
    }

    #[test]
    fn test_select_next_wraps() {
        let mut state = SidebarState::new(all_sections());
        for _ in 0..Section::ALL.len() {
            state.select_next();
        }
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_select_prev_wraps() {
        let mut state = SidebarState::new(all_sections());
        state.select_prev();
        assert_eq!(state.selected, Section::ALL.len() - 1);
    }

    #[test]
    fn test_restricted_role_sees_subset() {
        let state = SidebarState::new(vec![Section::Dashboard, Section::Inbox]);
        let visible: Vec<Section> = state
            .visible_groups()
            .flat_map(|(_, sections)| sections)
            .collect();
        assert_eq!(visible, vec![Section::Dashboard, Section::Inbox]);
    }

    #[test]
    fn test_empty_allowed_has_no_selection() {
        let mut state = SidebarState::new(Vec::new());
        assert_eq!(state.selected_section(), None);
        state.select_next();
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_sync_to_section() {
        let mut state = SidebarState::new(all_sections());
        state.sync_to_section(Section::Settings);
        assert_eq!(state.selected_section(), Some(Section::Settings));
    }

    #[test]
    fn test_sync_ignores_unlisted_section() {
        let mut state = SidebarState::new(vec![Section::Dashboard, Section::Inbox]);
        state.sync_to_section(Section::Jobs);
        assert_eq!(state.selected_section(), Some(Section::Dashboard));
    }
}
