//! Media screen — images and video used across the site.
//!
//! Read-mostly: assets arrive through the site build, so this screen only
//! filters, sorts, and deletes.

use std::cmp::Ordering;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, SortKey};
use crate::core::model::media::{MediaAsset, MediaKind};
use crate::core::notify::Toast;
use crate::core::seed;
use crate::tui::services::Services;
use crate::tui::theme::Theme;
use crate::tui::widgets::confirm::render_confirm;
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};
use crate::tui::widgets::table;

// ── Criteria and sort ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MediaCriteria {
    pub search: String,
    pub kind: Option<MediaKind>,
}

impl Criteria<MediaAsset> for MediaCriteria {
    fn matches(&self, asset: &MediaAsset) -> bool {
        search_matches(&self.search, &[&asset.name])
            && self.kind.map_or(true, |k| asset.kind == k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSort {
    Name,
    Size,
    Uploaded,
}

impl SortKey<MediaAsset> for MediaSort {
    fn compare(self, a: &MediaAsset, b: &MediaAsset) -> Ordering {
        match self {
            MediaSort::Name => cmp_text(&a.name, &b.name),
            MediaSort::Size => a.size_kb.cmp(&b.size_kb),
            MediaSort::Uploaded => a.uploaded.cmp(&b.uploaded),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaModal {
    DeleteOne,
    DeleteSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct MediaViewState {
    grid: GridState<MediaAsset, MediaCriteria, MediaSort>,
    mode: Mode,
    search: InputBuffer,
    modal: Option<MediaModal>,
}

impl MediaViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::media(), MediaCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            modal: None,
        }
    }

    pub fn records(&self) -> &[MediaAsset] {
        self.grid.records()
    }

    // ── Input handling ─────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = event else {
            return false;
        };

        if let Some(modal) = self.modal {
            return self.handle_modal_input(modal, *code, services);
        }
        if self.mode == Mode::Search {
            return self.handle_search_input(*code, *modifiers);
        }
        self.handle_grid_input(*code, *modifiers)
    }

    fn handle_search_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.mode = Mode::Browse;
                self.search.clear();
                self.grid.edit_criteria(|c| c.search.clear());
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.mode = Mode::Browse;
            }
            _ => {
                route_text_input(&mut self.search, code, modifiers);
                let text = self.search.text().to_string();
                self.grid.edit_criteria(|c| c.search = text);
            }
        }
        true
    }

    fn handle_grid_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.grid.cursor_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.grid.cursor_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char(']')) => {
                self.grid.next_page();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('[')) => {
                self.grid.prev_page();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                self.mode = Mode::Search;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('f')) => {
                self.grid
                    .edit_criteria(|c| c.kind = MediaKind::cycle_filter(c.kind));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(MediaSort::Name);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(MediaSort::Size);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('3')) => {
                self.grid.toggle_sort(MediaSort::Uploaded);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                if let Some(id) = self.grid.current_id() {
                    self.grid.toggle_selected(&id);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('A')) => {
                self.grid.toggle_select_all();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if self.grid.current_id().is_some() {
                    self.modal = Some(MediaModal::DeleteOne);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
                if !self.grid.selection().is_empty() {
                    self.modal = Some(MediaModal::DeleteSelected);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if !self.grid.criteria().search.is_empty() {
                    self.search.clear();
                    self.grid.edit_criteria(|c| c.search.clear());
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn handle_modal_input(&mut self, modal: MediaModal, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match modal {
                    MediaModal::DeleteOne => {
                        if let Some(id) = self.grid.current_id() {
                            if let Some(asset) = self.grid.remove(&id) {
                                services.toast(Toast::success(format!("Deleted {}", asset.name)));
                            }
                        }
                    }
                    MediaModal::DeleteSelected => {
                        let removed = self.grid.delete_selected();
                        services.toast(Toast::success(format!("Deleted {removed} assets")));
                    }
                }
                self.modal = None;
                true
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.modal = None;
                true
            }
            _ => true,
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.render_grid(frame, area, theme);

        if let Some(modal) = self.modal {
            match modal {
                MediaModal::DeleteOne => {
                    let name = self
                        .grid
                        .current()
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| "?".to_string());
                    render_confirm(
                        frame,
                        area,
                        theme,
                        " Delete Asset ",
                        vec![
                            Span::raw("  Delete "),
                            Span::styled(name, theme.heading()),
                            Span::raw("?"),
                        ],
                    );
                }
                MediaModal::DeleteSelected => {
                    render_confirm(
                        frame,
                        area,
                        theme,
                        " Delete Selected ",
                        vec![
                            Span::raw("  Delete "),
                            Span::styled(
                                format!("{}", self.grid.selection().len()),
                                theme.heading(),
                            ),
                            Span::raw(" selected assets?"),
                        ],
                    );
                }
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let block = theme.block_focused(format!("Media ({})", self.grid.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::raw(""));
        lines.push(self.filter_line(theme));
        lines.push(Line::raw(""));

        let sort = self.grid.sort();
        lines.push(Line::from(vec![
            Span::raw("      "),
            Span::styled(
                format!(
                    "{}{} {}{} {}{} {}{} {}",
                    table::cell("Name", 30),
                    table::sort_marker(sort, MediaSort::Name),
                    table::cell("Kind", 6),
                    " ",
                    table::cell_right("Size", 8),
                    table::sort_marker(sort, MediaSort::Size),
                    table::cell("Uploaded", 10),
                    table::sort_marker(sort, MediaSort::Uploaded),
                    "Dimensions",
                ),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No assets match the current filters.", theme.muted()),
            ]));
        }

        for (i, asset) in view.rows.iter().enumerate() {
            let is_cursor = i == self.grid.cursor();
            let cursor = if is_cursor { "▸ " } else { "  " };
            let row_style = if is_cursor {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let kind_icon = match asset.kind {
                MediaKind::Image => "▣",
                MediaKind::Video => "▶",
            };

            lines.push(Line::from(vec![
                Span::styled(
                    cursor.to_string(),
                    if is_cursor {
                        Style::default().fg(theme.accent)
                    } else {
                        Style::default()
                    },
                ),
                Span::styled(
                    format!("{} ", table::checkbox(self.grid.is_selected(&asset.id))),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&asset.name, 30)), row_style),
                Span::styled(
                    format!("{kind_icon} {}  ", table::cell(asset.kind.label(), 4)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{}  ", table::cell_right(&asset.size_label(), 8)),
                    row_style,
                ),
                Span::styled(
                    format!("{}  ", table::cell(&asset.uploaded.to_string(), 10)),
                    theme.muted(),
                ),
                Span::styled(
                    asset.dimensions.clone().unwrap_or_else(|| "-".to_string()),
                    theme.dim(),
                ),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(table::pagination_line(
            view.page,
            view.total_pages,
            view.filtered_len,
            self.grid.selection().len(),
            theme,
        ));
        lines.push(table::hint_line(
            &[
                ("/", "search"),
                ("f", "kind"),
                ("1-3", "sort"),
                ("Space/A", "select"),
                ("d/D", "delete"),
            ],
            theme,
        ));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn filter_line(&self, theme: &Theme) -> Line<'static> {
        let criteria = self.grid.criteria();
        let mut spans = vec![Span::raw("  ")];

        if self.mode == Mode::Search {
            spans.push(Span::styled("Search: ", theme.heading()));
            spans.push(Span::styled(
                format!("{}▎", self.search.text()),
                Style::default().fg(theme.text),
            ));
        } else if !criteria.search.is_empty() {
            spans.push(Span::styled("Search: ", theme.muted()));
            spans.push(Span::raw(criteria.search.clone()));
        } else {
            spans.push(Span::styled("Press / to search", theme.dim()));
        }

        if let Some(kind) = criteria.kind {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("[{}]", kind.label()), theme.highlight()));
        }
        Line::from(spans)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
