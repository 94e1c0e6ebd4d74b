//! Documents screen — the shared file register.
//!
//! There is no editing here; a document is uploaded once and replaced by
//! a new upload when it goes stale.

use std::cmp::Ordering;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, SortKey};
use crate::core::model::document::{DocCategory, DocumentFile};
use crate::core::notify::Toast;
use crate::core::seed;
use crate::tui::app::centered_rect;
use crate::tui::services::Services;
use crate::tui::theme::Theme;
use crate::tui::widgets::confirm::render_confirm;
use crate::tui::widgets::form::{cycle_index, selector_value, text_value};
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};
use crate::tui::widgets::table;

// ── Criteria and sort ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DocumentCriteria {
    pub search: String,
    pub category: Option<DocCategory>,
}

impl Criteria<DocumentFile> for DocumentCriteria {
    fn matches(&self, doc: &DocumentFile) -> bool {
        search_matches(&self.search, &[&doc.name, &doc.owner])
            && self.category.map_or(true, |c| doc.category == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSort {
    Name,
    Size,
    Uploaded,
}

impl SortKey<DocumentFile> for DocumentSort {
    fn compare(self, a: &DocumentFile, b: &DocumentFile) -> Ordering {
        match self {
            DocumentSort::Name => cmp_text(&a.name, &b.name),
            DocumentSort::Size => a.size_kb.cmp(&b.size_kb),
            DocumentSort::Uploaded => a.uploaded.cmp(&b.uploaded),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocModal {
    Upload,
    DeleteOne,
    DeleteSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Category,
    Owner,
    SizeKb,
}

const FORM_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Category,
    FormField::Owner,
    FormField::SizeKb,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct DocumentsViewState {
    grid: GridState<DocumentFile, DocumentCriteria, DocumentSort>,
    mode: Mode,
    search: InputBuffer,
    modal: Option<DocModal>,
    form_name: InputBuffer,
    form_category: usize,
    form_owner: InputBuffer,
    form_size: InputBuffer,
    form_focus: usize,
    error: Option<String>,
}

impl DocumentsViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::documents(), DocumentCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            modal: None,
            form_name: InputBuffer::new(),
            form_category: 0,
            form_owner: InputBuffer::new(),
            form_size: InputBuffer::new(),
            form_focus: 0,
            error: None,
        }
    }

    pub fn records(&self) -> &[DocumentFile] {
        self.grid.records()
    }

    // ── Input handling ─────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = event else {
            return false;
        };

        if let Some(modal) = self.modal {
            return self.handle_modal_input(modal, *code, *modifiers, services);
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
                    .edit_criteria(|c| c.category = DocCategory::cycle_filter(c.category));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(DocumentSort::Name);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(DocumentSort::Size);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('3')) => {
                self.grid.toggle_sort(DocumentSort::Uploaded);
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
            (KeyModifiers::NONE, KeyCode::Char('a')) => {
                self.open_upload_modal();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if self.grid.current_id().is_some() {
                    self.modal = Some(DocModal::DeleteOne);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
                if !self.grid.selection().is_empty() {
                    self.modal = Some(DocModal::DeleteSelected);
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

    fn handle_modal_input(
        &mut self,
        modal: DocModal,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match modal {
            DocModal::Upload => self.handle_form_input(code, modifiers, services),
            DocModal::DeleteOne => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    if let Some(id) = self.grid.current_id() {
                        if let Some(doc) = self.grid.remove(&id) {
                            services.toast(Toast::success(format!("Deleted {}", doc.name)));
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
            },
            DocModal::DeleteSelected => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let removed = self.grid.delete_selected();
                    services.toast(Toast::success(format!("Deleted {removed} documents")));
                    self.modal = None;
                    true
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.modal = None;
                    true
                }
                _ => true,
            },
        }
    }

    fn handle_form_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.modal = None;
                self.error = None;
                true
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                self.form_focus = (self.form_focus + 1) % FORM_FIELDS.len();
                true
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                self.form_focus = if self.form_focus == 0 {
                    FORM_FIELDS.len() - 1
                } else {
                    self.form_focus - 1
                };
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Enter) => {
                self.submit_upload(services);
                true
            }
            _ => {
                match FORM_FIELDS[self.form_focus] {
                    FormField::Category => {
                        self.form_category =
                            cycle_index(self.form_category, DocCategory::ALL.len(), code);
                    }
                    FormField::Name => route_text_input(&mut self.form_name, code, modifiers),
                    FormField::Owner => route_text_input(&mut self.form_owner, code, modifiers),
                    FormField::SizeKb => route_text_input(&mut self.form_size, code, modifiers),
                }
                true
            }
        }
    }

    // ── Form helpers ───────────────────────────────────────────────────────

    fn open_upload_modal(&mut self) {
        self.modal = Some(DocModal::Upload);
        self.form_focus = 0;
        self.form_name.clear();
        self.form_category = 0;
        self.form_owner.clear();
        self.form_size.clear();
        self.error = None;
    }

    fn submit_upload(&mut self, services: &Services) {
        let name = self.form_name.text().trim().to_string();
        if name.is_empty() {
            self.error = Some("Name is required.".to_string());
            return;
        }
        let size_text = self.form_size.text().trim().to_string();
        let size_kb = if size_text.is_empty() {
            0
        } else {
            match size_text.parse::<u64>() {
                Ok(kb) => kb,
                Err(_) => {
                    self.error = Some("Size must be a whole number of KB.".to_string());
                    return;
                }
            }
        };
        let owner = {
            let text = self.form_owner.text().trim().to_string();
            if text.is_empty() {
                services.session.department.clone()
            } else {
                text
            }
        };
        let category = DocCategory::ALL[self.form_category];

        self.grid
            .prepend(DocumentFile::upload(name.clone(), category, owner, size_kb));
        services.toast(Toast::success(format!("Uploaded {name}")));
        self.modal = None;
        self.error = None;
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.render_grid(frame, area, theme);

        if let Some(modal) = self.modal {
            match modal {
                DocModal::Upload => self.render_upload_modal(frame, area, theme),
                DocModal::DeleteOne => {
                    let name = self
                        .grid
                        .current()
                        .map(|d| d.name.clone())
                        .unwrap_or_else(|| "?".to_string());
                    render_confirm(
                        frame,
                        area,
                        theme,
                        " Delete Document ",
                        vec![
                            Span::raw("  Delete "),
                            Span::styled(name, theme.heading()),
                            Span::raw("?"),
                        ],
                    );
                }
                DocModal::DeleteSelected => {
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
                            Span::raw(" selected documents?"),
                        ],
                    );
                }
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let block = theme.block_focused(format!("Documents ({})", self.grid.len()));
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
                    "{}{} {}{} {}{} {}{} {}{}",
                    table::cell("Name", 28),
                    table::sort_marker(sort, DocumentSort::Name),
                    table::cell("Category", 8),
                    " ",
                    table::cell("Owner", 14),
                    " ",
                    table::cell_right("Size", 8),
                    table::sort_marker(sort, DocumentSort::Size),
                    table::cell("Uploaded", 10),
                    table::sort_marker(sort, DocumentSort::Uploaded),
                ),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No documents match. Press ", theme.muted()),
                Span::styled("a", theme.key_hint()),
                Span::styled(" to upload one.", theme.muted()),
            ]));
        }

        for (i, doc) in view.rows.iter().enumerate() {
            let is_cursor = i == self.grid.cursor();
            let cursor = if is_cursor { "▸ " } else { "  " };
            let row_style = if is_cursor {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
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
                    format!("{} ", table::checkbox(self.grid.is_selected(&doc.id))),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&doc.name, 28)), row_style),
                Span::styled(
                    format!("{}  ", table::cell(doc.category.label(), 8)),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&doc.owner, 14)), theme.muted()),
                Span::styled(
                    format!("{}  ", table::cell_right(&doc.size_label(), 8)),
                    row_style,
                ),
                Span::styled(
                    table::cell(&doc.uploaded.to_string(), 10),
                    theme.muted(),
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
                ("f", "category"),
                ("1-3", "sort"),
                ("a", "upload"),
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

        if let Some(category) = criteria.category {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("[{}]", category.label()),
                theme.highlight(),
            ));
        }
        Line::from(spans)
    }

    fn render_upload_modal(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let modal_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" Upload Document ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::raw(""));

        for (i, field) in FORM_FIELDS.iter().enumerate() {
            let is_focused = i == self.form_focus;
            let marker = if is_focused { "▸" } else { " " };
            let label_style = if is_focused {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                theme.muted()
            };

            let (label, value) = match field {
                FormField::Name => ("Name", text_value(&self.form_name, is_focused, true)),
                FormField::Category => (
                    "Category",
                    selector_value(DocCategory::ALL[self.form_category].label(), is_focused),
                ),
                FormField::Owner => ("Owner", {
                    let v = text_value(&self.form_owner, is_focused, false);
                    if !is_focused && self.form_owner.is_empty() {
                        "(defaults to your department)".to_string()
                    } else {
                        v
                    }
                }),
                FormField::SizeKb => ("Size KB", text_value(&self.form_size, is_focused, false)),
            };

            let val_style = if is_focused {
                Style::default().fg(theme.text)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {marker} ")),
                Span::styled(format!("{:<10}", format!("{label}:")), label_style),
                Span::styled(value, val_style),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(table::hint_line(
            &[
                ("Tab", "field"),
                ("←/→", "choice"),
                ("Ctrl+Enter", "save"),
                ("Esc", "cancel"),
            ],
            theme,
        ));
        if let Some(ref err) = self.error {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("✗ {err}"), Style::default().fg(theme.error)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::tui::events::AppEvent;
    use tokio::sync::mpsc;

    fn test_services() -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Services::new(&AppConfig::default(), tx), rx)
    }

    #[test]
    fn test_category_filter_narrows() {
        let mut s = DocumentsViewState::new(10);
        s.grid
            .edit_criteria(|c| c.category = Some(DocCategory::Policy));
        let view = s.grid.page_view();
        assert!(view.rows.iter().all(|d| d.category == DocCategory::Policy));
    }

    #[test]
    fn test_size_sort_descending_on_second_toggle() {
        let mut s = DocumentsViewState::new(50);
        s.grid.toggle_sort(DocumentSort::Size);
        s.grid.toggle_sort(DocumentSort::Size);
        let view = s.grid.page_view();
        let sizes: Vec<u64> = view.rows.iter().map(|d| d.size_kb).collect();
        let mut sorted = sizes.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sizes, sorted);
    }

    #[test]
    fn test_upload_rejects_non_numeric_size() {
        let mut s = DocumentsViewState::new(10);
        let (services, _rx) = test_services();
        s.open_upload_modal();
        s.form_name.set_text("onboarding.pdf");
        s.form_size.set_text("big");
        s.submit_upload(&services);
        assert_eq!(
            s.error.as_deref(),
            Some("Size must be a whole number of KB.")
        );
    }

    #[test]
    fn test_upload_defaults_owner_to_department() {
        let mut s = DocumentsViewState::new(10);
        let (services, _rx) = test_services();
        s.open_upload_modal();
        s.form_name.set_text("onboarding.pdf");
        s.form_category = 1;
        s.submit_upload(&services);
        assert!(s.modal.is_none());
        let first = &s.grid.records()[0];
        assert_eq!(first.owner, services.session.department);
        assert_eq!(first.category, DocCategory::Form);
        assert_eq!(first.file_type, "pdf");
    }
}
