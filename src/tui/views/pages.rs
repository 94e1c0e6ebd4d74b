//! Pages screen — the site's editorial pages.
//!
//! `p` flips the highlighted page between Published and Draft. The form
//! normalizes slugs so "Meet The Team" becomes "meet-the-team".

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
use crate::core::model::page::{PageStatus, SitePage};
use crate::core::notify::Toast;
use crate::core::seed;
use crate::tui::app::centered_rect;
use crate::tui::services::Services;
use crate::tui::theme::Theme;
use crate::tui::widgets::confirm::render_confirm;
use crate::tui::widgets::form::text_value;
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};
use crate::tui::widgets::table;

// ── Criteria and sort ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct PageCriteria {
    pub search: String,
    pub status: Option<PageStatus>,
}

impl Criteria<SitePage> for PageCriteria {
    fn matches(&self, page: &SitePage) -> bool {
        search_matches(&self.search, &[&page.title, &page.slug, &page.author])
            && self.status.map_or(true, |s| page.status == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSort {
    Title,
    Author,
    Modified,
}

impl SortKey<SitePage> for PageSort {
    fn compare(self, a: &SitePage, b: &SitePage) -> Ordering {
        match self {
            PageSort::Title => cmp_text(&a.title, &b.title),
            PageSort::Author => cmp_text(&a.author, &b.author),
            PageSort::Modified => a.modified.cmp(&b.modified),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageModal {
    Create,
    Edit,
    DeleteOne,
    DeleteSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Title,
    Slug,
    Author,
}

const FORM_FIELDS: [FormField; 3] = [FormField::Title, FormField::Slug, FormField::Author];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct PagesViewState {
    grid: GridState<SitePage, PageCriteria, PageSort>,
    mode: Mode,
    search: InputBuffer,
    modal: Option<PageModal>,
    form_title: InputBuffer,
    form_slug: InputBuffer,
    form_author: InputBuffer,
    form_focus: usize,
    editing_id: Option<String>,
    error: Option<String>,
}

impl PagesViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::pages(), PageCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            modal: None,
            form_title: InputBuffer::new(),
            form_slug: InputBuffer::new(),
            form_author: InputBuffer::new(),
            form_focus: 0,
            editing_id: None,
            error: None,
        }
    }

    pub fn records(&self) -> &[SitePage] {
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
        self.handle_grid_input(*code, *modifiers, services)
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

    fn handle_grid_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
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
                    .edit_criteria(|c| c.status = PageStatus::cycle_filter(c.status));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(PageSort::Title);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(PageSort::Author);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('3')) => {
                self.grid.toggle_sort(PageSort::Modified);
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
                self.open_create_modal();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('e')) => {
                self.open_edit_modal();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('p')) => {
                self.toggle_publish(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if self.grid.current_id().is_some() {
                    self.modal = Some(PageModal::DeleteOne);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
                if !self.grid.selection().is_empty() {
                    self.modal = Some(PageModal::DeleteSelected);
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

    fn toggle_publish(&mut self, services: &Services) {
        let Some(id) = self.grid.current_id() else { return };
        let mut title = String::new();
        let mut status = None;
        self.grid.update(&id, |page| {
            page.status = page.status.toggled();
            page.touch();
            title = page.title.clone();
            status = Some(page.status);
        });
        match status {
            Some(PageStatus::Published) => {
                services.toast(Toast::success(format!("Published {title}")));
            }
            Some(PageStatus::Draft) => {
                services.toast(Toast::info(format!("Unpublished {title}")));
            }
            None => {}
        }
    }

    fn handle_modal_input(
        &mut self,
        modal: PageModal,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match modal {
            PageModal::Create | PageModal::Edit => {
                self.handle_form_input(code, modifiers, services)
            }
            PageModal::DeleteOne => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    if let Some(id) = self.grid.current_id() {
                        if let Some(page) = self.grid.remove(&id) {
                            services.toast(Toast::success(format!("Deleted {}", page.title)));
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
            PageModal::DeleteSelected => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let removed = self.grid.delete_selected();
                    services.toast(Toast::success(format!("Deleted {removed} pages")));
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
                self.submit_form(services);
                true
            }
            _ => {
                let buf = match FORM_FIELDS[self.form_focus] {
                    FormField::Title => &mut self.form_title,
                    FormField::Slug => &mut self.form_slug,
                    FormField::Author => &mut self.form_author,
                };
                route_text_input(buf, code, modifiers);
                true
            }
        }
    }

    // ── Form helpers ───────────────────────────────────────────────────────

    fn open_create_modal(&mut self) {
        self.modal = Some(PageModal::Create);
        self.editing_id = None;
        self.form_focus = 0;
        self.form_title.clear();
        self.form_slug.clear();
        self.form_author.clear();
        self.error = None;
    }

    fn open_edit_modal(&mut self) {
        let Some(page) = self.grid.current() else { return };
        self.modal = Some(PageModal::Edit);
        self.editing_id = Some(page.id.clone());
        self.form_focus = 0;
        self.error = None;
        let (title, slug, author) = (page.title.clone(), page.slug.clone(), page.author.clone());
        self.form_title.set_text(&title);
        self.form_slug.set_text(&slug);
        self.form_author.set_text(&author);
    }

    fn submit_form(&mut self, services: &Services) {
        let title = self.form_title.text().trim().to_string();
        if title.is_empty() {
            self.error = Some("Title is required.".to_string());
            return;
        }
        let slug = normalize_slug(self.form_slug.text());
        if slug.is_empty() {
            self.error = Some("Slug is required.".to_string());
            return;
        }
        let author = {
            let text = self.form_author.text().trim().to_string();
            if text.is_empty() {
                services.session.name.clone()
            } else {
                text
            }
        };

        if let Some(ref id) = self.editing_id {
            let updated = self.grid.update(id, |page| {
                page.title = title.clone();
                page.slug = slug.clone();
                page.author = author.clone();
                page.touch();
            });
            if updated {
                services.toast(Toast::success(format!("Updated {title}")));
            }
        } else {
            self.grid.prepend(SitePage::create(title.clone(), slug, author));
            services.toast(Toast::success(format!("Created {title}")));
        }

        self.modal = None;
        self.error = None;
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.render_grid(frame, area, theme);

        if let Some(modal) = self.modal {
            match modal {
                PageModal::Create | PageModal::Edit => {
                    self.render_form_modal(frame, area, modal, theme)
                }
                PageModal::DeleteOne => {
                    let title = self
                        .grid
                        .current()
                        .map(|p| p.title.clone())
                        .unwrap_or_else(|| "?".to_string());
                    render_confirm(
                        frame,
                        area,
                        theme,
                        " Delete Page ",
                        vec![
                            Span::raw("  Delete "),
                            Span::styled(title, theme.heading()),
                            Span::raw("?"),
                        ],
                    );
                }
                PageModal::DeleteSelected => {
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
                            Span::raw(" selected pages?"),
                        ],
                    );
                }
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let block = theme.block_focused(format!("Pages ({})", self.grid.len()));
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
                    "{}{} {}{} {}{} {}{} Status",
                    table::cell("Title", 24),
                    table::sort_marker(sort, PageSort::Title),
                    table::cell("Slug", 20),
                    " ",
                    table::cell("Author", 16),
                    table::sort_marker(sort, PageSort::Author),
                    table::cell("Modified", 10),
                    table::sort_marker(sort, PageSort::Modified),
                ),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No pages match. Press ", theme.muted()),
                Span::styled("a", theme.key_hint()),
                Span::styled(" to create one.", theme.muted()),
            ]));
        }

        for (i, page) in view.rows.iter().enumerate() {
            let is_cursor = i == self.grid.cursor();
            let cursor = if is_cursor { "▸ " } else { "  " };
            let row_style = if is_cursor {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let status_style = match page.status {
                PageStatus::Published => Style::default().fg(theme.success),
                PageStatus::Draft => Style::default().fg(theme.warning),
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
                    format!("{} ", table::checkbox(self.grid.is_selected(&page.id))),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&page.title, 24)), row_style),
                Span::styled(
                    format!("/{}  ", table::cell(&page.slug, 19)),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&page.author, 16)), theme.muted()),
                Span::styled(
                    format!("{}  ", table::cell(&page.modified.to_string(), 10)),
                    theme.muted(),
                ),
                Span::styled(page.status.label().to_string(), status_style),
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
                ("f", "status"),
                ("1-3", "sort"),
                ("a", "add"),
                ("e", "edit"),
                ("p", "publish"),
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

        if let Some(status) = criteria.status {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("[{}]", status.label()), theme.highlight()));
        }
        Line::from(spans)
    }

    fn render_form_modal(&self, frame: &mut Frame, area: Rect, modal: PageModal, theme: &Theme) {
        let modal_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, modal_area);

        let title = match modal {
            PageModal::Create => " New Page ",
            PageModal::Edit => " Edit Page ",
            _ => "",
        };
        let block = Block::default()
            .title(title)
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
                FormField::Title => ("Title", text_value(&self.form_title, is_focused, true)),
                FormField::Slug => ("Slug", text_value(&self.form_slug, is_focused, true)),
                FormField::Author => ("Author", {
                    let v = text_value(&self.form_author, is_focused, false);
                    if !is_focused && self.form_author.is_empty() {
                        "(defaults to you)".to_string()
                    } else {
                        v
                    }
                }),
            };

            let val_style = if is_focused {
                Style::default().fg(theme.text)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {marker} ")),
                Span::styled(format!("{:<8}", format!("{label}:")), label_style),
                Span::styled(value, val_style),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(table::hint_line(
            &[("Tab", "field"), ("Ctrl+Enter", "save"), ("Esc", "cancel")],
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

// ── Free helpers ───────────────────────────────────────────────────────────

/// Lowercase, trim, collapse whitespace runs to single hyphens, and drop
/// everything that is not alphanumeric or a hyphen.
fn normalize_slug(raw: &str) -> String {
    let mut slug = String::new();
    let mut last_hyphen = true;
    for c in raw.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            last_hyphen = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
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
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("Meet The Team"), "meet-the-team");
        assert_eq!(normalize_slug("  About Us!  "), "about-us");
        assert_eq!(normalize_slug("already-a-slug"), "already-a-slug");
        assert_eq!(normalize_slug("trailing "), "trailing");
        assert_eq!(normalize_slug("???"), "");
    }

    #[test]
    fn test_publish_toggle_bumps_modified() {
        let mut s = PagesViewState::new(10);
        let (services, mut rx) = test_services();
        let before = s.grid.current().unwrap().status;
        s.toggle_publish(&services);
        let after = s.grid.current().unwrap().status;
        assert_eq!(after, before.toggled());
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Toast(_))));
    }

    #[test]
    fn test_create_defaults_author_to_session() {
        let mut s = PagesViewState::new(10);
        let (services, _rx) = test_services();
        s.open_create_modal();
        s.form_title.set_text("Press Kit");
        s.form_slug.set_text("Press Kit");
        s.submit_form(&services);
        assert!(s.modal.is_none());
        let first = &s.grid.records()[0];
        assert_eq!(first.title, "Press Kit");
        assert_eq!(first.slug, "press-kit");
        assert_eq!(first.author, services.session.name);
        assert_eq!(first.status, PageStatus::Draft);
    }

    #[test]
    fn test_submit_requires_slug() {
        let mut s = PagesViewState::new(10);
        let (services, _rx) = test_services();
        s.open_create_modal();
        s.form_title.set_text("Press Kit");
        s.form_slug.set_text("???");
        s.submit_form(&services);
        assert_eq!(s.error.as_deref(), Some("Slug is required."));
    }

    #[test]
    fn test_edit_keeps_id_and_touches() {
        let mut s = PagesViewState::new(10);
        let (services, _rx) = test_services();
        let id = s.grid.current_id().unwrap();
        s.open_edit_modal();
        s.form_title.set_text("Renamed");
        s.submit_form(&services);
        let page = s.grid.records().iter().find(|p| p.id == id).unwrap();
        assert_eq!(page.title, "Renamed");
        assert_eq!(page.modified, chrono::Local::now().date_naive());
    }
}
