//! Applications screen — review what candidates submitted.
//!
//! Applications are created by the careers site, never here; the admin
//! reviews them. `Enter` opens the detail panel and marks a new
//! application as reviewed. `s`/`x`/`h` shortlist, reject, or hire the
//! highlighted candidate directly.

use std::cmp::Ordering;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, SortKey};
use crate::core::model::application::{Application, ApplicationStatus};
use crate::core::notify::Toast;
use crate::core::seed;
use crate::tui::services::Services;
use crate::tui::theme::Theme;
use crate::tui::widgets::confirm::render_confirm;
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};
use crate::tui::widgets::table;

// ── Criteria and sort ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ApplicationCriteria {
    pub search: String,
    pub status: Option<ApplicationStatus>,
}

impl Criteria<Application> for ApplicationCriteria {
    fn matches(&self, app: &Application) -> bool {
        search_matches(&self.search, &[&app.applicant, &app.job_title, &app.email])
            && self.status.map_or(true, |s| app.status == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationSort {
    Applicant,
    Job,
    Applied,
}

impl SortKey<Application> for ApplicationSort {
    fn compare(self, a: &Application, b: &Application) -> Ordering {
        match self {
            ApplicationSort::Applicant => cmp_text(&a.applicant, &b.applicant),
            ApplicationSort::Job => cmp_text(&a.job_title, &b.job_title),
            ApplicationSort::Applied => a.applied_date.cmp(&b.applied_date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppModal {
    DeleteOne,
    DeleteSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct ApplicationsViewState {
    grid: GridState<Application, ApplicationCriteria, ApplicationSort>,
    mode: Mode,
    search: InputBuffer,
    show_detail: bool,
    modal: Option<AppModal>,
}

impl ApplicationsViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::applications(), ApplicationCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            show_detail: false,
            modal: None,
        }
    }

    pub fn records(&self) -> &[Application] {
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
                    .edit_criteria(|c| c.status = ApplicationStatus::cycle_filter(c.status));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(ApplicationSort::Applicant);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(ApplicationSort::Job);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('3')) => {
                self.grid.toggle_sort(ApplicationSort::Applied);
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
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.transition(ApplicationStatus::Shortlisted, services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('x')) => {
                self.transition(ApplicationStatus::Rejected, services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.transition(ApplicationStatus::Hired, services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if self.grid.current_id().is_some() {
                    self.modal = Some(AppModal::DeleteOne);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
                if !self.grid.selection().is_empty() {
                    self.modal = Some(AppModal::DeleteSelected);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.toggle_detail(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if self.show_detail {
                    self.show_detail = false;
                    true
                } else if !self.grid.criteria().search.is_empty() {
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

    /// Opening the detail counts as reviewing: a new application moves to
    /// Reviewed the first time someone looks at it.
    fn toggle_detail(&mut self, services: &Services) {
        self.show_detail = !self.show_detail;
        if !self.show_detail {
            return;
        }
        let Some(id) = self.grid.current_id() else { return };
        let mut marked = None;
        self.grid.update(&id, |app| {
            if app.status == ApplicationStatus::New {
                app.status = ApplicationStatus::Reviewed;
                marked = Some(app.applicant.clone());
            }
        });
        if let Some(name) = marked {
            services.toast(Toast::info(format!("Marked {name} as reviewed")));
        }
    }

    fn transition(&mut self, to: ApplicationStatus, services: &Services) {
        let Some(id) = self.grid.current_id() else { return };
        let mut name = String::new();
        let changed = self.grid.update(&id, |app| {
            app.status = to;
            name = app.applicant.clone();
        });
        if changed {
            let verb = match to {
                ApplicationStatus::Shortlisted => "Shortlisted",
                ApplicationStatus::Rejected => "Rejected",
                ApplicationStatus::Hired => "Hired",
                ApplicationStatus::New => "Reopened",
                ApplicationStatus::Reviewed => "Reviewed",
            };
            services.toast(Toast::success(format!("{verb} {name}")));
        }
    }

    fn handle_modal_input(&mut self, modal: AppModal, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match modal {
                    AppModal::DeleteOne => {
                        if let Some(id) = self.grid.current_id() {
                            if let Some(app) = self.grid.remove(&id) {
                                services
                                    .toast(Toast::success(format!("Deleted {}", app.applicant)));
                            }
                        }
                    }
                    AppModal::DeleteSelected => {
                        let removed = self.grid.delete_selected();
                        services.toast(Toast::success(format!("Deleted {removed} applications")));
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
        if self.show_detail && self.grid.current().is_some() {
            let chunks =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(area);
            self.render_grid(frame, chunks[0], theme);
            self.render_detail(frame, chunks[1], theme);
        } else {
            self.render_grid(frame, area, theme);
        }

        if let Some(modal) = self.modal {
            match modal {
                AppModal::DeleteOne => {
                    let name = self
                        .grid
                        .current()
                        .map(|a| a.applicant.clone())
                        .unwrap_or_else(|| "?".to_string());
                    render_confirm(
                        frame,
                        area,
                        theme,
                        " Delete Application ",
                        vec![
                            Span::raw("  Delete the application from "),
                            Span::styled(name, theme.heading()),
                            Span::raw("?"),
                        ],
                    );
                }
                AppModal::DeleteSelected => {
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
                            Span::raw(" selected applications?"),
                        ],
                    );
                }
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let block = theme.block_focused(format!("Applications ({})", self.grid.len()));
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
                    "{}{} {}{} {}{} {}",
                    table::cell("Applicant", 20),
                    table::sort_marker(sort, ApplicationSort::Applicant),
                    table::cell("Position", 24),
                    table::sort_marker(sort, ApplicationSort::Job),
                    table::cell("Applied", 10),
                    table::sort_marker(sort, ApplicationSort::Applied),
                    "Status",
                ),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No applications match the current filters.", theme.muted()),
            ]));
        }

        for (i, app) in view.rows.iter().enumerate() {
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
                    format!("{} ", table::checkbox(self.grid.is_selected(&app.id))),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&app.applicant, 20)), row_style),
                Span::styled(
                    format!("{}  ", table::cell(&app.job_title, 24)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{}  ", table::cell(&app.applied_date.to_string(), 10)),
                    theme.muted(),
                ),
                Span::styled(
                    app.status.label().to_string(),
                    status_style(app.status, theme),
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
                ("f", "status"),
                ("1-3", "sort"),
                ("s", "shortlist"),
                ("x", "reject"),
                ("h", "hire"),
                ("Enter", "review"),
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

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(app) = self.grid.current() else { return };

        let block = theme.block_default(table::truncate(&app.applicant, 30));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(app.applicant.clone(), theme.heading()),
            Span::raw("  "),
            Span::styled(
                app.status.label().to_string(),
                status_style(app.status, theme),
            ),
        ]));
        for (label, value) in [
            ("Position:   ", app.job_title.clone()),
            ("Email:      ", app.email.clone()),
            ("Phone:      ", app.phone.clone()),
            ("Experience: ", app.experience.clone()),
            ("Applied:    ", app.applied_date.to_string()),
            ("Resume:     ", app.resume.clone()),
        ] {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(label.to_string(), theme.muted()),
                Span::raw(value),
            ]));
        }

        if let Some(ref notes) = app.notes {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("  NOTES", theme.heading())));
            for line in notes.lines().take(8) {
                lines.push(Line::from(format!("  {line}")));
            }
        }

        lines.push(Line::raw(""));
        lines.push(table::hint_line(
            &[("s", "shortlist"), ("x", "reject"), ("h", "hire"), ("Esc", "close")],
            theme,
        ));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn status_style(status: ApplicationStatus, theme: &Theme) -> Style {
    match status {
        ApplicationStatus::New => Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
        ApplicationStatus::Reviewed => Style::default().fg(theme.text_muted),
        ApplicationStatus::Shortlisted => Style::default().fg(theme.success),
        ApplicationStatus::Rejected => Style::default().fg(theme.error),
        ApplicationStatus::Hired => Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
