//! Jobs screen — manage the postings behind the careers page.
//!
//! Grid keys: `j`/`k` move, `[`/`]` page, `/` search, `f` status filter,
//! `F` department filter, `1`-`5` sort columns, `Space`/`A` select,
//! `a` add, `e` edit, `d`/`D` delete, `p` cycles posting status,
//! `Enter` toggles the detail panel.

use std::cmp::Ordering;

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, SortKey};
use crate::core::model::job::{JobPosting, JobStatus, JobType, DEPARTMENTS};
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
pub struct JobCriteria {
    pub search: String,
    pub status: Option<JobStatus>,
    pub department: Option<&'static str>,
}

impl Criteria<JobPosting> for JobCriteria {
    fn matches(&self, job: &JobPosting) -> bool {
        search_matches(&self.search, &[&job.title, &job.department, &job.location])
            && self.status.map_or(true, |s| job.status == s)
            && self.department.map_or(true, |d| job.department == d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSort {
    Title,
    Department,
    Posted,
    Closing,
    Applicants,
}

impl SortKey<JobPosting> for JobSort {
    fn compare(self, a: &JobPosting, b: &JobPosting) -> Ordering {
        match self {
            JobSort::Title => cmp_text(&a.title, &b.title),
            JobSort::Department => cmp_text(&a.department, &b.department),
            JobSort::Posted => a.posted_date.cmp(&b.posted_date),
            JobSort::Closing => a.closing_date.cmp(&b.closing_date),
            JobSort::Applicants => a.applicants.cmp(&b.applicants),
        }
    }
}

// ── Modal types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobModal {
    Create,
    Edit,
    DeleteOne,
    DeleteSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Title,
    Department,
    Location,
    Type,
    Experience,
    Closing,
    Description,
    Requirements,
}

const FORM_FIELDS: [FormField; 8] = [
    FormField::Title,
    FormField::Department,
    FormField::Location,
    FormField::Type,
    FormField::Experience,
    FormField::Closing,
    FormField::Description,
    FormField::Requirements,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

#[derive(Default)]
struct JobForm {
    title: InputBuffer,
    department: usize,
    location: InputBuffer,
    job_type: usize,
    experience: InputBuffer,
    closing: InputBuffer,
    description: InputBuffer,
    requirements: InputBuffer,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct JobsViewState {
    grid: GridState<JobPosting, JobCriteria, JobSort>,
    mode: Mode,
    search: InputBuffer,
    show_detail: bool,
    modal: Option<JobModal>,
    form: JobForm,
    form_focus: usize,
    editing_id: Option<String>,
    error: Option<String>,
}

impl JobsViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::jobs(), JobCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            show_detail: false,
            modal: None,
            form: JobForm::default(),
            form_focus: 0,
            editing_id: None,
            error: None,
        }
    }

    pub fn records(&self) -> &[JobPosting] {
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
                    .edit_criteria(|c| c.status = JobStatus::cycle_filter(c.status));
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('F')) => {
                self.grid
                    .edit_criteria(|c| c.department = cycle_department(c.department));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(JobSort::Title);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(JobSort::Department);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('3')) => {
                self.grid.toggle_sort(JobSort::Posted);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('4')) => {
                self.grid.toggle_sort(JobSort::Closing);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('5')) => {
                self.grid.toggle_sort(JobSort::Applicants);
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
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if self.grid.current_id().is_some() {
                    self.modal = Some(JobModal::DeleteOne);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
                if !self.grid.selection().is_empty() {
                    self.modal = Some(JobModal::DeleteSelected);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('p')) => {
                self.cycle_posting_status(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.show_detail = !self.show_detail;
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

    fn cycle_posting_status(&mut self, services: &Services) {
        let Some(id) = self.grid.current_id() else { return };
        let mut title = String::new();
        let mut status = None;
        self.grid.update(&id, |job| {
            job.status = next_status(job.status);
            title = job.title.clone();
            status = Some(job.status);
        });
        if let Some(status) = status {
            services.toast(Toast::info(format!("{title} is now {}", status.label())));
        }
    }

    fn handle_modal_input(
        &mut self,
        modal: JobModal,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match modal {
            JobModal::Create | JobModal::Edit => self.handle_form_input(code, modifiers, services),
            JobModal::DeleteOne => self.handle_delete_one(code, services),
            JobModal::DeleteSelected => self.handle_delete_selected(code, services),
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
                match FORM_FIELDS[self.form_focus] {
                    FormField::Department => {
                        self.form.department =
                            cycle_index(self.form.department, DEPARTMENTS.len(), code);
                    }
                    FormField::Type => {
                        self.form.job_type =
                            cycle_index(self.form.job_type, JobType::ALL.len(), code);
                    }
                    FormField::Title => route_text_input(&mut self.form.title, code, modifiers),
                    FormField::Location => {
                        route_text_input(&mut self.form.location, code, modifiers)
                    }
                    FormField::Experience => {
                        route_text_input(&mut self.form.experience, code, modifiers)
                    }
                    FormField::Closing => route_text_input(&mut self.form.closing, code, modifiers),
                    FormField::Description => {
                        route_text_input(&mut self.form.description, code, modifiers)
                    }
                    FormField::Requirements => {
                        route_text_input(&mut self.form.requirements, code, modifiers)
                    }
                }
                true
            }
        }
    }

    fn handle_delete_one(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(id) = self.grid.current_id() {
                    if let Some(job) = self.grid.remove(&id) {
                        services.toast(Toast::success(format!("Deleted {}", job.title)));
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

    fn handle_delete_selected(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let removed = self.grid.delete_selected();
                services.toast(Toast::success(format!("Deleted {removed} postings")));
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

    // ── Form helpers ───────────────────────────────────────────────────────

    fn open_create_modal(&mut self) {
        self.modal = Some(JobModal::Create);
        self.editing_id = None;
        self.form_focus = 0;
        self.form = JobForm::default();
        self.error = None;
    }

    fn open_edit_modal(&mut self) {
        let Some(job) = self.grid.current() else { return };
        self.modal = Some(JobModal::Edit);
        self.editing_id = Some(job.id.clone());
        self.form_focus = 0;
        self.error = None;

        let mut form = JobForm::default();
        form.title.set_text(&job.title);
        form.department = DEPARTMENTS
            .iter()
            .position(|&d| d == job.department)
            .unwrap_or(0);
        form.location.set_text(&job.location);
        form.job_type = JobType::ALL
            .iter()
            .position(|&t| t == job.job_type)
            .unwrap_or(0);
        form.experience.set_text(&job.experience);
        form.closing.set_text(&job.closing_date.format("%Y-%m-%d").to_string());
        form.description.set_text(&job.description);
        form.requirements.set_text(&job.requirements.join("; "));
        self.form = form;
    }

    fn submit_form(&mut self, services: &Services) {
        let title = self.form.title.text().trim().to_string();
        if title.is_empty() {
            self.error = Some("Title is required.".to_string());
            return;
        }
        let experience = self.form.experience.text().trim().to_string();
        if experience.is_empty() {
            self.error = Some("Experience is required.".to_string());
            return;
        }
        let closing_text = self.form.closing.text().trim().to_string();
        let Ok(closing_date) = NaiveDate::parse_from_str(&closing_text, "%Y-%m-%d") else {
            self.error = Some("Closing date must be YYYY-MM-DD.".to_string());
            return;
        };
        let description = self.form.description.text().trim().to_string();
        if description.is_empty() {
            self.error = Some("Description is required.".to_string());
            return;
        }

        let department = DEPARTMENTS[self.form.department].to_string();
        let location = self.form.location.text().trim().to_string();
        let job_type = JobType::ALL[self.form.job_type];
        let requirements: Vec<String> = self
            .form
            .requirements
            .text()
            .split(';')
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        if let Some(ref id) = self.editing_id {
            let updated = self.grid.update(id, |job| {
                job.title = title.clone();
                job.department = department.clone();
                job.location = location.clone();
                job.job_type = job_type;
                job.experience = experience.clone();
                job.closing_date = closing_date;
                job.description = description.clone();
                job.requirements = requirements.clone();
            });
            if updated {
                services.toast(Toast::success(format!("Updated {title}")));
            }
        } else {
            let mut job = JobPosting::create(
                title.clone(),
                department,
                location,
                job_type,
                experience,
                description,
                closing_date,
            );
            job.requirements = requirements;
            self.grid.prepend(job);
            services.toast(Toast::success(format!("Posted {title}")));
        }

        self.modal = None;
        self.error = None;
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
                JobModal::Create | JobModal::Edit => {
                    self.render_form_modal(frame, area, modal, theme)
                }
                JobModal::DeleteOne => self.render_delete_one(frame, area, theme),
                JobModal::DeleteSelected => self.render_delete_selected(frame, area, theme),
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let block = theme.block_focused(format!("Jobs ({})", self.grid.len()));
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
                    "{}{} {}{} {}{} {}{} {}{} {}",
                    table::cell("Title", 24),
                    table::sort_marker(sort, JobSort::Title),
                    table::cell("Department", 12),
                    table::sort_marker(sort, JobSort::Department),
                    table::cell("Type", 10),
                    " ",
                    table::cell("Posted", 10),
                    table::sort_marker(sort, JobSort::Posted),
                    table::cell("Closing", 10),
                    table::sort_marker(sort, JobSort::Closing),
                    table::cell_right("Appl", 5),
                ),
                theme.heading(),
            ),
            Span::styled(
                table::sort_marker(sort, JobSort::Applicants).to_string(),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No postings match. Press ", theme.muted()),
                Span::styled("a", theme.key_hint()),
                Span::styled(" to add one or ", theme.muted()),
                Span::styled("Esc", theme.key_hint()),
                Span::styled(" to clear the search.", theme.muted()),
            ]));
        }

        for (i, job) in view.rows.iter().enumerate() {
            let is_cursor = i == self.grid.cursor();
            let cursor = if is_cursor { "▸ " } else { "  " };
            let row_style = if is_cursor {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let status_style = match job.status {
                JobStatus::Active => Style::default().fg(theme.success),
                JobStatus::Closed => Style::default().fg(theme.text_muted),
                JobStatus::Draft => Style::default().fg(theme.warning),
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
                    format!("{} ", table::checkbox(self.grid.is_selected(&job.id))),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&job.title, 24)), row_style),
                Span::styled(
                    format!("{}  ", table::cell(&job.department, 12)),
                    row_style,
                ),
                Span::styled(
                    format!("{}  ", table::cell(job.job_type.label(), 10)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{}  ", table::cell(&job.posted_date.to_string(), 10)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{}  ", table::cell(&job.closing_date.to_string(), 10)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{} ", table::cell_right(&job.applicants.to_string(), 5)),
                    row_style,
                ),
                Span::styled(job.status.label().to_string(), status_style),
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
                ("F", "dept"),
                ("1-5", "sort"),
                ("a", "add"),
                ("e", "edit"),
                ("p", "cycle status"),
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
        if let Some(dept) = criteria.department {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("[{dept}]"), theme.highlight()));
        }
        Line::from(spans)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(job) = self.grid.current() else { return };

        let block = theme.block_default(table::truncate(&job.title, 30));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(job.title.clone(), theme.heading()),
        ]));
        for (label, value) in [
            ("Department: ", job.department.clone()),
            ("Location:   ", job.location.clone()),
            ("Type:       ", job.job_type.label().to_string()),
            ("Experience: ", job.experience.clone()),
            ("Posted:     ", job.posted_date.to_string()),
            ("Closing:    ", job.closing_date.to_string()),
            ("Status:     ", job.status.label().to_string()),
            ("Applicants: ", job.applicants.to_string()),
        ] {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(label.to_string(), theme.muted()),
                Span::raw(value),
            ]));
        }

        if !job.description.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("  DESCRIPTION", theme.heading())));
            for line in job.description.lines().take(6) {
                lines.push(Line::from(format!("  {line}")));
            }
        }
        if !job.requirements.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("  REQUIREMENTS", theme.heading())));
            for req in &job.requirements {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled("• ", Style::default().fg(theme.primary_light)),
                    Span::raw(table::truncate(req, 40)),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_form_modal(&self, frame: &mut Frame, area: Rect, modal: JobModal, theme: &Theme) {
        let modal_area = centered_rect(60, 70, area);
        frame.render_widget(Clear, modal_area);

        let title = match modal {
            JobModal::Create => " New Posting ",
            JobModal::Edit => " Edit Posting ",
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
                FormField::Title => ("Title", text_value(&self.form.title, is_focused, true)),
                FormField::Department => (
                    "Dept",
                    selector_value(DEPARTMENTS[self.form.department], is_focused),
                ),
                FormField::Location => {
                    ("Location", text_value(&self.form.location, is_focused, false))
                }
                FormField::Type => (
                    "Type",
                    selector_value(JobType::ALL[self.form.job_type].label(), is_focused),
                ),
                FormField::Experience => {
                    ("Exp", text_value(&self.form.experience, is_focused, true))
                }
                FormField::Closing => ("Closing", {
                    let v = text_value(&self.form.closing, is_focused, true);
                    if is_focused {
                        v
                    } else if self.form.closing.is_empty() {
                        "(required, YYYY-MM-DD)".to_string()
                    } else {
                        v
                    }
                }),
                FormField::Description => {
                    ("Desc", text_value(&self.form.description, is_focused, true))
                }
                FormField::Requirements => ("Reqs", {
                    let v = text_value(&self.form.requirements, is_focused, false);
                    if is_focused {
                        v
                    } else if self.form.requirements.is_empty() {
                        "(optional, separate with ;)".to_string()
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
                Span::styled(format!("{:<9}", format!("{label}:")), label_style),
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

    fn render_delete_one(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = self
            .grid
            .current()
            .map(|j| j.title.clone())
            .unwrap_or_else(|| "?".to_string());
        render_confirm(
            frame,
            area,
            theme,
            " Delete Posting ",
            vec![
                Span::raw("  Delete "),
                Span::styled(title, theme.heading()),
                Span::raw("?"),
            ],
        );
    }

    fn render_delete_selected(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_confirm(
            frame,
            area,
            theme,
            " Delete Selected ",
            vec![
                Span::raw("  Delete "),
                Span::styled(format!("{}", self.grid.selection().len()), theme.heading()),
                Span::raw(" selected postings?"),
            ],
        );
    }
}

// ── Free helpers ───────────────────────────────────────────────────────────

fn next_status(s: JobStatus) -> JobStatus {
    let idx = JobStatus::ALL.iter().position(|&x| x == s).unwrap_or(0);
    JobStatus::ALL[(idx + 1) % JobStatus::ALL.len()]
}

fn cycle_department(current: Option<&'static str>) -> Option<&'static str> {
    match current {
        None => DEPARTMENTS.first().copied(),
        Some(d) => {
            let idx = DEPARTMENTS.iter().position(|&x| x == d).unwrap_or(0);
            DEPARTMENTS.get(idx + 1).copied()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> JobsViewState {
        JobsViewState::new(10)
    }

    #[test]
    fn test_seeded_grid_starts_unfiltered() {
        let s = state();
        assert_eq!(s.grid.page_view().filtered_len, s.grid.len());
        assert!(s.grid.sort().is_none());
    }

    #[test]
    fn test_status_filter_narrows() {
        let mut s = state();
        s.grid.edit_criteria(|c| c.status = Some(JobStatus::Active));
        let view = s.grid.page_view();
        assert!(view.filtered_len > 0);
        assert!(view.rows.iter().all(|j| j.status == JobStatus::Active));
    }

    #[test]
    fn test_department_cycle_wraps_to_all() {
        let mut dept = None;
        for _ in 0..=DEPARTMENTS.len() {
            dept = cycle_department(dept);
        }
        assert_eq!(dept, None);
    }

    #[test]
    fn test_next_status_cycles() {
        assert_eq!(next_status(JobStatus::Active), JobStatus::Closed);
        assert_eq!(next_status(JobStatus::Closed), JobStatus::Draft);
        assert_eq!(next_status(JobStatus::Draft), JobStatus::Active);
    }

    #[test]
    fn test_open_edit_populates_form() {
        let mut s = state();
        s.open_edit_modal();
        assert_eq!(s.modal, Some(JobModal::Edit));
        assert!(s.editing_id.is_some());
        let current_title = s.grid.current().unwrap().title.clone();
        assert_eq!(s.form.title.text(), current_title);
    }

    #[test]
    fn test_submit_requires_title() {
        let mut s = state();
        s.open_create_modal();
        s.form.closing.set_text("2024-12-01");
        s.form.experience.set_text("2+ years");
        s.form.description.set_text("Work.");
        let (services, _rx) = test_services();
        s.submit_form(&services);
        assert_eq!(s.error.as_deref(), Some("Title is required."));
        assert_eq!(s.modal, Some(JobModal::Create));
    }

    #[test]
    fn test_submit_rejects_bad_closing_date() {
        let mut s = state();
        s.open_create_modal();
        s.form.title.set_text("QA Engineer");
        s.form.experience.set_text("2+ years");
        s.form.description.set_text("Test things.");
        s.form.closing.set_text("soon");
        let (services, _rx) = test_services();
        s.submit_form(&services);
        assert_eq!(s.error.as_deref(), Some("Closing date must be YYYY-MM-DD."));
    }

    #[test]
    fn test_submit_create_prepends() {
        let mut s = state();
        let before = s.grid.len();
        s.open_create_modal();
        s.form.title.set_text("QA Engineer");
        s.form.experience.set_text("2+ years");
        s.form.description.set_text("Test things.");
        s.form.closing.set_text("2024-12-01");
        s.form.requirements.set_text("Rust; CI pipelines; ");
        let (services, _rx) = test_services();
        s.submit_form(&services);
        assert!(s.modal.is_none());
        assert_eq!(s.grid.len(), before + 1);
        let first = &s.grid.records()[0];
        assert_eq!(first.title, "QA Engineer");
        assert_eq!(first.requirements, vec!["Rust", "CI pipelines"]);
    }

    fn test_services() -> (Services, tokio::sync::mpsc::UnboundedReceiver<crate::tui::events::AppEvent>)
    {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let config = crate::config::AppConfig::default();
        (Services::new(&config, tx), rx)
    }
}
