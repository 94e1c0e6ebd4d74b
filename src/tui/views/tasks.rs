//! Tasks screen — the team's shared to-do list.
//!
//! `c` completes the highlighted task. `f` cycles the status filter,
//! `F` the priority filter.

use std::cmp::Ordering;

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, SortKey};
use crate::core::model::task::{TaskItem, TaskPriority, TaskStatus};
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
pub struct TaskCriteria {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl Criteria<TaskItem> for TaskCriteria {
    fn matches(&self, task: &TaskItem) -> bool {
        search_matches(&self.search, &[&task.title, &task.assignee])
            && self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSort {
    Due,
    Priority,
    Title,
}

impl SortKey<TaskItem> for TaskSort {
    fn compare(self, a: &TaskItem, b: &TaskItem) -> Ordering {
        match self {
            TaskSort::Due => a.due_date.cmp(&b.due_date),
            TaskSort::Priority => a.priority.cmp(&b.priority),
            TaskSort::Title => cmp_text(&a.title, &b.title),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskModal {
    Create,
    Edit,
    DeleteOne,
    DeleteSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Title,
    Assignee,
    Due,
    Priority,
}

const FORM_FIELDS: [FormField; 4] = [
    FormField::Title,
    FormField::Assignee,
    FormField::Due,
    FormField::Priority,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct TasksViewState {
    grid: GridState<TaskItem, TaskCriteria, TaskSort>,
    mode: Mode,
    search: InputBuffer,
    modal: Option<TaskModal>,
    form_title: InputBuffer,
    form_assignee: InputBuffer,
    form_due: InputBuffer,
    form_priority: usize,
    form_focus: usize,
    editing_id: Option<String>,
    error: Option<String>,
}

impl TasksViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::tasks(), TaskCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            modal: None,
            form_title: InputBuffer::new(),
            form_assignee: InputBuffer::new(),
            form_due: InputBuffer::new(),
            form_priority: 0,
            form_focus: 0,
            editing_id: None,
            error: None,
        }
    }

    pub fn records(&self) -> &[TaskItem] {
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
                    .edit_criteria(|c| c.status = TaskStatus::cycle_filter(c.status));
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('F')) => {
                self.grid
                    .edit_criteria(|c| c.priority = TaskPriority::cycle_filter(c.priority));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(TaskSort::Due);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(TaskSort::Priority);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('3')) => {
                self.grid.toggle_sort(TaskSort::Title);
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
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                self.complete_current(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if self.grid.current_id().is_some() {
                    self.modal = Some(TaskModal::DeleteOne);
                }
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
                if !self.grid.selection().is_empty() {
                    self.modal = Some(TaskModal::DeleteSelected);
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

    fn complete_current(&mut self, services: &Services) {
        let Some(id) = self.grid.current_id() else { return };
        let mut completed = None;
        self.grid.update(&id, |task| {
            if task.status != TaskStatus::Completed {
                task.status = TaskStatus::Completed;
                completed = Some(task.title.clone());
            }
        });
        if let Some(title) = completed {
            services.toast(Toast::success(format!("Completed {title}")));
        }
    }

    fn handle_modal_input(
        &mut self,
        modal: TaskModal,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match modal {
            TaskModal::Create | TaskModal::Edit => {
                self.handle_form_input(code, modifiers, services)
            }
            TaskModal::DeleteOne => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    if let Some(id) = self.grid.current_id() {
                        if let Some(task) = self.grid.remove(&id) {
                            services.toast(Toast::success(format!("Deleted {}", task.title)));
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
            TaskModal::DeleteSelected => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let removed = self.grid.delete_selected();
                    services.toast(Toast::success(format!("Deleted {removed} tasks")));
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
                match FORM_FIELDS[self.form_focus] {
                    FormField::Priority => {
                        self.form_priority =
                            cycle_index(self.form_priority, TaskPriority::ALL.len(), code);
                    }
                    FormField::Title => route_text_input(&mut self.form_title, code, modifiers),
                    FormField::Assignee => {
                        route_text_input(&mut self.form_assignee, code, modifiers)
                    }
                    FormField::Due => route_text_input(&mut self.form_due, code, modifiers),
                }
                true
            }
        }
    }

    // ── Form helpers ───────────────────────────────────────────────────────

    fn open_create_modal(&mut self) {
        self.modal = Some(TaskModal::Create);
        self.editing_id = None;
        self.form_focus = 0;
        self.form_title.clear();
        self.form_assignee.clear();
        self.form_due.clear();
        self.form_priority = 0;
        self.error = None;
    }

    fn open_edit_modal(&mut self) {
        let Some(task) = self.grid.current() else { return };
        self.modal = Some(TaskModal::Edit);
        self.editing_id = Some(task.id.clone());
        self.form_focus = 0;
        self.error = None;
        let (title, assignee, due, priority) = (
            task.title.clone(),
            task.assignee.clone(),
            task.due_date.format("%Y-%m-%d").to_string(),
            task.priority,
        );
        self.form_title.set_text(&title);
        self.form_assignee.set_text(&assignee);
        self.form_due.set_text(&due);
        self.form_priority = TaskPriority::ALL
            .iter()
            .position(|&p| p == priority)
            .unwrap_or(0);
    }

    fn submit_form(&mut self, services: &Services) {
        let title = self.form_title.text().trim().to_string();
        if title.is_empty() {
            self.error = Some("Title is required.".to_string());
            return;
        }
        let assignee = self.form_assignee.text().trim().to_string();
        if assignee.is_empty() {
            self.error = Some("Assignee is required.".to_string());
            return;
        }
        let due_text = self.form_due.text().trim().to_string();
        let Ok(due_date) = NaiveDate::parse_from_str(&due_text, "%Y-%m-%d") else {
            self.error = Some("Due date must be YYYY-MM-DD.".to_string());
            return;
        };
        let priority = TaskPriority::ALL[self.form_priority];

        if let Some(ref id) = self.editing_id {
            let updated = self.grid.update(id, |task| {
                task.title = title.clone();
                task.assignee = assignee.clone();
                task.due_date = due_date;
                task.priority = priority;
            });
            if updated {
                services.toast(Toast::success(format!("Updated {title}")));
            }
        } else {
            self.grid
                .prepend(TaskItem::create(title.clone(), assignee, due_date, priority));
            services.toast(Toast::success(format!("Added {title}")));
        }

        self.modal = None;
        self.error = None;
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.render_grid(frame, area, theme);

        if let Some(modal) = self.modal {
            match modal {
                TaskModal::Create | TaskModal::Edit => {
                    self.render_form_modal(frame, area, modal, theme)
                }
                TaskModal::DeleteOne => {
                    let title = self
                        .grid
                        .current()
                        .map(|t| t.title.clone())
                        .unwrap_or_else(|| "?".to_string());
                    render_confirm(
                        frame,
                        area,
                        theme,
                        " Delete Task ",
                        vec![
                            Span::raw("  Delete "),
                            Span::styled(title, theme.heading()),
                            Span::raw("?"),
                        ],
                    );
                }
                TaskModal::DeleteSelected => {
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
                            Span::raw(" selected tasks?"),
                        ],
                    );
                }
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let block = theme.block_focused(format!("Tasks ({})", self.grid.len()));
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
                    table::cell("Title", 30),
                    table::sort_marker(sort, TaskSort::Title),
                    table::cell("Assignee", 16),
                    " ",
                    table::cell("Due", 10),
                    table::sort_marker(sort, TaskSort::Due),
                    table::cell("Priority", 8),
                    table::sort_marker(sort, TaskSort::Priority),
                ),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No tasks match. Press ", theme.muted()),
                Span::styled("a", theme.key_hint()),
                Span::styled(" to add one.", theme.muted()),
            ]));
        }

        for (i, task) in view.rows.iter().enumerate() {
            let is_cursor = i == self.grid.cursor();
            let cursor = if is_cursor { "▸ " } else { "  " };
            let done = task.status == TaskStatus::Completed;
            let row_style = if done {
                Style::default()
                    .fg(theme.text_dim)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if is_cursor {
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
                    format!("{} ", table::checkbox(self.grid.is_selected(&task.id))),
                    theme.muted(),
                ),
                Span::styled(format!("{}  ", table::cell(&task.title, 30)), row_style),
                Span::styled(
                    format!("{}  ", table::cell(&task.assignee, 16)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{}  ", table::cell(&task.due_date.to_string(), 10)),
                    theme.muted(),
                ),
                Span::styled(
                    format!("{}  ", table::cell(task.priority.label(), 8)),
                    priority_style(task.priority, theme),
                ),
                Span::styled(
                    task.status.label().to_string(),
                    status_style(task.status, theme),
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
                ("F", "priority"),
                ("1-3", "sort"),
                ("a", "add"),
                ("e", "edit"),
                ("c", "complete"),
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
        if let Some(priority) = criteria.priority {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("[{}]", priority.label()),
                theme.highlight(),
            ));
        }
        Line::from(spans)
    }

    fn render_form_modal(&self, frame: &mut Frame, area: Rect, modal: TaskModal, theme: &Theme) {
        let modal_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, modal_area);

        let title = match modal {
            TaskModal::Create => " New Task ",
            TaskModal::Edit => " Edit Task ",
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
                FormField::Assignee => {
                    ("Assignee", text_value(&self.form_assignee, is_focused, true))
                }
                FormField::Due => ("Due", {
                    let v = text_value(&self.form_due, is_focused, true);
                    if !is_focused && self.form_due.is_empty() {
                        "(required, YYYY-MM-DD)".to_string()
                    } else {
                        v
                    }
                }),
                FormField::Priority => (
                    "Priority",
                    selector_value(TaskPriority::ALL[self.form_priority].label(), is_focused),
                ),
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

fn priority_style(priority: TaskPriority, theme: &Theme) -> Style {
    match priority {
        TaskPriority::High => Style::default().fg(theme.error),
        TaskPriority::Medium => Style::default().fg(theme.warning),
        TaskPriority::Low => Style::default().fg(theme.text_muted),
    }
}

fn status_style(status: TaskStatus, theme: &Theme) -> Style {
    match status {
        TaskStatus::Pending => Style::default().fg(theme.text_muted),
        TaskStatus::InProgress => Style::default().fg(theme.info),
        TaskStatus::Overdue => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        TaskStatus::Completed => Style::default().fg(theme.success),
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
    fn test_complete_marks_and_toasts_once() {
        let mut s = TasksViewState::new(10);
        let (services, mut rx) = test_services();
        s.complete_current(&services);
        assert_eq!(s.grid.current().unwrap().status, TaskStatus::Completed);
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Toast(_))));

        // Completing an already completed task is a no-op
        s.complete_current(&services);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_priority_filter_narrows() {
        let mut s = TasksViewState::new(10);
        s.grid
            .edit_criteria(|c| c.priority = Some(TaskPriority::High));
        let view = s.grid.page_view();
        assert!(view.rows.iter().all(|t| t.priority == TaskPriority::High));
    }

    #[test]
    fn test_priority_sort_orders_low_to_high() {
        let mut s = TasksViewState::new(50);
        s.grid.toggle_sort(TaskSort::Priority);
        let view = s.grid.page_view();
        let priorities: Vec<TaskPriority> = view.rows.iter().map(|t| t.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_submit_requires_assignee() {
        let mut s = TasksViewState::new(10);
        let (services, _rx) = test_services();
        s.open_create_modal();
        s.form_title.set_text("Ship the release notes");
        s.form_due.set_text("2024-05-01");
        s.submit_form(&services);
        assert_eq!(s.error.as_deref(), Some("Assignee is required."));
    }

    #[test]
    fn test_create_task_starts_pending() {
        let mut s = TasksViewState::new(10);
        let (services, _rx) = test_services();
        s.open_create_modal();
        s.form_title.set_text("Ship the release notes");
        s.form_assignee.set_text("Robin");
        s.form_due.set_text("2024-05-01");
        s.form_priority = 2;
        s.submit_form(&services);
        let first = &s.grid.records()[0];
        assert_eq!(first.status, TaskStatus::Pending);
        assert_eq!(first.priority, TaskPriority::High);
    }
}
