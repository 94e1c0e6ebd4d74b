//! Application shell: event loop, section routing, global keymap.
//!
//! Elm architecture over `tokio::select`: render a frame, wait for the
//! next tick / app event / terminal event, update state, repeat. Input
//! flows help modal → sidebar (when focused) → active view → global
//! keymap; a view returning `false` lets the key fall through.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::notify::{ToastCenter, ToastLevel};

use super::events::{Action, AppEvent, AreaFocus, Section};
use super::layout::AppLayout;
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme::Theme;
use super::views::applications::ApplicationsViewState;
use super::views::dashboard::{DashboardStats, DashboardViewState};
use super::views::documents::DocumentsViewState;
use super::views::inbox::InboxViewState;
use super::views::jobs::JobsViewState;
use super::views::media::MediaViewState;
use super::views::pages::PagesViewState;
use super::views::settings::SettingsViewState;
use super::views::tasks::TasksViewState;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently open section.
    pub section: Section,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    /// Sidebar navigation over the permitted sections.
    pub sidebar: SidebarState,
    pub dashboard: DashboardViewState,
    pub jobs: JobsViewState,
    pub applications: ApplicationsViewState,
    pub pages: PagesViewState,
    pub media: MediaViewState,
    pub documents: DocumentsViewState,
    pub tasks: TasksViewState,
    pub inbox: InboxViewState,
    pub settings: SettingsViewState,
    /// Live toast overlay.
    pub toasts: ToastCenter,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for app events (toasts, reply completions).
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        services: Services,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        // Sections the role cannot reach never enter the navigation set.
        let allowed: Vec<Section> = Section::ALL
            .into_iter()
            .filter(|s| services.session.can(s.required_permission()))
            .collect();
        let section = allowed.first().copied().unwrap_or(Section::Dashboard);
        let page_size = config.tui.page_size;

        let settings = SettingsViewState::new(
            services.session.clone(),
            services.prefs.path().display().to_string(),
            services.prefs.load().dark_mode,
        );

        Self {
            running: true,
            section,
            area_focus: AreaFocus::Main,
            sidebar: SidebarState::new(allowed),
            dashboard: DashboardViewState::new(),
            jobs: JobsViewState::new(page_size),
            applications: ApplicationsViewState::new(page_size),
            pages: PagesViewState::new(page_size),
            media: MediaViewState::new(page_size),
            documents: DocumentsViewState::new(page_size),
            tasks: TasksViewState::new(page_size),
            inbox: InboxViewState::new(page_size),
            settings,
            toasts: ToastCenter::new(),
            show_help: false,
            event_rx,
            services,
        }
    }

    fn theme(&self) -> Theme {
        Theme::for_dark_mode(self.settings.dark_mode())
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: help modal swallows everything
                if self.show_help {
                    if let Some(action) = map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: sidebar input (when focused)
                if self.area_focus == AreaFocus::Sidebar
                    && self.handle_sidebar_input(&crossterm_event)
                {
                    return;
                }

                // Priority 3: active view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 4: global keybindings
                if let Some(action) = self.map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Toast(toast) => self.toasts.push(toast),
            AppEvent::ReplyFinished { message_id, result } => {
                self.inbox
                    .on_reply_finished(&message_id, result, &self.services);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the open section's view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.section {
            Section::Dashboard => self.dashboard.handle_input(event),
            Section::Jobs => self.jobs.handle_input(event, &self.services),
            Section::Applications => self.applications.handle_input(event, &self.services),
            Section::Pages => self.pages.handle_input(event, &self.services),
            Section::Media => self.media.handle_input(event, &self.services),
            Section::Documents => self.documents.handle_input(event, &self.services),
            Section::Tasks => self.tasks.handle_input(event, &self.services),
            Section::Inbox => self.inbox.handle_input(event, &self.services),
            Section::Settings => self.settings.handle_input(event, &self.services),
        }
    }

    /// Handle sidebar-specific input. Returns true if consumed.
    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.sidebar.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.sidebar.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('l')) => {
                if let Some(section) = self.sidebar.selected_section() {
                    self.handle_action(section.to_action());
                }
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.sidebar.user_collapsed = true;
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.area_focus = AreaFocus::Main;
                true
            }
            _ => false,
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                // Digits jump to the Nth permitted section when the view
                // itself did not claim the key (most grids use 1-5 for sorts).
                KeyCode::Char(c @ '1'..='9') => {
                    let idx = (*c as u8 - b'1') as usize;
                    self.sidebar.allowed().get(idx).map(|s| s.to_action())
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Focus(section) => {
                // Fail closed: an action can never open a gated section.
                if self.sidebar.allowed().contains(&section) {
                    self.section = section;
                    self.sidebar.sync_to_section(section);
                    self.area_focus = AreaFocus::Main;
                }
            }
            Action::TabNext => self.cycle_section(1),
            Action::TabPrev => self.cycle_section(-1),
            Action::ToggleSidebar => {
                self.sidebar.toggle_collapse();
                if !self.sidebar.user_collapsed {
                    self.area_focus = AreaFocus::Sidebar;
                    self.sidebar.sync_to_section(self.section);
                }
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Step through the permitted sections, wrapping at either end.
    fn cycle_section(&mut self, step: isize) {
        let allowed = self.sidebar.allowed();
        if allowed.is_empty() {
            return;
        }
        let idx = allowed
            .iter()
            .position(|&s| s == self.section)
            .unwrap_or(0) as isize;
        let len = allowed.len() as isize;
        let next = allowed[(idx + step).rem_euclid(len) as usize];
        self.section = next;
        self.sidebar.sync_to_section(next);
    }

    /// Tick: expire toasts. Collection state has no background work.
    fn on_tick(&mut self) {
        self.toasts.dismiss_expired(Instant::now());
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let theme = self.theme();
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg_base)),
            area,
        );

        let (layout, visibility) = AppLayout::compute(area, self.sidebar.user_collapsed);

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar.render(
                frame,
                sidebar_area,
                visibility,
                self.section,
                self.area_focus,
                &theme,
            );
        }

        if self.sidebar.allowed().is_empty() {
            self.render_no_access(frame, layout.main, &theme);
        } else {
            self.render_content(frame, layout.main, &theme);
        }

        self.render_status_bar(frame, layout.status, &theme);
        self.render_toasts(frame, area, &theme);

        if self.show_help {
            self.render_help_modal(frame, area, &theme);
        }
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self.section {
            Section::Dashboard => {
                let stats = DashboardStats::gather(
                    self.jobs.records(),
                    self.applications.records(),
                    self.pages.records(),
                    self.media.records(),
                    self.documents.records(),
                    self.tasks.records(),
                    self.inbox.records(),
                );
                self.dashboard.render(frame, area, theme, &stats);
            }
            Section::Jobs => self.jobs.render(frame, area, theme),
            Section::Applications => self.applications.render(frame, area, theme),
            Section::Pages => self.pages.render(frame, area, theme),
            Section::Media => self.media.render(frame, area, theme),
            Section::Documents => self.documents.render(frame, area, theme),
            Section::Tasks => self.tasks.render(frame, area, theme),
            Section::Inbox => self.inbox.render(frame, area, theme),
            Section::Settings => self.settings.render(frame, area, theme),
        }
    }

    /// Shown when the session role maps to no permissions at all.
    fn render_no_access(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" No Access ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("Signed in as {}", self.services.session.name),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                format!(
                    "The role \"{}\" grants access to no sections.",
                    self.services.session.role
                ),
                theme.muted(),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Check the [session] role in config.toml, then restart.",
                theme.dim(),
            )),
            Line::raw(""),
            Line::from(Span::styled("Press q to quit.", theme.dim())),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let session = &self.services.session;
        let status = Line::from(vec![
            Span::styled(" OPSDESK ", theme.brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.section.label(),
                Style::default()
                    .fg(theme.primary_light)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(session.name.clone(), Style::default().fg(theme.text)),
            Span::styled(format!(" ({})", session.role), theme.muted()),
            Span::raw(" │ "),
            Span::styled("Tab", theme.key_hint()),
            Span::raw(":nav "),
            Span::styled("Ctrl+B", theme.key_hint()),
            Span::raw(":sidebar "),
            Span::styled("?", theme.key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme.key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(
            Paragraph::new(status).style(Style::default().bg(theme.bg_surface)),
            area,
        );
    }

    fn render_toasts(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let toasts = self.toasts.visible();
        if toasts.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = toasts.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let toast_area = Rect::new(x, 1, max_width, height);

        let lines: Vec<Line> = toasts
            .iter()
            .map(|t| {
                let (prefix, color) = match t.level {
                    ToastLevel::Info => ("ℹ", theme.info),
                    ToastLevel::Success => ("✓", theme.success),
                    ToastLevel::Warning => ("⚠", theme.warning),
                    ToastLevel::Error => ("✗", theme.error),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&t.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.bg_surface)),
            toast_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous section"),
            ("1-9", "Jump to section (when the grid is not sorting)"),
            ("Ctrl+B", "Toggle sidebar collapse/expand"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Sidebar (when focused):", ""),
            ("j/k", "Move selection"),
            ("Enter / l", "Open section"),
            ("h", "Collapse sidebar"),
            ("Esc", "Back to content"),
            ("", ""),
            ("Grids:", ""),
            ("j/k", "Move cursor"),
            ("[ / ]", "Previous / next page"),
            ("/", "Search (Enter commits, Esc clears)"),
            ("f / F", "Cycle filters"),
            ("1-5", "Sort by column (again to reverse)"),
            ("Space", "Select row"),
            ("A", "Select / clear all matching"),
            ("Enter", "Open detail"),
            ("a / e / d", "Create / edit / delete"),
            ("D", "Delete selected"),
            ("", ""),
            ("Screens:", ""),
            ("p", "Jobs: cycle status · Pages: publish toggle"),
            ("s/x/h", "Applications: shortlist / reject / hire"),
            ("c", "Tasks: mark complete"),
            ("u", "Inbox: unreplied only"),
            ("r", "Inbox: reply to message"),
            ("Space", "Settings: toggle dark mode"),
            ("", ""),
            ("Forms:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("← / → / Space", "Change selector value"),
            ("Ctrl+Enter", "Submit"),
            ("Esc", "Cancel"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                theme.title(),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    theme.title(),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default()
                            .fg(theme.primary_light)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled(
                "?",
                Style::default()
                    .fg(theme.primary_light)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" or "),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme.primary_light)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Map help modal input to an action; everything else is swallowed.
fn map_help_input(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match code {
        KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
