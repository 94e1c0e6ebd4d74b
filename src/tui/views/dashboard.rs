//! Dashboard — read-only overview of every collection.
//!
//! Stats are recomputed from the live view collections on each frame, so
//! the numbers always match what the other screens show. Nothing here
//! consumes input; all keys fall through to the global keymap.

use chrono::NaiveDate;
use crossterm::event::Event;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::model::{
    Application, ApplicationStatus, DocumentFile, InboxMessage, JobPosting, JobStatus, MediaAsset,
    MessageStatus, PageStatus, SitePage, TaskItem, TaskStatus,
};
use crate::tui::theme::Theme;
use crate::tui::widgets::table;

const RECENT_APPLICATIONS: usize = 5;

/// A snapshot of the collections, computed per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub active_jobs: usize,
    pub total_jobs: usize,
    pub new_applications: usize,
    pub total_applications: usize,
    pub published_pages: usize,
    pub total_pages: usize,
    pub media_assets: usize,
    pub documents: usize,
    pub open_tasks: usize,
    pub overdue_tasks: usize,
    pub unread_messages: usize,
    /// Applicant, posting title, and date of the latest submissions.
    pub recent_applications: Vec<(String, String, NaiveDate)>,
}

impl DashboardStats {
    #[allow(clippy::too_many_arguments)]
    pub fn gather(
        jobs: &[JobPosting],
        applications: &[Application],
        pages: &[SitePage],
        media: &[MediaAsset],
        documents: &[DocumentFile],
        tasks: &[TaskItem],
        messages: &[InboxMessage],
    ) -> Self {
        let mut recent: Vec<(String, String, NaiveDate)> = applications
            .iter()
            .map(|a| (a.applicant.clone(), a.job_title.clone(), a.applied_date))
            .collect();
        recent.sort_by(|a, b| b.2.cmp(&a.2));
        recent.truncate(RECENT_APPLICATIONS);

        Self {
            active_jobs: jobs.iter().filter(|j| j.status == JobStatus::Active).count(),
            total_jobs: jobs.len(),
            new_applications: applications
                .iter()
                .filter(|a| a.status == ApplicationStatus::New)
                .count(),
            total_applications: applications.len(),
            published_pages: pages
                .iter()
                .filter(|p| p.status == PageStatus::Published)
                .count(),
            total_pages: pages.len(),
            media_assets: media.len(),
            documents: documents.len(),
            open_tasks: tasks
                .iter()
                .filter(|t| {
                    matches!(t.status, TaskStatus::Pending | TaskStatus::InProgress)
                })
                .count(),
            overdue_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Overdue)
                .count(),
            unread_messages: messages
                .iter()
                .filter(|m| m.status == MessageStatus::New)
                .count(),
            recent_applications: recent,
        }
    }
}

pub struct DashboardViewState;

impl DashboardViewState {
    pub fn new() -> Self {
        Self
    }

    /// The dashboard has no local interactions.
    pub fn handle_input(&mut self, _event: &Event) -> bool {
        false
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, stats: &DashboardStats) {
        let rows = Layout::vertical([Constraint::Length(7), Constraint::Min(5)]).split(area);
        let panels = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[0]);

        self.render_panel(
            frame,
            panels[0],
            theme,
            "Recruitment",
            vec![
                stat_line("Active jobs", &format!("{}/{}", stats.active_jobs, stats.total_jobs), theme),
                stat_line("Applications", &stats.total_applications.to_string(), theme),
                badge_line("new", stats.new_applications, theme.info, theme),
            ],
        );
        self.render_panel(
            frame,
            panels[1],
            theme,
            "Content",
            vec![
                stat_line(
                    "Pages live",
                    &format!("{}/{}", stats.published_pages, stats.total_pages),
                    theme,
                ),
                stat_line("Media", &stats.media_assets.to_string(), theme),
                stat_line("Documents", &stats.documents.to_string(), theme),
            ],
        );
        self.render_panel(
            frame,
            panels[2],
            theme,
            "Operations",
            vec![
                stat_line("Open tasks", &stats.open_tasks.to_string(), theme),
                badge_line("overdue", stats.overdue_tasks, theme.error, theme),
                Line::raw(""),
            ],
        );
        self.render_panel(
            frame,
            panels[3],
            theme,
            "Inbox",
            vec![
                badge_line("unread", stats.unread_messages, theme.accent, theme),
                Line::raw(""),
                Line::raw(""),
            ],
        );

        self.render_recent(frame, rows[1], theme, stats);
    }

    fn render_panel(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        title: &str,
        body: Vec<Line<'static>>,
    ) {
        let block = theme.block_default(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::raw("")];
        lines.extend(body);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect, theme: &Theme, stats: &DashboardStats) {
        let block = theme.block_default("Recent Applications");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = vec![Line::raw("")];
        if stats.recent_applications.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("No applications yet.", theme.muted()),
            ]));
        }
        for (applicant, job_title, applied) in &stats.recent_applications {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{}  ", table::cell(applicant, 22)),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{}  ", table::cell(job_title, 28)), theme.muted()),
                Span::styled(applied.to_string(), theme.dim()),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Tab", theme.key_hint()),
            Span::raw(":next screen "),
            Span::styled("?", theme.key_hint()),
            Span::raw(":help"),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for DashboardViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn stat_line(label: &str, value: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<14}", label), theme.muted()),
        Span::styled(
            value.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Count with a colored tag, dimmed when zero.
fn badge_line(
    label: &str,
    count: usize,
    color: ratatui::style::Color,
    theme: &Theme,
) -> Line<'static> {
    let style = if count > 0 {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        theme.dim()
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{count} {label}"), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;

    #[test]
    fn test_gather_counts_by_status() {
        let stats = DashboardStats::gather(
            &seed::jobs(),
            &seed::applications(),
            &seed::pages(),
            &seed::media(),
            &seed::documents(),
            &seed::tasks(),
            &seed::inbox(),
        );

        let jobs = seed::jobs();
        let expected_active = jobs.iter().filter(|j| j.status == JobStatus::Active).count();
        assert_eq!(stats.active_jobs, expected_active);
        assert_eq!(stats.total_jobs, jobs.len());
        assert!(stats.new_applications <= stats.total_applications);
        assert!(stats.published_pages <= stats.total_pages);
    }

    #[test]
    fn test_recent_applications_newest_first_capped() {
        let stats = DashboardStats::gather(
            &[],
            &seed::applications(),
            &[],
            &[],
            &[],
            &[],
            &[],
        );
        assert!(stats.recent_applications.len() <= RECENT_APPLICATIONS);
        for window in stats.recent_applications.windows(2) {
            assert!(window[0].2 >= window[1].2);
        }
    }

    #[test]
    fn test_gather_on_empty_collections() {
        let stats = DashboardStats::gather(&[], &[], &[], &[], &[], &[], &[]);
        assert_eq!(stats, DashboardStats::default());
    }
}
