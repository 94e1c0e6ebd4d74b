//! Inbox screen — contact-form messages and outbound replies.
//!
//! `Enter` opens a message (marking it read), `r` opens the reply
//! composer. Sends run on the reply transport in the background; the
//! result comes back through the app event channel and lands in
//! [`on_reply_finished`](InboxViewState::on_reply_finished).

use std::cmp::Ordering;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, SortKey};
use crate::core::model::message::{InboxMessage, MessageStatus};
use crate::core::notify::Toast;
use crate::core::seed;
use crate::tui::app::centered_rect;
use crate::tui::events::AppEvent;
use crate::tui::services::Services;
use crate::tui::theme::Theme;
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};
use crate::tui::widgets::table;

// ── Criteria and sort ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MessageCriteria {
    pub search: String,
    pub unreplied_only: bool,
}

impl Criteria<InboxMessage> for MessageCriteria {
    fn matches(&self, msg: &InboxMessage) -> bool {
        search_matches(&self.search, &[&msg.sender, &msg.subject])
            && (!self.unreplied_only || msg.status != MessageStatus::Replied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSort {
    Received,
    Sender,
}

impl SortKey<InboxMessage> for MessageSort {
    fn compare(self, a: &InboxMessage, b: &InboxMessage) -> Ordering {
        match self {
            MessageSort::Received => a.received.cmp(&b.received),
            MessageSort::Sender => cmp_text(&a.sender, &b.sender),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct InboxViewState {
    grid: GridState<InboxMessage, MessageCriteria, MessageSort>,
    mode: Mode,
    search: InputBuffer,
    show_detail: bool,
    composing: bool,
    reply_body: InputBuffer,
    /// Message id and body of the send currently in flight.
    pending_reply: Option<(String, String)>,
    error: Option<String>,
}

impl InboxViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            grid: GridState::new(seed::inbox(), MessageCriteria::default(), page_size),
            mode: Mode::Browse,
            search: InputBuffer::new(),
            show_detail: false,
            composing: false,
            reply_body: InputBuffer::new(),
            pending_reply: None,
            error: None,
        }
    }

    pub fn records(&self) -> &[InboxMessage] {
        self.grid.records()
    }

    // ── Input handling ─────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = event else {
            return false;
        };

        if self.composing {
            return self.handle_composer_input(*code, *modifiers, services);
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
            (KeyModifiers::NONE, KeyCode::Char('u')) => {
                self.grid
                    .edit_criteria(|c| c.unreplied_only = !c.unreplied_only);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('1')) => {
                self.grid.toggle_sort(MessageSort::Received);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('2')) => {
                self.grid.toggle_sort(MessageSort::Sender);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.toggle_detail();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                if self.grid.current().is_some() {
                    self.open_detail_and_mark_read();
                    self.composing = true;
                    self.reply_body.clear();
                    self.error = None;
                }
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

    fn toggle_detail(&mut self) {
        if self.show_detail {
            self.show_detail = false;
        } else {
            self.open_detail_and_mark_read();
        }
    }

    fn open_detail_and_mark_read(&mut self) {
        let Some(id) = self.grid.current_id() else { return };
        self.show_detail = true;
        self.grid.update(&id, |msg| msg.mark_read());
    }

    fn handle_composer_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.composing = false;
                self.error = None;
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.send_reply(services);
                true
            }
            _ => {
                route_text_input(&mut self.reply_body, code, modifiers);
                true
            }
        }
    }

    /// Hand the reply to the transport. The composer closes right away;
    /// the grid is only updated once the transport reports success.
    fn send_reply(&mut self, services: &Services) {
        let Some(msg) = self.grid.current() else { return };
        let body = self.reply_body.text().trim().to_string();
        if body.is_empty() {
            self.error = Some("Reply body is empty.".to_string());
            return;
        }
        if self.pending_reply.is_some() {
            self.error = Some("A reply is already sending.".to_string());
            return;
        }

        let message_id = msg.id.clone();
        let to = msg.email.clone();
        let subject = format!("Re: {}", msg.subject);
        self.pending_reply = Some((message_id.clone(), body.clone()));
        self.composing = false;
        self.error = None;

        let transport = services.replies.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let result = transport.send(&to, &subject, &body).await;
            let _ = tx.send(AppEvent::ReplyFinished {
                message_id,
                result: result.map_err(|e| e.to_string()),
            });
        });
    }

    /// Called by the app when the transport settles.
    pub fn on_reply_finished(
        &mut self,
        message_id: &str,
        result: Result<(), String>,
        services: &Services,
    ) {
        let Some((pending_id, body)) = self.pending_reply.take() else {
            return;
        };
        if pending_id != message_id {
            // A stale completion for a message we no longer track.
            log::warn!("Reply completion for unknown message {message_id}");
            return;
        }

        match result {
            Ok(()) => {
                let mut sender = String::new();
                self.grid.update(&pending_id, |msg| {
                    msg.record_reply(body);
                    sender = msg.sender.clone();
                });
                services.toast(Toast::success(format!("Reply sent to {sender}")));
            }
            Err(err) => {
                services.toast(Toast::error(format!("Reply failed: {err}")));
            }
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.show_detail && self.grid.current().is_some() {
            let chunks =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(area);
            self.render_grid(frame, chunks[0], theme);
            self.render_detail(frame, chunks[1], theme);
        } else {
            self.render_grid(frame, area, theme);
        }

        if self.composing {
            self.render_composer(frame, area, theme);
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let view = self.grid.page_view();
        let unread = self
            .grid
            .records()
            .iter()
            .filter(|m| m.status == MessageStatus::New)
            .count();
        let mut block = theme.block_focused(format!("Inbox ({unread} new)"));
        if self.pending_reply.is_some() {
            block = block.title_bottom(Line::styled(
                " sending... ",
                Style::default().fg(theme.primary_light),
            ));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::raw(""));
        lines.push(self.filter_line(theme));
        lines.push(Line::raw(""));

        let sort = self.grid.sort();
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!(
                    "{}{} {}{} {}",
                    table::cell("From", 20),
                    table::sort_marker(sort, MessageSort::Sender),
                    table::cell("Subject", 30),
                    " ",
                    format!(
                        "{}{}",
                        table::cell("Received", 10),
                        table::sort_marker(sort, MessageSort::Received)
                    ),
                ),
                theme.heading(),
            ),
        ]));

        if view.rows.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("Nothing here. The inbox is clear.", theme.muted()),
            ]));
        }

        for (i, msg) in view.rows.iter().enumerate() {
            let is_cursor = i == self.grid.cursor();
            let cursor = if is_cursor { "▸ " } else { "  " };
            let (marker, marker_style) = match msg.status {
                MessageStatus::New => ("● ", Style::default().fg(theme.info)),
                MessageStatus::Read => ("  ", Style::default()),
                MessageStatus::Replied => ("↩ ", Style::default().fg(theme.success)),
            };
            let row_style = if msg.status == MessageStatus::New {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else if is_cursor {
                Style::default().fg(theme.text)
            } else {
                theme.muted()
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
                Span::styled(marker.to_string(), marker_style),
                Span::styled(format!("{}  ", table::cell(&msg.sender, 19)), row_style),
                Span::styled(format!("{}  ", table::cell(&msg.subject, 30)), row_style),
                Span::styled(
                    table::cell(&msg.received.to_string(), 10),
                    theme.muted(),
                ),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(table::pagination_line(
            view.page,
            view.total_pages,
            view.filtered_len,
            0,
            theme,
        ));
        lines.push(table::hint_line(
            &[
                ("/", "search"),
                ("u", "unreplied"),
                ("1-2", "sort"),
                ("Enter", "open"),
                ("r", "reply"),
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

        if criteria.unreplied_only {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("[Unreplied]", theme.highlight()));
        }
        Line::from(spans)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(msg) = self.grid.current() else { return };

        let block = theme.block_default(table::truncate(&msg.subject, 40));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("From:     ", theme.muted()),
            Span::styled(msg.sender.clone(), theme.heading()),
            Span::styled(format!("  <{}>", msg.email), theme.dim()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Received: ", theme.muted()),
            Span::raw(msg.received.to_string()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Status:   ", theme.muted()),
            Span::raw(msg.status.label()),
        ]));

        lines.push(Line::raw(""));
        for line in msg.body.lines().take(12) {
            lines.push(Line::from(format!("  {line}")));
        }

        if let Some(ref reply) = msg.reply {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("  YOUR REPLY", theme.heading())));
            for line in reply.lines().take(8) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(line.to_string(), Style::default().fg(theme.success)),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(table::hint_line(&[("r", "reply"), ("Esc", "close")], theme));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_composer(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(msg) = self.grid.current() else { return };
        let modal_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(format!(" Reply to {} ", table::truncate(&msg.sender, 24)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let mut lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("Subject: ", theme.muted()),
                Span::raw(format!("Re: {}", msg.subject)),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{}▎", self.reply_body.text()),
                    Style::default().fg(theme.text),
                ),
            ]),
            Line::raw(""),
        ];
        lines.push(table::hint_line(&[("Enter", "send"), ("Esc", "cancel")], theme));
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
    use tokio::sync::mpsc;

    fn test_services() -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Services::new(&AppConfig::default(), tx), rx)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_open_marks_read() {
        let mut s = InboxViewState::new(10);
        let (services, _rx) = test_services();
        assert_eq!(s.grid.current().unwrap().status, MessageStatus::New);
        assert!(s.handle_input(&key(KeyCode::Enter), &services));
        assert_eq!(s.grid.current().unwrap().status, MessageStatus::Read);
    }

    #[test]
    fn test_unreplied_filter_hides_replied() {
        let mut s = InboxViewState::new(10);
        let (services, _rx) = test_services();
        assert!(s.handle_input(&key(KeyCode::Char('u')), &services));
        let view = s.grid.page_view();
        assert!(view
            .rows
            .iter()
            .all(|m| m.status != MessageStatus::Replied));
    }

    #[test]
    fn test_empty_reply_is_rejected_before_send() {
        let mut s = InboxViewState::new(10);
        let (services, _rx) = test_services();
        assert!(s.handle_input(&key(KeyCode::Char('r')), &services));
        assert!(s.composing);
        s.reply_body.set_text("   ");
        s.send_reply(&services);
        assert_eq!(s.error.as_deref(), Some("Reply body is empty."));
        assert!(s.pending_reply.is_none());
        assert!(s.composing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_round_trip_updates_message() {
        let mut s = InboxViewState::new(10);
        let (services, mut rx) = test_services();

        assert!(s.handle_input(&key(KeyCode::Char('r')), &services));
        s.reply_body.set_text("Thanks, we will be in touch.");
        s.send_reply(&services);
        assert!(!s.composing);
        assert!(s.pending_reply.is_some());

        // The transport completes in the background and reports back.
        let event = rx.recv().await.expect("reply completion");
        let AppEvent::ReplyFinished { message_id, result } = event else {
            panic!("expected reply completion, got {event:?}");
        };
        assert!(result.is_ok());

        s.on_reply_finished(&message_id, result, &services);
        assert!(s.pending_reply.is_none());
        let msg = s.grid.current().unwrap();
        assert_eq!(msg.status, MessageStatus::Replied);
        assert_eq!(msg.reply.as_deref(), Some("Thanks, we will be in touch."));

        // Success toast follows
        match rx.recv().await {
            Some(AppEvent::Toast(toast)) => {
                assert!(toast.message.starts_with("Reply sent to"));
            }
            other => panic!("expected toast, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_reply_leaves_message_unchanged() {
        let mut s = InboxViewState::new(10);
        let (services, mut rx) = test_services();
        let id = s.grid.current_id().unwrap();
        let before = s.grid.current().unwrap().clone();

        s.pending_reply = Some((id.clone(), "body".into()));
        s.on_reply_finished(&id, Err("relay offline".into()), &services);

        assert_eq!(s.grid.current().unwrap(), &before);
        match rx.try_recv() {
            Ok(AppEvent::Toast(toast)) => {
                assert_eq!(toast.message, "Reply failed: relay offline");
            }
            other => panic!("expected error toast, got {other:?}"),
        }
    }
}
