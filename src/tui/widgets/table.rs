//! Column formatting shared by the management grids.
//!
//! Each grid view renders its rows as padded text columns; these helpers
//! keep the widths and the sort markers consistent across screens.

use ratatui::text::{Line, Span};

use crate::core::grid::SortSpec;
use crate::tui::theme::Theme;

/// Truncate on char boundaries, ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        s.to_string()
    }
}

/// Left-aligned cell of exactly `width` chars.
pub fn cell(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width), width = width)
}

/// Right-aligned cell (numeric columns).
pub fn cell_right(text: &str, width: usize) -> String {
    format!("{:>width$}", truncate(text, width), width = width)
}

/// Header marker for a sortable column: the direction arrow on the active
/// sort column, a space elsewhere so widths stay stable.
pub fn sort_marker<K: Copy + PartialEq>(sort: Option<SortSpec<K>>, key: K) -> &'static str {
    match sort {
        Some(spec) if spec.key == key => spec.direction.arrow(),
        _ => " ",
    }
}

/// Selection checkbox cell.
pub fn checkbox(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Footer line: page position, match count, selection count.
pub fn pagination_line(
    page: usize,
    total_pages: usize,
    filtered_len: usize,
    selected: usize,
    theme: &Theme,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("  Page {page}/{total_pages} · {filtered_len} matching"),
        theme.muted(),
    )];
    if selected > 0 {
        spans.push(Span::styled(
            format!(" · {selected} selected"),
            theme.highlight(),
        ));
    }
    Line::from(spans)
}

/// Key-hint footer, e.g. `[("a", "add"), ("d", "delete")]`.
pub fn hint_line(hints: &[(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled((*key).to_string(), theme.key_hint()));
        spans.push(Span::raw(format!(":{action}")));
    }
    Line::from(spans)
}
