//! Generic data-grid controller shared by every management screen.
//!
//! Each screen owns one [`GridState`]: the full record collection plus the
//! user-facing criteria (free-text search, categorical filters, sort spec,
//! pagination, row selection). The controller derives the exact visible rows
//! from those inputs and applies mutations (create/update/delete, bulk
//! delete) back onto the collection, keeping selection and page number
//! consistent throughout.
//!
//! Screens supply only their field mappings: a record type implementing
//! [`Record`], a criteria struct implementing [`Criteria`], and a sort-key
//! enum implementing [`SortKey`].

use std::cmp::Ordering;
use std::collections::HashSet;

/// A row in a grid collection. Identifiers are unique within a collection
/// and stable across edits.
pub trait Record {
    fn id(&self) -> &str;
}

/// Per-screen filter criteria: free-text search over designated fields plus
/// categorical equality filters where a dedicated "All" variant means
/// unconstrained.
pub trait Criteria<R> {
    /// Whether `record` survives the current search and categorical filters.
    fn matches(&self, record: &R) -> bool;
}

/// Per-screen enumeration of sortable columns.
pub trait SortKey<R>: Copy + PartialEq {
    fn compare(self, a: &R, b: &R) -> Ordering;
}

/// Sort direction. New sort columns start ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Column-header marker.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

/// The active sort: which column, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: Direction,
}

/// Case-insensitive substring match over the designated text fields.
/// An empty (or whitespace-only) needle matches everything.
pub fn search_matches(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

/// Case-insensitive ordering for text columns.
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// One page of derived rows, plus the pagination facts the footer needs.
pub struct PageView<'a, R> {
    /// Rows of the current page, in filtered-then-sorted order.
    pub rows: Vec<&'a R>,
    /// Total records surviving the filter (across all pages).
    pub filtered_len: usize,
    /// Effective (clamped) 1-based page number.
    pub page: usize,
    /// Always at least 1, even for an empty filtered set.
    pub total_pages: usize,
}

/// Collection + criteria + selection state for one screen.
pub struct GridState<R, C, K> {
    records: Vec<R>,
    criteria: C,
    sort: Option<SortSpec<K>>,
    /// 1-based. Reset to 1 whenever criteria or sort change.
    page: usize,
    page_size: usize,
    selection: HashSet<String>,
    /// Highlighted row within the current page (0-based).
    cursor: usize,
}

impl<R: Record, C: Criteria<R>, K: SortKey<R>> GridState<R, C, K> {
    pub fn new(records: Vec<R>, criteria: C, page_size: usize) -> Self {
        Self {
            records,
            criteria,
            sort: None,
            page: 1,
            page_size: page_size.max(1),
            selection: HashSet::new(),
            cursor: 0,
        }
    }

    // ── Derived views ──────────────────────────────────────────────────────

    /// Records surviving the filter, in collection order, then sorted.
    /// Filtering never reorders; `Vec::sort_by` is stable, so equal sort
    /// keys keep their relative order.
    pub fn filtered(&self) -> Vec<&R> {
        let mut rows: Vec<&R> = self
            .records
            .iter()
            .filter(|r| self.criteria.matches(r))
            .collect();
        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| {
                let ord = spec.key.compare(a, b);
                match spec.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    /// The slice shown on screen. Page bounds are clamped; a page past the
    /// end yields the last valid page rather than panicking.
    pub fn page_view(&self) -> PageView<'_, R> {
        let rows = self.filtered();
        let filtered_len = rows.len();
        let total_pages = page_count(filtered_len, self.page_size);
        let page = self.page.min(total_pages);
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(filtered_len);
        let rows = if start < filtered_len {
            rows[start..end].to_vec()
        } else {
            Vec::new()
        };
        PageView {
            rows,
            filtered_len,
            page,
            total_pages,
        }
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.filtered().len(), self.page_size)
    }

    // ── Criteria ───────────────────────────────────────────────────────────

    pub fn criteria(&self) -> &C {
        &self.criteria
    }

    /// Mutate the criteria, then reset the page to 1 and prune the selection
    /// to ids still present in the filtered view. Stale page numbers from a
    /// previous filter must never be shown against a new one.
    pub fn edit_criteria(&mut self, edit: impl FnOnce(&mut C)) {
        edit(&mut self.criteria);
        self.page = 1;
        self.prune_selection_to_view();
        self.clamp_cursor();
    }

    // ── Sort ───────────────────────────────────────────────────────────────

    pub fn sort(&self) -> Option<SortSpec<K>> {
        self.sort
    }

    /// Same column flips direction; a new column resets to ascending.
    /// Either way the page returns to 1.
    pub fn toggle_sort(&mut self, key: K) {
        self.sort = match self.sort {
            Some(spec) if spec.key == key => Some(SortSpec {
                key,
                direction: spec.direction.flipped(),
            }),
            _ => Some(SortSpec {
                key,
                direction: Direction::Ascending,
            }),
        };
        self.page = 1;
        self.clamp_cursor();
    }

    // ── Pagination ─────────────────────────────────────────────────────────

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
            self.cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.cursor = 0;
        }
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Add if absent, remove if present. Callers only expose ids of
    /// currently visible rows.
    pub fn toggle_selected(&mut self, id: &str) {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Toggle-all over the filtered view: if the selection already equals
    /// the full visible id set, clear it; otherwise select all of it.
    pub fn toggle_select_all(&mut self) {
        let visible: HashSet<String> = self
            .filtered()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        if !visible.is_empty() && self.selection == visible {
            self.selection.clear();
        } else {
            self.selection = visible;
        }
    }

    // ── Cursor ─────────────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_next(&mut self) {
        let rows = self.page_view().rows.len();
        if rows > 0 && self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// The row under the cursor, if the page is non-empty.
    pub fn current(&self) -> Option<&R> {
        self.page_view().rows.get(self.cursor).copied()
    }

    pub fn current_id(&self) -> Option<String> {
        self.current().map(|r| r.id().to_string())
    }

    // ── Mutations ──────────────────────────────────────────────────────────

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// New records go to the front of the collection.
    pub fn prepend(&mut self, record: R) {
        self.records.insert(0, record);
    }

    /// Apply `apply` to the record with `id`. Returns false (and changes
    /// nothing) when the id is absent.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut R)) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                apply(record);
                true
            }
            None => false,
        }
    }

    /// Remove a single record, dropping it from the selection as well.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let idx = self.records.iter().position(|r| r.id() == id)?;
        self.selection.remove(id);
        let record = self.records.remove(idx);
        self.clamp_page();
        Some(record)
    }

    /// Remove every selected record, preserving the relative order of
    /// survivors. Clears the selection and returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let doomed = std::mem::take(&mut self.selection);
        let before = self.records.len();
        self.records.retain(|r| !doomed.contains(r.id()));
        self.clamp_page();
        before - self.records.len()
    }

    // ── Internal ───────────────────────────────────────────────────────────

    fn prune_selection_to_view(&mut self) {
        let visible: HashSet<String> = self
            .records
            .iter()
            .filter(|r| self.criteria.matches(r))
            .map(|r| r.id().to_string())
            .collect();
        self.selection.retain(|id| visible.contains(id));
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        if self.page > total {
            self.page = total;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let rows = self.page_view().rows.len();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }
}

/// `max(1, ceil(len / size))` — an empty filtered set still has one
/// (empty) page so the footer never divides by zero.
fn page_count(len: usize, size: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(size)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
        rank: u32,
        active: bool,
    }

    impl Row {
        fn new(id: &str, name: &str, rank: u32, active: bool) -> Self {
            Self {
                id: id.to_string(),
                name: name.to_string(),
                rank,
                active,
            }
        }
    }

    impl Record for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[derive(Default)]
    struct RowCriteria {
        search: String,
        active_only: bool,
    }

    impl Criteria<Row> for RowCriteria {
        fn matches(&self, row: &Row) -> bool {
            search_matches(&self.search, &[&row.name]) && (!self.active_only || row.active)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowKey {
        Name,
        Rank,
    }

    impl SortKey<Row> for RowKey {
        fn compare(self, a: &Row, b: &Row) -> Ordering {
            match self {
                RowKey::Name => cmp_text(&a.name, &b.name),
                RowKey::Rank => a.rank.cmp(&b.rank),
            }
        }
    }

    fn grid(rows: Vec<Row>, page_size: usize) -> GridState<Row, RowCriteria, RowKey> {
        GridState::new(rows, RowCriteria::default(), page_size)
    }

    fn thirteen() -> Vec<Row> {
        (1..=13)
            .map(|i| Row::new(&format!("id-{i}"), &format!("row {i:02}"), i, i % 2 == 0))
            .collect()
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut g = grid(thirteen(), 50);
        g.edit_criteria(|c| c.active_only = true);
        let ids: Vec<&str> = g.filtered().iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["id-2", "id-4", "id-6", "id-8", "id-10", "id-12"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut g = grid(
            vec![
                Row::new("a", "Senior Engineer", 1, true),
                Row::new("b", "Designer", 2, true),
            ],
            50,
        );
        g.edit_criteria(|c| c.search = "ENGINEER".to_string());
        assert_eq!(g.filtered().len(), 1);
        assert_eq!(g.filtered()[0].id, "a");
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let g = grid(thirteen(), 50);
        assert_eq!(g.filtered().len(), 13);
        assert!(search_matches("", &["anything"]));
        assert!(search_matches("   ", &["anything"]));
    }

    #[test]
    fn test_toggle_sort_same_key_flips_direction() {
        let mut g = grid(thirteen(), 50);
        g.toggle_sort(RowKey::Rank);
        assert_eq!(
            g.sort(),
            Some(SortSpec {
                key: RowKey::Rank,
                direction: Direction::Ascending
            })
        );
        g.toggle_sort(RowKey::Rank);
        assert_eq!(
            g.sort(),
            Some(SortSpec {
                key: RowKey::Rank,
                direction: Direction::Descending
            })
        );
    }

    #[test]
    fn test_toggle_sort_new_key_resets_ascending() {
        let mut g = grid(thirteen(), 50);
        g.toggle_sort(RowKey::Rank);
        g.toggle_sort(RowKey::Rank);
        g.toggle_sort(RowKey::Name);
        assert_eq!(
            g.sort(),
            Some(SortSpec {
                key: RowKey::Name,
                direction: Direction::Ascending
            })
        );
    }

    #[test]
    fn test_sort_descending_reverses() {
        let mut g = grid(
            vec![
                Row::new("a", "alpha", 3, true),
                Row::new("b", "beta", 1, true),
                Row::new("c", "gamma", 2, true),
            ],
            50,
        );
        g.toggle_sort(RowKey::Rank);
        let asc: Vec<u32> = g.filtered().iter().map(|r| r.rank).collect();
        assert_eq!(asc, [1, 2, 3]);
        g.toggle_sort(RowKey::Rank);
        let desc: Vec<u32> = g.filtered().iter().map(|r| r.rank).collect();
        assert_eq!(desc, [3, 2, 1]);
    }

    #[test]
    fn test_pagination_thirteen_rows_page_two() {
        let mut g = grid(thirteen(), 10);
        let view = g.page_view();
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.rows.len(), 10);
        g.next_page();
        let view = g.page_view();
        assert_eq!(view.page, 2);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].id, "id-11");
        // No page three.
        g.next_page();
        assert_eq!(g.page(), 2);
    }

    #[test]
    fn test_page_resets_on_filter_change() {
        let mut g = grid(thirteen(), 10);
        g.next_page();
        assert_eq!(g.page(), 2);
        g.edit_criteria(|c| c.search = "row".to_string());
        assert_eq!(g.page(), 1);
    }

    #[test]
    fn test_page_resets_on_sort_change() {
        let mut g = grid(thirteen(), 10);
        g.next_page();
        g.toggle_sort(RowKey::Rank);
        assert_eq!(g.page(), 1);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let g = grid(Vec::new(), 10);
        let view = g.page_view();
        assert_eq!(view.total_pages, 1);
        assert!(view.rows.is_empty());
        assert_eq!(view.filtered_len, 0);
    }

    #[test]
    fn test_select_all_twice_clears() {
        let mut g = grid(thirteen(), 10);
        g.edit_criteria(|c| c.active_only = true);
        g.toggle_select_all();
        assert_eq!(g.selection().len(), 6);
        g.toggle_select_all();
        assert!(g.selection().is_empty());
    }

    #[test]
    fn test_select_all_tops_up_partial_selection() {
        let mut g = grid(thirteen(), 10);
        g.toggle_selected("id-1");
        g.toggle_select_all();
        assert_eq!(g.selection().len(), 13);
    }

    #[test]
    fn test_selection_pruned_on_filter_change() {
        let mut g = grid(thirteen(), 50);
        g.toggle_selected("id-1"); // odd → inactive
        g.toggle_selected("id-2");
        g.edit_criteria(|c| c.active_only = true);
        assert!(!g.is_selected("id-1"));
        assert!(g.is_selected("id-2"));
    }

    #[test]
    fn test_bulk_delete_preserves_survivor_order_and_clears_selection() {
        let mut g = grid(thirteen(), 50);
        g.toggle_selected("id-3");
        g.toggle_selected("id-7");
        let removed = g.delete_selected();
        assert_eq!(removed, 2);
        assert!(g.selection().is_empty());
        assert_eq!(g.len(), 11);
        let ids: Vec<&str> = g.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids[..4], ["id-1", "id-2", "id-4", "id-5"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut g = grid(thirteen(), 50);
        assert!(g.remove("nope").is_none());
        assert_eq!(g.len(), 13);
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let mut g = grid(thirteen(), 50);
        assert!(!g.update("nope", |r| r.rank = 99));
        assert!(g.update("id-1", |r| r.rank = 99));
        assert_eq!(g.records()[0].rank, 99);
    }

    #[test]
    fn test_prepend_puts_record_first() {
        let mut g = grid(thirteen(), 50);
        g.prepend(Row::new("fresh", "fresh row", 0, true));
        assert_eq!(g.records()[0].id, "fresh");
        assert_eq!(g.len(), 14);
    }

    #[test]
    fn test_delete_last_page_clamps_page() {
        let mut g = grid(thirteen(), 10);
        g.next_page();
        assert_eq!(g.page(), 2);
        for id in ["id-11", "id-12", "id-13"] {
            g.remove(id);
        }
        assert_eq!(g.page(), 1);
        assert_eq!(g.page_view().rows.len(), 10);
    }

    #[test]
    fn test_cursor_moves_within_page_and_clamps() {
        let mut g = grid(thirteen(), 10);
        g.next_page(); // 3 rows here
        g.cursor_next();
        g.cursor_next();
        g.cursor_next(); // clamped at last row
        assert_eq!(g.cursor(), 2);
        assert_eq!(g.current().map(|r| r.id.as_str()), Some("id-13"));
        g.remove("id-13");
        // Page collapsed back to 1; cursor must stay in bounds.
        assert!(g.cursor() < g.page_view().rows.len());
    }

    #[test]
    fn test_page_size_minimum_is_one() {
        let g = grid(thirteen(), 0);
        assert_eq!(g.page_size(), 1);
        assert_eq!(g.total_pages(), 13);
    }

    #[test]
    fn test_cmp_text_ignores_case() {
        assert_eq!(cmp_text("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(cmp_text("ALPHA", "alpha"), Ordering::Equal);
    }
}
