//! Property-based tests for the grid controller
//!
//! Tests invariants:
//! - Filtered rows are a subset of the collection in collection order
//! - Sorting an already-sorted collection changes nothing
//! - Toggling the same sort key twice exactly reverses the sorted order
//! - Pages partition the filtered set with no gaps or overlaps
//! - Select-all covers the filtered view; toggling again clears it
//! - Bulk delete removes exactly the selection and preserves survivor order
//! - Page, cursor, and selection stay in bounds under any input sequence

use std::cmp::Ordering;
use std::collections::HashSet;

use proptest::prelude::*;

use crate::core::grid::{cmp_text, search_matches, Criteria, GridState, Record, SortKey};

// ============================================================================
// A minimal record type with every grid-relevant feature
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: String,
    label: String,
    weight: u32,
    flagged: bool,
}

impl Record for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
struct ItemCriteria {
    search: String,
    flagged_only: bool,
}

impl Criteria<Item> for ItemCriteria {
    fn matches(&self, item: &Item) -> bool {
        search_matches(&self.search, &[&item.label]) && (!self.flagged_only || item.flagged)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKey {
    Label,
    Weight,
}

impl SortKey<Item> for ItemKey {
    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            ItemKey::Label => cmp_text(&a.label, &b.label),
            ItemKey::Weight => a.weight.cmp(&b.weight),
        }
    }
}

type ItemGrid = GridState<Item, ItemCriteria, ItemKey>;

/// One user-level operation against the grid, for sequence tests.
#[derive(Debug, Clone)]
enum Op {
    Search(String),
    FlaggedOnly(bool),
    Sort(ItemKey),
    NextPage,
    PrevPage,
    CursorNext,
    CursorPrev,
    ToggleCurrent,
    SelectAll,
    DeleteSelected,
    RemoveCurrent,
}

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Generate a collection with unique, stable ids assigned by position
fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(("[a-z]{0,10}", 0u32..50, any::<bool>()), 0..40).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (label, weight, flagged))| Item {
                id: format!("item-{i}"),
                label,
                weight,
                flagged,
            })
            .collect()
    })
}

fn arb_page_size() -> impl Strategy<Value = usize> {
    1usize..12
}

/// Short lowercase needles so a useful fraction of labels match
fn arb_search() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,2}"]
}

fn arb_key() -> impl Strategy<Value = ItemKey> {
    prop_oneof![Just(ItemKey::Label), Just(ItemKey::Weight)]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_search().prop_map(Op::Search),
        any::<bool>().prop_map(Op::FlaggedOnly),
        arb_key().prop_map(Op::Sort),
        Just(Op::NextPage),
        Just(Op::PrevPage),
        Just(Op::CursorNext),
        Just(Op::CursorPrev),
        Just(Op::ToggleCurrent),
        Just(Op::SelectAll),
        Just(Op::DeleteSelected),
        Just(Op::RemoveCurrent),
    ]
}

fn apply(grid: &mut ItemGrid, op: Op) {
    match op {
        Op::Search(needle) => grid.edit_criteria(|c| c.search = needle),
        Op::FlaggedOnly(on) => grid.edit_criteria(|c| c.flagged_only = on),
        Op::Sort(key) => grid.toggle_sort(key),
        Op::NextPage => grid.next_page(),
        Op::PrevPage => grid.prev_page(),
        Op::CursorNext => grid.cursor_next(),
        Op::CursorPrev => grid.cursor_prev(),
        Op::ToggleCurrent => {
            if let Some(id) = grid.current_id() {
                grid.toggle_selected(&id);
            }
        }
        Op::SelectAll => grid.toggle_select_all(),
        Op::DeleteSelected => {
            grid.delete_selected();
        }
        Op::RemoveCurrent => {
            if let Some(id) = grid.current_id() {
                grid.remove(&id);
            }
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Without a sort, filtered rows appear in collection order,
    /// every filtered row matches the criteria, and every skipped row does not
    #[test]
    fn prop_filter_is_an_order_preserving_subset(
        items in arb_items(),
        needle in arb_search(),
        flagged_only in any::<bool>()
    ) {
        let mut grid = ItemGrid::new(items.clone(), ItemCriteria::default(), 10);
        grid.edit_criteria(|c| {
            c.search = needle.clone();
            c.flagged_only = flagged_only;
        });

        let criteria = ItemCriteria { search: needle, flagged_only };
        let filtered: Vec<String> = grid.filtered().iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = items
            .iter()
            .filter(|r| criteria.matches(r))
            .map(|r| r.id.clone())
            .collect();

        prop_assert_eq!(
            filtered, expected,
            "filtered view must be the matching rows in collection order"
        );
    }

    /// Property: Sorting by weight yields a nondecreasing sequence, and the
    /// filtered set is unchanged as a multiset
    #[test]
    fn prop_sort_orders_without_losing_rows(
        items in arb_items(),
        key in arb_key()
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), 10);
        let mut before: Vec<String> = grid.filtered().iter().map(|r| r.id.clone()).collect();
        grid.toggle_sort(key);

        let rows = grid.filtered();
        for pair in rows.windows(2) {
            prop_assert!(
                key.compare(pair[0], pair[1]) != Ordering::Greater,
                "ascending sort produced {:?} before {:?}",
                pair[0].id,
                pair[1].id
            );
        }

        let mut after: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after, "sorting must not add or drop rows");
    }

    /// Property: Sorting records that are already in sorted order returns
    /// the identical sequence (the sort is stable, so nothing reshuffles)
    #[test]
    fn prop_sort_is_idempotent(
        items in arb_items(),
        key in arb_key()
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), 10);
        grid.toggle_sort(key);
        let sorted: Vec<Item> = grid.filtered().into_iter().cloned().collect();
        let expected: Vec<String> = sorted.iter().map(|r| r.id.clone()).collect();

        let mut resorted = ItemGrid::new(sorted, ItemCriteria::default(), 10);
        resorted.toggle_sort(key);
        let again: Vec<String> = resorted.filtered().iter().map(|r| r.id.clone()).collect();

        prop_assert_eq!(again, expected, "re-sorting a sorted sequence must change nothing");
    }

    /// Property: Toggling the same key twice exactly reverses the sort-key
    /// sequence (stable sort, so ties keep their relative order either way)
    #[test]
    fn prop_sort_toggle_reverses_key_sequence(
        items in arb_items()
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), 10);
        grid.toggle_sort(ItemKey::Weight);
        let ascending: Vec<u32> = grid.filtered().iter().map(|r| r.weight).collect();
        grid.toggle_sort(ItemKey::Weight);
        let descending: Vec<u32> = grid.filtered().iter().map(|r| r.weight).collect();

        let mut reversed = ascending;
        reversed.reverse();
        prop_assert_eq!(
            descending, reversed,
            "descending weights must be the ascending sequence reversed"
        );
    }

    /// Property: Walking every page visits each filtered row exactly once, in
    /// order, with every page full except possibly the last
    #[test]
    fn prop_pages_partition_the_filtered_set(
        items in arb_items(),
        page_size in arb_page_size(),
        needle in arb_search()
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), page_size);
        grid.edit_criteria(|c| c.search = needle);

        let expected: Vec<String> = grid.filtered().iter().map(|r| r.id.clone()).collect();
        let total_pages = grid.total_pages();
        prop_assert!(total_pages >= 1, "even an empty view has one page");

        let mut walked: Vec<String> = Vec::new();
        for page in 1..=total_pages {
            let view = grid.page_view();
            prop_assert_eq!(view.page, page);
            prop_assert!(
                view.rows.len() <= page_size,
                "page {} holds {} rows with page size {}",
                page,
                view.rows.len(),
                page_size
            );
            if page < total_pages {
                prop_assert_eq!(
                    view.rows.len(), page_size,
                    "only the last page may run short"
                );
            }
            walked.extend(view.rows.iter().map(|r| r.id.clone()));
            grid.next_page();
        }

        // Past the last page, next_page is a no-op.
        prop_assert_eq!(grid.page(), total_pages);
        prop_assert_eq!(walked, expected, "pages must cover the filtered set exactly");
    }

    /// Property: total_pages is max(1, ceil(filtered / page_size))
    #[test]
    fn prop_page_count_matches_formula(
        items in arb_items(),
        page_size in arb_page_size()
    ) {
        let grid = ItemGrid::new(items, ItemCriteria::default(), page_size);
        let filtered = grid.filtered().len();
        let expected = if filtered == 0 { 1 } else { filtered.div_ceil(page_size) };
        prop_assert_eq!(
            grid.total_pages(), expected,
            "{} rows at {} per page",
            filtered, page_size
        );
    }

    /// Property: Select-all selects exactly the filtered ids across all
    /// pages, and toggling again clears the selection
    #[test]
    fn prop_select_all_is_an_involution(
        items in arb_items(),
        needle in arb_search()
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), 5);
        grid.edit_criteria(|c| c.search = needle);

        let visible: HashSet<String> = grid.filtered().iter().map(|r| r.id.clone()).collect();
        grid.toggle_select_all();
        prop_assert_eq!(
            grid.selection(), &visible,
            "select-all must cover every filtered row, not just the page"
        );

        grid.toggle_select_all();
        prop_assert!(
            grid.selection().is_empty(),
            "a second select-all must clear {} selected rows",
            visible.len()
        );
    }

    /// Property: Bulk delete removes exactly the selected ids, survivors keep
    /// their relative order, and the selection ends empty
    #[test]
    fn prop_bulk_delete_removes_exactly_the_selection(
        items in arb_items(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10)
    ) {
        let mut grid = ItemGrid::new(items.clone(), ItemCriteria::default(), 10);

        let mut doomed: HashSet<String> = HashSet::new();
        if !items.is_empty() {
            for pick in &picks {
                let id = items[pick.index(items.len())].id.clone();
                // Toggle semantics: picking the same row twice deselects it.
                if !doomed.remove(&id) {
                    doomed.insert(id.clone());
                }
                grid.toggle_selected(&id);
            }
        }

        let removed = grid.delete_selected();
        prop_assert_eq!(removed, doomed.len(), "removal count must match the selection");
        prop_assert!(grid.selection().is_empty(), "selection must clear after delete");

        let survivors: Vec<String> = grid.records().iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = items
            .iter()
            .filter(|r| !doomed.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();
        prop_assert_eq!(survivors, expected, "survivors must keep collection order");
    }

    /// Property: Changing criteria or sort always returns to page 1
    #[test]
    fn prop_criteria_and_sort_reset_the_page(
        items in arb_items(),
        needle in arb_search(),
        key in arb_key()
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), 3);
        grid.next_page();
        grid.next_page();

        grid.edit_criteria(|c| c.search = needle);
        prop_assert_eq!(grid.page(), 1, "criteria edits must reset the page");

        grid.next_page();
        grid.toggle_sort(key);
        prop_assert_eq!(grid.page(), 1, "sort changes must reset the page");
    }

    /// Property: Under any sequence of user operations the page stays within
    /// [1, total_pages], the cursor stays on a real row (or 0 when the page
    /// is empty), and every selected id refers to a live record
    #[test]
    fn prop_state_stays_consistent_under_any_op_sequence(
        items in arb_items(),
        page_size in arb_page_size(),
        ops in prop::collection::vec(arb_op(), 0..30)
    ) {
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), page_size);

        for op in ops {
            let describe = format!("{op:?}");
            apply(&mut grid, op);

            let view = grid.page_view();
            prop_assert!(
                grid.page() >= 1 && grid.page() <= view.total_pages,
                "page {} outside 1..={} after {}",
                grid.page(),
                view.total_pages,
                describe
            );
            if view.rows.is_empty() {
                prop_assert_eq!(grid.cursor(), 0, "cursor must rest at 0 after {}", describe);
            } else {
                prop_assert!(
                    grid.cursor() < view.rows.len(),
                    "cursor {} past {} rows after {}",
                    grid.cursor(),
                    view.rows.len(),
                    describe
                );
            }

            let live: HashSet<&str> = grid.records().iter().map(|r| r.id()).collect();
            for id in grid.selection() {
                prop_assert!(
                    live.contains(id.as_str()),
                    "selection holds stale id {} after {}",
                    id,
                    describe
                );
            }
        }
    }

    /// Property: search_matches ignores case and surrounding whitespace in
    /// the needle
    #[test]
    fn prop_search_ignores_case_and_padding(
        needle in "[a-zA-Z]{1,8}",
        haystack in "[a-zA-Z ]{0,30}"
    ) {
        let plain = search_matches(&needle, &[&haystack]);
        let shouted = search_matches(&needle.to_uppercase(), &[&haystack]);
        let padded = search_matches(&format!("  {needle}  "), &[&haystack]);

        prop_assert_eq!(plain, shouted, "case must not affect matching");
        prop_assert_eq!(plain, padded, "needle padding must not affect matching");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Basic sanity test that the synthetic grid instantiation works
    #[test]
    fn test_item_grid_builds_and_pages() {
        let items: Vec<Item> = (0..7)
            .map(|i| Item {
                id: format!("item-{i}"),
                label: format!("label {i}"),
                weight: i,
                flagged: i % 2 == 0,
            })
            .collect();
        let grid = ItemGrid::new(items, ItemCriteria::default(), 5);
        assert_eq!(grid.total_pages(), 2);
        assert_eq!(grid.page_view().rows.len(), 5);
    }

    /// A row edit that drops the current row out of the filter leaves a
    /// stale stored page; the rendered view clamps it to the last real page.
    #[test]
    fn test_page_view_clamps_stale_page_after_unmatching_edit() {
        let items: Vec<Item> = (0..3)
            .map(|i| Item {
                id: format!("item-{i}"),
                label: String::new(),
                weight: i,
                flagged: true,
            })
            .collect();
        let mut grid = ItemGrid::new(items, ItemCriteria::default(), 1);
        grid.edit_criteria(|c| c.flagged_only = true);
        grid.next_page();
        grid.next_page();
        assert_eq!(grid.page(), 3);

        grid.update("item-2", |r| r.flagged = false);
        let view = grid.page_view();
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.page, 2);
        assert_eq!(view.rows[0].id, "item-1");
    }
}
