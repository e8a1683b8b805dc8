//! Tests for the filter -> sort -> paginate pipeline.

use std::cmp::Ordering;

use tabula_lib::Column;
use tabula_lib::model::{TableRow, Value};
use tabula_lib::query::{
    FilterState, PaginationState, SortState, compare_values, filter, paginate, sort,
};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: u32,
    name: String,
    team: String,
    score: i64,
}

impl TableRow for Person {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "team" => Some(self.team.as_str().into()),
            "score" => Some(self.score.into()),
            _ => None,
        }
    }
}

fn person(id: u32, name: &str, team: &str, score: i64) -> Person {
    Person {
        id,
        name: name.to_string(),
        team: team.to_string(),
        score,
    }
}

fn bob_amy_cid() -> Vec<Person> {
    vec![
        person(1, "Bob", "red", 10),
        person(2, "Amy", "blue", 30),
        person(3, "Cid", "red", 20),
    ]
}

fn roster() -> Vec<Person> {
    vec![
        person(1, "Bob", "red", 10),
        person(2, "Amy", "blue", 30),
        person(3, "Cid", "red", 20),
        person(4, "Dee", "green", 20),
        person(5, "Eve", "blue", 10),
        person(6, "Fay", "red", 30),
        person(7, "Gus", "green", 20),
    ]
}

fn columns() -> Vec<Column<Person>> {
    vec![
        Column::new("id", "ID").filterable(false),
        Column::new("name", "Name"),
        Column::new("team", "Team"),
        Column::new("score", "Score"),
    ]
}

fn ids(rows: &[&Person]) -> Vec<u32> {
    rows.iter().map(|p| p.id).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_sort_cycle_scenario() {
    let rows = bob_amy_cid();
    let columns = columns();
    let names = |out: Vec<&Person>| out.iter().map(|p| p.name.clone()).collect::<Vec<_>>();

    let state = SortState::cycle(None, "name");
    let out = sort(rows.iter().collect(), &columns, state.as_ref());
    assert_eq!(names(out), vec!["Amy", "Bob", "Cid"]);

    let state = SortState::cycle(state.as_ref(), "name");
    let out = sort(rows.iter().collect(), &columns, state.as_ref());
    assert_eq!(names(out), vec!["Cid", "Bob", "Amy"]);

    let state = SortState::cycle(state.as_ref(), "name");
    assert!(state.is_none());
    let out = sort(rows.iter().collect(), &columns, state.as_ref());
    assert_eq!(names(out), vec!["Bob", "Amy", "Cid"]);
}

#[test]
fn test_global_filter_scenario() {
    let rows = bob_amy_cid();
    let kept = filter(&rows, &columns(), &FilterState::global("am"));
    assert_eq!(ids(&kept), vec![2]);
}

#[test]
fn test_numeric_sort_is_not_lexicographic() {
    let rows = vec![
        person(1, "a", "x", 100),
        person(2, "b", "x", 9),
        person(3, "c", "x", 20),
    ];
    let out = sort(rows.iter().collect(), &columns(), Some(&SortState::asc("score")));
    assert_eq!(ids(&out), vec![2, 3, 1]);
}

#[test]
fn test_unfilterable_column_ignored_by_global_but_not_column_filter() {
    let rows = roster();
    // "id" is not filterable, so "7" only matches through a column filter
    assert!(filter(&rows, &columns(), &FilterState::global("7")).is_empty());

    let state = FilterState::default().with_column("id", "7");
    assert_eq!(ids(&filter(&rows, &columns(), &state)), vec![7]);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_filter_idempotent() {
    let rows = roster();
    let columns = columns();
    let states = [
        FilterState::global("e"),
        FilterState::default().with_column("team", "RED"),
        FilterState::global("u").with_column("score", "20"),
        FilterState::default(),
    ];

    for state in &states {
        let once: Vec<Person> = filter(&rows, &columns, state).into_iter().cloned().collect();
        let twice: Vec<Person> = filter(&once, &columns, state).into_iter().cloned().collect();
        assert_eq!(once, twice, "state {:?}", state);
    }
}

#[test]
fn test_sort_stable_both_directions() {
    let rows = roster();
    let columns = columns();

    for state in [SortState::asc("score"), SortState::desc("score"), SortState::asc("team")] {
        let out = sort(rows.iter().collect(), &columns, Some(&state));
        let column = columns.iter().find(|c| c.id == state.column_id).unwrap();

        for pair in out.windows(2) {
            if compare_values(&column.resolve(pair[0]), &column.resolve(pair[1])) == Ordering::Equal {
                assert!(pair[0].id < pair[1].id, "tie reordered under {:?}", state);
            }
        }
    }
}

#[test]
fn test_sort_monotonic() {
    let rows = roster();
    let columns = columns();
    let column = &columns[3];

    let asc = sort(rows.iter().collect(), &columns, Some(&SortState::asc("score")));
    for pair in asc.windows(2) {
        assert_ne!(
            compare_values(&column.resolve(pair[0]), &column.resolve(pair[1])),
            Ordering::Greater
        );
    }

    let desc = sort(rows.iter().collect(), &columns, Some(&SortState::desc("score")));
    for pair in desc.windows(2) {
        assert_ne!(
            compare_values(&column.resolve(pair[0]), &column.resolve(pair[1])),
            Ordering::Less
        );
    }
}

#[test]
fn test_pagination_covers_all_rows() {
    let rows = roster();
    let columns = columns();
    let sorted = sort(
        filter(&rows, &columns, &FilterState::global("e")),
        &columns,
        Some(&SortState::desc("name")),
    );

    for page_size in 1..=8 {
        let first = paginate(sorted.clone(), PaginationState::first_page(page_size).unwrap());
        let mut collected: Vec<&Person> = Vec::new();
        for page in 0..first.total_pages() {
            let state = PaginationState::new(page, page_size).unwrap();
            collected.extend(paginate(sorted.clone(), state).into_rows());
        }
        assert_eq!(ids(&collected), ids(&sorted), "page size {}", page_size);
    }
}

#[test]
fn test_clamping() {
    let rows: Vec<Person> = roster().into_iter().take(5).collect();
    let page = paginate(rows.iter().collect(), PaginationState::new(10, 2).unwrap());

    assert_eq!(page.page(), 2);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(ids(page.rows()), vec![5]);
    assert!(!page.has_next());
}

#[test]
fn test_full_pipeline() {
    let rows = roster();
    let columns = columns();
    let state = FilterState::default().with_column("team", "re");
    let sorted = sort(filter(&rows, &columns, &state), &columns, Some(&SortState::desc("score")));
    let page = paginate(sorted, PaginationState::first_page(2).unwrap());

    // red and green teams, highest score first, ties in input order
    assert_eq!(ids(page.rows()), vec![6, 3]);
    assert_eq!(page.total(), 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!((page.range_start(), page.range_end()), (1, 2));
}
