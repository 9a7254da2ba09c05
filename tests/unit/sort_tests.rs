//! Unit tests for the sort engines

use painel::record::Record;
use painel::sort::{
    compare_cells, sort_detail_rows, sort_rows, SortDirection, SortState,
};
use std::cmp::Ordering;

fn rows(values: &[(&str, &str)]) -> Vec<Record> {
    values
        .iter()
        .map(|(a, b)| Record::from_pairs([("A", *a), ("B", *b)]))
        .collect()
}

#[test]
fn test_numeric_strings_sort_by_value_not_text() {
    let mut records = rows(&[("10", ""), ("9", ""), ("100", "")]);
    let state = SortState {
        column: Some(0),
        direction: SortDirection::Ascending,
    };
    sort_rows(&mut records, &state);
    let order: Vec<_> = records.iter().map(|r| r.value_at(0)).collect();
    assert_eq!(order, vec!["9", "10", "100"]);
}

#[test]
fn test_decimal_comma_parses_as_number() {
    assert_eq!(compare_cells("1,5", "1.25"), Ordering::Greater);
    assert_eq!(compare_cells("0,5", "1"), Ordering::Less);
}

#[test]
fn test_accented_names_collate_with_plain() {
    let mut records = rows(&[("Édipo", ""), ("Ana", ""), ("carlos", "")]);
    let state = SortState {
        column: Some(0),
        direction: SortDirection::Ascending,
    };
    sort_rows(&mut records, &state);
    let order: Vec<_> = records.iter().map(|r| r.value_at(0)).collect();
    assert_eq!(order, vec!["Ana", "carlos", "Édipo"]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut records = rows(&[("1", "first"), ("1", "second"), ("1", "third")]);
    let state = SortState {
        column: Some(0),
        direction: SortDirection::Ascending,
    };
    sort_rows(&mut records, &state);
    let order: Vec<_> = records.iter().map(|r| r.value_at(1)).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}

#[test]
fn test_toggle_cycle_matches_header_clicks() {
    let mut state = SortState::default();
    assert_eq!(state.column, None);

    state.toggle(1);
    assert_eq!((state.column, state.direction), (Some(1), SortDirection::Ascending));

    state.toggle(1);
    assert_eq!(state.direction, SortDirection::Descending);

    state.toggle(1);
    assert_eq!(state.direction, SortDirection::Ascending);

    state.toggle(3);
    assert_eq!((state.column, state.direction), (Some(3), SortDirection::Ascending));

    state.reset();
    assert_eq!(state.column, None);
}

#[test]
fn test_detail_sort_full_ordering() {
    let mut records = vec![
        Record::from_pairs([("DATE", "2024-03-05"), ("CARGO", "Médico"), ("NOME", "Bia")]),
        Record::from_pairs([("DATE", ""), ("CARGO", "Analista"), ("NOME", "Caio")]),
        Record::from_pairs([("DATE", "2024-03-05"), ("CARGO", "Analista"), ("NOME", "Ana")]),
        Record::from_pairs([("DATE", "2024-03-01"), ("CARGO", "Médico"), ("NOME", "Dan")]),
    ];
    sort_detail_rows(&mut records);
    let names: Vec<_> = records.iter().map(|r| r.get("NOME")).collect();
    assert_eq!(names, vec!["Caio", "Dan", "Ana", "Bia"]);
}

#[test]
fn test_unparseable_dates_group_with_undated() {
    let mut records = vec![
        Record::from_pairs([("DATE", "2024-03-01"), ("CARGO", "A"), ("NOME", "x")]),
        Record::from_pairs([("DATE", "03/01/2024"), ("CARGO", "A"), ("NOME", "y")]),
    ];
    sort_detail_rows(&mut records);
    assert_eq!(records[0].get("NOME"), "y");
}
