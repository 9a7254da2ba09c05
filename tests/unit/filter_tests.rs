//! Unit tests for status filtering and search

use painel::filter::{fold, SearchEngine, StatusFilter};
use painel::record::Record;

fn record(id: &str, name: &str, status: &str, event: &str) -> Record {
    Record::from_pairs([
        ("OPÇÃO", id),
        ("NOME", name),
        ("STATUS", status),
        ("EVENTO", event),
    ])
}

fn roster() -> Vec<Record> {
    vec![
        record("47", "Maria Conceição", "Convocado", "NOVO"),
        record("7", "José Álvares", "Convocado", "ALTERADO"),
        record("8", "Ana Prado", "Desistiu", "INALTERADO"),
        record("12", "João Silva", "Aceitou", "NOVO"),
    ]
}

#[test]
fn test_filter_categories_partition_called_records() {
    let records = roster();

    let new: Vec<_> = records
        .iter()
        .filter(|r| StatusFilter::CalledNew.matches(r))
        .collect();
    let changed: Vec<_> = records
        .iter()
        .filter(|r| StatusFilter::CalledChanged.matches(r))
        .collect();

    assert_eq!(new.len(), 1);
    assert_eq!(new[0].get("OPÇÃO"), "47");
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].get("OPÇÃO"), "7");
}

#[test]
fn test_exact_status_filter_ignores_change_kind() {
    let records = roster();
    let accepted: Vec<_> = records
        .iter()
        .filter(|r| StatusFilter::from_token("Aceitou").matches(r))
        .collect();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].get("NOME"), "João Silva");
}

#[test]
fn test_filter_trims_status_whitespace() {
    let padded = record("1", "X", "  Convocado  ", "NOVO");
    assert!(StatusFilter::CalledNew.matches(&padded));
}

#[test]
fn test_search_digit_precedence_over_name() {
    // A term of digits never consults the name column, even when a
    // name happens to contain those digits
    let records = vec![
        record("100", "Lote 12", "", ""),
        record("12", "Cem", "", ""),
    ];
    let engine = SearchEngine::default();
    let hits = engine.search(&records, "12");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get("OPÇÃO"), "12");
}

#[test]
fn test_search_folds_both_sides() {
    let records = roster();
    let engine = SearchEngine::default();

    let by_accented = engine.search(&records, "conceição");
    let by_plain = engine.search(&records, "CONCEICAO");
    assert_eq!(by_accented.len(), 1);
    assert_eq!(by_plain.len(), 1);
    assert_eq!(by_accented[0].get("OPÇÃO"), by_plain[0].get("OPÇÃO"));
}

#[test]
fn test_search_blank_terms_match_nothing() {
    let records = roster();
    let engine = SearchEngine::default();
    assert!(engine.search(&records, "").is_empty());
    assert!(engine.search(&records, "  \t ").is_empty());
}

#[test]
fn test_search_with_custom_columns() {
    let records = vec![Record::from_pairs([("CODE", "55"), ("TITLE", "Enfermeiro")])];
    let engine = SearchEngine::with_columns("CODE", "TITLE");
    assert_eq!(engine.search(&records, "55").len(), 1);
    assert_eq!(engine.search(&records, "enferm").len(), 1);
    assert!(engine.search(&records, "99").is_empty());
}

#[test]
fn test_fold_is_idempotent() {
    for input in ["João", "ÁGUA", "já folded", "Conceição"] {
        let once = fold(input);
        assert_eq!(fold(&once), once);
    }
}
