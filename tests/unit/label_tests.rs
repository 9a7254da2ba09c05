//! Unit tests for period label normalization

use chrono::NaiveDate;
use painel::labels::{
    month_label, month_series_labels, week_label, week_series_labels, CURRENT_MONTH_LABEL,
    CURRENT_WEEK_LABEL,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_week_ordinals_within_one_month() {
    let today = date(2024, 4, 20);
    // April 2024: first Monday is Apr 1
    assert_eq!(week_label("2024-W14", today).unwrap(), "Abr_24_S1");
    assert_eq!(week_label("2024-W15", today).unwrap(), "Abr_24_S2");
    assert_eq!(week_label("2024-W17", today).unwrap(), "Abr_24_S4");
}

#[test]
fn test_fifth_week_is_capped() {
    // December 2025 has five Mondays; 2025-W53 does not exist, the last
    // full week is W52 starting Mon Dec 22, fourth Monday
    let today = date(2025, 12, 30);
    assert_eq!(week_label("2025-W52", today).unwrap(), "Dez_25_S4");
    // 2026-W01 starts Mon Dec 29 2025 and ends Sun Jan 4 2026; once
    // today leaves December it relabels into January and clamps to S1
    assert_eq!(week_label("2026-W01", date(2026, 1, 2)).unwrap(), "Jan_26_S1");
    assert_eq!(week_label("2026-W01", date(2025, 12, 30)).unwrap(), "Dez_25_S5");
}

#[test]
fn test_boundary_week_relabels_as_time_passes() {
    // 2024-W09 runs Mon Feb 26 .. Sun Mar 3
    assert_eq!(week_label("2024-W09", date(2024, 2, 27)).unwrap(), "Fev_24_S4");
    assert_eq!(week_label("2024-W09", date(2024, 3, 1)).unwrap(), "Mar_24_S1");
    // Once past the whole week the Sunday month still wins
    assert_eq!(week_label("2024-W09", date(2024, 6, 1)).unwrap(), "Mar_24_S1");
}

#[test]
fn test_lowercase_week_marker_accepted() {
    assert_eq!(
        week_label("2024-w10", date(2024, 3, 20)).unwrap(),
        week_label("2024-W10", date(2024, 3, 20)).unwrap()
    );
}

#[test]
fn test_malformed_week_keys_error() {
    let today = date(2024, 3, 1);
    for key in ["2024", "2024-03", "W10-2024", "abcd-W10", "2024-W00", "2024-W54"] {
        assert!(week_label(key, today).is_err(), "key {:?} should fail", key);
    }
}

#[test]
fn test_month_label_both_forms_agree() {
    assert_eq!(month_label("05/24").unwrap(), month_label("2024-05").unwrap());
    assert_eq!(month_label("11/23").unwrap(), "Nov_23");
}

#[test]
fn test_month_label_rejects_out_of_range() {
    for key in ["13/24", "00/24", "2024-13", "mar/24", "2024"] {
        assert!(month_label(key).is_err(), "key {:?} should fail", key);
    }
}

#[test]
fn test_series_labels_pin_current_period() {
    let weeks = vec![
        "2024-W09".to_string(),
        "2024-W10".to_string(),
        "2024-W11".to_string(),
    ];
    let labels = week_series_labels(&weeks, date(2024, 3, 20)).unwrap();
    assert_eq!(labels.last().map(String::as_str), Some(CURRENT_WEEK_LABEL));
    assert_eq!(labels[0], "Mar_24_S1");
    assert_eq!(labels[1], "Mar_24_S1");

    let months = vec!["2024-01".to_string(), "2024-02".to_string()];
    let labels = month_series_labels(&months).unwrap();
    assert_eq!(labels, vec!["Jan_24", CURRENT_MONTH_LABEL]);
}

#[test]
fn test_empty_series_produces_no_labels() {
    assert!(week_series_labels(&[], date(2024, 3, 1)).unwrap().is_empty());
    assert!(month_series_labels(&[]).unwrap().is_empty());
}
