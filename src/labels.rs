//! Period key normalization into short Portuguese display labels

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{PainelError, Result};

/// Portuguese month abbreviations, indexed by month number minus one
pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Fixed label for the most recent weekly series entry
pub const CURRENT_WEEK_LABEL: &str = "Semana atual";

/// Fixed label for the most recent monthly series entry
pub const CURRENT_MONTH_LABEL: &str = "Mês atual";

/// Parses an ISO week key of the form `YYYY-Www`.
fn parse_iso_week(key: &str) -> Result<(i32, u32)> {
    let invalid = || PainelError::invalid_label(format!("malformed week key '{}'", key));

    let (year_part, week_part) = key.split_once('-').ok_or_else(invalid)?;
    let week_part = week_part
        .strip_prefix('W')
        .or_else(|| week_part.strip_prefix('w'))
        .ok_or_else(invalid)?;

    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let week: u32 = week_part.parse().map_err(|_| invalid())?;
    if !(1..=53).contains(&week) {
        return Err(invalid());
    }
    Ok((year, week))
}

/// Monday and Sunday of an ISO week.
fn week_bounds(year: i32, week: u32) -> Result<(NaiveDate, NaiveDate)> {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(|| {
        PainelError::invalid_label(format!("no such ISO week {}-W{:02}", year, week))
    })?;
    let sunday = NaiveDate::from_isoywd_opt(year, week, Weekday::Sun).ok_or_else(|| {
        PainelError::invalid_label(format!("no such ISO week {}-W{:02}", year, week))
    })?;
    Ok((monday, sunday))
}

/// Ordinal of the week within its assigned month, counting Mondays from
/// the first Monday of that month. A Monday falling before the first
/// Monday of the assigned month counts as week 1, and the result is
/// capped at 5.
fn week_of_month(monday: NaiveDate, year: i32, month: u32) -> u32 {
    let first_of_month = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return 1,
    };
    let offset = (7 - first_of_month.weekday().num_days_from_monday() as i64) % 7;
    let first_monday = first_of_month + chrono::Duration::days(offset);
    if monday < first_monday {
        return 1;
    }
    let weeks = (monday - first_monday).num_days() / 7 + 1;
    (weeks as u32).min(5)
}

/// Renders an ISO week key (`YYYY-Www`) as `Abbrev_YY_Sn`, for example
/// `Mar_24_S2`.
///
/// A week spanning two months is assigned to its Monday's month while
/// `today` still falls inside that month, and to its Sunday's month
/// afterwards. The label of a boundary week therefore depends on when
/// it is rendered, which keeps in-progress weeks grouped under the
/// month users are currently living in.
pub fn week_label(key: &str, today: NaiveDate) -> Result<String> {
    let (year, week) = parse_iso_week(key)?;
    let (monday, sunday) = week_bounds(year, week)?;

    let (label_year, label_month) = if monday.month() == sunday.month() {
        (monday.year(), monday.month())
    } else if today.year() == monday.year() && today.month() == monday.month() {
        (monday.year(), monday.month())
    } else {
        (sunday.year(), sunday.month())
    };

    let ordinal = week_of_month(monday, label_year, label_month);
    Ok(format!(
        "{}_{:02}_S{}",
        MONTH_ABBREV[label_month as usize - 1],
        label_year.rem_euclid(100),
        ordinal
    ))
}

/// Renders a month key as `Abbrev_YY`. Accepts `MM/YY` and `YYYY-MM`;
/// the year always displays as its last two digits.
pub fn month_label(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let invalid = || PainelError::invalid_label(format!("malformed month key '{}'", raw));

    let (month_part, year_part) = if let Some((month, year)) = raw.split_once('/') {
        (month, year)
    } else if let Some((year, month)) = raw.split_once('-') {
        (month, year)
    } else {
        return Err(invalid());
    };

    let month: u32 = month_part.trim().parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    let year = year_part.trim();
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let short_year = if year.len() > 2 { &year[year.len() - 2..] } else { year };

    Ok(format!("{}_{}", MONTH_ABBREV[month as usize - 1], short_year))
}

/// Display labels for a chronological weekly series. Every key is
/// rendered through [`week_label`] except the final one, which always
/// reads "Semana atual" because the last series entry is the week still
/// in progress.
pub fn week_series_labels(keys: &[String], today: NaiveDate) -> Result<Vec<String>> {
    let mut labels = Vec::with_capacity(keys.len());
    for (idx, key) in keys.iter().enumerate() {
        if idx + 1 == keys.len() {
            labels.push(CURRENT_WEEK_LABEL.to_string());
        } else {
            labels.push(week_label(key, today)?);
        }
    }
    Ok(labels)
}

/// Display labels for a chronological monthly series; the final entry
/// always reads "Mês atual".
pub fn month_series_labels(keys: &[String]) -> Result<Vec<String>> {
    let mut labels = Vec::with_capacity(keys.len());
    for (idx, key) in keys.iter().enumerate() {
        if idx + 1 == keys.len() {
            labels.push(CURRENT_MONTH_LABEL.to_string());
        } else {
            labels.push(month_label(key)?);
        }
    }
    Ok(labels)
}
