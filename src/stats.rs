//! Aggregate statistics payloads and derived views

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Record;
use crate::sort::compare_collated;

/// One point of a labelled series. Upstream emits values as either
/// JSON numbers or numeric strings, so the raw value is kept and
/// coerced on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Value,
}

impl SeriesPoint {
    pub fn value_as_i64(&self) -> Option<i64> {
        match &self.value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Paired called-up and hired series for one cadence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesGroup {
    #[serde(default)]
    pub convocado: Vec<SeriesPoint>,
    #[serde(default)]
    pub contratados: Vec<SeriesPoint>,
}

/// Monthly section of the cumulative payload; only the hired series
/// exists at this cadence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyGroup {
    #[serde(default)]
    pub contratados: Vec<SeriesPoint>,
}

/// Cumulative statistics payload: weekly series keyed by ISO week and a
/// monthly hired series keyed by month.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CumulativeStats {
    #[serde(default)]
    pub weekly: SeriesGroup,
    #[serde(default)]
    pub monthly_contratados: MonthlyGroup,
}

/// One histogram bucket of open-position counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub range: String,
    pub count: u64,
}

/// One position contributing to a histogram bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketDetail {
    pub bucket: String,
    pub opcao: String,
    pub cargo: String,
    #[serde(default)]
    pub subarea: String,
    pub vagas_abertas: Value,
}

impl BucketDetail {
    pub fn open_positions(&self) -> i64 {
        match &self.vagas_abertas {
            Value::Number(n) => n.as_i64().unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Open-position distribution payload: bucket counts plus the per-row
/// detail behind each bucket.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsDistribution {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    #[serde(default)]
    pub details: Vec<BucketDetail>,
}

impl OptionsDistribution {
    /// Details of one bucket, most open positions first, with role and
    /// subarea as tie-breaks.
    pub fn bucket_details(&self, range: &str) -> Vec<&BucketDetail> {
        let mut details: Vec<&BucketDetail> =
            self.details.iter().filter(|d| d.bucket == range).collect();
        details.sort_by(|a, b| {
            b.open_positions()
                .cmp(&a.open_positions())
                .then_with(|| compare_collated(&a.cargo, &b.cargo))
                .then_with(|| compare_collated(&a.subarea, &b.subarea))
        });
        details
    }
}

/// Headline counters. Every field is optional; an upstream regeneration
/// that drops a field must not fail the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralStats {
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub business_days_elapsed: Option<i64>,
    #[serde(default)]
    pub total_convocados: Option<i64>,
    #[serde(default)]
    pub convocados_hoje: Option<i64>,
    #[serde(default)]
    pub media_diaria_mm10: Option<f64>,
    #[serde(default)]
    pub total_aceitou: Option<i64>,
    #[serde(default)]
    pub total_contratados: Option<i64>,
    #[serde(default)]
    pub avg_days_convocado_to_aceitou: Option<f64>,
}

/// Distinct period options of a detail table, for period pickers.
/// Each option pairs the raw period key with the first display label
/// seen for it, ordered most recent first.
pub fn period_options(
    records: &[Record],
    key_column: &str,
    label_column: &str,
) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = Vec::new();
    for record in records {
        let key = record.get(key_column).trim();
        if key.is_empty() || options.iter().any(|(k, _)| k == key) {
            continue;
        }
        options.push((key.to_string(), record.get(label_column).trim().to_string()));
    }
    options.sort_by_key(|(key, _)| std::cmp::Reverse(period_sort_key(key)));
    options
}

/// Numeric sort key for `YYYY-Www` and `YYYY-MM` period keys. Keys that
/// do not parse sort last.
fn period_sort_key(key: &str) -> (i64, i64) {
    let Some((year_part, rest)) = key.split_once('-') else {
        return (i64::MIN, i64::MIN);
    };
    let rest = rest.trim_start_matches(['W', 'w']);
    let year = year_part.trim().parse().unwrap_or(i64::MIN);
    let ordinal = rest.trim().parse().unwrap_or(i64::MIN);
    (year, ordinal)
}

/// Rows of a detail table belonging to one period.
pub fn rows_for_period<'a>(
    records: &'a [Record],
    key_column: &str,
    period: &str,
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.get(key_column).trim() == period)
        .collect()
}

/// One row of the remaining-days projection table: open vacancies per
/// role, the MM5/MM10 call-up averages, and how long the queue lasts at
/// each rate.
#[derive(Debug, Clone, Serialize)]
pub struct RemainingRow {
    pub cargo: String,
    pub remaining: String,
    pub mm5: String,
    pub mm10: String,
    pub days_mm5: String,
    pub days_mm10: String,
}

/// Extracts projection rows from the remaining-days table, skipping
/// rows without a role.
pub fn remaining_rows(records: &[Record]) -> Vec<RemainingRow> {
    records
        .iter()
        .filter(|r| !r.get(crate::record::ROLE_COLUMN).trim().is_empty())
        .map(|r| RemainingRow {
            cargo: r.get(crate::record::ROLE_COLUMN).trim().to_string(),
            remaining: r.get("REMAINING_VACANCIES").trim().to_string(),
            mm5: r.get("MM5").trim().to_string(),
            mm10: r.get("MM10").trim().to_string(),
            days_mm5: r.get("DAYS_MM5").trim().to_string(),
            days_mm10: r.get("DAYS_MM10").trim().to_string(),
        })
        .collect()
}

/// One role of the hired-by-role breakdown: absolute pipeline counts
/// plus the completion percentage, backing both the stacked and the
/// percent view.
#[derive(Debug, Clone, Serialize)]
pub struct RoleHiringRow {
    pub cargo: String,
    pub contratados: i64,
    pub em_contratacao: i64,
    pub vagas_abertas: i64,
    pub percent_contratado: f64,
}

/// Extracts the hired-by-role rows, skipping rows without a role.
/// Unparseable counts read as zero, matching the lenient numeric
/// coercion of the published table.
pub fn role_hiring_rows(records: &[Record]) -> Vec<RoleHiringRow> {
    records
        .iter()
        .filter(|r| !r.get("Cargo").trim().is_empty())
        .map(|r| RoleHiringRow {
            cargo: r.get("Cargo").trim().to_string(),
            contratados: r.get("Contratados").trim().parse().unwrap_or(0),
            em_contratacao: r.get("Em Contratação").trim().parse().unwrap_or(0),
            vagas_abertas: r.get("Vagas abertas").trim().parse().unwrap_or(0),
            percent_contratado: r.get("% Contratado").trim().parse().unwrap_or(0.0),
        })
        .collect()
}

/// One day of the call-up velocity series for a selected group.
#[derive(Debug, Clone, Serialize)]
pub struct VelocityPoint {
    pub date: String,
    pub daily: String,
    pub mm5: String,
    pub mm10: String,
}

/// Extracts the velocity series columns for one group from the daily
/// velocity table, skipping dateless rows. The group selector is used
/// verbatim as the column suffix; the default group is `ALL` and the
/// upstream table carries `convocados_ALL` and friends with that exact
/// casing.
pub fn velocity_points(records: &[Record], group: &str) -> Vec<VelocityPoint> {
    let daily_column = format!("convocados_{}", group);
    let mm5_column = format!("mm5_{}", group);
    let mm10_column = format!("mm10_{}", group);

    records
        .iter()
        .filter(|r| !r.get("date").trim().is_empty())
        .map(|r| VelocityPoint {
            date: r.get("date").trim().to_string(),
            daily: r.get(&daily_column).trim().to_string(),
            mm5: r.get(&mm5_column).trim().to_string(),
            mm10: r.get(&mm10_column).trim().to_string(),
        })
        .collect()
}
