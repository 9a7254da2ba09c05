//! Command implementations for painel CLI

use chrono::Local;

use crate::cli::{Commands, HiredView, OutputFormat, Selection, StatsSection};
use crate::error::{PainelError, Result};
use crate::fetch::Client;
use crate::filter::{SearchEngine, StatusFilter};
use crate::history::{default_filter, History};
use crate::labels::{month_series_labels, week_series_labels};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::record::{Record, Snapshot, ID_COLUMN};
use crate::sort::{sort_detail_rows, sort_rows, SortDirection, SortState};
use crate::state::ViewState;
use crate::stats::{
    period_options, remaining_rows, role_hiring_rows, rows_for_period, velocity_points,
    CumulativeStats, GeneralStats, OptionsDistribution,
};

/// Resource path of the per-option summary table
pub const SUMMARY_RESOURCE: &str = "opcao_status_summary.csv";

/// Resource path of the cumulative statistics payload
pub const CUMULATIVE_STATS_RESOURCE: &str = "stats/cumulative_stats.json";

/// Resource path of the open-position distribution payload
pub const DISTRIBUTION_RESOURCE: &str = "stats/options_distribution.json";

/// Resource path of the headline counters payload
pub const GENERAL_STATS_RESOURCE: &str = "stats/general_stats.json";

/// Resource path of the daily call-up velocity table
pub const VELOCITY_RESOURCE: &str = "stats/velocity_daily.csv";

/// Resource path of the remaining-days projection table
pub const REMAINING_RESOURCE: &str = "stats/remaining_days.csv";

/// Resource path of the weekly call-up detail table
pub const WEEKLY_DETAIL_RESOURCE: &str = "stats/convocados_semanal_detalhes.csv";

/// Resource path of the monthly hires detail table
pub const MONTHLY_DETAIL_RESOURCE: &str = "stats/contratados_mensal_detalhes.csv";

/// Resource path of the per-role hiring progress table
pub const PERCENT_CONTRATADO_RESOURCE: &str = "stats/percent_contratado.csv";

/// Period key and label columns of the weekly detail table
pub const WEEK_DETAIL_KEY: &str = "WEEK_ISO";
pub const WEEK_DETAIL_LABEL: &str = "WEEK_LABEL";

/// Period key and label columns of the monthly detail table
pub const MONTH_DETAIL_KEY: &str = "MONTH_ISO";
pub const MONTH_DETAIL_LABEL: &str = "MONTH_LABEL";

/// Execute a command
pub fn execute_command(command: Commands, base_url: &str) -> Result<()> {
    let client = Client::new(base_url);
    match command {
        Commands::History {
            select,
            filter,
            search,
            format,
        } => history_command(&client, &select, filter.as_deref(), search.as_deref(), &format),
        Commands::Summary {
            search,
            sort,
            desc,
            format,
        } => summary_command(&client, search.as_deref(), sort, desc, &format),
        Commands::Stats {
            section,
            bucket,
            group,
            period,
            view,
            format,
        } => stats_command(
            &client,
            &section,
            bucket.as_deref(),
            &group,
            period.as_deref(),
            &view,
            &format,
        ),
    }
}

/// Show snapshot history with filtering and search
fn history_command(
    client: &Client,
    select: &str,
    filter: Option<&str>,
    search: Option<&str>,
    format: &str,
) -> Result<()> {
    let selection = Selection::parse(select).map_err(PainelError::invalid_input)?;
    let format = OutputFormat::parse(format).map_err(PainelError::invalid_input)?;

    let mut history = History::default();
    history.load_index(client)?;

    if history.is_empty() {
        println!("No snapshots available yet.");
        return Ok(());
    }

    let token = history.begin_load();
    match selection {
        Selection::Latest => {
            let entry = history
                .latest()
                .cloned()
                .ok_or_else(|| PainelError::snapshot_not_found("latest"))?;
            let snapshot = history.fetch_single(client, &entry)?;
            history.apply_single(token, snapshot);
        }
        Selection::One(name) => {
            let entry = history.find_entry(&name)?.clone();
            let snapshot = history.fetch_single(client, &entry)?;
            history.apply_single(token, snapshot);
        }
        Selection::All => {
            let mut progress = ProgressReporter::new_for_history(history.index().len() as u64);
            let snapshots = history.fetch_all(client, |pos, entry| {
                progress.update_fetch(pos as u64, &entry.file);
            })?;
            progress.finish_fetch("All snapshots loaded");
            history.apply_all(token, snapshots);
        }
    }

    let mut view = ViewState::default();
    view.filter = match filter {
        Some(token) => StatusFilter::from_token(token),
        None => {
            let latest_records = history
                .loaded()
                .first()
                .map(|s| s.records.as_slice())
                .unwrap_or(&[]);
            default_filter(latest_records)
        }
    };
    if let Some(term) = search {
        view.search = term.to_string();
    }

    let groups = filtered_view(&history, &view);

    match format {
        OutputFormat::Pretty => {
            log::info!("filter: {}", view.filter);
            PrettyPrinter::print_history(&groups);
        }
        OutputFormat::Json => {
            let payload: Vec<serde_json::Value> = groups
                .iter()
                .map(|(snapshot, records)| {
                    serde_json::json!({
                        "date": snapshot.date,
                        "file": snapshot.file,
                        "records": records,
                    })
                })
                .collect();
            println!("{}", JsonFormatter::format(&payload)?);
        }
    }

    Ok(())
}

/// Apply the view's filter and search across every loaded snapshot.
fn filtered_view<'a>(
    history: &'a History,
    view: &ViewState,
) -> Vec<(&'a Snapshot, Vec<&'a Record>)> {
    let groups = history.filtered_groups(&view.filter);
    if view.search.trim().is_empty() {
        return groups;
    }

    let engine = SearchEngine::default();
    groups
        .into_iter()
        .filter_map(|(snapshot, records)| {
            let matched: Vec<&Record> = records
                .into_iter()
                .filter(|r| engine.matches(r, &view.search))
                .collect();
            if matched.is_empty() {
                None
            } else {
                Some((snapshot, matched))
            }
        })
        .collect()
}

/// Show the per-option status summary table
fn summary_command(
    client: &Client,
    search: Option<&str>,
    sort: Option<usize>,
    desc: bool,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(PainelError::invalid_input)?;
    let set = client.load_records(SUMMARY_RESOURCE)?;

    // Summary rows carry no candidate names; every search term, textual
    // or numeric, matches against the option id column.
    let mut records = match search {
        Some(term) if !term.trim().is_empty() => {
            let engine = SearchEngine::with_columns(ID_COLUMN, ID_COLUMN);
            engine.search(&set.records, term).into_iter().cloned().collect()
        }
        _ => set.records.clone(),
    };

    let state = SortState {
        column: sort,
        direction: if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    sort_rows(&mut records, &state);

    match format {
        OutputFormat::Pretty => {
            if let Some(stamp) = &set.last_update {
                println!("🕒 Last update: {}", stamp);
            }
            PrettyPrinter::print_table(&set.headers, &records);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format(&records)?);
        }
    }

    Ok(())
}

/// Show aggregate statistics. Sections are isolated: a payload that
/// fails to load renders as a placeholder while the rest still print.
fn stats_command(
    client: &Client,
    section: &str,
    bucket: Option<&str>,
    group: &str,
    period: Option<&str>,
    view: &str,
    format: &str,
) -> Result<()> {
    let section = StatsSection::parse(section).map_err(PainelError::invalid_input)?;
    let view = HiredView::parse(view).map_err(PainelError::invalid_input)?;
    let format = OutputFormat::parse(format).map_err(PainelError::invalid_input)?;

    let wants = |candidate: StatsSection| section == candidate || section == StatsSection::All;

    if wants(StatsSection::General) {
        run_section("General statistics", || general_section(client, &format));
    }
    if wants(StatsSection::Weekly) {
        run_section("Weekly series", || weekly_section(client, &format));
    }
    if wants(StatsSection::Monthly) {
        run_section("Monthly series", || monthly_section(client, &format));
    }
    if wants(StatsSection::Histogram) {
        run_section("Open-position histogram", || {
            histogram_section(client, bucket, &format)
        });
    }
    if wants(StatsSection::Velocity) {
        run_section("Call-up velocity", || velocity_section(client, group, &format));
    }
    if wants(StatsSection::Remaining) {
        run_section("Remaining days", || remaining_section(client, &format));
    }
    if wants(StatsSection::HiredByRole) {
        run_section("Hired by role", || {
            hired_by_role_section(client, &view, &format)
        });
    }
    if wants(StatsSection::WeeklyDetail) {
        run_section("Weekly call-up details", || {
            detail_section(
                client,
                WEEKLY_DETAIL_RESOURCE,
                WEEK_DETAIL_KEY,
                WEEK_DETAIL_LABEL,
                period,
                &format,
            )
        });
    }
    if wants(StatsSection::MonthlyDetail) {
        run_section("Monthly hires details", || {
            detail_section(
                client,
                MONTHLY_DETAIL_RESOURCE,
                MONTH_DETAIL_KEY,
                MONTH_DETAIL_LABEL,
                period,
                &format,
            )
        });
    }

    Ok(())
}

/// Run one statistics section, downgrading its failure to a placeholder.
fn run_section<F>(name: &str, section: F)
where
    F: FnOnce() -> Result<()>,
{
    if let Err(err) = section() {
        log::warn!("section '{}' failed: {}", name, err);
        PrettyPrinter::print_section_unavailable(name);
    }
}

fn general_section(client: &Client, format: &OutputFormat) -> Result<()> {
    let stats: GeneralStats = client.load_json(GENERAL_STATS_RESOURCE)?;
    match format {
        OutputFormat::Pretty => PrettyPrinter::print_general_stats(&stats),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&stats)?),
    }
    Ok(())
}

fn weekly_section(client: &Client, format: &OutputFormat) -> Result<()> {
    let stats: CumulativeStats = client.load_json(CUMULATIVE_STATS_RESOURCE)?;
    let today = Local::now().date_naive();

    let keys: Vec<String> = stats.weekly.convocado.iter().map(|p| p.label.clone()).collect();
    let labels = week_series_labels(&keys, today)?;

    let convocado: Vec<_> = labels
        .iter()
        .zip(stats.weekly.convocado.iter())
        .map(|(label, point)| (label.clone(), Some(point)))
        .collect();

    match format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_series("Called up per week", &convocado);
            if !stats.weekly.contratados.is_empty() {
                let hired_keys: Vec<String> =
                    stats.weekly.contratados.iter().map(|p| p.label.clone()).collect();
                let hired_labels = week_series_labels(&hired_keys, today)?;
                let contratados: Vec<_> = hired_labels
                    .iter()
                    .zip(stats.weekly.contratados.iter())
                    .map(|(label, point)| (label.clone(), Some(point)))
                    .collect();
                PrettyPrinter::print_series("Hired per week", &contratados);
            }
        }
        OutputFormat::Json => {
            let payload: Vec<serde_json::Value> = labels
                .iter()
                .zip(stats.weekly.convocado.iter())
                .map(|(label, point)| serde_json::json!({"label": label, "value": point.value}))
                .collect();
            println!("{}", JsonFormatter::format(&payload)?);
        }
    }
    Ok(())
}

fn monthly_section(client: &Client, format: &OutputFormat) -> Result<()> {
    let stats: CumulativeStats = client.load_json(CUMULATIVE_STATS_RESOURCE)?;

    let series = &stats.monthly_contratados.contratados;
    let keys: Vec<String> = series.iter().map(|p| p.label.clone()).collect();
    let labels = month_series_labels(&keys)?;

    match format {
        OutputFormat::Pretty => {
            let points: Vec<_> = labels
                .iter()
                .zip(series.iter())
                .map(|(label, point)| (label.clone(), Some(point)))
                .collect();
            PrettyPrinter::print_series("Hired per month", &points);
        }
        OutputFormat::Json => {
            let payload: Vec<serde_json::Value> = labels
                .iter()
                .zip(series.iter())
                .map(|(label, point)| serde_json::json!({"label": label, "value": point.value}))
                .collect();
            println!("{}", JsonFormatter::format(&payload)?);
        }
    }
    Ok(())
}

fn histogram_section(client: &Client, bucket: Option<&str>, format: &OutputFormat) -> Result<()> {
    let dist: OptionsDistribution = client.load_json(DISTRIBUTION_RESOURCE)?;
    match format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_buckets(&dist.buckets);
            if let Some(range) = bucket {
                let details = dist.bucket_details(range);
                PrettyPrinter::print_bucket_details(range, &details);
            }
        }
        OutputFormat::Json => match bucket {
            Some(range) => println!("{}", JsonFormatter::format(&dist.bucket_details(range))?),
            None => println!("{}", JsonFormatter::format(&dist.buckets)?),
        },
    }
    Ok(())
}

fn velocity_section(client: &Client, group: &str, format: &OutputFormat) -> Result<()> {
    let set = client.load_records(VELOCITY_RESOURCE)?;
    let points = velocity_points(&set.records, group);
    match format {
        OutputFormat::Pretty => PrettyPrinter::print_velocity(group, &points),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&points)?),
    }
    Ok(())
}

fn remaining_section(client: &Client, format: &OutputFormat) -> Result<()> {
    let set = client.load_records(REMAINING_RESOURCE)?;
    let rows = remaining_rows(&set.records);
    match format {
        OutputFormat::Pretty => PrettyPrinter::print_remaining(&rows),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&rows)?),
    }
    Ok(())
}

fn hired_by_role_section(client: &Client, view: &HiredView, format: &OutputFormat) -> Result<()> {
    let set = client.load_records(PERCENT_CONTRATADO_RESOURCE)?;
    let rows = role_hiring_rows(&set.records);
    match format {
        OutputFormat::Pretty => match view {
            HiredView::Percent => PrettyPrinter::print_role_hiring_percent(&rows),
            HiredView::Absolute => PrettyPrinter::print_role_hiring_absolute(&rows),
        },
        OutputFormat::Json => println!("{}", JsonFormatter::format(&rows)?),
    }
    Ok(())
}

/// Show one period of a detail table, sorted by date, role, then name.
fn detail_section(
    client: &Client,
    resource: &str,
    key_column: &str,
    label_column: &str,
    period: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let set = client.load_records(resource)?;
    let options = period_options(&set.records, key_column, label_column);

    let Some((selected_key, selected_label)) = (match period {
        Some(key) => options.iter().find(|(k, _)| k == key).cloned(),
        None => options.first().cloned(),
    }) else {
        println!("No periods available.");
        return Ok(());
    };

    let mut rows: Vec<Record> = rows_for_period(&set.records, key_column, &selected_key)
        .into_iter()
        .cloned()
        .collect();
    sort_detail_rows(&mut rows);

    match format {
        OutputFormat::Pretty => {
            println!("📆 Period: {} ({})", selected_label, selected_key);
            PrettyPrinter::print_table(&set.headers, &rows);
        }
        OutputFormat::Json => println!("{}", JsonFormatter::format(&rows)?),
    }
    Ok(())
}
