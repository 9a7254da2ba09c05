//! Output formatting utilities

use crate::error::Result;
use crate::record::{DiffEntry, Record, Snapshot};
use crate::stats::{
    Bucket, BucketDetail, GeneralStats, RemainingRow, RoleHiringRow, SeriesPoint, VelocityPoint,
};

/// Pretty printer for painel output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the history manifest
    pub fn print_index(entries: &[DiffEntry]) {
        if entries.is_empty() {
            println!("No snapshots available.");
            return;
        }

        println!("📚 Available Snapshots:");
        for (i, entry) in entries.iter().enumerate() {
            let prefix = if i == entries.len() - 1 { "└─" } else { "├─" };
            println!("{} {} ({}, {} events)", prefix, entry.date, entry.file, entry.events);
        }
    }

    /// Print filtered snapshot groups, newest first
    pub fn print_history(groups: &[(&Snapshot, Vec<&Record>)]) {
        if groups.is_empty() {
            println!("No records match the current filter.");
            return;
        }

        for (snapshot, records) in groups {
            println!();
            println!("📅 {} ({} records)", snapshot.date, records.len());
            for (i, record) in records.iter().enumerate() {
                let prefix = if i == records.len() - 1 { "└─" } else { "├─" };
                let marker = record
                    .classification()
                    .marker()
                    .map(|m| format!("{} ", m))
                    .unwrap_or_default();
                println!(
                    "{} {}{} | {} | {}",
                    prefix,
                    marker,
                    record.get(crate::record::ID_COLUMN),
                    record.get(crate::record::NAME_COLUMN),
                    record.status()
                );
            }
        }
    }

    /// Print a record table with its headers
    pub fn print_table(headers: &[String], records: &[Record]) {
        if records.is_empty() {
            println!("No records found.");
            return;
        }

        println!("{}", headers.join(" | "));
        for record in records {
            let cells: Vec<&str> = (0..headers.len()).map(|i| record.value_at(i)).collect();
            println!("{}", cells.join(" | "));
        }
        println!();
        println!("{} records", records.len());
    }

    /// Print a labelled series
    pub fn print_series(title: &str, points: &[(String, Option<&SeriesPoint>)]) {
        println!("📈 {}", title);
        if points.is_empty() {
            println!("└─ (no data)");
            return;
        }
        for (i, (label, point)) in points.iter().enumerate() {
            let prefix = if i == points.len() - 1 { "└─" } else { "├─" };
            let value = point
                .and_then(|p| p.value_as_i64())
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("{} {}: {}", prefix, label, value);
        }
    }

    /// Print the open-position histogram
    pub fn print_buckets(buckets: &[Bucket]) {
        println!("📊 Open Positions by Bucket");
        if buckets.is_empty() {
            println!("└─ (no data)");
            return;
        }
        for (i, bucket) in buckets.iter().enumerate() {
            let prefix = if i == buckets.len() - 1 { "└─" } else { "├─" };
            println!("{} {}: {}", prefix, bucket.range, bucket.count);
        }
    }

    /// Print the detail rows behind one histogram bucket
    pub fn print_bucket_details(range: &str, details: &[&BucketDetail]) {
        println!("🔍 Bucket {} details:", range);
        if details.is_empty() {
            println!("└─ (no positions)");
            return;
        }
        for (i, detail) in details.iter().enumerate() {
            let prefix = if i == details.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {} | {} | {} | {} open",
                prefix,
                detail.opcao,
                detail.cargo,
                detail.subarea,
                detail.open_positions()
            );
        }
    }

    /// Print headline counters, showing "-" for any field the upstream
    /// payload omitted
    pub fn print_general_stats(stats: &GeneralStats) {
        fn opt<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        }

        println!("📊 General Statistics");
        println!("├─ Last update: {}", opt(&stats.last_update));
        println!("├─ Business days elapsed: {}", opt(&stats.business_days_elapsed));
        println!("├─ Total called up: {}", opt(&stats.total_convocados));
        println!("├─ Called up today: {}", opt(&stats.convocados_hoje));
        println!("├─ Daily average (mm10): {}", opt(&stats.media_diaria_mm10));
        println!("├─ Total accepted: {}", opt(&stats.total_aceitou));
        println!("├─ Total hired: {}", opt(&stats.total_contratados));
        println!(
            "└─ Avg days called up → accepted: {}",
            opt(&stats.avg_days_convocado_to_aceitou)
        );
    }

    /// Print the velocity series for one group
    pub fn print_velocity(group: &str, points: &[VelocityPoint]) {
        println!("🚀 Call-up Velocity ({})", group);
        if points.is_empty() {
            println!("└─ (no data)");
            return;
        }
        for (i, point) in points.iter().enumerate() {
            let prefix = if i == points.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {}: {} (mm5 {}, mm10 {})",
                prefix, point.date, point.daily, point.mm5, point.mm10
            );
        }
    }

    /// Print the remaining-days projection table
    pub fn print_remaining(rows: &[RemainingRow]) {
        println!("⏳ Remaining Days by Role");
        if rows.is_empty() {
            println!("└─ (no data)");
            return;
        }
        for (i, row) in rows.iter().enumerate() {
            let prefix = if i == rows.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {}: {} remaining (mm5 {}/day ≈ {} days, mm10 {}/day ≈ {} days)",
                prefix, row.cargo, row.remaining, row.mm5, row.days_mm5, row.mm10, row.days_mm10
            );
        }
    }

    /// Print per-role hiring progress as completion percentages
    pub fn print_role_hiring_percent(rows: &[RoleHiringRow]) {
        println!("📋 Hired by Role (% of total)");
        if rows.is_empty() {
            println!("└─ (no data)");
            return;
        }
        for (i, row) in rows.iter().enumerate() {
            let prefix = if i == rows.len() - 1 { "└─" } else { "├─" };
            println!("{} {}: {:.1}% hired", prefix, row.cargo, row.percent_contratado);
        }
    }

    /// Print per-role hiring progress as absolute counts
    pub fn print_role_hiring_absolute(rows: &[RoleHiringRow]) {
        println!("📋 Hired by Role (counts)");
        if rows.is_empty() {
            println!("└─ (no data)");
            return;
        }
        for (i, row) in rows.iter().enumerate() {
            let prefix = if i == rows.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {}: {} hired, {} in progress, {} open",
                prefix, row.cargo, row.contratados, row.em_contratacao, row.vagas_abertas
            );
        }
    }

    /// Print a placeholder for a statistics section that failed to load
    pub fn print_section_unavailable(section: &str) {
        println!("⚠️  {}: data unavailable", section);
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}
