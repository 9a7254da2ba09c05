//! Command-line interface for painel

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "painel")]
#[command(about = "Hiring-pipeline snapshot reporting: history, summary and statistics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the published data directory
    #[arg(long, global = true, default_value = crate::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show snapshot history with filtering and search
    History {
        /// Snapshot selection: "latest", "all", or a file name / date
        #[arg(long, default_value = "latest")]
        select: String,

        /// Status filter: "__ALL__", "CONVOCADO_NOVO", "CONVOCADO_ALTERADO",
        /// or an exact status value (defaults to an automatic choice)
        #[arg(long)]
        filter: Option<String>,

        /// Search term: digits match the option id, text matches names
        #[arg(long)]
        search: Option<String>,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show the per-option status summary table
    Summary {
        /// Search term applied to the table
        #[arg(long)]
        search: Option<String>,

        /// Zero-based column index to sort by
        #[arg(long)]
        sort: Option<usize>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show aggregate statistics
    Stats {
        /// Section: "general", "weekly", "monthly", "histogram", "velocity",
        /// "remaining", "hired-by-role", "weekly-detail", "monthly-detail",
        /// or "all"
        #[arg(long, default_value = "all")]
        section: String,

        /// Histogram bucket range to expand (e.g. "1-5")
        #[arg(long)]
        bucket: Option<String>,

        /// Velocity group selector (e.g. "ALL", "ampla")
        #[arg(long, default_value = "ALL")]
        group: String,

        /// Period key for detail sections (defaults to the most recent)
        #[arg(long)]
        period: Option<String>,

        /// Hired-by-role view: "percent", "absolute"
        #[arg(long, default_value = "percent")]
        view: String,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Parse snapshot selection string
#[derive(Debug, Clone)]
pub enum Selection {
    Latest,
    All,
    One(String),
}

impl Selection {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "all" => Ok(Self::All),
            "" => Err("Selection must not be empty".to_string()),
            _ => Ok(Self::One(s.to_string())),
        }
    }
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Parse statistics section string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSection {
    General,
    Weekly,
    Monthly,
    Histogram,
    Velocity,
    Remaining,
    HiredByRole,
    WeeklyDetail,
    MonthlyDetail,
    All,
}

impl StatsSection {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "histogram" => Ok(Self::Histogram),
            "velocity" => Ok(Self::Velocity),
            "remaining" => Ok(Self::Remaining),
            "hired-by-role" => Ok(Self::HiredByRole),
            "weekly-detail" => Ok(Self::WeeklyDetail),
            "monthly-detail" => Ok(Self::MonthlyDetail),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "Invalid section: {}. Use 'general', 'weekly', 'monthly', 'histogram', \
                 'velocity', 'remaining', 'hired-by-role', 'weekly-detail', \
                 'monthly-detail' or 'all'",
                s
            )),
        }
    }
}

/// Parse hired-by-role view string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HiredView {
    Percent,
    Absolute,
}

impl HiredView {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "percent" => Ok(Self::Percent),
            "absolute" => Ok(Self::Absolute),
            _ => Err(format!("Invalid view: {}. Use 'percent' or 'absolute'", s)),
        }
    }
}
