//! HTTP resource loading and CSV payload parsing

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;

use crate::error::{PainelError, Result};
use crate::record::{Record, RecordSet};

/// First-cell token of the metadata row carrying the extraction timestamp
pub const LAST_UPDATE_SENTINEL: &str = "LAST_UPDATE";

/// HTTP client for the published data directory. Every request carries a
/// `?v=<token>` query parameter from a monotonically increasing counter
/// so intermediary caches never serve a stale payload.
pub struct Client {
    base_url: String,
    cache_token: AtomicU64,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            base_url: base_url.into(),
            cache_token: AtomicU64::new(seed),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn next_token(&self) -> u64 {
        self.cache_token.fetch_add(1, Ordering::Relaxed)
    }

    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    /// Fetches one resource as text. Any transport or status failure maps
    /// to a single error naming the resource, so callers can report which
    /// file failed without unwinding the cause chain.
    pub fn fetch_text(&self, resource: &str) -> Result<String> {
        let url = self.resource_url(resource);
        let token = self.next_token().to_string();
        log::debug!("GET {} (v={})", url, token);

        let response = ureq::get(&url)
            .query("v", &token)
            .call()
            .map_err(|err| PainelError::transport(resource, err.to_string()))?;

        response
            .into_body()
            .read_to_string()
            .map_err(|err| PainelError::transport(resource, err.to_string()))
    }

    /// Fetches and parses a CSV resource.
    pub fn load_records(&self, resource: &str) -> Result<RecordSet> {
        let text = self.fetch_text(resource)?;
        parse_records(&text)
    }

    /// Fetches and deserializes a JSON resource.
    pub fn load_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T> {
        let text = self.fetch_text(resource)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches a JSON resource without a fixed shape.
    pub fn load_tree(&self, resource: &str) -> Result<serde_json::Value> {
        self.load_json(resource)
    }
}

/// Parses a CSV payload into a record set.
///
/// Layout handled:
///   - leading blank rows are skipped
///   - an optional `LAST_UPDATE,<timestamp>` metadata row before the header
///   - the first remaining row is the header, trimmed per cell
///   - each following row becomes a record keyed by header name, padded
///     with empty strings when shorter than the header
pub fn parse_records(text: &str) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut set = RecordSet::default();
    let mut rows = reader.records();

    let headers = loop {
        let row = match rows.next() {
            Some(row) => row?,
            None => return Ok(set),
        };
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if row.get(0).map(str::trim) == Some(LAST_UPDATE_SENTINEL) {
            set.last_update = row.get(1).map(|v| v.trim().to_string());
            continue;
        }
        break row;
    };

    set.headers = headers.iter().map(|cell| cell.trim().to_string()).collect();

    for row in rows {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut record = Record::new();
        for (idx, header) in set.headers.iter().enumerate() {
            let value = row.get(idx).map(str::trim).unwrap_or("");
            record.insert(header.clone(), value);
        }
        set.records.push(record);
    }

    Ok(set)
}
