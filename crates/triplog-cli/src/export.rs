//! Builds `cities.json` from the enriched rows.

use std::path::{Path, PathBuf};

use thiserror::Error;
use triplog_core::{classify, RowSnapshot, TripRecord};
use triplog_notion::{fields, Filter, NotionClient, NotionError, Page, PropertyFilter};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Notion(#[from] NotionError),

    #[error("failed to serialize trips: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every row with arrival details. Departure is not filtered on: rows
/// without one are stays.
#[must_use]
pub fn export_filter() -> Filter {
    Filter::all(vec![PropertyFilter::is_not_empty("Arrival details")])
}

/// Pulls the export-relevant fields out of a page.
#[must_use]
pub fn snapshot(page: &Page) -> RowSnapshot {
    let dates = fields::date_range(page, "Date").unwrap_or_default();
    RowSnapshot {
        name: fields::title(page, "Name"),
        trip_type: fields::select(page, "Type"),
        date_start: dates.start,
        date_end: dates.end,
        arrival_details: fields::rich_text(page, "Arrival details"),
        departure_details: fields::rich_text(page, "Departure details"),
    }
}

/// Queries every exportable row and classifies it, keeping Notion's order.
///
/// # Errors
///
/// Returns [`ExportError::Notion`] if any query page fails.
pub async fn collect_trips(notion: &NotionClient) -> Result<Vec<TripRecord>, ExportError> {
    let pages = notion.query_all(Some(&export_filter())).await?;

    let mut trips = Vec::with_capacity(pages.len());
    for page in &pages {
        match classify(&snapshot(page)) {
            Some(trip) => trips.push(trip),
            None => tracing::debug!(page_id = %page.id, "export: arrival details unparsable, skipping"),
        }
    }
    Ok(trips)
}

/// Writes `trips` as indented JSON, replacing whatever was at `path`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_trips(path: &Path, trips: &[TripRecord]) -> Result<(), ExportError> {
    let mut json = serde_json::to_string_pretty(trips)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Runs the export and returns the number of records written. The file is
/// written even when there are no records.
///
/// # Errors
///
/// Propagates [`collect_trips`] and [`write_trips`] failures.
pub async fn export_trips(notion: &NotionClient, path: &Path) -> Result<usize, ExportError> {
    let trips = collect_trips(notion).await?;
    write_trips(path, &trips)?;

    let stays = trips.iter().filter(|t| t.is_stay()).count();
    tracing::info!(
        path = %path.display(),
        total = trips.len(),
        stays,
        transports = trips.len() - stays,
        "export: trips written"
    );
    Ok(trips.len())
}
