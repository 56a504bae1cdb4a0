//! Geocodes the free-text "Arrival" / "Departure" fields and writes the
//! result into the matching "details" field.

use clap::ValueEnum;
use triplog_core::{format_details, NOT_FOUND};
use triplog_geocoder::NominatimClient;
use triplog_notion::{fields, Filter, NotionClient, PropertyFilter};

/// Which (source, details) property pair to enrich.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Arrival,
    Departure,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Arrival, Direction::Departure];

    #[must_use]
    pub fn source_property(self) -> &'static str {
        match self {
            Direction::Arrival => "Arrival",
            Direction::Departure => "Departure",
        }
    }

    #[must_use]
    pub fn details_property(self) -> &'static str {
        match self {
            Direction::Arrival => "Arrival details",
            Direction::Departure => "Departure details",
        }
    }

    /// Rows with a source value but no details yet. Rows already holding a
    /// details string, including the "Not found" sentinel, never match, which
    /// keeps reruns from touching them.
    #[must_use]
    pub fn pending_filter(self) -> Filter {
        Filter::all(vec![
            PropertyFilter::is_not_empty(self.source_property()),
            PropertyFilter::is_empty(self.details_property()),
        ])
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source_property())
    }
}

/// Per-direction counters. `updated` only counts real matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub updated: usize,
    pub not_found: usize,
    pub skipped: usize,
}

/// Enriches every pending row for `direction`.
///
/// Rows are processed in the order Notion returns them. A row whose source
/// text is blank is skipped. A lookup with no match writes [`NOT_FOUND`].
/// With `dry_run` nothing is written back; lookups still happen.
///
/// # Errors
///
/// Any Notion or Nominatim failure aborts the pass. Rows written before the
/// failure stay written.
pub async fn enrich_direction(
    notion: &NotionClient,
    geocoder: &NominatimClient,
    direction: Direction,
    dry_run: bool,
) -> anyhow::Result<EnrichSummary> {
    let source = direction.source_property();
    let details = direction.details_property();

    let pages = notion.query_all(Some(&direction.pending_filter())).await?;
    tracing::info!(%direction, rows = pages.len(), "enrich: rows pending");

    let mut summary = EnrichSummary::default();

    for page in &pages {
        let Some(query) = fields::rich_text(page, source) else {
            tracing::debug!(page_id = %page.id, property = source, "enrich: blank source, skipping");
            summary.skipped += 1;
            continue;
        };

        let value = match geocoder.lookup(&query).await? {
            Some(place) => {
                summary.updated += 1;
                format_details(&place)
            }
            None => {
                summary.not_found += 1;
                NOT_FOUND.to_owned()
            }
        };

        if dry_run {
            tracing::info!(page_id = %page.id, property = details, %value, "enrich: dry run, not writing");
            continue;
        }

        notion.set_rich_text(&page.id, details, &value).await?;
        tracing::info!(page_id = %page.id, property = details, query = %query, %value, "enrich: row updated");
    }

    tracing::info!(
        %direction,
        updated = summary.updated,
        not_found = summary.not_found,
        skipped = summary.skipped,
        "enrich: pass complete"
    );
    Ok(summary)
}
