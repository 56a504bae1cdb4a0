//! Plain-value extraction from page properties.
//!
//! Every accessor returns `None` when the property is missing, has a
//! different kind, or is blank after trimming. Callers treat that as an
//! absent value, never as an error.

use crate::types::{DateRange, Page, PropertyValue, RichTextRun};

/// Text of a `title` property.
#[must_use]
pub fn title(page: &Page, name: &str) -> Option<String> {
    match page.properties.get(name)? {
        PropertyValue::Title { title } => join_runs(title),
        _ => None,
    }
}

/// Text of a `rich_text` property.
#[must_use]
pub fn rich_text(page: &Page, name: &str) -> Option<String> {
    match page.properties.get(name)? {
        PropertyValue::RichText { rich_text } => join_runs(rich_text),
        _ => None,
    }
}

/// Name of the selected option of a `select` property.
#[must_use]
pub fn select(page: &Page, name: &str) -> Option<String> {
    match page.properties.get(name)? {
        PropertyValue::Select { select } => select
            .as_ref()
            .map(|opt| opt.name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_owned),
        _ => None,
    }
}

/// Start and end of a `date` property. Blank ends come back as `None`.
#[must_use]
pub fn date_range(page: &Page, name: &str) -> Option<DateRange> {
    match page.properties.get(name)? {
        PropertyValue::Date { date } => {
            let date = date.as_ref()?;
            let clean = |v: &Option<String>| {
                v.as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            };
            let range = DateRange {
                start: clean(&date.start),
                end: clean(&date.end),
            };
            if range.start.is_none() && range.end.is_none() {
                None
            } else {
                Some(range)
            }
        }
        _ => None,
    }
}

fn join_runs(runs: &[RichTextRun]) -> Option<String> {
    let text: String = runs.iter().map(RichTextRun::as_str).collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        serde_json::from_value(serde_json::json!({
            "id": "page-1",
            "properties": {
                "Name": {
                    "type": "title",
                    "title": [
                        { "plain_text": "Trip to " },
                        { "plain_text": "Paris" }
                    ]
                },
                "Arrival": {
                    "type": "rich_text",
                    "rich_text": [{ "plain_text": "  Paris, France  " }]
                },
                "Departure": { "type": "rich_text", "rich_text": [] },
                "Notes": {
                    "type": "rich_text",
                    "rich_text": [{ "text": { "content": "raw only" } }]
                },
                "Blank": { "type": "rich_text", "rich_text": [{ "plain_text": "   " }] },
                "Type": { "type": "select", "select": { "name": "Train" } },
                "NoType": { "type": "select", "select": null },
                "Date": {
                    "type": "date",
                    "date": { "start": "2024-05-01", "end": null }
                },
                "NoDate": { "type": "date", "date": null }
            }
        }))
        .expect("fixture should deserialize")
    }

    #[test]
    fn title_concatenates_runs() {
        assert_eq!(title(&page(), "Name").as_deref(), Some("Trip to Paris"));
    }

    #[test]
    fn rich_text_is_trimmed() {
        assert_eq!(rich_text(&page(), "Arrival").as_deref(), Some("Paris, France"));
    }

    #[test]
    fn rich_text_falls_back_to_raw_content() {
        assert_eq!(rich_text(&page(), "Notes").as_deref(), Some("raw only"));
    }

    #[test]
    fn empty_or_blank_rich_text_is_absent() {
        assert!(rich_text(&page(), "Departure").is_none());
        assert!(rich_text(&page(), "Blank").is_none());
    }

    #[test]
    fn missing_property_is_absent() {
        assert!(rich_text(&page(), "Arrival details").is_none());
        assert!(title(&page(), "Title").is_none());
    }

    #[test]
    fn wrong_kind_is_absent() {
        assert!(rich_text(&page(), "Name").is_none());
        assert!(title(&page(), "Arrival").is_none());
        assert!(select(&page(), "Arrival").is_none());
        assert!(date_range(&page(), "Type").is_none());
    }

    #[test]
    fn select_returns_option_name() {
        assert_eq!(select(&page(), "Type").as_deref(), Some("Train"));
        assert!(select(&page(), "NoType").is_none());
    }

    #[test]
    fn date_range_keeps_open_end() {
        assert_eq!(
            date_range(&page(), "Date"),
            Some(DateRange {
                start: Some("2024-05-01".to_string()),
                end: None,
            })
        );
        assert!(date_range(&page(), "NoDate").is_none());
    }
}
