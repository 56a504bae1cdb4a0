//! Notion database query and page types.
//!
//! Only the property kinds the trip log reads are modelled; anything else
//! deserializes to [`PropertyValue::Other`] and is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// A database row.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// A property value, tagged by its Notion `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichTextRun>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextRun>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateRange>,
    },
    #[serde(other)]
    Other,
}

/// One run of a title or rich-text property.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextRun {
    #[serde(default)]
    pub plain_text: Option<String>,
    #[serde(default)]
    pub text: Option<TextContent>,
}

impl RichTextRun {
    /// `plain_text` when present, else the raw `text.content`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A date property: ISO-8601 date or datetime strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// One page of `POST /databases/{id}/query` results.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<&'a Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<&'a str>,
}

/// A conjunction of property predicates: `{"and": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub and: Vec<PropertyFilter>,
}

impl Filter {
    #[must_use]
    pub fn all(predicates: Vec<PropertyFilter>) -> Self {
        Self { and: predicates }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    pub rich_text: RichTextCondition,
}

impl PropertyFilter {
    #[must_use]
    pub fn is_empty(property: &str) -> Self {
        Self {
            property: property.to_owned(),
            rich_text: RichTextCondition::IsEmpty(true),
        }
    }

    #[must_use]
    pub fn is_not_empty(property: &str) -> Self {
        Self {
            property: property.to_owned(),
            rich_text: RichTextCondition::IsNotEmpty(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextCondition {
    IsEmpty(bool),
    IsNotEmpty(bool),
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Body for `PATCH /pages/{id}` setting one rich-text property.
pub(crate) fn rich_text_update(property: &str, value: &str) -> serde_json::Value {
    serde_json::json!({
        "properties": {
            property: {
                "rich_text": [{ "text": { "content": value } }]
            }
        }
    })
}
