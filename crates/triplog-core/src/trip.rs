//! Export records for the trip map.
//!
//! Each database row becomes at most one [`TripRecord`]. The decision is made
//! once, by [`classify`], from the row's parsed details strings: a parsable
//! arrival with no parsable departure is a stay, both parsable is a transport
//! leg, and an unparsable arrival drops the row.

use serde::{Deserialize, Serialize};

use crate::details::parse_details;
use crate::geo::{haversine_km, round2};

pub const DEFAULT_NAME: &str = "Trip";
pub const DEFAULT_TYPE: &str = "Unknown";

/// The fields of a row that export cares about, already pulled out of the
/// database representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSnapshot {
    pub name: Option<String>,
    pub trip_type: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub arrival_details: Option<String>,
    pub departure_details: Option<String>,
}

/// One entry of `cities.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TripRecord {
    Stay {
        name: String,
        #[serde(rename = "type")]
        trip_type: String,
        arrival: [f64; 2],
        arrival_label: String,
        arrival_date: Option<String>,
        departure_date: Option<String>,
    },
    Transport {
        name: String,
        #[serde(rename = "type")]
        trip_type: String,
        departure: [f64; 2],
        departure_label: String,
        arrival: [f64; 2],
        arrival_label: String,
        distance_km: f64,
        departure_date: Option<String>,
        arrival_date: Option<String>,
    },
}

impl TripRecord {
    #[must_use]
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay { .. })
    }
}

/// Builds the export record for a row, or `None` when its arrival details
/// do not parse (including the "Not found" sentinel).
///
/// For a stay the date range reads as arrival (start) to departure (end).
/// For a transport leg it reads as departure (start) to arrival (end).
#[must_use]
pub fn classify(row: &RowSnapshot) -> Option<TripRecord> {
    let arrival = parse_details(row.arrival_details.as_deref().unwrap_or_default())?;
    let departure = parse_details(row.departure_details.as_deref().unwrap_or_default());

    let name = non_blank(row.name.as_deref()).unwrap_or(DEFAULT_NAME).to_string();
    let trip_type = non_blank(row.trip_type.as_deref())
        .unwrap_or(DEFAULT_TYPE)
        .to_string();

    let record = match departure {
        None => TripRecord::Stay {
            name,
            trip_type,
            arrival: arrival.coord().to_array(),
            arrival_label: arrival.label,
            arrival_date: row.date_start.clone(),
            departure_date: row.date_end.clone(),
        },
        Some(departure) => TripRecord::Transport {
            name,
            trip_type,
            departure: departure.coord().to_array(),
            distance_km: round2(haversine_km(departure.coord(), arrival.coord())),
            departure_label: departure.label,
            arrival: arrival.coord().to_array(),
            arrival_label: arrival.label,
            departure_date: row.date_start.clone(),
            arrival_date: row.date_end.clone(),
        },
    };

    Some(record)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
