//! Nominatim / OpenStreetMap place lookup.
//!
//! The public Nominatim instance allows about one request per second, so the
//! client pauses after every lookup before handing back the result.

pub mod client;
pub mod error;
pub mod types;

pub use client::{NominatimClient, MIN_INTERVAL};
pub use error::GeocodeError;
pub use types::{Address, Candidate};
