//! The persisted "details" encoding of a geocoded place.
//!
//! Enrichment writes `"<city>[, <region>][, <country>] — <lat>, <lon>"` into a
//! Notion rich-text field and export reads it back. [`format_details`] and
//! [`parse_details`] are the only two places that know this layout; nothing
//! else should split the string by hand.

use std::sync::LazyLock;

use regex::Regex;

/// Written instead of a details string when the geocoder has no match.
pub const NOT_FOUND: &str = "Not found";

/// Separator between the label and the coordinates.
const SEPARATOR: char = '—';

static TRAILING_COORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"—\s*([-+]?(?:\d+\.?\d*|\.\d+))\s*,\s*([-+]?(?:\d+\.?\d*|\.\d+))\s*$")
        .expect("valid trailing coordinates regex")
});

/// A resolved geocoding match.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub city: String,
    /// State, region or county; empty when the geocoder has none.
    pub region: String,
    /// Empty when the geocoder has none.
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    /// `"city, region, country"` with empty parts omitted.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = scrub(&self.city);
        for part in [&self.region, &self.country] {
            let part = scrub(part);
            if !part.is_empty() {
                label.push_str(", ");
                label.push_str(&part);
            }
        }
        label
    }
}

/// Coordinates and label recovered from a details string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDetails {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

impl ParsedDetails {
    #[must_use]
    pub fn coord(&self) -> crate::Coord {
        crate::Coord::new(self.lat, self.lon)
    }
}

/// Formats a place as a details string.
///
/// Em-dashes inside the label are replaced with `-` so the result always
/// parses back with [`parse_details`].
#[must_use]
pub fn format_details(place: &Place) -> String {
    format!("{} {SEPARATOR} {}, {}", place.label(), place.lat, place.lon)
}

/// Parses a details string written by [`format_details`].
///
/// Returns `None` for an empty string, the [`NOT_FOUND`] sentinel (compared
/// ignoring case and whitespace), or any text that does not end in
/// `— <number>, <number>`.
#[must_use]
pub fn parse_details(details: &str) -> Option<ParsedDetails> {
    let details = details.trim();
    if details.is_empty() || is_not_found(details) {
        return None;
    }

    let caps = TRAILING_COORDS.captures(details)?;
    let lat = caps[1].parse::<f64>().ok()?;
    let lon = caps[2].parse::<f64>().ok()?;

    let label = details
        .split(SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    Some(ParsedDetails { label, lat, lon })
}

fn is_not_found(details: &str) -> bool {
    details
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .eq_ignore_ascii_case(NOT_FOUND)
}

fn scrub(part: &str) -> String {
    part.trim().replace(SEPARATOR, "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Place {
        Place {
            city: "Paris".to_string(),
            region: "Île-de-France".to_string(),
            country: "France".to_string(),
            lat: 48.8566,
            lon: 2.3522,
        }
    }

    #[test]
    fn formats_full_place() {
        assert_eq!(
            format_details(&paris()),
            "Paris, Île-de-France, France — 48.8566, 2.3522"
        );
    }

    #[test]
    fn omits_empty_region_and_country() {
        let place = Place {
            city: "Null Island".to_string(),
            region: String::new(),
            country: String::new(),
            lat: 0.0,
            lon: 0.0,
        };
        assert_eq!(format_details(&place), "Null Island — 0, 0");
    }

    #[test]
    fn omits_only_missing_region() {
        let place = Place {
            region: String::new(),
            ..paris()
        };
        assert_eq!(format_details(&place), "Paris, France — 48.8566, 2.3522");
    }

    #[test]
    fn parses_formatted_string() {
        let parsed = parse_details("Paris, Île-de-France, France — 48.8566, 2.3522").unwrap();
        assert_eq!(parsed.label, "Paris, Île-de-France, France");
        assert!((parsed.lat - 48.8566).abs() < f64::EPSILON);
        assert!((parsed.lon - 2.3522).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_negative_coordinates_and_loose_spacing() {
        let parsed = parse_details("Buenos Aires, Argentina —-34.6037 ,  -58.3816  ").unwrap();
        assert_eq!(parsed.label, "Buenos Aires, Argentina");
        assert!((parsed.lat + 34.6037).abs() < f64::EPSILON);
        assert!((parsed.lon + 58.3816).abs() < f64::EPSILON);
    }

    #[test]
    fn sentinel_and_empty_are_unparsable() {
        assert!(parse_details("Not found").is_none());
        assert!(parse_details("  not   FOUND ").is_none());
        assert!(parse_details("").is_none());
        assert!(parse_details("   ").is_none());
    }

    #[test]
    fn text_without_trailing_coordinates_is_unparsable() {
        assert!(parse_details("Paris, France").is_none());
        assert!(parse_details("Paris — 48.8566").is_none());
        assert!(parse_details("Paris — 48.8566, 2.3522 (approx)").is_none());
        assert!(parse_details("Paris 48.8566, 2.3522").is_none());
    }

    #[test]
    fn label_is_text_before_first_dash() {
        let parsed = parse_details("Lyon — old note — 45.764, 4.8357").unwrap();
        assert_eq!(parsed.label, "Lyon");
        assert!((parsed.lat - 45.764).abs() < f64::EPSILON);
    }

    #[test]
    fn em_dash_in_label_is_scrubbed_before_formatting() {
        let place = Place {
            city: "Saint-Denis — Nord".to_string(),
            ..paris()
        };
        let formatted = format_details(&place);
        let parsed = parse_details(&formatted).unwrap();
        assert_eq!(parsed.label, "Saint-Denis - Nord, Île-de-France, France");
    }

    #[test]
    fn em_dash_in_region_and_country_is_scrubbed() {
        let place = Place {
            region: "A — B".to_string(),
            country: "C—D".to_string(),
            ..paris()
        };
        let parsed = parse_details(&format_details(&place)).unwrap();
        assert_eq!(parsed.label, "Paris, A - B, C-D");
        assert!(!parsed.label.contains('—'));
        assert_eq!(parsed.coord().to_array(), [48.8566, 2.3522]);
    }

    #[test]
    fn round_trip_preserves_label_and_coordinates() {
        let cases = [
            ("Tokyo", "Tokyo", "Japan", 35.682_839, 139.759_455),
            ("Sydney", "New South Wales", "Australia", -33.8688, 151.2093),
            ("Reykjavík", "", "Iceland", 64.145_981, -21.942_237_8),
            ("Quito", "Pichincha", "", -0.220_164, -78.512_327_6),
            ("Origin", "", "", 0.0, -0.0),
            ("Pole", "", "", 90.0, 180.0),
            ("Tiny", "", "", 1e-7, -1e-9),
            ("Bastia", "A — B", "France", 42.697_283, 9.450_881),
            ("Hamlet", "", "Nord — Sud", -12.5, 45.25),
            ("Haut—Rhin", "Grand—Est", "France—Métropole", 47.75, 7.33),
        ];

        for (city, region, country, lat, lon) in cases {
            let place = Place {
                city: city.to_string(),
                region: region.to_string(),
                country: country.to_string(),
                lat,
                lon,
            };
            let parsed = parse_details(&format_details(&place))
                .unwrap_or_else(|| panic!("{city} should parse"));
            assert_eq!(parsed.label, place.label());
            assert_eq!(parsed.lat.to_bits(), lat.to_bits(), "{city} lat");
            assert_eq!(parsed.lon.abs().to_bits(), lon.abs().to_bits(), "{city} lon");
        }
    }
}
