use serde::Deserialize;

/// One entry of the `/search` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Address,
}

/// The `address` object returned with `addressdetails=1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// City, town, village or municipality, whichever comes first.
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        first_present(&[&self.city, &self.town, &self.village, &self.municipality])
    }

    /// State, region or county, whichever comes first.
    #[must_use]
    pub fn area(&self) -> Option<&str> {
        first_present(&[&self.state, &self.region, &self.county])
    }
}

fn first_present<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| Option::as_deref(*f))
        .map(str::trim)
        .find(|s| !s.is_empty())
}
