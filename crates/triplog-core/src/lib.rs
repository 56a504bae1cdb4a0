pub mod app_config;
pub mod config;
pub mod details;
pub mod geo;
pub mod trip;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use details::{format_details, parse_details, ParsedDetails, Place, NOT_FOUND};
pub use geo::{haversine_km, round2, Coord, EARTH_RADIUS_KM};
pub use trip::{classify, RowSnapshot, TripRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
