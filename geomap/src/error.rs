//! Error type used by the crate.

use thiserror::Error;

/// Errors that can be returned by map view operations and source loading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    /// The operation is not allowed in the current load state of the map view.
    #[error("invalid map state: {0}")]
    InvalidState(&'static str),
    /// A layer references a source that was never added to the map view.
    #[error("source '{0}' does not exist in the map view")]
    SourceNotFound(String),
    /// A source with the same id is already registered.
    #[error("source '{0}' already exists in the map view")]
    DuplicateSource(String),
    /// A layer with the same id is already registered.
    #[error("layer '{0}' already exists in the map view")]
    DuplicateLayer(String),
    /// Colour string could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),
    /// Paint or view property is outside of its allowed range.
    #[error("invalid value for '{property}': {value}")]
    OutOfRange {
        /// Name of the property.
        property: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Configuration value is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Requested resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// Failed to reach the remote server.
    #[error("network error: {0}")]
    Network(String),
    /// Local IO failure.
    #[error("io error: {0}")]
    Io(String),
    /// Data could not be decoded as GeoJSON.
    #[error("failed to decode geojson: {0}")]
    Decoding(String),
}

impl From<std::io::Error> for MapError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(value.to_string()),
            _ => Self::Io(value.to_string()),
        }
    }
}

impl From<geojson::Error> for MapError {
    fn from(value: geojson::Error) -> Self {
        Self::Decoding(value.to_string())
    }
}

impl From<reqwest::Error> for MapError {
    fn from(value: reqwest::Error) -> Self {
        if value.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            Self::NotFound(value.to_string())
        } else if value.is_decode() {
            Self::Decoding(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}
