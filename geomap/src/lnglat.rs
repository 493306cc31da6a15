use crate::error::MapError;

/// Geographic coordinate in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f64; 2]", into = "[f64; 2]"))]
pub struct LngLat {
    lng: f64,
    lat: f64,
}

impl LngLat {
    /// Creates a coordinate, checking that longitude is in `[-180, 180]` and latitude in `[-90, 90]`.
    pub fn new(lng: f64, lat: f64) -> Result<Self, MapError> {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(MapError::OutOfRange {
                property: "longitude",
                value: lng,
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MapError::OutOfRange {
                property: "latitude",
                value: lat,
            });
        }

        Ok(Self { lng, lat })
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl TryFrom<[f64; 2]> for LngLat {
    type Error = MapError;

    fn try_from([lng, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lng, lat)
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}
