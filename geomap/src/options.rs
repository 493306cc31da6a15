//! Initial parameters of a map view.

use std::fmt::{Debug, Formatter};

use crate::error::MapError;
use crate::lnglat::LngLat;
use crate::style::StyleUrl;

/// Lowest zoom level a view can start at.
pub const MIN_ZOOM: f64 = 0.0;
/// Highest zoom level a view can start at.
pub const MAX_ZOOM: f64 = 24.0;

/// Credential passed to the tile and style services.
///
/// The value is not validated. It is hidden from `Debug` output.
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Parameters a [`MapView`](crate::MapView) is constructed with.
///
/// Use [`MapOptions::builder`] to create one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MapOptions {
    container: String,
    style: StyleUrl,
    center: LngLat,
    zoom: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    access_token: AccessToken,
}

impl MapOptions {
    /// Starts building options.
    pub fn builder() -> MapOptionsBuilder {
        MapOptionsBuilder::default()
    }

    /// Identifier of the element or window the map is drawn into.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Base style.
    pub fn style(&self) -> &StyleUrl {
        &self.style
    }

    /// Initial center of the view.
    pub fn center(&self) -> LngLat {
        self.center
    }

    /// Initial zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Credential for the style and tile services.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

/// Builder for [`MapOptions`].
#[derive(Debug, Clone)]
pub struct MapOptionsBuilder {
    container: String,
    style: Option<String>,
    center: (f64, f64),
    zoom: f64,
    access_token: AccessToken,
}

impl Default for MapOptionsBuilder {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            style: None,
            center: (0.0, 0.0),
            zoom: MIN_ZOOM,
            access_token: AccessToken::default(),
        }
    }
}

impl MapOptionsBuilder {
    /// Sets the container identifier. Defaults to `"map"`.
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Sets the base style reference, e.g. `mapbox://styles/mapbox/light-v10`.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets the initial center, longitude first.
    pub fn with_center(mut self, lng: f64, lat: f64) -> Self {
        self.center = (lng, lat);
        self
    }

    /// Sets the initial zoom level.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets the access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = AccessToken::new(token);
        self
    }

    /// Validates the parameters and creates the options.
    pub fn build(self) -> Result<MapOptions, MapError> {
        let style = self
            .style
            .ok_or_else(|| MapError::Config("map style is not set".to_string()))?;
        if self.container.is_empty() {
            return Err(MapError::Config("container id is empty".to_string()));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(MapError::OutOfRange {
                property: "zoom",
                value: self.zoom,
            });
        }

        Ok(MapOptions {
            container: self.container,
            style: StyleUrl::parse(&style)?,
            center: LngLat::new(self.center.0, self.center.1)?,
            zoom: self.zoom,
            access_token: self.access_token,
        })
    }
}
