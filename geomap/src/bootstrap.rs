//! Bootstrapper of the Portugal districts map.
//!
//! Creates a map view with fixed parameters and, once the rendering surface is ready, registers
//! the district boundaries source and a fill layer drawing it.

use crate::error::MapError;
use crate::map::MapView;
use crate::options::MapOptions;
use crate::source::GeoJsonSource;
use crate::style::{Color, FillPaint, StyleLayer};

/// Access token for the style and tile services. Replace with your own token.
pub const ACCESS_TOKEN: &str = "pk.replace-with-your-access-token";
/// Container the map is drawn into.
pub const CONTAINER: &str = "map";
/// Base style of the map.
pub const STYLE: &str = "mapbox://styles/mapbox/light-v10";
/// Initial center of the map: longitude, latitude.
pub const CENTER: (f64, f64) = (-8.6100, 41.1496);
/// Initial zoom level.
pub const ZOOM: f64 = 6.0;

/// Id of the district boundaries source.
pub const SOURCE_ID: &str = "portugal-states";
/// Id of the district fill layer.
pub const LAYER_ID: &str = "portugal-states-layer";
/// Location of the district boundaries GeoJSON.
pub const DATA_LOCATION: &str = "/Files/georef-portugal-distrito.geojson";
/// Fill colour of the districts.
pub const FILL_COLOR: &str = "#088";
/// Fill opacity of the districts.
pub const FILL_OPACITY: f64 = 0.8;

/// One GeoJSON source and one fill layer drawing it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryOverlay {
    source_id: String,
    layer_id: String,
    data_location: String,
    paint: FillPaint,
}

impl BoundaryOverlay {
    /// Creates an overlay definition.
    pub fn new(
        source_id: impl Into<String>,
        layer_id: impl Into<String>,
        data_location: impl Into<String>,
        paint: FillPaint,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            layer_id: layer_id.into(),
            data_location: data_location.into(),
            paint,
        }
    }

    /// Portugal district boundaries filled with `#088` at 0.8 opacity.
    pub fn portugal_districts() -> Result<Self, MapError> {
        let paint = FillPaint::new(Color::try_from_hex(FILL_COLOR)?, FILL_OPACITY)?;
        Ok(Self::new(SOURCE_ID, LAYER_ID, DATA_LOCATION, paint))
    }

    /// Id of the source.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Id of the layer.
    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// Location of the GeoJSON data.
    pub fn data_location(&self) -> &str {
        &self.data_location
    }

    /// Fill paint of the layer.
    pub fn paint(&self) -> FillPaint {
        self.paint
    }

    /// Adds the source, then the layer referencing it.
    pub fn register(&self, view: &mut MapView) -> Result<(), MapError> {
        view.add_source(GeoJsonSource::from_location(
            &self.source_id,
            &self.data_location,
        ))?;
        view.add_layer(StyleLayer::fill(&self.layer_id, &self.source_id, self.paint))
    }
}

/// Creates a map view and defers overlay registration until the view is ready.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    options: MapOptions,
    overlay: BoundaryOverlay,
}

impl Bootstrapper {
    /// Creates a bootstrapper for arbitrary options and overlay.
    pub fn new(options: MapOptions, overlay: BoundaryOverlay) -> Self {
        Self { options, overlay }
    }

    /// Bootstrapper for the Portugal districts map.
    pub fn portugal() -> Result<Self, MapError> {
        let options = MapOptions::builder()
            .with_access_token(ACCESS_TOKEN)
            .with_container(CONTAINER)
            .with_style(STYLE)
            .with_center(CENTER.0, CENTER.1)
            .with_zoom(ZOOM)
            .build()?;

        Ok(Self::new(options, BoundaryOverlay::portugal_districts()?))
    }

    /// Options the view will be created with.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Overlay registered once the view is ready.
    pub fn overlay(&self) -> &BoundaryOverlay {
        &self.overlay
    }

    /// Creates the view. The overlay is registered from the view's load callback.
    pub fn initialize(self) -> Result<MapView, MapError> {
        let Self { options, overlay } = self;
        let mut view = MapView::new(options);
        view.on_load(move |view| overlay.register(view))?;

        Ok(view)
    }
}

/// Creates the Portugal districts map view.
pub fn initialize() -> Result<MapView, MapError> {
    Bootstrapper::portugal()?.initialize()
}
