//! Map view bootstrapper with GeoJSON boundary overlays.
//!
//! A [`MapView`] is created with fixed initial parameters ([`MapOptions`]) and stays in the
//! loading state until the rendering surface calls [`MapView::signal_ready`]. Load callbacks
//! then register [`GeoJsonSource`]s and [`StyleLayer`]s that draw them. Source data is fetched
//! by a [`GeoJsonLoader`]; a source that fails to load keeps its layers registered, they simply
//! draw nothing.
//!
//! The [`bootstrap`] module wires all of this for the Portugal districts map:
//!
//! ```no_run
//! # async fn run() -> Result<(), geomap::MapError> {
//! let mut view = geomap::bootstrap::initialize()?;
//! view.signal_ready()?;
//! view.load_sources(&geomap::WebGeoJsonLoader::new("static")).await;
//! for renderable in view.renderables() {
//!     println!("{}: {} features", renderable.layer.id(), renderable.features.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;

mod error;
pub use error::MapError;

mod features;
pub use features::{BoundaryFeature, FeatureSet};

mod lnglat;
pub use lnglat::LngLat;

pub mod loader;
pub use loader::{GeoJsonLoader, WebGeoJsonLoader};

mod map;
pub use map::{LoadCallback, LoadState, MapView, RenderableLayer};

pub mod options;
pub use options::{AccessToken, MapOptions, MapOptionsBuilder};

pub mod source;
pub use source::{GeoJsonData, GeoJsonSource, SourceStatus};

pub mod style;
pub use style::{Color, FillPaint, LayerPaint, LayerType, LinePaint, StyleLayer, StyleUrl};

pub use geo_types;
pub use geojson;
