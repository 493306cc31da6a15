//! Draws a [`geomap::MapView`] with [Galileo](https://docs.rs/galileo).
//!
//! The base style is drawn as a raster tile layer, every style layer of the view becomes a
//! Galileo feature layer on top of it.

use galileo::galileo_types::geo::impls::GeoPoint2d;
use galileo::galileo_types::geo::{Crs, NewGeoPoint};
use galileo::galileo_types::geometry_type::GeoSpace2d;
use galileo::galileo_types::impls::{ClosedContour, MultiPolygon, Polygon};
use galileo::layer::feature_layer::{Feature, FeatureLayer};
use galileo::layer::raster_tile_layer::{RasterTileLayer, RasterTileLayerBuilder};
use galileo::symbol::SimplePolygonSymbol;
use galileo::tile_schema::TileIndex;
use galileo::{Map, MapBuilder};
use geomap::{BoundaryFeature, LayerPaint, MapView, RenderableLayer, StyleUrl};

/// Directory tiles of the base layer are cached in.
pub const TILE_CACHE_DIR: &str = ".tile_cache";

/// Style zoom levels are defined for 512 px tiles, the base layer uses 256 px tiles.
const TILE_SIZE_ZOOM_OFFSET: u32 = 1;

/// Feature layer drawing boundary polygons.
pub type BoundaryLayer =
    FeatureLayer<GeoPoint2d, BoundaryShape, SimplePolygonSymbol, GeoSpace2d>;

/// Polygons of one boundary feature in Galileo geometry types.
pub struct BoundaryShape {
    geometry: MultiPolygon<GeoPoint2d>,
}

impl Feature for BoundaryShape {
    type Geom = MultiPolygon<GeoPoint2d>;

    fn geometry(&self) -> &Self::Geom {
        &self.geometry
    }
}

impl From<&BoundaryFeature> for BoundaryShape {
    fn from(feature: &BoundaryFeature) -> Self {
        let contour = |ring: &geomap::geo_types::LineString<f64>| {
            let mut points: Vec<GeoPoint2d> = ring
                .coords()
                .map(|c| GeoPoint2d::latlon(c.y, c.x))
                .collect();
            // GeoJSON rings repeat the first point at the end, closed contours don't.
            if points.len() > 1 && ring.is_closed() {
                points.pop();
            }
            ClosedContour { points }
        };

        let parts = feature
            .geometry()
            .iter()
            .map(|polygon| Polygon {
                outer_contour: contour(polygon.exterior()),
                inner_contours: polygon.interiors().iter().map(contour).collect(),
            })
            .collect();

        Self {
            geometry: MultiPolygon { parts },
        }
    }
}

/// Galileo z-level matching the zoom of the view.
pub fn z_level(zoom: f64) -> u32 {
    zoom.max(0.0).round() as u32 + TILE_SIZE_ZOOM_OFFSET
}

/// Converts a style colour into a Galileo colour.
pub fn to_galileo_color(color: geomap::Color) -> galileo::Color {
    galileo::Color::rgba(color.r(), color.g(), color.b(), color.a())
}

/// Symbol drawing polygons with the paint of a style layer.
pub fn polygon_symbol(paint: &LayerPaint) -> SimplePolygonSymbol {
    match paint {
        LayerPaint::Fill(fill) => {
            SimplePolygonSymbol::new(to_galileo_color(fill.effective_fill_color()))
                .with_stroke_color(to_galileo_color(fill.effective_outline_color()))
                .with_stroke_width(1.0)
        }
        LayerPaint::Line(line) => SimplePolygonSymbol::new(galileo::Color::rgba(0, 0, 0, 0))
            .with_stroke_color(to_galileo_color(line.effective_line_color()))
            .with_stroke_width(line.line_width()),
    }
}

/// Creates the feature layer for one style layer of the view.
pub fn boundary_layer(renderable: &RenderableLayer<'_>) -> BoundaryLayer {
    let shapes = renderable
        .features
        .iter()
        .map(BoundaryShape::from)
        .collect();

    FeatureLayer::new(shapes, polygon_symbol(renderable.layer.paint()), Crs::WGS84)
}

/// Creates the raster layer drawing the base style of the view.
///
/// Styles that do not provide raster tiles fall back to OpenStreetMap tiles.
pub fn base_layer(view: &MapView) -> anyhow::Result<RasterTileLayer> {
    let builder = match view.style() {
        StyleUrl::Hosted { .. } => {
            let style = view.style().clone();
            let token = view.access_token().clone();
            RasterTileLayerBuilder::new_rest(move |index: &TileIndex| {
                style
                    .raster_tile_url(&token, index.z, index.x, index.y)
                    .unwrap_or_default()
            })
        }
        StyleUrl::Http(url) => {
            log::warn!("Style {url} has no raster tiles, using OpenStreetMap");
            RasterTileLayerBuilder::new_osm()
        }
    };

    builder
        .with_file_cache_checked(TILE_CACHE_DIR)
        .build()
        .map_err(|err| anyhow::anyhow!("failed to create base layer: {err:?}"))
}

/// Builds the Galileo map for a view: the base layer plus one feature layer per style layer.
pub fn build_map(view: &MapView, base: RasterTileLayer) -> Map {
    let center = view.center();
    let mut map = MapBuilder::default()
        .with_latlon(center.lat(), center.lng())
        .with_z_level(z_level(view.zoom()))
        .with_layer(base)
        .build();

    for renderable in view.renderables() {
        log::debug!(
            "Adding layer '{}' with {} features",
            renderable.layer.id(),
            renderable.features.len()
        );
        map.layers_mut().push(boundary_layer(&renderable));
    }

    map
}
