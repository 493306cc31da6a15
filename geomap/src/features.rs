//! Boundary features parsed from GeoJSON.

use geo_types::{Coord, Geometry, MultiPolygon, Polygon, Rect};
use geojson::{GeoJson, JsonObject, JsonValue};
use log::warn;

use crate::error::MapError;

/// Areal feature: one or more polygons with their properties.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    id: Option<String>,
    geometry: MultiPolygon<f64>,
    properties: JsonObject,
}

impl BoundaryFeature {
    /// Creates a feature.
    pub fn new(id: Option<String>, geometry: MultiPolygon<f64>, properties: JsonObject) -> Self {
        Self {
            id,
            geometry,
            properties,
        }
    }

    /// Feature id, if the data has one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Polygons of the feature in WGS84 degrees.
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// All properties.
    pub fn properties(&self) -> &JsonObject {
        &self.properties
    }

    /// Property by name.
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }
}

/// Features of one source with their combined bounding box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    features: Vec<BoundaryFeature>,
    bbox: Option<Rect<f64>>,
}

impl FeatureSet {
    /// Creates a set from the features, computing the bounding box.
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        let bbox = bounding_rect(&features);
        Self { features, bbox }
    }

    /// Parses GeoJSON text.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let geojson: GeoJson = json.parse()?;
        Self::from_geojson(geojson)
    }

    /// Collects areal features from a FeatureCollection, a single Feature or a bare Geometry.
    ///
    /// Features without geometry and features with only point or line geometries are skipped.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self, MapError> {
        let features = match geojson {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(geometry) => vec![geojson::Feature {
                geometry: Some(geometry),
                ..Default::default()
            }],
        };

        let mut result = Vec::with_capacity(features.len());
        for (index, feature) in features.into_iter().enumerate() {
            let Some(geometry) = feature.geometry else {
                warn!("Feature #{index} has no geometry, skipping");
                continue;
            };

            let geometry = Geometry::<f64>::try_from(geometry)?;
            let mut polygons = vec![];
            collect_polygons(geometry, &mut polygons);
            if polygons.is_empty() {
                warn!("Feature #{index} has no polygon geometry, skipping");
                continue;
            }

            let id = feature.id.map(|id| match id {
                geojson::feature::Id::String(v) => v,
                geojson::feature::Id::Number(v) => v.to_string(),
            });

            result.push(BoundaryFeature::new(
                id,
                MultiPolygon::new(polygons),
                feature.properties.unwrap_or_default(),
            ));
        }

        Ok(Self::new(result))
    }

    /// Features of the set.
    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the set has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Bounding box of all feature outer rings, `None` for an empty set.
    pub fn bbox(&self) -> Option<Rect<f64>> {
        self.bbox
    }
}

fn collect_polygons(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi.0),
        Geometry::Rect(rect) => out.push(rect.to_polygon()),
        Geometry::Triangle(triangle) => out.push(triangle.to_polygon()),
        Geometry::GeometryCollection(collection) => {
            for geometry in collection {
                collect_polygons(geometry, out);
            }
        }
        _ => {}
    }
}

fn bounding_rect(features: &[BoundaryFeature]) -> Option<Rect<f64>> {
    let mut coords = features
        .iter()
        .flat_map(|f| f.geometry.iter())
        .flat_map(|polygon| polygon.exterior().coords());

    let first = *coords.next()?;
    let (min, max) = coords.fold((first, first), |(min, max), c| {
        (
            Coord {
                x: min.x.min(c.x),
                y: min.y.min(c.y),
            },
            Coord {
                x: max.x.max(c.x),
                y: max.y.max(c.y),
            },
        )
    });

    Some(Rect::new(min, max))
}
