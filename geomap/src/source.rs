//! Data sources that style layers draw.

use std::sync::Arc;

use geojson::GeoJson;

use crate::error::MapError;
use crate::features::FeatureSet;

/// Where the GeoJSON data of a source comes from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum GeoJsonData {
    /// URL or path of a GeoJSON document. Root-relative paths such as `/Files/data.geojson` are
    /// resolved by the loader.
    Location(String),
    /// GeoJSON document embedded in the source definition.
    Inline(GeoJson),
}

/// Named GeoJSON dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonSource {
    id: String,
    data: GeoJsonData,
}

impl GeoJsonSource {
    /// Type tag of the source in style documents.
    pub const TYPE: &'static str = "geojson";

    /// Creates a source that loads data from the given URL or path.
    pub fn from_location(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: GeoJsonData::Location(location.into()),
        }
    }

    /// Creates a source with embedded data.
    pub fn inline(id: impl Into<String>, data: GeoJson) -> Self {
        Self {
            id: id.into(),
            data: GeoJsonData::Inline(data),
        }
    }

    /// Parses a source definition of the form `{"type": "geojson", "data": ...}`.
    #[cfg(feature = "serde")]
    pub fn from_definition(id: impl Into<String>, definition: &str) -> Result<Self, MapError> {
        #[derive(serde::Deserialize)]
        struct Definition {
            #[serde(rename = "type")]
            source_type: String,
            data: GeoJsonData,
        }

        let id = id.into();
        let definition: Definition = serde_json::from_str(definition)
            .map_err(|err| MapError::Config(format!("source '{id}': {err}")))?;
        if definition.source_type != Self::TYPE {
            return Err(MapError::Config(format!(
                "source '{id}': unsupported source type '{}'",
                definition.source_type
            )));
        }

        Ok(Self {
            id,
            data: definition.data,
        })
    }

    /// Source id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Type tag, always `"geojson"`.
    pub fn source_type(&self) -> &'static str {
        Self::TYPE
    }

    /// Data reference.
    pub fn data(&self) -> &GeoJsonData {
        &self.data
    }
}

/// Load status of the data of a source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    /// Data has not been requested yet.
    Pending,
    /// Data was loaded and parsed.
    Loaded(Arc<FeatureSet>),
    /// Data could not be loaded. Layers of the source draw nothing.
    Failed(MapError),
}

impl SourceStatus {
    /// Features of the source, if loaded.
    pub fn features(&self) -> Option<&Arc<FeatureSet>> {
        match self {
            SourceStatus::Loaded(features) => Some(features),
            _ => None,
        }
    }
}
