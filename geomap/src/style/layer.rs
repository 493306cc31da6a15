use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use crate::error::MapError;
use crate::style::{FillPaint, LinePaint};

/// Rendering method of a style layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LayerType {
    /// Filled polygons.
    Fill,
    /// Stroked lines and polygon outlines.
    Line,
}

impl Display for LayerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LayerType::Fill => "fill",
            LayerType::Line => "line",
        })
    }
}

/// Paint properties of a layer, one variant per [`LayerType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerPaint {
    /// Paint of a `fill` layer.
    Fill(FillPaint),
    /// Paint of a `line` layer.
    Line(LinePaint),
}

impl LayerPaint {
    /// Rendering method this paint belongs to.
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerPaint::Fill(_) => LayerType::Fill,
            LayerPaint::Line(_) => LayerType::Line,
        }
    }
}

/// Named rendering rule that draws the data of one source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawStyleLayer", into = "RawStyleLayer")
)]
pub struct StyleLayer {
    id: String,
    source: String,
    paint: LayerPaint,
}

impl StyleLayer {
    /// Creates a `fill` layer drawing the source with the given id.
    pub fn fill(id: impl Into<String>, source: impl Into<String>, paint: FillPaint) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            paint: LayerPaint::Fill(paint),
        }
    }

    /// Creates a `line` layer drawing the source with the given id.
    pub fn line(id: impl Into<String>, source: impl Into<String>, paint: LinePaint) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            paint: LayerPaint::Line(paint),
        }
    }

    /// Layer id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the source the layer draws.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Rendering method.
    pub fn layer_type(&self) -> LayerType {
        self.paint.layer_type()
    }

    /// Paint properties.
    pub fn paint(&self) -> &LayerPaint {
        &self.paint
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawStyleLayer {
    id: String,
    #[serde(rename = "type")]
    layer_type: LayerType,
    source: String,
    #[serde(default)]
    paint: serde_json::Value,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStyleLayer> for StyleLayer {
    type Error = MapError;

    fn try_from(raw: RawStyleLayer) -> Result<Self, Self::Error> {
        let paint = if raw.paint.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            raw.paint
        };
        let invalid = |err: serde_json::Error| MapError::Config(format!("layer '{}': {err}", raw.id));

        let paint = match raw.layer_type {
            LayerType::Fill => LayerPaint::Fill(serde_json::from_value(paint).map_err(invalid)?),
            LayerType::Line => LayerPaint::Line(serde_json::from_value(paint).map_err(invalid)?),
        };

        Ok(Self {
            id: raw.id,
            source: raw.source,
            paint,
        })
    }
}

#[cfg(feature = "serde")]
impl From<StyleLayer> for RawStyleLayer {
    fn from(layer: StyleLayer) -> Self {
        let layer_type = layer.layer_type();
        let paint = match layer.paint {
            LayerPaint::Fill(paint) => serde_json::to_value(paint),
            LayerPaint::Line(paint) => serde_json::to_value(paint),
        };

        Self {
            id: layer.id,
            layer_type,
            source: layer.source,
            paint: paint.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn fill_layer_reports_type_and_source() {
        let layer = StyleLayer::fill("districts-layer", "districts", FillPaint::default());
        assert_eq!(layer.id(), "districts-layer");
        assert_eq!(layer.source(), "districts");
        assert_eq!(layer.layer_type(), LayerType::Fill);
        assert_eq!(layer.layer_type().to_string(), "fill");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_style_document_layer() {
        let layer: StyleLayer = serde_json::from_str(
            r##"{
                "id": "portugal-states-layer",
                "type": "fill",
                "source": "portugal-states",
                "paint": {"fill-color": "#088", "fill-opacity": 0.8}
            }"##,
        )
        .expect("valid layer");

        let expected = StyleLayer::fill(
            "portugal-states-layer",
            "portugal-states",
            FillPaint::new(Color::rgba(0, 0x88, 0x88, 255), 0.8).expect("valid paint"),
        );
        assert_eq!(layer, expected);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn paint_is_optional() {
        let layer: StyleLayer =
            serde_json::from_str(r#"{"id": "outline", "type": "line", "source": "s"}"#)
                .expect("valid layer");
        assert_eq!(layer.paint(), &LayerPaint::Line(LinePaint::default()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_invalid_paint_and_unknown_type() {
        let err = serde_json::from_str::<StyleLayer>(
            r#"{"id": "l", "type": "fill", "source": "s", "paint": {"fill-opacity": 2}}"#,
        );
        assert!(err.is_err());

        let err = serde_json::from_str::<StyleLayer>(
            r#"{"id": "l", "type": "symbol", "source": "s"}"#,
        );
        assert!(err.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_back_to_style_document_shape() {
        let layer = StyleLayer::fill(
            "l",
            "s",
            FillPaint::new(Color::rgba(0, 0x88, 0x88, 255), 0.5).expect("valid paint"),
        );
        assert_eq!(
            serde_json::to_value(layer).expect("serializable"),
            serde_json::json!({
                "id": "l",
                "type": "fill",
                "source": "s",
                "paint": {"fill-color": "#008888", "fill-opacity": 0.5}
            })
        );
    }
}
