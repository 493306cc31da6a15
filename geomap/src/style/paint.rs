use crate::error::MapError;
use crate::style::Color;

fn check_opacity(property: &'static str, value: f64) -> Result<f64, MapError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MapError::OutOfRange {
            property,
            value,
        })
    }
}

/// Paint properties of a `fill` layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawFillPaint", into = "RawFillPaint")
)]
pub struct FillPaint {
    fill_color: Color,
    fill_opacity: f64,
    fill_outline_color: Option<Color>,
}

impl FillPaint {
    /// Creates fill paint with the given colour and opacity.
    ///
    /// Opacity must be in `[0, 1]`.
    pub fn new(fill_color: Color, fill_opacity: f64) -> Result<Self, MapError> {
        Ok(Self {
            fill_color,
            fill_opacity: check_opacity("fill-opacity", fill_opacity)?,
            fill_outline_color: None,
        })
    }

    /// Sets the colour of the polygon outline.
    pub fn with_outline_color(mut self, color: Color) -> Self {
        self.fill_outline_color = Some(color);
        self
    }

    /// Colour of the fill.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Opacity of the fill.
    pub fn fill_opacity(&self) -> f64 {
        self.fill_opacity
    }

    /// Outline colour. When not set, the outline uses the fill colour.
    pub fn fill_outline_color(&self) -> Color {
        self.fill_outline_color.unwrap_or(self.fill_color)
    }

    /// Fill colour with the fill opacity applied to its alpha channel.
    pub fn effective_fill_color(&self) -> Color {
        self.fill_color.with_opacity(self.fill_opacity)
    }

    /// Outline colour with the fill opacity applied to its alpha channel.
    pub fn effective_outline_color(&self) -> Color {
        self.fill_outline_color().with_opacity(self.fill_opacity)
    }
}

impl Default for FillPaint {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            fill_opacity: 1.0,
            fill_outline_color: None,
        }
    }
}

/// Paint properties of a `line` layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawLinePaint", into = "RawLinePaint")
)]
pub struct LinePaint {
    line_color: Color,
    line_width: f64,
    line_opacity: f64,
}

impl LinePaint {
    /// Creates line paint. Width must be positive and opacity in `[0, 1]`.
    pub fn new(line_color: Color, line_width: f64, line_opacity: f64) -> Result<Self, MapError> {
        if line_width.is_nan() || line_width <= 0.0 {
            return Err(MapError::OutOfRange {
                property: "line-width",
                value: line_width,
            });
        }

        Ok(Self {
            line_color,
            line_width,
            line_opacity: check_opacity("line-opacity", line_opacity)?,
        })
    }

    /// Colour of the line.
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Width of the line in pixels.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Opacity of the line.
    pub fn line_opacity(&self) -> f64 {
        self.line_opacity
    }

    /// Line colour with the line opacity applied to its alpha channel.
    pub fn effective_line_color(&self) -> Color {
        self.line_color.with_opacity(self.line_opacity)
    }
}

impl Default for LinePaint {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            line_width: 1.0,
            line_opacity: 1.0,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawFillPaint {
    #[serde(default = "default_color")]
    fill_color: Color,
    #[serde(default = "default_opacity")]
    fill_opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill_outline_color: Option<Color>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawLinePaint {
    #[serde(default = "default_color")]
    line_color: Color,
    #[serde(default = "default_width")]
    line_width: f64,
    #[serde(default = "default_opacity")]
    line_opacity: f64,
}

#[cfg(feature = "serde")]
fn default_color() -> Color {
    Color::BLACK
}

#[cfg(feature = "serde")]
fn default_opacity() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
fn default_width() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
impl TryFrom<RawFillPaint> for FillPaint {
    type Error = MapError;

    fn try_from(raw: RawFillPaint) -> Result<Self, Self::Error> {
        let paint = FillPaint::new(raw.fill_color, raw.fill_opacity)?;
        Ok(match raw.fill_outline_color {
            Some(color) => paint.with_outline_color(color),
            None => paint,
        })
    }
}

#[cfg(feature = "serde")]
impl From<FillPaint> for RawFillPaint {
    fn from(paint: FillPaint) -> Self {
        Self {
            fill_color: paint.fill_color,
            fill_opacity: paint.fill_opacity,
            fill_outline_color: paint.fill_outline_color,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawLinePaint> for LinePaint {
    type Error = MapError;

    fn try_from(raw: RawLinePaint) -> Result<Self, Self::Error> {
        LinePaint::new(raw.line_color, raw.line_width, raw.line_opacity)
    }
}

#[cfg(feature = "serde")]
impl From<LinePaint> for RawLinePaint {
    fn from(paint: LinePaint) -> Self {
        Self {
            line_color: paint.line_color,
            line_width: paint.line_width,
            line_opacity: paint.line_opacity,
        }
    }
}
