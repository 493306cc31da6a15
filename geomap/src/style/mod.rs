//! Style types: colours, paint properties, layers and the base style reference.

mod color;
pub use color::Color;

mod layer;
pub use layer::{LayerPaint, LayerType, StyleLayer};

mod paint;
pub use paint::{FillPaint, LinePaint};

mod url;
pub use url::StyleUrl;
