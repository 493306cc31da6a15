use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::MapError;
use crate::options::AccessToken;

const MAPBOX_SCHEME: &str = "mapbox://";
const STYLES_API: &str = "https://api.mapbox.com/styles/v1";

/// Reference to the base style of a map view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleUrl {
    /// Style hosted by the styles API: `mapbox://styles/{owner}/{style_id}`.
    Hosted {
        /// Account that owns the style.
        owner: String,
        /// Style identifier.
        style_id: String,
    },
    /// Style document at a plain http(s) URL.
    Http(String),
}

impl StyleUrl {
    /// Parses a style reference.
    pub fn parse(value: &str) -> Result<Self, MapError> {
        if let Some(path) = value.strip_prefix(MAPBOX_SCHEME) {
            let mut parts = path.split('/');
            return match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some("styles"), Some(owner), Some(style_id), None)
                    if !owner.is_empty() && !style_id.is_empty() =>
                {
                    Ok(Self::Hosted {
                        owner: owner.to_string(),
                        style_id: style_id.to_string(),
                    })
                }
                _ => Err(MapError::Config(format!("unsupported style url '{value}'"))),
            };
        }

        if value.starts_with("http://") || value.starts_with("https://") {
            return Ok(Self::Http(value.to_string()));
        }

        Err(MapError::Config(format!("unsupported style url '{value}'")))
    }

    /// URL of the style document, with the access token attached for hosted styles.
    pub fn style_document_url(&self, token: &AccessToken) -> String {
        match self {
            Self::Hosted { owner, style_id } => format!(
                "{STYLES_API}/{owner}/{style_id}?access_token={}",
                token.as_str()
            ),
            Self::Http(url) => url.clone(),
        }
    }

    /// Raster tile URL for the given tile index. Only hosted styles expose raster tiles.
    ///
    /// Tiles are requested with 256 pixel size.
    pub fn raster_tile_url(&self, token: &AccessToken, z: u32, x: i32, y: i32) -> Option<String> {
        match self {
            Self::Hosted { owner, style_id } => Some(format!(
                "{STYLES_API}/{owner}/{style_id}/tiles/256/{z}/{x}/{y}?access_token={}",
                token.as_str()
            )),
            Self::Http(_) => None,
        }
    }
}

impl FromStr for StyleUrl {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for StyleUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hosted { owner, style_id } => {
                write!(f, "{MAPBOX_SCHEME}styles/{owner}/{style_id}")
            }
            Self::Http(url) => f.write_str(url),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StyleUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StyleUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::new("pk.test")
    }

    #[test]
    fn parses_hosted_style() {
        let url: StyleUrl = "mapbox://styles/mapbox/light-v10".parse().expect("valid url");
        assert_eq!(
            url,
            StyleUrl::Hosted {
                owner: "mapbox".into(),
                style_id: "light-v10".into()
            }
        );
        assert_eq!(url.to_string(), "mapbox://styles/mapbox/light-v10");
    }

    #[test]
    fn normalizes_hosted_style_document() {
        let url = StyleUrl::parse("mapbox://styles/mapbox/light-v10").expect("valid url");
        assert_eq!(
            url.style_document_url(&token()),
            "https://api.mapbox.com/styles/v1/mapbox/light-v10?access_token=pk.test"
        );
        assert_eq!(
            url.raster_tile_url(&token(), 6, 30, 24).as_deref(),
            Some("https://api.mapbox.com/styles/v1/mapbox/light-v10/tiles/256/6/30/24?access_token=pk.test")
        );
    }

    #[test]
    fn http_style_is_kept_as_is() {
        let url = StyleUrl::parse("https://example.com/style.json").expect("valid url");
        assert_eq!(url.style_document_url(&token()), "https://example.com/style.json");
        assert_eq!(url.raster_tile_url(&token(), 0, 0, 0), None);
    }

    #[test]
    fn rejects_unknown_references() {
        assert!(StyleUrl::parse("mapbox://tilesets/foo").is_err());
        assert!(StyleUrl::parse("mapbox://styles/mapbox").is_err());
        assert!(StyleUrl::parse("mapbox://styles/mapbox/light/extra").is_err());
        assert!(StyleUrl::parse("light-v10").is_err());
    }
}
