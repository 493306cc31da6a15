//! Loading GeoJSON data of sources.

use std::path::{Component, Path, PathBuf};

use reqwest::{Client, Url};

use crate::error::MapError;
use crate::features::FeatureSet;

/// Loader for the data of GeoJSON sources.
#[async_trait::async_trait]
pub trait GeoJsonLoader: Send + Sync {
    /// Load and parse the document at the given location.
    async fn load(&self, location: &str) -> Result<FeatureSet, MapError>;
}

/// Resolved location of a GeoJSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    /// Remote document.
    Http(Url),
    /// Local file.
    File(PathBuf),
}

/// Loads documents over http(s) or from a local asset directory.
///
/// Locations that are not absolute URLs are resolved against the base URL if one is set, and
/// against the asset root directory otherwise. A leading `/` refers to the root of either.
pub struct WebGeoJsonLoader {
    client: Client,
    base_url: Option<Url>,
    asset_root: PathBuf,
}

impl WebGeoJsonLoader {
    /// Creates a loader resolving relative locations against `asset_root`.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            asset_root: asset_root.into(),
        }
    }

    /// Resolves relative locations against the given URL instead of the asset root.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, MapError> {
        let url = Url::parse(base_url)
            .map_err(|err| MapError::Config(format!("invalid base url '{base_url}': {err}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Uses the given HTTP client for remote documents.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Directory relative locations resolve into when no base URL is set.
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Resolves a source location.
    ///
    /// Local paths must stay inside the asset root, so `..` components are rejected.
    pub fn resolve(&self, location: &str) -> Result<ResolvedLocation, MapError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Url::parse(location)
                .map(ResolvedLocation::Http)
                .map_err(|err| MapError::Config(format!("invalid url '{location}': {err}")));
        }

        if let Some(base) = &self.base_url {
            return base
                .join(location)
                .map(ResolvedLocation::Http)
                .map_err(|err| MapError::Config(format!("invalid url '{location}': {err}")));
        }

        let relative = location.trim_start_matches('/');
        if relative.is_empty() {
            return Err(MapError::Config(format!("invalid location '{location}'")));
        }
        if Path::new(relative)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(MapError::Config(format!(
                "location '{location}' leaves the asset root"
            )));
        }

        Ok(ResolvedLocation::File(self.asset_root.join(relative)))
    }

    async fn load_raw(&self, location: &ResolvedLocation) -> Result<String, MapError> {
        match location {
            ResolvedLocation::Http(url) => {
                log::info!("Downloading GeoJSON from {url}");
                let response = self.client.get(url.clone()).send().await?;
                let text = response.error_for_status()?.text().await?;
                log::info!("Downloaded {} bytes from {url}", text.len());
                Ok(text)
            }
            ResolvedLocation::File(path) => {
                log::info!("Reading GeoJSON from {}", path.display());
                let text = tokio::fs::read_to_string(path).await?;
                Ok(text)
            }
        }
    }
}

#[async_trait::async_trait]
impl GeoJsonLoader for WebGeoJsonLoader {
    async fn load(&self, location: &str) -> Result<FeatureSet, MapError> {
        let resolved = self.resolve(location)?;
        let text = self.load_raw(&resolved).await?;
        let features = FeatureSet::from_json_str(&text)?;

        log::debug!("Parsed {} features from {location}", features.len());

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("geomap-loader-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("Files")).expect("temp dir");
        dir
    }

    #[test]
    fn resolves_root_relative_path_into_asset_root() {
        let loader = WebGeoJsonLoader::new("/srv/static");
        assert_eq!(
            loader.resolve("/Files/districts.geojson").expect("valid location"),
            ResolvedLocation::File(PathBuf::from("/srv/static/Files/districts.geojson"))
        );
        assert!(loader.resolve("/").is_err());
    }

    #[test]
    fn parent_components_are_rejected() {
        let loader = WebGeoJsonLoader::new("/srv/static");
        for location in ["/../../etc/passwd", "Files/../../secret.geojson", ".."] {
            assert!(
                matches!(loader.resolve(location), Err(MapError::Config(_))),
                "{location}"
            );
        }
        assert_eq!(
            loader.resolve("/Files/./a.geojson").expect("valid location"),
            ResolvedLocation::File(PathBuf::from("/srv/static/Files/./a.geojson"))
        );
    }

    #[test]
    fn resolves_against_base_url() {
        let loader = WebGeoJsonLoader::new(".")
            .with_base_url("https://example.com/app/")
            .expect("valid base url");
        assert_eq!(
            loader.resolve("/Files/districts.geojson").expect("valid location"),
            ResolvedLocation::Http(
                Url::parse("https://example.com/Files/districts.geojson").expect("valid url")
            )
        );
        assert_eq!(
            loader.resolve("data/a.geojson").expect("valid location"),
            ResolvedLocation::Http(
                Url::parse("https://example.com/app/data/a.geojson").expect("valid url")
            )
        );
    }

    #[test]
    fn absolute_urls_are_kept() {
        let loader = WebGeoJsonLoader::new(".");
        assert_eq!(
            loader.resolve("https://example.com/a.geojson").expect("valid location"),
            ResolvedLocation::Http(Url::parse("https://example.com/a.geojson").expect("valid url"))
        );
        assert!(WebGeoJsonLoader::new(".").with_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn loads_file_from_asset_root() {
        let dir = temp_dir("ok");
        std::fs::write(
            dir.join("Files/one.geojson"),
            r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}}"#,
        )
        .expect("write fixture");

        let loader = WebGeoJsonLoader::new(&dir);
        let features = loader.load("/Files/one.geojson").await.expect("loaded");
        assert_eq!(features.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = temp_dir("missing");
        let loader = WebGeoJsonLoader::new(&dir);
        let result = loader.load("/Files/absent.geojson").await;
        assert!(matches!(result, Err(MapError::NotFound(_))), "{result:?}");
    }

    #[tokio::test]
    async fn malformed_file_is_decoding_error() {
        let dir = temp_dir("malformed");
        std::fs::write(dir.join("Files/bad.geojson"), "{ nope").expect("write fixture");
        let loader = WebGeoJsonLoader::new(&dir);
        let result = loader.load("/Files/bad.geojson").await;
        assert!(matches!(result, Err(MapError::Decoding(_))), "{result:?}");
    }

    /// Serves a single request with the given raw HTTP response and returns the server url.
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = stream.shutdown().await;
        });

        format!("http://{addr}")
    }

    fn http_loader() -> WebGeoJsonLoader {
        let client = Client::builder().no_proxy().build().expect("http client");
        WebGeoJsonLoader::new(".").with_client(client)
    }

    #[tokio::test]
    async fn http_404_is_not_found() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let result = http_loader().load(&format!("{url}/Files/absent.geojson")).await;
        assert!(matches!(result, Err(MapError::NotFound(_))), "{result:?}");
    }

    #[tokio::test]
    async fn http_document_is_parsed() {
        const RESPONSE: &str = concat!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/geo+json\r\nContent-Length: 42\r\nConnection: close\r\n\r\n",
            r#"{"type":"FeatureCollection","features":[]}"#
        );
        let url = serve_once(RESPONSE).await;
        let result = http_loader().load(&format!("{url}/a.geojson")).await;
        assert!(matches!(result, Ok(ref features) if features.is_empty()), "{result:?}");
    }

    #[tokio::test]
    async fn closed_port_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let result = http_loader().load(&format!("http://{addr}/a.geojson")).await;
        assert!(matches!(result, Err(MapError::Network(_))), "{result:?}");
    }
}
