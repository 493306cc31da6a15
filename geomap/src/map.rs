//! Map view: initial view parameters, load state, registered sources and layers.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::error::MapError;
use crate::features::{BoundaryFeature, FeatureSet};
use crate::lnglat::LngLat;
use crate::loader::GeoJsonLoader;
use crate::options::{AccessToken, MapOptions};
use crate::source::{GeoJsonData, GeoJsonSource, SourceStatus};
use crate::style::{StyleLayer, StyleUrl};

/// Callback run once the rendering surface is ready.
pub type LoadCallback = Box<dyn FnOnce(&mut MapView) -> Result<(), MapError> + Send + 'static>;

/// Load state of a map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Rendering surface is still being set up. Sources and layers cannot be added yet.
    Loading,
    /// Surface is ready. Sources and layers can be added.
    Ready,
}

/// Layer together with the features it draws.
#[derive(Debug, Clone, Copy)]
pub struct RenderableLayer<'a> {
    /// Style layer.
    pub layer: &'a StyleLayer,
    /// Features of the layer's source. Empty if the source data is not loaded.
    pub features: &'a [BoundaryFeature],
}

struct RegisteredSource {
    source: GeoJsonSource,
    status: SourceStatus,
}

/// Map view with fixed initial parameters.
///
/// The view starts in [`LoadState::Loading`]. The rendering surface calls
/// [`MapView::signal_ready`] once it is set up, which runs the callbacks registered with
/// [`MapView::on_load`]. Only after that can sources and layers be added.
pub struct MapView {
    options: MapOptions,
    state: LoadState,
    on_load: Vec<LoadCallback>,
    sources: Vec<RegisteredSource>,
    layers: Vec<StyleLayer>,
}

impl Debug for MapView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("pending_callbacks", &self.on_load.len())
            .field(
                "sources",
                &self.sources.iter().map(|s| s.source.id()).collect::<Vec<_>>(),
            )
            .field(
                "layers",
                &self.layers.iter().map(|l| l.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl MapView {
    /// Creates a view in the loading state.
    pub fn new(options: MapOptions) -> Self {
        debug!(
            "Creating map view in '{}' with style {} at {:?}, zoom {}",
            options.container(),
            options.style(),
            options.center(),
            options.zoom()
        );

        Self {
            options,
            state: LoadState::Loading,
            on_load: vec![],
            sources: vec![],
            layers: vec![],
        }
    }

    /// Options the view was created with.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Container identifier.
    pub fn container(&self) -> &str {
        self.options.container()
    }

    /// Base style.
    pub fn style(&self) -> &StyleUrl {
        self.options.style()
    }

    /// Center of the view.
    pub fn center(&self) -> LngLat {
        self.options.center()
    }

    /// Zoom level of the view.
    pub fn zoom(&self) -> f64 {
        self.options.zoom()
    }

    /// Access token of the view.
    pub fn access_token(&self) -> &AccessToken {
        self.options.access_token()
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns true once the rendering surface signalled readiness.
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Registers a callback run when the view becomes ready.
    ///
    /// Callbacks run once, in the order they were registered. If the view is already ready the
    /// callback runs immediately and its result is returned.
    pub fn on_load(
        &mut self,
        callback: impl FnOnce(&mut MapView) -> Result<(), MapError> + Send + 'static,
    ) -> Result<(), MapError> {
        match self.state {
            LoadState::Loading => {
                self.on_load.push(Box::new(callback));
                Ok(())
            }
            LoadState::Ready => callback(self),
        }
    }

    /// Marks the view as ready and runs the load callbacks.
    ///
    /// All callbacks run even if some of them fail. Failures are logged and the first one is
    /// returned. Signalling readiness twice is an error and runs nothing.
    pub fn signal_ready(&mut self) -> Result<(), MapError> {
        if self.state == LoadState::Ready {
            return Err(MapError::InvalidState("map view is already loaded"));
        }

        self.state = LoadState::Ready;
        info!("Map view '{}' is ready", self.container());

        let mut first_error = None;
        for callback in std::mem::take(&mut self.on_load) {
            if let Err(err) = callback(self) {
                error!("Load callback failed: {err}");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Adds a GeoJSON source.
    ///
    /// Inline data is parsed immediately. Data referenced by location stays pending until
    /// [`MapView::load_sources`] is called.
    pub fn add_source(&mut self, source: GeoJsonSource) -> Result<(), MapError> {
        if !self.is_ready() {
            return Err(MapError::InvalidState("style is not done loading"));
        }
        if self.source(source.id()).is_some() {
            return Err(MapError::DuplicateSource(source.id().to_string()));
        }

        let status = match source.data() {
            GeoJsonData::Location(_) => SourceStatus::Pending,
            GeoJsonData::Inline(geojson) => match FeatureSet::from_geojson(geojson.clone()) {
                Ok(features) => SourceStatus::Loaded(Arc::new(features)),
                Err(err) => {
                    error!("Failed to parse inline data of source '{}': {err}", source.id());
                    SourceStatus::Failed(err)
                }
            },
        };

        debug!("Added source '{}'", source.id());
        self.sources.push(RegisteredSource { source, status });
        Ok(())
    }

    /// Adds a style layer on top of the existing ones.
    ///
    /// The source the layer references must already be added.
    pub fn add_layer(&mut self, layer: StyleLayer) -> Result<(), MapError> {
        if !self.is_ready() {
            return Err(MapError::InvalidState("style is not done loading"));
        }
        if self.layer(layer.id()).is_some() {
            return Err(MapError::DuplicateLayer(layer.id().to_string()));
        }
        if self.source(layer.source()).is_none() {
            return Err(MapError::SourceNotFound(layer.source().to_string()));
        }

        debug!(
            "Added {} layer '{}' for source '{}'",
            layer.layer_type(),
            layer.id(),
            layer.source()
        );
        self.layers.push(layer);
        Ok(())
    }

    /// Source by id.
    pub fn source(&self, id: &str) -> Option<&GeoJsonSource> {
        self.registered(id).map(|s| &s.source)
    }

    /// Load status of the source data.
    pub fn source_status(&self, id: &str) -> Option<&SourceStatus> {
        self.registered(id).map(|s| &s.status)
    }

    /// All sources in the order they were added.
    pub fn sources(&self) -> impl Iterator<Item = &GeoJsonSource> + '_ {
        self.sources.iter().map(|s| &s.source)
    }

    /// Layer by id.
    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// All layers, bottom to top.
    pub fn layers(&self) -> &[StyleLayer] {
        &self.layers
    }

    /// Loads the data of all pending sources.
    ///
    /// A source that fails to load is marked as failed and the error is logged. Its layers stay
    /// registered and draw nothing.
    pub async fn load_sources<L>(&mut self, loader: &L)
    where
        L: GeoJsonLoader + ?Sized,
    {
        for registered in &mut self.sources {
            if registered.status != SourceStatus::Pending {
                continue;
            }
            let GeoJsonData::Location(location) = registered.source.data() else {
                continue;
            };

            registered.status = match loader.load(location).await {
                Ok(features) => {
                    if features.is_empty() {
                        warn!("Source '{}' has no areal features", registered.source.id());
                    }
                    info!(
                        "Loaded {} features for source '{}'",
                        features.len(),
                        registered.source.id()
                    );
                    SourceStatus::Loaded(Arc::new(features))
                }
                Err(err) => {
                    error!(
                        "Failed to load source '{}' from {location}: {err}",
                        registered.source.id()
                    );
                    SourceStatus::Failed(err)
                }
            };
        }
    }

    /// Layers paired with the features they draw, bottom to top.
    pub fn renderables(&self) -> impl Iterator<Item = RenderableLayer<'_>> + '_ {
        self.layers.iter().map(|layer| RenderableLayer {
            layer,
            features: self
                .source_status(layer.source())
                .and_then(SourceStatus::features)
                .map(|set| set.features())
                .unwrap_or(&[]),
        })
    }

    fn registered(&self, id: &str) -> Option<&RegisteredSource> {
        self.sources.iter().find(|s| s.source.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::style::FillPaint;

    fn view() -> MapView {
        MapView::new(
            MapOptions::builder()
                .with_style("mapbox://styles/mapbox/light-v10")
                .build()
                .expect("valid options"),
        )
    }

    const SQUARE: &str = r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]}"#;

    struct StaticLoader;

    #[async_trait::async_trait]
    impl GeoJsonLoader for StaticLoader {
        async fn load(&self, location: &str) -> Result<FeatureSet, MapError> {
            match location {
                "square" => FeatureSet::from_json_str(SQUARE),
                other => Err(MapError::NotFound(other.to_string())),
            }
        }
    }

    #[test]
    fn mutations_before_ready_fail() {
        let mut view = view();
        assert_eq!(view.state(), LoadState::Loading);
        assert!(matches!(
            view.add_source(GeoJsonSource::from_location("s", "square")),
            Err(MapError::InvalidState(_))
        ));
        assert!(matches!(
            view.add_layer(StyleLayer::fill("l", "s", FillPaint::default())),
            Err(MapError::InvalidState(_))
        ));
        assert!(view.sources().next().is_none());
    }

    #[test]
    fn callbacks_run_once_in_order() {
        let mut view = view();
        let calls = Arc::new(AtomicUsize::new(0));

        for expected in 0..3 {
            let calls = calls.clone();
            view.on_load(move |view| {
                assert!(view.is_ready());
                assert_eq!(calls.fetch_add(1, Ordering::SeqCst), expected);
                Ok(())
            })
            .expect("queued");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        view.signal_ready().expect("ready");
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        assert!(matches!(
            view.signal_ready(),
            Err(MapError::InvalidState(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn late_callback_runs_immediately() {
        let mut view = view();
        view.signal_ready().expect("ready");
        view.on_load(|view| view.add_source(GeoJsonSource::from_location("s", "square")))
            .expect("added");
        assert!(view.source("s").is_some());
    }

    #[test]
    fn failing_callback_does_not_stop_others() {
        let mut view = view();
        view.on_load(|view| view.add_layer(StyleLayer::fill("l", "missing", FillPaint::default())))
            .expect("queued");
        view.on_load(|view| view.add_source(GeoJsonSource::from_location("s", "square")))
            .expect("queued");

        assert_eq!(
            view.signal_ready(),
            Err(MapError::SourceNotFound("missing".into()))
        );
        assert!(view.source("s").is_some());
        assert!(view.layers().is_empty());
    }

    #[test]
    fn layer_requires_existing_source() {
        let mut view = view();
        view.signal_ready().expect("ready");

        assert_eq!(
            view.add_layer(StyleLayer::fill("l", "s", FillPaint::default())),
            Err(MapError::SourceNotFound("s".into()))
        );

        view.add_source(GeoJsonSource::from_location("s", "square"))
            .expect("added");
        view.add_layer(StyleLayer::fill("l", "s", FillPaint::default()))
            .expect("added");
        assert_eq!(view.layers().len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut view = view();
        view.signal_ready().expect("ready");
        view.add_source(GeoJsonSource::from_location("s", "square"))
            .expect("added");
        assert_eq!(
            view.add_source(GeoJsonSource::from_location("s", "other")),
            Err(MapError::DuplicateSource("s".into()))
        );

        view.add_layer(StyleLayer::fill("l", "s", FillPaint::default()))
            .expect("added");
        assert_eq!(
            view.add_layer(StyleLayer::fill("l", "s", FillPaint::default())),
            Err(MapError::DuplicateLayer("l".into()))
        );
    }

    #[test]
    fn inline_source_is_parsed_on_add() {
        let mut view = view();
        view.signal_ready().expect("ready");
        let geojson = SQUARE.parse().expect("valid geojson");
        view.add_source(GeoJsonSource::inline("s", geojson))
            .expect("added");

        let features = view
            .source_status("s")
            .and_then(SourceStatus::features)
            .expect("loaded");
        assert_eq!(features.len(), 1);
    }

    #[tokio::test]
    async fn failed_source_keeps_layer_without_features() {
        let mut view = view();
        view.signal_ready().expect("ready");
        view.add_source(GeoJsonSource::from_location("ok", "square"))
            .expect("added");
        view.add_source(GeoJsonSource::from_location("bad", "nowhere"))
            .expect("added");
        view.add_layer(StyleLayer::fill("ok-layer", "ok", FillPaint::default()))
            .expect("added");
        view.add_layer(StyleLayer::fill("bad-layer", "bad", FillPaint::default()))
            .expect("added");

        assert_eq!(view.source_status("bad"), Some(&SourceStatus::Pending));
        view.load_sources(&StaticLoader).await;

        assert!(matches!(
            view.source_status("bad"),
            Some(SourceStatus::Failed(MapError::NotFound(_)))
        ));

        let renderables: Vec<_> = view.renderables().collect();
        assert_eq!(renderables.len(), 2);
        assert_eq!(renderables[0].layer.id(), "ok-layer");
        assert_eq!(renderables[0].features.len(), 1);
        assert_eq!(renderables[1].layer.id(), "bad-layer");
        assert!(renderables[1].features.is_empty());
    }
}
