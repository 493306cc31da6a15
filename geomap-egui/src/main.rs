//! Opens a window with the Portugal districts map.
//!
//! District boundaries are read from `static/Files/georef-portugal-distrito.geojson`.
//! Run with: cargo run -p geomap-egui

use anyhow::anyhow;
use geomap::WebGeoJsonLoader;

/// Directory root-relative source locations resolve into.
const ASSET_ROOT: &str = "static";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut view = geomap::bootstrap::initialize()?;
    let base = geomap_egui::base_layer(&view)?;

    // Registration errors are already logged by the view, the map is shown without the overlay.
    if let Err(err) = view.signal_ready() {
        log::warn!("Map view became ready with errors: {err}");
    }

    view.load_sources(&WebGeoJsonLoader::new(ASSET_ROOT)).await;

    let map = geomap_egui::build_map(&view, base);
    galileo_egui::InitBuilder::new(map)
        .init()
        .map_err(|err| anyhow!("failed to initialize viewer: {err:?}"))
}
