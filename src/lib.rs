//! # Heatmap Overlay
//!
//! Keeps a geospatial heatmap overlay synchronized with a moving, zooming map
//! viewport.
//!
//! Geographic points are projected into pixels relative to the overlay container,
//! culled against the visible bounds, scaled with zoom and handed to a density
//! renderer whenever the viewport, the container size or the data changes. The host
//! map and the renderer are consumed through the [`HostMap`] and [`HeatmapRenderer`]
//! capability contracts, so either side can be swapped for a fake.

pub mod core;
pub mod plugins;
pub mod prelude;
pub mod rendering;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::HeatmapOverlayConfig,
    geo::{LatLng, LatLngBounds, Point},
    map::HeadlessMap,
    viewport::Viewport,
};

pub use crate::plugins::{
    base::OverlayLifecycle,
    heatmap::{GeoDataPoint, HeatmapData, HeatmapOverlay, OverlayState, SyncOutcome},
};

pub use crate::rendering::{
    container::{ContainerSize, OverlayContainer},
    renderer::{HeatmapRenderer, ProjectedPoint, RenderData, RendererFactory},
};

pub use crate::traits::{HostMap, ViewportChange};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    #[error("Renderer error: {0}")]
    Renderer(String),

    #[error("Registry error: {0}")]
    Registry(String),
}

/// Error type alias for convenience
pub type Error = OverlayError;

/// Initializes `env_logger` from `RUST_LOG`; safe to call more than once
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
