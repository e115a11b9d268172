//! Geospatial heatmap overlay
//!
//! Keeps a density renderer in step with a host map's viewport:
//! - [`store`] holds the geographic points and their declared extrema.
//! - [`projector`] turns coordinates into container-relative pixels.
//! - [`sync`] re-derives and pushes the visible pixel-space dataset.
//! - [`overlay`] manages attach/detach, resize and viewport notifications.

pub mod overlay;
pub mod projector;
pub mod store;
pub mod sync;

pub use overlay::{HeatmapOverlay, OverlayState};
pub use projector::{ViewportProjector, ViewportState};
pub use store::{Dataset, GeoDataPoint, GeoPointStore, HeatmapData};
pub use sync::{DataSynchronizer, DeferReason, SyncOutcome, SyncReport};
