//! Prelude module for common heatmap-overlay types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use heatmap_overlay::prelude::*;`

pub use crate::core::{
    config::{HeatmapOverlayConfig, RendererOptions},
    geo::{LatLng, LatLngBounds, Point},
    map::HeadlessMap,
    viewport::Viewport,
};

pub use crate::plugins::{
    base::OverlayLifecycle,
    heatmap::{
        DeferReason, GeoDataPoint, HeatmapData, HeatmapOverlay, OverlayState, SyncOutcome,
        SyncReport,
    },
    registry::SharedOverlay,
};

pub use crate::rendering::{
    container::{ContainerSize, OverlayContainer},
    renderer::{HeatmapRenderer, ProjectedPoint, RenderData, RendererFactory},
};

pub use crate::traits::{HostMap, SubscriptionId, ViewportChange, ViewportSubscription};

pub use crate::{Error as OverlayError, Result};

pub use std::sync::Arc;

pub use fxhash::FxHashMap as HashMap;
