//! Overlay configuration
//!
//! A [`HeatmapOverlayConfig`] is fixed for the lifetime of one overlay and is only ever
//! replaced wholesale. Unknown keys are kept in [`HeatmapOverlayConfig::renderer`] and are
//! handed to the density renderer untouched.

use crate::core::constants::{
    DEFAULT_LAT_FIELD, DEFAULT_LNG_FIELD, DEFAULT_RADIUS, DEFAULT_VALUE_FIELD,
};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Renderer pass-through options (`maxOpacity`, `blur`, `gradient`, ...)
pub type RendererOptions = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatmapOverlayConfig {
    /// Key holding the point value in raw entries
    pub value_field: String,
    /// Key holding the latitude in raw entries
    pub lat_field: String,
    /// Key holding the longitude in raw entries
    pub lng_field: String,
    /// Radius used for entries that carry none
    pub radius: f64,
    /// Treat radii as zoom-0 sizes and grow them with `2^zoom`
    pub scale_radius: bool,
    /// Report extrema of the visible points instead of the stored ones
    pub use_local_extrema: bool,
    /// Everything else, forwarded to the renderer
    #[serde(flatten)]
    pub renderer: RendererOptions,
}

impl Default for HeatmapOverlayConfig {
    fn default() -> Self {
        Self {
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            lat_field: DEFAULT_LAT_FIELD.to_string(),
            lng_field: DEFAULT_LNG_FIELD.to_string(),
            radius: DEFAULT_RADIUS,
            scale_radius: false,
            use_local_extrema: false,
            renderer: RendererOptions::new(),
        }
    }
}

impl HeatmapOverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from its JSON form, filling in defaults for missing keys
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_fields(mut self, lat: &str, lng: &str, value: &str) -> Self {
        self.lat_field = lat.to_string();
        self.lng_field = lng.to_string();
        self.value_field = value.to_string();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_scale_radius(mut self, scale_radius: bool) -> Self {
        self.scale_radius = scale_radius;
        self
    }

    pub fn with_local_extrema(mut self, use_local_extrema: bool) -> Self {
        self.use_local_extrema = use_local_extrema;
        self
    }

    /// Radius for entries that carry none. A zero or non-finite setting falls back to
    /// [`DEFAULT_RADIUS`].
    pub fn fallback_radius(&self) -> f64 {
        if self.radius != 0.0 && self.radius.is_finite() {
            self.radius
        } else {
            DEFAULT_RADIUS
        }
    }

    /// Adds a renderer pass-through option
    pub fn with_renderer_option(mut self, key: &str, value: serde_json::Value) -> Self {
        self.renderer.insert(key.to_string(), value);
        self
    }
}
