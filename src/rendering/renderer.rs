use crate::core::config::{HeatmapOverlayConfig, RendererOptions};
use crate::rendering::container::{ContainerSize, OverlayContainer};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A point in pixel space, relative to the overlay container's top-left anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: i64,
    pub y: i64,
    pub value: f64,
    pub radius: f64,
}

/// The payload pushed to the density renderer on every sync pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderData {
    pub min: f64,
    pub max: f64,
    pub data: Vec<ProjectedPoint>,
}

impl RenderData {
    /// An empty payload, used to clear whatever the renderer drew last
    pub fn empty(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A density renderer bound to one overlay container
pub trait HeatmapRenderer: Send {
    /// Replaces everything drawn with `data`
    fn set_data(&mut self, data: &RenderData);

    /// Applies renderer options (opacity, blur, gradient, ...)
    fn configure(&mut self, options: &RendererOptions);

    /// Resizes the drawing surface
    fn set_dimensions(&mut self, size: ContainerSize);
}

/// Creates renderers for overlays as they attach
pub trait RendererFactory: Send + Sync {
    fn create(
        &self,
        container: &OverlayContainer,
        config: &HeatmapOverlayConfig,
    ) -> Result<Box<dyn HeatmapRenderer>>;
}

impl<F> RendererFactory for F
where
    F: Fn(&OverlayContainer, &HeatmapOverlayConfig) -> Result<Box<dyn HeatmapRenderer>>
        + Send
        + Sync,
{
    fn create(
        &self,
        container: &OverlayContainer,
        config: &HeatmapOverlayConfig,
    ) -> Result<Box<dyn HeatmapRenderer>> {
        self(container, config)
    }
}
