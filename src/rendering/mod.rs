//! Renderer capability contract and the overlay container it draws into.

pub mod container;
pub mod renderer;

pub use container::{ContainerSize, OverlayContainer};
pub use renderer::{HeatmapRenderer, ProjectedPoint, RenderData, RendererFactory};
