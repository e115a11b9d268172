pub mod base;
pub mod heatmap;
pub mod registry;
