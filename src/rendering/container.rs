use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a map or overlay container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The element the overlay's renderer draws into.
///
/// It is sized like the host map's viewport and translated so that its top-left
/// corner sits on the anchor pixel of the current bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayContainer {
    pub size: ContainerSize,
    /// Translation applied to the container, in whole pixels
    pub translate: Point,
}

impl OverlayContainer {
    pub fn new(size: ContainerSize) -> Self {
        Self {
            size,
            translate: Point::default(),
        }
    }

    /// Moves the container so its origin sits on `anchor`, rounded to whole pixels
    pub fn set_anchor(&mut self, anchor: Point) {
        self.translate = anchor.round();
    }

    pub fn resize(&mut self, size: ContainerSize) {
        self.size = size;
    }

    /// CSS-style transform string for the current translation
    pub fn css_transform(&self) -> String {
        format!("translate({}px,{}px)", self.translate.x, self.translate.y)
    }
}
