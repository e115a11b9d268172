use crate::{
    core::geo::{LatLng, LatLngBounds, Point},
    rendering::container::ContainerSize,
    traits::HostMap,
};

/// Everything a sync pass reads from the host map, captured once per pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub container: ContainerSize,
    pub zoom: i32,
    pub bounds: LatLngBounds,
    /// Pixel position of the bounds' north-west corner
    pub anchor: Point,
}

/// Converts geographic coordinates into pixels relative to the overlay container
pub struct ViewportProjector<'a> {
    map: &'a dyn HostMap,
}

impl<'a> ViewportProjector<'a> {
    pub fn new(map: &'a dyn HostMap) -> Self {
        Self { map }
    }

    /// Visible bounds, or `None` while the host map has no layout yet
    pub fn current_bounds(&self) -> Option<LatLngBounds> {
        self.map.bounds()
    }

    /// Where the container's top-left corner has to sit for `bounds`
    pub fn anchor_pixel(&self, bounds: &LatLngBounds) -> Option<Point> {
        self.map.lat_lng_to_pixel(&bounds.north_west())
    }

    /// Offset of `lat_lng` from `anchor`, rounded to whole pixels
    pub fn to_pixel(&self, lat_lng: &LatLng, anchor: Point) -> Option<(i64, i64)> {
        let point = self.map.lat_lng_to_pixel(lat_lng)?;
        let offset = point.subtract(&anchor).round();
        Some((offset.x as i64, offset.y as i64))
    }

    /// Radius multiplier for a zoom level; radii are given at zoom 0
    pub fn scale_for_zoom(zoom: i32) -> f64 {
        2_f64.powi(zoom)
    }

    /// Reads bounds, anchor, zoom and container size in one go
    pub fn capture(&self) -> Option<ViewportState> {
        let bounds = self.current_bounds()?;
        let anchor = self.anchor_pixel(&bounds)?;
        Some(ViewportState {
            container: self.map.container_size(),
            zoom: self.map.zoom(),
            bounds,
            anchor,
        })
    }
}
