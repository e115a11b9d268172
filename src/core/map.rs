//! Headless host map
//!
//! A [`HostMap`] implementation backed by a Web Mercator [`Viewport`]. It has no
//! rendering surface; it exists so overlays can be driven and inspected without a
//! UI toolkit.

use crate::{
    core::{
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    rendering::container::ContainerSize,
    traits::{HostMap, SubscriptionId, ViewportChange, ViewportSubscription},
};
use crossbeam_channel::{unbounded, Sender};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, PoisonError, RwLock,
};

#[derive(Debug)]
struct MapState {
    viewport: Viewport,
    /// Projection is only answerable once the map has been laid out
    laid_out: bool,
}

#[derive(Debug)]
pub struct HeadlessMap {
    state: RwLock<MapState>,
    subscribers: Mutex<Vec<(SubscriptionId, Sender<ViewportChange>)>>,
    next_subscription: AtomicU64,
}

impl HeadlessMap {
    /// Creates a map that has not been laid out yet. Zoom snaps to whole levels.
    pub fn new(center: LatLng, zoom: f64, size: ContainerSize) -> Self {
        let viewport = Viewport::new(
            center,
            zoom.round(),
            Point::new(size.width as f64, size.height as f64),
        );
        Self {
            state: RwLock::new(MapState {
                viewport,
                laid_out: false,
            }),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Creates a map that is already laid out and can project
    pub fn ready(center: LatLng, zoom: f64, size: ContainerSize) -> Self {
        let map = Self::new(center, zoom, size);
        map.write_state().laid_out = true;
        map
    }

    /// Marks the first layout pass as done; projection becomes available
    pub fn layout(&self) {
        let first = {
            let mut state = self.write_state();
            let first = !state.laid_out;
            state.laid_out = true;
            first
        };
        if first {
            log::debug!("headless map laid out");
            self.notify(ViewportChange::Moved);
        }
    }

    pub fn is_laid_out(&self) -> bool {
        self.read_state().laid_out
    }

    /// Snapshot of the current viewport
    pub fn viewport(&self) -> Viewport {
        self.read_state().viewport.clone()
    }

    /// Recenters and zooms; zoom snaps to whole levels so projection and radius
    /// scaling agree
    pub fn set_view(&self, center: LatLng, zoom: f64) {
        let zoom_changed = {
            let mut state = self.write_state();
            let old_zoom = state.viewport.zoom;
            state.viewport.set_zoom(zoom.round());
            state.viewport.set_center(center);
            (state.viewport.zoom - old_zoom).abs() > f64::EPSILON
        };
        self.notify(if zoom_changed {
            ViewportChange::Zoomed
        } else {
            ViewportChange::Moved
        });
    }

    /// Pans the view by a pixel offset
    pub fn pan(&self, delta: Point) {
        self.write_state().viewport.pan(delta);
        self.notify(ViewportChange::Moved);
    }

    /// Resizes the container; callers are expected to forward this to overlays
    pub fn set_size(&self, size: ContainerSize) {
        self.write_state()
            .viewport
            .set_size(Point::new(size.width as f64, size.height as f64));
        self.notify(ViewportChange::Resized);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, change: ViewportChange) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Drop subscribers whose receiving end has gone away
        subscribers.retain(|(_, sender)| sender.send(change).is_ok());
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, MapState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, MapState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostMap for HeadlessMap {
    fn bounds(&self) -> Option<LatLngBounds> {
        let state = self.read_state();
        state.laid_out.then(|| state.viewport.bounds())
    }

    fn zoom(&self) -> i32 {
        self.read_state().viewport.zoom as i32
    }

    fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Option<Point> {
        let state = self.read_state();
        state
            .laid_out
            .then(|| state.viewport.lat_lng_to_layer_point(lat_lng))
    }

    fn container_size(&self) -> ContainerSize {
        let size = self.read_state().viewport.size;
        ContainerSize::new(size.x.max(0.0) as u32, size.y.max(0.0) as u32)
    }

    fn subscribe_viewport_changed(&self) -> ViewportSubscription {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        let (sender, events) = unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, sender));
        ViewportSubscription { id, events }
    }

    fn unsubscribe_viewport_changed(&self, id: SubscriptionId) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(subscription, _)| *subscription != id);
    }
}
