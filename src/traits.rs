//! Capability contracts the overlay consumes from its host map
//!
//! The overlay never owns the map; it only borrows these accessors and a
//! viewport-changed subscription.

use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::rendering::container::ContainerSize;
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

/// Identifies one viewport-changed subscription
pub type SubscriptionId = u64;

/// Why the host map's viewport changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewportChange {
    /// Center moved, zoom unchanged
    Moved,
    /// Zoom level changed
    Zoomed,
    /// Container was resized
    Resized,
}

/// A live viewport-changed subscription handed out by a host map
#[derive(Debug)]
pub struct ViewportSubscription {
    pub id: SubscriptionId,
    pub events: Receiver<ViewportChange>,
}

/// Accessors the overlay needs from the map it is drawn on.
///
/// Methods that return `Option` report `None` while the map cannot answer yet,
/// typically before its first layout pass.
pub trait HostMap: Send + Sync {
    /// Visible geographic bounding box
    fn bounds(&self) -> Option<LatLngBounds>;

    /// Current integer zoom level
    fn zoom(&self) -> i32;

    /// Projects a coordinate into the map's overlay pixel space
    fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Option<Point>;

    /// Current size of the map's container element
    fn container_size(&self) -> ContainerSize;

    fn subscribe_viewport_changed(&self) -> ViewportSubscription;

    fn unsubscribe_viewport_changed(&self, id: SubscriptionId);
}
