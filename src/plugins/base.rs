use crate::{plugins::heatmap::sync::SyncOutcome, traits::HostMap, Result};
use std::sync::Arc;

/// Hooks a host map drives on the overlays drawn over it.
///
/// `on_add` runs once when the overlay is placed on a map, `draw` whenever the
/// viewport needs the overlay to follow it, and `on_remove` when it is taken off.
pub trait OverlayLifecycle: Send {
    fn name(&self) -> &str;

    fn on_add(&mut self, map: Arc<dyn HostMap>) -> Result<()>;

    fn draw(&mut self) -> SyncOutcome;

    fn on_remove(&mut self);

    /// Re-reads the host container size; returns whether anything changed
    fn on_resize(&mut self) -> bool {
        false
    }
}
