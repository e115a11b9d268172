//! Heatmap overlay lifecycle
//!
//! [`HeatmapOverlay`] owns its dataset, its container and its renderer, and borrows
//! the host map it is attached to. Every entry point runs one synchronization pass
//! to completion before returning.

use crate::{
    core::config::HeatmapOverlayConfig,
    plugins::{
        base::OverlayLifecycle,
        heatmap::{
            store::{GeoDataPoint, GeoPointStore, HeatmapData},
            sync::{DataSynchronizer, DeferReason, SyncOutcome},
        },
    },
    rendering::{
        container::{ContainerSize, OverlayContainer},
        renderer::{HeatmapRenderer, RenderData, RendererFactory},
    },
    traits::{HostMap, ViewportSubscription},
    Error, Result,
};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayState {
    Unattached,
    Attached,
    /// Terminal; a new overlay is needed to attach again
    Detached,
}

pub struct HeatmapOverlay {
    config: HeatmapOverlayConfig,
    store: GeoPointStore,
    factory: Arc<dyn RendererFactory>,
    state: OverlayState,
    map: Option<Arc<dyn HostMap>>,
    container: Option<OverlayContainer>,
    renderer: Option<Box<dyn HeatmapRenderer>>,
    subscription: Option<ViewportSubscription>,
    synchronizer: DataSynchronizer,
    last_render: Option<RenderData>,
}

impl std::fmt::Debug for HeatmapOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatmapOverlay")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("points", &self.store.len())
            .field("extrema", &self.store.extrema())
            .field("container", &self.container)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

impl HeatmapOverlay {
    pub fn new(config: HeatmapOverlayConfig, factory: Arc<dyn RendererFactory>) -> Self {
        Self {
            config,
            store: GeoPointStore::new(),
            factory,
            state: OverlayState::Unattached,
            map: None,
            container: None,
            renderer: None,
            subscription: None,
            synchronizer: DataSynchronizer::new(ContainerSize::default()),
            last_render: None,
        }
    }

    /// Places the overlay on `map`: creates the container and renderer, subscribes to
    /// viewport changes and runs the first pass.
    pub fn attach(&mut self, map: Arc<dyn HostMap>) -> Result<SyncOutcome> {
        match self.state {
            OverlayState::Attached => {
                return Err(Error::Lifecycle("overlay is already attached".to_string()))
            }
            OverlayState::Detached => {
                return Err(Error::Lifecycle(
                    "overlay was detached; create a new one to attach again".to_string(),
                ))
            }
            OverlayState::Unattached => {}
        }

        let size = map.container_size();
        let container = OverlayContainer::new(size);
        let renderer = self.factory.create(&container, &self.config)?;

        self.subscription = Some(map.subscribe_viewport_changed());
        self.synchronizer = DataSynchronizer::new(size);
        self.container = Some(container);
        self.renderer = Some(renderer);
        self.map = Some(map);
        self.state = OverlayState::Attached;

        log::info!(
            "heatmap overlay attached ({}x{}, {} points)",
            size.width,
            size.height,
            self.store.len()
        );
        Ok(self.draw())
    }

    /// Takes the overlay off its map and releases the renderer. Calling it again,
    /// or before attaching, does nothing.
    pub fn detach(&mut self) {
        if self.state != OverlayState::Attached {
            return;
        }

        if let (Some(map), Some(subscription)) = (self.map.as_ref(), self.subscription.take()) {
            map.unsubscribe_viewport_changed(subscription.id);
        }
        self.map = None;
        self.container = None;
        self.renderer = None;
        self.last_render = None;
        self.store.clear();
        self.state = OverlayState::Detached;

        log::info!("heatmap overlay detached");
    }

    /// Replaces the dataset and resyncs. Ignored once detached.
    pub fn set_data(&mut self, data: &HeatmapData) -> Result<SyncOutcome> {
        if self.ignores_updates() {
            return Ok(SyncOutcome::Deferred(DeferReason::NotAttached));
        }
        self.store.replace(data, &self.config)?;
        Ok(self.draw())
    }

    /// Replaces the dataset with already-parsed points and resyncs
    pub fn set_points(&mut self, min: f64, max: f64, points: Vec<GeoDataPoint>) -> SyncOutcome {
        if self.ignores_updates() {
            return SyncOutcome::Deferred(DeferReason::NotAttached);
        }
        self.store.replace_points(min, max, points);
        self.draw()
    }

    /// Appends one entry or a (nested) list of entries, then resyncs once
    pub fn add_data(&mut self, entries: &Value) -> Result<SyncOutcome> {
        if self.ignores_updates() {
            return Ok(SyncOutcome::Deferred(DeferReason::NotAttached));
        }
        let added = self.store.append(entries, &self.config)?;
        log::debug!("heatmap overlay appended {} points", added);
        Ok(self.draw())
    }

    /// Appends already-parsed points, then resyncs once
    pub fn add_points(&mut self, points: impl IntoIterator<Item = GeoDataPoint>) -> SyncOutcome {
        if self.ignores_updates() {
            return SyncOutcome::Deferred(DeferReason::NotAttached);
        }
        self.store.append_points(points);
        self.draw()
    }

    /// Replaces the configuration wholesale and hands the renderer options over
    pub fn configure(&mut self, config: HeatmapOverlayConfig) -> SyncOutcome {
        self.config = config;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.configure(&self.config.renderer);
        }
        self.draw()
    }

    /// Re-reads the host container size. When it changed, resizes the container and
    /// renderer and resyncs; otherwise does nothing.
    pub fn on_resize(&mut self) -> bool {
        let (Some(map), Some(renderer)) = (self.map.as_ref(), self.renderer.as_mut()) else {
            return false;
        };

        let size = map.container_size();
        if !self.synchronizer.propagate_resize(size, &mut **renderer) {
            return false;
        }
        if let Some(container) = self.container.as_mut() {
            container.resize(size);
        }
        self.draw();
        true
    }

    /// Handles every pending viewport-changed notification in arrival order, one
    /// pass each. Returns how many were handled.
    pub fn process_viewport_events(&mut self) -> usize {
        let pending: Vec<_> = match self.subscription.as_ref() {
            Some(subscription) => subscription.events.try_iter().collect(),
            None => return 0,
        };

        for change in &pending {
            log::debug!("heatmap overlay following viewport change {:?}", change);
            self.draw();
        }
        pending.len()
    }

    /// Moves the container onto the current anchor and runs a sync pass
    pub fn draw(&mut self) -> SyncOutcome {
        let Some(map) = self.map.as_ref() else {
            return SyncOutcome::Deferred(DeferReason::NotAttached);
        };
        let Some(renderer) = self.renderer.as_mut() else {
            return SyncOutcome::Deferred(DeferReason::NoRenderer);
        };

        let outcome = self
            .synchronizer
            .sync(&**map, &self.store, &self.config, &mut **renderer);

        if let SyncOutcome::Pushed(report) = &outcome {
            if let Some(container) = self.container.as_mut() {
                container.set_anchor(report.anchor);
                if report.resized {
                    container.resize(self.synchronizer.last_size());
                }
            }
            self.last_render = Some(report.data.clone());
        }
        outcome
    }

    /// Stored `(min, max)`
    pub fn extrema(&self) -> (f64, f64) {
        self.store.extrema()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.state == OverlayState::Attached
    }

    fn ignores_updates(&self) -> bool {
        if self.state == OverlayState::Detached {
            log::warn!("heatmap overlay is detached; data update ignored");
            return true;
        }
        false
    }

    pub fn config(&self) -> &HeatmapOverlayConfig {
        &self.config
    }

    pub fn container(&self) -> Option<&OverlayContainer> {
        self.container.as_ref()
    }

    /// The payload most recently pushed to the renderer
    pub fn last_render(&self) -> Option<&RenderData> {
        self.last_render.as_ref()
    }
}

impl OverlayLifecycle for HeatmapOverlay {
    fn name(&self) -> &str {
        "Heatmap"
    }

    fn on_add(&mut self, map: Arc<dyn HostMap>) -> Result<()> {
        self.attach(map).map(|_| ())
    }

    fn draw(&mut self) -> SyncOutcome {
        HeatmapOverlay::draw(self)
    }

    fn on_remove(&mut self) {
        self.detach();
    }

    fn on_resize(&mut self) -> bool {
        HeatmapOverlay::on_resize(self)
    }
}
