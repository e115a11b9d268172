//! Shared fakes for the integration tests
#![allow(dead_code)]

use crossbeam_channel::{unbounded, Sender};
use heatmap_overlay::prelude::*;
use std::sync::Mutex;

/// Pixels per degree in the fake projection
pub const PIXELS_PER_DEGREE: f64 = 10.0;

#[derive(Debug)]
struct FakeState {
    bounds: Option<LatLngBounds>,
    zoom: i32,
    size: ContainerSize,
    projection_ready: bool,
    subscribers: Vec<(SubscriptionId, Sender<ViewportChange>)>,
    next_id: SubscriptionId,
}

/// A host map with a flat projection: x grows with longitude, y grows southwards
#[derive(Debug)]
pub struct FakeMap {
    state: Mutex<FakeState>,
}

impl FakeMap {
    pub fn new(bounds: LatLngBounds, zoom: i32, size: ContainerSize) -> Self {
        Self {
            state: Mutex::new(FakeState {
                bounds: Some(bounds),
                zoom,
                size,
                projection_ready: true,
                subscribers: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// A map that reports neither bounds nor projection yet
    pub fn unready(size: ContainerSize) -> Self {
        let map = Self::new(LatLngBounds::from_coords(0.0, 0.0, 0.0, 0.0), 0, size);
        {
            let mut state = map.state.lock().unwrap();
            state.bounds = None;
            state.projection_ready = false;
        }
        map
    }

    /// Makes bounds and projection available and notifies subscribers
    pub fn become_ready(&self, bounds: LatLngBounds) {
        {
            let mut state = self.state.lock().unwrap();
            state.bounds = Some(bounds);
            state.projection_ready = true;
        }
        self.notify(ViewportChange::Moved);
    }

    pub fn move_to(&self, bounds: LatLngBounds) {
        self.state.lock().unwrap().bounds = Some(bounds);
        self.notify(ViewportChange::Moved);
    }

    pub fn zoom_to(&self, zoom: i32) {
        self.state.lock().unwrap().zoom = zoom;
        self.notify(ViewportChange::Zoomed);
    }

    /// Changes the container size without notifying anyone
    pub fn resize_silently(&self, size: ContainerSize) {
        self.state.lock().unwrap().size = size;
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().unwrap().subscribers.len()
    }

    fn notify(&self, change: ViewportChange) {
        let state = self.state.lock().unwrap();
        for (_, sender) in &state.subscribers {
            let _ = sender.send(change);
        }
    }
}

/// Pixel position of a coordinate in the fake projection
pub fn flat_pixel(lat_lng: &LatLng) -> Point {
    Point::new(
        lat_lng.lng * PIXELS_PER_DEGREE,
        -lat_lng.lat * PIXELS_PER_DEGREE,
    )
}

impl HostMap for FakeMap {
    fn bounds(&self) -> Option<LatLngBounds> {
        self.state.lock().unwrap().bounds
    }

    fn zoom(&self) -> i32 {
        self.state.lock().unwrap().zoom
    }

    fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Option<Point> {
        let ready = self.state.lock().unwrap().projection_ready;
        ready.then(|| flat_pixel(lat_lng))
    }

    fn container_size(&self) -> ContainerSize {
        self.state.lock().unwrap().size
    }

    fn subscribe_viewport_changed(&self) -> ViewportSubscription {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let (sender, events) = unbounded();
        state.subscribers.push((id, sender));
        ViewportSubscription { id, events }
    }

    fn unsubscribe_viewport_changed(&self, id: SubscriptionId) {
        self.state
            .lock()
            .unwrap()
            .subscribers
            .retain(|(subscription, _)| *subscription != id);
    }
}

/// Everything a renderer was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum RendererCall {
    Created(ContainerSize),
    SetData(RenderData),
    Configure(RendererOptions),
    SetDimensions(ContainerSize),
    Dropped,
}

pub type CallLog = Arc<Mutex<Vec<RendererCall>>>;

pub struct RecordingRenderer {
    log: CallLog,
}

impl HeatmapRenderer for RecordingRenderer {
    fn set_data(&mut self, data: &RenderData) {
        self.log
            .lock()
            .unwrap()
            .push(RendererCall::SetData(data.clone()));
    }

    fn configure(&mut self, options: &RendererOptions) {
        self.log
            .lock()
            .unwrap()
            .push(RendererCall::Configure(options.clone()));
    }

    fn set_dimensions(&mut self, size: ContainerSize) {
        self.log
            .lock()
            .unwrap()
            .push(RendererCall::SetDimensions(size));
    }
}

impl Drop for RecordingRenderer {
    fn drop(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.push(RendererCall::Dropped);
        }
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    pub log: CallLog,
    pub fail: bool,
}

impl RecordingFactory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl RendererFactory for RecordingFactory {
    fn create(
        &self,
        container: &OverlayContainer,
        _config: &HeatmapOverlayConfig,
    ) -> Result<Box<dyn HeatmapRenderer>> {
        if self.fail {
            return Err(OverlayError::Renderer("no canvas available".to_string()));
        }
        self.log
            .lock()
            .unwrap()
            .push(RendererCall::Created(container.size));
        Ok(Box::new(RecordingRenderer {
            log: self.log.clone(),
        }))
    }
}

/// Bounds covering 0..10 degrees in both directions
pub fn square_bounds() -> LatLngBounds {
    LatLngBounds::from_coords(0.0, 0.0, 10.0, 10.0)
}

pub fn default_size() -> ContainerSize {
    ContainerSize::new(100, 100)
}

/// An attached overlay on a fake map, with the renderer call log
pub fn attached_overlay(
    config: HeatmapOverlayConfig,
    zoom: i32,
) -> (HeatmapOverlay, Arc<FakeMap>, CallLog) {
    let factory = Arc::new(RecordingFactory::default());
    let log = factory.log.clone();
    let map = Arc::new(FakeMap::new(square_bounds(), zoom, default_size()));
    let mut overlay = HeatmapOverlay::new(config, factory);
    overlay.attach(map.clone()).unwrap();
    (overlay, map, log)
}

pub fn pushed(log: &CallLog) -> Vec<RenderData> {
    log.lock()
        .unwrap()
        .iter()
        .filter_map(|call| match call {
            RendererCall::SetData(data) => Some(data.clone()),
            _ => None,
        })
        .collect()
}

pub fn dimension_updates(log: &CallLog) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|call| matches!(call, RendererCall::SetDimensions(_)))
        .count()
}
