//! Synchronization pass
//!
//! Re-derives the visible pixel-space dataset from the point store and pushes it to
//! the renderer. A pass never fails; when the host map cannot answer yet it is
//! deferred until the next trigger.

use crate::{
    core::{config::HeatmapOverlayConfig, geo::Point},
    plugins::heatmap::{
        projector::{ViewportProjector, ViewportState},
        store::GeoPointStore,
    },
    rendering::{
        container::ContainerSize,
        renderer::{HeatmapRenderer, ProjectedPoint, RenderData},
    },
    traits::HostMap,
};

/// Why a pass did not reach the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferReason {
    /// The overlay is not attached to a host map
    NotAttached,
    /// No renderer has been created yet
    NoRenderer,
    /// The host map reported no bounds
    NoBounds,
    /// The host map could not project the anchor
    NoProjection,
}

impl std::fmt::Display for DeferReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeferReason::NotAttached => write!(f, "not attached"),
            DeferReason::NoRenderer => write!(f, "no renderer"),
            DeferReason::NoBounds => write!(f, "no bounds"),
            DeferReason::NoProjection => write!(f, "no projection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Deferred(DeferReason),
    Pushed(SyncReport),
}

impl SyncOutcome {
    pub fn is_pushed(&self) -> bool {
        matches!(self, SyncOutcome::Pushed(_))
    }

    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncOutcome::Pushed(report) => Some(report),
            SyncOutcome::Deferred(_) => None,
        }
    }
}

/// What a completed pass sent to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub anchor: Point,
    /// Points outside the bounds this pass
    pub culled: usize,
    /// Whether the renderer was resized before the points were pushed
    pub resized: bool,
    pub data: RenderData,
}

#[derive(Debug, Clone)]
pub struct DataSynchronizer {
    last_size: ContainerSize,
}

impl DataSynchronizer {
    pub fn new(size: ContainerSize) -> Self {
        Self { last_size: size }
    }

    pub fn last_size(&self) -> ContainerSize {
        self.last_size
    }

    /// Resizes the renderer if `size` differs from the last known size
    pub fn propagate_resize(
        &mut self,
        size: ContainerSize,
        renderer: &mut dyn HeatmapRenderer,
    ) -> bool {
        if size == self.last_size {
            return false;
        }

        log::debug!(
            "heatmap container resized {}x{} -> {}x{}",
            self.last_size.width,
            self.last_size.height,
            size.width,
            size.height
        );
        self.last_size = size;
        renderer.set_dimensions(size);
        true
    }

    /// Runs one synchronization pass
    pub fn sync(
        &mut self,
        map: &dyn HostMap,
        store: &GeoPointStore,
        config: &HeatmapOverlayConfig,
        renderer: &mut dyn HeatmapRenderer,
    ) -> SyncOutcome {
        let projector = ViewportProjector::new(map);

        let Some(bounds) = projector.current_bounds() else {
            log::debug!("heatmap sync deferred: {}", DeferReason::NoBounds);
            return SyncOutcome::Deferred(DeferReason::NoBounds);
        };
        let Some(anchor) = projector.anchor_pixel(&bounds) else {
            log::debug!("heatmap sync deferred: {}", DeferReason::NoProjection);
            return SyncOutcome::Deferred(DeferReason::NoProjection);
        };
        let viewport = ViewportState {
            container: map.container_size(),
            zoom: map.zoom(),
            bounds,
            anchor,
        };

        let resized = self.propagate_resize(viewport.container, renderer);

        let dataset = store.all();
        if dataset.points.is_empty() {
            let data = RenderData::empty(dataset.min, dataset.max);
            renderer.set_data(&data);
            return SyncOutcome::Pushed(SyncReport {
                anchor,
                culled: 0,
                resized,
                data,
            });
        }

        let multiplier = if config.scale_radius {
            ViewportProjector::scale_for_zoom(viewport.zoom)
        } else {
            1.0
        };
        let fallback_radius = config.fallback_radius();

        // Local minimum starts at 0 rather than at the first visible value, so an
        // all-positive view still reports 0 and an all-negative one reports its true min.
        let mut local_min = 0.0_f64;
        let mut local_max = 0.0_f64;
        let mut culled = 0;
        let mut points = Vec::with_capacity(dataset.points.len());

        for point in dataset.points {
            if !viewport.bounds.contains(&point.lat_lng) {
                culled += 1;
                continue;
            }
            let Some((x, y)) = projector.to_pixel(&point.lat_lng, viewport.anchor) else {
                culled += 1;
                continue;
            };

            local_max = local_max.max(point.value);
            local_min = local_min.min(point.value);

            points.push(ProjectedPoint {
                x,
                y,
                value: point.value,
                radius: point.radius.unwrap_or(fallback_radius) * multiplier,
            });
        }

        let (min, max) = if config.use_local_extrema {
            (local_min, local_max)
        } else {
            (dataset.min, dataset.max)
        };

        let data = RenderData { min, max, data: points };
        renderer.set_data(&data);

        SyncOutcome::Pushed(SyncReport {
            anchor,
            culled,
            resized,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            config::RendererOptions,
            geo::{LatLng, LatLngBounds},
        },
        plugins::heatmap::store::GeoDataPoint,
        traits::{SubscriptionId, ViewportSubscription},
    };
    use crossbeam_channel::unbounded;

    /// Flat projection: one degree is ten pixels, y grows southwards
    struct FlatMap {
        bounds: Option<LatLngBounds>,
        zoom: i32,
        size: ContainerSize,
    }

    impl HostMap for FlatMap {
        fn bounds(&self) -> Option<LatLngBounds> {
            self.bounds
        }
        fn zoom(&self) -> i32 {
            self.zoom
        }
        fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Option<Point> {
            Some(Point::new(lat_lng.lng * 10.0, -lat_lng.lat * 10.0))
        }
        fn container_size(&self) -> ContainerSize {
            self.size
        }
        fn subscribe_viewport_changed(&self) -> ViewportSubscription {
            let (_sender, events) = unbounded();
            ViewportSubscription { id: 0, events }
        }
        fn unsubscribe_viewport_changed(&self, _id: SubscriptionId) {}
    }

    #[derive(Default)]
    struct Capture {
        data: Vec<RenderData>,
        dimensions: Vec<ContainerSize>,
    }

    impl HeatmapRenderer for Capture {
        fn set_data(&mut self, data: &RenderData) {
            self.data.push(data.clone());
        }
        fn configure(&mut self, _options: &RendererOptions) {}
        fn set_dimensions(&mut self, size: ContainerSize) {
            self.dimensions.push(size);
        }
    }

    fn map() -> FlatMap {
        FlatMap {
            bounds: Some(LatLngBounds::from_coords(0.0, 0.0, 10.0, 10.0)),
            zoom: 2,
            size: ContainerSize::new(100, 100),
        }
    }

    fn store_with(points: &[(f64, f64, f64)]) -> GeoPointStore {
        let mut store = GeoPointStore::new();
        store.replace_points(
            -5.0,
            50.0,
            points
                .iter()
                .map(|&(lat, lng, value)| GeoDataPoint::new(LatLng::new(lat, lng), value))
                .collect(),
        );
        store
    }

    #[test]
    fn test_deferred_without_bounds() {
        let mut map = map();
        map.bounds = None;
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);

        let outcome = sync.sync(
            &map,
            &store_with(&[(1.0, 1.0, 1.0)]),
            &HeatmapOverlayConfig::default(),
            &mut renderer,
        );

        assert_eq!(outcome, SyncOutcome::Deferred(DeferReason::NoBounds));
        assert!(renderer.data.is_empty());
    }

    #[test]
    fn test_projects_relative_to_north_west() {
        let map = map();
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);

        let outcome = sync.sync(
            &map,
            &store_with(&[(5.0, 3.0, 7.0)]),
            &HeatmapOverlayConfig::default(),
            &mut renderer,
        );

        let report = outcome.report().unwrap();
        assert_eq!(report.anchor, Point::new(0.0, -100.0));
        assert_eq!(
            report.data.data,
            vec![ProjectedPoint {
                x: 30,
                y: 50,
                value: 7.0,
                radius: 2.0
            }]
        );
        assert_eq!((report.data.min, report.data.max), (-5.0, 50.0));
    }

    #[test]
    fn test_culls_outside_points() {
        let map = map();
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);

        let outcome = sync.sync(
            &map,
            &store_with(&[(5.0, 5.0, 1.0), (11.0, 5.0, 99.0), (5.0, -1.0, 99.0)]),
            &HeatmapOverlayConfig::default().with_local_extrema(true),
            &mut renderer,
        );

        let report = outcome.report().unwrap();
        assert_eq!(report.culled, 2);
        assert_eq!(report.data.data.len(), 1);
        assert_eq!(report.data.max, 1.0);
    }

    #[test]
    fn test_local_min_is_clamped_at_zero() {
        let map = map();
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);
        let config = HeatmapOverlayConfig::default().with_local_extrema(true);

        let positive = sync.sync(
            &map,
            &store_with(&[(1.0, 1.0, 4.0), (2.0, 2.0, 6.0)]),
            &config,
            &mut renderer,
        );
        let data = &positive.report().unwrap().data;
        assert_eq!((data.min, data.max), (0.0, 6.0));

        let negative = sync.sync(
            &map,
            &store_with(&[(1.0, 1.0, -4.0), (2.0, 2.0, -6.0)]),
            &config,
            &mut renderer,
        );
        let data = &negative.report().unwrap().data;
        assert_eq!((data.min, data.max), (-6.0, 0.0));
    }

    #[test]
    fn test_radius_scales_with_zoom() {
        let map = map();
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);
        let mut store = GeoPointStore::new();
        store.append_points([
            GeoDataPoint::new(LatLng::new(1.0, 1.0), 1.0),
            GeoDataPoint::new(LatLng::new(1.0, 1.0), 1.0).with_radius(3.0),
        ]);

        let outcome = sync.sync(
            &map,
            &store,
            &HeatmapOverlayConfig::default()
                .with_radius(1.5)
                .with_scale_radius(true),
            &mut renderer,
        );

        let radii: Vec<f64> = outcome
            .report()
            .unwrap()
            .data
            .data
            .iter()
            .map(|p| p.radius)
            .collect();
        assert_eq!(radii, vec![6.0, 12.0]);
    }

    #[test]
    fn test_empty_store_still_pushes() {
        let map = map();
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);

        sync.sync(
            &map,
            &GeoPointStore::new(),
            &HeatmapOverlayConfig::default(),
            &mut renderer,
        );

        assert_eq!(renderer.data, vec![RenderData::empty(0.0, 1.0)]);
    }

    #[test]
    fn test_resize_propagates_before_points() {
        let mut map = map();
        let mut renderer = Capture::default();
        let mut sync = DataSynchronizer::new(map.size);
        map.size = ContainerSize::new(200, 150);

        let outcome = sync.sync(
            &map,
            &GeoPointStore::new(),
            &HeatmapOverlayConfig::default(),
            &mut renderer,
        );

        assert!(outcome.report().unwrap().resized);
        assert_eq!(renderer.dimensions, vec![ContainerSize::new(200, 150)]);
        assert_eq!(sync.last_size(), ContainerSize::new(200, 150));

        sync.sync(
            &map,
            &GeoPointStore::new(),
            &HeatmapOverlayConfig::default(),
            &mut renderer,
        );
        assert_eq!(renderer.dimensions.len(), 1);
    }
}
