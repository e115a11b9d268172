//! Geographic point storage
//!
//! Raw entries arrive as JSON objects whose latitude, longitude and value keys are
//! named by the overlay config. They are parsed once into [`GeoDataPoint`]s and kept
//! alongside the declared extrema.

use crate::{
    core::{
        config::HeatmapOverlayConfig,
        constants::{DEFAULT_MAX, DEFAULT_MIN, RADIUS_FIELD},
        geo::LatLng,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoDataPoint {
    pub lat_lng: LatLng,
    pub value: f64,
    /// Per-point radius; `None` falls back to the configured radius
    pub radius: Option<f64>,
}

impl GeoDataPoint {
    pub fn new(lat_lng: LatLng, value: f64) -> Self {
        Self {
            lat_lng,
            value,
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = usable_radius(radius);
        self
    }
}

/// A dataset as handed over by the embedding code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl HeatmapData {
    pub fn new(min: f64, max: f64, data: Vec<Value>) -> Self {
        Self { min, max, data }
    }
}

/// Read-only view of the store contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dataset<'a> {
    pub min: f64,
    pub max: f64,
    pub points: &'a [GeoDataPoint],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoPointStore {
    points: Vec<GeoDataPoint>,
    min: f64,
    max: f64,
}

impl GeoPointStore {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }

    /// Replaces the whole dataset. Nothing changes if any entry is malformed.
    pub fn replace(&mut self, data: &HeatmapData, config: &HeatmapOverlayConfig) -> Result<()> {
        let points = data
            .data
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_entry(entry, index, config))
            .collect::<Result<Vec<_>>>()?;

        self.replace_points(data.min, data.max, points);
        Ok(())
    }

    /// Replaces the whole dataset with already-parsed points
    pub fn replace_points(&mut self, min: f64, max: f64, points: Vec<GeoDataPoint>) {
        self.min = min;
        self.max = max;
        self.points = points;
    }

    /// Appends a single entry or an arbitrarily nested list of entries, widening the
    /// stored extrema. Returns how many points were added.
    pub fn append(&mut self, entries: &Value, config: &HeatmapOverlayConfig) -> Result<usize> {
        let mut flat = Vec::new();
        flatten(entries, &mut flat);

        let points = flat
            .into_iter()
            .enumerate()
            .map(|(index, entry)| parse_entry(entry, index, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.append_points(points))
    }

    /// Appends already-parsed points, widening the stored extrema
    pub fn append_points(&mut self, points: impl IntoIterator<Item = GeoDataPoint>) -> usize {
        let before = self.points.len();
        for point in points {
            self.max = self.max.max(point.value);
            self.min = self.min.min(point.value);
            self.points.push(point);
        }
        self.points.len() - before
    }

    pub fn all(&self) -> Dataset<'_> {
        Dataset {
            min: self.min,
            max: self.max,
            points: &self.points,
        }
    }

    /// Stored `(min, max)`
    pub fn extrema(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drops every point and resets the extrema to their initial values
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for GeoPointStore {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| flatten(item, out)),
        other => out.push(other),
    }
}

/// A zero or non-finite radius counts as "no radius"
fn usable_radius(radius: f64) -> Option<f64> {
    (radius != 0.0 && radius.is_finite()).then_some(radius)
}

fn parse_entry(entry: &Value, index: usize, config: &HeatmapOverlayConfig) -> Result<GeoDataPoint> {
    let object = entry.as_object().ok_or_else(|| Error::MalformedRecord {
        index,
        reason: format!("expected an object, got {entry}"),
    })?;

    let number = |field: &str| -> Result<f64> {
        object
            .get(field)
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::MalformedRecord {
                index,
                reason: format!("missing numeric field `{field}`"),
            })
    };

    let lat = number(config.lat_field.as_str())?;
    let lng = number(config.lng_field.as_str())?;
    let value = number(config.value_field.as_str())?;

    let radius = match object.get(RADIUS_FIELD) {
        None | Some(Value::Null) => None,
        Some(raw) => {
            let radius = raw.as_f64().ok_or_else(|| Error::MalformedRecord {
                index,
                reason: format!("`{RADIUS_FIELD}` is not a number"),
            })?;
            usable_radius(radius)
        }
    };

    Ok(GeoDataPoint {
        lat_lng: LatLng::new(lat, lng),
        value,
        radius,
    })
}
