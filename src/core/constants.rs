//! Core constants shared by the overlay and the headless host map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Default point radius in pixels, expressed at zoom level 0 when radius scaling is on.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Extrema an overlay starts with before any data arrives.
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 1.0;

/// Field names used to read raw entries when the config does not override them.
pub const DEFAULT_LAT_FIELD: &str = "lat";
pub const DEFAULT_LNG_FIELD: &str = "lng";
pub const DEFAULT_VALUE_FIELD: &str = "value";

/// Raw entry key carrying an optional per-point radius.
pub const RADIUS_FIELD: &str = "radius";

/// Web Mercator latitude limit.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Web Mercator earth radius in meters (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6378137.0;
