//! Core constants for the Web-Mercator pixel space and zoom conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom level at which the pixel space is anchored.
pub const REFERENCE_ZOOM: f64 = 21.0;

/// Half the width of the world in pixels at [`REFERENCE_ZOOM`]
/// (`256 * 2^21 / 2`).
pub const MERCATOR_OFFSET: f64 =
    TILE_SIZE as f64 * (1_u64 << REFERENCE_ZOOM as u32) as f64 / 2.0;

/// World radius in pixels at [`REFERENCE_ZOOM`].
pub const MERCATOR_RADIUS: f64 = MERCATOR_OFFSET / std::f64::consts::PI;

/// Latitude where the square Web-Mercator world ends.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Default lower zoom limit for a fresh camera.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;

/// Default upper zoom limit for a fresh camera.
pub const DEFAULT_MAX_ZOOM: f64 = 21.0;

/// Offset subtracted from the zoom before the naive span formula is applied.
/// Aligns `span_for_zoom` with the view-size aware span at mid zooms.
pub const SPAN_ZOOM_OFFSET: f64 = 0.66;

/// Zoom-in snaps anything below this up to it before stepping.
pub const ZOOM_IN_FLOOR: f64 = 2.0;

/// Zoom-out collapses to 0 once the rounded result sinks to this value.
pub const ZOOM_OUT_COLLAPSE: f64 = 2.0;
