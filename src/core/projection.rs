//! Web-Mercator conversions between geographic coordinates and the pixel space
//! anchored at [`REFERENCE_ZOOM`](crate::core::constants::REFERENCE_ZOOM).
//!
//! In that space the whole world is a square `2^21 * 256` pixels wide, with
//! the origin at the north-west corner. The functions here are exact inverses
//! of one another for longitudes in (-180, 180) and latitudes inside
//! ±[`MAX_LATITUDE`]; beyond that band latitudes are clamped so the poles do
//! not project to infinity.

use crate::core::constants::{MAX_LATITUDE, MERCATOR_OFFSET, MERCATOR_RADIUS};
use crate::{MapError, Result};
use std::f64::consts::PI;

/// Maps a longitude linearly onto the world width.
pub fn longitude_to_pixel_x(longitude: f64) -> f64 {
    MERCATOR_OFFSET + MERCATOR_RADIUS * longitude.to_radians()
}

/// Maps a latitude through the Mercator vertical projection onto the world height.
pub fn latitude_to_pixel_y(latitude: f64) -> f64 {
    let sin_lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians().sin();
    MERCATOR_OFFSET - MERCATOR_RADIUS * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / 2.0
}

pub fn pixel_x_to_longitude(pixel_x: f64) -> f64 {
    ((pixel_x - MERCATOR_OFFSET) / MERCATOR_RADIUS).to_degrees()
}

pub fn pixel_y_to_latitude(pixel_y: f64) -> f64 {
    (PI / 2.0 - 2.0 * ((pixel_y - MERCATOR_OFFSET) / MERCATOR_RADIUS).exp().atan()).to_degrees()
}

/// Logarithm of `value` in an arbitrary `base`.
///
/// Used to recover a zoom exponent from a pixel-scale ratio, so a
/// non-positive ratio is reported as [`MapError::InvalidZoomScale`].
pub fn log_base(value: f64, base: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MapError::InvalidZoomScale { value });
    }
    if !base.is_finite() || base <= 0.0 || base == 1.0 {
        return Err(MapError::InvalidZoomScale { value: base });
    }
    Ok(value.ln() / base.ln())
}

pub fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
