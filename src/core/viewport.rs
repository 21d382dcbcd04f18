//! Zoom level ⇄ viewport conversions.
//!
//! All of these work in the reference-zoom pixel space: a view of
//! `size` screen points at zoom `z` covers `size * 2^(21 - z)` world pixels.

use crate::core::constants::{REFERENCE_ZOOM, SPAN_ZOOM_OFFSET};
use crate::core::geo::{CoordinateSpan, LatLng, LatLngBounds, Point, Size};
use crate::core::projection::{
    log_base, longitude_to_pixel_x, pixel_x_to_longitude, pixel_y_to_latitude,
    round_to_two_decimals,
};
use crate::Result;

/// Square span for a zoom level that ignores the view size.
///
/// `360 / 2^clamp(zoom - 0.66, 0, 21)` degrees on both axes.
pub fn span_for_zoom(zoom_level: f64) -> CoordinateSpan {
    let corrected = (zoom_level - SPAN_ZOOM_OFFSET).clamp(0.0, REFERENCE_ZOOM);
    let delta = 360.0 / 2_f64.powf(corrected);
    CoordinateSpan::new(delta, delta)
}

/// World-pixel rectangle a view of `size` covers around `center` at `zoom_level`.
fn scaled_footprint(center: &LatLng, zoom_level: f64, size: &Size) -> (Point, f64, f64) {
    let center_pixel = center.to_pixel();
    let zoom_scale = 2_f64.powf(REFERENCE_ZOOM - zoom_level);

    let scaled_width = size.width * zoom_scale;
    let scaled_height = size.height * zoom_scale;

    let top_left = Point::new(
        center_pixel.x - scaled_width / 2.0,
        center_pixel.y - scaled_height / 2.0,
    );
    (top_left, scaled_width, scaled_height)
}

/// View-size aware span for an integer zoom level.
///
/// The latitude delta comes out as `-(south - north)` measured on the
/// pixel-space corners, which is what consumers of this span expect.
pub fn span_for_zoom_in_viewport(center: &LatLng, zoom_level: i32, size: &Size) -> CoordinateSpan {
    let (top_left, scaled_width, scaled_height) =
        scaled_footprint(center, f64::from(zoom_level), size);

    let min_lng = pixel_x_to_longitude(top_left.x);
    let max_lng = pixel_x_to_longitude(top_left.x + scaled_width);
    let longitude_delta = max_lng - min_lng;

    let min_lat = pixel_y_to_latitude(top_left.y);
    let max_lat = pixel_y_to_latitude(top_left.y + scaled_height);
    let latitude_delta = -(max_lat - min_lat);

    CoordinateSpan::new(latitude_delta, longitude_delta)
}

/// Geographic rectangle shown by a view of `size` around `center`.
///
/// A view that has not been laid out yet reports the all-zero rectangle.
pub fn visible_region(center: &LatLng, zoom_level: f64, size: &Size) -> LatLngBounds {
    if size.is_zero() {
        return LatLngBounds::zero();
    }

    let (top_left, scaled_width, scaled_height) = scaled_footprint(center, zoom_level, size);

    let west = pixel_x_to_longitude(top_left.x);
    let north = pixel_y_to_latitude(top_left.y);
    let east = pixel_x_to_longitude(top_left.x + scaled_width);
    let south = pixel_y_to_latitude(top_left.y + scaled_height);

    LatLngBounds::new(LatLng::new(south, west), LatLng::new(north, east))
}

/// Recovers the zoom level from what the native control currently shows.
///
/// The longitude span is measured in world pixels and compared with the
/// view width; `21 - log2(ratio)` is the zoom, rounded to two decimals.
pub fn calculated_zoom_level(center: &LatLng, span: &CoordinateSpan, size: &Size) -> Result<f64> {
    let center_x = longitude_to_pixel_x(center.lng);
    let left_x = longitude_to_pixel_x(center.lng - span.longitude_delta / 2.0);
    let pixel_space_width = (center_x - left_x).abs() * 2.0;

    let zoom_scale = pixel_space_width / size.width;
    let zoom_exponent = log_base(zoom_scale, 2.0)?;

    Ok(round_to_two_decimals(REFERENCE_ZOOM - zoom_exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    fn approx(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_span_for_zoom_world() {
        let span = span_for_zoom(0.0);
        assert_eq!(span.latitude_delta, 360.0);
        assert_eq!(span.longitude_delta, 360.0);

        // anything up to the 0.66 offset still shows the whole world
        assert_eq!(span_for_zoom(0.66).latitude_delta, 360.0);
        assert_eq!(span_for_zoom(-5.0).longitude_delta, 360.0);
    }

    #[test]
    fn test_span_for_zoom_halves_per_level() {
        let a = span_for_zoom(5.0);
        let b = span_for_zoom(6.0);
        assert!(approx(a.latitude_delta / b.latitude_delta, 2.0, 1e-12));
        assert!(approx(
            a.latitude_delta,
            360.0 / 2_f64.powf(5.0 - 0.66),
            1e-12
        ));
    }

    #[test]
    fn test_span_for_zoom_upper_clamp() {
        let floor = 360.0 / 2_f64.powf(21.0);
        assert_eq!(span_for_zoom(22.0).latitude_delta, floor);
        assert_eq!(span_for_zoom(40.0).latitude_delta, floor);
    }

    #[test]
    fn test_span_in_viewport_equator() {
        // 256 points wide at zoom 0 is exactly one world
        let span = span_for_zoom_in_viewport(&LatLng::new(0.0, 0.0), 0, &Size::new(256.0, 256.0));
        assert!(approx(span.longitude_delta, 360.0, 1e-6));
    }

    #[test]
    fn test_span_in_viewport_keeps_negated_latitude_delta() {
        let center = LatLng::new(45.0, 7.0);
        let size = Size::new(400.0, 300.0);
        let span = span_for_zoom_in_viewport(&center, 10, &size);

        let region = visible_region(&center, 10.0, &size);
        let north_minus_south = region.north_east.lat - region.south_west.lat;

        assert!(span.latitude_delta > 0.0);
        assert!(approx(span.latitude_delta, north_minus_south, 1e-9));
        assert!(approx(
            span.longitude_delta,
            region.north_east.lng - region.south_west.lng,
            1e-9
        ));
    }

    #[test]
    fn test_visible_region_zero_size() {
        let region = visible_region(&LatLng::new(48.8, 2.3), 12.0, &Size::new(0.0, 0.0));
        assert_eq!(region, LatLngBounds::zero());
        assert_eq!(
            serde_json::to_value(region).unwrap(),
            serde_json::json!({ "northeast": [0.0, 0.0], "southwest": [0.0, 0.0] })
        );
    }

    #[test]
    fn test_visible_region_contains_center() {
        let center = LatLng::new(37.7749, -122.4194);
        let region = visible_region(&center, 12.0, &Size::new(390.0, 844.0));

        assert!(region.contains(&center));
        assert!(region.north_east.lat > region.south_west.lat);
        assert!(region.north_east.lng > region.south_west.lng);
        // longitudes are linear, so the center stays centred on that axis
        assert!(approx(region.center().lng, center.lng, 1e-9));
    }

    #[test]
    fn test_visible_region_shrinks_with_zoom() {
        let center = LatLng::new(51.5, -0.12);
        let size = Size::new(320.0, 480.0);
        let wide = visible_region(&center, 8.0, &size).span();
        let close = visible_region(&center, 9.0, &size).span();
        assert!(approx(wide.longitude_delta / close.longitude_delta, 2.0, 1e-9));
    }

    #[test]
    fn test_calculated_zoom_inverts_viewport_span() {
        let center = LatLng::new(-33.86, 151.2);
        let size = Size::new(375.0, 667.0);
        for zoom in [3, 8, 12, 17] {
            let span = span_for_zoom_in_viewport(&center, zoom, &size);
            let calculated = calculated_zoom_level(&center, &span, &size).unwrap();
            assert!(approx(calculated, f64::from(zoom), 0.011), "zoom {zoom} -> {calculated}");
        }
    }

    #[test]
    fn test_calculated_zoom_rejects_degenerate_input() {
        let center = LatLng::new(0.0, 0.0);
        let no_span = CoordinateSpan::new(0.0, 0.0);
        assert!(matches!(
            calculated_zoom_level(&center, &no_span, &Size::new(100.0, 100.0)),
            Err(MapError::InvalidZoomScale { .. })
        ));

        let span = CoordinateSpan::new(10.0, 10.0);
        assert!(calculated_zoom_level(&center, &span, &Size::new(0.0, 0.0)).is_err());
    }
}
