//! Seams between the zoom/region engine and the outside world

use crate::core::{
    bounds::{Bounds, EdgePadding},
    geo::{CoordinateRegion, LatLng, Size},
};

/// Capabilities the engine needs from a native map control.
///
/// Implementations only render; they never validate. Every method is called
/// from the single thread that owns the [`MapView`](crate::core::map::MapView).
pub trait MapControl {
    /// Geographic center of what is currently rendered
    fn center_coordinate(&self) -> LatLng;

    /// Center and span of what is currently rendered
    fn region(&self) -> CoordinateRegion;

    /// Size of the view in screen points; zero until laid out
    fn size(&self) -> Size;

    /// Center the viewport on `region`. `animated` only affects rendering.
    fn set_region(&mut self, region: CoordinateRegion, animated: bool);

    /// Show a pixel-space map rect inset by `padding` screen points.
    fn set_visible_map_rect(&mut self, rect: Bounds, padding: EdgePadding, animated: bool);

    /// Set the 3D orientation of the native camera.
    fn set_camera_orientation(&mut self, pitch: f64, heading: f64);
}

impl<T: MapControl + ?Sized> MapControl for Box<T> {
    fn center_coordinate(&self) -> LatLng {
        (**self).center_coordinate()
    }

    fn region(&self) -> CoordinateRegion {
        (**self).region()
    }

    fn size(&self) -> Size {
        (**self).size()
    }

    fn set_region(&mut self, region: CoordinateRegion, animated: bool) {
        (**self).set_region(region, animated)
    }

    fn set_visible_map_rect(&mut self, rect: Bounds, padding: EdgePadding, animated: bool) {
        (**self).set_visible_map_rect(rect, padding, animated)
    }

    fn set_camera_orientation(&mut self, pitch: f64, heading: f64) {
        (**self).set_camera_orientation(pitch, heading)
    }
}
