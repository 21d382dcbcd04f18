//! In-process stand-in for a native map control.
//!
//! Renders nothing; it keeps the region it was last asked to show and records
//! every call so hosts without a native view (tests, the command-line driver)
//! can run the engine end to end.

use crate::core::{
    bounds::{Bounds, EdgePadding},
    geo::{CoordinateRegion, CoordinateSpan, LatLng, Point, Size},
};
use crate::traits::MapControl;
use serde::Serialize;

/// A call the engine made on the control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum ControlCall {
    SetRegion {
        region: CoordinateRegion,
        animated: bool,
    },
    SetVisibleMapRect {
        rect: Bounds,
        padding: EdgePadding,
        animated: bool,
    },
    SetCameraOrientation {
        pitch: f64,
        heading: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMapControl {
    region: CoordinateRegion,
    size: Size,
    pitch: f64,
    heading: f64,
    calls: Vec<ControlCall>,
}

impl HeadlessMapControl {
    /// A control already laid out at `size`, showing the whole world.
    pub fn new(size: Size) -> Self {
        Self {
            region: CoordinateRegion::new(LatLng::new(0.0, 0.0), CoordinateSpan::new(180.0, 360.0)),
            size,
            pitch: 0.0,
            heading: 0.0,
            calls: Vec::new(),
        }
    }

    /// Moves the center without recording a call, keeping the current span.
    pub fn set_center(&mut self, center: LatLng) {
        self.region.center = center;
    }

    /// Simulates a user gesture tilting or rotating the native camera.
    pub fn gesture_orientation(&mut self, pitch: f64, heading: f64) {
        self.pitch = pitch;
        self.heading = heading;
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn calls(&self) -> &[ControlCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<ControlCall> {
        std::mem::take(&mut self.calls)
    }

    /// Region that fits `rect` inside the view once `padding` is removed.
    fn region_for_map_rect(&self, rect: &Bounds, padding: &EdgePadding) -> CoordinateRegion {
        let center = rect.center();
        let available_width = self.size.width - padding.horizontal();
        let available_height = self.size.height - padding.vertical();

        let (width, height) = if available_width > 0.0 && available_height > 0.0 {
            let scale = (rect.width() / available_width).max(rect.height() / available_height);
            if scale > 0.0 {
                (self.size.width * scale, self.size.height * scale)
            } else {
                return CoordinateRegion::new(center.to_lat_lng(), self.region.span);
            }
        } else {
            (rect.width(), rect.height())
        };

        let footprint = Bounds::from_center_and_size(center, width, height);
        let north_west = Point::new(footprint.min.x, footprint.min.y).to_lat_lng();
        let south_east = Point::new(footprint.max.x, footprint.max.y).to_lat_lng();

        CoordinateRegion::new(
            center.to_lat_lng(),
            CoordinateSpan::new(
                north_west.lat - south_east.lat,
                south_east.lng - north_west.lng,
            ),
        )
    }
}

impl Default for HeadlessMapControl {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl MapControl for HeadlessMapControl {
    fn center_coordinate(&self) -> LatLng {
        self.region.center
    }

    fn region(&self) -> CoordinateRegion {
        self.region
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_region(&mut self, region: CoordinateRegion, animated: bool) {
        self.region = region;
        self.calls.push(ControlCall::SetRegion { region, animated });
    }

    fn set_visible_map_rect(&mut self, rect: Bounds, padding: EdgePadding, animated: bool) {
        self.region = self.region_for_map_rect(&rect, &padding);
        self.calls.push(ControlCall::SetVisibleMapRect {
            rect,
            padding,
            animated,
        });
    }

    fn set_camera_orientation(&mut self, pitch: f64, heading: f64) {
        self.pitch = pitch;
        self.heading = heading;
        self.calls
            .push(ControlCall::SetCameraOrientation { pitch, heading });
    }
}
