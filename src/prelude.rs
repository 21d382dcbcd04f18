//! Prelude module for common native-map-bridge types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use native_map_bridge::prelude::*;`

pub use crate::core::{
    bounds::{Bounds, EdgePadding},
    camera::CameraState,
    config::MapViewOptions,
    geo::{CoordinateRegion, CoordinateSpan, LatLng, LatLngBounds, Point, Size},
    headless::{ControlCall, HeadlessMapControl},
    map::{CameraUpdate, MapView},
    projection::{
        latitude_to_pixel_y, log_base, longitude_to_pixel_x, pixel_x_to_longitude,
        pixel_y_to_latitude, round_to_two_decimals,
    },
    registry::{MapViewId, MapViewRegistry},
    viewport::{calculated_zoom_level, span_for_zoom, span_for_zoom_in_viewport, visible_region},
};

pub use crate::input::{MapCommand, MapReply, MethodCall, SetBoundsRequest, SetCenterRequest};

pub use crate::traits::MapControl;

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
