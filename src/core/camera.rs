//! Camera values the native control does not track itself.
//!
//! Every map view owns one [`CameraState`]. The zoom operations here only
//! compute the new stored values; [`MapView`](crate::core::map::MapView) is
//! responsible for pushing the result to the native control.

use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ZOOM_IN_FLOOR, ZOOM_OUT_COLLAPSE};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    /// Last commanded (or synchronised) zoom level
    pub zoom_level: f64,
    /// Always 0 after a command; only a resync can store something else
    pub pitch: f64,
    /// Always 0 after a command; only a resync can store something else
    pub heading: f64,
    pub min_zoom_level: f64,
    pub max_zoom_level: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom_level: 0.0,
            pitch: 0.0,
            heading: 0.0,
            min_zoom_level: DEFAULT_MIN_ZOOM,
            max_zoom_level: DEFAULT_MAX_ZOOM,
        }
    }
}

impl CameraState {
    pub fn new(zoom_level: f64, min_zoom_level: f64, max_zoom_level: f64) -> Result<Self> {
        let mut camera = Self {
            zoom_level,
            ..Self::default()
        };
        camera.set_zoom_limits(min_zoom_level, max_zoom_level)?;
        Ok(camera)
    }

    /// Pitch and heading are forced to zero: the camera is strictly 2D.
    pub fn flatten(&mut self) {
        self.pitch = 0.0;
        self.heading = 0.0;
    }

    /// Clamps a zoom level into `[min_zoom_level, max_zoom_level]`.
    pub fn clamp_zoom(&self, zoom_level: f64) -> f64 {
        if zoom_level < self.min_zoom_level {
            self.min_zoom_level
        } else if zoom_level > self.max_zoom_level {
            self.max_zoom_level
        } else {
            zoom_level
        }
    }

    /// Replaces the zoom limits. The stored zoom is left where it is and is
    /// clamped by the next zoom operation.
    pub fn set_zoom_limits(&mut self, min_zoom_level: f64, max_zoom_level: f64) -> Result<()> {
        if !min_zoom_level.is_finite()
            || !max_zoom_level.is_finite()
            || min_zoom_level > max_zoom_level
        {
            return Err(MapError::InvalidZoomLimits {
                min: min_zoom_level,
                max: max_zoom_level,
            });
        }
        self.min_zoom_level = min_zoom_level;
        self.max_zoom_level = max_zoom_level;
        Ok(())
    }

    /// Steps one level in. Returns `false` when the guard rejects the step.
    ///
    /// The guard compares `zoom - 1` against the maximum, and anything below
    /// zoom 2 is lifted to 2 before stepping, so zoom 1 goes straight to 3.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom_level - 1.0 > self.max_zoom_level {
            return false;
        }
        if self.zoom_level < ZOOM_IN_FLOOR {
            self.zoom_level = ZOOM_IN_FLOOR;
        }
        self.zoom_level += 1.0;
        true
    }

    /// Steps one level out. Returns `false` when the step would pass the minimum.
    ///
    /// Once the result rounds to 2 or less the camera jumps to zoom 0.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom_level - 1.0 < self.min_zoom_level {
            return false;
        }
        self.zoom_level -= 1.0;
        if self.zoom_level.round() <= ZOOM_OUT_COLLAPSE {
            self.zoom_level = 0.0;
        }
        true
    }

    /// Clamped absolute zoom. A non-finite request keeps the current zoom.
    pub fn zoom_to(&mut self, zoom_level: f64) {
        if !zoom_level.is_finite() {
            log::warn!("ignoring non-finite zoom level {}", zoom_level);
            return;
        }
        self.zoom_level = self.clamp_zoom(zoom_level);
    }

    /// Clamped relative zoom. A non-finite delta keeps the current zoom.
    pub fn zoom_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite zoom delta {}", delta);
            return;
        }
        self.zoom_level = self.clamp_zoom(self.zoom_level + delta);
    }

    /// Raw resync after the user moved the native control directly. No clamping.
    pub fn update_stored_values(&mut self, zoom_level: f64, pitch: f64, heading: f64) {
        self.zoom_level = zoom_level;
        self.pitch = pitch;
        self.heading = heading;
    }
}
