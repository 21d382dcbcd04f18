//! Per-view configuration
//!
//! Options are usually delivered by the host framework as JSON when the
//! native view is created; every field is optional and falls back to the
//! engine defaults.

use crate::core::camera::CameraState;
use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapViewOptions {
    pub min_zoom_level: f64,
    pub max_zoom_level: f64,
    /// Stored zoom before the first command arrives
    pub initial_zoom_level: f64,
    /// Used by commands that do not say whether to animate
    pub animated: bool,
}

impl Default for MapViewOptions {
    fn default() -> Self {
        Self {
            min_zoom_level: DEFAULT_MIN_ZOOM,
            max_zoom_level: DEFAULT_MAX_ZOOM,
            initial_zoom_level: 0.0,
            animated: true,
        }
    }
}

impl MapViewOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        CameraState::new(
            self.initial_zoom_level,
            self.min_zoom_level,
            self.max_zoom_level,
        )
        .map(|_| ())
    }

    /// Fresh camera for a view created with these options.
    pub fn camera(&self) -> Result<CameraState> {
        CameraState::new(
            self.initial_zoom_level,
            self.min_zoom_level,
            self.max_zoom_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    #[test]
    fn test_defaults_match_camera() {
        let camera = MapViewOptions::default().camera().unwrap();
        assert_eq!(camera, CameraState::default());
    }

    #[test]
    fn test_partial_json() {
        let options = MapViewOptions::from_json_str(r#"{ "maxZoomLevel": 18, "animated": false }"#)
            .unwrap();
        assert_eq!(options.max_zoom_level, 18.0);
        assert_eq!(options.min_zoom_level, 0.0);
        assert!(!options.animated);
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let result = MapViewOptions::from_json_str(r#"{ "minZoomLevel": 10, "maxZoomLevel": 4 }"#);
        assert!(matches!(result, Err(MapError::InvalidZoomLimits { .. })));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = MapViewOptions::from_json_str("{ minZoomLevel: 1 ");
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }
}
