//! # native-map-bridge
//!
//! Zoom and region arithmetic for driving a native map control from a
//! cross-platform map widget framework.
//!
//! The host framework speaks in slippy-map zoom levels, while a native control
//! speaks in geographic regions (a center plus a latitude/longitude span). This
//! crate converts between the two through a Web-Mercator pixel space anchored at
//! zoom 21, and keeps the per-view camera values (zoom, pitch, heading, zoom
//! limits) the native control does not track on its own.

pub mod core;
pub mod input;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::{Bounds, EdgePadding},
    camera::CameraState,
    config::MapViewOptions,
    geo::{CoordinateRegion, CoordinateSpan, LatLng, LatLngBounds, Point, Size},
    headless::HeadlessMapControl,
    map::{CameraUpdate, MapView},
    registry::{MapViewId, MapViewRegistry},
};

pub use input::commands::{MapCommand, MapReply};

pub use traits::MapControl;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom scale {value}: must be a positive, finite ratio")]
    InvalidZoomScale { value: f64 },

    #[error("Invalid zoom limits: min {min} must not exceed max {max}")]
    InvalidZoomLimits { min: f64, max: f64 },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument `{field}` for command `{command}`")]
    MissingArgument {
        command: &'static str,
        field: &'static str,
    },

    #[error("Unknown map view: {0}")]
    UnknownMapView(u64),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
