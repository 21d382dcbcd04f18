pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod headless;
pub mod map;
pub mod projection;
pub mod registry;
pub mod viewport;
