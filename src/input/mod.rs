pub mod commands;

// Re-export the essential types
pub use commands::{MapCommand, MapReply, MethodCall, SetBoundsRequest, SetCenterRequest};
