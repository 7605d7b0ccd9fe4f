// C3D rotation reader
// Main library entry point

pub mod core;
pub mod models;
pub mod utils;

// Re-export main types
pub use crate::core::error::{C3dError, Result};
pub use crate::core::format::{Group, Header, Matrix4, Parameter, ParameterValue, Resolved, RotationStream};
pub use crate::core::reader::MotionFile;
pub use crate::core::segments::Segment;
pub use models::inspect_model::InspectConfig;
pub use utils::conf_helper::load_config;
