//! Rendering module - arena scene and fighter drawing.

mod draw;
mod plugin;
mod pose;
pub mod visual_config;

pub use draw::FighterBody;
pub use plugin::RenderingPlugin;
pub use pose::{fighter_pose, swing_extension, FighterPose, Limb, BODY_SIZE};
pub use visual_config::ArenaVisuals;
