//! Player module - keyboard bindings and input latching.

mod controls;
mod input;
mod plugin;

pub use controls::{ControlMap, Controls};
pub use input::{read_intent, ControlSet, LatchedIntents};
pub use plugin::ControlsPlugin;
