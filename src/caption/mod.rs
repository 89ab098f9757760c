//! Caption module - optional commentary on the current frame from a
//! remote vision model.

mod client;
mod error;
mod plugin;
mod settings;

pub use client::{encode_png, extract_text, request_body, CaptionClient};
pub use error::CaptionError;
pub use plugin::{CaptionCooldown, CaptionDisplay, CaptionPlugin};
pub use settings::CaptionSettings;
