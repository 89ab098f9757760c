//! UI module - HUD and result banner.

mod hud;
mod plugin;

pub use hud::bar_color;
pub use plugin::UiPlugin;
