//! Caption settings, loaded as part of the fighter config.

use serde::Deserialize;

/// How and how often to ask for a caption.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    pub enabled: bool,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub endpoint: String,
    pub model: String,
    pub prompt: String,
    /// Minimum seconds between requests.
    pub cooldown_secs: f32,
    /// How long a caption stays on screen.
    pub display_secs: f32,
    pub timeout_secs: u64,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.0-flash".to_string(),
            prompt: "You are a ringside commentator for a retro 3D fighting game. \
                     Describe what is happening in this frame in one or two short, lively sentences."
                .to_string(),
            cooldown_secs: 10.0,
            display_secs: 8.0,
            timeout_secs: 20,
        }
    }
}
