//! Blocking client for the `generateContent` vision endpoint.
//!
//! Calls block the current thread. The plugin runs them on the async
//! compute pool so the fight never waits on the network.

use std::env;
use std::io::Cursor;
use std::time::Duration;

use base64::Engine;
use bevy::prelude::*;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use serde_json::{json, Value};

use super::error::CaptionError;
use super::settings::CaptionSettings;

/// Configured connection to the caption service.
#[derive(Debug, Clone)]
pub struct CaptionClient {
    http: reqwest::blocking::Client,
    api_key: String,
    url: String,
    prompt: String,
}

impl CaptionClient {
    /// Build a client from settings, reading the key from the environment.
    pub fn from_env(settings: &CaptionSettings) -> Result<Self, CaptionError> {
        let api_key = env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CaptionError::MissingApiKey(settings.api_key_env.clone()))?;
        Self::new(settings, api_key)
    }

    pub fn new(settings: &CaptionSettings, api_key: String) -> Result<Self, CaptionError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            api_key,
            url: format!(
                "{}/{}:generateContent",
                settings.endpoint.trim_end_matches('/'),
                settings.model
            ),
            prompt: settings.prompt.clone(),
        })
    }

    /// Build the POST for one frame. The key travels in a header so it
    /// never appears in the request URL.
    pub fn build_request(&self, png: &[u8]) -> Result<reqwest::blocking::Request, CaptionError> {
        self.http
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body(&self.prompt, png))
            .build()
            .map_err(transport)
    }

    /// Ask the service to describe a PNG frame.
    pub fn describe(&self, png: &[u8]) -> Result<String, CaptionError> {
        let request = self.build_request(png)?;
        debug!("Sending {} byte frame for captioning", png.len());

        let response = self.http.execute(request).map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CaptionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().map_err(transport)?;
        extract_text(&json)
    }
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Wrap a transport failure without the request URL.
fn transport(e: reqwest::Error) -> CaptionError {
    CaptionError::Request(e.without_url())
}

/// JSON body: the prompt followed by the inline image.
pub fn request_body(prompt: &str, png: &[u8]) -> Value {
    let data = base64::engine::general_purpose::STANDARD.encode(png);
    json!({
        "contents": [{
            "parts": [
                {"text": prompt},
                {
                    "inlineData": {
                        "mimeType": "image/png",
                        "data": data
                    }
                }
            ]
        }]
    })
}

/// Pull the first candidate's text out of a response.
pub fn extract_text(response: &Value) -> Result<String, CaptionError> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(CaptionError::EmptyResponse)
}

/// Encode a captured frame as PNG, dropping alpha.
pub fn encode_png(frame: DynamicImage) -> Result<Vec<u8>, CaptionError> {
    let rgb = frame.to_rgb8();
    let mut bytes = Cursor::new(Vec::new());
    PngEncoder::new(&mut bytes)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| CaptionError::Encode(e.to_string()))?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_prompt_and_image() {
        let body = request_body("describe", &[1, 2, 3]);
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "describe");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "AQID");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": "  Blue lands a kick!\n"}]}}]
        });
        assert_eq!(extract_text(&response).unwrap(), "Blue lands a kick!");
    }

    #[test]
    fn blank_or_missing_text_is_empty_response() {
        let blank = json!({"candidates": [{"content": {"parts": [{"text": "   "}]}}]});
        assert!(matches!(extract_text(&blank), Err(CaptionError::EmptyResponse)));

        let blocked = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(extract_text(&blocked), Err(CaptionError::EmptyResponse)));
    }

    #[test]
    fn encodes_png_signature() {
        let png = encode_png(DynamicImage::new_rgba8(4, 3)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    fn local_client(key: &str) -> CaptionClient {
        let settings = CaptionSettings {
            endpoint: "http://127.0.0.1:9/v1beta/models".to_string(),
            timeout_secs: 1,
            ..default()
        };
        CaptionClient::new(&settings, key.to_string()).unwrap()
    }

    #[test]
    fn key_is_sent_as_header_not_query() {
        let client = local_client("SECRET_KEY_123");
        let request = client.build_request(&[1, 2, 3]).unwrap();

        assert_eq!(request.url().query(), None);
        assert!(!request.url().as_str().contains("SECRET_KEY_123"));
        assert_eq!(request.headers()[API_KEY_HEADER], "SECRET_KEY_123");
    }

    #[test]
    fn failed_request_does_not_log_key() {
        // Nothing listens on the discard port, so the send fails.
        let client = local_client("SECRET_KEY_123");
        let err = client.describe(&[1, 2, 3]).unwrap_err();

        assert!(matches!(err, CaptionError::Request(_)));
        assert!(!format!("{}", err).contains("SECRET_KEY_123"));
        assert!(!format!("{:?}", err).contains("SECRET_KEY_123"));
        assert!(!format!("{}", err).contains("127.0.0.1:9"));
    }

    #[test]
    fn missing_key_is_reported() {
        let settings = CaptionSettings {
            api_key_env: "RETRO_FIGHTER_TEST_UNSET_KEY".to_string(),
            ..default()
        };
        assert!(matches!(
            CaptionClient::from_env(&settings),
            Err(CaptionError::MissingApiKey(_))
        ));
    }
}
