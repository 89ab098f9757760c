//! Caption plugin - on request, captures the frame and asks the caption
//! service to describe it, without ever stalling the fight.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured};
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};

use super::client::{encode_png, CaptionClient};
use super::error::CaptionError;
use crate::core::FighterConfig;
use crate::player::Controls;

/// Minimum spacing between caption requests.
#[derive(Debug, Clone)]
pub struct CaptionCooldown {
    secs: f32,
    last_request: Option<f32>,
}

impl CaptionCooldown {
    pub fn new(secs: f32) -> Self {
        Self {
            secs: secs.max(0.0),
            last_request: None,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        self.last_request.map_or(true, |last| now - last >= self.secs)
    }

    /// Start a request at `now` if the cooldown allows it.
    pub fn try_start(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_request = Some(now);
        true
    }
}

/// Caption currently on screen, cleared after its display time.
#[derive(Resource, Debug, Default)]
pub struct CaptionDisplay {
    text: Option<String>,
    remaining: f32,
}

impl CaptionDisplay {
    pub fn show(&mut self, text: String, secs: f32) {
        self.text = Some(text);
        self.remaining = secs;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Count down. Returns true when the caption expires on this call.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if self.text.is_none() {
            return false;
        }
        self.remaining -= delta_secs;
        if self.remaining <= 0.0 {
            self.text = None;
            return true;
        }
        false
    }
}

/// Request pipeline state.
#[derive(Resource)]
pub struct CaptionState {
    client: Option<Arc<CaptionClient>>,
    cooldown: CaptionCooldown,
    display_secs: f32,
    awaiting_frame: bool,
    pending: Option<Task<Result<String, CaptionError>>>,
}

impl CaptionState {
    fn busy(&self) -> bool {
        self.awaiting_frame || self.pending.is_some()
    }
}

/// Caption plugin - screenshot commentary on demand.
pub struct CaptionPlugin;

impl Plugin for CaptionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CaptionDisplay>()
            .add_systems(Startup, init_caption_client)
            .add_systems(
                Update,
                (request_caption, poll_caption_task, expire_caption).chain(),
            );
    }
}

fn init_caption_client(mut commands: Commands, config: Res<FighterConfig>) {
    let settings = &config.caption;
    let client = if !settings.enabled {
        info!("Captions disabled in config");
        None
    } else {
        match CaptionClient::from_env(settings) {
            Ok(client) => {
                info!("Caption service ready ({})", settings.model);
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("{}. Captions unavailable.", e);
                None
            }
        }
    };

    commands.insert_resource(CaptionState {
        client,
        cooldown: CaptionCooldown::new(settings.cooldown_secs),
        display_secs: settings.display_secs,
        awaiting_frame: false,
        pending: None,
    });
}

fn request_caption(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    controls: Res<Controls>,
    time: Res<Time>,
    state: Option<ResMut<CaptionState>>,
) {
    if !keyboard.just_pressed(controls.caption) {
        return;
    }
    let Some(mut state) = state else {
        return;
    };
    if state.client.is_none() {
        debug!("Caption requested but no client is configured");
        return;
    }
    if state.busy() {
        debug!("Caption request already in flight");
        return;
    }
    if !state.cooldown.try_start(time.elapsed_secs()) {
        debug!("Caption on cooldown");
        return;
    }

    state.awaiting_frame = true;
    commands
        .spawn(Screenshot::primary_window())
        .observe(on_frame_captured);
    info!("Capturing frame for caption");
}

fn on_frame_captured(trigger: Trigger<ScreenshotCaptured>, mut state: ResMut<CaptionState>) {
    state.awaiting_frame = false;
    let Some(client) = state.client.clone() else {
        return;
    };

    let frame = trigger.event().0.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move {
        let frame = frame
            .try_into_dynamic()
            .map_err(|e| CaptionError::Encode(e.to_string()))?;
        let png = encode_png(frame)?;
        client.describe(&png)
    });
    state.pending = Some(task);
}

fn poll_caption_task(state: Option<ResMut<CaptionState>>, mut display: ResMut<CaptionDisplay>) {
    let Some(mut state) = state else {
        return;
    };
    let Some(task) = state.pending.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    state.pending = None;

    match result {
        Ok(text) => {
            info!("Caption: {}", text);
            let secs = state.display_secs;
            display.show(text, secs);
        }
        Err(e) => warn!("No caption: {}", e),
    }
}

fn expire_caption(time: Res<Time>, mut display: ResMut<CaptionDisplay>) {
    if display.text().is_none() {
        return;
    }
    if display.tick(time.delta_secs()) {
        debug!("Caption expired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_spaces_requests() {
        let mut cooldown = CaptionCooldown::new(10.0);
        assert!(cooldown.try_start(0.5));
        assert!(!cooldown.try_start(5.0));
        assert!(!cooldown.is_ready(10.4));
        assert!(cooldown.try_start(10.5));
    }

    #[test]
    fn caption_expires_after_display_time() {
        let mut display = CaptionDisplay::default();
        display.show("Red is on fire".to_string(), 8.0);
        assert!(!display.tick(5.0));
        assert_eq!(display.text(), Some("Red is on fire"));
        assert!(display.tick(3.0));
        assert_eq!(display.text(), None);
        assert!(!display.tick(1.0));
    }
}
