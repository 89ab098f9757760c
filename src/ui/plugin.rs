//! UI plugin - HUD and the end-of-match banner.

use bevy::prelude::*;

use super::hud;
use crate::core::MatchOverEvent;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.add_systems(Update, show_results);
    }
}

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

/// Put the result headline and final score on screen.
fn show_results(
    mut commands: Commands,
    mut events: EventReader<MatchOverEvent>,
    existing: Query<(), With<GameOverUi>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            GameOverUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(event.headline.clone()),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!("Final score: {}", event.score)),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
            ));
        });
}
