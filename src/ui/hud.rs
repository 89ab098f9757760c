//! In-game HUD - health bars, score, and caption text.

use bevy::prelude::*;

use crate::caption::CaptionDisplay;
use crate::combat::{Match, Side};

/// Health bar fill for one side.
#[derive(Component)]
pub struct HealthBar(pub Side);

/// Score readout.
#[derive(Component)]
pub struct ScoreText;

/// Latest caption of the scene.
#[derive(Component)]
pub struct CaptionText;

const BAR_WIDTH: f32 = 300.0;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(Startup, spawn_hud).add_systems(
        Update,
        (update_health_bars, update_score_text, update_caption_text),
    );
}

/// Bar fill color: player 1 blue, player 2 red.
pub fn bar_color(side: Side) -> Color {
    match side {
        Side::Left => Color::srgb(0.0, 0.0, 1.0),
        Side::Right => Color::srgb(1.0, 0.0, 0.0),
    }
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            padding: UiRect::all(Val::Px(20.0)),
            ..default()
        })
        .with_children(|parent| {
            // Health bars across the top
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|row| {
                    for side in Side::ALL {
                        spawn_bar(row, side);
                    }
                });

            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.6)),
                Node {
                    max_width: Val::Percent(100.0),
                    ..default()
                },
                CaptionText,
            ));
        });
}

/// Helper to spawn a health bar.
fn spawn_bar(parent: &mut ChildBuilder, side: Side) {
    parent
        .spawn((
            Node {
                width: Val::Px(BAR_WIDTH),
                height: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
        ))
        .with_children(|bg| {
            bg.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(bar_color(side)),
                HealthBar(side),
            ));
        });
}

fn update_health_bars(fight: Option<Res<Match>>, mut bars: Query<(&HealthBar, &mut Node)>) {
    let Some(fight) = fight else {
        return;
    };
    for (bar, mut node) in bars.iter_mut() {
        node.width = Val::Percent(fight.fighter(bar.0).health_fraction() * 100.0);
    }
}

fn update_score_text(fight: Option<Res<Match>>, mut text: Query<&mut Text, With<ScoreText>>) {
    let Some(fight) = fight else {
        return;
    };
    let Ok(mut text) = text.get_single_mut() else {
        return;
    };
    let score = format!("Score: {}", fight.score());
    if text.0 != score {
        text.0 = score;
    }
}

fn update_caption_text(display: Res<CaptionDisplay>, mut text: Query<&mut Text, With<CaptionText>>) {
    if !display.is_changed() {
        return;
    }
    let Ok(mut text) = text.get_single_mut() else {
        return;
    };
    text.0 = display.text().unwrap_or_default().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::build_match;
    use crate::core::FighterConfig;

    #[test]
    fn health_bar_follows_fighter_health() {
        let mut fight = build_match(&FighterConfig::default());
        fight.fighter_mut(Side::Right).take_damage(50);

        let mut app = App::new();
        app.insert_resource(fight).add_systems(Update, update_health_bars);
        let left = app.world_mut().spawn((HealthBar(Side::Left), Node::default())).id();
        let right = app.world_mut().spawn((HealthBar(Side::Right), Node::default())).id();
        app.update();

        assert_eq!(app.world().get::<Node>(left).unwrap().width, Val::Percent(100.0));
        assert_eq!(app.world().get::<Node>(right).unwrap().width, Val::Percent(50.0));
    }
}
