//! Keyboard/mouse → InputActionEvent
//!
//! # Mapping
//! - WASD: Move (Triggered while held, Completed on release)
//! - Mouse motion: Look
//! - Space: Jump (Started / Completed)
//! - LMB: Fire (Started / Completed)
//! - V: ToggleView (Started)
//!
//! Axes are in simulation terms: D and mouse-right are positive. The render
//! boundary in `space` keeps that on screen right.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use vantage_simulation::{ActionId, InputActionEvent, TriggerPhase};

use crate::LocalPlayer;

pub struct ClientInputPlugin;

impl Plugin for ClientInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputSettings>()
            .add_systems(Startup, grab_cursor)
            .add_systems(PreUpdate, emit_input_actions.after(bevy::input::InputSystem))
            .add_systems(Update, release_cursor_on_escape);
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputSettings {
    /// Degrees per pixel of mouse motion
    pub mouse_sensitivity: f32,
    pub invert_pitch: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.15,
            invert_pitch: false,
        }
    }
}

/// x = strafe (D positive), y = forward (W positive)
fn move_axis(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    axis
}

/// Mouse delta (pixels, +y down) → look axis (degrees, x = yaw, y = pitch)
fn look_axis(delta: Vec2, settings: &InputSettings) -> Vec2 {
    let pitch_sign = if settings.invert_pitch { 1.0 } else { -1.0 };
    Vec2::new(delta.x, pitch_sign * delta.y) * settings.mouse_sensitivity
}

fn button_edges(
    pressed: bool,
    released: bool,
    controller: Entity,
    action: ActionId,
    actions: &mut EventWriter<InputActionEvent>,
) {
    if pressed {
        actions.write(InputActionEvent::button(controller, action, TriggerPhase::Started));
    }
    if released {
        actions.write(InputActionEvent::button(controller, action, TriggerPhase::Completed));
    }
}

/// System: read devices, emit actions for the local controller
fn emit_input_actions(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    settings: Res<InputSettings>,
    local: Option<Res<LocalPlayer>>,
    mut was_moving: Local<bool>,
    mut actions: EventWriter<InputActionEvent>,
) {
    let Some(local) = local else {
        mouse_motion.clear();
        return;
    };
    let controller = local.controller;

    let axis = move_axis(&keys);
    if axis != Vec2::ZERO {
        actions.write(InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Triggered, axis));
        *was_moving = true;
    } else if *was_moving {
        actions.write(InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Completed, Vec2::ZERO));
        *was_moving = false;
    }

    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if delta != Vec2::ZERO {
        let look = look_axis(delta, &settings);
        actions.write(InputActionEvent::axis(controller, ActionId::Look, TriggerPhase::Triggered, look));
    }

    button_edges(
        keys.just_pressed(KeyCode::Space),
        keys.just_released(KeyCode::Space),
        controller,
        ActionId::Jump,
        &mut actions,
    );
    button_edges(
        mouse_buttons.just_pressed(MouseButton::Left),
        mouse_buttons.just_released(MouseButton::Left),
        controller,
        ActionId::Fire,
        &mut actions,
    );
    button_edges(
        keys.just_pressed(KeyCode::KeyV),
        false,
        controller,
        ActionId::ToggleView,
        &mut actions,
    );
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}

fn release_cursor_on_escape(keys: Res<ButtonInput<KeyCode>>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::None;
    window.cursor_options.visible = true;
}
