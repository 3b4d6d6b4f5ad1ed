//! Pointer picking and the per-frame cascade tick

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use cascade_core::Ray;

use crate::camera::MainCamera;
use crate::cubes::sync_cube_colors;
use crate::types::{CascadeState, UiLayout};

/// Plugin for input handling and cascade advancement
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TouchState>()
            .add_systems(
                Update,
                (handle_pointer_pick, advance_cascade, sync_cube_colors).chain(),
            )
            .add_systems(Update, update_ui_layout);
    }
}

/// Touches that move further than this are drags, not taps
const TAP_SLOP_PX: f32 = 10.0;

/// Track touch state for tap detection
#[derive(Resource, Default)]
pub struct TouchState {
    /// Position where touch started
    start_position: Option<Vec2>,
    /// Whether this touch has moved significantly (is a drag, not a tap)
    is_dragging: bool,
}

/// Trigger the cube under a mouse click or touch tap
fn handle_pointer_pick(
    mut state: ResMut<CascadeState>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: bevy_egui::EguiContexts,
    mut touch_state: ResMut<TouchState>,
) {
    // Clicks on the HUD belong to egui
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);
    if egui_wants_pointer {
        return;
    }

    let mut pick_pos: Option<Vec2> = None;

    for touch in touch_input.iter_just_pressed() {
        touch_state.start_position = Some(touch.position());
        touch_state.is_dragging = false;
    }

    for touch in touch_input.iter() {
        if let Some(start) = touch_state.start_position {
            if touch.position().distance(start) > TAP_SLOP_PX {
                touch_state.is_dragging = true;
            }
        }
    }

    for _ in touch_input.iter_just_released() {
        if !touch_state.is_dragging {
            pick_pos = touch_state.start_position;
        }
        touch_state.start_position = None;
        touch_state.is_dragging = false;
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        if let Ok(window) = windows.single() {
            if let Some(cursor_pos) = window.cursor_position() {
                pick_pos = Some(cursor_pos);
            }
        }
    }

    let Some(pos) = pick_pos else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, pos) else {
        return;
    };

    let ray = Ray::new(ray.origin.to_array(), ray.direction.as_vec3().to_array());
    if let Some(id) = state.world.pick_and_trigger(&ray) {
        tracing::debug!(cube = %id, x = pos.x, y = pos.y, "Pointer pick");
    }
}

/// Advance running transitions and let completions cascade
fn advance_cascade(time: Res<Time>, mut state: ResMut<CascadeState>) {
    let state = &mut *state;
    state.last_tick = state.world.tick(time.delta());
}

/// Keep the layout in step with the window; the camera projection follows the
/// window on its own
fn update_ui_layout(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layout: ResMut<UiLayout>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if width == layout.screen_width && height == layout.screen_height {
        return;
    }

    layout.update_from_window(width, height);
    tracing::debug!(width, height, mobile = layout.is_mobile, "Viewport resized");
}
