//! Shared resources for the cascade scene

use bevy::prelude::*;
use cascade_core::{CascadeWorld, TickReport};

/// The cascade world, owned by the ECS
#[derive(Resource)]
pub struct CascadeState {
    pub world: CascadeWorld,
    /// Outcome of the most recent frame tick
    pub last_tick: TickReport,
}

impl CascadeState {
    pub fn new(world: CascadeWorld) -> Self {
        Self {
            world,
            last_tick: TickReport::default(),
        }
    }
}

/// Start and end colors of a cube's transition
#[derive(Debug, Clone, Resource)]
pub struct CubePalette {
    pub idle: Color,
    pub done: Color,
}

impl Default for CubePalette {
    fn default() -> Self {
        Self {
            idle: Color::hsl(120.0, 0.8, 0.5),
            done: Color::hsl(0.0, 0.8, 0.5),
        }
    }
}

impl CubePalette {
    /// Interpolate in sRGB space, `t = 0` idle and `t = 1` done
    pub fn color_at(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let a = self.idle.to_srgba();
        let b = self.done.to_srgba();
        Color::srgba(
            a.red + (b.red - a.red) * t,
            a.green + (b.green - a.green) * t,
            a.blue + (b.blue - a.blue) * t,
            a.alpha + (b.alpha - a.alpha) * t,
        )
    }
}

/// Responsive layout info, refreshed from the primary window size
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    pub is_mobile: bool,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            is_mobile: false,
            screen_width: 1280.0,
            screen_height: 720.0,
        }
    }
}

impl UiLayout {
    pub fn update_from_window(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        // Consider mobile if width < 800 or in portrait orientation
        self.is_mobile = width < 800.0 || (height > width * 1.2);
    }

    pub fn ui_scale(&self) -> f32 {
        if self.is_mobile { 1.2 } else { 1.0 }
    }
}
