//! Cascade Scene - Bevy rendering, input and HUD for the cube lattice
//!
//! The cascade logic lives in `cascade-core`; this crate owns a
//! [`CascadeWorld`] as a resource, draws one cube per lattice entry, turns
//! clicks and taps into picks, and ticks the world once per frame.

pub mod camera;
pub mod cubes;
pub mod interaction;
pub mod scene;
pub mod types;
pub mod ui;

use bevy::prelude::*;
use cascade_core::{CascadeConfig, CascadeWorld, ConfigError};

/// Plugin that builds the cascade world and sets up the 3D scene around it
pub struct CascadeScenePlugin {
    world: CascadeWorld,
}

impl CascadeScenePlugin {
    /// Build the world up front so an invalid config fails before the app starts
    pub fn new(config: &CascadeConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            world: CascadeWorld::new(config)?,
        })
    }
}

impl Plugin for CascadeScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(CascadeState::new(self.world.clone()))
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(cubes::CubesPlugin)
            .add_plugins(interaction::InteractionPlugin)
            .add_plugins(ui::HudPlugin);
    }
}

// Re-export commonly used types
pub use types::*;
pub use camera::CameraSettings;
pub use cubes::CubeMarker;
