//! Bevy application setup

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use cascade_core::{CascadeConfig, ConfigError};
use cascade_scene::CascadeScenePlugin;

/// Window and canvas options that differ between the browser and native builds
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub title: String,
    /// CSS selector of the canvas to render into (browser only)
    pub canvas: Option<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "Cascade".to_string(),
            canvas: Some("#cascade-canvas".to_string()),
        }
    }
}

/// Build the Bevy app for `config`
pub fn build_app(config: &CascadeConfig, options: ViewerOptions) -> Result<App, ConfigError> {
    let scene = CascadeScenePlugin::new(config)?;

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::BLACK))
        // Continuous rendering so transitions advance every frame
        .insert_resource(WinitSettings::default())
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: options.title,
                        canvas: options.canvas,
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        ..default()
                    }),
                    ..default()
                })
                // Entry points install their own tracing subscriber
                .disable::<LogPlugin>(),
        )
        // Must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(scene);

    Ok(app)
}

/// Run with the built-in defaults
pub fn run() {
    match build_app(&CascadeConfig::default(), ViewerOptions::default()) {
        Ok(mut app) => {
            app.run();
        }
        Err(e) => tracing::error!("Failed to start viewer: {}", e),
    }
}
