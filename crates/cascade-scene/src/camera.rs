//! Auto-rotating orbit camera

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub distance: f32,
    /// Angle around +Y, measured from +Z towards +X
    pub azimuth: f32,
    /// Angle above the XZ plane
    pub elevation: f32,
    pub target: Vec3,
    pub auto_rotate: bool,
    /// Radians per second
    pub auto_rotate_speed: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            // One full orbit every 30 seconds
            auto_rotate_speed: TAU / 30.0,
            auto_rotate: true,
            fov_degrees: 45.0,
            near: 0.25,
            far: 200.0,
            ..Self::from_eye(Vec3::new(50.0, 40.0, 50.0), Vec3::ZERO)
        }
    }
}

impl CameraSettings {
    /// Orbit parameters that place the camera at `eye` looking at `target`
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let elevation = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        Self {
            distance,
            azimuth: offset.x.atan2(offset.z),
            elevation,
            target,
            auto_rotate: false,
            auto_rotate_speed: 0.0,
            fov_degrees: 45.0,
            near: 0.25,
            far: 200.0,
        }
    }

    /// Camera position for the current orbit parameters (Y up)
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.elevation.cos();
        self.target
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                horizontal * self.azimuth.cos(),
            )
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera setup and orbit
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, orbit_camera);
    }
}

fn spawn_camera(mut commands: Commands, settings: Res<CameraSettings>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Transform::from_translation(settings.eye()).looking_at(settings.target, Vec3::Y),
        // Cubes fade to black with depth
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Linear {
                start: 10.0,
                end: 180.0,
            },
            ..default()
        },
        AmbientLight {
            color: Color::WHITE,
            brightness: 40.0,
            ..default()
        },
        MainCamera,
    ));
}

fn orbit_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    time: Res<Time>,
) {
    if settings.auto_rotate {
        let step = settings.auto_rotate_speed * time.delta_secs();
        settings.azimuth = (settings.azimuth + step).rem_euclid(TAU);
    }

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = settings.eye();
        transform.look_at(settings.target, Vec3::Y);
    }
}
