//! Cube meshes and per-frame color updates

use bevy::prelude::*;
use cascade_core::{CubeId, CubeState};

use crate::types::{CascadeState, CubePalette};

/// Links a rendered cube to its lattice entry
#[derive(Component, Debug, Clone, Copy)]
pub struct CubeMarker {
    pub id: CubeId,
}

/// Plugin for spawning and recoloring cubes
pub struct CubesPlugin;

impl Plugin for CubesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubePalette>()
            .add_systems(Startup, spawn_cubes);
    }
}

fn spawn_cubes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<CascadeState>,
    palette: Res<CubePalette>,
) {
    let size = state.world.lattice().cube_size();
    let mesh = meshes.add(Cuboid::new(size, size, size));

    for cube in state.world.cubes() {
        let [x, y, z] = cube.position;
        // Each cube owns its material so it can change color independently
        let material = materials.add(StandardMaterial {
            base_color: palette.color_at(state.world.color_mix(cube.id)),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        });

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_xyz(x, y, z),
            CubeMarker { id: cube.id },
        ));
    }

    tracing::info!("Spawned {} cubes", state.world.cubes().len());
}

/// Recolor cubes that are animating or finished during the last tick
pub(crate) fn sync_cube_colors(
    state: Res<CascadeState>,
    palette: Res<CubePalette>,
    cubes: Query<(&CubeMarker, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if state.world.is_settled() && state.last_tick.completed.is_empty() {
        return;
    }

    for (marker, material) in &cubes {
        let id = marker.id;
        let needs_update = state.world.state(id) == Some(CubeState::Animating)
            || state.last_tick.completed.contains(&id);
        if !needs_update {
            continue;
        }

        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = palette.color_at(state.world.color_mix(id));
        }
    }
}
