//! Jittered cubic lattice generation

use rand::Rng;
use tracing::info;

use crate::config::LatticeConfig;
use crate::cube::{Cube, CubeId};

/// All cubes of one scene, created in a single batch
#[derive(Debug, Clone, Default)]
pub struct Lattice {
    cubes: Vec<Cube>,
    cube_size: f32,
}

impl Lattice {
    /// Build `extent³` cubes on a centred grid with uniform per-axis jitter.
    ///
    /// Grid index `i` on each axis maps to `(i - (extent - 1) / 2) * margin`,
    /// so odd extents stay centred on the origin. Jitter on each axis is drawn
    /// from `[-cube_size / 2, cube_size / 2)`.
    pub fn build<R: Rng>(config: &LatticeConfig, rng: &mut R) -> Self {
        let n = config.extent;
        let mut cubes = Vec::with_capacity(n * n * n);

        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let position = [
                        cell_centre(x, n, config.margin) + jitter(rng, config.cube_size),
                        cell_centre(y, n, config.margin) + jitter(rng, config.cube_size),
                        cell_centre(z, n, config.margin) + jitter(rng, config.cube_size),
                    ];
                    cubes.push(Cube::new(CubeId(cubes.len()), position));
                }
            }
        }

        info!(
            extent = n,
            margin = config.margin,
            cubes = cubes.len(),
            "Built lattice"
        );

        Self {
            cubes,
            cube_size: config.cube_size,
        }
    }

    /// Wrap explicitly placed cubes, reassigning ids by index
    pub fn from_positions(positions: &[[f32; 3]], cube_size: f32) -> Self {
        let cubes = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Cube::new(CubeId(i), *p))
            .collect();
        Self { cubes, cube_size }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn get(&self, id: CubeId) -> Option<&Cube> {
        self.cubes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn cube_size(&self) -> f32 {
        self.cube_size
    }
}

fn cell_centre(index: usize, extent: usize, margin: f32) -> f32 {
    (index as f32 - (extent as f32 - 1.0) / 2.0) * margin
}

fn jitter<R: Rng>(rng: &mut R, size: f32) -> f32 {
    rng.gen::<f32>() * size - size / 2.0
}
