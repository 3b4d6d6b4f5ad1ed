//! Ray picking against axis-aligned cubes

use crate::cube::{Cube, CubeId};

/// A ray in world space. `direction` need not be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

impl Ray {
    pub fn new(origin: [f32; 3], direction: [f32; 3]) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> [f32; 3] {
        [
            self.origin[0] + self.direction[0] * t,
            self.origin[1] + self.direction[1] * t,
            self.origin[2] + self.direction[2] * t,
        ]
    }
}

/// Nearest cube under a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: CubeId,
    /// Ray parameter of the entry point
    pub t: f32,
}

/// Return the cube whose box is hit first along the ray, if any.
///
/// Each cube is an axis-aligned box of edge `cube_size` centred on its
/// position. Hits behind the origin are ignored; a ray starting inside a box
/// hits it at `t = 0`.
pub fn pick(ray: &Ray, cubes: &[Cube], cube_size: f32) -> Option<PickHit> {
    let half = cube_size / 2.0;
    cubes
        .iter()
        .filter_map(|cube| {
            intersect_box(ray, cube.position, half).map(|t| PickHit { id: cube.id, t })
        })
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

/// Slab test; returns the entry parameter clamped to zero
fn intersect_box(ray: &Ray, centre: [f32; 3], half: f32) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let lo = centre[axis] - half;
        let hi = centre[axis] + half;
        let o = ray.origin[axis];
        let d = ray.direction[axis];

        if d == 0.0 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}
