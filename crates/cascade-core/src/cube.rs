//! Cube identity and placement

use serde::{Deserialize, Serialize};

/// Unique identifier for a cube, equal to its index in the lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CubeId(pub usize);

impl std::fmt::Display for CubeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cube-{}", self.0)
    }
}

/// One lattice node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    /// Cube ID
    pub id: CubeId,
    /// Centre position, jitter included
    pub position: [f32; 3],
}

impl Cube {
    pub fn new(id: CubeId, position: [f32; 3]) -> Self {
        Self { id, position }
    }

    /// Squared Euclidean distance to another cube
    pub fn distance_squared(&self, other: &Cube) -> f32 {
        distance_squared(self.position, other.position)
    }
}

pub(crate) fn distance_squared(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Cube::new(CubeId(0), [0.3, -1.2, 4.0]);
        let b = Cube::new(CubeId(1), [2.1, 0.7, -0.5]);

        assert_eq!(a.distance_squared(&b), b.distance_squared(&a));

        let origin = Cube::new(CubeId(2), [0.0; 3]);
        let corner = Cube::new(CubeId(3), [3.0, 4.0, 0.0]);
        assert_eq!(origin.distance_squared(&corner), 25.0);
    }

    #[test]
    fn test_cube_id_display() {
        assert_eq!(CubeId(42).to_string(), "cube-42");
    }
}
