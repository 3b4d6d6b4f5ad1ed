//! Proximity graph over lattice cubes

use tracing::{debug, info};

use crate::cube::{Cube, CubeId};

/// Neighbor lists for every cube, built once from final positions.
///
/// Both directions of each pair are stored, so `neighbors(a)` contains `b`
/// exactly when `neighbors(b)` contains `a`. Lists are in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct ProximityGraph {
    neighbors: Vec<Vec<CubeId>>,
    threshold: f32,
}

impl ProximityGraph {
    /// Brute-force all-pairs build, O(M²).
    ///
    /// Two cubes are neighbors when their distance is strictly below
    /// `threshold`; a distance equal to the threshold does not connect them.
    pub fn build(cubes: &[Cube], threshold: f32) -> Self {
        let threshold_sq = threshold * threshold;
        let mut neighbors = vec![Vec::new(); cubes.len()];

        // Cubes are indexed by id; the lattice guarantees id == index.
        for (i, a) in cubes.iter().enumerate() {
            for b in &cubes[i + 1..] {
                if a.distance_squared(b) < threshold_sq {
                    neighbors[a.id.0].push(b.id);
                    neighbors[b.id.0].push(a.id);
                }
            }
        }

        let graph = Self {
            neighbors,
            threshold,
        };

        info!(
            cubes = graph.len(),
            edges = graph.edge_count(),
            threshold,
            "Built proximity graph"
        );
        debug!(
            max_degree = graph.neighbors.iter().map(Vec::len).max().unwrap_or(0),
            "Proximity graph degree"
        );

        graph
    }

    /// Neighbors of `id`, empty for unknown ids
    pub fn neighbors(&self, id: CubeId) -> &[CubeId] {
        self.neighbors.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, a: CubeId, b: CubeId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of cubes covered by the graph
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatticeConfig;
    use crate::lattice::Lattice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cubes(positions: &[[f32; 3]]) -> Vec<Cube> {
        Lattice::from_positions(positions, 1.0).cubes().to_vec()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(ProximityGraph::build(&[], 3.0).is_empty());

        let one = cubes(&[[0.0, 0.0, 0.0]]);
        let graph = ProximityGraph::build(&one, 3.0);
        assert_eq!(graph.len(), 1);
        assert!(graph.neighbors(CubeId(0)).is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let set = cubes(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 2.9, 0.0]]);
        let graph = ProximityGraph::build(&set, 3.0);

        assert!(!graph.contains(CubeId(0), CubeId(1)));
        assert!(graph.contains(CubeId(0), CubeId(2)));
        // |(3, 0, 0) - (0, 2.9, 0)| > 3
        assert!(!graph.contains(CubeId(1), CubeId(2)));
    }

    #[test]
    fn test_unknown_id_has_no_neighbors() {
        let graph = ProximityGraph::build(&cubes(&[[0.0; 3], [1.0, 0.0, 0.0]]), 3.0);
        assert!(graph.neighbors(CubeId(17)).is_empty());
    }

    #[test]
    fn test_lattice_graph_matches_metric() {
        let mut rng = StdRng::seed_from_u64(42);
        let lattice = Lattice::build(
            &LatticeConfig {
                extent: 5,
                ..Default::default()
            },
            &mut rng,
        );
        let graph = ProximityGraph::build(lattice.cubes(), 3.0);

        for a in lattice.cubes() {
            assert!(
                !graph.neighbors(a.id).contains(&a.id),
                "self loop on {}",
                a.id
            );
            assert!(graph.neighbors(a.id).windows(2).all(|w| w[0] < w[1]));

            for b in lattice.cubes() {
                if a.id == b.id {
                    continue;
                }
                let close = a.distance_squared(b) < 9.0;
                assert_eq!(graph.contains(a.id, b.id), close, "{} -> {}", a.id, b.id);
                assert_eq!(graph.contains(a.id, b.id), graph.contains(b.id, a.id));
            }
        }
        assert!(graph.edge_count() > 0);
    }
}
