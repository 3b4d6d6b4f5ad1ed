//! Cascade world - the context object owning every piece of cascade state

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::cascade::{CascadeController, CubeState};
use crate::config::{CascadeConfig, ConfigError};
use crate::cube::{Cube, CubeId};
use crate::lattice::Lattice;
use crate::pick::{pick, Ray};
use crate::proximity::ProximityGraph;
use crate::tween::TweenScheduler;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CascadeError {
    #[error("Unknown cube: {0}")]
    UnknownCube(CubeId),
}

/// What happened during one [`CascadeWorld::tick`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Cubes whose transition finished this tick
    pub completed: Vec<CubeId>,
    /// Cubes triggered by those completions
    pub triggered: Vec<CubeId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.triggered.is_empty()
    }
}

/// Lattice, proximity graph, controller and scheduler for one scene
#[derive(Debug, Clone)]
pub struct CascadeWorld {
    config: CascadeConfig,
    lattice: Lattice,
    graph: ProximityGraph,
    controller: CascadeController,
    tweens: TweenScheduler,
}

impl CascadeWorld {
    /// Validate `config` and build the scene, seeding the jitter from
    /// `config.seed` when present
    pub fn new(config: &CascadeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(config, &mut rng))
    }

    /// Build with an explicit RNG. `config` is assumed valid.
    pub fn with_rng<R: Rng>(config: &CascadeConfig, rng: &mut R) -> Self {
        let lattice = Lattice::build(&config.lattice, rng);
        Self::assemble(config.clone(), lattice)
    }

    /// Build from explicitly placed cubes instead of a generated lattice
    pub fn from_positions(config: &CascadeConfig, positions: &[[f32; 3]]) -> Self {
        let lattice = Lattice::from_positions(positions, config.lattice.cube_size);
        Self::assemble(config.clone(), lattice)
    }

    fn assemble(config: CascadeConfig, lattice: Lattice) -> Self {
        // The graph is complete before any trigger can reach the controller.
        let graph = ProximityGraph::build(lattice.cubes(), config.proximity.threshold);
        let controller = CascadeController::new(lattice.len());
        let tweens = TweenScheduler::new(
            Duration::from_millis(config.animation.duration_ms),
            config.animation.easing,
        );

        info!(cubes = lattice.len(), "Cascade world ready");

        Self {
            config,
            lattice,
            graph,
            controller,
            tweens,
        }
    }

    /// Start the cascade at `id`. `Ok(false)` when it was already triggered.
    pub fn trigger(&mut self, id: CubeId) -> Result<bool, CascadeError> {
        if self.lattice.get(id).is_none() {
            return Err(CascadeError::UnknownCube(id));
        }
        Ok(self.controller.trigger(id, &mut self.tweens))
    }

    /// Pick the cube under `ray` and trigger it. A miss changes nothing.
    pub fn pick_and_trigger(&mut self, ray: &Ray) -> Option<CubeId> {
        let Some(hit) = pick(ray, self.lattice.cubes(), self.lattice.cube_size()) else {
            debug!("Pick missed");
            return None;
        };

        debug!(
            cube = %hit.id,
            neighbors = ?self.graph.neighbors(hit.id),
            "Picked"
        );
        self.controller.trigger(hit.id, &mut self.tweens);
        Some(hit.id)
    }

    /// Advance running transitions by `dt`.
    ///
    /// Every completion is fed to the controller before this returns, so
    /// cubes triggered by a completion start within the same tick.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        let completed = self.tweens.advance(dt);
        let mut triggered = Vec::new();

        for &id in &completed {
            triggered.extend(self.controller.complete(id, &self.graph, &mut self.tweens));
        }

        if !completed.is_empty() {
            debug!(
                completed = completed.len(),
                triggered = triggered.len(),
                remaining = self.tweens.running_count(),
                "Cascade tick"
            );
        }

        TickReport {
            completed,
            triggered,
        }
    }

    /// How far `id` has moved towards its final color, in `[0, 1]`
    pub fn color_mix(&self, id: CubeId) -> f32 {
        match self.controller.state(id) {
            Some(CubeState::Animating) => self.tweens.progress(id).unwrap_or(0.0),
            Some(CubeState::Done) => 1.0,
            Some(CubeState::Idle) | None => 0.0,
        }
    }

    /// Cubes with a transition in flight, in start order
    pub fn animating(&self) -> impl Iterator<Item = CubeId> + '_ {
        self.tweens.running()
    }

    /// True when no transition is running
    pub fn is_settled(&self) -> bool {
        self.tweens.running_count() == 0
    }

    pub fn state(&self, id: CubeId) -> Option<CubeState> {
        self.controller.state(id)
    }

    pub fn cubes(&self) -> &[Cube] {
        self.lattice.cubes()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    pub fn controller(&self) -> &CascadeController {
        &self.controller
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn world(positions: &[[f32; 3]]) -> CascadeWorld {
        CascadeWorld::from_positions(&CascadeConfig::default(), positions)
    }

    fn run_to_rest(world: &mut CascadeWorld) -> usize {
        let mut ticks = 0;
        while !world.is_settled() {
            world.tick(SECOND);
            ticks += 1;
            assert!(
                ticks <= world.cubes().len() + 1,
                "cascade did not terminate"
            );
        }
        ticks
    }

    #[test]
    fn test_close_pair_scenario() {
        let mut world = world(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

        assert_eq!(world.trigger(CubeId(0)), Ok(true));
        let report = world.tick(SECOND);
        assert_eq!(report.completed, vec![CubeId(0)]);
        assert_eq!(report.triggered, vec![CubeId(1)]);
        assert_eq!(world.state(CubeId(1)), Some(CubeState::Animating));

        assert_eq!(world.trigger(CubeId(1)), Ok(false));
        let report = world.tick(SECOND);
        assert_eq!(report.completed, vec![CubeId(1)]);
        assert!(report.triggered.is_empty());
        assert!(world.is_settled());
    }

    #[test]
    fn test_distant_pair_scenario() {
        let mut world = world(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);

        world.trigger(CubeId(0)).unwrap();
        let report = world.tick(SECOND);
        assert!(report.triggered.is_empty());
        assert_eq!(world.state(CubeId(1)), Some(CubeState::Idle));
        assert!(world.is_settled());
    }

    #[test]
    fn test_unknown_cube_rejected() {
        let mut world = world(&[[0.0; 3]]);
        assert_eq!(
            world.trigger(CubeId(3)),
            Err(CascadeError::UnknownCube(CubeId(3)))
        );
    }

    #[test]
    fn test_pick_miss_changes_nothing() {
        let mut world = world(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let ray = Ray::new([0.0, 50.0, 0.0], [0.0, 1.0, 0.0]);

        assert_eq!(world.pick_and_trigger(&ray), None);
        assert_eq!(world.controller().triggered_count(), 0);
        assert!(world.is_settled());
        assert!(world.tick(SECOND).is_empty());
    }

    #[test]
    fn test_pick_hit_triggers_once() {
        let mut world = world(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
        let ray = Ray::new([10.0, 50.0, 0.0], [0.0, -1.0, 0.0]);

        assert_eq!(world.pick_and_trigger(&ray), Some(CubeId(1)));
        assert_eq!(world.pick_and_trigger(&ray), Some(CubeId(1)));
        assert_eq!(world.animating().collect::<Vec<_>>(), vec![CubeId(1)]);
        assert_eq!(world.controller().triggered_count(), 1);
    }

    #[test]
    fn test_color_mix_follows_state() {
        let mut world = world(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(world.color_mix(CubeId(0)), 0.0);

        world.trigger(CubeId(0)).unwrap();
        world.tick(Duration::from_millis(500));
        // cubic-in at half time
        assert!((world.color_mix(CubeId(0)) - 0.125).abs() < 1e-4);

        world.tick(Duration::from_millis(500));
        assert_eq!(world.color_mix(CubeId(0)), 1.0);
        assert_eq!(world.color_mix(CubeId(1)), 0.0);
    }

    #[test]
    fn test_full_lattice_cascade_terminates() {
        let config = CascadeConfig {
            seed: Some(11),
            ..Default::default()
        };
        let mut world = CascadeWorld::new(&config).unwrap();
        assert_eq!(world.cubes().len(), 512);

        world.trigger(CubeId(0)).unwrap();
        run_to_rest(&mut world);

        // Every cube reached is done exactly once; the rest stayed idle
        let controller = world.controller();
        assert_eq!(controller.animating_count(), 0);
        assert_eq!(controller.done_count(), controller.triggered_count());
        for cube in world.cubes() {
            let state = world.state(cube.id).unwrap();
            if state == CubeState::Idle {
                assert!(world
                    .graph()
                    .neighbors(cube.id)
                    .iter()
                    .all(|n| world.state(*n) == Some(CubeState::Idle)));
            }
        }
    }

    #[test]
    fn test_chain_spreads_one_hop_per_transition() {
        let mut world = world(&[
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [6.0, 0.0, 0.0],
        ]);

        world.trigger(CubeId(0)).unwrap();
        assert_eq!(run_to_rest(&mut world), 4);
        assert_eq!(world.controller().done_count(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CascadeConfig::default();
        config.lattice.margin = -1.0;
        assert!(matches!(CascadeWorld::new(&config), Err(ConfigError::Invalid(_))));

        // Oversized lattices are rejected before any allocation
        let mut config = CascadeConfig::default();
        config.lattice.extent = 3_000_000;
        assert!(matches!(CascadeWorld::new(&config), Err(ConfigError::Invalid(_))));
    }
}
