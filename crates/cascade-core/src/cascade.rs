//! Trigger-and-propagate state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cube::CubeId;
use crate::proximity::ProximityGraph;

/// Receives requests to start a cube's color transition.
///
/// The implementor must eventually hand the id back through
/// [`CascadeController::complete`] once the transition has finished.
pub trait Animator {
    fn start_transition(&mut self, id: CubeId);
}

/// Per-cube cascade state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubeState {
    /// Not yet triggered
    #[default]
    Idle,
    /// Transition requested, waiting for completion
    Animating,
    /// Transition finished and neighbors were offered the cascade
    Done,
}

impl CubeState {
    pub fn is_triggered(self) -> bool {
        self != CubeState::Idle
    }
}

/// Tracks which cubes have been triggered and drives propagation
#[derive(Debug, Clone, Default)]
pub struct CascadeController {
    states: Vec<CubeState>,
}

impl CascadeController {
    pub fn new(cube_count: usize) -> Self {
        Self {
            states: vec![CubeState::Idle; cube_count],
        }
    }

    /// Start `id` if it is still idle. Returns whether a transition was requested.
    pub fn trigger<A: Animator + ?Sized>(&mut self, id: CubeId, animator: &mut A) -> bool {
        let Some(state) = self.states.get_mut(id.0) else {
            return false;
        };
        if *state != CubeState::Idle {
            trace!(cube = %id, "Already triggered");
            return false;
        }

        *state = CubeState::Animating;
        animator.start_transition(id);
        debug!(cube = %id, "Triggered");
        true
    }

    /// Completion signal for `id`'s transition.
    ///
    /// Marks the cube done, then triggers every still-idle neighbor in
    /// neighbor order before returning. Returns the newly triggered ids.
    pub fn complete<A: Animator + ?Sized>(
        &mut self,
        id: CubeId,
        graph: &ProximityGraph,
        animator: &mut A,
    ) -> Vec<CubeId> {
        match self.states.get_mut(id.0) {
            Some(state) if *state == CubeState::Animating => *state = CubeState::Done,
            _ => return Vec::new(),
        }

        let triggered: Vec<CubeId> = graph
            .neighbors(id)
            .iter()
            .copied()
            .filter(|&neighbor| self.trigger(neighbor, animator))
            .collect();

        trace!(cube = %id, spread = triggered.len(), "Completed");
        triggered
    }

    pub fn state(&self, id: CubeId) -> Option<CubeState> {
        self.states.get(id.0).copied()
    }

    pub fn is_triggered(&self, id: CubeId) -> bool {
        self.state(id).is_some_and(CubeState::is_triggered)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn triggered_count(&self) -> usize {
        self.count(|s| s.is_triggered())
    }

    pub fn animating_count(&self) -> usize {
        self.count(|s| s == CubeState::Animating)
    }

    pub fn done_count(&self) -> usize {
        self.count(|s| s == CubeState::Done)
    }

    fn count(&self, pred: impl Fn(CubeState) -> bool) -> usize {
        self.states.iter().filter(|&&s| pred(s)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;

    /// Records start requests instead of animating
    #[derive(Default)]
    struct Recorder {
        started: Vec<CubeId>,
    }

    impl Animator for Recorder {
        fn start_transition(&mut self, id: CubeId) {
            self.started.push(id);
        }
    }

    fn graph(positions: &[[f32; 3]]) -> ProximityGraph {
        ProximityGraph::build(Lattice::from_positions(positions, 1.0).cubes(), 3.0)
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let mut controller = CascadeController::new(2);
        let mut recorder = Recorder::default();

        assert!(controller.trigger(CubeId(0), &mut recorder));
        assert!(!controller.trigger(CubeId(0), &mut recorder));

        assert_eq!(recorder.started, vec![CubeId(0)]);
        assert_eq!(controller.state(CubeId(0)), Some(CubeState::Animating));
        assert_eq!(controller.triggered_count(), 1);
    }

    #[test]
    fn test_trigger_unknown_cube_is_ignored() {
        let mut controller = CascadeController::new(1);
        let mut recorder = Recorder::default();
        assert!(!controller.trigger(CubeId(4), &mut recorder));
        assert!(recorder.started.is_empty());
    }

    #[test]
    fn test_close_pair_propagates() {
        let graph = graph(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let mut controller = CascadeController::new(2);
        let mut recorder = Recorder::default();

        controller.trigger(CubeId(0), &mut recorder);
        let spread = controller.complete(CubeId(0), &graph, &mut recorder);

        assert_eq!(spread, vec![CubeId(1)]);
        assert_eq!(controller.state(CubeId(0)), Some(CubeState::Done));
        assert_eq!(controller.state(CubeId(1)), Some(CubeState::Animating));

        // Triggering B again is a no-op
        assert!(!controller.trigger(CubeId(1), &mut recorder));
        assert_eq!(recorder.started, vec![CubeId(0), CubeId(1)]);
    }

    #[test]
    fn test_distant_pair_does_not_propagate() {
        let graph = graph(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
        let mut controller = CascadeController::new(2);
        let mut recorder = Recorder::default();

        controller.trigger(CubeId(0), &mut recorder);
        assert!(controller.complete(CubeId(0), &graph, &mut recorder).is_empty());
        assert_eq!(controller.state(CubeId(1)), Some(CubeState::Idle));
    }

    #[test]
    fn test_complete_requires_animating() {
        let graph = graph(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let mut controller = CascadeController::new(2);
        let mut recorder = Recorder::default();

        // Idle cube: completion is spurious
        assert!(controller.complete(CubeId(0), &graph, &mut recorder).is_empty());
        assert_eq!(controller.state(CubeId(0)), Some(CubeState::Idle));

        controller.trigger(CubeId(0), &mut recorder);
        controller.complete(CubeId(0), &graph, &mut recorder);
        // Second completion does not re-spread
        assert!(controller.complete(CubeId(0), &graph, &mut recorder).is_empty());
        assert_eq!(recorder.started.len(), 2);
    }

    #[test]
    fn test_cycle_terminates_and_triggers_each_once() {
        // Triangle: every cube neighbors the other two
        let graph = graph(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]]);
        let mut controller = CascadeController::new(3);
        let mut recorder = Recorder::default();

        controller.trigger(CubeId(1), &mut recorder);
        let mut pending = vec![CubeId(1)];
        let mut rounds = 0;
        while let Some(id) = pending.pop() {
            pending.extend(controller.complete(id, &graph, &mut recorder));
            rounds += 1;
            assert!(rounds <= 3);
        }

        assert_eq!(controller.done_count(), 3);
        assert_eq!(controller.animating_count(), 0);
        let mut started = recorder.started.clone();
        started.sort();
        assert_eq!(started, vec![CubeId(0), CubeId(1), CubeId(2)]);
    }
}
