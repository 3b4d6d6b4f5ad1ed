//! Time-based color transition scheduler
//!
//! The scheduler is the animation collaborator the cascade talks to: it
//! receives start requests through [`Animator`] and reports finished
//! transitions from [`TweenScheduler::advance`], which is the completion
//! signal that drives propagation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cascade::Animator;
use crate::cube::CubeId;

/// Easing curve applied to linear tween progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    CubicIn,
    CubicOut,
    CubicInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Tween {
    id: CubeId,
    elapsed: Duration,
}

/// Runs one fixed-length transition per started cube
#[derive(Debug, Clone)]
pub struct TweenScheduler {
    duration: Duration,
    easing: Easing,
    /// Running tweens in start order
    running: Vec<Tween>,
}

impl TweenScheduler {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            running: Vec::new(),
        }
    }

    /// Register a tween for `id` starting now
    pub fn start(&mut self, id: CubeId) {
        if self.is_running(id) {
            return;
        }
        self.running.push(Tween {
            id,
            elapsed: Duration::ZERO,
        });
    }

    pub fn is_running(&self, id: CubeId) -> bool {
        self.running.iter().any(|t| t.id == id)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Ids of running tweens in start order
    pub fn running(&self) -> impl Iterator<Item = CubeId> + '_ {
        self.running.iter().map(|t| t.id)
    }

    /// Eased progress of a running tween
    pub fn progress(&self, id: CubeId) -> Option<f32> {
        self.running
            .iter()
            .find(|t| t.id == id)
            .map(|t| self.easing.apply(self.linear_progress(t.elapsed)))
    }

    /// Advance every running tween by `dt` and return the ones that finished.
    ///
    /// Tweens started by the caller after this returns begin at elapsed zero,
    /// so a completion never eats into the next transition's time.
    pub fn advance(&mut self, dt: Duration) -> Vec<CubeId> {
        let duration = self.duration;
        let mut completed = Vec::new();

        self.running.retain_mut(|tween| {
            tween.elapsed = tween.elapsed.saturating_add(dt);
            if tween.elapsed >= duration {
                completed.push(tween.id);
                false
            } else {
                true
            }
        });

        completed
    }

    fn linear_progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

impl Animator for TweenScheduler {
    fn start_transition(&mut self, id: CubeId) {
        self.start(id);
    }
}
