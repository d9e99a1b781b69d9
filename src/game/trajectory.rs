//! # Trajectories
//!
//! Closed patrol loops for hazards. A trajectory is an ordered, cyclic list of
//! waypoints traversed at constant speed, one step per simulation tick,
//! independent of the grid shifts driven by player input.

use crate::{LevelMoverError, LevelMoverResult};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An ordered cyclic waypoint list with the active segment `current -> next`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    waypoints: Vec<Vec2>,
    current: usize,
    next: usize,
    speed: f32,
}

impl Trajectory {
    /// Creates a trajectory starting on the segment from waypoint 0 to
    /// waypoint 1.
    ///
    /// A single waypoint is accepted and yields a stationary trajectory.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use level_mover::Trajectory;
    ///
    /// let t = Trajectory::new(vec![Vec2::ZERO, Vec2::new(60.0, 0.0)], 5.0).unwrap();
    /// assert_eq!(t.velocity(), Vec2::new(5.0, 0.0));
    /// assert!(Trajectory::new(vec![], 5.0).is_err());
    /// ```
    pub fn new(waypoints: Vec<Vec2>, speed: f32) -> LevelMoverResult<Self> {
        if waypoints.is_empty() {
            return Err(LevelMoverError::InvalidTrajectory(
                "a trajectory needs at least one waypoint".to_string(),
            ));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(LevelMoverError::InvalidTrajectory(format!(
                "speed must be finite and non-negative, got {speed}"
            )));
        }

        let next = 1 % waypoints.len();
        Ok(Self {
            waypoints,
            current: 0,
            next,
            speed,
        })
    }

    /// A trajectory that never moves off `point`.
    pub fn stationary(point: Vec2) -> Self {
        Self {
            waypoints: vec![point],
            current: 0,
            next: 0,
            speed: 0.0,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// First waypoint, where a hazard starts its patrol.
    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    /// Whether the hazard can never leave its waypoint.
    pub fn is_stationary(&self) -> bool {
        self.waypoints.len() < 2 || self.speed == 0.0
    }

    /// Per-tick displacement along the active segment. Zero when the
    /// segment endpoints coincide.
    pub fn velocity(&self) -> Vec2 {
        let from = self.waypoints[self.current];
        let to = self.waypoints[self.next];
        let delta = to - from;
        let distance = delta.length();
        if distance == 0.0 {
            return Vec2::ZERO;
        }
        delta / distance * self.speed
    }

    /// Total length of the closed loop, including the closing segment.
    pub fn path_length(&self) -> f32 {
        let n = self.waypoints.len();
        (0..n)
            .map(|i| self.waypoints[i].distance(self.waypoints[(i + 1) % n]))
            .sum()
    }

    /// Advances `position` by one tick and returns the new position.
    ///
    /// A step that would pass the next waypoint lands exactly on it, and
    /// arriving on the next waypoint makes it the current one.
    pub fn advance(&mut self, position: Vec2) -> Vec2 {
        let velocity = self.velocity();
        let target = self.waypoints[self.next];
        let mut position = position + velocity;

        if velocity != Vec2::ZERO {
            let remaining = (target - position).dot(velocity);
            if remaining <= 0.0 {
                position = target;
            }
        }

        if position == target {
            self.current = self.next;
            self.next = (self.next + 1) % self.waypoints.len();
        }

        position
    }

    /// Moves every waypoint by `delta`, keeping the patrol attached to the
    /// level when the world shifts.
    pub fn translate(&mut self, delta: Vec2) {
        for waypoint in &mut self.waypoints {
            *waypoint += delta;
        }
    }
}
