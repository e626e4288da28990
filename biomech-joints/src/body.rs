//! Lookup of rigid body poses.
//!
//! Joints refer to their bodies by [`BodyId`] and resolve poses through a [`BodyPoses`]
//! implementation provided by the caller, typically the rigid body system of a solver.
use crate::joint::JointError;
use biomech::algebra::RigidTransform3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body {}", self.0)
    }
}

/// Access to the world poses $T_{BW}$ of rigid bodies.
pub trait BodyPoses {
    fn pose(&self, body: BodyId) -> Option<RigidTransform3<f64>>;

    fn set_pose(&mut self, body: BodyId, pose: RigidTransform3<f64>) -> Result<(), JointError>;

    /// Grounded bodies are never moved by pose adjustment.
    fn is_grounded(&self, _body: BodyId) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BodyState {
    pose: RigidTransform3<f64>,
    grounded: bool,
}

/// A simple owned collection of rigid bodies.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: FxHashMap<BodyId, BodyState>,
    next_id: usize,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, pose: RigidTransform3<f64>) -> BodyId {
        self.insert(pose, false)
    }

    pub fn add_grounded_body(&mut self, pose: RigidTransform3<f64>) -> BodyId {
        self.insert(pose, true)
    }

    fn insert(&mut self, pose: RigidTransform3<f64>, grounded: bool) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, BodyState { pose, grounded });
        id
    }

    pub fn set_grounded(&mut self, body: BodyId, grounded: bool) -> Result<(), JointError> {
        let state = self
            .bodies
            .get_mut(&body)
            .ok_or(JointError::UnknownBody(body))?;
        state.grounded = grounded;
        Ok(())
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.bodies.contains_key(&body)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl BodyPoses for BodyRegistry {
    fn pose(&self, body: BodyId) -> Option<RigidTransform3<f64>> {
        self.bodies.get(&body).map(|state| state.pose)
    }

    fn set_pose(&mut self, body: BodyId, pose: RigidTransform3<f64>) -> Result<(), JointError> {
        let state = self
            .bodies
            .get_mut(&body)
            .ok_or(JointError::UnknownBody(body))?;
        state.pose = pose;
        Ok(())
    }

    fn is_grounded(&self, body: BodyId) -> bool {
        self.bodies
            .get(&body)
            .map(|state| state.grounded)
            .unwrap_or(false)
    }
}
