//! Attachment of joints to bodies and reconciliation of body poses.
use crate::body::{BodyId, BodyPoses};
use crate::render::RenderProps;
use biomech::algebra::RigidTransform3;
use biomech::property::{HostLink, PropertyObserver};
use log::warn;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JointError {
    /// The body is not known to the pose lookup.
    UnknownBody(BodyId),
    /// The joint is not attached to any body.
    NotConnected,
    /// Neither body of the joint may be moved.
    Immovable,
    /// A joint axis of zero length was given.
    DegenerateAxis,
}

impl fmt::Display for JointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointError::UnknownBody(body) => write!(f, "Unknown {}", body),
            JointError::NotConnected => write!(f, "Joint is not connected to any bodies"),
            JointError::Immovable => write!(f, "Cannot adjust poses: both joint bodies are grounded"),
            JointError::DegenerateAxis => write!(f, "Joint axis must have non-zero length"),
        }
    }
}

impl Error for JointError {}

fn lookup_pose(poses: &dyn BodyPoses, body: BodyId) -> Result<RigidTransform3<f64>, JointError> {
    poses
        .pose(body)
        .ok_or(JointError::UnknownBody(body))
}

/// State shared by all joints.
///
/// Frame C is attached to body A by $T_{CA}$. Frame D is attached to body B by $T_{DB}$, or
/// fixed in the world by $T_{DW}$ when there is no body B.
#[derive(Debug)]
pub struct JointBase {
    body_a: Option<BodyId>,
    body_b: Option<BodyId>,
    tca: RigidTransform3<f64>,
    tdb: RigidTransform3<f64>,
    axis_length: f64,
    render_props: RenderProps,
    host: HostLink,
}

impl Default for JointBase {
    fn default() -> Self {
        Self::new(RenderProps::default())
    }
}

impl JointBase {
    pub fn new(render_props: RenderProps) -> Self {
        Self {
            body_a: None,
            body_b: None,
            tca: RigidTransform3::identity(),
            tdb: RigidTransform3::identity(),
            axis_length: 0.0,
            render_props,
            host: HostLink::default(),
        }
    }

    /// Attaches the joint to body A and to body B, or to ground if `body_b` is `None`.
    ///
    /// `tdb` is $T_{DW}$ when attaching to ground.
    pub fn set_bodies(
        &mut self,
        body_a: BodyId,
        tca: RigidTransform3<f64>,
        body_b: Option<BodyId>,
        tdb: RigidTransform3<f64>,
    ) {
        self.body_a = Some(body_a);
        self.body_b = body_b;
        self.tca = tca;
        self.tdb = tdb;
    }

    /// Attaches the joint so that frames C and D both coincide with the world frame `tcw`.
    pub fn set_bodies_from_world(
        &mut self,
        body_a: BodyId,
        body_b: Option<BodyId>,
        tcw: &RigidTransform3<f64>,
        poses: &dyn BodyPoses,
    ) -> Result<(), JointError> {
        let tca = lookup_pose(poses, body_a)?.inverse() * tcw;
        let tdb = match body_b {
            Some(body_b) => lookup_pose(poses, body_b)?.inverse() * tcw,
            None => *tcw,
        };
        self.set_bodies(body_a, tca, body_b, tdb);
        Ok(())
    }

    pub fn detach(&mut self) {
        self.body_a = None;
        self.body_b = None;
    }

    pub fn is_connected(&self) -> bool {
        self.body_a.is_some()
    }

    pub fn body_a(&self) -> Option<BodyId> {
        self.body_a
    }

    pub fn body_b(&self) -> Option<BodyId> {
        self.body_b
    }

    pub fn tca(&self) -> &RigidTransform3<f64> {
        &self.tca
    }

    pub fn tdb(&self) -> &RigidTransform3<f64> {
        &self.tdb
    }

    pub fn current_tcw(&self, poses: &dyn BodyPoses) -> Result<RigidTransform3<f64>, JointError> {
        let body_a = self.body_a.ok_or(JointError::NotConnected)?;
        Ok(lookup_pose(poses, body_a)? * self.tca)
    }

    pub fn current_tdw(&self, poses: &dyn BodyPoses) -> Result<RigidTransform3<f64>, JointError> {
        match self.body_b {
            Some(body_b) => Ok(lookup_pose(poses, body_b)? * self.tdb),
            None => Ok(self.tdb),
        }
    }

    /// $T_{CD} = T_{DW}^{-1} T_{CW}$.
    pub fn current_tcd(&self, poses: &dyn BodyPoses) -> Result<RigidTransform3<f64>, JointError> {
        let tcw = self.current_tcw(poses)?;
        let tdw = self.current_tdw(poses)?;
        Ok(tdw.inverse() * tcw)
    }

    /// The current $T_{CD}$ of a connected joint, if its bodies can be resolved.
    pub(crate) fn resolved_tcd(&self, poses: &dyn BodyPoses) -> Option<RigidTransform3<f64>> {
        if !self.is_connected() {
            return None;
        }
        match self.current_tcd(poses) {
            Ok(tcd) => Some(tcd),
            Err(err) => {
                warn!("Cannot resolve joint frames, using stored coordinates: {}", err);
                None
            }
        }
    }

    /// Moves one of the bodies so that $T_{CD}$ becomes `tgd`.
    ///
    /// Body B is moved if it exists and is not grounded, otherwise body A is moved.
    pub fn adjust_poses(&self, tgd: &RigidTransform3<f64>, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        let body_a = self.body_a.ok_or(JointError::NotConnected)?;
        let tcw = self.current_tcw(poses)?;
        let tdw = self.current_tdw(poses)?;

        match self.body_b {
            Some(body_b) if !poses.is_grounded(body_b) => {
                let tdw_new = tcw * tgd.inverse();
                poses.set_pose(body_b, tdw_new * self.tdb.inverse())
            }
            _ if !poses.is_grounded(body_a) => {
                let tcw_new = tdw * tgd;
                poses.set_pose(body_a, tcw_new * self.tca.inverse())
            }
            _ => Err(JointError::Immovable),
        }
    }

    pub fn axis_length(&self) -> f64 {
        self.axis_length
    }

    pub fn set_axis_length(&mut self, axis_length: f64) {
        self.axis_length = axis_length;
        self.host.notify_changed("axisLength");
    }

    pub fn render_props(&self) -> &RenderProps {
        &self.render_props
    }

    pub fn set_render_props(&mut self, render_props: RenderProps) {
        self.render_props = render_props;
        self.host.notify_changed("renderProps");
    }

    pub fn host(&self) -> &HostLink {
        &self.host
    }

    pub fn set_observer(&mut self, observer: Option<PropertyObserver>) {
        self.host.set_observer(observer);
    }
}
