//! A joint restricting frame C to planar motion relative to frame D.
use crate::body::{BodyId, BodyPoses};
use crate::coupling::{ConstraintErrors, PlanarCoordinate, PlanarCoupling};
use crate::interval::Interval;
use crate::joint::{JointBase, JointError};
use crate::render::{RenderProps, Renderer};
use biomech::algebra::RigidTransform3;
use biomech::nalgebra::{Point3, Translation3, UnitQuaternion, Vector3, Vector6};
use biomech::property::PropertyInfo;
use std::f64::consts::PI;

/// A planar joint with coordinates $x$, $y$ and $\theta$.
///
/// Frame C may translate in the $xy$ plane of frame D and rotate about its $z$ axis. Angles are
/// given in degrees, while the underlying [`PlanarCoupling`] works in radians.
///
/// Coordinate getters and setters take the current body poses. When the joint is connected,
/// getters read the coordinates off the current $T_{CD}$ and setters move a body so that the
/// joint attains the new coordinate. A detached joint only stores the values.
#[derive(Debug)]
pub struct PlanarJoint {
    base: JointBase,
    coupling: PlanarCoupling,
    x_range: Interval,
    y_range: Interval,
    theta_range: Interval,
    /// Last values set, in joint units.
    values: [f64; 3],
    compliance: Vector6<f64>,
    damping: Vector6<f64>,
}

impl Default for PlanarJoint {
    fn default() -> Self {
        Self::new()
    }
}

fn range_property(coordinate: PlanarCoordinate) -> &'static str {
    match coordinate {
        PlanarCoordinate::X => "xRange",
        PlanarCoordinate::Y => "yRange",
        PlanarCoordinate::Theta => "thetaRange",
    }
}

fn to_coupling_units(coordinate: PlanarCoordinate, value: f64) -> f64 {
    match coordinate {
        PlanarCoordinate::Theta => value.to_radians(),
        _ => value,
    }
}

fn to_joint_units(coordinate: PlanarCoordinate, value: f64) -> f64 {
    match coordinate {
        PlanarCoordinate::Theta => value.to_degrees(),
        _ => value,
    }
}

impl PlanarJoint {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("x", "joint translation along the x axis", "0"),
        PropertyInfo::new("xRange", "range for x", "[-inf, inf]"),
        PropertyInfo::new("y", "joint translation along the y axis", "0"),
        PropertyInfo::new("yRange", "range for y", "[-inf, inf]"),
        PropertyInfo::new("theta", "joint rotation about the z axis (degrees)", "0")
            .with_format("1E %8.3f [-360,360]"),
        PropertyInfo::new("thetaRange", "range for theta (degrees)", "[-inf, inf]").with_format("%8.3f 1E"),
        PropertyInfo::new("compliance", "compliance for each constraint", "0 0 0 0 0 0"),
        PropertyInfo::new("damping", "damping for each constraint", "0 0 0 0 0 0"),
        PropertyInfo::new("axisLength", "length used to render the joint axis", "0"),
        PropertyInfo::new("renderProps", "render properties", "lineColor=blue lineStyle=cylinder"),
    ];

    /// Creates a detached joint with unbounded ranges.
    pub fn new() -> Self {
        Self {
            base: JointBase::new(RenderProps::axis_lines()),
            coupling: PlanarCoupling::new(),
            x_range: Interval::unbounded(),
            y_range: Interval::unbounded(),
            theta_range: Interval::unbounded(),
            values: [0.0; 3],
            compliance: Vector6::zeros(),
            damping: Vector6::zeros(),
        }
    }

    /// Creates a joint connecting body A to body B, or to ground if `body_b` is `None`.
    pub fn with_bodies(
        body_a: BodyId,
        tca: RigidTransform3<f64>,
        body_b: Option<BodyId>,
        tdb: RigidTransform3<f64>,
    ) -> Self {
        let mut joint = Self::new();
        joint.set_bodies(body_a, tca, body_b, tdb);
        joint
    }

    /// Creates a joint whose frames C and D coincide with `tcw` in the current configuration.
    pub fn from_world(
        body_a: BodyId,
        body_b: Option<BodyId>,
        tcw: &RigidTransform3<f64>,
        poses: &dyn BodyPoses,
    ) -> Result<Self, JointError> {
        let mut joint = Self::new();
        joint.set_bodies_from_world(body_a, body_b, tcw, poses)?;
        Ok(joint)
    }

    /// Creates a joint located at `pc` whose rotation axis points along `axis`, both in world
    /// coordinates.
    pub fn from_point_and_axis(
        body_a: BodyId,
        body_b: Option<BodyId>,
        pc: &Point3<f64>,
        axis: &Vector3<f64>,
        poses: &dyn BodyPoses,
    ) -> Result<Self, JointError> {
        if axis.norm() == 0.0 {
            return Err(JointError::DegenerateAxis);
        }
        // rotation_between fails only for an axis opposite to z
        let rotation = UnitQuaternion::rotation_between(&Vector3::z(), axis)
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI));
        let tcw = RigidTransform3::from_parts(Translation3::from(pc.coords), rotation);
        Self::from_world(body_a, body_b, &tcw, poses)
    }

    /// See [`JointBase::set_bodies`].
    pub fn set_bodies(
        &mut self,
        body_a: BodyId,
        tca: RigidTransform3<f64>,
        body_b: Option<BodyId>,
        tdb: RigidTransform3<f64>,
    ) {
        self.base.set_bodies(body_a, tca, body_b, tdb);
    }

    /// See [`JointBase::set_bodies_from_world`].
    pub fn set_bodies_from_world(
        &mut self,
        body_a: BodyId,
        body_b: Option<BodyId>,
        tcw: &RigidTransform3<f64>,
        poses: &dyn BodyPoses,
    ) -> Result<(), JointError> {
        self.base
            .set_bodies_from_world(body_a, body_b, tcw, poses)
    }

    pub fn base(&self) -> &JointBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut JointBase {
        &mut self.base
    }

    pub fn coupling(&self) -> &PlanarCoupling {
        &self.coupling
    }

    /// Current value of a coordinate, with $\theta$ in degrees.
    ///
    /// Returns the last value set if the joint frames cannot be resolved.
    pub fn coordinate(&self, coordinate: PlanarCoordinate, poses: &dyn BodyPoses) -> f64 {
        match self.base.resolved_tcd(poses) {
            Some(tcd) => to_joint_units(coordinate, self.coupling.coordinate(coordinate, Some(&tcd))),
            None => self.values[coordinate.index()],
        }
    }

    /// Sets a coordinate, with $\theta$ in degrees, after clamping it to its range.
    pub fn set_coordinate(
        &mut self,
        coordinate: PlanarCoordinate,
        value: f64,
        poses: &mut dyn BodyPoses,
    ) -> Result<(), JointError> {
        let value = self
            .range(coordinate)
            .make_valid(coordinate.name(), value);
        self.values[coordinate.index()] = value;
        let mut tgd = self.base.resolved_tcd(poses);
        self.coupling
            .set_coordinate(coordinate, tgd.as_mut(), to_coupling_units(coordinate, value));
        if let Some(tgd) = tgd {
            self.base.adjust_poses(&tgd, poses)?;
        }
        self.base.host().notify_changed(coordinate.name());
        Ok(())
    }

    pub fn range(&self, coordinate: PlanarCoordinate) -> Interval {
        match coordinate {
            PlanarCoordinate::X => self.x_range,
            PlanarCoordinate::Y => self.y_range,
            PlanarCoordinate::Theta => self.theta_range,
        }
    }

    fn apply_range(&mut self, coordinate: PlanarCoordinate, range: Interval) {
        self.coupling
            .set_minimum(coordinate, to_coupling_units(coordinate, range.lower()));
        self.coupling
            .set_maximum(coordinate, to_coupling_units(coordinate, range.upper()));
        match coordinate {
            PlanarCoordinate::X => self.x_range = range,
            PlanarCoordinate::Y => self.y_range = range,
            PlanarCoordinate::Theta => self.theta_range = range,
        }
    }

    /// Sets the range of a coordinate, with $\theta$ in degrees.
    ///
    /// If the joint is connected and the current coordinate lies outside the new range, the
    /// coordinate is moved to the nearest bound.
    pub fn set_range(
        &mut self,
        coordinate: PlanarCoordinate,
        range: Interval,
        poses: &mut dyn BodyPoses,
    ) -> Result<(), JointError> {
        self.apply_range(coordinate, range);
        self.base
            .host()
            .notify_changed(range_property(coordinate));

        if self.base.is_connected() {
            let value = self.coordinate(coordinate, poses);
            let clipped = range.clip(value);
            if clipped != value {
                self.set_coordinate(coordinate, clipped, poses)?;
            }
        }
        Ok(())
    }

    pub fn x(&self, poses: &dyn BodyPoses) -> f64 {
        self.coordinate(PlanarCoordinate::X, poses)
    }

    pub fn set_x(&mut self, x: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_coordinate(PlanarCoordinate::X, x, poses)
    }

    pub fn x_range(&self) -> Interval {
        self.x_range
    }

    pub fn set_x_range(&mut self, range: Interval, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_range(PlanarCoordinate::X, range, poses)
    }

    pub fn set_min_x(&mut self, min: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_x_range(self.x_range.with_lower(min), poses)
    }

    pub fn set_max_x(&mut self, max: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_x_range(self.x_range.with_upper(max), poses)
    }

    pub fn y(&self, poses: &dyn BodyPoses) -> f64 {
        self.coordinate(PlanarCoordinate::Y, poses)
    }

    pub fn set_y(&mut self, y: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_coordinate(PlanarCoordinate::Y, y, poses)
    }

    pub fn y_range(&self) -> Interval {
        self.y_range
    }

    pub fn set_y_range(&mut self, range: Interval, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_range(PlanarCoordinate::Y, range, poses)
    }

    pub fn set_min_y(&mut self, min: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_y_range(self.y_range.with_lower(min), poses)
    }

    pub fn set_max_y(&mut self, max: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_y_range(self.y_range.with_upper(max), poses)
    }

    /// The rotation angle in degrees.
    pub fn theta(&self, poses: &dyn BodyPoses) -> f64 {
        self.coordinate(PlanarCoordinate::Theta, poses)
    }

    pub fn set_theta(&mut self, theta: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_coordinate(PlanarCoordinate::Theta, theta, poses)
    }

    pub fn theta_range(&self) -> Interval {
        self.theta_range
    }

    pub fn set_theta_range(&mut self, range: Interval, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_range(PlanarCoordinate::Theta, range, poses)
    }

    pub fn set_min_theta(&mut self, min: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_theta_range(self.theta_range.with_lower(min), poses)
    }

    pub fn set_max_theta(&mut self, max: f64, poses: &mut dyn BodyPoses) -> Result<(), JointError> {
        self.set_theta_range(self.theta_range.with_upper(max), poses)
    }

    pub fn compliance(&self) -> &Vector6<f64> {
        &self.compliance
    }

    pub fn set_compliance(&mut self, compliance: Vector6<f64>) {
        self.compliance = compliance;
        self.base.host().notify_changed("compliance");
    }

    pub fn damping(&self) -> &Vector6<f64> {
        &self.damping
    }

    pub fn set_damping(&mut self, damping: Vector6<f64>) {
        self.damping = damping;
        self.base.host().notify_changed("damping");
    }

    pub fn constraint_errors(&self, poses: &dyn BodyPoses) -> Result<ConstraintErrors, JointError> {
        let tcd = self.base.current_tcd(poses)?;
        Ok(self.coupling.constraint_errors(&tcd))
    }

    /// A detached copy with the same ranges, compliance, damping and rendering setup.
    pub fn copy(&self) -> Self {
        let mut joint = Self::new();
        for coordinate in PlanarCoordinate::ALL {
            joint.apply_range(coordinate, self.range(coordinate));
        }
        joint.compliance = self.compliance;
        joint.damping = self.damping;
        joint
            .base
            .set_axis_length(self.base.axis_length());
        joint
            .base
            .set_render_props(self.base.render_props().clone());
        joint
    }

    /// World coordinates of the end points of the rendered joint axis.
    ///
    /// The axis is centered at the origin of frame D and points along its $z$ axis.
    pub fn axis_end_points(&self, poses: &dyn BodyPoses) -> Result<(Point3<f64>, Point3<f64>), JointError> {
        let tdw = self.base.current_tdw(poses)?;
        let u = tdw.rotation * Vector3::z();
        let half_length = 0.5 * self.base.axis_length();
        let origin = Point3::from(tdw.translation.vector);
        Ok((origin - u * half_length, origin + u * half_length))
    }

    /// Extends the bounding box `(pmin, pmax)` to contain the rendered joint axis.
    pub fn update_bounds(
        &self,
        pmin: &mut Vector3<f64>,
        pmax: &mut Vector3<f64>,
        poses: &dyn BodyPoses,
    ) -> Result<(), JointError> {
        let (p0, p1) = self.axis_end_points(poses)?;
        for p in [p0, p1] {
            *pmin = pmin.inf(&p.coords);
            *pmax = pmax.sup(&p.coords);
        }
        Ok(())
    }

    pub fn render(&self, renderer: &mut dyn Renderer, poses: &dyn BodyPoses, selected: bool) -> Result<(), JointError> {
        let props = self.base.render_props();
        if self.base.axis_length() <= 0.0 || !props.visible {
            return Ok(());
        }
        let (p0, p1) = self.axis_end_points(poses)?;
        let p0 = p0.coords.cast::<f32>();
        let p1 = p1.coords.cast::<f32>();
        renderer.draw_line(props, [p0.x, p0.y, p0.z], [p1.x, p1.y, p1.z], true, selected);
        Ok(())
    }
}
