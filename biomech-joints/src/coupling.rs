//! The spatial coupling of a planar joint.
//!
//! The coupling constrains the transform $T_{CD}$ from frame C to frame D to the plane
//! $z = 0$ with rotations about the local $z$ axis only. It leaves three free coordinates,
//! the in-plane translation $(x, y)$ and the rotation angle $\theta$ (in radians), and
//! constrains the $z$ translation together with the two out-of-plane rotations.
use crate::interval::Interval;
use biomech::algebra::RigidTransform3;
use biomech::nalgebra::{Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanarCoordinate {
    X,
    Y,
    Theta,
}

impl PlanarCoordinate {
    pub const ALL: [PlanarCoordinate; 3] = [PlanarCoordinate::X, PlanarCoordinate::Y, PlanarCoordinate::Theta];

    pub fn index(self) -> usize {
        match self {
            PlanarCoordinate::X => 0,
            PlanarCoordinate::Y => 1,
            PlanarCoordinate::Theta => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlanarCoordinate::X => "x",
            PlanarCoordinate::Y => "y",
            PlanarCoordinate::Theta => "theta",
        }
    }
}

/// Thresholds governing engagement of the coordinate limits.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingTolerances {
    pub break_speed: f64,
    pub break_accel: f64,
    /// Distance to a bound below which the limit is considered engaged.
    pub contact_distance: f64,
}

impl Default for CouplingTolerances {
    fn default() -> Self {
        Self {
            break_speed: 1e-8,
            break_accel: 1e-8,
            contact_distance: 1e-8,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitBound {
    Lower,
    Upper,
}

/// A coordinate that is close to, or beyond, one of its bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LimitEngagement {
    pub coordinate: PlanarCoordinate,
    pub bound: LimitBound,
    /// Signed distance to the bound, negative when the bound is violated.
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintErrors {
    /// Residuals of the $z$ translation and of the rotations about the local $x$ and $y$ axes.
    pub bilateral: Vector3<f64>,
    pub limits: Vec<LimitEngagement>,
}

/// Angle of the rotation about $z$ closest to the given rotation.
fn planar_angle(rotation: &UnitQuaternion<f64>) -> f64 {
    let r = rotation.to_rotation_matrix();
    let m = r.matrix();
    (m[(1, 0)] - m[(0, 1)]).atan2(m[(0, 0)] + m[(1, 1)])
}

/// Shifts `theta` by a multiple of $2 \pi$ so that it lies closest to `reference`.
fn unwrap_angle(theta: f64, reference: f64) -> f64 {
    let turns = ((reference - theta) / (2.0 * PI)).round();
    theta + 2.0 * PI * turns
}

fn rotation_about_z(theta: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), theta)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanarCoupling {
    ranges: [Interval; 3],
    values: [f64; 3],
    tolerances: CouplingTolerances,
}

impl Default for PlanarCoupling {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanarCoupling {
    pub fn new() -> Self {
        Self {
            ranges: [Interval::unbounded(); 3],
            values: [0.0; 3],
            tolerances: CouplingTolerances::default(),
        }
    }

    pub fn range(&self, coordinate: PlanarCoordinate) -> Interval {
        self.ranges[coordinate.index()]
    }

    pub fn minimum(&self, coordinate: PlanarCoordinate) -> f64 {
        self.range(coordinate).lower()
    }

    pub fn maximum(&self, coordinate: PlanarCoordinate) -> f64 {
        self.range(coordinate).upper()
    }

    pub fn set_minimum(&mut self, coordinate: PlanarCoordinate, minimum: f64) {
        let range = &mut self.ranges[coordinate.index()];
        *range = range.with_lower(minimum);
    }

    pub fn set_maximum(&mut self, coordinate: PlanarCoordinate, maximum: f64) {
        let range = &mut self.ranges[coordinate.index()];
        *range = range.with_upper(maximum);
    }

    pub fn tolerances(&self) -> &CouplingTolerances {
        &self.tolerances
    }

    pub fn set_break_speed(&mut self, break_speed: f64) {
        self.tolerances.break_speed = break_speed;
    }

    pub fn set_break_accel(&mut self, break_accel: f64) {
        self.tolerances.break_accel = break_accel;
    }

    pub fn set_contact_distance(&mut self, contact_distance: f64) {
        self.tolerances.contact_distance = contact_distance;
    }

    /// Projects $T_{CD}$ onto the constraint manifold, giving $T_{GD}$.
    ///
    /// The $z$ translation is removed and the rotation is replaced by the rotation about $z$ by
    /// $\theta = \operatorname{atan2}(R_{10} - R_{01}, R_{00} + R_{11})$.
    pub fn project_to_constraints(&self, tcd: &RigidTransform3<f64>) -> RigidTransform3<f64> {
        let p = tcd.translation.vector;
        RigidTransform3::from_parts(
            Translation3::new(p.x, p.y, 0.0),
            rotation_about_z(planar_angle(&tcd.rotation)),
        )
    }

    /// The value of a coordinate.
    ///
    /// With a transform $T_{CD}$, the coordinate is extracted from its projection. The angle is
    /// never reduced modulo $2 \pi$: it is placed on the branch nearest the last value that was
    /// set. Without a transform the last value that was set is returned.
    pub fn coordinate(&self, coordinate: PlanarCoordinate, tcd: Option<&RigidTransform3<f64>>) -> f64 {
        let last = self.values[coordinate.index()];
        let tcd = match tcd {
            Some(tcd) => tcd,
            None => return last,
        };
        let tgd = self.project_to_constraints(tcd);
        match coordinate {
            PlanarCoordinate::X => tgd.translation.vector.x,
            PlanarCoordinate::Y => tgd.translation.vector.y,
            PlanarCoordinate::Theta => unwrap_angle(planar_angle(&tgd.rotation), last),
        }
    }

    /// Clamps `value` to the coordinate range and stores it.
    ///
    /// If `tgd` is given, it is projected onto the constraints in place and the coordinate is
    /// written into it.
    pub fn set_coordinate(
        &mut self,
        coordinate: PlanarCoordinate,
        tgd: Option<&mut RigidTransform3<f64>>,
        value: f64,
    ) {
        let value = self
            .range(coordinate)
            .make_valid(coordinate.name(), value);
        self.values[coordinate.index()] = value;

        if let Some(tgd) = tgd {
            let mut projected = self.project_to_constraints(tgd);
            match coordinate {
                PlanarCoordinate::X => projected.translation.vector.x = value,
                PlanarCoordinate::Y => projected.translation.vector.y = value,
                PlanarCoordinate::Theta => projected.rotation = rotation_about_z(value),
            }
            *tgd = projected;
        }
    }

    pub fn constraint_errors(&self, tcd: &RigidTransform3<f64>) -> ConstraintErrors {
        let tgd = self.project_to_constraints(tcd);
        let w = (tgd.rotation.inverse() * tcd.rotation).scaled_axis();
        let bilateral = Vector3::new(tcd.translation.vector.z, w.x, w.y);

        let contact_distance = self.tolerances.contact_distance;
        let mut limits = Vec::new();
        for coordinate in PlanarCoordinate::ALL {
            let range = self.range(coordinate);
            if !range.is_bounded() {
                continue;
            }
            let value = self.coordinate(coordinate, Some(tcd));
            let to_lower = value - range.lower();
            if to_lower <= contact_distance {
                limits.push(LimitEngagement {
                    coordinate,
                    bound: LimitBound::Lower,
                    distance: to_lower,
                });
            }
            let to_upper = range.upper() - value;
            if to_upper <= contact_distance {
                limits.push(LimitEngagement {
                    coordinate,
                    bound: LimitBound::Upper,
                    distance: to_upper,
                });
            }
        }

        ConstraintErrors { bilateral, limits }
    }
}
