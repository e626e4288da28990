//! Joints that constrain the relative motion of two rigid bodies.
//!
//! A joint connects frame C, attached to body A, with frame D, attached to body B or to ground.
//! Its [coupling](coupling) restricts the relative transform $T_{CD}$ to a manifold and exposes
//! the free coordinates of that manifold. The joint itself holds the attachments, reconciles body
//! poses when a coordinate is set and mirrors the coupling's ranges for a host application.
//!
//! Joint coordinates are exchanged with the host as `f64`, with angles in degrees.
pub mod body;
pub mod coupling;
pub mod interval;
pub mod joint;
pub mod planar;
pub mod render;

pub use body::{BodyId, BodyPoses, BodyRegistry};
pub use coupling::{ConstraintErrors, CouplingTolerances, LimitBound, LimitEngagement, PlanarCoordinate, PlanarCoupling};
pub use interval::{Interval, ParseIntervalError};
pub use joint::{JointBase, JointError};
pub use planar::PlanarJoint;
pub use render::{LineStyle, RenderProps, Renderer};
