use biomech::algebra::RigidTransform3;
use biomech::nalgebra::{Translation3, UnitQuaternion, Vector3};
use biomech::property::{PropertyChange, PropertyEvent, PropertyObserver};
use std::sync::{Arc, Mutex};

mod coupling;
mod interval;

fn rotation_about_z(theta: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), theta)
}

/// Translation (1, 2, 3) with a rotation of 0.5 rad about z following a 0.1 rad tilt about x.
fn tilted_planar_transform() -> RigidTransform3<f64> {
    let rotation = rotation_about_z(0.5) * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.1);
    RigidTransform3::from_parts(Translation3::new(1.0, 2.0, 3.0), rotation)
}

fn recording_observer() -> (PropertyObserver, Arc<Mutex<Vec<(String, PropertyEvent)>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let observer_log = Arc::clone(&log);
    let observer: PropertyObserver = Arc::new(move |change: &PropertyChange| {
        observer_log
            .lock()
            .unwrap()
            .push((change.property.to_string(), change.event));
    });
    (observer, log)
}
