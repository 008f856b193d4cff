use nalgebra::Vector3;

/// Pole of the mean ecliptic of B1950 in FK4 components.
pub const REFERENCE_POLE: [f64; 3] = [0.0, -0.397881202, 0.917436945];

pub fn spin_axis(ra: f64, dec: f64) -> Vector3<f64> {
    Vector3::new(ra.cos() * dec.cos(), ra.sin() * dec.cos(), dec.sin())
}

/// Twist of the instrument about the spin axis `(ra, dec)`, measured from the
/// in-plane normal of the axis to the plane containing the axis and `pole`.
///
/// The attitude stream carries a twist of its own, but it belongs to the
/// magnetometer boom, so the detector's twist is rebuilt from the pole.
pub fn derive_twist(ra: f64, dec: f64, pole: &Vector3<f64>) -> f64 {
    let s = spin_axis(ra, dec);
    let n = Vector3::new(s.y, -s.x, 0.0);
    let p = s.cross(pole);

    let twist = n.angle(&p);
    if pole.dot(&n) < 0.0 {
        -twist
    } else {
        twist
    }
}
