use std::f64::consts::PI;

use rand::Rng;

/// Map two uniform draws in [0, 1) to an offset uniformly distributed over a
/// disk of radius `radius`: `w = radius·√u`, `θ = 2πv`.
/// Returns `(dx, dy)` in the disk's units.
pub fn disk_offset(radius: f64, u: f64, v: f64) -> (f64, f64) {
    let w = radius * u.sqrt();
    let t = 2.0 * PI * v;
    (w * t.cos(), w * t.sin())
}

/// Stretch an east-west offset in degrees by `1 / cos(lat)`, since a degree of
/// longitude shrinks towards the poles.
#[inline]
pub fn adjust_for_latitude(dx: f64, lat: f64) -> f64 {
    dx / lat.to_radians().cos()
}

/// Draw a random offset inside a disk of `radius` degrees.
pub(crate) fn random_disk_offset<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> (f64, f64) {
    let u: f64 = rng.random();
    let v: f64 = rng.random();
    disk_offset(radius, u, v)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn disk_offset_center_and_edge() {
        assert_eq!(disk_offset(1.0, 0.0, 0.3), (0.0, 0.0));

        let (dx, dy) = disk_offset(2.0, 1.0, 0.0);
        assert!((dx - 2.0).abs() < EPS && dy.abs() < EPS);

        let (dx, dy) = disk_offset(2.0, 1.0, 0.25);
        assert!(dx.abs() < EPS && (dy - 2.0).abs() < EPS);
    }

    #[test]
    fn disk_offset_scales_with_sqrt_u() {
        let (dx, dy) = disk_offset(1.0, 0.25, 0.5);
        assert!((dx + 0.5).abs() < EPS && dy.abs() < EPS);
    }

    #[test]
    fn random_offsets_stay_inside_disk() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let (dx, dy) = random_disk_offset(&mut rng, 0.5);
            assert!(dx.hypot(dy) <= 0.5 + EPS);
        }
    }

    #[test]
    fn longitude_correction_grows_with_latitude() {
        let dx = 5.0 / 111_000.0;
        assert!((adjust_for_latitude(dx, 0.0) - dx).abs() < EPS);
        assert!((adjust_for_latitude(dx, 60.0) - 2.0 * dx).abs() < EPS);
        assert!(adjust_for_latitude(dx, 60.0) > adjust_for_latitude(dx, 0.0));
        assert!(adjust_for_latitude(-dx, -60.0) < -dx);
    }
}
