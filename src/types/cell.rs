//! Grid snapping and the cell key used for collision detection.

/// Grid resolution: coordinates snap to multiples of 1/4000 degree.
pub const GRID_STEPS_PER_DEGREE: f64 = 4000.0;

/// Decimal places kept after snapping.
pub const DECIMAL_PLACES: usize = 4;

/// Snap a coordinate to the 1/4000-degree grid, then round to 4 decimals.
///
/// The inner step rounds half to even and yields an integral value, so a
/// negative value that snaps to zero becomes `0.0`, never `-0.0`. The outer
/// step is correctly rounded on the exact binary value of the snapped
/// coordinate (ties to even), so near-ties such as `0.00025` resolve the way
/// decimal formatting resolves them.
pub fn round25(value: f64) -> f64 {
    let steps = (value * GRID_STEPS_PER_DEGREE).round_ties_even() + 0.0;
    round_decimals(steps / GRID_STEPS_PER_DEGREE, DECIMAL_PLACES)
}

/// Round to `places` decimals through the decimal representation.
fn round_decimals(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Uniqueness key of a grid cell: the rounded (lat, lon) pair, compared bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    lat: u64,
    lon: u64,
}

impl CellKey {
    /// Key of the cell containing (lat, lon).
    pub fn of(lat: f64, lon: f64) -> Self {
        Self::from_rounded(round25(lat), round25(lon))
    }

    /// Key from coordinates that are already rounded with [`round25`].
    #[inline]
    pub(crate) fn from_rounded(lat: f64, lon: f64) -> Self {
        Self { lat: lat.to_bits(), lon: lon.to_bits() }
    }

    #[inline] pub fn lat(&self) -> f64 { f64::from_bits(self.lat) }

    #[inline] pub fn lon(&self) -> f64 { f64::from_bits(self.lon) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round25_snaps_then_rounds() {
        assert_eq!(round25(0.123456), 0.1235);
        assert_eq!(round25(-0.123456), -0.1235);
        assert_eq!(round25(51.5), 51.5);
        assert_eq!(round25(-0.1), -0.1);
        assert_eq!(round25(51.50012), 51.5);
    }

    #[test]
    fn round25_below_half_step_is_zero() {
        // 0.00012 * 4000 = 0.48, which snaps to 0
        assert_eq!(round25(0.00012), 0.0);
        assert_eq!(round25(0.000125), 0.0);
        assert_eq!(round25(0.0001249), 0.0);
    }

    #[test]
    fn round25_negative_zero_is_positive() {
        let z = round25(-0.00001);
        assert_eq!(z, 0.0);
        assert!(z.is_sign_positive());
    }

    #[test]
    fn round25_quarter_step_near_ties() {
        // 0.00025 sits just above the 4-decimal tie; 0.03125 is an exact tie (to even)
        assert_eq!(round25(0.0002), 0.0003);
        assert_eq!(round25(-0.0002), -0.0003);
        assert_eq!(round25(0.03125), 0.0312);
    }

    #[test]
    fn round25_boundaries() {
        assert_eq!(round25(179.99999), 180.0);
        assert_eq!(round25(-89.99994), -90.0);
    }

    #[test]
    fn round25_is_idempotent() {
        for x in [0.123456, -0.00001, 0.0002, 51.5, -0.1, 12.34567, -45.67891] {
            let once = round25(x);
            assert_eq!(round25(once), once);
        }
    }

    #[test]
    fn cell_key_equality_follows_rounding() {
        assert_eq!(CellKey::of(51.50001, -0.10001), CellKey::of(51.5, -0.1));
        assert_ne!(CellKey::of(51.5, -0.1), CellKey::of(51.5003, -0.1));
        assert_eq!(CellKey::of(-0.00001, 0.00001), CellKey::of(0.0, 0.0));
    }

    #[test]
    fn cell_key_exposes_rounded_coordinates() {
        let key = CellKey::of(0.123456, -0.123456);
        assert_eq!(key.lat(), 0.1235);
        assert_eq!(key.lon(), -0.1235);
    }
}
