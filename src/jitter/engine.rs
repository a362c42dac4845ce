use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::jitter::{claimed::ClaimedSet, sample::{adjust_for_latitude, random_disk_offset}};
use crate::types::{CellKey, JitteredPoint, Point};

/// Search parameters. Defaults reproduce the reference behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterConfig {
    /// Radius of the first random sample, in meters.
    pub start_radius_m: f64,
    /// Radius growth after every sample, in meters.
    pub radius_step_m: f64,
    /// Flat-earth conversion factor from meters to degrees.
    pub meters_per_degree: f64,
    /// Log a warning once a single record needs more samples than this.
    /// Diagnostic only, the search itself stays unbounded.
    pub warn_after: Option<u64>,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            start_radius_m: 5.0,
            radius_step_m: 1.0,
            meters_per_degree: 111_000.0,
            warn_after: None,
        }
    }
}

impl JitterConfig {
    /// Convert a radius in meters to degrees.
    #[inline] pub fn radius_deg(&self, radius_m: f64) -> f64 { radius_m / self.meters_per_degree }
}

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JitterStats {
    pub records: u64,        // points processed
    pub jittered: u64,       // points moved off their own cell
    pub total_attempts: u64, // random samples drawn across all points
    pub max_attempts: u64,   // worst single point
}

impl JitterStats {
    fn record(&mut self, attempts: u64) {
        self.records += 1;
        if attempts > 0 { self.jittered += 1 }
        self.total_attempts += attempts;
        self.max_attempts = self.max_attempts.max(attempts);
    }
}

/// Find a free grid cell near `point`, claim it in `claimed`, and return the
/// emitted point.
///
/// The original cell is tried first. On collision, random offsets are drawn
/// inside a disk around the *original* coordinate whose radius starts at
/// `config.start_radius_m` and grows by `config.radius_step_m` after every
/// sample. There is no attempt limit.
pub fn jitter_point<R: Rng + ?Sized>(
    point: &Point,
    claimed: &mut ClaimedSet,
    config: &JitterConfig,
    rng: &mut R,
) -> JitteredPoint {
    let (lat0, lon0) = (point.lat(), point.lon());
    let mut key = CellKey::of(lat0, lon0);
    let mut radius = config.start_radius_m;
    let mut accepted = None;
    let mut attempts = 0u64;

    while !claimed.claim(key) {
        let (dx, dy) = random_disk_offset(rng, config.radius_deg(radius));
        key = CellKey::of(lat0 + dy, lon0 + adjust_for_latitude(dx, lat0));
        accepted = Some(radius);
        radius += config.radius_step_m;
        attempts += 1;

        if config.warn_after == Some(attempts) {
            warn!(
                "[jitter] {} ({}) still colliding after {} samples, radius now {} m",
                point.name(), point.postcode(), attempts, radius,
            );
        }
    }

    JitteredPoint {
        name: point.name().to_string(),
        postcode: point.postcode().to_string(),
        lat: key.lat(),
        lon: key.lon(),
        attempts,
        radius: accepted,
    }
}

/// Stateful jitter transform for one run: owns the claimed cells, the search
/// configuration and the random source.
#[derive(Debug, Clone)]
pub struct JitterEngine<R = ChaCha8Rng> {
    claimed: ClaimedSet,
    config: JitterConfig,
    rng: R,
    stats: JitterStats,
}

impl JitterEngine<ChaCha8Rng> {
    /// Engine with a deterministic random sequence.
    pub fn seeded(seed: u64) -> Self { Self::new(ChaCha8Rng::seed_from_u64(seed)) }
}

impl<R: Rng> JitterEngine<R> {
    pub fn new(rng: R) -> Self { Self::with_config(rng, JitterConfig::default()) }

    pub fn with_config(rng: R, config: JitterConfig) -> Self {
        Self::with_claimed(rng, config, ClaimedSet::new())
    }

    /// Resume from cells claimed elsewhere.
    pub fn with_claimed(rng: R, config: JitterConfig, claimed: ClaimedSet) -> Self {
        Self { claimed, config, rng, stats: JitterStats::default() }
    }

    #[inline] pub fn config(&self) -> &JitterConfig { &self.config }

    #[inline] pub fn claimed(&self) -> &ClaimedSet { &self.claimed }

    #[inline] pub fn stats(&self) -> JitterStats { self.stats }

    /// Give up the engine, keeping the claimed cells.
    pub fn into_claimed(self) -> ClaimedSet { self.claimed }

    /// Jitter one point. Each call claims exactly one new cell.
    pub fn jitter(&mut self, point: &Point) -> JitteredPoint {
        let out = jitter_point(point, &mut self.claimed, &self.config, &mut self.rng);
        self.stats.record(out.attempts);
        if out.is_displaced() {
            debug!(
                "[jitter] moved {} ({}) to {},{} after {} samples",
                out.name, out.postcode, out.lat, out.lon, out.attempts,
            );
        }
        out
    }

    /// Jitter a sequence of points in order.
    pub fn jitter_all<'a>(&mut self, points: impl IntoIterator<Item = &'a Point>) -> Vec<JitteredPoint> {
        points.into_iter().map(|point| self.jitter(point)).collect()
    }
}
