use geo::Point as Coord;
use serde::Serialize;

/// A named input location. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    name: String,
    postcode: String, // opaque, kept verbatim (leading zeros, spaces)
    coord: Coord<f64>, // x = lon, y = lat, degrees
}

impl Point {
    /// Create a point from latitude and longitude in degrees.
    pub fn new(name: impl Into<String>, postcode: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into(), postcode: postcode.into(), coord: Coord::new(lon, lat) }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn postcode(&self) -> &str { &self.postcode }

    #[inline] pub fn lat(&self) -> f64 { self.coord.y() }

    #[inline] pub fn lon(&self) -> f64 { self.coord.x() }

    /// The coordinate as a `geo` point (x = longitude, y = latitude).
    #[inline] pub fn coord(&self) -> Coord<f64> { self.coord }
}

/// A point after jittering: identity fields copied from the input, coordinates
/// snapped to a claimed grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JitteredPoint {
    pub name: String,
    pub postcode: String,
    pub lat: f64,
    pub lon: f64,
    /// Random samples drawn before a free cell was found (0 if the original cell was free).
    pub attempts: u64,
    /// Search radius in meters of the accepted sample, if any sample was drawn.
    pub radius: Option<f64>,
}

impl JitteredPoint {
    /// True if the emitted coordinate is the rounding of the input coordinate.
    #[inline] pub fn is_displaced(&self) -> bool { self.attempts > 0 }
}
