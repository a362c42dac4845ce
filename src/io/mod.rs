//! Record input and output.
//!
//! - `csv` - headerless delimited records, `name,postcode,lat,lon`
//! - `geojson` - FeatureCollection of Point features for map clients
//! - `file` - stdin/stdout or file endpoints, gzip by `.gz` extension, atomic file writes

pub(crate) mod csv;
pub(crate) mod file;
pub(crate) mod geojson;

pub use csv::{read_points, write_csv, PointReader};
pub use file::{open_input, read_input, Sink};
pub use geojson::write_geojson;
