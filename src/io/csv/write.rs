//! CSV writing operations.

use std::io::Write;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::types::JitteredPoint;

/// Write headerless `name,postcode,lat,lon` records in input order.
pub fn write_csv<W: Write>(points: &[JitteredPoint], delimiter: u8, writer: W) -> Result<()> {
    let mut df = points_frame(points)?;
    CsvWriter::new(writer)
        .include_header(false)
        .with_separator(delimiter)
        .finish(&mut df)
        .context("[io::csv::write] Failed to write point records")
}

fn points_frame(points: &[JitteredPoint]) -> Result<DataFrame> {
    let names = points.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
    let postcodes = points.iter().map(|p| p.postcode.clone()).collect::<Vec<_>>();
    let lats = points.iter().map(|p| p.lat).collect::<Vec<_>>();
    let lons = points.iter().map(|p| p.lon).collect::<Vec<_>>();

    Ok(DataFrame::new(vec![
        Series::new("name".into(), names).into(),
        Series::new("postcode".into(), postcodes).into(),
        Series::new("lat".into(), lats).into(),
        Series::new("lon".into(), lons).into(),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv::read_points;

    fn point(name: &str, postcode: &str, lat: f64, lon: f64) -> JitteredPoint {
        JitteredPoint { name: name.into(), postcode: postcode.into(), lat, lon, attempts: 0, radius: None }
    }

    #[test]
    fn writes_one_line_per_point() {
        let mut out = Vec::new();
        write_csv(&[point("A", "X", 51.5, -0.1), point("B", "Y", 51.5003, -0.1)], b',', &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().starts_with("A,X,51.5"));
    }

    #[test]
    fn output_reads_back() {
        let written = [point("Fish, Chips", "01234", 1.25, -2.5), point("B", "", 0.0, 180.0)];
        let mut out = Vec::new();
        write_csv(&written, b',', &mut out).unwrap();

        let points = read_points(&out, b',').unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name(), "Fish, Chips");
        assert_eq!(points[0].postcode(), "01234");
        assert_eq!((points[0].lat(), points[0].lon()), (1.25, -2.5));
        assert_eq!((points[1].lat(), points[1].lon()), (0.0, 180.0));
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut out = Vec::new();
        write_csv(&[], b',', &mut out).unwrap();
        assert!(out.is_empty());
    }
}
