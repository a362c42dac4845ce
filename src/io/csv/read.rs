//! CSV reading operations.

use std::{io::{BufRead, Cursor}, sync::Arc};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType, Field, Schema, SchemaRef}};

use crate::types::Point;

/// Parse headerless `name,postcode,lat,lon` records.
///
/// Any malformed record aborts the whole read: too many fields, a missing
/// latitude or longitude, or a coordinate that is not a finite number. Empty
/// name or postcode fields are kept as empty strings. Empty lines are skipped.
pub fn read_points(bytes: &[u8], delimiter: u8) -> Result<Vec<Point>> {
    let records = bytes.split_inclusive(|&b| b == b'\n')
        .filter(|line| !is_empty_line(line))
        .flatten()
        .copied()
        .collect::<Vec<_>>();
    parse_records(&records, delimiter, 1)
}

/// Reads records one at a time, so each can be jittered and written before
/// the rest of the input has arrived.
pub struct PointReader<R> {
    reader: R,
    delimiter: u8,
    row: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> PointReader<R> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        Self { reader, delimiter, row: 0, buf: Vec::new() }
    }

    /// Next raw record: whole lines until quotes balance, so quoted fields may span lines.
    fn next_record(&mut self) -> Result<bool> {
        self.buf.clear();
        loop {
            let read = self.reader.read_until(b'\n', &mut self.buf)
                .context("[io::csv::read] Failed to read record")?;
            let quotes = self.buf.iter().filter(|&&b| b == b'"').count();
            if read == 0 || quotes % 2 == 0 { return Ok(!self.buf.is_empty()) }
        }
    }
}

impl<R: BufRead> Iterator for PointReader<R> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Result<Point>> {
        loop {
            match self.next_record() {
                Err(e) => return Some(Err(e)),
                Ok(false) => return None,
                Ok(true) if is_empty_line(&self.buf) => continue,
                Ok(true) => {
                    self.row += 1;
                    let point = parse_records(&self.buf, self.delimiter, self.row).and_then(|points| {
                        ensure!(points.len() == 1, "[io::csv::read] Record {} is not a single record", self.row);
                        Ok(points.into_iter().next())
                    });
                    return point.transpose();
                }
            }
        }
    }
}

#[inline]
fn is_empty_line(line: &[u8]) -> bool {
    matches!(line, b"" | b"\n" | b"\r\n")
}

/// Parse non-empty record lines; `first_row` numbers records in error messages.
fn parse_records(bytes: &[u8], delimiter: u8, first_row: usize) -> Result<Vec<Point>> {
    if bytes.is_empty() { return Ok(Vec::new()) }

    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(point_schema()))
        .map_parse_options(|po| po.with_separator(delimiter))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to parse point records from record {}", first_row))?;

    points_from_frame(&df, first_row)
}

/// Explicit column types; name and postcode stay strings so leading zeros survive.
fn point_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new("name".into(), DataType::String),
        Field::new("postcode".into(), DataType::String),
        Field::new("lat".into(), DataType::Float64),
        Field::new("lon".into(), DataType::Float64),
    ]))
}

fn points_from_frame(df: &DataFrame, first_row: usize) -> Result<Vec<Point>> {
    let names = df.column("name")?.str()?;
    let postcodes = df.column("postcode")?.str()?;
    let lats = df.column("lat")?.f64()?;
    let lons = df.column("lon")?.f64()?;

    names.into_iter()
        .zip(postcodes.into_iter())
        .zip(lats.into_iter().zip(lons.into_iter()))
        .enumerate()
        .map(|(i, ((name, postcode), (lat, lon)))| {
            let row = first_row + i;
            let Some(lat) = lat else { anyhow::bail!("[io::csv::read] Record {} has no latitude", row) };
            let Some(lon) = lon else { anyhow::bail!("[io::csv::read] Record {} has no longitude", row) };
            ensure!(lat.is_finite() && lon.is_finite(), "[io::csv::read] Record {} has a non-finite coordinate", row);
            Ok(Point::new(name.unwrap_or_default(), postcode.unwrap_or_default(), lat, lon))
        })
        .collect()
}
