//! Loader for `shapes.txt`-style route tables.
//!
//! One row per route point: `name, latitude, longitude, ...`, preceded by a
//! header row. Points of a route appear in travel order; routes are ordered
//! by first appearance.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{LanemapError, LoadError, Result};
use crate::route::{GeoPoint, RouteSet};

/// Column positions in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapesColumns {
    pub name: usize,
    pub latitude: usize,
    pub longitude: usize,
}

impl Default for ShapesColumns {
    fn default() -> Self {
        Self {
            name: 0,
            latitude: 1,
            longitude: 2,
        }
    }
}

impl ShapesColumns {
    fn required(&self) -> usize {
        self.name.max(self.latitude).max(self.longitude) + 1
    }
}

/// Reads routes from CSV text.
///
/// Rows too short to hold all three columns are skipped.
///
/// # Errors
///
/// Returns `LoadError::Csv` on malformed CSV and `LoadError::InvalidNumber`
/// if a coordinate does not parse.
pub fn read_shapes<R: Read>(reader: R, columns: ShapesColumns) -> Result<RouteSet> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut routes = RouteSet::new();
    let mut skipped = 0_usize;
    for record in csv.records() {
        let record = record.map_err(LoadError::from)?;
        if record.len() < columns.required() {
            skipped += 1;
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let latitude = parse_coordinate(&record, columns.latitude, "latitude", line)?;
        let longitude = parse_coordinate(&record, columns.longitude, "longitude", line)?;
        let name = record.get(columns.name).unwrap_or_default();
        trace!(line, name, latitude, longitude, "shape point");
        routes.push_point(name, GeoPoint::new(latitude, longitude));
    }

    debug!(routes = routes.len(), skipped, "read shapes");
    Ok(routes)
}

/// Reads routes from a file.
///
/// # Errors
///
/// Returns `LanemapError::Io` if the file cannot be opened, otherwise the
/// errors of [`read_shapes`].
pub fn read_shapes_file(path: impl AsRef<Path>, columns: ShapesColumns) -> Result<RouteSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LanemapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_shapes(file, columns)
}

fn parse_coordinate(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            LoadError::InvalidNumber {
                line,
                column,
                value: raw.to_owned(),
            }
            .into()
        })
}
