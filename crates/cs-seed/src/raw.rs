//! Raw station file reader.
//!
//! # File format
//!
//! One header line, then one station per line.  The delimiter is detected
//! from the header: whichever of `,` `;` tab or space occurs most often.
//!
//! ```text
//! stat.id;lng;lat;capacity;parking_coef;fleet_coef
//! 12;2.3522;48.8566;10;0.7;0.6
//! 13;2.2945;48.8584;;0.3;0.4
//! ```
//!
//! | Column         | Aliases                | Required by                |
//! |----------------|------------------------|----------------------------|
//! | `stat.id`      | `id`                   | all                        |
//! | `lng`          | `lon`, `longitude`     | all                        |
//! | `lat`          | `latitude`             | all                        |
//! | `capacity`     |                        | optional                   |
//! | `name`         |                        | optional                   |
//! | `parking_coef` |                        | coefficient seeding        |
//! | `fleet_coef`   |                        | coefficient seeding        |
//!
//! Other columns are ignored.  An empty optional field reads as absent.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{SeedError, SeedResult};

/// One row of a raw station file, before reprojection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStation {
    #[serde(rename = "stat.id", alias = "id")]
    pub id: String,

    #[serde(rename = "lng", alias = "lon", alias = "longitude")]
    pub lon: f64,

    #[serde(alias = "latitude")]
    pub lat: f64,

    #[serde(default)]
    pub capacity: Option<u32>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub parking_coef: Option<f64>,

    #[serde(default)]
    pub fleet_coef: Option<f64>,
}

/// Read every station from the file at `path`, stopping after `limit` rows
/// if given.
pub fn read_stations(path: &Path, limit: Option<usize>) -> SeedResult<Vec<RawStation>> {
    let file = std::fs::File::open(path).map_err(|e| {
        log::error!("cannot open station file {}: {e}", path.display());
        e
    })?;
    read_stations_reader(file, limit)
}

/// Like [`read_stations`] but accepts any `Read` source.
pub fn read_stations_reader<R: Read>(mut reader: R, limit: Option<usize>) -> SeedResult<Vec<RawStation>> {
    let mut text = String::new();
    if let Err(e) = reader.read_to_string(&mut text) {
        log::error!("cannot read station file: {e}");
        return Err(e.into());
    }

    let header = text.lines().next().unwrap_or_default();
    let delimiter = detect_delimiter(header);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut stations = Vec::new();
    for (row, result) in csv_reader.deserialize::<RawStation>().take(limit.unwrap_or(usize::MAX)).enumerate() {
        match result {
            Ok(station) => stations.push(station),
            Err(e) => {
                log::error!("malformed station row {}: {e}", row + 1);
                return Err(SeedError::Parse(e.to_string()));
            }
        }
    }

    log::debug!(
        "read {} station(s), delimiter {:?}",
        stations.len(),
        delimiter as char
    );
    Ok(stations)
}

/// The candidate delimiter occurring most often in `header` (`,` if none).
pub fn detect_delimiter(header: &str) -> u8 {
    let mut best = (b',', 0usize);
    for d in [b',', b';', b'\t', b' '] {
        let n = header.bytes().filter(|&b| b == d).count();
        if n > best.1 {
            best = (d, n);
        }
    }
    best.0
}
