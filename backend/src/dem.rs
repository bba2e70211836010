use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use shared::Coordinate;
use thiserror::Error;

use crate::error::ProviderError;
use crate::provider::ElevationProvider;

#[derive(Debug, Error)]
pub enum DemLoadError {
    #[error("failed to open DEM file {path:?}: {source}")]
    Open {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to read DEM data: {0}")]
    Read(#[from] std::io::Error),
    #[error("DEM file missing header field `{0}`")]
    MissingHeader(&'static str),
    #[error("DEM file has invalid value for `{field}`: `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("DEM grid has {expected} cells but file provided {actual}")]
    UnexpectedCellCount { expected: usize, actual: usize },
}

/// ESRI ASCII grid in geographic coordinates (cell size in degrees).
#[derive(Debug)]
pub struct ArcAsciiDem {
    ncols: usize,
    nrows: usize,
    xllcorner: f64,
    yllcorner: f64,
    cellsize: f64,
    nodata: f64,
    lat_max: f64,
    lng_max: f64,
    values: Vec<f64>,
}

#[derive(Default)]
struct Header {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xllcorner: Option<f64>,
    yllcorner: Option<f64>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, DemLoadError> {
    value.parse().map_err(|_| DemLoadError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl ArcAsciiDem {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DemLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DemLoadError::Open {
            source,
            path: path.into(),
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DemLoadError> {
        let reader = BufReader::new(reader);
        let mut header = Header::default();
        let mut values = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(first) = parts.next() else {
                continue;
            };

            if first.starts_with(|c: char| c.is_ascii_alphabetic()) {
                let key = first.to_lowercase();
                let value = parts.next().ok_or(DemLoadError::MissingHeader("value"))?;
                match key.as_str() {
                    "ncols" => header.ncols = Some(parse_field("ncols", value)?),
                    "nrows" => header.nrows = Some(parse_field("nrows", value)?),
                    "xllcorner" | "xllcenter" => {
                        header.xllcorner = Some(parse_field("xllcorner", value)?)
                    }
                    "yllcorner" | "yllcenter" => {
                        header.yllcorner = Some(parse_field("yllcorner", value)?)
                    }
                    "cellsize" => header.cellsize = Some(parse_field("cellsize", value)?),
                    "nodata_value" => header.nodata = Some(parse_field("nodata_value", value)?),
                    _ => {}
                }
                continue;
            }

            for token in std::iter::once(first).chain(parts) {
                values.push(parse_field::<f64>("value", token)?);
            }
        }

        let ncols = header.ncols.ok_or(DemLoadError::MissingHeader("ncols"))?;
        let nrows = header.nrows.ok_or(DemLoadError::MissingHeader("nrows"))?;
        let xllcorner = header
            .xllcorner
            .ok_or(DemLoadError::MissingHeader("xllcorner"))?;
        let yllcorner = header
            .yllcorner
            .ok_or(DemLoadError::MissingHeader("yllcorner"))?;
        let cellsize = header
            .cellsize
            .ok_or(DemLoadError::MissingHeader("cellsize"))?;
        let nodata = header.nodata.unwrap_or(-9999.0);

        let expected = ncols * nrows;
        if expected == 0 || values.len() != expected {
            return Err(DemLoadError::UnexpectedCellCount {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            ncols,
            nrows,
            xllcorner,
            yllcorner,
            cellsize,
            nodata,
            lat_max: yllcorner + cellsize * ((nrows - 1) as f64),
            lng_max: xllcorner + cellsize * ((ncols - 1) as f64),
            values,
        })
    }

    /// Bilinear sample; `None` outside the grid or over nodata-only cells.
    pub fn sample(&self, lat: f64, lng: f64) -> Option<f64> {
        if lng < self.xllcorner || lng > self.lng_max || lat < self.yllcorner || lat > self.lat_max
        {
            return None;
        }
        let col = ((lng - self.xllcorner) / self.cellsize).clamp(0.0, (self.ncols - 1) as f64);
        let row = ((self.lat_max - lat) / self.cellsize).clamp(0.0, (self.nrows - 1) as f64);

        let x0 = col.floor() as usize;
        let y0 = row.floor() as usize;
        let x1 = (x0 + 1).min(self.ncols - 1);
        let y1 = (y0 + 1).min(self.nrows - 1);

        let q11 = self.value(y0, x0);
        let q21 = self.value(y0, x1);
        let q12 = self.value(y1, x0);
        let q22 = self.value(y1, x1);

        let tx = col - x0 as f64;
        let ty = row - y0 as f64;

        match (q11, q21, q12, q22) {
            (Some(a), Some(b), Some(c), Some(d)) => {
                let top = a * (1.0 - tx) + b * tx;
                let bottom = c * (1.0 - tx) + d * tx;
                Some(top * (1.0 - ty) + bottom * ty)
            }
            _ => {
                let known: Vec<f64> = [q11, q21, q12, q22].into_iter().flatten().collect();
                if known.is_empty() {
                    None
                } else {
                    Some(known.iter().sum::<f64>() / known.len() as f64)
                }
            }
        }
    }

    fn value(&self, row: usize, col: usize) -> Option<f64> {
        let value = self.values.get(row * self.ncols + col).copied()?;
        if (value - self.nodata).abs() < f64::EPSILON {
            None
        } else {
            Some(value)
        }
    }
}

/// Local grid elevation source. A batch with any uncovered coordinate fails
/// as a whole.
#[derive(Debug, Clone)]
pub struct DemElevation {
    grid: Arc<ArcAsciiDem>,
}

impl DemElevation {
    pub fn new(grid: ArcAsciiDem) -> Self {
        Self {
            grid: Arc::new(grid),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DemLoadError> {
        let path = path.as_ref();
        let grid = ArcAsciiDem::from_path(path)?;
        tracing::info!("Loaded local DEM grid from {}", path.display());
        Ok(Self::new(grid))
    }

    pub fn lookup(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        let mut values = Vec::with_capacity(points.len());
        let mut missing = Vec::new();

        for point in points {
            match self.grid.sample(point.lat, point.lng) {
                Some(val) => values.push(val),
                None => missing.push(*point),
            }
        }

        if !missing.is_empty() {
            tracing::warn!(
                "Local DEM does not cover {} coordinate(s): {:?}",
                missing.len(),
                &missing[..missing.len().min(5)]
            );
            return Err(ProviderError::Coverage {
                missing: missing.len(),
            });
        }
        Ok(values)
    }
}

impl ElevationProvider for DemElevation {
    async fn get_elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        self.lookup(points)
    }
}
