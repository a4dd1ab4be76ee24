//! TSP instance definition and TSPLIB-subset file parsing.

use crate::matrix::DistanceMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Earth radius used by the TSPLIB geographic distance, in kilometers.
const EARTH_RADIUS: f64 = 6378.388;

/// Errors raised while reading a TSP instance file.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("cannot read instance file: {0}")]
    Io(#[from] io::Error),
    #[error("missing {0} header entry")]
    MissingHeader(&'static str),
    #[error("malformed {key} header entry: {value:?}")]
    MalformedHeader { key: &'static str, value: String },
    #[error("unsupported EDGE_WEIGHT_TYPE: {0:?}")]
    UnsupportedEdgeWeightType(String),
    #[error("malformed node line {line:?}")]
    MalformedNode { line: String },
    #[error("node label {label} outside [1, {dimension}]")]
    LabelOutOfRange { label: usize, dimension: usize },
    #[error("expected {expected} node lines, found {found}")]
    WrongNodeCount { expected: usize, found: usize },
}

/// Supported coordinate interpretations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeWeightType {
    /// Euclidean distance rounded to the nearest integer.
    Euc2d,
    /// TSPLIB geographic distance over latitude/longitude coordinates.
    Geo,
}

impl FromStr for EdgeWeightType {
    type Err = InstanceError;

    fn from_str(s: &str) -> Result<Self, InstanceError> {
        match s {
            "EUC_2D" => Ok(EdgeWeightType::Euc2d),
            "GEO" => Ok(EdgeWeightType::Geo),
            other => Err(InstanceError::UnsupportedEdgeWeightType(other.to_string())),
        }
    }
}

/// A 2-D point, either Euclidean `(x, y)` or geographic
/// `(latitude, longitude)` in the TSPLIB degrees.minutes encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A parsed TSP instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspInstance {
    pub name: String,
    pub dimension: usize,
    pub edge_weight_type: EdgeWeightType,
    pub points: Vec<Point>,
}

impl TspInstance {
    /// Load an instance from a TSPLIB-style file.
    ///
    /// The header is keyword-driven: `NAME`, `TYPE` and `COMMENT` entries
    /// are recorded or skipped, `DIMENSION` and `EDGE_WEIGHT_TYPE` are
    /// required, and `NODE_COORD_SECTION` opens the points section. Each
    /// node line is `<label> <x> <y>` with `label` in `[1, N]`; the point
    /// is stored at index `label - 1`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InstanceError> {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);
        let mut lines = reader.lines();

        let mut name = String::new();
        let mut dimension: Option<usize> = None;
        let mut edge_weight_type: Option<EdgeWeightType> = None;
        let mut in_points = false;

        for line in &mut lines {
            let line = line?;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }

            if trimmed == "NODE_COORD_SECTION" {
                in_points = true;
                break;
            }

            let (key, value) = match trimmed.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (trimmed, ""),
            };

            match key {
                "NAME" => name = value.to_string(),
                "TYPE" | "COMMENT" => {}
                "DIMENSION" => {
                    let parsed =
                        value
                            .parse::<usize>()
                            .map_err(|_| InstanceError::MalformedHeader {
                                key: "DIMENSION",
                                value: value.to_string(),
                            })?;
                    dimension = Some(parsed);
                }
                "EDGE_WEIGHT_TYPE" => edge_weight_type = Some(value.parse()?),
                _ => {}
            }
        }

        if !in_points {
            return Err(InstanceError::MissingHeader("NODE_COORD_SECTION"));
        }

        let dimension = dimension.ok_or(InstanceError::MissingHeader("DIMENSION"))?;
        let edge_weight_type =
            edge_weight_type.ok_or(InstanceError::MissingHeader("EDGE_WEIGHT_TYPE"))?;

        let mut points = vec![None; dimension];
        let mut found = 0;

        for line in lines {
            let line = line?;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed == "EOF" {
                break;
            }

            let mut fields = trimmed.split_whitespace();

            let malformed = || InstanceError::MalformedNode {
                line: trimmed.to_string(),
            };

            let label: usize = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(malformed)?;
            let x: f64 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(malformed)?;
            let y: f64 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(malformed)?;

            if label < 1 || label > dimension {
                return Err(InstanceError::LabelOutOfRange { label, dimension });
            }

            points[label - 1] = Some(Point { x, y });
            found += 1;

            if found == dimension {
                break;
            }
        }

        if found != dimension || points.iter().any(Option::is_none) {
            return Err(InstanceError::WrongNodeCount {
                expected: dimension,
                found,
            });
        }

        Ok(TspInstance {
            name,
            dimension,
            edge_weight_type,
            points: points.into_iter().flatten().collect(),
        })
    }

    /// Build the dense distance matrix for this instance.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        match self.edge_weight_type {
            EdgeWeightType::Euc2d => DistanceMatrix::from_fn(self.dimension, |i, j| {
                euclidean_distance(&self.points[i], &self.points[j])
            }),
            EdgeWeightType::Geo => {
                let radians: Vec<Point> = self
                    .points
                    .iter()
                    .map(|p| Point {
                        x: to_radians(p.x),
                        y: to_radians(p.y),
                    })
                    .collect();

                DistanceMatrix::from_fn(self.dimension, |i, j| {
                    geographic_distance(&radians[i], &radians[j])
                })
            }
        }
    }
}

/// Euclidean distance rounded to the nearest integer.
pub fn euclidean_distance(i: &Point, j: &Point) -> f64 {
    let dx = i.x - j.x;
    let dy = i.y - j.y;
    (dx * dx + dy * dy).sqrt().round()
}

/// TSPLIB geographic distance between two points already converted to
/// radians: `x` is latitude, `y` is longitude.
pub fn geographic_distance(i: &Point, j: &Point) -> f64 {
    let q1 = (i.y - j.y).cos();
    let q2 = (i.x - j.x).cos();
    let q3 = (i.x + j.x).cos();

    let distance = EARTH_RADIUS * (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).acos() + 1.0;
    distance.trunc()
}

/// Convert a TSPLIB degrees.minutes coordinate to radians.
///
/// The integer part is whole degrees and the fractional part encodes
/// minutes, so `v = DDD.MM` maps to `PI * (DDD + 5 * MM / 3) / 180`.
pub fn to_radians(coordinate: f64) -> f64 {
    let degrees = coordinate.floor();
    let minutes = coordinate - degrees;
    PI * (degrees + 5.0 * minutes / 3.0) / 180.0
}
