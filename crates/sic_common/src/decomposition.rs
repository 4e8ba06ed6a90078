// Copyright contributors to the SIC-POVM Decomposition Checker project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    fs::File,
    io::{self, BufReader, Write},
    path::Path,
};

use log::{debug, trace};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::linalg::{self, CMatrix};

/// The rows of the POVM that the projectors of one measurement contribute to.
/// Position `i` of the key receives projector `i` of the measurement.
pub type RowKey = Vec<usize>;

/// Matrix as stored in an artifact: a list of rows of `[re, im]` pairs.
pub type MatrixData = Vec<Vec<[f64; 2]>>;

/// A claimed decomposition of a POVM into projective measurements.
///
/// The stored projectors are scaled by their selection probability and then
/// multiplied by `scale` to keep small probabilities representable when the
/// decomposition has many measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    dimension: usize,
    scale: f64,
    measurements: BTreeMap<RowKey, Vec<CMatrix>>,
}

impl Decomposition {
    /// Validate the shape of the given measurements.
    /// The dimension is taken from the first matrix found.
    pub fn new(
        measurements: BTreeMap<RowKey, Vec<CMatrix>>,
        scale: f64,
    ) -> Result<Self, ArtifactError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ArtifactError::InvalidScale { scale });
        }

        let dimension = measurements
            .values()
            .flat_map(|projectors| projectors.first())
            .map(|m| m.nrows())
            .next()
            .ok_or(ArtifactError::Empty)?;
        let rows = dimension * dimension;

        for (key, projectors) in measurements.iter() {
            if key.len() != dimension {
                return Err(ArtifactError::KeyLength {
                    key: key.clone(),
                    expected: dimension,
                });
            }
            if projectors.len() != dimension {
                return Err(ArtifactError::ProjectorCount {
                    key: key.clone(),
                    expected: dimension,
                    found: projectors.len(),
                });
            }
            if let Some(row) = key.iter().find(|&&row| row >= rows) {
                return Err(ArtifactError::RowOutOfRange {
                    key: key.clone(),
                    row: *row,
                    rows,
                });
            }
            for (position, m) in projectors.iter().enumerate() {
                if m.shape() != (dimension, dimension) {
                    return Err(ArtifactError::DimensionMismatch {
                        key: key.clone(),
                        position,
                        expected: dimension,
                        found: m.shape(),
                    });
                }
            }
        }

        debug!(
            "Decomposition of a {dimension}-dimensional POVM with {} measurements, scale {scale}",
            measurements.len()
        );
        Ok(Self {
            dimension,
            scale,
            measurements,
        })
    }

    /// Build from projectors that are only scaled by their probability.
    /// Applies the default scale factor: the number of measurements.
    pub fn from_unscaled(
        measurements: BTreeMap<RowKey, Vec<CMatrix>>,
    ) -> Result<Self, ArtifactError> {
        let scale = measurements.len() as f64;
        let scaled = measurements
            .into_iter()
            .map(|(key, projectors)| {
                let projectors = projectors.iter().map(|p| linalg::scale(p, scale)).collect();
                (key, projectors)
            })
            .collect();
        Self::new(scaled, scale)
    }

    /// Read a JSON artifact from disk
    pub fn read(path: &Path) -> Result<Self, ArtifactError> {
        debug!("Reading decomposition from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let artifact: DecompositionArtifact = serde_json::from_reader(reader)?;
        artifact.try_into()
    }

    /// Write the decomposition as a JSON artifact
    pub fn write<W: Write>(&self, writer: W) -> Result<(), ArtifactError> {
        serde_json::to_writer(writer, &DecompositionArtifact::from(self))?;
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of rows of the decomposed POVM: d^2
    pub fn rows(&self) -> usize {
        self.dimension * self.dimension
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of measurements
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn get(&self, key: &[usize]) -> Option<&[CMatrix]> {
        self.measurements.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &[CMatrix])> {
        self.measurements.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn into_parts(self) -> (BTreeMap<RowKey, Vec<CMatrix>>, f64) {
        (self.measurements, self.scale)
    }
}

/// Serialized form of a [`Decomposition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionArtifact {
    /// Defaults to the number of measurements when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    pub measurements: Vec<MeasurementEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub rows: RowKey,
    pub projectors: Vec<MatrixData>,
}

impl TryFrom<DecompositionArtifact> for Decomposition {
    type Error = ArtifactError;

    fn try_from(artifact: DecompositionArtifact) -> Result<Self, Self::Error> {
        let scale = artifact
            .scale
            .unwrap_or(artifact.measurements.len() as f64);

        let mut measurements = BTreeMap::new();
        for entry in artifact.measurements {
            trace!("Loading measurement {:?}", entry.rows);
            let projectors = entry
                .projectors
                .iter()
                .enumerate()
                .map(|(position, data)| {
                    matrix_from_data(data).ok_or_else(|| ArtifactError::MalformedMatrix {
                        key: entry.rows.clone(),
                        position,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if measurements.contains_key(&entry.rows) {
                return Err(ArtifactError::DuplicateKey { key: entry.rows });
            }
            measurements.insert(entry.rows, projectors);
        }

        Decomposition::new(measurements, scale)
    }
}

impl From<&Decomposition> for DecompositionArtifact {
    fn from(decomposition: &Decomposition) -> Self {
        let measurements = decomposition
            .iter()
            .map(|(key, projectors)| MeasurementEntry {
                rows: key.clone(),
                projectors: projectors.iter().map(matrix_to_data).collect(),
            })
            .collect();
        Self {
            scale: Some(decomposition.scale),
            measurements,
        }
    }
}

/// Returns `None` if the data is ragged or not square
pub fn matrix_from_data(data: &MatrixData) -> Option<CMatrix> {
    let n = data.len();
    if n == 0 || data.iter().any(|row| row.len() != n) {
        return None;
    }
    Some(CMatrix::from_fn(n, n, |r, c| {
        let [re, im] = data[r][c];
        Complex64::new(re, im)
    }))
}

pub fn matrix_to_data(m: &CMatrix) -> MatrixData {
    m.row_iter()
        .map(|row| row.iter().map(|z| [z.re, z.im]).collect())
        .collect()
}

#[derive(Debug)]
pub enum ArtifactError {
    Io(io::Error),
    Json(serde_json::Error),
    Empty,
    InvalidScale {
        scale: f64,
    },
    MalformedMatrix {
        key: RowKey,
        position: usize,
    },
    DuplicateKey {
        key: RowKey,
    },
    KeyLength {
        key: RowKey,
        expected: usize,
    },
    ProjectorCount {
        key: RowKey,
        expected: usize,
        found: usize,
    },
    RowOutOfRange {
        key: RowKey,
        row: usize,
        rows: usize,
    },
    DimensionMismatch {
        key: RowKey,
        position: usize,
        expected: usize,
        found: (usize, usize),
    },
}

impl Display for ArtifactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read decomposition: {err}"),
            Self::Json(err) => write!(f, "cannot parse decomposition: {err}"),
            Self::Empty => write!(f, "decomposition contains no projectors"),
            Self::InvalidScale { scale } => {
                write!(f, "scale factor must be positive and finite, got {scale}")
            }
            Self::MalformedMatrix { key, position } => {
                write!(f, "projector {position} of {key:?} is not a square matrix")
            }
            Self::DuplicateKey { key } => write!(f, "measurement {key:?} appears twice"),
            Self::KeyLength { key, expected } => {
                write!(f, "key {key:?} should list {expected} rows")
            }
            Self::ProjectorCount {
                key,
                expected,
                found,
            } => write!(
                f,
                "measurement {key:?} should have {expected} projectors, found {found}"
            ),
            Self::RowOutOfRange { key, row, rows } => {
                write!(f, "key {key:?} refers to row {row}, but there are {rows} rows")
            }
            Self::DimensionMismatch {
                key,
                position,
                expected,
                found,
            } => write!(
                f,
                "projector {position} of {key:?} has shape {found:?}, expected {expected}x{expected}"
            ),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArtifactError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
