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

//! Checks that a decomposition into rank-1 projective measurements
//! reconstructs a noisy version of a reference POVM.
//!
//! Verification runs in two stages. [`Verifier::check_sub_measurements`]
//! validates every measurement of the decomposition and accumulates its
//! projectors into per-row sums. [`Verifier::check_row_sums`] then derives the
//! visibility from row 0 and checks every row against the noisy reference.

mod error;
mod report;
mod row_sums;

pub use error::VerificationError;
pub use report::report;
pub use row_sums::RowSums;

use log::{debug, trace, warn};
use sic_common::{
    CMatrix, Decomposition, Tolerances,
    linalg::{distance, distance_squared, hermitian_eigenvalues, identity, real_trace, scale},
};
use sic_reference::{is_supported, noisy_effect, sic_reference};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Verifier {
    tolerances: Tolerances,
}

impl Verifier {
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Check against the SIC-POVM of the decomposition's dimension and return
    /// the visibility.
    pub fn verify_sic(&self, decomposition: &Decomposition) -> Result<f64, VerificationError> {
        let reference = sic_reference(decomposition.dimension())?;
        self.verify(decomposition, &reference)
    }

    /// Check that `decomposition` reconstructs a noisy version of `reference`
    /// and return the visibility.
    pub fn verify(
        &self,
        decomposition: &Decomposition,
        reference: &[CMatrix],
    ) -> Result<f64, VerificationError> {
        check_supported(decomposition.dimension())?;
        check_reference_shape(decomposition.dimension(), reference)?;
        let row_sums = self.check_sub_measurements(decomposition)?;
        self.check_row_sums(&row_sums, reference)
    }

    /// Check that every measurement is a rank-1 projective measurement, scaled
    /// by its probability, and accumulate the projectors per row.
    pub fn check_sub_measurements(
        &self,
        decomposition: &Decomposition,
    ) -> Result<RowSums, VerificationError> {
        let d = decomposition.dimension();
        check_supported(d)?;

        let unscale = 1.0 / decomposition.scale();
        let mut row_sums = RowSums::zeros(d);
        for (key, stored) in decomposition.iter() {
            let projectors: Vec<CMatrix> = stored.iter().map(|p| scale(p, unscale)).collect();

            // Probability of performing this measurement
            let prob = real_trace(&projectors[0]);
            if !(prob.is_finite() && prob > 0.0) {
                return Err(VerificationError::NonPositiveProbability {
                    key: key.clone(),
                    probability: prob,
                });
            }
            debug!("Measurement {key:?} with probability {prob}");
            if key.iter().enumerate().any(|(i, row)| key[..i].contains(row)) {
                warn!("Measurement {key:?} merges several outcomes into one row");
            }

            for (position, p) in projectors.iter().enumerate() {
                self.check_rank_one(key, position, p)?;
                self.check_projection(key, position, p, prob)?;
            }
            self.check_completeness(key, &projectors, prob)?;

            for (row, p) in key.iter().zip(&projectors) {
                row_sums.add(*row, p);
            }
        }

        if let Some(row) = row_sums.uncovered_row() {
            return Err(VerificationError::UncoveredRow { row });
        }
        Ok(row_sums)
    }

    /// Derive the visibility from row 0 and check that every row equals the
    /// noisy reference effect v * E + (1 - v) I / d^2.
    pub fn check_row_sums(
        &self,
        row_sums: &RowSums,
        reference: &[CMatrix],
    ) -> Result<f64, VerificationError> {
        let d = row_sums.dimension();
        check_supported(d)?;
        check_reference_shape(d, reference)?;

        let visibility = row_sums.visibility();
        debug!("Visibility from row 0: {visibility}");

        for (row, (sum, effect)) in row_sums.iter().zip(reference).enumerate() {
            let deviation = distance(&noisy_effect(effect, visibility), sum);
            trace!("Row {row} deviates by {deviation:e}");
            if !below(deviation, self.tolerances.visibility) {
                return Err(VerificationError::InconsistentVisibility {
                    row,
                    visibility,
                    deviation,
                });
            }
        }
        Ok(visibility)
    }

    /// The second largest eigenvalue must vanish
    fn check_rank_one(
        &self,
        key: &[usize],
        position: usize,
        p: &CMatrix,
    ) -> Result<(), VerificationError> {
        let values = hermitian_eigenvalues(p);
        let eigenvalue = values[values.len() - 2];
        trace!("Eigenvalues of projector {position} of {key:?}: {values:?}");
        if below(eigenvalue.abs(), self.tolerances.rank) {
            Ok(())
        } else {
            Err(VerificationError::RankViolation {
                key: key.to_vec(),
                position,
                eigenvalue,
            })
        }
    }

    /// P / prob must be idempotent
    fn check_projection(
        &self,
        key: &[usize],
        position: usize,
        p: &CMatrix,
        prob: f64,
    ) -> Result<(), VerificationError> {
        let normalized = scale(p, 1.0 / prob);
        let deviation = distance_squared(&(&normalized * &normalized), &normalized);
        if below(deviation, self.tolerances.projector) {
            Ok(())
        } else {
            Err(VerificationError::NonIdempotentEffect {
                key: key.to_vec(),
                position,
                deviation,
            })
        }
    }

    /// The projectors of a measurement must sum to prob * I
    fn check_completeness(
        &self,
        key: &[usize],
        projectors: &[CMatrix],
        prob: f64,
    ) -> Result<(), VerificationError> {
        let d = projectors[0].nrows();
        let sum = projectors
            .iter()
            .fold(CMatrix::zeros(d, d), |acc, p| acc + p);
        let deviation = distance_squared(&scale(&sum, 1.0 / prob), &identity(d));
        if below(deviation, self.tolerances.completeness) {
            Ok(())
        } else {
            Err(VerificationError::IncompleteSubMeasurement {
                key: key.to_vec(),
                deviation,
            })
        }
    }
}

// NaN never passes
fn below(value: f64, tolerance: f64) -> bool {
    value < tolerance
}

fn check_supported(dimension: usize) -> Result<(), VerificationError> {
    if is_supported(dimension) {
        Ok(())
    } else {
        Err(VerificationError::UnsupportedDimension { dimension })
    }
}

fn check_reference_shape(d: usize, reference: &[CMatrix]) -> Result<(), VerificationError> {
    if reference.len() != d * d {
        return Err(VerificationError::ShapeMismatch {
            context: "number of reference effects",
            expected: d * d,
            found: reference.len(),
        });
    }
    if let Some(effect) = reference.iter().find(|e| e.shape() != (d, d)) {
        return Err(VerificationError::ShapeMismatch {
            context: "reference effect dimension",
            expected: d,
            found: effect.nrows().max(effect.ncols()),
        });
    }
    Ok(())
}
