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

//! Constructions of valid projective decompositions of noisy POVMs.
//!
//! These produce inputs for the checker whose visibility is known in closed
//! form, so they double as fixtures for tests and benchmarks.

use std::collections::BTreeMap;

use log::{debug, trace};
use sic_common::{
    ArtifactError, CMatrix, CVector, Decomposition, RowKey,
    linalg::{identity, outer, scale},
};
use sic_reference::reference_vectors;

pub mod random;

/// Rank-1 projectors onto the columns of a unitary, each scaled by `prob`
pub fn basis_projectors(basis: &CMatrix, prob: f64) -> Vec<CMatrix> {
    basis
        .column_iter()
        .map(|col| scale(&outer(&col.into_owned()), prob))
        .collect()
}

/// A unitary whose first column is proportional to `v`
pub fn complete_basis(v: &CVector) -> CMatrix {
    let d = v.len();
    let mut a = identity(d);
    a.set_column(0, v);
    // A = QR with R upper triangular, so the first column of Q is v / R_00.
    a.qr().q()
}

/// Decomposition of the uniform POVM {I/d^2} into d^2 measurements in the
/// given basis.
///
/// Measurement (g, s) sends the k-th basis projector to row g*d + (k+s) mod d,
/// so every row receives each basis projector exactly once. Visibility 0
/// with respect to any d^2-outcome reference.
pub fn uniform_in_basis(basis: &CMatrix) -> Result<Decomposition, ArtifactError> {
    let d = basis.nrows();
    let prob = 1.0 / (d * d) as f64;
    let projectors = basis_projectors(basis, prob);

    let mut measurements: BTreeMap<RowKey, Vec<CMatrix>> = BTreeMap::new();
    for group in 0..d {
        for s in 0..d {
            let key: RowKey = (0..d).map(|k| group * d + (k + s) % d).collect();
            trace!("Uniform measurement {key:?}");
            measurements.insert(key, projectors.clone());
        }
    }
    debug!("Built uniform decomposition with {} measurements", measurements.len());
    Decomposition::from_unscaled(measurements)
}

/// [`uniform_in_basis`] in the computational basis
pub fn uniform(d: usize) -> Result<Decomposition, ArtifactError> {
    uniform_in_basis(&identity(d))
}

/// [`uniform_in_basis`] in a random basis drawn from `seed`
pub fn rotated_uniform(d: usize, seed: u64) -> Result<Decomposition, ArtifactError> {
    uniform_in_basis(&random::seeded_unitary(d, seed))
}

/// Visibility of the [`covariant`] decomposition in dimension d
pub fn covariant_visibility(d: usize) -> f64 {
    d as f64 / (d * d - 1) as f64
}

/// Decomposition of the noisy SIC-POVM with visibility d/(d^2-1).
///
/// Every orbit vector psi_i of the fiducial is completed to an orthonormal
/// basis {psi_i, b_1, ..., b_{d-1}}. Row i gets d^2-1 measurements; the t-th
/// sends psi_i to row i and b_k to the (t+k)-th of the other rows, each with
/// probability 1/(d^2 (d^2-1)). Row r then sums to
/// |psi_r><psi_r| / (d^2-1) + (d^2-d-1)/(d^2 (d^2-1)) I.
pub fn covariant(fiducial: &CVector) -> Result<Decomposition, ArtifactError> {
    let d = fiducial.len();
    let rows = d * d;
    let per_row = rows - 1;
    let prob = 1.0 / (rows * per_row) as f64;

    let mut measurements: BTreeMap<RowKey, Vec<CMatrix>> = BTreeMap::new();
    for (i, psi) in reference_vectors(fiducial).iter().enumerate() {
        let projectors = basis_projectors(&complete_basis(psi), prob);
        let others: Vec<usize> = (0..rows).filter(|&r| r != i).collect();
        for t in 0..per_row {
            let key: RowKey = std::iter::once(i)
                .chain((0..d - 1).map(|k| others[(t + k) % per_row]))
                .collect();
            measurements.insert(key, projectors.clone());
        }
    }
    debug!(
        "Built covariant decomposition with {} measurements, visibility {}",
        measurements.len(),
        covariant_visibility(d)
    );
    Decomposition::from_unscaled(measurements)
}
