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

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// Dense square complex matrix. All effects and projectors use this type.
pub type CMatrix = DMatrix<Complex64>;

pub type CVector = DVector<Complex64>;

pub fn identity(d: usize) -> CMatrix {
    CMatrix::identity(d, d)
}

pub fn zeros(d: usize) -> CMatrix {
    CMatrix::zeros(d, d)
}

/// The rank-1 operator |v><v|
pub fn outer(v: &CVector) -> CMatrix {
    v * v.adjoint()
}

/// Eigenvalues of a Hermitian matrix in ascending order.
///
/// Only the lower triangle of `m` is read, so a non-Hermitian input is
/// silently treated as its Hermitian completion.
pub fn hermitian_eigenvalues(m: &CMatrix) -> Vec<f64> {
    let mut values: Vec<f64> = m.symmetric_eigenvalues().iter().copied().collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Squared Frobenius norm of `a - b`
pub fn distance_squared(a: &CMatrix, b: &CMatrix) -> f64 {
    (a - b).norm_squared()
}

pub fn distance(a: &CMatrix, b: &CMatrix) -> f64 {
    (a - b).norm()
}

pub fn real_trace(m: &CMatrix) -> f64 {
    m.trace().re
}

pub fn scale(m: &CMatrix, factor: f64) -> CMatrix {
    m.map(|z| z * factor)
}
