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

use sic_common::{
    CMatrix,
    linalg::{hermitian_eigenvalues, zeros},
};

use crate::VerificationError;

/// Per-row accumulation of the projectors of a decomposition.
/// Row `r` holds the reconstructed effect M_r of the decomposed POVM.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSums {
    dimension: usize,
    sums: Vec<CMatrix>,
    contributions: Vec<usize>,
}

impl RowSums {
    /// d^2 zero accumulators of size d x d
    pub fn zeros(dimension: usize) -> Self {
        let rows = dimension * dimension;
        Self {
            dimension,
            sums: vec![zeros(dimension); rows],
            contributions: vec![0; rows],
        }
    }

    /// Use already reconstructed effects as the row sums.
    /// Every row counts as covered.
    pub fn from_effects(effects: Vec<CMatrix>) -> Result<Self, VerificationError> {
        let dimension = effects.first().map_or(0, |e| e.nrows());
        if effects.len() != dimension * dimension {
            return Err(VerificationError::ShapeMismatch {
                context: "number of row sums",
                expected: dimension * dimension,
                found: effects.len(),
            });
        }
        if let Some(e) = effects.iter().find(|e| e.shape() != (dimension, dimension)) {
            return Err(VerificationError::ShapeMismatch {
                context: "row sum dimension",
                expected: dimension,
                found: e.nrows().max(e.ncols()),
            });
        }
        let contributions = vec![1; effects.len()];
        Ok(Self {
            dimension,
            sums: effects,
            contributions,
        })
    }

    pub fn add(&mut self, row: usize, projector: &CMatrix) {
        self.sums[row] += projector;
        self.contributions[row] += 1;
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn get(&self, row: usize) -> &CMatrix {
        &self.sums[row]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CMatrix> {
        self.sums.iter()
    }

    /// First row that no projector was added to
    pub fn uncovered_row(&self) -> Option<usize> {
        self.contributions.iter().position(|&n| n == 0)
    }

    /// The visibility v such that row 0 could be v E + (1 - v) I / d^2 for a
    /// rank-1 effect E: then the smallest eigenvalue of row 0 is (1 - v) / d^2.
    ///
    /// Panics for dimension 0.
    pub fn visibility(&self) -> f64 {
        let lambda_min = hermitian_eigenvalues(&self.sums[0])[0];
        1.0 - (self.len() as f64) * lambda_min
    }
}
