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

/// Threshold used by every decomposition check unless overridden.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Threshold for properties of the exact reference construction.
pub const REFERENCE_TOLERANCE: f64 = 1e-9;

/// Numerical thresholds for the decomposition checks.
///
/// `projector` and `completeness` bound squared Frobenius distances,
/// `visibility` bounds a plain Frobenius distance and `rank` bounds the
/// magnitude of the second-largest eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub rank: f64,
    pub projector: f64,
    pub completeness: f64,
    pub visibility: f64,
}

impl Tolerances {
    /// Use the same threshold for every check
    pub fn uniform(tolerance: f64) -> Self {
        Self {
            rank: tolerance,
            projector: tolerance,
            completeness: tolerance,
            visibility: tolerance,
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::uniform(DEFAULT_TOLERANCE)
    }
}
