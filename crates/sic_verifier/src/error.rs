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

use std::fmt::{Display, Formatter};

use sic_common::RowKey;
use sic_reference::{SUPPORTED_DIMENSIONS, UnsupportedDimension};

/// The first check that a decomposition failed
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationError {
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    UnsupportedDimension {
        dimension: usize,
    },
    NonPositiveProbability {
        key: RowKey,
        probability: f64,
    },
    RankViolation {
        key: RowKey,
        position: usize,
        eigenvalue: f64,
    },
    NonIdempotentEffect {
        key: RowKey,
        position: usize,
        deviation: f64,
    },
    IncompleteSubMeasurement {
        key: RowKey,
        deviation: f64,
    },
    UncoveredRow {
        row: usize,
    },
    InconsistentVisibility {
        row: usize,
        visibility: f64,
        deviation: f64,
    },
}

impl Display for VerificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch {
                context,
                expected,
                found,
            } => write!(f, "{context}: expected {expected}, found {found}"),
            Self::UnsupportedDimension { dimension } => write!(
                f,
                "no reference SIC-POVM in dimension {dimension}, supported dimensions are {SUPPORTED_DIMENSIONS:?}"
            ),
            Self::NonPositiveProbability { key, probability } => write!(
                f,
                "measurement {key:?} has non-positive probability {probability}"
            ),
            Self::RankViolation {
                key,
                position,
                eigenvalue,
            } => write!(
                f,
                "projector {position} of measurement {key:?} is not rank 1: second largest eigenvalue is {eigenvalue:e}"
            ),
            Self::NonIdempotentEffect {
                key,
                position,
                deviation,
            } => write!(
                f,
                "projector {position} of measurement {key:?} is not a projection: |P^2 - P|^2 = {deviation:e}"
            ),
            Self::IncompleteSubMeasurement { key, deviation } => write!(
                f,
                "projectors of measurement {key:?} do not sum to identity: |sum - I|^2 = {deviation:e}"
            ),
            Self::UncoveredRow { row } => {
                write!(f, "no measurement contributes to row {row}")
            }
            Self::InconsistentVisibility {
                row,
                visibility,
                deviation,
            } => write!(
                f,
                "row {row} is not the noisy reference effect at visibility {visibility}: distance {deviation:e}"
            ),
        }
    }
}

impl std::error::Error for VerificationError {}

impl From<UnsupportedDimension> for VerificationError {
    fn from(err: UnsupportedDimension) -> Self {
        Self::UnsupportedDimension { dimension: err.0 }
    }
}
