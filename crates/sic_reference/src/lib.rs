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

use log::debug;
use sic_common::{
    CMatrix, CVector,
    linalg::{identity, outer, scale},
};

pub mod fiducial;
pub mod heisenberg_weyl;

pub use fiducial::{FIDUCIALS, Fiducial, SUPPORTED_DIMENSIONS, is_supported};
use heisenberg_weyl::{clock, shift};

/// The orbit X^i Z^j |psi> of a fiducial vector.
/// Vector `i * d + j` corresponds to the pair (i, j).
pub fn reference_vectors(fiducial: &CVector) -> Vec<CVector> {
    let d = fiducial.len();
    let mut vectors = Vec::with_capacity(d * d);
    for i in 0..d {
        let x = shift(d, i);
        for j in 0..d {
            vectors.push(&x * clock(d, j) * fiducial);
        }
    }
    vectors
}

/// The d^2 effects (1/d) |psi_ij><psi_ij| generated by a fiducial vector.
///
/// Nothing is checked: a fiducial that is not normalized or not a SIC
/// fiducial gives effects that do not form a SIC-POVM.
pub fn build_reference(fiducial: &CVector) -> Vec<CMatrix> {
    let d = fiducial.len() as f64;
    reference_vectors(fiducial)
        .iter()
        .map(|v| scale(&outer(v), 1.0 / d))
        .collect()
}

/// Build the SIC-POVM of a supported dimension from the embedded fiducials
pub fn sic_reference(dimension: usize) -> Result<Vec<CMatrix>, UnsupportedDimension> {
    let psi = fiducial::fiducial(dimension).ok_or(UnsupportedDimension(dimension))?;
    debug!("Building {dimension}-dimensional SIC-POVM");
    Ok(build_reference(&psi))
}

/// Mix an effect of a d^2-outcome POVM with the uniform effect I/d^2:
/// v * E + (1 - v) / d^2 * I
pub fn noisy_effect(effect: &CMatrix, visibility: f64) -> CMatrix {
    let d = effect.nrows();
    let noise = (1.0 - visibility) / (d * d) as f64;
    scale(effect, visibility) + scale(&identity(d), noise)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedDimension(pub usize);

impl Display for UnsupportedDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no reference SIC-POVM in dimension {}, supported dimensions are {:?}",
            self.0, SUPPORTED_DIMENSIONS
        )
    }
}

impl std::error::Error for UnsupportedDimension {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use num_complex::Complex64;
    use sic_common::{
        linalg::{distance, hermitian_eigenvalues, real_trace, zeros},
        tolerance::REFERENCE_TOLERANCE,
    };

    use super::*;

    fn sum(effects: &[CMatrix]) -> CMatrix {
        let d = effects[0].nrows();
        effects.iter().fold(zeros(d), |acc, e| acc + e)
    }

    #[test]
    fn reference_is_complete() {
        for d in SUPPORTED_DIMENSIONS {
            let sic = sic_reference(d).unwrap();
            assert_eq!(d * d, sic.len());
            assert!(distance(&sum(&sic), &identity(d)) < REFERENCE_TOLERANCE);
        }
    }

    #[test]
    fn effects_are_rank_one_with_trace_one_over_d() {
        for d in SUPPORTED_DIMENSIONS {
            for effect in sic_reference(d).unwrap() {
                assert!((real_trace(&effect) - 1.0 / d as f64).abs() < REFERENCE_TOLERANCE);
                assert!(distance(&effect, &effect.adjoint()) < REFERENCE_TOLERANCE);

                let values = hermitian_eigenvalues(&effect);
                assert!((values[d - 1] - 1.0 / d as f64).abs() < REFERENCE_TOLERANCE);
                assert!(values[d - 2].abs() < REFERENCE_TOLERANCE);
            }
        }
    }

    #[test]
    fn effects_are_equiangular() {
        for d in SUPPORTED_DIMENSIONS {
            let sic = sic_reference(d).unwrap();
            // tr(E_a E_b) = 1 / (d^2 (d + 1)) for a != b
            let expected = 1.0 / (d * d * (d + 1)) as f64;
            for (a, b) in sic.iter().tuple_combinations() {
                let overlap = (a * b).trace();
                assert!((overlap.re - expected).abs() < REFERENCE_TOLERANCE);
                assert!(overlap.im.abs() < REFERENCE_TOLERANCE);
            }
        }
    }

    #[test]
    fn ordering_follows_shift_then_clock_index() {
        let psi = fiducial::fiducial(4).unwrap();
        let vectors = reference_vectors(&psi);
        let expected = shift(4, 2) * clock(4, 3) * &psi;
        assert_eq!(expected, vectors[2 * 4 + 3]);
        assert_eq!(psi, vectors[0]);
    }

    #[test]
    fn unnormalized_fiducial_is_not_rejected() {
        let psi = fiducial::fiducial(5).unwrap().map(|z| z * Complex64::new(2.0, 0.0));
        let effects = build_reference(&psi);
        assert_eq!(25, effects.len());
        assert!(distance(&sum(&effects), &identity(5)) > 1.0);
    }

    #[test]
    fn noisy_effect_mixes_with_identity() {
        let sic = sic_reference(4).unwrap();
        assert!(distance(&noisy_effect(&sic[3], 1.0), &sic[3]) < REFERENCE_TOLERANCE);
        let uniform = scale(&identity(4), 1.0 / 16.0);
        assert!(distance(&noisy_effect(&sic[3], 0.0), &uniform) < REFERENCE_TOLERANCE);

        let noisy: Vec<_> = sic.iter().map(|e| noisy_effect(e, 0.7)).collect();
        assert!(distance(&sum(&noisy), &identity(4)) < REFERENCE_TOLERANCE);
    }

    #[test]
    fn unsupported_dimensions() {
        for d in [0, 1, 2, 3, 6] {
            assert_eq!(Err(UnsupportedDimension(d)), sic_reference(d));
        }
    }
}
