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

//! Generators of the Heisenberg-Weyl group, following Eq. 15 of
//! Scott, arXiv:quant-ph/0310137.

use std::f64::consts::TAU;

use num_complex::Complex64;
use sic_common::CMatrix;

/// k-th power of the shift operator: X^k |c> = |c + k mod d>
pub fn shift(d: usize, k: usize) -> CMatrix {
    CMatrix::from_fn(d, d, |r, c| {
        if r == (c + k) % d {
            Complex64::new(1.0, 0.0)
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
}

/// k-th power of the clock operator: Z^k |n> = exp(2 pi i k n / d) |n>
pub fn clock(d: usize, k: usize) -> CMatrix {
    CMatrix::from_fn(d, d, |r, c| {
        if r == c {
            Complex64::from_polar(1.0, TAU * ((k * r) % d) as f64 / d as f64)
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
}
