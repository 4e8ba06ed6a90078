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

use num_complex::Complex64;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sic_common::CMatrix;

/// Random unitary from the QR decomposition of a matrix with uniform entries.
/// Not Haar distributed, which is fine for scrambling a basis.
pub fn random_unitary<R: Rng>(d: usize, rng: &mut R) -> CMatrix {
    let m = CMatrix::from_fn(d, d, |_, _| {
        Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    });
    m.qr().q()
}

pub fn seeded_unitary(d: usize, seed: u64) -> CMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    random_unitary(d, &mut rng)
}
