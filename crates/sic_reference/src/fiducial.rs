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
use sic_common::CVector;

/// A normalized vector whose Heisenberg-Weyl orbit is a SIC-POVM.
/// Amplitudes are stored as `(re, im)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fiducial {
    pub dimension: usize,
    amplitudes: &'static [(f64, f64)],
}

impl Fiducial {
    pub fn vector(&self) -> CVector {
        CVector::from_iterator(
            self.dimension,
            self.amplitudes
                .iter()
                .map(|&(re, im)| Complex64::new(re, im)),
        )
    }
}

#[allow(clippy::excessive_precision)]
pub const FIDUCIAL_4: Fiducial = Fiducial {
    dimension: 4,
    amplitudes: &[
        (0.485_712_214_091_264_039, 0.0),
        (0.600_433_696_560_696_887, -0.449_896_366_908_118_139),
        (0.0, -0.201_188_586_486_865_893),
        (-0.399_245_110_073_830_994, -0.035_815_847_183_145_900),
    ],
};

#[allow(clippy::excessive_precision)]
pub const FIDUCIAL_5: Fiducial = Fiducial {
    dimension: 5,
    amplitudes: &[
        (0.391_044_894_022_147_746, 0.0),
        (-0.284_865_583_195_866_662, -0.647_129_332_827_962_394),
        (-0.231_883_847_368_995_778, -0.198_203_907_555_552_434),
        (0.131_938_579_975_612_064, -0.109_395_996_519_643_274),
        (0.430_967_439_210_964_386, 0.197_474_055_819_546_857),
    ],
};

/// Dimensions with a known reference measurement.
/// Extend together with [`FIDUCIALS`].
pub const SUPPORTED_DIMENSIONS: [usize; 2] = [4, 5];

pub const FIDUCIALS: [Fiducial; 2] = [FIDUCIAL_4, FIDUCIAL_5];

pub fn is_supported(dimension: usize) -> bool {
    SUPPORTED_DIMENSIONS.contains(&dimension)
}

/// Look up the fiducial vector for a dimension
pub fn fiducial(dimension: usize) -> Option<CVector> {
    FIDUCIALS
        .iter()
        .find(|f| f.dimension == dimension)
        .map(Fiducial::vector)
}
