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

use std::{error::Error, io::Write};

use sic_common::Decomposition;
use sic_reference::sic_reference;

use crate::Verifier;

/// Verify against the SIC-POVM while writing a narrative of the passed checks
/// to `out`. Stops at the first failed check; the narrative up to that point
/// has been written.
pub fn report<W: Write>(
    source: &str,
    decomposition: &Decomposition,
    verifier: &Verifier,
    out: &mut W,
) -> Result<f64, Box<dyn Error>> {
    let d = decomposition.dimension();
    writeln!(
        out,
        "Loaded {source}, found a decomposition of a {d}-dimensional POVM in terms of {} measurements.",
        decomposition.len()
    )?;

    writeln!(
        out,
        "Checking if it really is a decomposition in terms of rank-1 projective measurements..."
    )?;
    let row_sums = verifier.check_sub_measurements(decomposition)?;
    writeln!(out, "... it is!")?;

    writeln!(out, "Checking if it sums to a noisy version of the SIC POVM...")?;
    writeln!(out, "... visibility would be v = {}", row_sums.visibility())?;
    let reference = sic_reference(d)?;
    let visibility = verifier.check_row_sums(&row_sums, &reference)?;
    writeln!(out, "... it is!")?;

    writeln!(
        out,
        "Summary: The decomposition in {source} constitutes a projective decomposition of a noisy version of a {d}-dimensional SIC POVM with visibility parameter v = {visibility}"
    )?;
    Ok(visibility)
}
