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

//! End-to-end checks of synthesized decompositions, through the artifact
//! format and the reporting front end.

use std::{
    collections::BTreeMap,
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use num_complex::Complex64;
use sic_common::{
    CMatrix, CVector, Decomposition, DecompositionArtifact,
    linalg::{outer, scale},
};
use sic_reference::fiducial::fiducial;
use sic_synthesis::{covariant, covariant_visibility, rotated_uniform, uniform};
use sic_verifier::{VerificationError, Verifier, report};

fn temp_file(test_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "sic_verifier_{test_name}_{}.json",
        std::process::id()
    ))
}

fn first_key(decomposition: &Decomposition) -> Vec<usize> {
    decomposition.iter().next().unwrap().0.clone()
}

// =========================================================================
// Valid decompositions
// =========================================================================

#[test]
fn covariant_decompositions_pass_with_known_visibility() {
    for d in [4, 5] {
        let decomposition = covariant(&fiducial(d).unwrap()).unwrap();
        let v = Verifier::default().verify_sic(&decomposition).unwrap();
        assert!(
            (v - covariant_visibility(d)).abs() < 1e-9,
            "d = {d}: {v} != {}",
            covariant_visibility(d)
        );
    }
}

#[test]
fn decomposition_built_from_reference_output_passes_verify() {
    let psi = fiducial(4).unwrap();
    let reference = sic_reference::build_reference(&psi);
    let decomposition = covariant(&psi).unwrap();
    let v = Verifier::default().verify(&decomposition, &reference).unwrap();
    assert!((v - 4.0 / 15.0).abs() < 1e-9);
}

#[test]
fn rotated_uniform_decompositions_have_zero_visibility() {
    for (d, seed) in [(4, 1), (5, 2)] {
        let decomposition = rotated_uniform(d, seed).unwrap();
        let v = Verifier::default().verify_sic(&decomposition).unwrap();
        assert!(v.abs() < 1e-9);
    }
}

#[test]
fn uniform_scenario_reports_both_checkpoints() -> Result<(), Box<dyn Error>> {
    // d = 4, 16 measurements of 4 orthogonal projectors, probability 1/16, scale 16
    let decomposition = uniform(4)?;
    assert_eq!(16, decomposition.len());
    assert_eq!(16.0, decomposition.scale());

    let mut out = Vec::new();
    let v = report("uniform.json", &decomposition, &Verifier::default(), &mut out)?;
    assert!(v.abs() < 1e-9);

    let text = String::from_utf8(out)?;
    let lines: Vec<_> = text.lines().collect();
    assert!(lines[0].starts_with("Loaded uniform.json"));
    assert!(lines[0].contains("4-dimensional POVM in terms of 16 measurements"));
    assert_eq!(2, lines.iter().filter(|l| **l == "... it is!").count());
    assert!(lines.last().unwrap().starts_with("Summary:"));
    assert!(lines.last().unwrap().contains("visibility parameter v ="));
    Ok(())
}

#[test]
fn failing_report_stops_before_summary() -> Result<(), Box<dyn Error>> {
    let decomposition = uniform(3)?;
    let mut out = Vec::new();
    let err = report("d3.json", &decomposition, &Verifier::default(), &mut out).unwrap_err();
    assert_eq!(
        Some(&VerificationError::UnsupportedDimension { dimension: 3 }),
        err.downcast_ref::<VerificationError>()
    );

    let text = String::from_utf8(out)?;
    assert!(!text.contains("... it is!"));
    assert!(!text.contains("Summary"));
    Ok(())
}

// =========================================================================
// Injected defects
// =========================================================================

#[test]
fn rotated_projector_breaks_completeness() {
    let decomposition = uniform(4).unwrap();
    let (mut measurements, scale_factor) = decomposition.into_parts();

    // Still a rank-1 projector, but no longer orthogonal to |1>
    let theta: f64 = 1e-2;
    let a = CVector::from_vec(vec![
        Complex64::new(theta.cos(), 0.0),
        Complex64::new(0.0, theta.sin()),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
    ]);
    let key = vec![0, 1, 2, 3];
    measurements.get_mut(&key).unwrap()[0] = scale(&outer(&a), scale_factor / 16.0);

    let decomposition = Decomposition::new(measurements, scale_factor).unwrap();
    let err = Verifier::default().verify_sic(&decomposition).unwrap_err();
    match err {
        VerificationError::IncompleteSubMeasurement {
            key: failed,
            deviation,
        } => {
            assert_eq!(key, failed);
            assert!(deviation > 1e-6);
        }
        other => panic!("Unexpected error {other}"),
    }
}

#[test]
fn rank_two_projector_is_rejected() {
    let decomposition = covariant(&fiducial(5).unwrap()).unwrap();
    let key = first_key(&decomposition);
    let (mut measurements, scale_factor) = decomposition.into_parts();

    let projectors = measurements.get_mut(&key).unwrap();
    projectors[0] = &projectors[0] + &projectors[1];

    let decomposition = Decomposition::new(measurements, scale_factor).unwrap();
    let err = Verifier::default().verify_sic(&decomposition).unwrap_err();
    assert!(matches!(
        err,
        VerificationError::RankViolation { position: 0, eigenvalue, .. } if eigenvalue > 1e-4
    ));
}

#[test]
fn misreported_scale_is_inconsistent() {
    let decomposition = uniform(4).unwrap();
    let (measurements, _) = decomposition.into_parts();
    // Stored values were scaled by 16, claim 8
    let decomposition = Decomposition::new(measurements, 8.0).unwrap();

    let err = Verifier::default().verify_sic(&decomposition).unwrap_err();
    assert!(matches!(
        err,
        VerificationError::InconsistentVisibility { row: 0, .. }
    ));
}

#[test]
fn wrong_reference_is_inconsistent() {
    // The covariant decomposition of the d = 4 SIC compared against a
    // reference in the computational basis orbit
    let decomposition = covariant(&fiducial(4).unwrap()).unwrap();
    let mut basis_state = CVector::zeros(4);
    basis_state[0] = Complex64::new(1.0, 0.0);
    let reference = sic_reference::build_reference(&basis_state);

    let err = Verifier::default()
        .verify(&decomposition, &reference)
        .unwrap_err();
    assert!(matches!(
        err,
        VerificationError::InconsistentVisibility { .. }
    ));
}

// =========================================================================
// Artifacts
// =========================================================================

#[test]
fn artifact_file_round_trip() -> Result<(), Box<dyn Error>> {
    let path = temp_file("round_trip");
    let decomposition = covariant(&fiducial(5).unwrap())?;
    let mut writer = BufWriter::new(File::create(&path)?);
    decomposition.write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    let loaded = Decomposition::read(&path)?;
    let _ = std::fs::remove_file(&path);

    assert_eq!(600, loaded.len());
    assert_eq!(600.0, loaded.scale());
    let v = Verifier::default().verify_sic(&loaded)?;
    assert!((v - 5.0 / 24.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn artifact_without_scale_uses_measurement_count() -> Result<(), Box<dyn Error>> {
    let decomposition = uniform(4)?;
    let mut artifact = DecompositionArtifact::from(&decomposition);
    artifact.scale = None;
    let json = serde_json::to_string(&artifact)?;
    assert!(!json.contains("scale"));

    let parsed: DecompositionArtifact = serde_json::from_str(&json)?;
    let loaded = Decomposition::try_from(parsed)?;
    assert_eq!(16.0, loaded.scale());
    assert!(Verifier::default().verify_sic(&loaded)?.abs() < 1e-9);
    Ok(())
}

#[test]
fn explicit_scale_is_honored() -> Result<(), Box<dyn Error>> {
    let decomposition = uniform(4)?;
    let scale_factor = 1000.0;
    let rescale = scale_factor / decomposition.scale();
    let measurements: BTreeMap<Vec<usize>, Vec<CMatrix>> = decomposition
        .iter()
        .map(|(key, projectors)| {
            let rescaled = projectors.iter().map(|p| scale(p, rescale)).collect();
            (key.clone(), rescaled)
        })
        .collect();

    let decomposition = Decomposition::new(measurements, scale_factor)?;
    assert!(Verifier::default().verify_sic(&decomposition)?.abs() < 1e-9);
    Ok(())
}
