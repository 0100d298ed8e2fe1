// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — Phase Replacement
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnitude substitution with phase kept from the current guess.

use ndarray::{ArrayD, Zip};
use num_complex::Complex64;
use phaserec_math::fft::RfftPlan;
use phaserec_types::error::{ReconError, ReconResult};

use crate::correlation::to_real;

/// Map a NaN bin to zero; finite and infinite values pass through.
#[inline]
pub fn zero_nan(c: Complex64) -> Complex64 {
    if c.re.is_nan() || c.im.is_nan() {
        Complex64::new(0.0, 0.0)
    } else {
        c
    }
}

/// `ft / |ft| * sqrt(s2ft)` bin by bin, zero where the ratio is undefined.
///
/// The unit phasor is formed before scaling so subnormal bins cannot
/// overflow to infinity.
pub fn impose_magnitude(ft: &ArrayD<Complex64>, s2ft: &ArrayD<f64>) -> ReconResult<ArrayD<Complex64>> {
    if ft.shape() != s2ft.shape() {
        return Err(ReconError::ShapeMismatch {
            expected: ft.shape().to_vec(),
            found: s2ft.shape().to_vec(),
        });
    }
    Ok(Zip::from(ft)
        .and(s2ft)
        .map_collect(|&c, &s| zero_nan(c / c.norm() * s.sqrt())))
}

/// Spectrum of `field` with its magnitudes replaced by `sqrt(s2ft)`.
pub fn replace_abs(field: &ArrayD<bool>, s2ft: &ArrayD<f64>) -> ReconResult<ArrayD<Complex64>> {
    let plan = RfftPlan::new(field.shape())?;
    replace_abs_with(&plan, field, s2ft)
}

/// [`replace_abs`] with a prebuilt plan.
pub fn replace_abs_with(
    plan: &RfftPlan,
    field: &ArrayD<bool>,
    s2ft: &ArrayD<f64>,
) -> ReconResult<ArrayD<Complex64>> {
    let ft = plan.forward(&to_real(field))?;
    impose_magnitude(&ft, s2ft)
}
