// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — Two-Point Correlation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Frequency-domain two-point correlation and porosity.
//!
//! The correlation is kept as the (unnormalized) power spectrum |F|^2 of the
//! 0/1 indicator field; by Wiener-Khinchin its inverse transform is the
//! spatial autocorrelation.

use ndarray::ArrayD;
use num_complex::Complex64;
use phaserec_math::fft::RfftPlan;
use phaserec_types::error::ReconResult;

/// Indicator of a binary field as 0/1 reals.
pub fn to_real(field: &ArrayD<bool>) -> ArrayD<f64> {
    field.mapv(|b| if b { 1.0 } else { 0.0 })
}

/// Power spectrum |rfftn(field)|^2 of a binary field.
pub fn two_point(field: &ArrayD<bool>) -> ReconResult<ArrayD<f64>> {
    let plan = RfftPlan::new(field.shape())?;
    two_point_with(&plan, field)
}

/// [`two_point`] with a prebuilt plan.
pub fn two_point_with(plan: &RfftPlan, field: &ArrayD<bool>) -> ReconResult<ArrayD<f64>> {
    let spectrum = plan.forward(&to_real(field))?;
    Ok(spectrum.mapv(|c| c.norm_sqr()))
}

/// Porosity implied by a correlation function of a field of shape `shape`.
///
/// The autocorrelation at zero offset, divided by the cell count, is the
/// fraction of `true` cells; porosity is its complement.
pub fn porosity(s2ft: &ArrayD<f64>, shape: &[usize]) -> ReconResult<f64> {
    let plan = RfftPlan::new(shape)?;
    porosity_with(&plan, s2ft)
}

/// [`porosity`] with a prebuilt plan.
pub fn porosity_with(plan: &RfftPlan, s2ft: &ArrayD<f64>) -> ReconResult<f64> {
    let autocorr = plan.inverse(&s2ft.mapv(|v| Complex64::new(v, 0.0)))?;
    let origin = autocorr.iter().next().copied().unwrap_or(0.0);
    Ok(1.0 - origin / plan.numel() as f64)
}

/// Actual fraction of `false` cells in a binary field.
pub fn field_porosity(field: &ArrayD<bool>) -> f64 {
    if field.is_empty() {
        return f64::NAN;
    }
    let n_false = field.iter().filter(|&&b| !b).count();
    n_false as f64 / field.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    fn checkerboard(n: usize) -> ArrayD<bool> {
        Array2::from_shape_fn((n, n), |(i, j)| (i + j) % 2 == 0).into_dyn()
    }

    #[test]
    fn test_two_point_shape() {
        let field = Array3::from_elem((4, 6, 10), false).into_dyn();
        let s2 = two_point(&field).unwrap();
        assert_eq!(s2.shape(), &[4, 6, 6]);
    }

    #[test]
    fn test_two_point_dc_is_squared_count() {
        let field = checkerboard(8);
        let s2 = two_point(&field).unwrap();
        // 32 true cells -> |F(0)|^2 = 32^2
        assert!((s2[[0, 0]] - 1024.0).abs() < 1e-9);
        assert!(s2.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_checkerboard_spectrum_two_peaks() {
        // A checkerboard has power only at DC and at (n/2, n/2)
        let n = 8;
        let s2 = two_point(&checkerboard(n)).unwrap();
        for ((i, j), &v) in s2.clone().into_dimensionality::<ndarray::Ix2>().unwrap().indexed_iter() {
            let peak = (i == 0 && j == 0) || (i == n / 2 && j == n / 2);
            if !peak {
                assert!(v < 1e-9, "Unexpected power {v} at ({i}, {j})");
            }
        }
        assert!((s2[[n / 2, n / 2]] - 1024.0).abs() < 1e-9);
    }

    #[test]
    fn test_porosity_of_checkerboard() {
        let field = checkerboard(16);
        let s2 = two_point(&field).unwrap();
        let p = porosity(&s2, &[16, 16]).unwrap();
        assert!((p - 0.5).abs() < 1e-12, "porosity = {p}");
    }

    #[test]
    fn test_porosity_matches_field_fraction() {
        let field = Array3::from_shape_fn((5, 4, 6), |(i, j, k)| (i * 3 + j * 5 + k * 7) % 4 == 0)
            .into_dyn();
        let s2 = two_point(&field).unwrap();
        let p = porosity(&s2, field.shape()).unwrap();
        assert!((p - field_porosity(&field)).abs() < 1e-12);
    }

    #[test]
    fn test_porosity_degenerate_fields() {
        let empty = Array2::from_elem((6, 6), false).into_dyn();
        let full = Array2::from_elem((6, 6), true).into_dyn();
        let p_empty = porosity(&two_point(&empty).unwrap(), &[6, 6]).unwrap();
        let p_full = porosity(&two_point(&full).unwrap(), &[6, 6]).unwrap();
        assert!((p_empty - 1.0).abs() < 1e-12);
        assert!(p_full.abs() < 1e-12);
    }

    #[test]
    fn test_porosity_shape_mismatch() {
        let s2 = two_point(&checkerboard(8)).unwrap();
        assert!(porosity(&s2, &[8, 10]).is_err());
    }
}
