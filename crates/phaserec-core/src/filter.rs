// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — Gaussian Low-Pass Filter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaussian low-pass filter in the half-spectrum domain.
//!
//! The spatial kernel is separable: one truncated 1-D Gaussian per axis,
//! wrapped onto the periodic grid so its centre sits on index 0, then
//! normalized. The N-d kernel is the outer product of the axis kernels, so
//! it sums to 1 and its DC response is exactly 1.

use ndarray::{ArrayD, IxDyn};
use phaserec_math::fft::RfftPlan;
use phaserec_types::config::MAX_RADIUS;
use phaserec_types::error::{ReconError, ReconResult};

/// Half-width of the kernel support window: `(4 * ceil(sigma) + 1) / 2`.
pub fn support_half_width(sigma: f64) -> ReconResult<usize> {
    check_sigma(sigma)?;
    (sigma.ceil() as usize)
        .checked_mul(4)
        .and_then(|v| v.checked_add(1))
        .map(|v| v / 2)
        .ok_or_else(|| {
            ReconError::ConfigError(format!("filter support overflows for sigma {sigma}"))
        })
}

fn check_sigma(sigma: f64) -> ReconResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 || sigma > MAX_RADIUS {
        return Err(ReconError::ConfigError(format!(
            "filter sigma must be finite and in (0, {MAX_RADIUS}], got {sigma}"
        )));
    }
    Ok(())
}

/// Truncated 1-D Gaussian on offsets `-w..=w`, folded modulo `n`, sum 1.
fn wrapped_gaussian(n: usize, sigma: f64, w: usize) -> Vec<f64> {
    let mut g = vec![0.0; n];
    let two_var = 2.0 * sigma * sigma;
    let w = w as isize;
    for x in -w..=w {
        let k = x.rem_euclid(n as isize) as usize;
        g[k] += (-((x * x) as f64) / two_var).exp();
    }
    let total: f64 = g.iter().sum();
    for v in g.iter_mut() {
        *v /= total;
    }
    g
}

/// Periodic spatial Gaussian kernel of the given shape, centred on the origin.
pub fn gaussian_kernel(shape: &[usize], sigma: f64) -> ReconResult<ArrayD<f64>> {
    let w = support_half_width(sigma)?;
    let axes: Vec<Vec<f64>> = shape
        .iter()
        .map(|&n| wrapped_gaussian(n, sigma, w))
        .collect();

    Ok(ArrayD::from_shape_fn(IxDyn(shape), |idx| {
        axes.iter()
            .enumerate()
            .map(|(d, g)| g[idx[d]])
            .product::<f64>()
    }))
}

/// Frequency response of the Gaussian kernel on a grid of shape `shape`.
pub fn make_filter(shape: &[usize], sigma: f64) -> ReconResult<ArrayD<f64>> {
    let plan = RfftPlan::new(shape)?;
    make_filter_with(&plan, sigma)
}

/// [`make_filter`] with a prebuilt plan.
///
/// The kernel is real and even, so its spectrum is real; the real part is
/// kept and truncation ripple below zero is clamped.
pub fn make_filter_with(plan: &RfftPlan, sigma: f64) -> ReconResult<ArrayD<f64>> {
    let kernel = gaussian_kernel(plan.shape(), sigma)?;
    let response = plan.forward(&kernel)?;
    Ok(response.mapv(|c| c.re.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_half_width() {
        assert_eq!(support_half_width(0.6).unwrap(), 2);
        assert_eq!(support_half_width(1.0).unwrap(), 2);
        assert_eq!(support_half_width(1.2).unwrap(), 4);
        assert_eq!(support_half_width(3.0).unwrap(), 6);
    }

    #[test]
    fn test_kernel_sums_to_one() {
        for &sigma in &[0.3, 0.6, 1.7, 4.0] {
            let k = gaussian_kernel(&[12, 9, 5], sigma).unwrap();
            assert!((k.sum() - 1.0).abs() < 1e-12, "sigma = {sigma}: sum {}", k.sum());
            assert!(k.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn test_kernel_centred_and_symmetric() {
        let n = 10;
        let k = gaussian_kernel(&[n], 0.6).unwrap();
        let peak = k.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((k[[0]] - peak).abs() < 1e-15, "maximum must sit on index 0");
        for i in 1..n {
            assert!((k[[i]] - k[[n - i]]).abs() < 1e-15, "kernel not even at {i}");
        }
        // Outside the support window w = 2 the kernel vanishes
        for i in 3..=n - 3 {
            assert_eq!(k[[i]], 0.0);
        }
    }

    #[test]
    fn test_kernel_wraps_on_small_grid() {
        // Support -6..=6 folds onto a length-4 axis
        let k = gaussian_kernel(&[4], 3.0).unwrap();
        assert!((k.sum() - 1.0).abs() < 1e-12);
        assert!(k.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_filter_dc_is_one() {
        let f = make_filter(&[16, 16], 0.6).unwrap();
        assert_eq!(f.shape(), &[16, 9]);
        assert!((f[[0, 0]] - 1.0).abs() < 1e-12);
        assert!(f.iter().all(|&v| v >= 0.0 && v <= 1.0 + 1e-12));
    }

    #[test]
    fn test_filter_is_low_pass() {
        let f = make_filter(&[32], 2.0).unwrap();
        assert!(f[[0]] > f[[4]]);
        assert!(f[[4]] > f[[16]]);
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(matches!(make_filter(&[8, 8], 0.0), Err(ReconError::ConfigError(_))));
        assert!(make_filter(&[8, 8], f64::NAN).is_err());
        assert!(gaussian_kernel(&[8], -1.0).is_err());
    }

    #[test]
    fn test_huge_sigma_rejected() {
        assert!(matches!(support_half_width(1e19), Err(ReconError::ConfigError(_))));
        assert!(matches!(make_filter(&[8, 8], 1e19), Err(ReconError::ConfigError(_))));
        assert!(make_filter(&[8, 8], MAX_RADIUS * 2.0).is_err());
    }

    #[test]
    fn test_wide_sigma_folds_to_flat_kernel() {
        // Support -2000..=2000 folds many times onto a length-8 axis
        let k = gaussian_kernel(&[8], 1000.0).unwrap();
        assert!((k.sum() - 1.0).abs() < 1e-12);
        for &v in k.iter() {
            assert!(v.is_finite() && (v - 0.125).abs() < 1e-3, "kernel value {v}");
        }
        let f = make_filter(&[8, 8], 1000.0).unwrap();
        assert!(f.iter().all(|v| v.is_finite()));
        assert!((f[[0, 0]] - 1.0).abs() < 1e-12);
    }
}
