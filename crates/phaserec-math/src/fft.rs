// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — N-dimensional Real FFT
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! N-dimensional real-input FFT wrappers around realfft + rustfft.
//!
//! Convention matches numpy:
//! - Forward (rfftn): unnormalized, last axis stored as n/2+1 bins
//! - Inverse (irfftn): normalized by 1/prod(shape)
//!
//! The last axis goes through realfft, every other axis through a
//! complex rustfft plan. Arrays are row-major.

use std::sync::Arc;

use ndarray::{ArrayD, Axis, IxDyn};
use num_complex::Complex64;
use phaserec_types::error::{ReconError, ReconResult};
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};

/// Half-spectrum shape of a real input of the given shape.
pub fn rfft_shape(shape: &[usize]) -> Vec<usize> {
    let mut out = shape.to_vec();
    if let Some(last) = out.last_mut() {
        *last = *last / 2 + 1;
    }
    out
}

/// Cached 1-D plans for every axis of one real-input shape.
///
/// Plans only borrow `&self` while transforming, so a single plan can be
/// shared across iterations and threads.
pub struct RfftPlan {
    shape: Vec<usize>,
    spectrum_shape: Vec<usize>,
    r2c: Arc<dyn RealToComplex<f64>>,
    c2r: Arc<dyn ComplexToReal<f64>>,
    // Complex plans for axes 0..ndim-1
    forward: Vec<Arc<dyn Fft<f64>>>,
    inverse: Vec<Arc<dyn Fft<f64>>>,
}

impl std::fmt::Debug for RfftPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RfftPlan")
            .field("shape", &self.shape)
            .field("spectrum_shape", &self.spectrum_shape)
            .finish()
    }
}

impl RfftPlan {
    pub fn new(shape: &[usize]) -> ReconResult<Self> {
        if shape.is_empty() {
            return Err(ReconError::ConfigError(
                "FFT shape must have at least one axis".to_string(),
            ));
        }
        if let Some(axis) = shape.iter().position(|&n| n == 0) {
            return Err(ReconError::ConfigError(format!(
                "FFT shape {shape:?} has zero length on axis {axis}"
            )));
        }

        let n_last = shape[shape.len() - 1];
        let mut real_planner = RealFftPlanner::<f64>::new();
        let r2c = real_planner.plan_fft_forward(n_last);
        let c2r = real_planner.plan_fft_inverse(n_last);

        let mut planner = FftPlanner::new();
        let leading = &shape[..shape.len() - 1];
        let forward = leading
            .iter()
            .map(|&n| planner.plan_fft_forward(n))
            .collect();
        let inverse = leading
            .iter()
            .map(|&n| planner.plan_fft_inverse(n))
            .collect();

        Ok(Self {
            shape: shape.to_vec(),
            spectrum_shape: rfft_shape(shape),
            r2c,
            c2r,
            forward,
            inverse,
        })
    }

    /// Real-space shape this plan transforms.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Half-spectrum shape produced by [`RfftPlan::forward`].
    pub fn spectrum_shape(&self) -> &[usize] {
        &self.spectrum_shape
    }

    /// Number of real-space cells.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Forward N-d real FFT. Matches `numpy.fft.rfftn()`.
    pub fn forward(&self, input: &ArrayD<f64>) -> ReconResult<ArrayD<Complex64>> {
        check_shape(&self.shape, input.shape())?;
        let last = Axis(self.shape.len() - 1);

        let mut out = ArrayD::<Complex64>::zeros(IxDyn(&self.spectrum_shape));
        let mut buffer = self.r2c.make_input_vec();
        let mut spectrum = self.r2c.make_output_vec();
        let mut scratch = self.r2c.make_scratch_vec();

        for (lane_in, mut lane_out) in input.lanes(last).into_iter().zip(out.lanes_mut(last)) {
            for (b, &v) in buffer.iter_mut().zip(lane_in.iter()) {
                *b = v;
            }
            self.r2c
                .process_with_scratch(&mut buffer, &mut spectrum, &mut scratch)?;
            for (o, &c) in lane_out.iter_mut().zip(spectrum.iter()) {
                *o = c;
            }
        }

        for (ax, fft) in self.forward.iter().enumerate() {
            transform_axis(&mut out, Axis(ax), fft.as_ref());
        }
        Ok(out)
    }

    /// Inverse N-d real FFT. Matches `numpy.fft.irfftn(x, s=shape)`.
    ///
    /// Applies 1/prod(shape) normalization. The imaginary parts of the DC
    /// and Nyquist bins of each last-axis lane are discarded.
    pub fn inverse(&self, spectrum: &ArrayD<Complex64>) -> ReconResult<ArrayD<f64>> {
        check_shape(&self.spectrum_shape, spectrum.shape())?;
        let last = Axis(self.shape.len() - 1);
        let n_last = self.shape[self.shape.len() - 1];
        let norm = 1.0 / self.numel() as f64;

        let mut data = spectrum.clone();
        for (ax, ifft) in self.inverse.iter().enumerate() {
            transform_axis(&mut data, Axis(ax), ifft.as_ref());
        }

        let mut out = ArrayD::<f64>::zeros(IxDyn(&self.shape));
        let mut buffer = self.c2r.make_input_vec();
        let mut real = self.c2r.make_output_vec();
        let mut scratch = self.c2r.make_scratch_vec();

        for (lane_in, mut lane_out) in data.lanes(last).into_iter().zip(out.lanes_mut(last)) {
            for (b, &c) in buffer.iter_mut().zip(lane_in.iter()) {
                *b = c;
            }
            buffer[0].im = 0.0;
            if n_last % 2 == 0 {
                buffer[n_last / 2].im = 0.0;
            }
            self.c2r
                .process_with_scratch(&mut buffer, &mut real, &mut scratch)?;
            for (o, &r) in lane_out.iter_mut().zip(real.iter()) {
                *o = r * norm;
            }
        }
        Ok(out)
    }
}

fn check_shape(expected: &[usize], found: &[usize]) -> ReconResult<()> {
    if expected != found {
        return Err(ReconError::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        });
    }
    Ok(())
}

/// In-place complex FFT of every lane along `axis`.
fn transform_axis(data: &mut ArrayD<Complex64>, axis: Axis, fft: &dyn Fft<f64>) {
    let n = data.len_of(axis);
    let mut buffer = vec![Complex64::new(0.0, 0.0); n];
    let mut scratch = vec![Complex64::new(0.0, 0.0); fft.get_inplace_scratch_len()];

    for mut lane in data.lanes_mut(axis) {
        for (b, &v) in buffer.iter_mut().zip(lane.iter()) {
            *b = v;
        }
        fft.process_with_scratch(&mut buffer, &mut scratch);
        for (v, &b) in lane.iter_mut().zip(buffer.iter()) {
            *v = b;
        }
    }
}

/// Forward N-d real FFT with a one-off plan.
pub fn rfftn(input: &ArrayD<f64>) -> ReconResult<ArrayD<Complex64>> {
    RfftPlan::new(input.shape())?.forward(input)
}

/// Inverse N-d real FFT with a one-off plan; `shape` is the real-space shape.
pub fn irfftn(spectrum: &ArrayD<Complex64>, shape: &[usize]) -> ReconResult<ArrayD<f64>> {
    RfftPlan::new(shape)?.inverse(spectrum)
}
