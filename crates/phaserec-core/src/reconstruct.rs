// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — Reconstruction Loop
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Iterative phase-retrieval reconstruction of a binary field.
//!
//! Each step:
//!   gray  = filter .* replace_abs(recon, s2ft)
//!   recon = threshold(irfftn(gray), p)
//!   n     = |s2ft - two_point(recon)| / numel / initnorm
//! and the loop stops as soon as the cost stops dropping by at least
//! `tolerance` or rises.

use log::{debug, info};
use ndarray::{ArrayD, Zip};
use phaserec_math::fft::RfftPlan;
use phaserec_math::stats::uniform_field;
use phaserec_types::config::ReconConfig;
use phaserec_types::error::{ReconError, ReconResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::correlation::{porosity_with, two_point, two_point_with};
use crate::filter::make_filter_with;
use crate::phase::replace_abs_with;
use crate::threshold::threshold;

/// Progress is logged on steps 1, 11, 21, ...
const REPORT_EVERY: usize = 10;

/// Porosities closer than this to 0 or 1 count as degenerate.
const POROSITY_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Cost decreased by less than the tolerance; the latest field is kept.
    Stagnated,
    /// Cost increased; the previous field is kept.
    Worsened,
    /// Step budget exhausted.
    MaxSteps,
}

#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub field: ArrayD<bool>,
    /// Normalized cost of `field` (1.0 for the initial guess).
    pub cost: f64,
    /// Target porosity implied by the correlation function.
    pub porosity: f64,
    /// Number of loop bodies executed.
    pub iterations: usize,
    pub stop: StopReason,
    /// Every computed cost, including a final rejected one.
    pub cost_history: Vec<f64>,
}

impl Reconstruction {
    pub fn into_parts(self) -> (ArrayD<bool>, f64) {
        (self.field, self.cost)
    }
}

/// FFT plan and filter for one grid shape, reusable across runs.
#[derive(Debug)]
pub struct Reconstructor {
    plan: RfftPlan,
    filter: ArrayD<f64>,
    config: ReconConfig,
}

impl Reconstructor {
    pub fn new(shape: &[usize], config: &ReconConfig) -> ReconResult<Self> {
        config.validate()?;
        let plan = RfftPlan::new(shape)?;
        let filter = make_filter_with(&plan, config.radius)?;
        Ok(Self {
            plan,
            filter,
            config: config.clone(),
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.plan.shape()
    }

    pub fn filter(&self) -> &ArrayD<f64> {
        &self.filter
    }

    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// `|(s2ft - two_point(field)) / numel(s2ft)|_2`
    pub fn residual(&self, s2ft: &ArrayD<f64>, field: &ArrayD<bool>) -> ReconResult<f64> {
        let current = two_point_with(&self.plan, field)?;
        if current.shape() != s2ft.shape() {
            return Err(ReconError::ShapeMismatch {
                expected: current.shape().to_vec(),
                found: s2ft.shape().to_vec(),
            });
        }
        let scale = s2ft.len() as f64;
        let sum_sq = Zip::from(s2ft).and(&current).fold(0.0, |acc, &t, &c| {
            let d = (t - c) / scale;
            acc + d * d
        });
        Ok(sum_sq.sqrt())
    }

    /// Run one reconstruction against the correlation function `s2ft`.
    ///
    /// `noise` is the initial guess; without one, a uniform random field
    /// drawn from `rng` is thresholded at the target porosity.
    pub fn run<R: Rng + ?Sized>(
        &self,
        s2ft: &ArrayD<f64>,
        noise: Option<ArrayD<bool>>,
        rng: &mut R,
    ) -> ReconResult<Reconstruction> {
        let p = porosity_with(&self.plan, s2ft)?;
        if !(p > POROSITY_EPS && p < 1.0 - POROSITY_EPS) {
            return Err(ReconError::InvalidPorosity { porosity: p });
        }

        let mut recon = match noise {
            Some(field) => {
                if field.shape() != self.shape() {
                    return Err(ReconError::ShapeMismatch {
                        expected: self.shape().to_vec(),
                        found: field.shape().to_vec(),
                    });
                }
                field
            }
            None => threshold(&uniform_field(self.shape(), rng), p),
        };

        let initnorm = self.residual(s2ft, &recon)?;
        let mut oldn = if initnorm > 0.0 { 1.0 } else { 0.0 };
        debug!(
            "phaserec start: shape {:?}, porosity {p:.4}, initial residual {initnorm:.6e}",
            self.shape()
        );

        let mut history = Vec::new();
        for step in 1..=self.config.max_steps {
            let mut gray = replace_abs_with(&self.plan, &recon, s2ft)?;
            Zip::from(&mut gray)
                .and(&self.filter)
                .for_each(|g, &f| *g *= f);
            let candidate = threshold(&self.plan.inverse(&gray)?, p);
            let n = relative_cost(self.residual(s2ft, &candidate)?, initnorm);
            history.push(n);

            if step % REPORT_EVERY == 1 {
                info!("phaserec step {step}: cost {n:.6e}");
            }

            if n.is_nan() || n > oldn {
                debug!("phaserec stop at step {step}: cost rose {oldn:.6e} -> {n:.6e}");
                return Ok(Reconstruction {
                    field: recon,
                    cost: oldn,
                    porosity: p,
                    iterations: step,
                    stop: StopReason::Worsened,
                    cost_history: history,
                });
            }
            if oldn - n < self.config.tolerance {
                debug!("phaserec stop at step {step}: cost stagnated at {n:.6e}");
                return Ok(Reconstruction {
                    field: candidate,
                    cost: n,
                    porosity: p,
                    iterations: step,
                    stop: StopReason::Stagnated,
                    cost_history: history,
                });
            }

            recon = candidate;
            oldn = n;
        }

        debug!(
            "phaserec stop: {} steps exhausted at cost {oldn:.6e}",
            self.config.max_steps
        );
        Ok(Reconstruction {
            field: recon,
            cost: oldn,
            porosity: p,
            iterations: self.config.max_steps,
            stop: StopReason::MaxSteps,
            cost_history: history,
        })
    }
}

fn relative_cost(residual: f64, initnorm: f64) -> f64 {
    if initnorm > 0.0 {
        residual / initnorm
    } else if residual == 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

/// Reconstruct a binary field of shape `shape` from its correlation function.
///
/// The random initial guess is seeded from `config.seed`, or from OS entropy
/// when no seed is set.
pub fn phaserec(
    s2ft: &ArrayD<f64>,
    shape: &[usize],
    config: &ReconConfig,
    noise: Option<ArrayD<bool>>,
) -> ReconResult<Reconstruction> {
    let reconstructor = Reconstructor::new(shape, config)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    reconstructor.run(s2ft, noise, &mut rng)
}

/// Reconstruct a statistically equivalent field from a reference field.
pub fn phaserec_from_field(
    field: &ArrayD<bool>,
    config: &ReconConfig,
    noise: Option<ArrayD<bool>>,
) -> ReconResult<Reconstruction> {
    let s2ft = two_point(field)?;
    phaserec(&s2ft, field.shape(), config, noise)
}
