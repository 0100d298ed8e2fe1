// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, ReconResult};

/// Largest accepted filter radius, in cells. The kernel support grows as
/// 4 * ceil(radius), and every offset in it is folded onto the grid.
pub const MAX_RADIUS: f64 = 1.0e6;

/// Options of one phase-retrieval reconstruction run.
/// Every field is optional in JSON and falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconConfig {
    /// Standard deviation (in cells) of the Gaussian low-pass filter.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Upper bound on loop iterations.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Minimum cost decrease per iteration before the loop stops.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Seed for the initial random guess. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_radius() -> f64 {
    0.6
}
fn default_max_steps() -> usize {
    300
}
fn default_tolerance() -> f64 {
    1e-5
}

impl Default for ReconConfig {
    fn default() -> Self {
        ReconConfig {
            radius: default_radius(),
            max_steps: default_max_steps(),
            tolerance: default_tolerance(),
            seed: None,
        }
    }
}

impl ReconConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> ReconResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReconResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 || self.radius > MAX_RADIUS {
            return Err(ReconError::ConfigError(format!(
                "radius must be finite and in (0, {MAX_RADIUS}], got {}",
                self.radius
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ReconError::ConfigError(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
