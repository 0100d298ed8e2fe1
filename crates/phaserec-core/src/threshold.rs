// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — Thresholder
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Quantile binarization of grayscale fields.

use ndarray::{Array, Dimension};
use phaserec_math::stats::quantile;

/// Binarize `field` at its `p`-quantile: a cell is `true` iff its value
/// strictly exceeds the quantile, so roughly `1 - p` of the cells end up
/// `true` and `p` (the porosity) end up `false`.
pub fn threshold<D: Dimension>(field: &Array<f64, D>, p: f64) -> Array<bool, D> {
    let values: Vec<f64> = field.iter().copied().collect();
    let cutoff = quantile(&values, p);
    field.mapv(|v| v > cutoff)
}
