// ─────────────────────────────────────────────────────────────────────
// SCPN Phaserec — NumPy I/O
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `.npy` adapters for correlation functions and binary fields.
//!
//! Binary fields are stored as `uint8` (0/1); on read any nonzero byte is
//! solid (`true`).

use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::{read_npy, write_npy};
use phaserec_types::error::{ReconError, ReconResult};

/// Load a half-spectrum correlation function saved as float64.
pub fn read_correlation<P: AsRef<Path>>(path: P) -> ReconResult<ArrayD<f64>> {
    let path = path.as_ref();
    read_npy(path).map_err(|e| {
        ReconError::Npy(format!("Failed to read correlation '{}': {e}", path.display()))
    })
}

pub fn write_correlation<P: AsRef<Path>>(path: P, s2ft: &ArrayD<f64>) -> ReconResult<()> {
    let path = path.as_ref();
    write_npy(path, s2ft).map_err(|e| {
        ReconError::Npy(format!("Failed to write correlation '{}': {e}", path.display()))
    })
}

/// Load a binary field saved as uint8.
pub fn read_field<P: AsRef<Path>>(path: P) -> ReconResult<ArrayD<bool>> {
    let path = path.as_ref();
    let raw: ArrayD<u8> = read_npy(path).map_err(|e| {
        ReconError::Npy(format!("Failed to read field '{}': {e}", path.display()))
    })?;
    Ok(raw.mapv(|v| v != 0))
}

pub fn write_field<P: AsRef<Path>>(path: P, field: &ArrayD<bool>) -> ReconResult<()> {
    let path = path.as_ref();
    let raw = field.mapv(u8::from);
    write_npy(path, &raw).map_err(|e| {
        ReconError::Npy(format!("Failed to write field '{}': {e}", path.display()))
    })
}
