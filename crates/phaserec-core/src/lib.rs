//! Two-phase microstructure reconstruction by phase retrieval.
//!
//! Given a target two-point correlation function (in the frequency domain),
//! iteratively search for a binary field that reproduces it: impose the
//! target magnitude spectrum, low-pass filter, re-binarize at the target
//! porosity, repeat while the correlation residual keeps dropping.

pub mod correlation;
pub mod filter;
pub mod io;
pub mod phase;
pub mod reconstruct;
pub mod threshold;

pub use reconstruct::{phaserec, phaserec_from_field, Reconstruction, Reconstructor, StopReason};
