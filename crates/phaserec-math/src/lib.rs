//! Numerical primitives for SCPN Phaserec.

pub mod fft;
pub mod stats;
