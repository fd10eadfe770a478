//! Empirical pressure-volume curves from the literature
//!
//! Closed-form EDPVR fits commonly used as references next to the
//! physics-based model.

use crate::{KPa, KlotzVolume, MmHg};

/// Klotz power-law EDPVR over Klotz-normalized volume: p = A Vk^B
pub fn klotz_pressure(volume: KlotzVolume, scale: MmHg, exponent: f64) -> MmHg {
    MmHg(scale.0 * volume.0.powf(exponent))
}

/// Sunagawa exponential EDPVR over absolute volume: p = A (exp(B (V - V0)) - 1)
pub fn sunagawa_pressure(volume: f64, unloaded_volume: f64, scale: KPa, rate: f64) -> KPa {
    KPa(scale.0 * ((rate * (volume - unloaded_volume)).exp() - 1.))
}
