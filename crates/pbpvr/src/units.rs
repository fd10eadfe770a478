use serde::{Deserialize, Serialize};

/// Millimeter of mercury per kilopascal
pub const MM_HG_PER_KPA: f64 = 7.50062;

/// Convert kilopascal to millimeter of mercury
pub fn kpa_to_mmhg(p: f64) -> f64 {
    p * MM_HG_PER_KPA
}

/// Convert millimeter of mercury to kilopascal
pub fn mmhg_to_kpa(p: f64) -> f64 {
    p / MM_HG_PER_KPA
}

/// Pressure in millimeter of mercury
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MmHg(pub f64);

/// Pressure in kilopascal
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct KPa(pub f64);

impl From<KPa> for MmHg {
    fn from(p: KPa) -> Self {
        MmHg(kpa_to_mmhg(p.0))
    }
}

impl From<MmHg> for KPa {
    fn from(p: MmHg) -> Self {
        KPa(mmhg_to_kpa(p.0))
    }
}

/// Chamber volume normalized by the unloaded volume V0: Vn = V / V0.
/// The unloaded chamber corresponds to a ratio of 1.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct VolumeRatio(pub f64);

/// Chamber volume normalized Klotz-style between the unloaded volume V0 and
/// the volume V30 reached at a passive pressure of 30 mmHg:
/// Vk = (V - V0) / (V30 - V0).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct KlotzVolume(pub f64);

impl VolumeRatio {
    /// Normalize an absolute volume by the unloaded volume
    pub fn from_volume(volume: f64, unloaded_volume: f64) -> Self {
        Self(volume / unloaded_volume)
    }

    /// Absolute volume for given unloaded volume
    pub fn to_volume(self, unloaded_volume: f64) -> f64 {
        self.0 * unloaded_volume
    }

    /// Convert to Klotz normalization given the calibrated ratio V30/V0
    pub fn to_klotz(self, v30_ratio: VolumeRatio) -> KlotzVolume {
        KlotzVolume((self.0 - 1.) / (v30_ratio.0 - 1.))
    }
}

impl KlotzVolume {
    /// Normalize an absolute volume between V0 and V30
    pub fn from_volume(volume: f64, unloaded_volume: f64, reference_volume: f64) -> Self {
        Self((volume - unloaded_volume) / (reference_volume - unloaded_volume))
    }

    /// Absolute volume for given V0 and V30
    pub fn to_volume(self, unloaded_volume: f64, reference_volume: f64) -> f64 {
        (reference_volume - unloaded_volume) * self.0 + unloaded_volume
    }

    /// Convert to plain volume-ratio normalization given the ratio V30/V0
    pub fn to_ratio(self, v30_ratio: VolumeRatio) -> VolumeRatio {
        VolumeRatio((v30_ratio.0 - 1.) * self.0 + 1.)
    }
}
