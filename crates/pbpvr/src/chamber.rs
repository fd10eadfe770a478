//! Physics-based pressure-volume relationship of a spherical heart chamber
//!
//! Chamber pressure is obtained by integrating the passive strain-energy and
//! active fiber-tension density rates across the normalized wall thickness.
//! Gating the two contributions yields the classic curves: passive only for
//! end-diastole (EDPVR), passive plus active for end-systole (ESPVR).

use crate::{
    ChamberError, DomainError, Inversion, KPa, KlotzVolume, MmHg, VolumeRatio, active_tension_rate,
    invert_pressure, passive_energy_rate, INVERSION_SEED, KLOTZ_REFERENCE_PRESSURE,
};
use numerics::adaptive_quadrature;
use serde::{Deserialize, Serialize};

/// Material and geometry of the chamber wall
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChamberWall {
    /// Wall thickness normalized by the unloaded inner radius
    pub thickness: f64,

    /// Stiffness scale of the passive strain-energy law
    pub stiffness: MmHg,

    /// Dimensionless stiffening exponent of the passive strain-energy law
    pub stiffening: f64,

    /// Peak tension developed by fully contracted muscle fibers
    pub active_tension: MmHg,

    /// Reference stretch ratio of the contractile force law
    /// (slack over optimal sarcomere length)
    pub reference_stretch: f64,
}

impl Default for ChamberWall {
    fn default() -> Self {
        Self {
            thickness: 0.27,
            stiffness: KPa(1.).into(),
            stiffening: 3.8,
            active_tension: KPa(50.).into(),
            reference_stretch: 1.58 / 1.85,
        }
    }
}

impl ChamberWall {
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_stiffness(mut self, stiffness: MmHg) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_stiffening(mut self, stiffening: f64) -> Self {
        self.stiffening = stiffening;
        self
    }

    pub fn with_active_tension(mut self, active_tension: MmHg) -> Self {
        self.active_tension = active_tension;
        self
    }

    pub fn with_reference_stretch(mut self, reference_stretch: f64) -> Self {
        self.reference_stretch = reference_stretch;
        self
    }

    /// All parameters must be finite and the wall must have positive thickness
    pub fn validate(&self) -> Result<(), ChamberError> {
        let fields = [
            ("thickness", self.thickness),
            ("stiffness", self.stiffness.0),
            ("stiffening", self.stiffening),
            ("active_tension", self.active_tension.0),
            ("reference_stretch", self.reference_stretch),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ChamberError::InvalidParameter {
                    name,
                    value,
                    reason: "not finite",
                });
            }
        }

        if self.thickness <= 0. {
            return Err(ChamberError::InvalidParameter {
                name: "thickness",
                value: self.thickness,
                reason: "must be positive",
            });
        }

        Ok(())
    }
}

/// Gating of the two pressure contributions making up a curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveMix {
    /// Scale of the passive contribution, usually 0 or 1
    pub passive: f64,

    /// Scale of the active contribution, usually 0 or 1
    pub active: f64,
}

impl CurveMix {
    /// End-diastolic curve: relaxed fibers, passive wall response only
    pub const EDPVR: Self = Self {
        passive: 1.,
        active: 0.,
    };

    /// End-systolic curve: contracted fibers on top of the passive response
    pub const ESPVR: Self = Self {
        passive: 1.,
        active: 1.,
    };
}

/// Pressure model of a thick-walled spherical heart chamber
#[derive(Clone, Debug)]
pub struct ChamberPressureModel {
    wall: ChamberWall,
    mix: CurveMix,
    quad_accuracy: f64,
    subdivision_limit: usize,
    inversion_accuracy: f64,
    inversion_steps: usize,
}

impl ChamberPressureModel {
    /// Model with explicit contribution gating. Fails fast on invalid
    /// parameters.
    pub fn new(wall: ChamberWall, mix: CurveMix) -> Result<Self, ChamberError> {
        wall.validate()?;
        for (name, value) in [("mix.passive", mix.passive), ("mix.active", mix.active)] {
            if !value.is_finite() {
                return Err(ChamberError::InvalidParameter {
                    name,
                    value,
                    reason: "not finite",
                });
            }
        }

        Ok(Self {
            wall,
            mix,
            quad_accuracy: 1e-9,
            subdivision_limit: 24,
            inversion_accuracy: 1e-6,
            inversion_steps: 64,
        })
    }

    /// End-diastolic model: passive wall response only
    pub fn edpvr(wall: ChamberWall) -> Result<Self, ChamberError> {
        Self::new(wall, CurveMix::EDPVR)
    }

    /// End-systolic model: passive plus active response
    pub fn espvr(wall: ChamberWall) -> Result<Self, ChamberError> {
        Self::new(wall, CurveMix::ESPVR)
    }

    pub fn wall(&self) -> &ChamberWall {
        &self.wall
    }

    pub fn mix(&self) -> CurveMix {
        self.mix
    }

    /// Absolute accuracy of the wall quadrature, in pressure units
    pub fn with_quadrature_accuracy(mut self, accuracy: f64) -> Self {
        self.quad_accuracy = accuracy;
        self
    }

    /// Bisection depth budget of the wall quadrature
    pub fn with_subdivision_limit(mut self, limit: usize) -> Self {
        self.subdivision_limit = limit;
        self
    }

    /// Residual tolerance of pressure inversions, in mmHg
    pub fn with_inversion_accuracy(mut self, accuracy: f64) -> Self {
        self.inversion_accuracy = accuracy;
        self
    }

    /// Step budget of pressure inversions
    pub fn with_inversion_steps(mut self, steps: usize) -> Self {
        self.inversion_steps = steps;
        self
    }

    /// Passive (end-diastolic) chamber pressure at given volume ratio
    pub fn passive_pressure(&self, volume: VolumeRatio) -> Result<MmHg, ChamberError> {
        let vn = self.checked_ratio(volume)?;
        let (a, b) = (self.wall.stiffness.0, self.wall.stiffening);
        let p = self.integrate(|d| passive_energy_rate(d, vn, a, b))?;
        Ok(MmHg(p))
    }

    /// Active (contractile) chamber pressure at given volume ratio
    pub fn active_pressure(&self, volume: VolumeRatio) -> Result<MmHg, ChamberError> {
        let vn = self.checked_ratio(volume)?;
        let (ta, l0) = (self.wall.active_tension.0, self.wall.reference_stretch);
        let p = self.integrate(|d| active_tension_rate(d, vn, ta, l0))?;
        Ok(MmHg(p))
    }

    /// Chamber pressure with the model's contribution mix applied
    pub fn pressure(&self, volume: VolumeRatio) -> Result<MmHg, ChamberError> {
        self.checked_ratio(volume)?;

        let mut p = 0.;
        if self.mix.passive != 0. {
            p += self.mix.passive * self.passive_pressure(volume)?.0;
        }
        if self.mix.active != 0. {
            p += self.mix.active * self.active_pressure(volume)?.0;
        }
        Ok(MmHg(p))
    }

    /// Pressures for a sequence of volume ratios, one per input, order
    /// preserved. Fails on the first invalid volume.
    pub fn pressure_curve(&self, volumes: &[VolumeRatio]) -> Result<Vec<MmHg>, ChamberError> {
        volumes.iter().map(|&v| self.pressure(v)).collect()
    }

    /// Volume ratio which reproduces the given chamber pressure, found by a
    /// secant iteration on the pressure residual started at `seed`
    pub fn volume(&self, pressure: MmHg, seed: VolumeRatio) -> Result<Inversion, ChamberError> {
        invert_pressure(
            |vn| self.pressure(VolumeRatio(vn)).map(|p| p.0),
            pressure.0,
            seed.0,
            self.inversion_accuracy,
            self.inversion_steps,
        )
    }

    /// Ratio V30/V0 between the Klotz reference volume (passive pressure of
    /// 30 mmHg) and the unloaded volume, used to convert between the two
    /// volume normalizations
    pub fn klotz_reference_ratio(&self) -> Result<Inversion, ChamberError> {
        invert_pressure(
            |vn| self.passive_pressure(VolumeRatio(vn)).map(|p| p.0),
            KLOTZ_REFERENCE_PRESSURE.0,
            INVERSION_SEED.0,
            self.inversion_accuracy,
            self.inversion_steps,
        )
    }

    /// Passive pressures over Klotz-normalized volumes. Calibrates V30/V0
    /// first, then converts each input to a plain volume ratio.
    pub fn passive_curve_klotz(&self, volumes: &[KlotzVolume]) -> Result<Vec<MmHg>, ChamberError> {
        let v30_ratio = self.klotz_reference_ratio()?.volume_ratio;
        volumes
            .iter()
            .map(|&vk| self.passive_pressure(vk.to_ratio(v30_ratio)))
            .collect()
    }

    fn integrate(&self, rate: impl Fn(f64) -> f64) -> Result<f64, ChamberError> {
        let quad = adaptive_quadrature(
            0.,
            self.wall.thickness,
            self.quad_accuracy,
            self.subdivision_limit,
            rate,
        )?;
        Ok(quad.value)
    }

    /// The inner-radius radicand R³ + Vn - 1 is smallest at depth 0 where it
    /// equals Vn, so a positive finite ratio is valid across the whole wall.
    fn checked_ratio(&self, volume: VolumeRatio) -> Result<f64, ChamberError> {
        if !volume.0.is_finite() || volume.0 <= 0. {
            return Err(DomainError {
                depth: 0.,
                volume_ratio: volume.0,
            }
            .into());
        }
        Ok(volume.0)
    }
}
