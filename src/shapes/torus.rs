//! Torus (ring doughnut) with painterly scatter.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::{finite, non_negative, ConfigError};
use crate::spawn::SpawnContext;

/// Parameters for [`Shape::Torus`](crate::Shape::Torus).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TorusConfig {
    /// Distance from the center to the middle of the tube.
    pub major: f32,
    /// Tube radius.
    pub minor: f32,
    /// In-plane scatter as a fraction of `minor`.
    pub radial_jitter: f32,
    /// Out-of-plane scatter as a fraction of `minor`.
    pub tubular_jitter: f32,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            major: 250.0,
            minor: 80.0,
            radial_jitter: 0.2,
            tubular_jitter: 0.4,
        }
    }
}

impl TorusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("major", self.major)?;
        non_negative("minor", self.minor)?;
        finite("radialJitter", self.radial_jitter)?;
        finite("tubularJitter", self.tubular_jitter)?;
        Ok(())
    }

    /// Angle around the major circle for `index` of `count`.
    pub fn major_angle(index: u32, count: u32) -> f32 {
        (index as f32 / count as f32) * TAU
    }

    /// The position around the major circle is keyed by index; the angle
    /// around the tube is random.
    pub fn generate<R: Rng + ?Sized>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let u = Self::major_angle(ctx.index, ctx.count);
        let v = ctx.angle();

        let ring = self.major + self.minor * v.cos();
        let x = ring * u.cos();
        let y = ring * u.sin();
        let z = self.minor * v.sin();

        let jx = ctx.signed() * self.radial_jitter * self.minor;
        let jy = ctx.signed() * self.radial_jitter * self.minor;
        let jz = ctx.signed() * self.tubular_jitter * self.minor;

        Vec3::new(x + jx, y + jy, z + jz)
    }
}
