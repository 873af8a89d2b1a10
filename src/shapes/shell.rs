//! Uniformly sampled spherical shell.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{finite, non_negative, ConfigError};
use crate::spawn::SpawnContext;

/// Parameters for [`Shape::SphericalShell`](crate::Shape::SphericalShell).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    /// Outer radius.
    pub radius: f32,
    /// Inward thinning as a fraction of `radius`; `0` is a perfect shell.
    pub thickness: f32,
    /// Per-axis scatter, multiplied by 20 world units.
    pub jitter: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            radius: 350.0,
            thickness: 0.12,
            jitter: 0.5,
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("radius", self.radius)?;
        finite("thickness", self.thickness)?;
        finite("jitter", self.jitter)?;
        Ok(())
    }

    /// Archimedes' hat-box sampling: a uniform height `u` and uniform
    /// azimuth give uniform area density on the sphere.
    pub fn generate<R: Rng + ?Sized>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let u = ctx.signed();
        let theta = ctx.angle();
        let sq = (1.0 - u * u).sqrt();
        let unit = Vec3::new(sq * theta.cos(), sq * theta.sin(), u);

        let r = self.radius * (1.0 - self.thickness * ctx.random());

        let x = unit.x * r + ctx.signed() * self.jitter * 20.0;
        let y = unit.y * r + ctx.signed() * self.jitter * 20.0;
        let z = unit.z * r + ctx.signed() * self.jitter * 20.0;

        Vec3::new(x, y, z)
    }
}
