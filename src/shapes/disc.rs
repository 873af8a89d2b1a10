//! Thin disc plume with optional spiral twist.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{finite, non_negative, ConfigError};
use crate::rotation::rotate_yaw_pitch;
use crate::spawn::SpawnContext;

/// Parameters for [`Shape::DiscPlume`](crate::Shape::DiscPlume).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscConfig {
    pub radius: f32,
    /// Radial exponent, as for the nebula.
    pub falloff: f32,
    /// Extra twist in radians at the rim; negative winds the other way.
    pub spiral: f32,
    /// In-plane scatter as a fraction of `0.15 * r`.
    pub jitter: f32,
    pub inclination_deg: f32,
    pub yaw_deg: f32,
}

impl Default for DiscConfig {
    fn default() -> Self {
        Self {
            radius: 400.0,
            falloff: 2.0,
            spiral: 0.0,
            jitter: 0.4,
            inclination_deg: 0.0,
            yaw_deg: 0.0,
        }
    }
}

/// Half-thickness of the disc as a fraction of its radius.
pub const DISC_HALF_THICKNESS: f32 = 0.02;

impl DiscConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("radius", self.radius)?;
        non_negative("falloff", self.falloff)?;
        finite("spiral", self.spiral)?;
        finite("jitter", self.jitter)?;
        finite("inclinationDeg", self.inclination_deg)?;
        finite("yawDeg", self.yaw_deg)?;
        Ok(())
    }

    pub fn generate<R: Rng + ?Sized>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let r = ctx.falloff_radius(self.falloff, self.radius);
        let base_angle = ctx.angle();
        let twist = if self.radius > 0.0 { r / self.radius } else { 0.0 };
        let angle = base_angle + twist * self.spiral;

        let mut x = angle.cos() * r;
        let y = ctx.signed() * (self.radius * DISC_HALF_THICKNESS);
        let mut z = angle.sin() * r;

        x += ctx.signed() * self.jitter * r * 0.15;
        z += ctx.signed() * self.jitter * r * 0.15;

        rotate_yaw_pitch(Vec3::new(x, y, z), self.yaw_deg, self.inclination_deg)
    }
}
