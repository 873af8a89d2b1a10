//! Oval nebula cloud with power-law radial falloff.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{finite, non_negative, ConfigError};
use crate::spawn::SpawnContext;

/// Parameters for [`Shape::Nebula`](crate::Shape::Nebula).
///
/// Fully stochastic: index and count are ignored.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NebulaConfig {
    /// Outer radius of the cloud.
    pub radius: f32,
    /// Horizontal stretch of the oval.
    pub oval_x: f32,
    /// Vertical stretch of the oval.
    pub oval_y: f32,
    /// Radial exponent; values above 1 concentrate particles near the center.
    pub falloff: f32,
    /// In-plane scatter, proportional to each particle's radius.
    pub turbulence: f32,
    /// Depth extent as a fraction of `radius`.
    pub z_spread: f32,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            radius: 400.0,
            oval_x: 1.0,
            oval_y: 1.0,
            falloff: 2.5,
            turbulence: 0.3,
            z_spread: 0.5,
        }
    }
}

impl NebulaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("radius", self.radius)?;
        non_negative("falloff", self.falloff)?;
        finite("ovalX", self.oval_x)?;
        finite("ovalY", self.oval_y)?;
        finite("turbulence", self.turbulence)?;
        finite("zSpread", self.z_spread)?;
        Ok(())
    }

    pub fn generate<R: Rng + ?Sized>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let r = ctx.falloff_radius(self.falloff, self.radius);
        let t = ctx.angle();

        let mut x = t.cos() * r * self.oval_x;
        let mut y = t.sin() * r * self.oval_y;

        x += ctx.signed() * self.turbulence * r;
        y += ctx.signed() * self.turbulence * r;

        let z_base = ctx.falloff_radius(self.falloff, self.radius) * self.z_spread;
        let z = ctx.signed() * z_base;

        Vec3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_nebula_stays_within_bounds() {
        let config = NebulaConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        // |x| <= r * (ovalX + turbulence), |z| <= radius * zSpread
        let xy_limit = config.radius * (1.0 + config.turbulence) + 1e-3;
        let z_limit = config.radius * config.z_spread + 1e-3;
        for i in 0..2000 {
            let p = config.generate(&mut SpawnContext::new(i, 2000, &mut rng));
            assert!(p.x.abs() <= xy_limit);
            assert!(p.y.abs() <= xy_limit);
            assert!(p.z.abs() <= z_limit);
        }
    }

    #[test]
    fn test_flat_nebula_without_z_spread() {
        let config = NebulaConfig {
            z_spread: 0.0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(12);
        for i in 0..100 {
            let p = config.generate(&mut SpawnContext::new(i, 100, &mut rng));
            assert_eq!(p.z.abs(), 0.0);
        }
    }

    #[test]
    fn test_oval_squash() {
        let config = NebulaConfig {
            oval_y: 0.0,
            turbulence: 0.0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(13);
        for i in 0..100 {
            let p = config.generate(&mut SpawnContext::new(i, 100, &mut rng));
            assert_eq!(p.y.abs(), 0.0);
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        let config = NebulaConfig {
            radius: -5.0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), "radius");
    }
}
