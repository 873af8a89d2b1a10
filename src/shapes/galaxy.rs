//! Multi-armed spiral galaxy.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::{finite, non_negative, ConfigError};
use crate::rotation::rotate_yaw_pitch;
use crate::spawn::SpawnContext;

/// Parameters for [`Shape::SpiralGalaxy`](crate::Shape::SpiralGalaxy).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GalaxyConfig {
    pub radius: f32,
    /// Number of spiral arms; particles are dealt round-robin across arms.
    pub arms: u32,
    /// Turns of winding from center to rim.
    pub spin: f32,
    /// Radial noise as a fraction of each particle's radius.
    pub arm_spread: f32,
    /// Fixed-scale positional jitter (multiplied by 30 world units).
    pub fuzz: f32,
    /// Pitch: 0 is face-on, 90 is edge-on.
    pub inclination_deg: f32,
    pub yaw_deg: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            radius: 400.0,
            arms: 3,
            spin: 2.5,
            arm_spread: 0.25,
            fuzz: 0.6,
            inclination_deg: 0.0,
            yaw_deg: 0.0,
        }
    }
}

impl GalaxyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("radius", self.radius)?;
        if self.arms == 0 {
            return Err(ConfigError::Zero { field: "arms" });
        }
        finite("spin", self.spin)?;
        finite("armSpread", self.arm_spread)?;
        finite("fuzz", self.fuzz)?;
        finite("inclinationDeg", self.inclination_deg)?;
        finite("yawDeg", self.yaw_deg)?;
        Ok(())
    }

    /// Radial distance for `index` of `count`. The `t^0.6` growth packs
    /// particles toward the core.
    pub fn core_radius(&self, index: u32, count: u32) -> f32 {
        let t = index as f32 / count as f32;
        t.powf(0.6) * self.radius
    }

    pub fn generate<R: Rng + ?Sized>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let r = self.core_radius(ctx.index, ctx.count);
        let arm = ctx.index % self.arms;
        let base_angle = (arm as f32 / self.arms as f32) * TAU;
        // r / radius is NaN for a zero radius; the winding is meaningless there.
        let winding = if self.radius > 0.0 { r / self.radius } else { 0.0 };
        let angle = base_angle + winding * self.spin * TAU;

        let radial_noise = ctx.signed() * self.arm_spread * r;
        let jitter_x = ctx.signed() * self.fuzz * 30.0;
        let jitter_y = ctx.centered() * self.fuzz * 30.0;
        let jitter_z = ctx.signed() * self.fuzz * 30.0;

        let x = angle.cos() * (r + radial_noise) + jitter_x;
        let y = ctx.centered() * 40.0 + jitter_y;
        let z = angle.sin() * (r + radial_noise) + jitter_z;

        rotate_yaw_pitch(Vec3::new(x, y, z), self.yaw_deg, self.inclination_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn calm() -> GalaxyConfig {
        GalaxyConfig {
            arm_spread: 0.0,
            fuzz: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_disc_thickness_without_fuzz() {
        let config = calm();
        let mut rng = SmallRng::seed_from_u64(21);
        for i in 0..300 {
            let p = config.generate(&mut SpawnContext::new(i, 300, &mut rng));
            assert!(p.y.abs() <= 20.0);
        }
    }

    #[test]
    fn test_in_plane_radius_follows_index() {
        let config = calm();
        let mut rng = SmallRng::seed_from_u64(22);
        let count = 100;
        for i in 0..count {
            let p = config.generate(&mut SpawnContext::new(i, count, &mut rng));
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            let expected = config.core_radius(i, count);
            assert!((planar - expected).abs() < 1e-2, "index {}", i);
        }
    }

    #[test]
    fn test_arms_dealt_round_robin() {
        let config = GalaxyConfig {
            spin: 0.0,
            ..calm()
        };
        let mut rng = SmallRng::seed_from_u64(23);
        // With no spin every particle of arm 0 lies on the +X axis.
        for i in (3..300).step_by(3) {
            let p = config.generate(&mut SpawnContext::new(i, 300, &mut rng));
            assert!(p.z.abs() < 1e-3, "index {}: {:?}", i, p);
            assert!(p.x > 0.0);
        }
    }

    #[test]
    fn test_zero_arms_rejected() {
        let config = GalaxyConfig {
            arms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::Zero { field: "arms" });
    }

    #[test]
    fn test_edge_on_tilt_moves_disc_vertical() {
        let config = GalaxyConfig {
            inclination_deg: 90.0,
            ..calm()
        };
        let mut rng = SmallRng::seed_from_u64(24);
        let p = config.generate(&mut SpawnContext::new(60, 100, &mut rng));
        // Edge-on, the disc's depth axis maps onto vertical.
        assert!(p.z.abs() <= 20.0 + 1e-3);
    }
}
