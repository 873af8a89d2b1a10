//! Golden-angle (Fibonacci) sphere.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::error::{non_negative, ConfigError};
use crate::spawn::SpawnContext;

/// Parameters for [`Shape::FibonacciSphere`](crate::Shape::FibonacciSphere).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FibonacciConfig {
    pub radius: f32,
    /// Per-axis uniform jitter added after scaling. `0` keeps points on the sphere.
    pub jitter: f32,
}

impl Default for FibonacciConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            jitter: 0.0,
        }
    }
}

impl FibonacciConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("radius", self.radius)?;
        non_negative("jitter", self.jitter)?;
        Ok(())
    }

    /// Low-discrepancy placement: `y` steps evenly from pole to pole while
    /// the azimuth advances by the golden angle `π(3 − √5)` per index.
    pub fn generate<R: Rng + ?Sized>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        if ctx.count == 0 {
            return Vec3::ZERO;
        }
        let increment = PI * (3.0 - 5.0f32.sqrt());
        let offset = 2.0 / ctx.count as f32;
        let y = ctx.index as f32 * offset - 1.0 + offset / 2.0;
        let r = (1.0 - y * y).max(0.0).sqrt();
        let phi = (ctx.index % ctx.count) as f32 * increment;

        let mut p = Vec3::new(phi.cos() * r, y, phi.sin() * r) * self.radius;

        if self.jitter > 0.0 {
            p.x += ctx.signed() * self.jitter;
            p.y += ctx.signed() * self.jitter;
            p.z += ctx.signed() * self.jitter;
        }

        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_count_yields_origin() {
        let mut rng = SmallRng::seed_from_u64(0);
        let p = FibonacciConfig::default().generate(&mut SpawnContext::new(0, 0, &mut rng));
        assert_eq!(p, Vec3::ZERO);
    }

    #[test]
    fn test_unjittered_points_lie_on_sphere() {
        let config = FibonacciConfig {
            radius: 400.0,
            jitter: 0.0,
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let count = 1000;
        for i in 0..count {
            let p = config.generate(&mut SpawnContext::new(i, count, &mut rng));
            let rel = (p.length_squared() - 400.0 * 400.0).abs() / (400.0 * 400.0);
            assert!(rel < 1e-4, "index {} off sphere: {:?}", i, p);
        }
    }

    #[test]
    fn test_unjittered_is_deterministic() {
        let config = FibonacciConfig {
            radius: 10.0,
            jitter: 0.0,
        };
        let mut a = SmallRng::seed_from_u64(1);
        let mut b = SmallRng::seed_from_u64(2);
        for i in 0..50 {
            let pa = config.generate(&mut SpawnContext::new(i, 50, &mut a));
            let pb = config.generate(&mut SpawnContext::new(i, 50, &mut b));
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_y_spans_poles_evenly() {
        let config = FibonacciConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let first = config.generate(&mut SpawnContext::new(0, 4, &mut rng));
        let last = config.generate(&mut SpawnContext::new(3, 4, &mut rng));
        assert!((first.y - (-0.75)).abs() < 1e-6);
        assert!((last.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_jitter_is_bounded() {
        let config = FibonacciConfig {
            radius: 100.0,
            jitter: 5.0,
        };
        let mut rng = SmallRng::seed_from_u64(4);
        for i in 0..500 {
            let p = config.generate(&mut SpawnContext::new(i, 500, &mut rng));
            let d = p.length();
            assert!(d <= 100.0 + 5.0 * 3.0f32.sqrt() + 1e-3);
        }
    }
}
