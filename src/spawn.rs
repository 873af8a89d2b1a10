//! Spawn context handed to shape generators.
//!
//! Bundles the particle index, total count and the injected random source,
//! with the handful of sampling helpers every generator reaches for.

use rand::Rng;
use std::f32::consts::TAU;

/// Context provided to a shape generator for one particle.
///
/// The random source is borrowed from the caller, so a seeded generator
/// makes a whole regeneration reproducible:
///
/// ```ignore
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut ctx = SpawnContext::new(0, 100, &mut rng);
/// let angle = ctx.angle();
/// ```
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    /// Index of the particle being generated (0 to count-1).
    pub index: u32,
    /// Total number of particles being generated.
    pub count: u32,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SpawnContext<'a, R> {
    /// Create a context for particle `index` of `count`.
    pub fn new(index: u32, count: u32, rng: &'a mut R) -> Self {
        Self { index, count, rng }
    }

    /// Normalized progress through the spawn, `index / count`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count as f32
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[-1, 1)`.
    #[inline]
    pub fn signed(&mut self) -> f32 {
        self.random() * 2.0 - 1.0
    }

    /// Random f32 in `[-0.5, 0.5)`.
    #[inline]
    pub fn centered(&mut self) -> f32 {
        self.random() - 0.5
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.random() * TAU
    }

    /// Power-law radius `U^falloff * radius`.
    ///
    /// `falloff > 1` pulls samples toward the center, `falloff < 1` pushes
    /// them outward.
    #[inline]
    pub fn falloff_radius(&mut self, falloff: f32, radius: f32) -> f32 {
        self.random().powf(falloff) * radius
    }
}
