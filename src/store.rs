//! Particle records and the store that regenerates them.
//!
//! The store owns the current particle sequence and a `needs_update` flag.
//! A regeneration validates the shape, builds a complete new sequence and
//! publishes it with a single swap, so readers only ever see a finished
//! field.
//!
//! # Example
//!
//! ```ignore
//! use nebula::prelude::*;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut store = ParticleStore::new(SizeRange::new(1.0, 3.0));
//! let mut rng = SmallRng::seed_from_u64(7);
//! store.regenerate(10_000, &Shape::preset(ShapeKind::Torus), &mut rng)?;
//!
//! if store.acknowledge_update() {
//!     upload(&pack(store.particles()));
//! }
//! ```

use glam::{Vec2, Vec3, Vec4};
use log::{debug, trace, warn};
use rand::Rng;
use std::sync::Arc;

use crate::error::{non_negative, ConfigError};
use crate::shapes::Shape;

/// One point-sample of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Billboard width and height in pixels.
    pub size: Vec2,
    /// RGBA, each channel in `[0, 1]`.
    pub color: Vec4,
}

/// Inclusive range particle sizes are drawn from.
///
/// A reversed range (`min > max`) is swapped rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 20.0, max: 100.0 }
    }
}

impl SizeRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The range with bounds in ascending order.
    pub fn normalized(&self) -> Self {
        if self.min > self.max {
            Self { min: self.max, max: self.min }
        } else {
            *self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("sizeMin", self.min)?;
        non_negative("sizeMax", self.max)?;
        Ok(())
    }

    /// `min + U * (max - min)` on a normalized range.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }
}

/// Owns the current particle sequence.
#[derive(Debug)]
pub struct ParticleStore {
    particles: Arc<[Particle]>,
    size_range: SizeRange,
    needs_update: bool,
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new(SizeRange::default())
    }
}

impl ParticleStore {
    /// Create an empty store drawing particle sizes from `size_range`.
    pub fn new(size_range: SizeRange) -> Self {
        Self {
            particles: Arc::from(Vec::new()),
            size_range,
            needs_update: true,
        }
    }

    pub fn size_range(&self) -> SizeRange {
        self.size_range
    }

    /// Change the size range used by the next regeneration.
    pub fn set_size_range(&mut self, size_range: SizeRange) {
        self.size_range = size_range;
    }

    /// Discard the current field and generate `count` particles of `shape`.
    ///
    /// Validation happens before anything is touched: on error the previous
    /// particles and flag are left exactly as they were.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        count: u32,
        shape: &Shape,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        shape.validate()?;
        self.size_range.validate()?;

        if self.size_range.min > self.size_range.max {
            warn!(
                "Size range is reversed ({} > {}); swapping bounds",
                self.size_range.min, self.size_range.max
            );
        }
        let sizes = self.size_range.normalized();

        let mut particles = Vec::with_capacity(count as usize);
        for index in 0..count {
            let position = shape.generate(index, count, rng);

            let w = sizes.sample(rng);
            let h = sizes.sample(rng);

            let r = rng.gen::<f32>();
            let g = rng.gen::<f32>();
            let b = rng.gen::<f32>();

            particles.push(Particle {
                position,
                size: Vec2::new(w, h),
                color: Vec4::new(r, g, b, 1.0),
            });
        }

        debug!("Regenerated {} particles of {}", count, shape.kind());

        // Publish in one step.
        self.particles = Arc::from(particles);
        self.needs_update = true;
        Ok(())
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        trace!("Clearing {} particles", self.particles.len());
        self.particles = Arc::from(Vec::new());
        self.needs_update = true;
    }

    /// The current particles in generation order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// A shared handle to the current particles.
    ///
    /// The snapshot stays valid (and unchanged) across later regenerations.
    pub fn snapshot(&self) -> Arc<[Particle]> {
        Arc::clone(&self.particles)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Whether the particles changed since the last acknowledgement.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Consume the update flag. Returns `true` if the consumer should
    /// re-pack and re-upload.
    pub fn acknowledge_update(&mut self) -> bool {
        std::mem::replace(&mut self.needs_update, false)
    }
}
