//! # nebula - procedural particle fields
//!
//! Generates 3D point clouds from parametric shape models, packs them into
//! a fixed 9-float-per-instance attribute buffer, and defines the per-frame
//! billboard transform a renderer applies to every instance.
//!
//! ## Quick Start
//!
//! ```ignore
//! use nebula::prelude::*;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut store = ParticleStore::new(SizeRange::new(1.0, 3.0));
//! let mut rng = SmallRng::seed_from_u64(7);
//! store.regenerate(10_000, &Shape::preset(ShapeKind::SpiralGalaxy), &mut rng)?;
//!
//! let buffer = pack(store.particles());        // upload once per change
//! let viewport = Viewport::new(1280.0, 720.0);
//! let frame = transform(&store.particles()[0], 1.25, &viewport, 400.0, 0)?;
//! ```
//!
//! ## Shapes
//!
//! | Shape | Parameters |
//! |-------|------------|
//! | [`Shape::Nebula`] | radius, oval, falloff, turbulence, depth spread |
//! | [`Shape::FibonacciSphere`] | radius, jitter |
//! | [`Shape::Torus`] | major, minor, radial/tubular jitter |
//! | [`Shape::SpiralGalaxy`] | radius, arms, spin, spread, fuzz, tilt |
//! | [`Shape::SphericalShell`] | radius, thickness, jitter |
//! | [`Shape::DiscPlume`] | radius, falloff, spiral, jitter, tilt |
//!
//! ## Randomness
//!
//! Every generator draws from a caller-supplied [`rand::Rng`]. Seed it for
//! reproducible fields; the index-keyed parts of a shape (Fibonacci
//! placement, torus ring angle, galaxy arm and radius) are reproducible
//! regardless.

pub mod config;
pub mod error;
pub mod pack;
pub mod rotation;
pub mod scene;
pub mod shader;
pub mod shapes;
mod spawn;
pub mod store;
pub mod time;
pub mod transform;

pub use config::SceneConfig;
pub use error::{ConfigError, DegenerateViewportError, NebulaError, UnsupportedShapeError};
pub use glam::{Vec2, Vec3, Vec4};
pub use pack::{pack, pack_instances, InstanceAttributes, FLOATS_PER_INSTANCE};
pub use rotation::rotate_yaw_pitch;
pub use scene::Scene;
pub use shader::{billboard_shader, FrameUniforms};
pub use shapes::{
    DiscConfig, FibonacciConfig, GalaxyConfig, NebulaConfig, Shape, ShapeKind, ShellConfig,
    TorusConfig,
};
pub use spawn::SpawnContext;
pub use store::{Particle, ParticleStore, SizeRange};
pub use transform::{transform, InstanceTransform, Viewport};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use nebula::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SceneConfig;
    pub use crate::error::{ConfigError, DegenerateViewportError, NebulaError};
    pub use crate::pack::{pack, InstanceAttributes};
    pub use crate::rotation::rotate_yaw_pitch;
    pub use crate::scene::Scene;
    pub use crate::shader::FrameUniforms;
    pub use crate::shapes::{Shape, ShapeKind};
    pub use crate::store::{Particle, ParticleStore, SizeRange};
    pub use crate::time::FrameClock;
    pub use crate::transform::{transform, InstanceTransform, Viewport};
    pub use crate::{Vec2, Vec3, Vec4};
}
