//! Parametric shape generators.
//!
//! Each shape turns `(config, index, count)` plus a random source into one
//! particle position. Some shapes are keyed by index (Fibonacci sphere,
//! torus, spiral galaxy), the rest are purely stochastic.
//!
//! | Shape | Deterministic term | Stochastic term |
//! |-------|--------------------|-----------------|
//! | [`Shape::Nebula`] | - | radius, angle, turbulence, depth |
//! | [`Shape::FibonacciSphere`] | full position | jitter |
//! | [`Shape::Torus`] | angle around the ring | angle around the tube, jitter |
//! | [`Shape::SpiralGalaxy`] | radius, arm, winding | noise, fuzz, height |
//! | [`Shape::SphericalShell`] | - | direction, thinning, jitter |
//! | [`Shape::DiscPlume`] | - | radius, angle, height, jitter |

mod disc;
mod fibonacci;
mod galaxy;
mod nebula;
mod shell;
mod torus;

pub use disc::{DiscConfig, DISC_HALF_THICKNESS};
pub use fibonacci::FibonacciConfig;
pub use galaxy::GalaxyConfig;
pub use nebula::NebulaConfig;
pub use shell::ShellConfig;
pub use torus::TorusConfig;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, UnsupportedShapeError};
use crate::spawn::SpawnContext;

/// A shape selection together with its parameters.
///
/// Serializes tagged by `kind`, using the same names as [`ShapeKind`]:
///
/// ```json
/// { "kind": "Torus", "major": 250.0, "minor": 80.0 }
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum Shape {
    #[serde(rename = "NebulaShape")]
    Nebula(NebulaConfig),
    FibonacciSphere(FibonacciConfig),
    Torus(TorusConfig),
    SpiralGalaxy(GalaxyConfig),
    SphericalShell(ShellConfig),
    DiscPlume(DiscConfig),
}

impl Default for Shape {
    fn default() -> Self {
        Shape::preset(ShapeKind::FibonacciSphere)
    }
}

impl Shape {
    /// The shape with its generator defaults.
    pub fn with_defaults(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Nebula => Shape::Nebula(NebulaConfig::default()),
            ShapeKind::FibonacciSphere => Shape::FibonacciSphere(FibonacciConfig::default()),
            ShapeKind::Torus => Shape::Torus(TorusConfig::default()),
            ShapeKind::SpiralGalaxy => Shape::SpiralGalaxy(GalaxyConfig::default()),
            ShapeKind::SphericalShell => Shape::SphericalShell(ShellConfig::default()),
            ShapeKind::DiscPlume => Shape::DiscPlume(DiscConfig::default()),
        }
    }

    /// The shape as tuned for display: larger sphere with jitter, deeper
    /// nebula, and tilted galaxy and disc.
    pub fn preset(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Nebula => Shape::Nebula(NebulaConfig {
                z_spread: 1.0,
                ..Default::default()
            }),
            ShapeKind::FibonacciSphere => Shape::FibonacciSphere(FibonacciConfig {
                radius: 400.0,
                jitter: 50.0,
            }),
            ShapeKind::SpiralGalaxy => Shape::SpiralGalaxy(GalaxyConfig {
                inclination_deg: -20.0,
                ..Default::default()
            }),
            ShapeKind::DiscPlume => Shape::DiscPlume(DiscConfig {
                inclination_deg: -20.0,
                ..Default::default()
            }),
            ShapeKind::Torus | ShapeKind::SphericalShell => Shape::with_defaults(kind),
        }
    }

    /// Which generator this shape uses.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Nebula(_) => ShapeKind::Nebula,
            Shape::FibonacciSphere(_) => ShapeKind::FibonacciSphere,
            Shape::Torus(_) => ShapeKind::Torus,
            Shape::SpiralGalaxy(_) => ShapeKind::SpiralGalaxy,
            Shape::SphericalShell(_) => ShapeKind::SphericalShell,
            Shape::DiscPlume(_) => ShapeKind::DiscPlume,
        }
    }

    /// The shape's `radius` parameter, if it has one.
    ///
    /// Used as the projection radius after regeneration so the field fills
    /// the viewport. The torus has no single radius and returns `None`.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Shape::Nebula(c) => Some(c.radius),
            Shape::FibonacciSphere(c) => Some(c.radius),
            Shape::Torus(_) => None,
            Shape::SpiralGalaxy(c) => Some(c.radius),
            Shape::SphericalShell(c) => Some(c.radius),
            Shape::DiscPlume(c) => Some(c.radius),
        }
    }

    /// Check every parameter, naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Shape::Nebula(c) => c.validate(),
            Shape::FibonacciSphere(c) => c.validate(),
            Shape::Torus(c) => c.validate(),
            Shape::SpiralGalaxy(c) => c.validate(),
            Shape::SphericalShell(c) => c.validate(),
            Shape::DiscPlume(c) => c.validate(),
        }
    }

    /// Generate the position of particle `index` of `count`.
    ///
    /// `index` must be below `count`; an empty field (`count == 0`) yields
    /// the origin without drawing. The config is assumed valid; call
    /// [`Shape::validate`] first (the particle store does).
    pub fn generate<R: Rng + ?Sized>(&self, index: u32, count: u32, rng: &mut R) -> Vec3 {
        if count == 0 {
            return Vec3::ZERO;
        }
        debug_assert!(index < count, "index {} out of range for count {}", index, count);
        let mut ctx = SpawnContext::new(index, count, rng);
        match self {
            Shape::Nebula(c) => c.generate(&mut ctx),
            Shape::FibonacciSphere(c) => c.generate(&mut ctx),
            Shape::Torus(c) => c.generate(&mut ctx),
            Shape::SpiralGalaxy(c) => c.generate(&mut ctx),
            Shape::SphericalShell(c) => c.generate(&mut ctx),
            Shape::DiscPlume(c) => c.generate(&mut ctx),
        }
    }

    /// Generate all `count` positions in index order.
    pub fn points<R: Rng + ?Sized>(&self, count: u32, rng: &mut R) -> Vec<Vec3> {
        (0..count).map(|i| self.generate(i, count, rng)).collect()
    }
}

/// The six generator kinds, without parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "NebulaShape")]
    Nebula,
    FibonacciSphere,
    Torus,
    SpiralGalaxy,
    SphericalShell,
    DiscPlume,
}

impl ShapeKind {
    /// All kinds, in menu order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::FibonacciSphere,
        ShapeKind::Nebula,
        ShapeKind::Torus,
        ShapeKind::SpiralGalaxy,
        ShapeKind::SphericalShell,
        ShapeKind::DiscPlume,
    ];

    /// Suggested substitute for an unrecognised shape name. Never applied
    /// implicitly; see [`ShapeKind::parse_or_fallback`].
    pub const FALLBACK: ShapeKind = ShapeKind::Nebula;

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Nebula => "NebulaShape",
            ShapeKind::FibonacciSphere => "FibonacciSphere",
            ShapeKind::Torus => "Torus",
            ShapeKind::SpiralGalaxy => "SpiralGalaxy",
            ShapeKind::SphericalShell => "SphericalShell",
            ShapeKind::DiscPlume => "DiscPlume",
        }
    }

    /// Parse `name`, substituting [`ShapeKind::FALLBACK`] when it is unknown.
    ///
    /// The rejected name is returned alongside so the caller can still
    /// report it.
    pub fn parse_or_fallback(name: &str) -> (ShapeKind, Option<UnsupportedShapeError>) {
        match name.parse() {
            Ok(kind) => (kind, None),
            Err(e) => (Self::FALLBACK, Some(e)),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = UnsupportedShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnsupportedShapeError { name: s.to_string() })
    }
}
