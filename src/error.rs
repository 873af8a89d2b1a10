//! Error types for nebula.
//!
//! This module provides error types for invalid shape configuration,
//! unknown shape names and degenerate viewports.

use std::fmt;

/// A shape or store parameter was rejected during validation.
///
/// Regeneration validates before it touches the particle store, so a
/// `ConfigError` always leaves the previously published particles in place.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A radius-like parameter (radius, major, minor, size bound) was negative.
    Negative { field: &'static str, value: f32 },
    /// A parameter was NaN or infinite.
    NonFinite { field: &'static str, value: f32 },
    /// A count-like parameter must be at least one.
    Zero { field: &'static str },
}

impl ConfigError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::Negative { field, .. } => field,
            ConfigError::NonFinite { field, .. } => field,
            ConfigError::Zero { field } => field,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Negative { field, value } => {
                write!(f, "Invalid configuration: `{}` must be non-negative (got {})", field, value)
            }
            ConfigError::NonFinite { field, value } => {
                write!(f, "Invalid configuration: `{}` must be finite (got {})", field, value)
            }
            ConfigError::Zero { field } => {
                write!(f, "Invalid configuration: `{}` must be at least 1", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A shape name did not match any of the known generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedShapeError {
    pub name: String,
}

impl fmt::Display for UnsupportedShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported shape `{}`. Expected one of NebulaShape, FibonacciSphere, Torus, SpiralGalaxy, SphericalShell, DiscPlume.",
            self.name
        )
    }
}

impl std::error::Error for UnsupportedShapeError {}

/// The viewport cannot be projected onto; the frame should be skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegenerateViewportError {
    pub width: f32,
    pub height: f32,
    pub world_radius: f32,
}

impl fmt::Display for DegenerateViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Degenerate viewport {}x{} (world radius {}): dimensions and radius must be positive",
            self.width, self.height, self.world_radius
        )
    }
}

impl std::error::Error for DegenerateViewportError {}

/// Errors surfaced by the nebula library and its configuration loading.
#[derive(Debug)]
pub enum NebulaError {
    /// Shape or store configuration was invalid.
    Config(ConfigError),
    /// Shape name was not recognised.
    UnsupportedShape(UnsupportedShapeError),
    /// Viewport cannot be projected onto.
    DegenerateViewport(DegenerateViewportError),
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// Failed to parse or serialize JSON.
    Json(serde_json::Error),
}

impl fmt::Display for NebulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NebulaError::Config(e) => write!(f, "{}", e),
            NebulaError::UnsupportedShape(e) => write!(f, "{}", e),
            NebulaError::DegenerateViewport(e) => write!(f, "{}", e),
            NebulaError::Io(e) => write!(f, "Failed to access config file: {}", e),
            NebulaError::Json(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for NebulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NebulaError::Config(e) => Some(e),
            NebulaError::UnsupportedShape(e) => Some(e),
            NebulaError::DegenerateViewport(e) => Some(e),
            NebulaError::Io(e) => Some(e),
            NebulaError::Json(e) => Some(e),
        }
    }
}

impl From<ConfigError> for NebulaError {
    fn from(e: ConfigError) -> Self {
        NebulaError::Config(e)
    }
}

impl From<UnsupportedShapeError> for NebulaError {
    fn from(e: UnsupportedShapeError) -> Self {
        NebulaError::UnsupportedShape(e)
    }
}

impl From<DegenerateViewportError> for NebulaError {
    fn from(e: DegenerateViewportError) -> Self {
        NebulaError::DegenerateViewport(e)
    }
}

impl From<std::io::Error> for NebulaError {
    fn from(e: std::io::Error) -> Self {
        NebulaError::Io(e)
    }
}

impl From<serde_json::Error> for NebulaError {
    fn from(e: serde_json::Error) -> Self {
        NebulaError::Json(e)
    }
}

/// Reject a negative or non-finite value for a radius-like field.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

/// Reject a NaN or infinite value.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    Ok(())
}
