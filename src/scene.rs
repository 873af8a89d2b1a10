//! Scene: the regeneration protocol tying config, store and projection together.
//!
//! A configuration change calls [`Scene::apply`], which regenerates the
//! store and updates the projection radius. The renderer then polls
//! [`Scene::take_upload`] for a fresh packed buffer and builds
//! [`FrameUniforms`] every frame.

use log::{debug, info};

use crate::config::SceneConfig;
use crate::error::{ConfigError, DegenerateViewportError, NebulaError};
use crate::pack::pack;
use crate::shader::FrameUniforms;
use crate::store::ParticleStore;
use crate::transform::Viewport;

/// A particle field together with the config that produced it and the
/// current projection radius.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    store: ParticleStore,
    viewport: Viewport,
    world_radius: f32,
}

impl Scene {
    /// Build a scene and run the first regeneration.
    ///
    /// Fails on a viewport without area or an invalid config.
    pub fn new(config: SceneConfig, viewport: Viewport) -> Result<Self, NebulaError> {
        viewport.validate()?;
        let mut scene = Self {
            store: ParticleStore::new(config.size_range()),
            config: config.clone(),
            world_radius: viewport.world_radius(),
            viewport,
        };
        scene.apply(config)?;
        Ok(scene)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Radius used for projection and depth.
    pub fn world_radius(&self) -> f32 {
        self.world_radius
    }

    /// Replace the config snapshot and regenerate.
    ///
    /// On error the scene keeps its previous config, particles and radius.
    pub fn apply(&mut self, config: SceneConfig) -> Result<(), ConfigError> {
        let mut rng = config.rng();
        let previous_range = self.store.size_range();
        self.store.set_size_range(config.size_range());

        if let Err(e) = self
            .store
            .regenerate(config.particle_count, &config.shape, &mut rng)
        {
            self.store.set_size_range(previous_range);
            return Err(e);
        }

        if let Some(radius) = config.shape.radius() {
            self.world_radius = radius;
        }
        info!(
            "Scene `{}`: {} x {} (world radius {})",
            config.name,
            config.particle_count,
            config.shape.kind(),
            self.world_radius
        );
        self.config = config;
        Ok(())
    }

    /// Regenerate with the current config (fresh randomness unless seeded).
    pub fn regenerate(&mut self) -> Result<(), ConfigError> {
        self.apply(self.config.clone())
    }

    /// Host resize. Resets the world radius to fit the new viewport.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), DegenerateViewportError> {
        viewport.validate()?;
        self.viewport = viewport;
        self.world_radius = viewport.world_radius();
        debug!(
            "Resized to {}x{}, world radius {}",
            viewport.width, viewport.height, self.world_radius
        );
        Ok(())
    }

    /// Packed instance buffer, if the particles changed since the last call.
    pub fn take_upload(&mut self) -> Option<Vec<f32>> {
        if self.store.acknowledge_update() {
            Some(pack(self.store.particles()))
        } else {
            None
        }
    }

    /// Uniforms for a frame at `time` seconds.
    ///
    /// Fails when the projection radius is not positive (a shape with zero
    /// radius); the frame should be skipped.
    pub fn frame_uniforms(&self, time: f32) -> Result<FrameUniforms, DegenerateViewportError> {
        self.viewport.check_projection(self.world_radius)?;
        Ok(FrameUniforms::new(&self.viewport, self.world_radius, time))
    }
}
