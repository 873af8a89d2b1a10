//! Per-instance screen-space transform.
//!
//! This is the CPU reference for what the billboard vertex shader does each
//! frame: spin the field about the vertical axis, scale each billboard by
//! depth and a twinkle oscillation, and project onto the viewport.
//!
//! Every function here is pure; identical inputs give bit-identical output.

use glam::{Vec2, Vec3};

use crate::error::DegenerateViewportError;
use crate::store::Particle;

/// Spin rate of the whole field about the vertical axis, in radians per second.
pub const ANGULAR_SPEED: f32 = 0.6;
/// Lower bound of the depth factor.
pub const DEPTH_MIN: f32 = 0.4;
/// Upper bound of the depth factor.
pub const DEPTH_MAX: f32 = 1.6;
/// Twinkle angular frequency (period `2π / 3` seconds).
pub const TWINKLE_FREQUENCY: f32 = 3.0;
/// Twinkle phase offset between consecutive instances.
pub const TWINKLE_PHASE_STEP: f32 = 0.12;

/// Billboard corners, two triangles, in quad space.
pub const QUAD_CORNERS: [Vec2; 6] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
];

/// Viewport size. Projection works in physical (backing-store) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical width in pixels.
    pub width: f32,
    /// Logical height in pixels.
    pub height: f32,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Backing-store size in physical pixels.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * self.device_pixel_ratio
    }

    /// World radius that fits the field into the smaller physical dimension.
    /// Recomputed by the host on every resize.
    pub fn world_radius(&self) -> f32 {
        self.resolution().min_element() * 0.5
    }

    /// Fail if the viewport has no physical area.
    pub fn validate(&self) -> Result<(), DegenerateViewportError> {
        let res = self.resolution();
        if res.is_finite() && res.x > 0.0 && res.y > 0.0 {
            Ok(())
        } else {
            Err(self.degenerate(self.world_radius()))
        }
    }

    /// Fail if the viewport has no area or `world_radius` is not a positive
    /// finite number. Either one means the frame is skipped.
    pub fn check_projection(&self, world_radius: f32) -> Result<(), DegenerateViewportError> {
        self.validate()?;
        if world_radius > 0.0 && world_radius.is_finite() {
            Ok(())
        } else {
            Err(self.degenerate(world_radius))
        }
    }

    fn degenerate(&self, world_radius: f32) -> DegenerateViewportError {
        DegenerateViewportError {
            width: self.width,
            height: self.height,
            world_radius,
        }
    }

    /// Uniform pixels-per-world-unit scale using the smaller dimension.
    pub fn projection_scale(&self, world_radius: f32) -> f32 {
        self.resolution().min_element() / (2.0 * world_radius)
    }

    /// Map a physical pixel position to normalized device coordinates.
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        (pixel / self.resolution()) * 2.0 - Vec2::ONE
    }
}

/// Screen-space placement of one billboard for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    /// Billboard center in physical pixels.
    pub screen_center: Vec2,
    /// Billboard half-extent in pixels.
    pub visual_size: Vec2,
    pub depth_factor: f32,
    pub twinkle_factor: f32,
}

impl InstanceTransform {
    /// Pixel position of quad corner `vertex` (0..6).
    pub fn corner(&self, vertex: usize) -> Vec2 {
        self.screen_center + QUAD_CORNERS[vertex % QUAD_CORNERS.len()] * self.visual_size
    }

    /// All six corners in pixels.
    pub fn corners(&self) -> [Vec2; 6] {
        std::array::from_fn(|v| self.corner(v))
    }
}

/// Rotate about the vertical axis by `angle` radians.
///
/// Sign convention: `x' = c·x + s·z`, `z' = −s·x + c·z`.
pub fn spin(position: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(
        c * position.x + s * position.z,
        position.y,
        -s * position.x + c * position.z,
    )
}

/// Size multiplier from rotated depth, clamped to `[0.4, 1.6]`.
///
/// Particles behind the center (positive `z`) shrink, those in front grow.
pub fn depth_factor(z_rotated: f32, world_radius: f32) -> f32 {
    let depth = z_rotated / world_radius;
    if depth.is_nan() {
        // 0 / 0: the particle sits on the rotation center.
        return 1.0;
    }
    (1.0 - 0.5 * depth).clamp(DEPTH_MIN, DEPTH_MAX)
}

/// Phase-shifted size oscillation in `[0.6, 1.0]`.
pub fn twinkle_factor(time: f32, instance_index: u32) -> f32 {
    let phase = instance_index as f32 * TWINKLE_PHASE_STEP;
    0.6 + 0.4 * (0.5 + 0.5 * (time * TWINKLE_FREQUENCY + phase).sin())
}

/// Place `particle` on screen at `time` seconds.
///
/// Fails with [`DegenerateViewportError`] when the viewport has no area or
/// `world_radius` is not positive; the frame should be skipped.
pub fn transform(
    particle: &Particle,
    time: f32,
    viewport: &Viewport,
    world_radius: f32,
    instance_index: u32,
) -> Result<InstanceTransform, DegenerateViewportError> {
    viewport.check_projection(world_radius)?;

    let rotated = spin(particle.position, time * ANGULAR_SPEED);

    let depth = depth_factor(rotated.z, world_radius);
    let twinkle = twinkle_factor(time, instance_index);

    let scale = viewport.projection_scale(world_radius);
    let center = viewport.resolution() * 0.5;

    Ok(InstanceTransform {
        screen_center: Vec2::new(rotated.x, rotated.y) * scale + center,
        visual_size: particle.size * depth * twinkle,
        depth_factor: depth,
        twinkle_factor: twinkle,
    })
}

/// Transform every particle for one frame, indexing instances by position
/// in the slice.
pub fn transform_all(
    particles: &[Particle],
    time: f32,
    viewport: &Viewport,
    world_radius: f32,
) -> Result<Vec<InstanceTransform>, DegenerateViewportError> {
    particles
        .iter()
        .enumerate()
        .map(|(i, p)| transform(p, time, viewport, world_radius, i as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn particle_at(position: Vec3) -> Particle {
        Particle {
            position,
            size: Vec2::new(2.0, 2.0),
            color: Vec4::ONE,
        }
    }

    #[test]
    fn test_depth_factor_clamped() {
        for z in [-1e9, -1000.0, -10.0, 0.0, 10.0, 1000.0, 1e9, f32::INFINITY, f32::NEG_INFINITY] {
            for r in [0.0, 1e-3, 1.0, 400.0] {
                let d = depth_factor(z, r);
                assert!((DEPTH_MIN..=DEPTH_MAX).contains(&d), "z={} r={} -> {}", z, r, d);
            }
        }
    }

    #[test]
    fn test_depth_factor_center_is_one() {
        assert_eq!(depth_factor(0.0, 400.0), 1.0);
        assert_eq!(depth_factor(-400.0, 400.0), 1.5);
        assert_eq!(depth_factor(400.0, 400.0), 0.5);
    }

    #[test]
    fn test_twinkle_range() {
        for i in 0..500u32 {
            let t = i as f32 * 0.37 - 40.0;
            let f = twinkle_factor(t, i * 7);
            assert!((0.6..=1.0).contains(&f), "t={} -> {}", t, f);
        }
    }

    #[test]
    fn test_spin_zero_is_identity() {
        let p = Vec3::new(3.0, -4.0, 5.0);
        assert_eq!(spin(p, 0.0), p);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let viewport = Viewport::new(800.0, 600.0);
        let t = transform(&particle_at(Vec3::ZERO), 1.5, &viewport, 300.0, 0).unwrap();
        assert_eq!(t.screen_center, Vec2::new(400.0, 300.0));
        assert_eq!(t.depth_factor, 1.0);
    }

    #[test]
    fn test_projection_uses_smaller_dimension() {
        let viewport = Viewport::new(800.0, 600.0);
        let radius = viewport.world_radius();
        assert_eq!(radius, 300.0);
        // At t = 0 no spin: a point at world_radius on X lands on the short-side edge.
        let t = transform(&particle_at(Vec3::new(300.0, 0.0, 0.0)), 0.0, &viewport, radius, 0).unwrap();
        assert!((t.screen_center.x - 700.0).abs() < 1e-3);
        assert!((t.screen_center.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_visual_size_combines_factors() {
        let viewport = Viewport::new(100.0, 100.0);
        let t = transform(&particle_at(Vec3::new(0.0, 0.0, -50.0)), 0.0, &viewport, 50.0, 0).unwrap();
        assert_eq!(t.depth_factor, 1.5);
        let expected = Vec2::new(2.0, 2.0) * 1.5 * t.twinkle_factor;
        assert_eq!(t.visual_size, expected);
    }

    #[test]
    fn test_degenerate_viewport() {
        let p = particle_at(Vec3::ONE);
        for (w, h) in [(0.0, 100.0), (100.0, 0.0), (-5.0, 10.0), (f32::NAN, 10.0)] {
            assert!(transform(&p, 0.0, &Viewport::new(w, h), 10.0, 0).is_err());
        }
        assert!(transform(&p, 0.0, &Viewport::new(100.0, 100.0), 0.0, 0).is_err());
    }

    #[test]
    fn test_transform_is_reproducible() {
        let viewport = Viewport::new(1280.0, 720.0);
        let p = particle_at(Vec3::new(120.0, -40.0, 77.0));
        let a = transform(&p, 12.345, &viewport, 360.0, 42).unwrap();
        let b = transform(&p, 12.345, &viewport, 360.0, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_corners_and_ndc() {
        let viewport = Viewport::new(200.0, 100.0);
        let t = transform(&particle_at(Vec3::ZERO), 0.0, &viewport, 50.0, 0).unwrap();
        let corners = t.corners();
        assert_eq!(corners[0], t.screen_center - t.visual_size);
        assert_eq!(corners[5], t.screen_center + t.visual_size);
        assert_eq!(viewport.to_ndc(t.screen_center), Vec2::ZERO);
        assert_eq!(viewport.to_ndc(Vec2::ZERO), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_pixel_ratio_scales_projection() {
        let viewport = Viewport::new(640.0, 360.0).with_device_pixel_ratio(2.0);
        assert_eq!(viewport.resolution(), Vec2::new(1280.0, 720.0));
        assert_eq!(viewport.world_radius(), 360.0);

        let t = transform(&particle_at(Vec3::ZERO), 0.0, &viewport, 360.0, 0).unwrap();
        assert_eq!(t.screen_center, Vec2::new(640.0, 360.0));
        assert!(Viewport::new(640.0, 360.0).with_device_pixel_ratio(0.0).validate().is_err());
    }

    #[test]
    fn test_check_projection_rejects_radius() {
        let viewport = Viewport::new(100.0, 100.0);
        assert!(viewport.check_projection(50.0).is_ok());
        for r in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(viewport.check_projection(r).is_err(), "radius {}", r);
        }
    }
}
