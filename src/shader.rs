//! Billboard render shader and its frame uniforms.
//!
//! The vertex stage is the GPU rendition of [`crate::transform`] and is
//! generated from the same constants.

use bytemuck::{Pod, Zeroable};

use crate::transform::{
    Viewport, ANGULAR_SPEED, DEPTH_MAX, DEPTH_MIN, TWINKLE_FREQUENCY, TWINKLE_PHASE_STEP,
};

/// Per-frame uniforms read by the billboard shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Viewport width and height in physical pixels.
    pub resolution: [f32; 2],
    /// World radius used for projection and depth.
    pub radius: f32,
    /// Seconds.
    pub time: f32,
}

impl FrameUniforms {
    pub fn new(viewport: &Viewport, radius: f32, time: f32) -> Self {
        Self {
            resolution: viewport.resolution().to_array(),
            radius,
            time,
        }
    }
}

/// Generate the billboard WGSL (entry points `vs_main` and `fs_main`).
///
/// Expects the packed instance buffer at locations 0..=2 and
/// [`FrameUniforms`] at group 0, binding 0.
pub fn billboard_shader() -> String {
    format!(
        r#"struct Attributes {{
    @location(0) position: vec3<f32>,
    @location(1) size: vec2<f32>,
    @location(2) color: vec4<f32>,
}};

struct Varyings {{
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) depth_factor: f32,
}};

struct Uniforms {{
    resolution: vec2<f32>,
    radius: f32,
    time: f32,
}};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(
    a: Attributes,
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> Varyings {{
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let angle = uniforms.time * {angular_speed:?};
    let c = cos(angle);
    let s = sin(angle);
    let rotated = vec3<f32>(
        c * a.position.x + s * a.position.z,
        a.position.y,
        -s * a.position.x + c * a.position.z,
    );

    let depth = clamp(1.0 - 0.5 * (rotated.z / uniforms.radius), {depth_min:?}, {depth_max:?});
    let phase = f32(instance_index) * {phase_step:?};
    let twinkle = 0.6 + 0.4 * (0.5 + 0.5 * sin(uniforms.time * {frequency:?} + phase));
    let size = a.size * depth * twinkle;

    let scale = min(uniforms.resolution.x, uniforms.resolution.y) / (2.0 * uniforms.radius);
    let center = uniforms.resolution * 0.5;
    let pixel = rotated.xy * scale + center + quad[vertex_index] * size;

    let ndc = (pixel / uniforms.resolution) * 2.0 - vec2<f32>(1.0, 1.0);

    var result: Varyings;
    result.position = vec4<f32>(ndc, 0.0, 1.0);
    result.color = a.color;
    result.depth_factor = depth;
    return result;
}}

@fragment
fn fs_main(v: Varyings) -> @location(0) vec4<f32> {{
    return v.color;
}}
"#,
        angular_speed = ANGULAR_SPEED,
        depth_min = DEPTH_MIN,
        depth_max = DEPTH_MAX,
        phase_step = TWINKLE_PHASE_STEP,
        frequency = TWINKLE_FREQUENCY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_are_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        let u = FrameUniforms::new(&Viewport::new(640.0, 480.0), 240.0, 1.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(floats, &[640.0, 480.0, 240.0, 1.0]);

        let hidpi = Viewport::new(640.0, 480.0).with_device_pixel_ratio(1.5);
        assert_eq!(FrameUniforms::new(&hidpi, 360.0, 0.0).resolution, [960.0, 720.0]);
    }

    #[test]
    fn test_shader_embeds_constants() {
        let src = billboard_shader();
        assert!(src.contains("uniforms.time * 0.6"));
        assert!(src.contains("0.4, 1.6)"));
        assert!(src.contains("* 0.12"));
    }

    #[test]
    fn test_shader_validates() {
        let src = billboard_shader();
        let module = naga::front::wgsl::parse_str(&src)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(&src)));
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).expect("billboard shader should validate");
    }
}
