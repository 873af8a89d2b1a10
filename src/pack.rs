//! Per-instance attribute packing.
//!
//! Every particle becomes nine `f32`s, in this order:
//!
//! | Offset (floats) | Offset (bytes) | Field | Location |
//! |-----------------|----------------|-------|----------|
//! | 0..3 | 0 | position `x, y, z` | 0 |
//! | 3..5 | 12 | size `w, h` | 1 |
//! | 5..9 | 20 | color `r, g, b, a` | 2 |
//!
//! The buffer is stepped per instance; a billboard pipeline draws six
//! vertices per instance and reads these attributes for all of them.

use bytemuck::{Pod, Zeroable};

use crate::store::Particle;

/// Scalars per instance.
pub const FLOATS_PER_INSTANCE: usize = 9;

/// Bytes per instance.
pub const INSTANCE_STRIDE: u64 = (FLOATS_PER_INSTANCE * std::mem::size_of::<f32>()) as u64;

/// GPU-ready instance record, laid out exactly like one packed run of nine floats.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceAttributes {
    pub position: [f32; 3],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl From<&Particle> for InstanceAttributes {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            size: p.size.to_array(),
            color: p.color.to_array(),
        }
    }
}

impl InstanceAttributes {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2, // size
        2 => Float32x4  // color
    ];

    /// Vertex buffer layout for a pipeline consuming packed instances.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: INSTANCE_STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Flatten particles into `[x, y, z, w, h, r, g, b, a]` runs, in sequence order.
pub fn pack(particles: &[Particle]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(particles.len() * FLOATS_PER_INSTANCE);
    for p in particles {
        flat.extend_from_slice(&[
            p.position.x,
            p.position.y,
            p.position.z,
            p.size.x,
            p.size.y,
            p.color.x,
            p.color.y,
            p.color.z,
            p.color.w,
        ]);
    }
    flat
}

/// Pack particles as typed instance records.
pub fn pack_instances(particles: &[Particle]) -> Vec<InstanceAttributes> {
    particles.iter().map(InstanceAttributes::from).collect()
}

/// View a packed buffer as bytes for upload.
pub fn as_bytes(packed: &[f32]) -> &[u8] {
    bytemuck::cast_slice(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3, Vec4};

    fn particle(i: usize) -> Particle {
        let f = i as f32;
        Particle {
            position: Vec3::new(f, f + 0.1, f + 0.2),
            size: Vec2::new(f + 0.3, f + 0.4),
            color: Vec4::new(0.5, 0.6, 0.7, 1.0),
        }
    }

    #[test]
    fn test_pack_length() {
        let particles: Vec<Particle> = (0..17).map(particle).collect();
        assert_eq!(pack(&particles).len(), 9 * 17);
        assert!(pack(&[]).is_empty());
    }

    #[test]
    fn test_pack_field_order() {
        let particles: Vec<Particle> = (0..5).map(particle).collect();
        let flat = pack(&particles);
        for (i, p) in particles.iter().enumerate() {
            let base = i * FLOATS_PER_INSTANCE;
            let expected = [
                p.position.x, p.position.y, p.position.z,
                p.size.x, p.size.y,
                p.color.x, p.color.y, p.color.z, p.color.w,
            ];
            assert_eq!(&flat[base..base + 9], &expected);
        }
    }

    #[test]
    fn test_instance_record_matches_flat_layout() {
        assert_eq!(std::mem::size_of::<InstanceAttributes>() as u64, INSTANCE_STRIDE);
        let particles: Vec<Particle> = (0..3).map(particle).collect();
        let instances = pack_instances(&particles);
        let flat = pack(&particles);
        assert_eq!(bytemuck::cast_slice::<InstanceAttributes, u8>(&instances), as_bytes(&flat));
    }

    #[test]
    fn test_layout_offsets() {
        let layout = InstanceAttributes::layout();
        assert_eq!(layout.array_stride, 36);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
    }
}
