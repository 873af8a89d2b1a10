//! Yaw/pitch rotation shared by the tilted shape generators.

use glam::Vec3;

/// Rotate `point` by `yaw_deg` about the vertical (Y) axis, then by
/// `pitch_deg` about the horizontal (X) axis.
///
/// Angles are in degrees. `(0, 0)` is the identity.
///
/// ```ignore
/// let tilted = rotate_yaw_pitch(Vec3::new(1.0, 0.0, 0.0), 90.0, 0.0);
/// // tilted ≈ (0, 0, 1)
/// ```
pub fn rotate_yaw_pitch(point: Vec3, yaw_deg: f32, pitch_deg: f32) -> Vec3 {
    let yaw = yaw_deg.to_radians();
    let pitch = pitch_deg.to_radians();

    // Yaw around Y
    let (siny, cosy) = yaw.sin_cos();
    let x1 = point.x * cosy - point.z * siny;
    let z1 = point.x * siny + point.z * cosy;
    let y1 = point.y;

    // Pitch around X
    let (sinp, cosp) = pitch.sin_cos();
    let y2 = y1 * cosp - z1 * sinp;
    let z2 = y1 * sinp + z1 * cosp;

    Vec3::new(x1, y2, z2)
}
