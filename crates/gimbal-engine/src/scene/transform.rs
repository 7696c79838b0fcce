use glam::Mat4;

/// Rotation angles in degrees, written by the overlay and read by the draw.
///
/// Values are used as-is; angles outside `[0, 360)` are not clamped or wrapped
/// since the trigonometric functions are already periodic.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TransformState {
    pub angle_x: f32,
    pub angle_y: f32,
    pub angle_z: f32,
}

impl TransformState {
    pub const fn new(angle_x: f32, angle_y: f32, angle_z: f32) -> Self {
        Self {
            angle_x,
            angle_y,
            angle_z,
        }
    }

    /// Model transform for the current angles: `I · Rz · Ry · Rx`.
    ///
    /// Rotations compose in the local frame of the previous one, so the order
    /// matters. The result depends only on the three angles; nothing carries
    /// over between calls.
    pub fn matrix(&self) -> Mat4 {
        Mat4::IDENTITY
            * Mat4::from_rotation_z(self.angle_z.to_radians())
            * Mat4::from_rotation_y(self.angle_y.to_radians())
            * Mat4::from_rotation_x(self.angle_x.to_radians())
    }
}
