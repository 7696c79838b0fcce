/// Initialization parameters for the GL layer.
///
/// The context version is requested as-is; there is no fallback to other
/// versions or APIs when the driver refuses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlInit {
    /// OpenGL core-profile version as `(major, minor)`.
    ///
    /// Must match the `#version` line of the scene shaders.
    pub gl_version: (u8, u8),

    /// Wait for vertical blank on swap.
    ///
    /// A failure to apply the swap interval is logged and otherwise ignored.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            gl_version: (3, 3),
            vsync: true,
        }
    }
}
