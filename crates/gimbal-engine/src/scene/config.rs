/// Inputs for the one-time scene setup.
///
/// The defaults reproduce the stock scene: a purple unit triangle on a teal
/// background, rotated by a `transform` uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// GLSL 330 core vertex stage.
    pub vertex_source: String,
    /// GLSL 330 core fragment stage.
    pub fragment_source: String,
    /// Three vertices, `{x, y, z}` each.
    pub vertices: [f32; 9],
    /// Name of the `mat4` uniform that receives the model transform.
    pub transform_uniform: String,
    /// RGBA colour the target is cleared to every frame.
    pub clear_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vertex_source: include_str!("shaders/triangle.vert").to_string(),
            fragment_source: include_str!("shaders/triangle.frag").to_string(),
            vertices: [
                -0.5, -0.5, 0.0, //
                0.5, -0.5, 0.0, //
                0.0, 0.5, 0.0,
            ],
            transform_uniform: "transform".to_string(),
            clear_color: [0.2, 0.4, 0.4, 1.0],
        }
    }
}
