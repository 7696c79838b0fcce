use crate::scene::TransformState;

/// Immediate-mode UI drawn on top of the scene.
pub trait Overlay {
    /// Begins a UI frame and evaluates the widgets, which may edit `transform`.
    fn run(&mut self, transform: &mut TransformState);

    /// Renders the output of the last `run` into the current framebuffer.
    fn paint(&mut self);
}

/// Shows the finished frame.
pub trait Presenter {
    fn present(&mut self) -> anyhow::Result<()>;
}
