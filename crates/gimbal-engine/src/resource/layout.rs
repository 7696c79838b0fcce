use std::rc::Rc;

use crate::gl::{
    AttributeBinding, Bindings, BufferHandle, GlApi, GpuError, GpuResult, Primitive,
    ResourceKind, VertexArrayHandle,
};

/// Vertex array object: maps bytes of geometry buffers onto shader inputs.
pub struct VertexLayout {
    gl: Rc<dyn GlApi>,
    handle: VertexArrayHandle,
    /// Described attributes with the buffer each one reads from.
    attributes: Vec<(AttributeBinding, BufferHandle)>,
}

impl VertexLayout {
    pub fn new(gl: &Rc<dyn GlApi>) -> GpuResult<Self> {
        let handle = gl
            .create_vertex_array()
            .map_err(|reason| GpuError::ResourceAllocation {
                kind: ResourceKind::VertexArray,
                reason,
            })?;

        log::debug!("created vertex array {}", handle.0);
        Ok(Self {
            gl: Rc::clone(gl),
            handle,
            attributes: Vec::new(),
        })
    }

    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }

    pub fn is_bound(&self, bindings: &Bindings) -> bool {
        bindings.vertex_array() == Some(self.handle)
    }

    pub fn bind(&self, bindings: &mut Bindings) {
        if self.is_bound(bindings) {
            return;
        }
        self.gl.bind_vertex_array(Some(self.handle));
        bindings.set_vertex_array(Some(self.handle));
    }

    pub fn unbind(&self, bindings: &mut Bindings) {
        self.gl.bind_vertex_array(None);
        bindings.set_vertex_array(None);
    }

    /// Records how the currently bound geometry buffer feeds `attribute.index`
    /// and enables that input.
    ///
    /// The layout binds itself first. A geometry buffer must already be bound;
    /// otherwise the call is rejected with [`GpuError::NoBufferBound`] before
    /// anything reaches the driver. Describing an index again replaces the
    /// earlier description.
    pub fn describe_attribute(
        &mut self,
        bindings: &mut Bindings,
        attribute: AttributeBinding,
    ) -> GpuResult<()> {
        if !(1..=4).contains(&attribute.components) {
            return Err(GpuError::InvalidAttribute {
                index: attribute.index,
                reason: "component count must be between 1 and 4",
            });
        }

        let Some(buffer) = bindings.array_buffer() else {
            log::error!(
                "vertex array {}: attribute {} described with no buffer bound",
                self.handle.0,
                attribute.index
            );
            return Err(GpuError::NoBufferBound {
                index: attribute.index,
            });
        };

        self.bind(bindings);
        self.gl.vertex_attrib_pointer(&attribute);
        self.gl.enable_vertex_attrib_array(attribute.index);

        match self
            .attributes
            .iter_mut()
            .find(|(a, _)| a.index == attribute.index)
        {
            Some(slot) => *slot = (attribute, buffer),
            None => self.attributes.push((attribute, buffer)),
        }

        log::debug!(
            "vertex array {}: attribute {} <- buffer {} ({} x {:?}, stride {}, offset {})",
            self.handle.0,
            attribute.index,
            buffer.0,
            attribute.components,
            attribute.element_type,
            attribute.stride_bytes,
            attribute.offset_bytes
        );
        Ok(())
    }

    /// Current description of attribute `index` and its source buffer.
    pub fn attribute(&self, index: u32) -> Option<(AttributeBinding, BufferHandle)> {
        self.attributes
            .iter()
            .find(|(a, _)| a.index == index)
            .copied()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Issues a non-indexed draw through this layout.
    ///
    /// Requires this layout to be bound and a program to be active.
    pub fn draw(
        &self,
        bindings: &Bindings,
        primitive: Primitive,
        first: i32,
        count: i32,
    ) -> GpuResult<()> {
        if !self.is_bound(bindings) {
            return Err(GpuError::MissingBinding("vertex array"));
        }
        if bindings.program().is_none() {
            return Err(GpuError::MissingBinding("program"));
        }
        self.gl.draw_arrays(primitive, first, count);
        Ok(())
    }
}

impl Drop for VertexLayout {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.handle);
        log::debug!("released vertex array {}", self.handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingGl};
    use crate::gl::ElementType;
    use crate::resource::GeometryBuffer;

    const POSITION: AttributeBinding = AttributeBinding::packed_f32(0, 3);

    fn setup() -> (Rc<RecordingGl>, Rc<dyn GlApi>, Bindings) {
        let rec = Rc::new(RecordingGl::new());
        let gl: Rc<dyn GlApi> = rec.clone();
        (rec, gl, Bindings::new())
    }

    #[test]
    fn describe_without_buffer_is_rejected() {
        let (rec, gl, mut bindings) = setup();
        let mut layout = VertexLayout::new(&gl).unwrap();
        rec.clear_calls();

        let err = layout.describe_attribute(&mut bindings, POSITION).unwrap_err();

        assert!(matches!(err, GpuError::NoBufferBound { index: 0 }));
        assert!(rec.calls().is_empty());
        assert_eq!(layout.attribute_count(), 0);
    }

    #[test]
    fn describe_binds_layout_before_pointer() {
        let (rec, gl, mut bindings) = setup();
        let buffer = GeometryBuffer::new(&gl, &mut bindings, &[0.0; 9]).unwrap();
        let mut layout = VertexLayout::new(&gl).unwrap();
        rec.clear_calls();

        layout.describe_attribute(&mut bindings, POSITION).unwrap();

        let vao = layout.handle().0.get();
        assert_eq!(
            rec.calls(),
            vec![
                Call::BindVertexArray(Some(vao)),
                Call::VertexAttribPointer(POSITION),
                Call::EnableVertexAttribArray(0),
            ]
        );
        assert_eq!(layout.attribute(0), Some((POSITION, buffer.handle())));
        assert_eq!(POSITION.stride_bytes, 12);
    }

    #[test]
    fn redescribing_an_index_overwrites() {
        let (_rec, gl, mut bindings) = setup();
        let _buffer = GeometryBuffer::new(&gl, &mut bindings, &[0.0; 9]).unwrap();
        let mut layout = VertexLayout::new(&gl).unwrap();

        layout.describe_attribute(&mut bindings, POSITION).unwrap();
        let normalized_bytes = AttributeBinding {
            element_type: ElementType::UnsignedByte,
            normalized: true,
            ..POSITION
        };
        layout
            .describe_attribute(&mut bindings, normalized_bytes)
            .unwrap();

        assert_eq!(layout.attribute_count(), 1);
        assert_eq!(layout.attribute(0).map(|(a, _)| a), Some(normalized_bytes));
    }

    #[test]
    fn invalid_component_count_is_rejected() {
        let (_rec, gl, mut bindings) = setup();
        let _buffer = GeometryBuffer::new(&gl, &mut bindings, &[0.0; 9]).unwrap();
        let mut layout = VertexLayout::new(&gl).unwrap();

        let err = layout
            .describe_attribute(&mut bindings, AttributeBinding::packed_f32(1, 5))
            .unwrap_err();

        assert!(matches!(err, GpuError::InvalidAttribute { index: 1, .. }));
    }

    #[test]
    fn draw_requires_layout_and_program() {
        let (rec, gl, mut bindings) = setup();
        let layout = VertexLayout::new(&gl).unwrap();

        let err = layout
            .draw(&bindings, Primitive::Triangles, 0, 3)
            .unwrap_err();
        assert!(matches!(err, GpuError::MissingBinding("vertex array")));

        layout.bind(&mut bindings);
        let err = layout
            .draw(&bindings, Primitive::Triangles, 0, 3)
            .unwrap_err();
        assert!(matches!(err, GpuError::MissingBinding("program")));
        assert_eq!(rec.count(|c| matches!(c, Call::DrawArrays(..))), 0);
    }

    #[test]
    fn drop_releases_vertex_array() {
        let (rec, gl, _bindings) = setup();
        let layout = VertexLayout::new(&gl).unwrap();

        drop(layout);

        assert_eq!(rec.live(ResourceKind::VertexArray), 0);
    }
}
