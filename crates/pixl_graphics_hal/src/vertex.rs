use std::mem::size_of;

use bytemuck::Pod;
use derive_more::Constructor;
pub use pixl_graphics_hal_macro::Vertex;

use crate::{buffer::Buffer, Graphics};

/// A `#[repr(C)]` vertex whose fields are bound to shader attributes by name.
pub trait Vertex {
    const FORMAT: &'static [VertexAttribute];
}

#[derive(Constructor, Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub offset: usize,
    pub kind: AttributeKind,
    pub size: VectorSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    I8,
    U8,
    I16,
    U16,
    F32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorSize {
    N1,
    N2,
    N3,
    N4,
}

impl VectorSize {
    pub fn size(self) -> usize {
        match self {
            VectorSize::N1 => 1,
            VectorSize::N2 => 2,
            VectorSize::N3 => 3,
            VectorSize::N4 => 4,
        }
    }
}

pub trait AsAttributeKind {
    const KIND: AttributeKind;
    const SIZE: VectorSize;
}

macro_rules! impl_as_attribute_kind {
    ($(($t:ty, $kind:ident)),*) => {
        $(
            impl AsAttributeKind for $t {
                const KIND: AttributeKind = AttributeKind::$kind;
                const SIZE: VectorSize = VectorSize::N1;
            }
            impl AsAttributeKind for [$t; 2] {
                const KIND: AttributeKind = AttributeKind::$kind;
                const SIZE: VectorSize = VectorSize::N2;
            }
            impl AsAttributeKind for [$t; 3] {
                const KIND: AttributeKind = AttributeKind::$kind;
                const SIZE: VectorSize = VectorSize::N3;
            }
            impl AsAttributeKind for [$t; 4] {
                const KIND: AttributeKind = AttributeKind::$kind;
                const SIZE: VectorSize = VectorSize::N4;
            }
        )*
    };
}

impl_as_attribute_kind!((i8, I8), (u8, U8), (i16, I16), (u16, U16), (f32, F32));

/// A vertex buffer with its element type erased, so buffers of different
/// vertex types can be passed to one draw.
pub struct VertexBindings<'a, G: Graphics> {
    pub buffer: &'a G::ByteBuffer,
    pub attributes: &'static [VertexAttribute],
    /// Size of one vertex in bytes.
    pub stride: usize,
}

impl<'a, G: Graphics> Clone for VertexBindings<'a, G> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            attributes: self.attributes,
            stride: self.stride,
        }
    }
}

pub trait AsVertexBindings<G: Graphics> {
    fn bindings(&self) -> VertexBindings<'_, G>;
}

impl<T: Vertex + Pod, G: Graphics> AsVertexBindings<G> for Buffer<G, T> {
    fn bindings(&self) -> VertexBindings<'_, G> {
        VertexBindings {
            buffer: &self.bytes,
            attributes: T::FORMAT,
            stride: size_of::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_map_to_vector_sizes() {
        assert_eq!(<[f32; 2] as AsAttributeKind>::SIZE.size(), 2);
        assert_eq!(<[f32; 2] as AsAttributeKind>::KIND, AttributeKind::F32);
        assert_eq!(<u8 as AsAttributeKind>::SIZE, VectorSize::N1);
        assert_eq!(<[u8; 4] as AsAttributeKind>::KIND, AttributeKind::U8);
    }
}
