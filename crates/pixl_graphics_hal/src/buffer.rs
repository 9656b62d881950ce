use std::{marker::PhantomData, mem::size_of, rc::Rc};

use bytemuck::Pod;
use enum_map::Enum;

use crate::Graphics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum BufferKind {
    /// Quad indices.
    Index,
    /// Per-vertex attributes. Several vertex buffers can feed one draw.
    Vertex,
}

/// A hint telling the driver how often the buffer contents change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once, such as tile map geometry.
    Static,
    /// Updated occasionally.
    Dynamic,
    /// Rewritten for (almost) every draw, such as sprite batches.
    Stream,
}

/// Initial contents of a buffer.
#[derive(Debug)]
pub enum BufferData<'a, T> {
    Data(&'a [T]),
    /// Zero-filled, with the given length in T.
    Empty(usize),
}

impl<'a, T> From<&'a [T]> for BufferData<'a, T> {
    fn from(value: &'a [T]) -> Self {
        BufferData::Data(value)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for BufferData<'a, T> {
    fn from(value: &'a [T; N]) -> Self {
        BufferData::Data(value)
    }
}

impl<'a, T> From<&'a Vec<T>> for BufferData<'a, T> {
    fn from(value: &'a Vec<T>) -> Self {
        BufferData::Data(value)
    }
}

impl<T> From<usize> for BufferData<'static, T> {
    fn from(value: usize) -> Self {
        BufferData::Empty(value)
    }
}

impl<'a, T> BufferData<'a, T> {
    /// Length in T.
    pub fn len(&self) -> usize {
        match self {
            BufferData::Data(data) => data.len(),
            BufferData::Empty(len) => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T: Pod> BufferData<'a, T> {
    pub(crate) fn bytes(&self) -> BufferData<'a, u8> {
        match self {
            BufferData::Data(data) => BufferData::Data(bytemuck::cast_slice(data)),
            BufferData::Empty(len) => BufferData::Empty(len * size_of::<T>()),
        }
    }
}

/// An untyped buffer allocated on the GPU.
pub trait ByteBuffer<G: Graphics> {
    fn new(renderer: G, kind: BufferKind, usage: BufferUsage, data: BufferData<u8>) -> Self;

    /// Length in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes `data` at a byte offset.
    /// Panics if the data stretches beyond the buffer boundaries.
    fn write(&self, offset: usize, data: &[u8]);
}

/// A typed view over a shared [ByteBuffer], converting slices of T to bytes
/// with bytemuck.
pub struct Buffer<G: Graphics, T: Pod> {
    pub bytes: Rc<G::ByteBuffer>,
    _t: PhantomData<T>,
}

impl<G: Graphics, T: Pod> Clone for Buffer<G, T> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            _t: PhantomData,
        }
    }
}

impl<G: Graphics, T: Pod> Buffer<G, T> {
    pub(crate) fn new(
        renderer: G,
        kind: BufferKind,
        usage: BufferUsage,
        data: BufferData<T>,
    ) -> Self {
        Self {
            bytes: Rc::new(G::ByteBuffer::new(renderer, kind, usage, data.bytes())),
            _t: PhantomData,
        }
    }

    /// Length in T.
    pub fn len(&self) -> usize {
        self.bytes.len() / size_of::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes `data` starting at element `offset`.
    /// Panics if the data stretches beyond the buffer boundaries.
    pub fn write(&self, offset: usize, data: &[T]) {
        let data = bytemuck::cast_slice(data);
        self.bytes.write(offset * size_of::<T>(), data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_length_is_counted_in_elements() {
        let data = [[0f32; 2]; 4];
        let data = BufferData::from(&data);

        assert_eq!(data.len(), 4);
        assert_eq!(data.bytes().len(), 32);
    }

    #[test]
    fn empty_data_is_sized_in_bytes() {
        let data: BufferData<u16> = 6.into();

        assert_eq!(data.bytes().len(), 12);
        assert!(!data.is_empty());
        assert!(BufferData::<u16>::Empty(0).is_empty());
    }
}
