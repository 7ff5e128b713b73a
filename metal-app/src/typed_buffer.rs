use crate::DEFAULT_RESOURCE_OPTIONS;
use metal::{Buffer, BufferRef, DeviceRef, MTLResourceOptions};
use std::marker::PhantomData;

/// A shared-storage buffer holding `len` elements of `T`, writable from the CPU.
pub struct TypedBuffer<T: Sized + Copy + Clone> {
    pub buffer: Buffer,
    pub len: usize,
    _type: PhantomData<T>,
}

impl<T: Sized + Copy + Clone> TypedBuffer<T> {
    #[inline]
    pub fn with_capacity(label: &str, device: &DeviceRef, capacity: usize) -> Self {
        Self::with_options(label, device, capacity, DEFAULT_RESOURCE_OPTIONS)
    }

    #[inline]
    pub fn with_options(
        label: &str,
        device: &DeviceRef,
        capacity: usize,
        options: MTLResourceOptions,
    ) -> Self {
        // Metal rejects zero-length buffers.
        let bytes = (std::mem::size_of::<T>() * capacity).max(1);
        let buffer = device.new_buffer(bytes as _, options);
        buffer.set_label(label);
        Self {
            buffer,
            len: capacity,
            _type: PhantomData,
        }
    }

    #[inline]
    pub fn from_data(label: &str, device: &DeviceRef, data: &[T]) -> Self {
        let mut tb = Self::with_capacity(label, device, data.len());
        tb.contents_mut().copy_from_slice(data);
        tb
    }

    #[inline(always)]
    pub fn raw(&self) -> &BufferRef {
        &self.buffer
    }

    /// The caller must not write a slot the GPU may still be reading; the frame ring enforces
    /// this for per-frame buffers.
    #[inline]
    pub fn contents_mut(&mut self) -> &mut [T] {
        let contents = self.buffer.contents() as *mut T;
        unsafe { std::slice::from_raw_parts_mut(contents, self.len) }
    }
}
