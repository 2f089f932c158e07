//! Growable GPU buffers.
//!
//! A [`DynamicBuffer`] reallocates at twice the requested size when a write
//! no longer fits, and never shrinks.

use wgpu::util::DeviceExt;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 64;

/// Capacity after a write of `needed` bytes into a buffer holding
/// `capacity` bytes, or `None` when the write fits.
fn grown_capacity(capacity: usize, needed: usize) -> Option<usize> {
    (needed > capacity).then(|| (needed * 2).max(capacity + 1024))
}

/// A GPU buffer that grows on demand.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Empty buffer with at least `initial_capacity` bytes.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        let buffer = Self::allocate(device, label, capacity, usage);
        Self {
            buffer,
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Buffer initialized with `data`.
    #[must_use]
    pub fn new_with_data<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytes,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });
        Self {
            buffer,
            capacity: bytes.len(),
            len: bytes.len(),
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents with `data`, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated; bind groups that
    /// reference it must be recreated.
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let reallocated = match grown_capacity(self.capacity, data.len()) {
            Some(capacity) => {
                log::debug!("{}: growing to {capacity} bytes", self.label);
                self.buffer =
                    Self::allocate(device, &self.label, capacity, self.usage);
                self.capacity = capacity;
                true
            }
            None => false,
        };
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = data.len();
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last write.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
