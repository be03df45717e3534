use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::gpu::batch::RectInstance;

/// Canvas parameters passed to the vertex shader (16 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CanvasParams {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub _padding: [f32; 2],
}

/// Instance and uniform buffers for drawing cell rectangles
pub struct RectBuffers {
    /// Per-rectangle instance data
    pub instance_buffer: Buffer,
    /// Uniform buffer for canvas parameters
    pub params_buffer: Buffer,
    /// Number of instances the buffer can hold
    capacity: usize,
    /// Instances written by the last upload
    len: u32,
}

impl RectBuffers {
    /// Create buffers for up to `capacity` rectangles on a canvas of the given size
    pub fn new(device: &Device, queue: &Queue, capacity: usize, canvas: (f32, f32)) -> Self {
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rect-instance-buffer"),
            size: (capacity * std::mem::size_of::<RectInstance>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("canvas-params-buffer"),
            size: std::mem::size_of::<CanvasParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = CanvasParams {
            canvas_width: canvas.0,
            canvas_height: canvas.1,
            _padding: [0.0, 0.0],
        };
        queue.write_buffer(&params_buffer, 0, bytemuck::bytes_of(&params));

        Self {
            instance_buffer,
            params_buffer,
            capacity,
            len: 0,
        }
    }

    /// Upload this frame's rectangles. Anything beyond capacity is dropped.
    pub fn upload(&mut self, queue: &Queue, instances: &[RectInstance]) {
        if instances.len() > self.capacity {
            log::warn!(
                "Dropping {} rectangles over buffer capacity {}",
                instances.len() - self.capacity,
                self.capacity
            );
        }
        let instances = &instances[..instances.len().min(self.capacity)];
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }

    /// Number of instances to draw
    pub fn instance_count(&self) -> u32 {
        self.len
    }
}
