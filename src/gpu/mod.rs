mod batch;
mod buffers;
mod context;
mod letterbox;
mod render;

pub use batch::{build_frame, ColorScope, RectInstance, ShapeBatch};
pub use buffers::{CanvasParams, RectBuffers};
pub use context::GpuContext;
pub use letterbox::Letterbox;
pub use render::RenderPipeline;
