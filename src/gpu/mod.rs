mod blit;
mod context;

pub use blit::BlitPipeline;
pub use context::GpuContext;
