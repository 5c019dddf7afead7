//! Rendering module
//!
//! `snapshot` and `shapes` are platform-independent: they turn game state into
//! flat-colored triangles. `pipeline` uploads them through WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod snapshot;
pub mod vertex;
pub mod viewport;

pub use pipeline::RenderState;
pub use snapshot::FrameSnapshot;
pub use viewport::Viewport;
