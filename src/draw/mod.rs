//! Drawing targets for the particle field.

/// Software rasteriser producing premultiplied RGBA8 frames.
pub mod cpu;
/// Read-back pixel frames, PNG output, and frame digests.
pub mod frame;
/// The `Surface` seam and an in-memory recording surface.
pub mod surface;
