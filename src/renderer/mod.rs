//! Renderer Module - frame buffers and terminal output.
//!
//! - [`FrameBuffer`] - 2D grid of cells for one viewport
//! - [`rasterize`] - markup + layout + reel offsets → frame buffer
//! - [`DiffRenderer`] - writes only the cells that changed since last frame

mod buffer;
mod diff;

pub use buffer::{rasterize, FrameBuffer, REEL_IN_TRANSIT};
pub use diff::DiffRenderer;
