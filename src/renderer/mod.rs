//! Renderer - frame buffer, drawing surface and diff output.
//!
//! - [`FrameBuffer`]: the cell grid a frame is drawn into
//! - [`TextGraphics`]: clipped, translated drawing onto a frame buffer
//! - [`DiffRenderer`]: pushes only changed cells to a [`Screen`](crate::screen::Screen)

mod buffer;
mod diff;
mod graphics;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use graphics::TextGraphics;
