//! Contribution grid rendering
//!
//! `layout` holds the immutable geometry and style parameters, `paint` lays a
//! calendar out into draw instructions and `raster` turns those into PNG bytes.

pub mod layout;
pub mod paint;
pub mod raster;

pub use layout::{CanvasSize, Color, DayLabel, FontSpec, GridPlacement, LayoutConfig, Palette};
pub use paint::{render, DisplayList, DrawInstruction};
pub use raster::{RasterConfig, Rasterizer, SvgRasterizer};

/// An encoded image produced by a rasterizer.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, png_data: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.png_data.is_empty()
    }
}
