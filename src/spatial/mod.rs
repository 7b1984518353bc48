//! Spatial data structures for source images and the working canvas
//!
//! This module contains the pixel grid shared by every stage of generation:
//! - RGBA colors and axis-aligned rectangles
//! - Bounds-checked pixel access and rectangular region views

/// Pixel buffer, colors and rectangles
pub mod buffer;

pub use buffer::{Color, PixelBuffer, Rect};
