//! Crystalized image approximation by stochastic layering of translucent rectangles
//!
//! A blank canvas is repeatedly painted with semi-transparent squares. Each
//! brushstroke is placed where the canvas disagrees most with the source image
//! among a handful of random candidates, and takes the source's mean color over
//! that region. The accumulated layers converge toward the source.

#![deny(unsafe_code)]

/// Generation engine: sampling, compositing, placement search and the driver loop
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Pixel buffers, colors and rectangles
pub mod spatial;

pub use io::error::{CrystalError, Result};
