//! Bounded RGBA pixel grid with rectangular region access
//!
//! Both the immutable source image and the mutable working canvas are stored
//! as a [`PixelBuffer`]. Pixels live in an `Array2` indexed `[row, col]`, so
//! `(x, y)` coordinates map to `[y, x]` internally.

use ndarray::{Array2, ArrayView2, ArrayViewMut2, s};

use crate::io::error::{CrystalError, Result};

/// 8-bit RGBA sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 is fully opaque)
    pub a: u8,
}

impl Color {
    /// Create a color from all four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha channel
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Channels in `[r, g, b, a]` order
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::opaque(r, g, b)
    }
}

/// Axis-aligned rectangle given by its top-left corner and extent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left column (inclusive)
    pub x: usize,
    /// Top row (inclusive)
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create an `size`×`size` square at `(x, y)`
    pub const fn square(x: usize, y: usize, size: usize) -> Self {
        Self::new(x, y, size, size)
    }

    /// Column one past the right edge
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Row one past the bottom edge
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Check whether the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check whether `(x, y)` lies inside the rectangle
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether the rectangle lies fully inside a `width`×`height` grid
    pub const fn fits_within(&self, width: usize, height: usize) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

/// Width × height grid of RGBA samples with bounds-checked access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array2<Color>,
}

impl PixelBuffer {
    /// Create a buffer where every pixel holds `fill`
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), fill),
        }
    }

    /// Build a buffer from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels.len()` is not `width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        let len = pixels.len();
        Array2::from_shape_vec((height, width), pixels)
            .map(|pixels| Self { pixels })
            .map_err(|e| CrystalError::InvalidConfig {
                parameter: "pixels",
                value: len.to_string(),
                reason: format!("expected {width}x{height} pixels: {e}"),
            })
    }

    /// Dimensions as `(width, height)`
    pub fn bounds(&self) -> (usize, usize) {
        let (rows, cols) = self.pixels.dim();
        (cols, rows)
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Read the pixel at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::OutOfBounds`] when `x >= width` or `y >= height`
    pub fn get(&self, x: usize, y: usize) -> Result<Color> {
        self.pixels
            .get([y, x])
            .copied()
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Overwrite the pixel at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::OutOfBounds`] when `x >= width` or `y >= height`
    pub fn set(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        let error = self.out_of_bounds(x, y);
        let pixel = self.pixels.get_mut([y, x]).ok_or(error)?;
        *pixel = color;
        Ok(())
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Read-only view of the pixels covered by `rect`
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::OutOfBounds`] if `rect` extends past the grid
    pub fn region(&self, rect: Rect) -> Result<ArrayView2<'_, Color>> {
        self.check_region(rect)?;
        Ok(self
            .pixels
            .slice(s![rect.y..rect.bottom(), rect.x..rect.right()]))
    }

    /// Mutable view of the pixels covered by `rect`
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::OutOfBounds`] if `rect` extends past the grid
    pub fn region_mut(&mut self, rect: Rect) -> Result<ArrayViewMut2<'_, Color>> {
        self.check_region(rect)?;
        Ok(self
            .pixels
            .slice_mut(s![rect.y..rect.bottom(), rect.x..rect.right()]))
    }

    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &Color> {
        self.pixels.iter()
    }

    /// Flatten into row-major RGBA bytes
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    fn check_region(&self, rect: Rect) -> Result<()> {
        let (width, height) = self.bounds();
        if rect.fits_within(width, height) {
            Ok(())
        } else {
            Err(self.out_of_bounds(rect.right(), rect.bottom()))
        }
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CrystalError {
        let (width, height) = self.bounds();
        CrystalError::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}
