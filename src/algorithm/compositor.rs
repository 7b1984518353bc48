//! Source-over compositing of brushstrokes onto the canvas

use crate::io::error::Result;
use crate::spatial::{Color, PixelBuffer, Rect};

/// Blend `foreground` atop an opaque `background`
///
/// Computes `fg·a + bg·(1 − a)` per channel in integer arithmetic, truncated.
/// The result is always opaque.
pub const fn blend_over(foreground: Color, background: Color) -> Color {
    let alpha = foreground.a as u32;
    Color::opaque(
        blend_channel(foreground.r, background.r, alpha),
        blend_channel(foreground.g, background.g, alpha),
        blend_channel(foreground.b, background.b, alpha),
    )
}

const fn blend_channel(fg: u8, bg: u8, alpha: u32) -> u8 {
    ((fg as u32 * alpha + bg as u32 * (255 - alpha)) / 255) as u8
}

/// Composite `color` over every canvas pixel inside `rect`
///
/// # Errors
///
/// Returns an error if `rect` extends past the canvas
pub fn paint(canvas: &mut PixelBuffer, rect: Rect, color: Color) -> Result<()> {
    let mut region = canvas.region_mut(rect)?;
    region.map_inplace(|pixel| *pixel = blend_over(color, *pixel));
    Ok(())
}

/// Overwrite the four edge bands of `rect` with opaque `border_color`
///
/// Bands wider than half the rectangle cover it completely. A thickness of
/// zero leaves the canvas untouched.
///
/// # Errors
///
/// Returns an error if `rect` extends past the canvas
pub fn paint_border(
    canvas: &mut PixelBuffer,
    rect: Rect,
    border_color: Color,
    thickness: usize,
) -> Result<()> {
    let mut region = canvas.region_mut(rect)?;
    if thickness == 0 {
        return Ok(());
    }
    let color = border_color.with_alpha(255);
    let (rows, cols) = region.dim();
    for ((row, col), pixel) in region.indexed_iter_mut() {
        let on_edge = row < thickness
            || col < thickness
            || row + thickness >= rows
            || col + thickness >= cols;
        if on_edge {
            *pixel = color;
        }
    }
    Ok(())
}
