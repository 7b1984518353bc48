//! Best-of-K placement search for the next brushstroke
//!
//! Candidate squares are scored by how far the canvas currently is from the
//! source over the same region, and the worst-matching one wins. This keeps
//! the legacy heuristic of scoring a handful of uniform random positions: it
//! is a cheap local search, not an optimum.
//!
//! Tiny canvases are the one exception. When the canvas offers no more
//! distinct positions than [`CANDIDATES_CONSIDERED`], all of them are scored
//! in row-major order, so a brush can always reach the worst-matching spot.
//! Every larger canvas uses the random draws unchanged.

use crate::algorithm::random::RandomStream;
use crate::algorithm::sampler::average_color;
use crate::io::configuration::CANDIDATES_CONSIDERED;
use crate::io::error::{Result, invalid_config};
use crate::spatial::{Color, PixelBuffer, Rect};

/// Scored candidate position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Region the brushstroke would cover
    pub rect: Rect,
    /// Divergence between source and canvas over `rect`
    pub score: u32,
}

/// Sum of absolute R, G and B differences
pub const fn color_distance(a: Color, b: Color) -> u32 {
    a.r.abs_diff(b.r) as u32 + a.g.abs_diff(b.g) as u32 + a.b.abs_diff(b.b) as u32
}

/// Divergence between source and canvas mean colors over `rect`
///
/// # Errors
///
/// Returns an error if `rect` covers no pixels or extends past either buffer
pub fn divergence(source: &PixelBuffer, canvas: &PixelBuffer, rect: Rect) -> Result<u32> {
    let source_mean = average_color(source, rect)?;
    let canvas_mean = average_color(canvas, rect)?;
    Ok(color_distance(source_mean, canvas_mean))
}

/// Pick the placement of a `size`×`size` square that diverges most
///
/// Draws [`CANDIDATES_CONSIDERED`] top-left corners uniformly from
/// `[0, width − size] × [0, height − size]` and keeps the first candidate
/// with the highest score. When the canvas has no more distinct positions
/// than that, every position is scored in row-major order instead.
///
/// # Errors
///
/// Returns [`crate::CrystalError::InvalidConfig`] if `size` is zero or does
/// not fit on the canvas
pub fn find_best_position(
    source: &PixelBuffer,
    canvas: &PixelBuffer,
    size: usize,
    rng: &mut RandomStream,
) -> Result<Candidate> {
    let (width, height) = canvas.bounds();
    if size == 0 || size > width || size > height {
        return Err(invalid_config(
            "size",
            &size,
            &format!("brush does not fit on a {width}x{height} canvas"),
        ));
    }
    let max_x = width - size;
    let max_y = height - size;
    let position_count = (max_x + 1) * (max_y + 1);

    let positions: Vec<(usize, usize)> = if position_count <= CANDIDATES_CONSIDERED {
        (0..=max_y)
            .flat_map(|y| (0..=max_x).map(move |x| (x, y)))
            .collect()
    } else {
        (0..CANDIDATES_CONSIDERED)
            .map(|_| {
                let x = rng.range_inclusive(0, max_x);
                let y = rng.range_inclusive(0, max_y);
                (x, y)
            })
            .collect()
    };

    let mut best: Option<Candidate> = None;
    for (x, y) in positions {
        let rect = Rect::square(x, y, size);
        let score = divergence(source, canvas, rect)?;
        if best.is_none_or(|b| score > b.score) {
            best = Some(Candidate { rect, score });
        }
    }

    best.ok_or_else(|| invalid_config("size", &size, &"no candidate positions"))
}
