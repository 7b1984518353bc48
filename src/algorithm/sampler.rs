//! Region color averaging over the source image and the working canvas
//!
//! Source samples ("strict" samples) produce the fill color of a brushstroke
//! and carry an opacity derived from the configuration. Canvas samples are
//! always opaque and only feed the divergence score of the placement search.

use crate::algorithm::random::RandomStream;
use crate::io::configuration::GenerationConfig;
use crate::io::error::{Result, invalid_config};
use crate::spatial::{Color, PixelBuffer, Rect};

/// Opacity and jitter rules applied to strict color samples
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrictColorPolicy {
    /// Lower opacity bound
    pub alpha_min: u8,
    /// Upper opacity bound
    pub alpha_max: u8,
    /// Opacity multiplier
    pub blending_factor: f32,
    /// Per-channel jitter spread, `None` for the fixed-opacity variant
    pub jitter: Option<u8>,
}

impl StrictColorPolicy {
    /// Derive the policy from a generation configuration
    pub const fn from_config(config: &GenerationConfig) -> Self {
        Self {
            alpha_min: config.alpha_min,
            alpha_max: config.alpha_max,
            blending_factor: config.blending_factor,
            jitter: if config.color_jitter {
                Some(config.color_variation)
            } else {
                None
            },
        }
    }

    /// Opacity for the next brushstroke
    ///
    /// The fixed variant scales `alpha_min` and clamps into `[0, 255]`. The
    /// jitter variant scales a uniform draw from `[alpha_min, alpha_max]` and
    /// clamps the result back into that range.
    pub fn alpha(&self, rng: &mut RandomStream) -> u8 {
        if self.jitter.is_none() {
            return scale_alpha(self.alpha_min, self.blending_factor, 0, 255);
        }
        let drawn = rng.byte_inclusive(self.alpha_min, self.alpha_max);
        scale_alpha(drawn, self.blending_factor, self.alpha_min, self.alpha_max)
    }
}

fn scale_alpha(alpha: u8, factor: f32, low: u8, high: u8) -> u8 {
    let scaled = f32::from(alpha) * factor;
    scaled.clamp(f32::from(low), f32::from(high)) as u8
}

/// Unweighted mean of R, G and B over `rect`, truncated, with opaque alpha
///
/// # Errors
///
/// Returns an error if `rect` covers no pixels or extends past the buffer
pub fn average_color(buffer: &PixelBuffer, rect: Rect) -> Result<Color> {
    if rect.is_empty() {
        return Err(invalid_config(
            "rect",
            &format!("{}x{}", rect.width, rect.height),
            &"sample region covers no pixels",
        ));
    }
    let region = buffer.region(rect)?;
    let mut sums = [0u64; 3];
    for pixel in &region {
        sums[0] += u64::from(pixel.r);
        sums[1] += u64::from(pixel.g);
        sums[2] += u64::from(pixel.b);
    }
    let count = region.len() as u64;
    Ok(Color::opaque(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ))
}

/// Mean color of the whole buffer, opaque
///
/// # Errors
///
/// Returns an error if the buffer has no pixels
pub fn buffer_average(buffer: &PixelBuffer) -> Result<Color> {
    let (width, height) = buffer.bounds();
    average_color(buffer, Rect::new(0, 0, width, height))
}

/// Opaque mean color of the working canvas over `rect`
///
/// # Errors
///
/// Returns an error if `rect` covers no pixels or extends past the canvas
pub fn sample_canvas(canvas: &PixelBuffer, rect: Rect) -> Result<Color> {
    average_color(canvas, rect)
}

/// Fill color for a brushstroke: source mean over `rect`, opacity from the
/// policy, and per-channel jitter when enabled
///
/// # Errors
///
/// Returns an error if `rect` covers no pixels or extends past the source
pub fn sample_source(
    source: &PixelBuffer,
    rect: Rect,
    policy: &StrictColorPolicy,
    rng: &mut RandomStream,
) -> Result<Color> {
    let mean = average_color(source, rect)?;
    let alpha = policy.alpha(rng);
    let color = match policy.jitter {
        Some(spread) => Color::new(
            jitter_channel(mean.r, rng.offset(spread)),
            jitter_channel(mean.g, rng.offset(spread)),
            jitter_channel(mean.b, rng.offset(spread)),
            alpha,
        ),
        None => mean.with_alpha(alpha),
    };
    Ok(color)
}

/// Apply a signed offset to a channel, clamped into `[0, 255]`
pub fn jitter_channel(value: u8, offset: i32) -> u8 {
    (i32::from(value) + offset).clamp(0, 255) as u8
}
