use std::sync::mpsc::SyncSender;

use crate::{
    algorithm::compositor::{paint, paint_border},
    algorithm::placement::find_best_position,
    algorithm::random::RandomStream,
    algorithm::sampler::{StrictColorPolicy, buffer_average, sample_source},
    io::configuration::{CanvasFill, GenerationConfig},
    io::error::{CrystalError, Result},
    spatial::{Color, PixelBuffer, Rect},
};

/// Lifecycle of a generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    /// Constructed, no brushstroke painted yet
    Idle,
    /// At least one brushstroke painted, more to come
    Running,
    /// All configured brushstrokes painted
    Done,
}

/// A single painted brushstroke
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brushstroke {
    /// Region that was painted
    pub rect: Rect,
    /// Fill color including its opacity
    pub color: Color,
    /// Divergence score that won the placement search
    pub score: u32,
}

/// Crystalize generator: layers translucent rectangles over a canvas until
/// it approximates the source image
///
/// Owns the canvas and its random stream; borrows the source image for the
/// lifetime of the run. The configuration is validated against the source
/// dimensions on construction, so a run either starts with a consistent
/// setup or never touches a pixel.
#[derive(Debug)]
pub struct CrystalGenerator<'a> {
    config: GenerationConfig,
    source: &'a PixelBuffer,
    canvas: PixelBuffer,
    random_stream: RandomStream,
    policy: StrictColorPolicy,
    state: GeneratorState,
    iteration: usize,
}

impl<'a> CrystalGenerator<'a> {
    /// Create a generator with a stream seeded from `seed`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is inconsistent
    /// - The largest brush does not fit on the source image
    pub fn new(config: GenerationConfig, source: &'a PixelBuffer, seed: u64) -> Result<Self> {
        Self::with_random_stream(config, source, RandomStream::new(seed))
    }

    /// Create a generator that draws from an existing random stream
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is inconsistent
    /// - The largest brush does not fit on the source image
    pub fn with_random_stream(
        config: GenerationConfig,
        source: &'a PixelBuffer,
        random_stream: RandomStream,
    ) -> Result<Self> {
        let (width, height) = source.bounds();
        config.validate_for_canvas(width, height)?;

        let fill = match config.canvas_fill {
            CanvasFill::SourceAverage => buffer_average(source)?,
            CanvasFill::Solid(rgb) => Color::from(rgb),
        };
        let canvas = PixelBuffer::new(width, height, fill);
        let policy = StrictColorPolicy::from_config(&config);

        Ok(Self {
            config,
            source,
            canvas,
            random_stream,
            policy,
            state: GeneratorState::Idle,
            iteration: 0,
        })
    }

    /// Current lifecycle state
    pub const fn state(&self) -> GeneratorState {
        self.state
    }

    /// Number of brushstrokes painted so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Configuration driving this run
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Current canvas, complete once the state is [`GeneratorState::Done`]
    pub const fn result(&self) -> &PixelBuffer {
        &self.canvas
    }

    /// Consume the generator and hand back the canvas
    pub fn into_result(self) -> PixelBuffer {
        self.canvas
    }

    /// Paint one brushstroke
    ///
    /// Draws a brush size, searches for the placement with the highest
    /// divergence, samples the fill color from the source and composites it,
    /// outline last.
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::GenerationComplete`] once every configured
    /// brushstroke has been painted
    pub fn paint_brushstroke(&mut self) -> Result<Brushstroke> {
        if self.iteration >= self.config.iterations {
            self.state = GeneratorState::Done;
            return Err(CrystalError::GenerationComplete {
                iterations: self.iteration,
            });
        }

        let size = self
            .random_stream
            .range_inclusive(self.config.min_rect_size, self.config.max_rect_size);
        let candidate = find_best_position(self.source, &self.canvas, size, &mut self.random_stream)?;
        let color = sample_source(
            self.source,
            candidate.rect,
            &self.policy,
            &mut self.random_stream,
        )?;

        paint(&mut self.canvas, candidate.rect, color)?;
        if let Some(thickness) = self.config.border_width() {
            paint_border(
                &mut self.canvas,
                candidate.rect,
                self.config.border_color(),
                thickness,
            )?;
        }

        self.iteration += 1;
        self.state = if self.iteration >= self.config.iterations {
            GeneratorState::Done
        } else {
            GeneratorState::Running
        };

        tracing::trace!(
            iteration = self.iteration,
            x = candidate.rect.x,
            y = candidate.rect.y,
            size,
            score = candidate.score,
            alpha = color.a,
            "painted brushstroke"
        );

        Ok(Brushstroke {
            rect: candidate.rect,
            color,
            score: candidate.score,
        })
    }

    /// Fraction of the configured brushstrokes painted so far
    ///
    /// Exact numerator and denominator keep consecutive values strictly
    /// increasing up to [`crate::io::configuration::MAX_ITERATIONS`].
    pub fn progress(&self) -> f32 {
        self.iteration as f32 / self.config.iterations as f32
    }

    /// Paint all remaining brushstrokes, publishing progress after each
    ///
    /// Sends `(i + 1) / iterations` after brushstroke `i` and drops `progress`
    /// on return, which closes the stream. A full channel blocks until the
    /// consumer catches up; a disconnected consumer only stops publication.
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::GenerationComplete`] if the run has already
    /// finished
    // Taking the sender by value ties closing the stream to this call
    #[allow(clippy::needless_pass_by_value)]
    pub fn generate(&mut self, progress: SyncSender<f32>) -> Result<()> {
        if self.state == GeneratorState::Done {
            return Err(CrystalError::GenerationComplete {
                iterations: self.iteration,
            });
        }

        let mut publishing = true;
        while self.iteration < self.config.iterations {
            self.paint_brushstroke()?;
            if publishing && progress.send(self.progress()).is_err() {
                tracing::debug!(
                    iteration = self.iteration,
                    "progress consumer disconnected, continuing without updates"
                );
                publishing = false;
            }
        }
        Ok(())
    }

    /// Paint all remaining brushstrokes without reporting progress
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::GenerationComplete`] if the run has already
    /// finished
    pub fn run_to_completion(&mut self) -> Result<()> {
        if self.state == GeneratorState::Done {
            return Err(CrystalError::GenerationComplete {
                iterations: self.iteration,
            });
        }
        while self.iteration < self.config.iterations {
            self.paint_brushstroke()?;
        }
        Ok(())
    }
}
