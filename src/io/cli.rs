//! Command-line interface for turning an image into a crystalized rendition

use crate::algorithm::executor::CrystalGenerator;
use crate::io::configuration::{
    DEFAULT_OUTPUT_PATH, DEFAULT_SEED, GenerationConfig, PROGRESS_CHANNEL_CAPACITY, Preset,
};
use crate::io::error::{Result, invalid_config};
use crate::io::image::{export_canvas_as_png, load_source_image};
use crate::io::logging::Verbosity;
use crate::io::progress::ProgressDisplay;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::mpsc::sync_channel;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "crystalize")]
#[command(
    author,
    version,
    about = "Approximate an image with layered translucent rectangles"
)]
/// Command-line arguments for the crystalize tool
pub struct Cli {
    /// Source image to approximate
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Where to write the generated PNG
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// JSON configuration file (overrides --preset)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the selected preset as a JSON configuration file and exit
    #[arg(long, value_name = "PATH")]
    pub save_config: Option<PathBuf>,

    /// Built-in configuration used when no --config is given
    #[arg(short, long, value_enum, default_value_t = Preset::Classic)]
    pub preset: Preset,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Override the configured number of brushstrokes
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Logging verbosity implied by the flags
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Selected preset with the iteration override applied
    pub fn preset_config(&self) -> GenerationConfig {
        self.apply_overrides(GenerationConfig::preset(self.preset))
    }

    /// Configuration for this run: the config file if given, otherwise the
    /// preset, with the iteration override applied and validated
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the resulting
    /// configuration is inconsistent
    pub fn resolve_config(&self) -> Result<GenerationConfig> {
        let config = match &self.config {
            Some(path) => {
                let loaded = GenerationConfig::load_from_file(path)?;
                tracing::info!(path = %path.display(), "using configuration file");
                self.apply_overrides(loaded)
            }
            None => self.preset_config(),
        };
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: GenerationConfig) -> GenerationConfig {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        config
    }
}

/// Orchestrates a single run: configuration, decoding, generation and export
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the action selected by the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration handling, image decoding, generation
    /// or export fails
    pub fn process(&self) -> Result<()> {
        if let Some(path) = &self.cli.save_config {
            return self.save_config(path);
        }

        let input = self
            .cli
            .input
            .as_deref()
            .ok_or_else(|| invalid_config("input", &"", &"Input path is required"))?;
        self.generate(input)
    }

    fn save_config(&self, path: &Path) -> Result<()> {
        self.cli.preset_config().save_to_file(path)?;
        tracing::info!(path = %path.display(), preset = ?self.cli.preset, "configuration saved");
        Ok(())
    }

    fn generate(&self, input: &Path) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.resolve_config()?;
        let source = load_source_image(input)?;
        let (width, height) = source.bounds();
        let iterations = config.iterations;

        let mut generator = CrystalGenerator::new(config, &source, self.cli.seed)?;
        tracing::info!(
            input = %input.display(),
            width,
            height,
            iterations,
            seed = self.cli.seed,
            "starting generation"
        );

        let label = input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let (sender, receiver) = sync_channel(PROGRESS_CHANNEL_CAPACITY);
        let display = ProgressDisplay::new(&label, iterations, self.cli.should_show_progress())
            .spawn(receiver);

        let outcome = generator.generate(sender);
        match display.join() {
            Ok(summary) => tracing::debug!(received = summary.received, "progress stream closed"),
            Err(_) => tracing::warn!("progress display thread panicked"),
        }
        outcome?;

        export_canvas_as_png(generator.result(), &self.cli.output)?;
        tracing::info!(
            output = %self.cli.output.display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "generation complete"
        );
        Ok(())
    }
}
