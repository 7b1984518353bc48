//! Engine constants, generation parameters and their persisted JSON form

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::io::error::{CrystalError, Result, config_field_error, invalid_config};
use crate::spatial::Color;

// Placement search
/// Number of random candidate positions scored per brushstroke
pub const CANDIDATES_CONSIDERED: usize = 10;

/// Largest brushstroke count a run accepts
///
/// Progress is published as `f32`; above this count consecutive fractions
/// round to the same value.
pub const MAX_ITERATIONS: usize = 1 << 24;

// Progress stream settings
/// Number of progress values buffered before the generator blocks
pub const PROGRESS_CHANNEL_CAPACITY: usize = 64;
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Default values for command-line parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Output written when no path is given
pub const DEFAULT_OUTPUT_PATH: &str = "output.png";

/// Named starting points for a [`GenerationConfig`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Faint fixed-opacity layers, no jitter, no outlines
    #[default]
    Classic,
    /// Stronger random opacity, color jitter and dark outlines
    Bordered,
}

/// Initial contents of the canvas before the first brushstroke
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasFill {
    /// Mean color of the whole source image
    #[default]
    SourceAverage,
    /// A flat opaque color
    Solid([u8; 3]),
}

/// Parameters controlling a generation run
///
/// Serialized with camelCase keys. Keys absent from a document take their
/// [`Default`] value, unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Lower bound of the brush size in pixels
    pub min_rect_size: usize,
    /// Upper bound of the brush size in pixels
    pub max_rect_size: usize,
    /// Number of brushstrokes
    pub iterations: usize,
    /// Lower bound of brush opacity
    pub alpha_min: u8,
    /// Upper bound of brush opacity
    pub alpha_max: u8,
    /// Multiplier applied to brush opacity
    pub blending_factor: f32,
    /// Maximum per-channel color offset when jitter is enabled
    pub color_variation: u8,
    /// Whether each brushstroke gets an outline
    pub border_enabled: bool,
    /// Outline color
    pub border_color: [u8; 3],
    /// Outline width in pixels; zero or negative disables outlines
    pub border_thickness: i32,
    /// Random opacity in `[alpha_min, alpha_max]` plus color jitter,
    /// instead of the fixed `alpha_min × blending_factor` opacity
    pub color_jitter: bool,
    /// Initial canvas contents
    pub canvas_fill: CanvasFill,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::preset(Preset::Classic)
    }
}

impl GenerationConfig {
    /// Configuration for a named preset
    pub const fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self {
                min_rect_size: 10,
                max_rect_size: 30,
                iterations: 5000,
                alpha_min: 20,
                alpha_max: 60,
                blending_factor: 0.3,
                color_variation: 2,
                border_enabled: false,
                border_color: [20, 20, 20],
                border_thickness: 1,
                color_jitter: false,
                canvas_fill: CanvasFill::SourceAverage,
            },
            Preset::Bordered => Self {
                min_rect_size: 10,
                max_rect_size: 30,
                iterations: 5000,
                alpha_min: 30,
                alpha_max: 150,
                blending_factor: 0.5,
                color_variation: 10,
                border_enabled: true,
                border_color: [20, 20, 20],
                border_thickness: 1,
                color_jitter: true,
                canvas_fill: CanvasFill::SourceAverage,
            },
        }
    }

    /// Outline color at full opacity
    pub const fn border_color(&self) -> Color {
        let [r, g, b] = self.border_color;
        Color::opaque(r, g, b)
    }

    /// Outline width when outlines are drawn at all
    pub const fn border_width(&self) -> Option<usize> {
        if self.border_enabled && self.border_thickness > 0 {
            Some(self.border_thickness as usize)
        } else {
            None
        }
    }

    /// Check parameter consistency independent of any image
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::InvalidConfig`] naming the first inconsistent
    /// parameter
    pub fn validate(&self) -> Result<()> {
        if self.min_rect_size == 0 {
            return Err(invalid_config(
                "minRectSize",
                &self.min_rect_size,
                &"must be at least 1",
            ));
        }
        if self.min_rect_size > self.max_rect_size {
            return Err(invalid_config(
                "maxRectSize",
                &self.max_rect_size,
                &format!("must not be smaller than minRectSize ({})", self.min_rect_size),
            ));
        }
        if self.iterations == 0 {
            return Err(invalid_config(
                "iterations",
                &self.iterations,
                &"must be at least 1",
            ));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(invalid_config(
                "iterations",
                &self.iterations,
                &format!("must not exceed {MAX_ITERATIONS}"),
            ));
        }
        if self.alpha_min > self.alpha_max {
            return Err(invalid_config(
                "alphaMax",
                &self.alpha_max,
                &format!("must not be smaller than alphaMin ({})", self.alpha_min),
            ));
        }
        if !self.blending_factor.is_finite() || self.blending_factor < 0.0 {
            return Err(invalid_config(
                "blendingFactor",
                &self.blending_factor,
                &"must be a finite, non-negative number",
            ));
        }
        Ok(())
    }

    /// Check parameter consistency against the dimensions of a source image
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::InvalidConfig`] if [`Self::validate`] fails,
    /// the image is empty, or the largest brush does not fit on the canvas
    pub fn validate_for_canvas(&self, width: usize, height: usize) -> Result<()> {
        self.validate()?;
        if width == 0 || height == 0 {
            return Err(invalid_config(
                "image",
                &format!("{width}x{height}"),
                &"source image has no pixels",
            ));
        }
        let limit = width.min(height);
        if self.max_rect_size > limit {
            return Err(invalid_config(
                "maxRectSize",
                &self.max_rect_size,
                &format!("exceeds the smallest image dimension of {width}x{height}"),
            ));
        }
        Ok(())
    }

    /// Parse a JSON document, reporting the offending key on failure
    ///
    /// `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::ConfigParse`] for malformed JSON, unknown keys
    /// or mistyped values, and [`CrystalError::InvalidConfig`] when the parsed
    /// values are inconsistent
    pub fn from_json(path: &Path, text: &str) -> Result<Self> {
        let document: Map<String, Value> =
            serde_json::from_str(text).map_err(|e| CrystalError::ConfigParse {
                path: path.to_path_buf(),
                field: None,
                reason: e.to_string(),
            })?;

        let known = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(known)) => known,
            Ok(_) => Map::new(),
            Err(source) => return Err(CrystalError::ConfigSerialize { source }),
        };

        // Each key is decoded on its own so a failure can name it
        for (key, value) in &document {
            if !known.contains_key(key) {
                return Err(config_field_error(path, key, &"unknown field"));
            }
            let mut single = Map::new();
            single.insert(key.clone(), value.clone());
            serde_json::from_value::<Self>(Value::Object(single))
                .map_err(|e| config_field_error(path, key, &e))?;
        }

        let config: Self =
            serde_json::from_value(Value::Object(document)).map_err(|e| {
                CrystalError::ConfigParse {
                    path: path.to_path_buf(),
                    field: None,
                    reason: e.to_string(),
                }
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON form
    ///
    /// # Errors
    ///
    /// Returns [`CrystalError::ConfigSerialize`] if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| CrystalError::ConfigSerialize { source })
    }

    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Self::from_json`]
    /// rejects its contents
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CrystalError::FileSystem {
            path: path.to_path_buf(),
            operation: "read config",
            source: e,
        })?;
        let config = Self::from_json(path, &text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CrystalError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
        std::fs::write(path, data).map_err(|e| CrystalError::FileSystem {
            path: path.to_path_buf(),
            operation: "write config",
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }
}
