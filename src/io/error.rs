//! Error types for generation, configuration and image I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all crystalize operations
#[derive(Debug)]
pub enum CrystalError {
    /// Pixel access or region outside the buffer grid
    ///
    /// Generation never produces such an access once the configuration has
    /// been validated against the image dimensions.
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Buffer width
        width: usize,
        /// Buffer height
        height: usize,
    },

    /// Configuration parameter validation failed
    InvalidConfig {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to decode the source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or save the generated canvas
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Persisted configuration could not be parsed
    ConfigParse {
        /// Path of the configuration document
        path: PathBuf,
        /// Offending key, or `None` when the document itself is malformed
        field: Option<String>,
        /// Description of the failure
        reason: String,
    },

    /// Configuration could not be serialized
    ConfigSerialize {
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Generation was requested on a run that has already finished
    GenerationComplete {
        /// Number of brushstrokes the finished run painted
        iterations: usize,
    },
}

impl fmt::Display for CrystalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel ({x}, {y}) is out of bounds for a {width}x{height} buffer"
                )
            }
            Self::InvalidConfig {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid config '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::ConfigParse {
                path,
                field: Some(field),
                reason,
            } => {
                write!(
                    f,
                    "Failed to parse config '{}' at field '{field}': {reason}",
                    path.display()
                )
            }
            Self::ConfigParse {
                path,
                field: None,
                reason,
            } => {
                write!(f, "Failed to parse config '{}': {reason}", path.display())
            }
            Self::ConfigSerialize { source } => {
                write!(f, "Failed to serialize config: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::GenerationComplete { iterations } => {
                write!(
                    f,
                    "Generation already completed after {iterations} brushstrokes"
                )
            }
        }
    }
}

impl std::error::Error for CrystalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ConfigSerialize { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crystalize results
pub type Result<T> = std::result::Result<T, CrystalError>;

/// Create an invalid configuration error
pub fn invalid_config(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CrystalError {
    CrystalError::InvalidConfig {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a configuration parse error for a single offending key
pub fn config_field_error(
    path: impl Into<PathBuf>,
    field: &str,
    reason: &impl ToString,
) -> CrystalError {
    CrystalError::ConfigParse {
        path: path.into(),
        field: Some(field.to_string()),
        reason: reason.to_string(),
    }
}
