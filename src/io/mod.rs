/// Command-line parsing and run orchestration
pub mod cli;
/// Engine constants and generation parameters
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and PNG export
pub mod image;
/// Logging setup
pub mod logging;
/// Progress stream consumer
pub mod progress;
