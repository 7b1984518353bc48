//! Tests for argument parsing, configuration resolution and the runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use crystalize::CrystalError;
    use crystalize::io::cli::{Cli, Runner};
    use crystalize::io::configuration::{GenerationConfig, Preset};
    use crystalize::io::image::{export_canvas_as_png, load_source_image};
    use crystalize::io::logging::Verbosity;
    use crystalize::spatial::{Color, PixelBuffer};
    use std::path::PathBuf;

    // Tests defaults when no flags are given
    // Verified by changing the default preset
    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["crystalize"]);

        assert_eq!(cli.input, None);
        assert_eq!(cli.output, PathBuf::from("output.png"));
        assert_eq!(cli.preset, Preset::Classic);
        assert_eq!(cli.seed, 42);
        assert_eq!(cli.iterations, None);
        assert!(cli.should_show_progress());
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    // Tests short and long flags are recognized
    // Verified by renaming the iterations flag
    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "crystalize",
            "-i",
            "in.png",
            "--output",
            "out.png",
            "--preset",
            "bordered",
            "-s",
            "7",
            "-n",
            "100",
            "-q",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("in.png")));
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(cli.preset, Preset::Bordered);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.iterations, Some(100));
        assert!(!cli.should_show_progress());
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    // Tests unknown presets are rejected by the parser
    // Verified by accepting arbitrary preset names
    #[test]
    fn test_unknown_preset() {
        assert!(Cli::try_parse_from(["crystalize", "--preset", "mosaic"]).is_err());
    }

    // Tests the iteration override applies to presets and files
    // Verified by applying the override only to presets
    #[test]
    fn test_resolve_config_override() {
        let cli = Cli::parse_from(["crystalize", "-p", "bordered", "-n", "12"]);
        let config = cli.resolve_config().expect("valid");
        assert_eq!(config.iterations, 12);
        assert!(config.border_enabled);

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "alphaMin": 5, "alphaMax": 9 }"#).expect("writable");
        let cli = Cli::parse_from([
            "crystalize",
            "-c",
            path.to_str().expect("utf-8 path"),
            "-n",
            "3",
        ]);
        let config = cli.resolve_config().expect("valid");
        assert_eq!(config.iterations, 3);
        assert_eq!((config.alpha_min, config.alpha_max), (5, 9));
    }

    // Tests a zero iteration override is rejected
    // Verified by skipping validation after overrides
    #[test]
    fn test_zero_iterations_rejected() {
        let cli = Cli::parse_from(["crystalize", "-n", "0"]);
        assert!(matches!(
            cli.resolve_config(),
            Err(CrystalError::InvalidConfig {
                parameter: "iterations",
                ..
            })
        ));
    }

    // Tests saving a preset writes a loadable document
    // Verified by saving the default preset regardless of the flag
    #[test]
    fn test_save_config() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("saved.json");
        let cli = Cli::parse_from([
            "crystalize",
            "-p",
            "bordered",
            "--save-config",
            path.to_str().expect("utf-8 path"),
        ]);

        Runner::new(cli).process().expect("saves");

        let loaded = GenerationConfig::load_from_file(&path).expect("loads");
        assert_eq!(loaded, GenerationConfig::preset(Preset::Bordered));
    }

    // Tests a run without input fails before touching the file system
    // Verified by defaulting the input path
    #[test]
    fn test_missing_input() {
        let cli = Cli::parse_from(["crystalize", "-q"]);
        assert!(matches!(
            Runner::new(cli).process(),
            Err(CrystalError::InvalidConfig {
                parameter: "input",
                ..
            })
        ));
    }

    // Tests a full run decodes, paints and exports
    // Verified by skipping the export step
    #[test]
    fn test_full_run() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("source.png");
        let output = dir.path().join("out").join("result.png");
        export_canvas_as_png(&PixelBuffer::new(40, 30, Color::opaque(90, 160, 30)), &input)
            .expect("writes source");

        let cli = Cli::parse_from([
            "crystalize",
            "-i",
            input.to_str().expect("utf-8 path"),
            "-o",
            output.to_str().expect("utf-8 path"),
            "-n",
            "25",
            "-q",
        ]);
        Runner::new(cli).process().expect("runs");

        let result = load_source_image(&output).expect("output decodes");
        assert_eq!(result.bounds(), (40, 30));
        assert!(result.pixels().all(|c| c.a == 255));
    }

    // Tests images smaller than the largest brush are rejected
    // Verified by clamping the brush size silently
    #[test]
    fn test_image_too_small() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("tiny.png");
        export_canvas_as_png(&PixelBuffer::new(8, 8, Color::opaque(1, 1, 1)), &input)
            .expect("writes source");

        let cli = Cli::parse_from([
            "crystalize",
            "-i",
            input.to_str().expect("utf-8 path"),
            "-o",
            dir.path().join("out.png").to_str().expect("utf-8 path"),
            "-q",
        ]);

        assert!(matches!(
            Runner::new(cli).process(),
            Err(CrystalError::InvalidConfig {
                parameter: "maxRectSize",
                ..
            })
        ));
    }
}
