//! Tests for image decoding and PNG export

#[cfg(test)]
mod tests {
    use crystalize::CrystalError;
    use crystalize::io::image::{
        buffer_from_rgba, buffer_to_rgba, decode_source_image, encode_canvas_png,
        export_canvas_as_png, load_source_image,
    };
    use crystalize::spatial::{Color, PixelBuffer};
    use image::{Rgba, RgbaImage};

    fn checker() -> PixelBuffer {
        let pixels = (0..12)
            .map(|i| {
                if i % 2 == 0 {
                    Color::opaque(255, 0, 0)
                } else {
                    Color::new(0, 0, 255, 128)
                }
            })
            .collect();
        PixelBuffer::from_pixels(4, 3, pixels).expect("sizes match")
    }

    // Tests image pixels land at matching buffer coordinates
    // Verified by transposing rows and columns
    #[test]
    fn test_buffer_from_rgba_layout() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([9, 8, 7, 6]));

        let buffer = buffer_from_rgba(&img).expect("converts");

        assert_eq!(buffer.bounds(), (3, 2));
        assert_eq!(buffer.get(2, 1).expect("in bounds"), Color::new(9, 8, 7, 6));
        assert_eq!(buffer.get(0, 0).expect("in bounds"), Color::new(0, 0, 0, 0));
    }

    // Tests converting to an image keeps every pixel
    // Verified by dropping the alpha channel
    #[test]
    fn test_buffer_to_rgba() {
        let buffer = checker();
        let img = buffer_to_rgba(&buffer).expect("converts");

        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 128]);
    }

    // Tests encoded PNG bytes decode to the same pixels
    // Verified by encoding without alpha
    #[test]
    fn test_png_bytes_decode() {
        let buffer = checker();
        let bytes = encode_canvas_png(&buffer).expect("encodes");

        assert_eq!(bytes.get(1..4), Some(&b"PNG"[..]));
        assert_eq!(decode_source_image(&bytes).expect("decodes"), buffer);
    }

    // Tests export creates missing directories and writes PNG data
    // Verified by skipping directory creation
    #[test]
    fn test_export_creates_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a").join("b").join("out.png");
        let buffer = checker();

        export_canvas_as_png(&buffer, &path).expect("exports");

        assert!(path.exists());
        assert_eq!(load_source_image(&path).expect("loads"), buffer);
    }

    // Tests export writes PNG even when the extension says otherwise
    // Verified by inferring the format from the extension
    #[test]
    fn test_export_ignores_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.jpg");

        export_canvas_as_png(&checker(), &path).expect("exports");

        let bytes = std::fs::read(&path).expect("readable");
        assert_eq!(bytes.get(1..4), Some(&b"PNG"[..]));
    }

    // Tests a failed write surfaces as ImageExport, not as a decode failure
    // Verified by converting every image error into ImageLoad
    #[test]
    fn test_export_failure_is_export_error() {
        let dir = tempfile::tempdir().expect("temp dir");

        let error = export_canvas_as_png(&checker(), dir.path()).unwrap_err();

        match error {
            CrystalError::ImageExport { path, .. } => assert_eq!(path, dir.path()),
            other => unreachable!("expected ImageExport, got {other:?}"),
        }
    }

    // Tests undecodable input surfaces as ImageLoad
    // Verified by returning an empty buffer
    #[test]
    fn test_bad_bytes() {
        let error = decode_source_image(b"definitely not an image").unwrap_err();
        assert!(matches!(error, CrystalError::ImageLoad { .. }));
    }

    // Tests missing files surface as ImageLoad with the path
    // Verified by reporting a file system error
    #[test]
    fn test_missing_file() {
        let error = load_source_image(std::path::Path::new("/nonexistent/source.png")).unwrap_err();
        match error {
            CrystalError::ImageLoad { path, .. } => {
                assert!(path.ends_with("source.png"));
            }
            other => unreachable!("expected ImageLoad, got {other:?}"),
        }
    }
}
