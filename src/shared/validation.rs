//! Upload Validation
//!
//! Pre-persistence checks for server icon uploads: pixel dimension bounds
//! and allowed file extensions.

use std::io::Cursor;
use std::path::Path;

/// Maximum allowed icon height in pixels.
pub const MAX_ICON_HEIGHT: u32 = 70;

/// Maximum allowed icon width in pixels.
pub const MAX_ICON_WIDTH: u32 = 100;

/// Allowed icon file extensions (lowercase, without the dot).
pub const VALID_ICON_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Upload validation failures. Mapped to `AppError::Validation` (HTTP 400).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("Unsupported file extension.")]
    UnsupportedExtension,

    #[error("Unable to read image: {0}")]
    UnreadableImage(String),

    #[error("The maximum icon size is {MAX_ICON_HEIGHT}x{MAX_ICON_WIDTH} pixels. size: {height}x{width} pixels.")]
    IconTooLarge { height: u32, width: u32 },
}

/// Check that an uploaded icon fits within the allowed pixel dimensions.
///
/// No-op when no image is supplied. Only the header is decoded to read the
/// dimensions; the reader is dropped right after inspection.
pub fn validate_icon_image_size(image: Option<&[u8]>) -> Result<(), UploadValidationError> {
    let Some(data) = image else {
        return Ok(());
    };

    let (width, height) = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| UploadValidationError::UnreadableImage(e.to_string()))?
        .into_dimensions()
        .map_err(|e| UploadValidationError::UnreadableImage(e.to_string()))?;

    if height > MAX_ICON_HEIGHT || width > MAX_ICON_WIDTH {
        return Err(UploadValidationError::IconTooLarge { height, width });
    }

    Ok(())
}

/// Check that an uploaded file name carries an allowed image extension
/// (case-insensitive).
pub fn validate_image_file_extension(file_name: &str) -> Result<(), UploadValidationError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or(UploadValidationError::UnsupportedExtension)?;

    if !VALID_ICON_EXTENSIONS.contains(&ext.as_str()) {
        return Err(UploadValidationError::UnsupportedExtension);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Encode a blank PNG of the given dimensions.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(width, height);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("Failed to encode test PNG");
        buf
    }

    #[test]
    fn icon_at_maximum_dimensions_passes() {
        let data = png_bytes(MAX_ICON_WIDTH, MAX_ICON_HEIGHT);
        assert!(validate_icon_image_size(Some(&data)).is_ok());
    }

    #[test]
    fn icon_below_maximum_dimensions_passes() {
        let data = png_bytes(64, 64);
        assert!(validate_icon_image_size(Some(&data)).is_ok());
    }

    #[test]
    fn icon_too_tall_fails() {
        let data = png_bytes(100, 71);
        assert_eq!(
            validate_icon_image_size(Some(&data)),
            Err(UploadValidationError::IconTooLarge {
                height: 71,
                width: 100
            })
        );
    }

    #[test]
    fn icon_too_wide_fails() {
        let data = png_bytes(101, 70);
        assert_eq!(
            validate_icon_image_size(Some(&data)),
            Err(UploadValidationError::IconTooLarge {
                height: 70,
                width: 101
            })
        );
    }

    #[test]
    fn missing_icon_is_a_no_op() {
        assert!(validate_icon_image_size(None).is_ok());
    }

    #[test]
    fn undecodable_payload_fails() {
        let result = validate_icon_image_size(Some(b"definitely not an image"));
        assert!(matches!(
            result,
            Err(UploadValidationError::UnreadableImage(_))
        ));
    }

    #[test_case("icon.png"; "lowercase png")]
    #[test_case("icon.jpg"; "lowercase jpg")]
    #[test_case("icon.jpeg"; "lowercase jpeg")]
    #[test_case("icon.gif"; "lowercase gif")]
    #[test_case("ICON.PNG"; "uppercase png")]
    #[test_case("photo.JpEg"; "mixed case jpeg")]
    fn allowed_extensions_pass(file_name: &str) {
        assert!(validate_image_file_extension(file_name).is_ok());
    }

    #[test_case("icon.bmp")]
    #[test_case("icon.svg")]
    #[test_case("icon.png.exe")]
    #[test_case("icon")]
    #[test_case("")]
    fn disallowed_extensions_fail(file_name: &str) {
        assert_eq!(
            validate_image_file_extension(file_name),
            Err(UploadValidationError::UnsupportedExtension)
        );
    }
}
