//! Decodes user-supplied image files into inline sources for stickers and
//! shape textures.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use thiserror::Error;

use crate::sticker::ImageSource;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("unrecognized image format")]
    UnknownFormat,
    #[error("image decode failed: {message}")]
    Decode { message: String },
}

pub type UploadResult<T> = Result<T, UploadError>;

/// A decoded upload, ready to be stored as a sticker source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub source: ImageSource,
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
}

/// Validates `bytes` as an image and returns it as a `data:` URL.
pub fn decode_image(bytes: &[u8]) -> UploadResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    let format = image::guess_format(bytes).map_err(|_| UploadError::UnknownFormat)?;
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|err| {
        UploadError::Decode {
            message: err.to_string(),
        }
    })?;

    let mime = format.to_mime_type();
    let source = ImageSource::new(format!(
        "data:{mime};base64,{}",
        BASE64_STANDARD.encode(bytes)
    ));
    tracing::debug!(
        mime,
        width = decoded.width(),
        height = decoded.height(),
        "decoded upload"
    );
    Ok(DecodedImage {
        source,
        width: decoded.width(),
        height: decoded.height(),
        mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 87, 51, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encoding should succeed");
        bytes
    }

    #[test]
    fn decode_image_produces_png_data_url_with_dimensions() {
        let decoded = decode_image(&png_bytes(3, 2)).expect("png should decode");
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.mime, "image/png");
        assert!(decoded.source.as_str().starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn decode_image_rejects_empty_input() {
        assert!(matches!(decode_image(&[]), Err(UploadError::Empty)));
    }

    #[test]
    fn decode_image_rejects_non_image_bytes() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(UploadError::UnknownFormat)
        ));
    }

    #[test]
    fn decode_image_reports_truncated_files() {
        let bytes = png_bytes(4, 4);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            decode_image(truncated),
            Err(UploadError::Decode { .. })
        ));
    }
}
