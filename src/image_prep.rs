use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader};
use tracing::debug;

use crate::error::SimulationError;
use crate::llm::media::{detect_mime_type, is_supported_image_mime, normalize_image_mime_type};
use crate::llm::InlineImage;

pub const MAX_SOURCE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_DIMENSION: u32 = 1024;
pub const JPEG_QUALITY: u8 = 85;

/// EXIF orientation is applied to the pixels before resizing.
pub fn prepare_source_image(bytes: &[u8]) -> Result<InlineImage, SimulationError> {
    if bytes.is_empty() {
        return Err(SimulationError::InvalidImage("the file is empty".to_string()));
    }
    if bytes.len() > MAX_SOURCE_BYTES {
        return Err(SimulationError::InvalidImage(format!(
            "the file is {} bytes; the limit is 10MB",
            bytes.len()
        )));
    }

    let mime_type = detect_mime_type(bytes)
        .map(|mime| normalize_image_mime_type(&mime))
        .filter(|mime| is_supported_image_mime(mime))
        .ok_or_else(|| SimulationError::InvalidImage("unsupported file type".to_string()))?;

    let decoded = decode_upright(bytes).map_err(|err| {
        SimulationError::InvalidImage(format!("could not decode {mime_type}: {err}"))
    })?;

    let (width, height) = decoded.dimensions();
    let resized = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        decoded.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Triangle)
    } else {
        decoded
    };

    let rgb = resized.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|err| SimulationError::InvalidImage(format!("could not re-encode: {err}")))?;

    debug!(
        "Prepared source image: {} {}x{} ({} bytes) -> image/jpeg {}x{} ({} bytes)",
        mime_type,
        width,
        height,
        bytes.len(),
        rgb.width(),
        rgb.height(),
        encoded.len()
    );

    Ok(InlineImage::new(encoded, "image/jpeg"))
}

fn decode_upright(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut decoded = DynamicImage::from_decoder(decoder)?;
    decoded.apply_orientation(orientation);
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([120, 80, 40]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn downscales_large_images_keeping_aspect_ratio() {
        let prepared = prepare_source_image(&png_bytes(2048, 1024)).unwrap();
        assert_eq!(prepared.mime_type, "image/jpeg");
        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1024, 512));
    }

    #[test]
    fn small_images_keep_their_size_but_become_jpeg() {
        let prepared = prepare_source_image(&png_bytes(300, 400)).unwrap();
        assert_eq!(detect_mime_type(&prepared.bytes).as_deref(), Some("image/jpeg"));
        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (300, 400));
    }

    fn jpeg_with_orientation(width: u32, height: u32, orientation: u8) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([200, 150, 100]));
        let mut plain = Vec::new();
        JpegEncoder::new_with_quality(&mut plain, 90)
            .encode_image(&image)
            .unwrap();

        let mut exif = b"Exif\0\0".to_vec();
        exif.extend_from_slice(b"MM\0*");
        exif.extend_from_slice(&8u32.to_be_bytes());
        exif.extend_from_slice(&1u16.to_be_bytes());
        exif.extend_from_slice(&0x0112u16.to_be_bytes());
        exif.extend_from_slice(&3u16.to_be_bytes());
        exif.extend_from_slice(&1u32.to_be_bytes());
        exif.extend_from_slice(&[0, orientation, 0, 0]);
        exif.extend_from_slice(&0u32.to_be_bytes());

        let mut tagged = plain[..2].to_vec();
        tagged.extend_from_slice(&[0xFF, 0xE1]);
        tagged.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
        tagged.extend_from_slice(&exif);
        tagged.extend_from_slice(&plain[2..]);
        tagged
    }

    #[test]
    fn applies_exif_rotation_before_reencoding() {
        let prepared = prepare_source_image(&jpeg_with_orientation(200, 100, 6)).unwrap();
        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (100, 200));
    }

    #[test]
    fn untagged_jpeg_keeps_its_orientation() {
        let prepared = prepare_source_image(&jpeg_with_orientation(200, 100, 1)).unwrap();
        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (200, 100));
    }

    #[test]
    fn rejects_oversized_empty_and_non_image_input() {
        let oversized = vec![0u8; MAX_SOURCE_BYTES + 1];
        assert!(matches!(
            prepare_source_image(&oversized),
            Err(SimulationError::InvalidImage(_))
        ));
        assert!(matches!(
            prepare_source_image(&[]),
            Err(SimulationError::InvalidImage(_))
        ));
        assert!(matches!(
            prepare_source_image(b"just some text, not a photo"),
            Err(SimulationError::InvalidImage(_))
        ));
    }

    #[test]
    fn rejects_truncated_png() {
        let mut bytes = png_bytes(64, 64);
        bytes.truncate(40);
        assert!(matches!(
            prepare_source_image(&bytes),
            Err(SimulationError::InvalidImage(_))
        ));
    }
}
