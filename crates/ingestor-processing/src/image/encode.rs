//! Format-specific encoders.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageFormat};
use ingestor_core::constants::{JPEG_QUALITY, WEBP_QUALITY};

use crate::error::{classify_message, NormalizeError};

/// Re-encode an image in the given family.
pub fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, NormalizeError> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(img),
        ImageFormat::Png => encode_png(img),
        ImageFormat::WebP => Ok(encode_webp(img)),
        ImageFormat::Gif => encode_gif(img),
        other => Err(NormalizeError::UnsupportedFormat(format!(
            "no encoder for {:?}",
            other
        ))),
    }
}

/// Progressive JPEG using mozjpeg
fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, NormalizeError> {
    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(JPEG_QUALITY as f32);
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);

    let mut comp = comp
        .start_compress(Vec::new())
        .map_err(|e| classify_message(&e.to_string()))?;
    comp.write_scanlines(&rgb_img)
        .map_err(|e| classify_message(&e.to_string()))?;
    comp.finish().map_err(|e| classify_message(&e.to_string()))
}

/// PNG at maximum compression with adaptive filtering
fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, NormalizeError> {
    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Lossy WebP
fn encode_webp(img: &DynamicImage) -> Vec<u8> {
    let (width, height) = img.dimensions();
    let rgba_img = img.to_rgba8();

    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    encoder.encode(WEBP_QUALITY).to_vec()
}

/// Single-frame GIF
fn encode_gif(img: &DynamicImage) -> Result<Vec<u8>, NormalizeError> {
    let mut buffer = Vec::new();
    let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
    rgba.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Gif)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn test_jpeg_is_progressive() {
        let bytes = encode(&gradient(64, 48), ImageFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        // SOF2 marker identifies a progressive frame
        assert!(bytes.windows(2).any(|w| w == [0xFF, 0xC2]));
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_png_round_trips_pixels() {
        let img = gradient(20, 10);
        let bytes = encode(&img, ImageFormat::Png).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_webp_and_gif_encode() {
        let img = gradient(32, 32);
        let webp = encode(&img, ImageFormat::WebP).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");

        let gif = encode(&img, ImageFormat::Gif).unwrap();
        assert_eq!(&gif[..4], b"GIF8");
    }

    #[test]
    fn test_unsupported_family() {
        assert!(matches!(
            encode(&gradient(4, 4), ImageFormat::Bmp),
            Err(NormalizeError::UnsupportedFormat(_))
        ));
    }
}
