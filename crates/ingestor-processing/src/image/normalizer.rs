use std::io::Cursor;
use std::time::Instant;

use bytes::Bytes;
use image::{GenericImageView, ImageFormat, ImageReader};
use ingestor_core::constants::MAX_IMAGE_DIMENSION;

use super::{embedded, encode, resize};
use crate::error::NormalizeError;
use crate::sniff::SniffedFormat;

/// Output of a successful normalization
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    pub format: SniffedFormat,
}

/// Decode, bound and re-encode an image on the blocking pool.
pub async fn normalize(
    data: Vec<u8>,
    format: SniffedFormat,
) -> Result<NormalizedImage, NormalizeError> {
    // Image decode is CPU-bound; run off the async pool to avoid blocking other tasks.
    tokio::task::spawn_blocking(move || normalize_blocking(&data, format))
        .await
        .map_err(|e| NormalizeError::Other(format!("image task failed: {}", e)))?
}

/// Synchronous normalization pipeline.
pub fn normalize_blocking(
    data: &[u8],
    format: SniffedFormat,
) -> Result<NormalizedImage, NormalizeError> {
    let start = Instant::now();

    let image_format = ImageFormat::from_mime_type(format.mime_type).ok_or_else(|| {
        NormalizeError::UnsupportedFormat(format!("no codec for {}", format.mime_type))
    })?;

    if image_format == ImageFormat::Jpeg {
        ensure_jpeg_complete(data)?;
    }

    let img = ImageReader::with_format(Cursor::new(data), image_format).decode()?;
    let (orig_width, orig_height) = img.dimensions();
    let grayscale = !img.color().has_color();

    let img = resize::fit_within(img, MAX_IMAGE_DIMENSION);
    let (width, height) = img.dimensions();

    let encoded = encode::encode(&img, image_format)?;
    let metadata = embedded::extract(data).for_output(image_format, grayscale);
    let output = embedded::apply(encoded, &metadata);

    tracing::debug!(
        mime_type = format.mime_type,
        orig_width,
        orig_height,
        width,
        height,
        input_bytes = data.len(),
        output_bytes = output.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Image normalized"
    );

    Ok(NormalizedImage {
        bytes: Bytes::from(output),
        width,
        height,
        format,
    })
}

/// The JPEG decoder fills in a scan that stops early, so a stream without an
/// end-of-image marker is rejected up front. Trailing padding after the marker is allowed.
fn ensure_jpeg_complete(data: &[u8]) -> Result<(), NormalizeError> {
    let end = data
        .iter()
        .rposition(|&b| !matches!(b, 0x00 | b'\r' | b'\n' | b' '))
        .map_or(0, |i| i + 1);

    if data[..end].ends_with(&[0xFF, 0xD9]) {
        Ok(())
    } else {
        Err(NormalizeError::CorruptInput(
            "premature end of JPEG input".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::sniff_format;
    use image::{DynamicImage, Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        }));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_large_png_is_bounded() {
        let data = encoded(3000, 1500, ImageFormat::Png);
        let format = sniff_format(&data).unwrap();

        let out = normalize(data, format).await.unwrap();
        assert_eq!((out.width, out.height), (2500, 1250));
        assert_eq!(out.format.extension, "png");

        let decoded = image::load_from_memory_with_format(&out.bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (2500, 1250));
    }

    #[tokio::test]
    async fn test_small_jpeg_keeps_dimensions() {
        let data = encoded(640, 480, ImageFormat::Jpeg);
        let format = sniff_format(&data).unwrap();

        let out = normalize(data, format).await.unwrap();
        assert_eq!((out.width, out.height), (640, 480));
        assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_gif_keeps_family() {
        let data = encoded(50, 40, ImageFormat::Gif);
        let format = sniff_format(&data).unwrap();

        let out = normalize(data, format).await.unwrap();
        assert_eq!(out.format.mime_type, "image/gif");
        assert_eq!(&out.bytes[..4], b"GIF8");
        assert_eq!((out.width, out.height), (50, 40));
    }

    #[test]
    fn test_truncated_png_is_corrupt() {
        let mut data = encoded(64, 64, ImageFormat::Png);
        data.truncate(60);
        let format = sniff_format(&data).unwrap();

        let err = normalize_blocking(&data, format).unwrap_err();
        assert!(err.is_client_error(), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_jpeg_signature_with_garbage_is_corrupt() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
        data.extend(std::iter::repeat(0x5A).take(200));
        let format = sniff_format(&data).unwrap();

        let err = normalize_blocking(&data, format).unwrap_err();
        assert!(err.is_client_error(), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_truncated_jpeg_is_corrupt() {
        let mut data = encoded(200, 200, ImageFormat::Jpeg);
        data.truncate(data.len() / 2);
        let format = sniff_format(&data).unwrap();

        let err = normalize_blocking(&data, format).unwrap_err();
        assert!(
            matches!(err, NormalizeError::CorruptInput(ref msg) if msg.contains("premature end")),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_jpeg_with_trailing_padding_is_accepted() {
        let mut data = encoded(32, 32, ImageFormat::Jpeg);
        data.extend_from_slice(&[0x00, 0x00, b'\n']);
        let format = sniff_format(&data).unwrap();

        let out = normalize_blocking(&data, format).unwrap();
        assert_eq!((out.width, out.height), (32, 32));
    }

    #[test]
    fn test_format_without_codec_is_unsupported() {
        let format = SniffedFormat {
            extension: "bmp",
            mime_type: "image/bmp",
        };
        let err = normalize_blocking(b"BM\0\0\0\0", format).unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedFormat(_)));
    }
}
