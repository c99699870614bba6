//! Binary file-type detection.
//!
//! The declared `contentType` of a request is never consulted: only the magic bytes decide
//! the stored content type and the key extension.

use infer::MatcherType;
use ingestor_core::AppError;
use thiserror::Error;

/// Format identified from the leading bytes of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffedFormat {
    pub extension: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SniffError {
    #[error("no file signature recognised")]
    Unrecognised,

    #[error("signature {mime_type} is not an image")]
    NotAnImage { mime_type: &'static str },
}

/// Identify an image format from its signature.
pub fn sniff_format(bytes: &[u8]) -> Result<SniffedFormat, SniffError> {
    let kind = infer::get(bytes).ok_or(SniffError::Unrecognised)?;

    if kind.matcher_type() != MatcherType::Image {
        return Err(SniffError::NotAnImage {
            mime_type: kind.mime_type(),
        });
    }

    Ok(SniffedFormat {
        extension: kind.extension(),
        mime_type: kind.mime_type(),
    })
}

impl From<SniffError> for AppError {
    fn from(_: SniffError) -> Self {
        AppError::UnrecognisedFileType
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_png_signature() {
        let format = sniff_format(PNG_SIGNATURE).unwrap();
        assert_eq!(format.extension, "png");
        assert_eq!(format.mime_type, "image/png");
    }

    #[test]
    fn test_jpeg_signature() {
        let format = sniff_format(JPEG_SIGNATURE).unwrap();
        assert_eq!(format.extension, "jpg");
        assert_eq!(format.mime_type, "image/jpeg");
    }

    #[test]
    fn test_gif_signature() {
        let format = sniff_format(b"GIF89a\x01\x00\x01\x00").unwrap();
        assert_eq!(format.mime_type, "image/gif");
    }

    #[test]
    fn test_text_is_unrecognised() {
        assert_eq!(
            sniff_format(b"just some plain utf-8 text"),
            Err(SniffError::Unrecognised)
        );
    }

    #[test]
    fn test_pdf_is_not_an_image() {
        let err = sniff_format(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3").unwrap_err();
        assert_eq!(
            err,
            SniffError::NotAnImage {
                mime_type: "application/pdf"
            }
        );
        assert!(matches!(AppError::from(err), AppError::UnrecognisedFileType));
    }

    #[test]
    fn test_declared_type_is_irrelevant() {
        // A zip archive is rejected no matter what the caller claims it is
        assert!(sniff_format(b"PK\x03\x04\x14\x00\x00\x00").is_err());
    }
}
