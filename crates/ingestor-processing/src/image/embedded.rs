//! Carry EXIF and ICC data from the uploaded container into the re-encoded one.
//!
//! Pixels are not rotated; the EXIF orientation tag travels with the image so viewers
//! apply it as before.

use bytes::Bytes;
use image::ImageFormat;
use img_parts::{DynImage, ImageEXIF, ImageICC};

/// Embedded metadata segments lifted from an input container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedMetadata {
    pub exif: Option<Bytes>,
    pub icc_profile: Option<Bytes>,
}

impl EmbeddedMetadata {
    pub fn is_empty(&self) -> bool {
        self.exif.is_none() && self.icc_profile.is_none()
    }

    /// Drop an ICC profile whose colour space does not describe the re-encoded pixels.
    ///
    /// JPEG and WebP output is always RGB; PNG output stays grayscale when the input was.
    pub fn for_output(mut self, format: ImageFormat, grayscale: bool) -> Self {
        let expected: &[u8; 4] = match format {
            ImageFormat::Png if grayscale => b"GRAY",
            _ => b"RGB ",
        };

        if let Some(profile) = &self.icc_profile {
            let colour_space = profile.get(16..20);
            if colour_space != Some(&expected[..]) {
                tracing::debug!(
                    colour_space = ?colour_space.map(String::from_utf8_lossy),
                    "Dropping ICC profile that does not match output colour space"
                );
                self.icc_profile = None;
            }
        }
        self
    }
}

/// Read EXIF/ICC from a JPEG, PNG or WebP container. Other formats yield nothing.
pub fn extract(data: &[u8]) -> EmbeddedMetadata {
    match DynImage::from_bytes(Bytes::copy_from_slice(data)) {
        Ok(Some(image)) => EmbeddedMetadata {
            exif: image.exif(),
            icc_profile: image.icc_profile(),
        },
        Ok(None) => EmbeddedMetadata::default(),
        Err(e) => {
            tracing::debug!(error = %e, "Could not read embedded metadata");
            EmbeddedMetadata::default()
        }
    }
}

/// Write EXIF/ICC into an encoded container.
///
/// If the container cannot hold the segments the encoded bytes are returned as they were.
pub fn apply(encoded: Vec<u8>, metadata: &EmbeddedMetadata) -> Vec<u8> {
    if metadata.is_empty() {
        return encoded;
    }

    let encoded = Bytes::from(encoded);
    match DynImage::from_bytes(encoded.clone()) {
        Ok(Some(mut image)) => {
            if metadata.exif.is_some() {
                image.set_exif(metadata.exif.clone());
            }
            if metadata.icc_profile.is_some() {
                image.set_icc_profile(metadata.icc_profile.clone());
            }
            image.encoder().bytes().to_vec()
        }
        Ok(None) => encoded.to_vec(),
        Err(e) => {
            tracing::warn!(error = %e, "Dropping embedded metadata, output container unreadable");
            encoded.to_vec()
        }
    }
}
