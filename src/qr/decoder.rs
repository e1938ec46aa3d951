//! QR code decoder using rqrr
//!
//! Only used when `--verify` is enabled and by the test suite; the
//! generator itself never reads artifacts back.

use crate::error::{Error, Result};
use image::DynamicImage;

/// QR code decoder
pub struct QrDecoder {
    // Configuration could go here (e.g., detection parameters)
}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode the first QR code found in an image and return its text payload
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        let gray = img.to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(gray);

        let grids = prepared.detect_grids();
        let grid = grids
            .first()
            .ok_or_else(|| Error::QrDecode("No QR code found in image".to_string()))?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
