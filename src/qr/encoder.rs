//! QR code encoder

use crate::config::EncodingOptions;
use crate::error::{Error, Result};
use image::{DynamicImage, Luma};
use qrcode::QrCode;

/// QR code encoder
///
/// Version (symbol size) is selected automatically from the payload
/// length; error correction, minimum raster dimensions, and the quiet
/// zone come from [`EncodingOptions`].
pub struct QrEncoder {
    ecc_level: qrcode::EcLevel,
    min_size: u32,
    quiet_zone: bool,
}

impl QrEncoder {
    /// Create an encoder from resolved encoding options
    pub fn new(options: &EncodingOptions) -> Self {
        Self {
            ecc_level: options.ecc.into(),
            min_size: options.min_size,
            quiet_zone: options.quiet_zone,
        }
    }

    /// Encode a link string into a QR code image
    pub fn encode_str(&self, data: &str) -> Result<DynamicImage> {
        let code = QrCode::with_error_correction_level(data, self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .quiet_zone(self.quiet_zone)
            .build();

        Ok(DynamicImage::ImageLuma8(image))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(&EncodingOptions::default())
    }
}
