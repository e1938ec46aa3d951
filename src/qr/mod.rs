//! QR code encoding and decoding
//!
//! Encoding turns a link string into a grayscale raster image ready to be
//! written as a PNG artifact. Decoding exists for the post-write
//! verification pass and for tests.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;
