//! Image decoding and binarization.
//!
//! Accepts raw image bytes (PGM/PNM, plus PNG for tests and tooling)
//! and produces a binary image where foreground is 255 and background
//! is 0, ready for connected-component labeling.

use image::GrayImage;

use crate::types::AnalysisError;

/// Decode raw image bytes and binarize by threshold.
///
/// Pixels with a grayscale value strictly greater than `threshold`
/// become foreground (255); everything else becomes background (0).
/// The default threshold of 1 reproduces the original drivers, which
/// populate the digital set from the value range (1, 255].
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if `bytes` is empty.
/// Returns [`AnalysisError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_and_binarize(bytes: &[u8], threshold: u8) -> Result<GrayImage, AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut gray = image::load_from_memory(bytes)?.to_luma8();
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 255 } else { 0 };
    }
    Ok(gray)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Helper: encode a grayscale image as a binary-format PGM buffer.
    fn encode_pgm(img: &GrayImage) -> Vec<u8> {
        use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};

        let mut buf = Vec::new();
        let encoder = PnmEncoder::new(&mut buf)
            .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        let result = decode_and_binarize(&[], 1);
        assert!(matches!(result, Err(AnalysisError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode_and_binarize(&[0xFF, 0xFE, 0x00, 0x01], 1);
        assert!(matches!(result, Err(AnalysisError::ImageDecode(_))));
    }

    #[test]
    fn pgm_round_trips_with_binarization() {
        let img = GrayImage::from_fn(4, 3, |x, _| image::Luma([if x < 2 { 0 } else { 255 }]));
        let bytes = encode_pgm(&img);

        let binary = decode_and_binarize(&bytes, 1).unwrap();
        assert_eq!(binary.dimensions(), (4, 3));
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
        assert_eq!(binary.get_pixel(3, 2).0[0], 255);
    }

    #[test]
    fn threshold_is_strict() {
        // A pixel exactly at the threshold is background.
        let img = GrayImage::from_fn(2, 1, |x, _| image::Luma([if x == 0 { 1 } else { 2 }]));
        let bytes = encode_pgm(&img);

        let binary = decode_and_binarize(&bytes, 1).unwrap();
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
        assert_eq!(binary.get_pixel(1, 0).0[0], 255);
    }
}
