use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbImage};
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};

use super::error::ImageError;

/// Source formats accepted for upload, judged by content rather than filename.
pub const ALLOWED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Gif,
];

/// Largest width or height a JPEG can carry.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// An upload decoded, turned upright and flattened to 8-bit RGB.
pub struct DecodedImage {
    pub format: ImageFormat,
    pub pixels: RgbImage,
}

/// A web-ready JPEG re-encoding of an upload.
pub struct NormalizedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub source_format: ImageFormat,
}

/// Decode `data`, check its format against [`ALLOWED_FORMATS`], apply the
/// EXIF orientation and convert to RGB.
///
/// The format check runs only once decoding succeeded, so corrupt data is
/// always `InvalidImage` even when its header names a disallowed format.
pub fn decode(data: &[u8]) -> Result<DecodedImage, ImageError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::InvalidImage(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| ImageError::InvalidImage("unrecognized image data".into()))?;

    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::InvalidImageFormat(
            format!("{format:?}").to_uppercase(),
        ));
    }

    image.apply_orientation(orientation);
    if image.width() > MAX_DIMENSION || image.height() > MAX_DIMENSION {
        return Err(ImageError::InvalidImage(format!(
            "{}x{} exceeds the {MAX_DIMENSION} pixel JPEG limit",
            image.width(),
            image.height()
        )));
    }
    Ok(DecodedImage {
        format,
        pixels: image.into_rgb8(),
    })
}

/// Encode RGB pixels as a progressive JPEG with optimized Huffman tables and
/// no chroma subsampling.
pub fn encode_jpeg(pixels: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let width = u16::try_from(pixels.width()).map_err(|_| {
        ImageError::Encoding(format!("width {} exceeds the JPEG limit", pixels.width()))
    })?;
    let height = u16::try_from(pixels.height()).map_err(|_| {
        ImageError::Encoding(format!("height {} exceeds the JPEG limit", pixels.height()))
    })?;

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, quality.clamp(1, 100));
    encoder.set_progressive(true);
    encoder.set_optimized_huffman_tables(true);
    encoder.set_sampling_factor(SamplingFactor::R_4_4_4);
    encoder
        .encode(pixels.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| ImageError::Encoding(e.to_string()))?;

    Ok(out)
}

/// Full normalization of one upload. CPU-bound; run it off the async executor.
pub fn normalize(data: &[u8], quality: u8) -> Result<NormalizedImage, ImageError> {
    let decoded = decode(data)?;
    let jpeg = encode_jpeg(&decoded.pixels, quality)?;
    Ok(NormalizedImage {
        jpeg,
        width: decoded.pixels.width(),
        height: decoded.pixels.height(),
        source_format: decoded.format,
    })
}
