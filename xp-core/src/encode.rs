use std::io::Write;

use crate::compress;
use crate::error::{Result, XpError};
use crate::format::*;
use crate::image::Image;
use crate::layer::Layer;
use crate::options::EncoderOptions;

/// Exact size of the uncompressed payload for `image`.
pub fn encoded_size(image: &Image) -> usize {
    image.layers().iter().fold(IMAGE_HEADER_SIZE, |acc, layer| {
        acc + LAYER_HEADER_SIZE + Pixel::SIZE * layer.len()
    })
}

/// Serialize and gzip an image.
pub fn encode(image: &Image) -> Result<Vec<u8>> {
    encode_with_options(image, EncoderOptions::default())
}

pub fn encode_with_options(image: &Image, options: EncoderOptions) -> Result<Vec<u8>> {
    let raw = encode_raw(image)?;
    let packed = compress::compress(&raw, options.get_compression_level())?;
    log::debug!(
        "encoded {} layers: {} bytes raw, {} bytes compressed",
        image.layer_count(),
        raw.len(),
        packed.len()
    );
    Ok(packed)
}

/// Encode an image and write the compressed stream to `writer`.
pub fn encode_to<W: Write>(mut writer: W, image: &Image) -> Result<W> {
    writer.write_all(&encode(image)?)?;
    writer.flush()?;
    Ok(writer)
}

/// Serialize without compression.
///
/// Unset slots are written as `Pixel::TRANSPARENT`.
pub fn encode_raw(image: &Image) -> Result<Vec<u8>> {
    let expected = encoded_size(image);
    let layer_count = u32::try_from(image.layer_count())
        .map_err(|_| XpError::Validation(format!("{} layers do not fit the header", image.layer_count())))?;

    let mut raw = Vec::with_capacity(expected);
    raw.extend_from_slice(&image.version().to_le_bytes());
    raw.extend_from_slice(&layer_count.to_le_bytes());
    for layer in image.layers() {
        write_layer(&mut raw, layer);
    }

    if raw.len() != expected {
        return Err(XpError::InternalConsistency {
            expected,
            actual: raw.len(),
        });
    }
    Ok(raw)
}

fn write_layer(raw: &mut Vec<u8>, layer: &Layer) {
    raw.extend_from_slice(&layer.width().to_le_bytes());
    raw.extend_from_slice(&layer.height().to_le_bytes());
    // Column-major on the wire: x outer, y inner.
    for x in 0..layer.width() as i64 {
        for y in 0..layer.height() as i64 {
            let pixel = layer.get(x, y).unwrap_or(&Pixel::TRANSPARENT);
            raw.extend_from_slice(&pixel.to_bytes());
        }
    }
}
