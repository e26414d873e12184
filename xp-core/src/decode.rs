use std::io::Read;

use crate::compress;
use crate::error::{Result, XpError};
use crate::format::*;
use crate::image::Image;
use crate::layer::Layer;
use crate::options::DecoderOptions;

/// Bounds-checked little-endian cursor over a decompressed payload.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(XpError::format(
                self.pos,
                format!("need {n} bytes for {what}, {} left", self.remaining()),
            ));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Decompress and parse a complete `.xp` stream.
pub fn decode(data: &[u8]) -> Result<Image> {
    decode_with_options(data, DecoderOptions::default())
}

pub fn decode_with_options(data: &[u8], options: DecoderOptions) -> Result<Image> {
    let raw = compress::decompress_limited(data, options.get_max_payload_size())?;
    decode_raw_with_options(&raw, options)
}

/// Read a compressed stream to the end and decode it.
pub fn decode_from<R: Read>(mut reader: R) -> Result<Image> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data)
}

/// Parse an already decompressed payload.
pub fn decode_raw(raw: &[u8]) -> Result<Image> {
    decode_raw_with_options(raw, DecoderOptions::default())
}

pub fn decode_raw_with_options(raw: &[u8], options: DecoderOptions) -> Result<Image> {
    let mut reader = ByteReader::new(raw);
    let version = reader.read_u32("format version")?;
    let layer_count = reader.read_u32("layer count")? as usize;
    if layer_count > options.get_max_layers() {
        return Err(XpError::LimitExceeded {
            what: "layer count",
            actual: layer_count,
            max: options.get_max_layers(),
        });
    }

    let mut image = Image::new(version);
    for index in 0..layer_count {
        let layer = read_layer(&mut reader, &options)?;
        log::trace!(
            "layer {index}: {}x{} at byte {}",
            layer.width(),
            layer.height(),
            reader.pos
        );
        image.push_layer(layer);
    }

    if reader.remaining() > 0 {
        log::warn!(
            "ignoring {} trailing bytes after {} layers",
            reader.remaining(),
            layer_count
        );
    }
    log::debug!(
        "decoded image version {version} with {layer_count} layers from {} bytes",
        raw.len()
    );
    Ok(image)
}

fn read_layer(reader: &mut ByteReader<'_>, options: &DecoderOptions) -> Result<Layer> {
    let width = reader.read_u32("layer width")?;
    let height = reader.read_u32("layer height")?;
    let body_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|area| area.checked_mul(Pixel::SIZE))
        .ok_or_else(|| XpError::format(reader.pos, format!("layer size {width}x{height} overflows")))?;
    // A layer must be present in full before its size is weighed against the limits.
    let body = reader.take(body_len, "pixel records")?;
    let area = body_len / Pixel::SIZE;
    if area > options.get_max_layer_area() {
        return Err(XpError::LimitExceeded {
            what: "layer area",
            actual: area,
            max: options.get_max_layer_area(),
        });
    }

    // Records run column by column: x outer, y inner.
    let mut layer = Layer::new(width, height);
    let mut records = body.chunks_exact(Pixel::SIZE);
    for x in 0..width as i64 {
        for y in 0..height as i64 {
            if let Some(record) = records.next() {
                layer.set(x, y, &Pixel::from_bytes(record));
            }
        }
    }
    Ok(layer)
}
