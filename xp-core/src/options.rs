use crate::format::{Pixel, IMAGE_HEADER_SIZE, LAYER_HEADER_SIZE};

/// Default cap on the number of layers a stream may declare.
pub const DEFAULT_MAX_LAYERS: usize = 1024;
/// Default cap on `width * height` of one layer (a 4096x4096 canvas).
/// Larger canvases need `DecoderOptions::set_max_layer_area`.
pub const DEFAULT_MAX_LAYER_AREA: usize = 1 << 24;

/// Limits applied while decoding untrusted streams
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    max_layers: usize,
    max_layer_area: usize,
}

impl Default for DecoderOptions {
    /// `DEFAULT_MAX_LAYERS` layers of at most `DEFAULT_MAX_LAYER_AREA` cells.
    /// Streams declaring more fail with `LimitExceeded`.
    fn default() -> Self {
        Self {
            max_layers: DEFAULT_MAX_LAYERS,
            max_layer_area: DEFAULT_MAX_LAYER_AREA,
        }
    }
}

impl DecoderOptions {
    /// Maximum number of layers a stream may declare
    pub const fn get_max_layers(&self) -> usize {
        self.max_layers
    }

    /// Maximum `width * height` of any single layer
    pub const fn get_max_layer_area(&self) -> usize {
        self.max_layer_area
    }

    /// Largest decompressed payload the limits allow: the image header plus
    /// `max_layers` layers of `max_layer_area` cells each.
    pub fn get_max_payload_size(&self) -> usize {
        let layer = self
            .max_layer_area
            .saturating_mul(Pixel::SIZE)
            .saturating_add(LAYER_HEADER_SIZE);
        self.max_layers
            .saturating_mul(layer)
            .saturating_add(IMAGE_HEADER_SIZE)
    }

    pub fn set_max_layers(mut self, max_layers: usize) -> Self {
        self.max_layers = max_layers;
        self
    }

    pub fn set_max_layer_area(mut self, max_layer_area: usize) -> Self {
        self.max_layer_area = max_layer_area;
        self
    }
}

/// Options for the gzip envelope written by the encoder
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    compression_level: u32,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            compression_level: 6,
        }
    }
}

impl EncoderOptions {
    /// Deflate level, 0 (store) to 9 (smallest)
    pub const fn get_compression_level(&self) -> u32 {
        self.compression_level
    }

    /// Set the deflate level; values above 9 are clamped
    pub fn set_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_level_is_clamped() {
        let opts = EncoderOptions::default().set_compression_level(42);
        assert_eq!(opts.get_compression_level(), 9);
        assert_eq!(EncoderOptions::default().get_compression_level(), 6);
    }

    #[test]
    fn decoder_limits_builder() {
        let opts = DecoderOptions::default()
            .set_max_layers(2)
            .set_max_layer_area(16);
        assert_eq!(opts.get_max_layers(), 2);
        assert_eq!(opts.get_max_layer_area(), 16);
        assert_eq!(opts.get_max_payload_size(), 8 + 2 * (8 + 160));
    }

    #[test]
    fn payload_budget_saturates() {
        let opts = DecoderOptions::default().set_max_layers(usize::MAX);
        assert_eq!(opts.get_max_payload_size(), usize::MAX);
        let none = DecoderOptions::default().set_max_layers(0);
        assert_eq!(none.get_max_payload_size(), 8);
    }
}
