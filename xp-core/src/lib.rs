//! Reading and writing layered `.xp` tile images.
//!
//! A file is a gzip envelope around a little-endian payload: version,
//! layer count, then each layer's size followed by its pixel records in
//! column-major order.
//!
//! ```ignore
//! let image = xp_core::load("art.xp")?;
//! let flat = image.merge_layers(xp_core::LayerSelection::All)?;
//! ```

pub mod compress;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod image;
pub mod layer;
pub mod options;

use std::fs;
use std::path::Path;

use anyhow::Context;

pub use decode::{decode, decode_raw};
pub use encode::{encode, encode_raw};
pub use error::{Result, XpError};
pub use format::{Color, Pixel};
pub use image::{Image, LayerSelection};
pub use layer::Layer;
pub use options::{DecoderOptions, EncoderOptions, DEFAULT_MAX_LAYERS, DEFAULT_MAX_LAYER_AREA};

/// Read and decode an `.xp` file.
pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Image> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode(&data).with_context(|| format!("failed to decode {}", path.display()))
}

/// Encode an image and write it to `path`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, image: &Image) -> anyhow::Result<()> {
    let path = path.as_ref();
    let data = encode(image).with_context(|| format!("failed to encode {}", path.display()))?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use crate::compress;
    use crate::format::*;
    use crate::image::Image;
    use crate::{decode, encode, load, save};

    #[test]
    fn roundtrip_multi_layer_image() {
        let mut image = Image::new(0xffff_ffff);
        let bottom = image.add_layer(4, 3);
        let top = image.add_layer(4, 3);
        for y in 0..3i64 {
            for x in 0..4i64 {
                let v = (x * 3 + y) as u8;
                let p = Pixel::new(v as u32 + 200, Color::new(v, v + 10, v + 20), Color::new(v + 30, 0, 9));
                assert!(image.set(bottom, x, y, &p));
            }
        }
        image.layer_mut(top).unwrap().fill_transparent();
        image.set(top, 1, 2, &Pixel::new(1000, Color::WHITE, Color::BLACK));

        let decoded = decode(&encode(&image).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn decode_single_pixel_stream() {
        let mut raw = Vec::new();
        for word in [0u32, 1, 1, 1, 1] {
            raw.extend_from_slice(&word.to_le_bytes());
        }
        raw.extend_from_slice(&[255, 255, 255, 0, 0, 0]);
        let image = decode(&compress::compress(&raw, 6).unwrap()).unwrap();
        let p = image.get(0, 0, 0).unwrap();
        assert_eq!(p, &Pixel::new(1, Color::WHITE, Color::BLACK));
        assert!(!p.transparent());
    }

    #[test]
    fn load_and_save_files() {
        let path = std::env::temp_dir().join(format!("xp-core-{}.xp", std::process::id()));
        let mut image = Image::new(1);
        let l = image.add_layer(2, 2);
        image.layer_mut(l).unwrap().fill(&Pixel::new(65, Color::WHITE, Color::new(0, 0, 128)));
        save(&path, &image).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, image);

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
