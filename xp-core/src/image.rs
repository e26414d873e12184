use std::str::FromStr;

use crate::error::{Result, XpError};
use crate::format::Pixel;
use crate::layer::Layer;

/// Which layers to composite, and in what order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerSelection {
    /// Every layer, ascending index order.
    All,
    Single(usize),
    /// Explicit paint order; later entries paint over earlier ones.
    List(Vec<usize>),
}

impl LayerSelection {
    /// Resolve to the indices that exist in an image with `count` layers,
    /// keeping the requested order.
    pub fn resolve(&self, count: usize) -> Vec<usize> {
        match self {
            LayerSelection::All => (0..count).collect(),
            LayerSelection::Single(i) if *i < count => vec![*i],
            LayerSelection::Single(_) => Vec::new(),
            LayerSelection::List(v) => v.iter().copied().filter(|&i| i < count).collect(),
        }
    }
}

impl From<usize> for LayerSelection {
    fn from(i: usize) -> Self {
        LayerSelection::Single(i)
    }
}

impl From<Vec<usize>> for LayerSelection {
    fn from(v: Vec<usize>) -> Self {
        LayerSelection::List(v)
    }
}

impl From<&[usize]> for LayerSelection {
    fn from(v: &[usize]) -> Self {
        LayerSelection::List(v.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for LayerSelection {
    fn from(v: [usize; N]) -> Self {
        LayerSelection::List(v.to_vec())
    }
}

impl FromStr for LayerSelection {
    type Err = XpError;

    /// Accepts `all`, a single index, or a comma-separated index list.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(LayerSelection::All);
        }
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| XpError::Validation(format!("not a layer index: {part:?}")))
        };
        if s.contains(',') {
            s.split(',').map(parse).collect::<Result<Vec<_>>>().map(LayerSelection::List)
        } else {
            parse(s).map(LayerSelection::Single)
        }
    }
}

/// A stack of layers plus the file's version tag.
///
/// The version is carried through decode and encode untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    version: u32,
    layers: Vec<Layer>,
}

impl Image {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            layers: Vec::new(),
        }
    }

    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Width of layer 0, if there is one.
    pub fn width(&self) -> Option<u32> {
        self.layers.first().map(Layer::width)
    }

    /// Height of layer 0, if there is one.
    pub fn height(&self) -> Option<u32> {
        self.layers.first().map(Layer::height)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Append a layer on top of the stack and return its index.
    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Append an unset layer of the given size and return its index.
    pub fn add_layer(&mut self, width: u32, height: u32) -> usize {
        self.push_layer(Layer::new(width, height))
    }

    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        (index < self.layers.len()).then(|| self.layers.remove(index))
    }

    pub fn get(&self, layer: usize, x: i64, y: i64) -> Option<&Pixel> {
        self.layers.get(layer)?.get(x, y)
    }

    pub fn set(&mut self, layer: usize, x: i64, y: i64, pixel: &Pixel) -> bool {
        match self.layers.get_mut(layer) {
            Some(l) => l.set(x, y, pixel),
            None => false,
        }
    }

    /// Flatten the selected layers into one.
    ///
    /// Layers are painted in selection order. A source pixel lands when the
    /// result slot is still unset or when the source is opaque, so
    /// transparent pixels only show through. Unset source slots write
    /// nothing. Every selected layer must have layer 0's dimensions.
    pub fn merge_layers(&self, selection: impl Into<LayerSelection>) -> Result<Layer> {
        let order = selection.into().resolve(self.layers.len());
        let (width, height) = match (self.width(), self.height()) {
            (Some(w), Some(h)) if !order.is_empty() => (w, h),
            _ => return Err(XpError::NoLayersToMerge),
        };

        for &index in &order {
            let layer = &self.layers[index];
            if (layer.width(), layer.height()) != (width, height) {
                return Err(XpError::LayerSizeMismatch {
                    index,
                    expected: (width, height),
                    actual: (layer.width(), layer.height()),
                });
            }
        }

        let mut merged = Layer::new(width, height);
        for &index in &order {
            for (x, y, source) in self.layers[index].iter() {
                let Some(source) = source else { continue };
                let (x, y) = (x as i64, y as i64);
                if !merged.is_set(x, y) || !source.transparent() {
                    merged.set(x, y, source);
                }
            }
        }

        log::debug!("merged layers {order:?} into {width}x{height} layer");
        Ok(merged)
    }
}
