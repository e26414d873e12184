use crate::format::Pixel;

/// A fixed-size grid of pixel slots, addressed `x + width * y`.
///
/// Slots start unset. Coordinates are signed so callers can probe past the
/// edges; anything outside the grid reads as `None` and refuses writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    width: u32,
    height: u32,
    pixels: Vec<Option<Pixel>>,
}

impl Layer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![None; len],
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of slots, set or not.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn verify_coordinates(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(x as usize + self.width as usize * y as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<&Pixel> {
        self.index(x, y).and_then(|i| self.pixels[i].as_ref())
    }

    pub fn is_set(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_some()
    }

    /// Store a copy of `pixel`. Returns false, leaving the layer untouched,
    /// when the coordinates are outside the grid.
    pub fn set(&mut self, x: i64, y: i64, pixel: &Pixel) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = Some(*pixel);
                true
            }
            None => false,
        }
    }

    /// Unset a slot. Returns false when the coordinates are outside the grid.
    pub fn clear(&mut self, x: i64, y: i64) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = None;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, pixel: &Pixel) {
        self.pixels.iter_mut().for_each(|slot| *slot = Some(*pixel));
    }

    pub fn fill_transparent(&mut self) {
        self.fill(&Pixel::TRANSPARENT);
    }

    /// Every slot as `(x, y, pixel)` in raster order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Option<&Pixel>)> + '_ {
        let width = self.width.max(1) as usize;
        self.pixels.iter().enumerate().map(move |(i, slot)| {
            ((i % width) as u32, (i / width) as u32, slot.as_ref())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Color;

    #[test]
    fn new_layer_is_unset() {
        let layer = Layer::new(4, 2);
        assert_eq!(layer.len(), 8);
        assert!(layer.iter().all(|(_, _, p)| p.is_none()));
        assert_eq!(layer.get(0, 0), None);
    }

    #[test]
    fn out_of_bounds_probes() {
        let mut layer = Layer::new(3, 3);
        layer.fill_transparent();
        assert_eq!(layer.get(3, 0), None);
        assert_eq!(layer.get(-1, 0), None);
        assert_eq!(layer.get(0, 3), None);
        assert!(layer.get(2, 2).is_some());
        assert!(!layer.verify_coordinates(0, -1));
        assert!(layer.verify_coordinates(2, 0));
    }

    #[test]
    fn failed_set_leaves_layer_unchanged() {
        let mut layer = Layer::new(2, 2);
        let before = layer.clone();
        let p = Pixel::new(1, Color::WHITE, Color::BLACK);
        assert!(!layer.set(2, 0, &p));
        assert!(!layer.set(0, -5, &p));
        assert_eq!(layer, before);
    }

    #[test]
    fn set_stores_an_independent_copy() {
        let mut layer = Layer::new(2, 2);
        let mut p = Pixel::new(1, Color::WHITE, Color::BLACK);
        assert!(layer.set(1, 0, &p));
        p = p.with_glyph(2);
        assert_eq!(layer.get(1, 0).map(Pixel::glyph), Some(1));
        assert_eq!(p.glyph(), 2);
    }

    #[test]
    fn row_major_addressing() {
        let mut layer = Layer::new(3, 2);
        let p = Pixel::new(9, Color::WHITE, Color::BLACK);
        layer.set(2, 1, &p);
        let hits: Vec<_> = layer
            .iter()
            .filter_map(|(x, y, px)| px.map(|_| (x, y)))
            .collect();
        assert_eq!(hits, vec![(2, 1)]);
        assert!(layer.clear(2, 1));
        assert!(!layer.is_set(2, 1));
    }

    #[test]
    fn clone_is_deep() {
        let mut a = Layer::new(2, 1);
        a.fill(&Pixel::new(7, Color::WHITE, Color::BLACK));
        let b = a.clone();
        a.set(0, 0, &Pixel::TRANSPARENT);
        assert_eq!(b.get(0, 0).map(Pixel::glyph), Some(7));
    }
}
