//! Rectangle regions within a grid

/// Axis-aligned rectangle in grid cells
///
/// `(x, y)` is the top-left cell; the box covers `w` columns and `h` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        GridBox { x, y, w, h }
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Length of the longer side
    #[inline]
    pub fn longer_side(&self) -> u32 {
        self.w.max(self.h)
    }

    /// Width / height
    pub fn aspect_ratio(&self) -> f32 {
        self.w as f32 / (self.h.max(1)) as f32
    }

    /// Center in continuous cell coordinates (cell centers at +0.5)
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Whether the cell (x, y) lies inside the box
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_edges() {
        let b = GridBox::new(2, 3, 4, 8);
        assert_eq!(b.right(), 6);
        assert_eq!(b.bottom(), 11);
        assert_eq!(b.longer_side(), 8);
        assert!((b.aspect_ratio() - 0.5).abs() < 1e-6);
        assert_eq!(b.center(), (4.0, 7.0));
        assert!(b.contains(5, 10));
        assert!(!b.contains(6, 10));
    }
}
