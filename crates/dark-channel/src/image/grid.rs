//! Single channel scalar grid (dark channel and transmission maps).

use crate::api::DehazeError;

/// An M x N grid of `f64` scalars stored row-major.
///
/// Used for the dark channel and for raw, clamped and refined transmission
/// maps. Every grid produced by the pipeline has the shape of its source
/// image.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Build a grid from row-major values.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self, DehazeError> {
        if width == 0 || height == 0 {
            return Err(DehazeError::Shape(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if data.len() != width * height {
            return Err(DehazeError::Shape(format!(
                "expected {} values for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid where every cell holds `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, DehazeError> {
        Self::new(width, height, vec![value; width * height])
    }

    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Values in row-major order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Value at row `y`, column `x`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> f64 {
        assert!(y < self.height && x < self.width, "cell out of bounds");
        self.data[y * self.width + x]
    }

    /// Smallest and largest value.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Apply `f` to every cell, producing a new grid.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_parts(
            self.width,
            self.height,
            self.data.iter().map(|&v| f(v)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_length() {
        assert!(matches!(
            Grid::new(3, 3, vec![0.0; 8]),
            Err(DehazeError::Shape(_))
        ));
    }

    #[test]
    fn test_get_is_row_major() {
        let grid = Grid::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(grid.get(0, 2), 2.0);
        assert_eq!(grid.get(1, 0), 3.0);
    }

    #[test]
    fn test_map_and_min_max() {
        let grid = Grid::new(2, 2, vec![0.1, 0.5, -0.3, 0.9]).unwrap();
        assert_eq!(grid.min_max(), (-0.3, 0.9));
        let doubled = grid.map(|v| v * 2.0);
        assert_eq!(doubled.values(), &[0.2, 1.0, -0.6, 1.8]);
    }
}
