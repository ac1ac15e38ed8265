/// Row-major 2D array of cell values, `cols` wide and `rows` tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cols: u32,
    rows: u32,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Wraps `cells` as a grid. Returns `None` when a dimension is zero or the
    /// cell count does not equal `cols * rows`.
    pub fn from_raw(cols: u32, rows: u32, cells: Vec<T>) -> Option<Self> {
        if cols == 0 || rows == 0 || cells.len() != cols as usize * rows as usize {
            return None;
        }
        Some(Self { cols, rows, cells })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn get(&self, x: u32, y: u32) -> T {
        self.cells[(y * self.cols + x) as usize]
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact(self.cols as usize)
    }

    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            cols: self.cols,
            rows: self.rows,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

impl<T: Copy + Ord> Grid<T> {
    /// Smallest and largest cell value.
    pub fn min_max(&self) -> (T, T) {
        let mut min = self.cells[0];
        let mut max = self.cells[0];
        for &v in &self.cells[1..] {
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_shape() {
        assert!(Grid::from_raw(2, 2, vec![1u8, 2, 3, 4]).is_some());
        assert!(Grid::from_raw(2, 2, vec![1u8, 2, 3]).is_none());
        assert!(Grid::<u8>::from_raw(0, 2, vec![]).is_none());
    }

    #[test]
    fn rows_are_row_major() {
        let g = Grid::from_raw(3, 2, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        let rows: Vec<&[u8]> = g.row_slices().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
        assert_eq!(g.get(2, 1), 6);
        assert_eq!(g.min_max(), (1, 6));
    }
}
