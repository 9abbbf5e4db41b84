#[cfg(feature = "std")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Clone, Debug, Default)]
/// Spatial indexing structure for proximity queries on person positions.
///
/// Implements a grid-based uniform spatial hash using offset-indexed entity
/// lists. With the cell size equal to the contact radius, a contact query only
/// ever touches the 3x3 block of cells around a person.
///
/// # Fields
/// - `cell_size`: Width/height of each grid cell in world units
/// - `width/height`: World dimensions in world units
/// - `cols/rows`: Grid dimensions (# cells horizontally/vertically)
/// - `cell_offsets`: Offset indices into `entity_indices` for each cell
/// - `entity_indices`: Compact storage of all indices, sorted by cell
///
/// # Implementation Notes
/// - Uses the "offset array" pattern (like compressed sparse rows)
/// - `cell_offsets[i]..cell_offsets[i+1]` contains all indices in cell i
/// - Within a cell, indices keep their input order
///
/// # Examples
/// ```
/// use contagion_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(10.0, 100, 100);
/// spatial.build(&[(15.0, 15.0), (25.0, 25.0), (85.0, 85.0)]);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(15.0, 15.0, 20.0, &mut nearby);
/// assert_eq!(nearby.len(), 2);
/// ```
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: u16,
    pub height: u16,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    /// Creates an empty spatial hash covering a `width` x `height` world.
    pub fn new(cell_size: f64, width: u16, height: u16) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let cols = ((f64::from(width) / cell_size).ceil() as usize).max(1);
        let rows = ((f64::from(height) / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    /// Computes the cell index for a given world coordinate.
    ///
    /// Non-finite and out-of-world coordinates return `None`.
    #[inline]
    pub fn get_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        if x.abs() > i32::MAX as f64 * self.cell_size || y.abs() > i32::MAX as f64 * self.cell_size
        {
            return None;
        }

        let cx = (x / self.cell_size).floor() as i32;
        let cy = (y / self.cell_size).floor() as i32;
        if cx < 0 || cx >= self.cols as i32 || cy < 0 || cy >= self.rows as i32 {
            None
        } else {
            Some((cy as usize * self.cols) + cx as usize)
        }
    }

    /// Rebuilds the index from scratch. Index `i` refers to `positions[i]`.
    pub fn build(&mut self, positions: &[(f64, f64)]) {
        let cell_count = self.cols * self.rows;

        let atomic_counts: Vec<AtomicUsize> =
            (0..cell_count).map(|_| AtomicUsize::new(0)).collect();
        let count_one = |&(x, y): &(f64, f64)| {
            if let Some(idx) = self.get_cell_idx(x, y) {
                atomic_counts[idx].fetch_add(1, AtomicOrdering::Relaxed);
            }
        };
        #[cfg(feature = "std")]
        positions.par_iter().for_each(count_one);
        #[cfg(not(feature = "std"))]
        positions.iter().for_each(count_one);
        let counts: Vec<usize> = atomic_counts.into_iter().map(|a| a.into_inner()).collect();

        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);

        let mut current_offsets = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, &(x, y)) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(x, y) {
                let write_idx = current_offsets[cell_idx];
                self.entity_indices[write_idx] = entity_idx;
                current_offsets[cell_idx] += 1;
            }
        }
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.entity_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_indices.is_empty()
    }

    fn cell_range(&self, x: f64, y: f64, radius: f64) -> (i32, i32, i32, i32) {
        let min_cx = ((x - radius) / self.cell_size).floor() as i32;
        let max_cx = ((x + radius) / self.cell_size).floor() as i32;
        let min_cy = ((y - radius) / self.cell_size).floor() as i32;
        let max_cy = ((y + radius) / self.cell_size).floor() as i32;
        (
            min_cx.max(0),
            max_cx.min(self.cols as i32 - 1),
            min_cy.max(0),
            max_cy.min(self.rows as i32 - 1),
        )
    }

    /// Visits every index stored in cells overlapping the query square.
    ///
    /// Candidates are not distance-filtered.
    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        if !x.is_finite() || !y.is_finite() || !radius.is_finite() {
            return;
        }
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_range(x, y, radius);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = (cy as usize * self.cols) + cx as usize;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                for &entity_idx in &self.entity_indices[start..end] {
                    callback(entity_idx);
                }
            }
        }
    }

    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        if !x.is_finite() || !y.is_finite() || !radius.is_finite() {
            return 0;
        }
        let mut count = 0;
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_range(x, y, radius);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = (cy as usize * self.cols) + cx as usize;
                count += self.cell_offsets[cell_idx + 1] - self.cell_offsets[cell_idx];
            }
        }
        count
    }

    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(x, y, radius, |idx| result.push(idx));
    }
}
