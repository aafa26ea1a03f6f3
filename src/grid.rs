use std::fmt;

use log::debug;

use crate::ambiguity::validate;
use crate::scoring::score;
use crate::AlignerError;

/// Dynamic-programming score matrix for a global alignment.
///
/// `rows() == seq_a.len() + 1` and `cols() == seq_b.len() + 1`; cell `(i, j)`
/// holds the best score for aligning the first `i` symbols of A against the
/// first `j` symbols of B. Stored row-major and never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[i64]> {
        self.data.chunks(self.cols)
    }

    /// Optimal global score, i.e. the bottom-right cell.
    pub fn score(&self) -> i64 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows_iter() {
            let mut first = true;
            for value in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Fills the Needleman-Wunsch grid for `seq_a` (rows) against `seq_b` (columns)
/// with a linear gap penalty.
///
/// Cells are `i64`, so any `i32` weights are accepted without overflow.
pub fn build_grid(
    seq_a: &[u8],
    seq_b: &[u8],
    match_score: i32,
    mismatch: i32,
    gap: i32,
) -> Result<Grid, AlignerError> {
    validate(seq_a)?;
    validate(seq_b)?;

    let gap = i64::from(gap);
    let mut grid = Grid::new(seq_a.len() + 1, seq_b.len() + 1);

    for i in 0..grid.rows {
        grid.set(i, 0, i as i64 * gap);
    }
    for j in 0..grid.cols {
        grid.set(0, j, j as i64 * gap);
    }

    for (i, &a) in seq_a.iter().enumerate() {
        let i = i + 1;
        for (j, &b) in seq_b.iter().enumerate() {
            let j = j + 1;
            let diagonal =
                grid.get(i - 1, j - 1) + i64::from(score(a, b, match_score, mismatch)?);
            let up = grid.get(i - 1, j) + gap;
            let left = grid.get(i, j - 1) + gap;
            grid.set(i, j, diagonal.max(up).max(left));
        }
    }

    debug!(
        "Built {}x{} grid, optimal score {}",
        grid.rows,
        grid.cols,
        grid.score()
    );
    Ok(grid)
}
