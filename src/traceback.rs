use log::trace;

use crate::grid::Grid;
use crate::scoring::{compatible, AlignmentStats, ScoreParams};
use crate::{AlignerError, DEFAULT_GAP_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Gap inserted into the first sequence; consumes a symbol of the second.
    Insertion,
    /// Gap inserted into the second sequence; consumes a symbol of the first.
    Deletion,
}

impl TracebackOperation {
    fn cigar_char(self) -> char {
        match self {
            TracebackOperation::Match => '=',
            TracebackOperation::Mismatch => 'X',
            TracebackOperation::Insertion => 'I',
            TracebackOperation::Deletion => 'D',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub score: i64,
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
}

impl AlignmentResult {
    pub fn stats(&self) -> AlignmentStats {
        self.operations
            .iter()
            .fold(AlignmentStats::default(), |mut acc, op| {
                match op {
                    TracebackOperation::Match => acc.matches += 1,
                    TracebackOperation::Mismatch => acc.mismatches += 1,
                    TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
                }
                acc
            })
    }

    /// Run-length encoded operations, e.g. `3=1I2X`.
    pub fn cigar(&self) -> String {
        let mut cigar = String::new();
        let mut ops = self.operations.iter().peekable();
        while let Some(&op) = ops.next() {
            let mut run = 1;
            while ops.next_if(|&&next| next == op).is_some() {
                run += 1;
            }
            cigar.push_str(&run.to_string());
            cigar.push(op.cigar_char());
        }
        cigar
    }

    pub fn into_pair(self) -> (Vec<u8>, Vec<u8>) {
        (self.aligned_seq1, self.aligned_seq2)
    }
}

/// Walks a grid built by [`crate::build_grid`] back from the bottom-right cell.
///
/// Ties are broken diagonal first, then a gap in the first sequence, then a
/// gap in the second, so the same inputs always yield the same alignment.
pub struct Traceback<'a> {
    grid: &'a Grid,
    seq1: &'a [u8],
    seq2: &'a [u8],
    params: ScoreParams,
    gap_symbol: u8,
}

impl<'a> Traceback<'a> {
    pub fn new(grid: &'a Grid, seq1: &'a [u8], seq2: &'a [u8], params: ScoreParams) -> Self {
        Self {
            grid,
            seq1,
            seq2,
            params,
            gap_symbol: DEFAULT_GAP_SYMBOL,
        }
    }

    pub fn with_gap_symbol(mut self, gap_symbol: u8) -> Self {
        self.gap_symbol = gap_symbol;
        self
    }

    fn step(&self, i: usize, j: usize) -> Result<TracebackOperation, AlignerError> {
        if i == 0 {
            return Ok(TracebackOperation::Insertion);
        }
        if j == 0 {
            return Ok(TracebackOperation::Deletion);
        }

        let cell = self.grid.get(i, j);
        let (a, b) = (self.seq1[i - 1], self.seq2[j - 1]);
        let diagonal = self.grid.get(i - 1, j - 1) + i64::from(self.params.score(a, b)?);
        if cell == diagonal {
            return Ok(if compatible(a, b)? {
                TracebackOperation::Match
            } else {
                TracebackOperation::Mismatch
            });
        }
        let gap = i64::from(self.params.gap);
        if cell == self.grid.get(i, j - 1) + gap {
            return Ok(TracebackOperation::Insertion);
        }
        if cell == self.grid.get(i - 1, j) + gap {
            return Ok(TracebackOperation::Deletion);
        }
        Err(AlignerError::Traceback { i, j })
    }

    pub fn reconstruct_alignment(&self) -> Result<AlignmentResult, AlignerError> {
        let expected = (self.seq1.len() + 1, self.seq2.len() + 1);
        let found = (self.grid.rows(), self.grid.cols());
        if expected != found {
            return Err(AlignerError::GridShape { expected, found });
        }

        let capacity = self.seq1.len() + self.seq2.len();
        let mut aligned_seq1 = Vec::with_capacity(capacity);
        let mut aligned_seq2 = Vec::with_capacity(capacity);
        let mut operations = Vec::with_capacity(capacity);
        let gap = i64::from(self.params.gap);
        let mut score: i64 = 0;

        let (mut i, mut j) = (self.seq1.len(), self.seq2.len());
        while i > 0 || j > 0 {
            let op = self.step(i, j)?;
            trace!("({}, {}) -> {:?}", i, j, op);
            match op {
                TracebackOperation::Match | TracebackOperation::Mismatch => {
                    let (a, b) = (self.seq1[i - 1], self.seq2[j - 1]);
                    aligned_seq1.push(a);
                    aligned_seq2.push(b);
                    score += i64::from(self.params.score(a, b)?);
                    i -= 1;
                    j -= 1;
                }
                TracebackOperation::Insertion => {
                    aligned_seq1.push(self.gap_symbol);
                    aligned_seq2.push(self.seq2[j - 1]);
                    score += gap;
                    j -= 1;
                }
                TracebackOperation::Deletion => {
                    aligned_seq1.push(self.seq1[i - 1]);
                    aligned_seq2.push(self.gap_symbol);
                    score += gap;
                    i -= 1;
                }
            }
            operations.push(op);
        }

        // Built back to front.
        aligned_seq1.reverse();
        aligned_seq2.reverse();
        operations.reverse();

        Ok(AlignmentResult {
            score,
            aligned_seq1,
            aligned_seq2,
            operations,
        })
    }
}

/// Reconstructs one optimal alignment from a completed grid.
pub fn traceback(
    grid: &Grid,
    seq_a: &[u8],
    seq_b: &[u8],
    match_score: i32,
    mismatch: i32,
    gap: i32,
) -> Result<AlignmentResult, AlignerError> {
    Traceback::new(grid, seq_a, seq_b, ScoreParams::new(match_score, mismatch, gap))
        .reconstruct_alignment()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;

    fn run(a: &[u8], b: &[u8], m: i32, mm: i32, g: i32) -> AlignmentResult {
        let grid = build_grid(a, b, m, mm, g).unwrap();
        traceback(&grid, a, b, m, mm, g).unwrap()
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let result = run(b"ACGT", b"ACGT", 1, 0, -1);
        assert_eq!(result.aligned_seq1, b"ACGT");
        assert_eq!(result.aligned_seq2, b"ACGT");
        assert_eq!(result.cigar(), "4=");
        assert_eq!(result.score, 4);
    }

    #[test]
    fn diagonal_preferred_over_gaps() {
        let result = run(b"A", b"AA", 1, 0, -1);
        assert_eq!(result.aligned_seq1, b"-A");
        assert_eq!(result.aligned_seq2, b"AA");
        assert_eq!(
            result.operations,
            vec![TracebackOperation::Insertion, TracebackOperation::Match]
        );
    }

    #[test]
    fn column_gap_checked_before_row_gap() {
        let result = run(b"AC", b"CA", 1, -1, -1);
        assert_eq!(result.aligned_seq1, b"AC-");
        assert_eq!(result.aligned_seq2, b"-CA");
        assert_eq!(result.cigar(), "1D1=1I");
        assert_eq!(result.score, -1);
    }

    #[test]
    fn deletion_in_second_sequence() {
        let result = run(b"ACGT", b"AGT", 1, 0, -1);
        assert_eq!(result.aligned_seq1, b"ACGT");
        assert_eq!(result.aligned_seq2, b"A-GT");
        assert_eq!(result.score, 2);
        assert_eq!(
            result.stats(),
            AlignmentStats {
                matches: 3,
                mismatches: 0,
                gaps: 1
            }
        );
    }

    #[test]
    fn ambiguous_columns_count_as_matches() {
        let result = run(b"RA", b"YA", 1, 0, -1);
        assert_eq!(result.aligned_seq1, b"RA");
        assert_eq!(result.aligned_seq2, b"YA");
        assert_eq!(result.cigar(), "1X1=");
    }

    #[test]
    fn input_gap_markers_are_ordinary_symbols() {
        let result = run(b"AA-CT", b"AAACC", 1, 0, -1);
        assert_eq!(result.aligned_seq1, b"AA-CT");
        assert_eq!(result.aligned_seq2, b"AAACC");
        assert_eq!(result.cigar(), "2=1X1=1X");
        assert_eq!(result.score, 3);
    }

    #[test]
    fn empty_first_sequence_is_all_insertions() {
        let result = run(b"", b"ACG", 1, 0, -1);
        assert_eq!(result.aligned_seq1, b"---");
        assert_eq!(result.aligned_seq2, b"ACG");
        assert_eq!(result.cigar(), "3I");
        assert_eq!(result.score, -3);
    }

    #[test]
    fn empty_second_sequence_is_all_deletions() {
        let result = run(b"AC", b"", 1, 0, -2);
        assert_eq!(result.aligned_seq1, b"AC");
        assert_eq!(result.aligned_seq2, b"--");
        assert_eq!(result.cigar(), "2D");
        assert_eq!(result.score, -4);
    }

    #[test]
    fn both_empty() {
        let result = run(b"", b"", 1, 0, -1);
        assert!(result.aligned_seq1.is_empty());
        assert!(result.operations.is_empty());
        assert_eq!(result.cigar(), "");
    }

    #[test]
    fn extreme_weights_keep_exact_scores() {
        let result = run(b"GATTACA", b"GCA", i32::MAX, i32::MAX, i32::MIN / 2);
        assert_eq!(result.aligned_seq1, b"GATTACA");
        assert_eq!(result.aligned_seq2, b"----GCA");
        assert_eq!(
            result.score,
            3 * i64::from(i32::MAX) + 4 * i64::from(i32::MIN / 2)
        );

        let result = run(b"A", b"C", i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(result.aligned_seq1, b"A-");
        assert_eq!(result.aligned_seq2, b"-C");
        assert_eq!(result.score, 2 * i64::from(i32::MAX));
    }

    #[test]
    fn custom_gap_symbol() {
        let grid = build_grid(b"ACGT", b"AGT", 1, 0, -1).unwrap();
        let result = Traceback::new(&grid, b"ACGT", b"AGT", ScoreParams::new(1, 0, -1))
            .with_gap_symbol(b'.')
            .reconstruct_alignment()
            .unwrap();
        assert_eq!(result.aligned_seq2, b"A.GT");
    }

    #[test]
    fn rejects_grid_of_wrong_shape() {
        let grid = build_grid(b"ACG", b"AC", 1, 0, -1).unwrap();
        assert!(matches!(
            traceback(&grid, b"AC", b"ACG", 1, 0, -1),
            Err(AlignerError::GridShape {
                expected: (3, 4),
                found: (4, 3)
            })
        ));
    }

    #[test]
    fn rejects_grid_from_other_parameters() {
        let grid = build_grid(b"ACGT", b"TGCA", 1, 0, -1).unwrap();
        assert!(matches!(
            traceback(&grid, b"ACGT", b"TGCA", 10, -10, -7),
            Err(AlignerError::Traceback { .. })
        ));
    }
}
