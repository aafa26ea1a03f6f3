//! Global pairwise alignment of nucleotide sequences with IUPAC ambiguity codes.
//!
//! Scoring treats two symbols as a match when the sets of bases they stand for
//! intersect, so `N` matches anything and `R` never matches `Y`. Gap markers
//! (`-`, `.`) in the input always score as a mismatch. Gaps inserted by the
//! aligner cost a fixed linear penalty each.
//!
//! ```
//! let (a, b) = nw_aligner::align(b"GCATGCU", b"GATTACA", 1, -1, -1).unwrap();
//! assert_eq!(a.len(), b.len());
//! ```

use log::debug;
use thiserror::Error;

pub mod ambiguity;
pub mod config;
pub mod grid;
pub mod scoring;
pub mod traceback;

pub use ambiguity::{resolve, AmbiguitySet};
pub use config::AlignerParameters;
pub use grid::{build_grid, Grid};
pub use scoring::{score, AlignmentStats, ScoreParams};
pub use traceback::{traceback, AlignmentResult, Traceback, TracebackOperation};

pub const DEFAULT_MATCH: i32 = 1;
pub const DEFAULT_MISMATCH: i32 = 0;
pub const DEFAULT_GAP: i32 = -1;
pub const DEFAULT_GAP_SYMBOL: u8 = b'-';

#[derive(Debug, Error)]
pub enum AlignerError {
    /// A byte outside the alphabet. `position` is set when a whole sequence
    /// was checked and `None` for a lone symbol lookup.
    #[error("Unknown symbol '{symbol}'{}", at_position(.position))]
    UnknownSymbol {
        symbol: char,
        position: Option<usize>,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Grid shape {found:?} does not match sequences, expected {expected:?}")]
    GridShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("No transition reproduces grid cell ({i}, {j})")]
    Traceback { i: usize, j: usize },
}

fn at_position(position: &Option<usize>) -> String {
    match position {
        Some(position) => format!(" at position {}", position),
        None => String::new(),
    }
}

/// Aligns pairs of sequences under fixed parameters.
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    params: AlignerParameters,
}

impl Aligner {
    pub fn new(params: AlignerParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AlignerParameters {
        &self.params
    }

    pub fn build_grid(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<Grid, AlignerError> {
        let scores = self.params.scores();
        build_grid(seq_a, seq_b, scores.match_score, scores.mismatch, scores.gap)
    }

    pub fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<AlignmentResult, AlignerError> {
        let grid = self.build_grid(seq_a, seq_b)?;
        let result = Traceback::new(&grid, seq_a, seq_b, self.params.scores())
            .with_gap_symbol(self.params.gap_symbol())
            .reconstruct_alignment()?;
        debug!(
            "Aligned {} x {} symbols: score {}, {}",
            seq_a.len(),
            seq_b.len(),
            result.score,
            result.cigar()
        );
        Ok(result)
    }
}

/// Builds the grid and traces back one optimal alignment, returning the two
/// padded sequences.
pub fn align(
    seq_a: &[u8],
    seq_b: &[u8],
    match_score: i32,
    mismatch: i32,
    gap: i32,
) -> Result<(Vec<u8>, Vec<u8>), AlignerError> {
    let params =
        AlignerParameters::new().with_scores(ScoreParams::new(match_score, mismatch, gap));
    Ok(Aligner::new(params).align(seq_a, seq_b)?.into_pair())
}
