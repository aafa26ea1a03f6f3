use crate::ambiguity::{is_gap, resolve};
use crate::AlignerError;

/// Linear-gap scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl ScoreParams {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    pub fn score(&self, lho: u8, rho: u8) -> Result<i32, AlignerError> {
        score(lho, rho, self.match_score, self.mismatch)
    }
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_score: crate::DEFAULT_MATCH,
            mismatch: crate::DEFAULT_MISMATCH,
            gap: crate::DEFAULT_GAP,
        }
    }
}

/// Whether two symbols may denote the same base.
///
/// Gap markers are never compatible with anything, including another gap.
pub fn compatible(lho: u8, rho: u8) -> Result<bool, AlignerError> {
    if is_gap(lho) || is_gap(rho) {
        return Ok(false);
    }
    let shared = resolve(lho)?.intersection(resolve(rho)?);
    Ok(!shared.is_empty())
}

/// Pairwise score of two aligned symbols: `match_score` if their ambiguity
/// sets intersect, `mismatch` otherwise.
pub fn score(lho: u8, rho: u8, match_score: i32, mismatch: i32) -> Result<i32, AlignerError> {
    Ok(if compatible(lho, rho)? {
        match_score
    } else {
        mismatch
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
}

impl AlignmentStats {
    pub fn columns(&self) -> u32 {
        self.matches + self.mismatches + self.gaps
    }

    /// Fraction of columns that are matches; zero for an empty alignment.
    pub fn identity(&self) -> f64 {
        match self.columns() {
            0 => 0.0,
            n => self.matches as f64 / n as f64,
        }
    }
}
