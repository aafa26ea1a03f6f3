use crate::ambiguity::is_gap;
use crate::scoring::ScoreParams;
use crate::{AlignerError, DEFAULT_GAP_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignerParameters {
    scores: ScoreParams,
    gap_symbol: u8,
}

impl Default for AlignerParameters {
    fn default() -> Self {
        Self {
            scores: ScoreParams::default(),
            gap_symbol: DEFAULT_GAP_SYMBOL,
        }
    }
}

impl AlignerParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(mut self, scores: ScoreParams) -> Self {
        self.scores = scores;
        self
    }

    /// Byte written into the aligned rows for inserted gaps; `-` or `.`.
    pub fn with_gap_symbol(mut self, gap_symbol: u8) -> Result<Self, AlignerError> {
        if !is_gap(gap_symbol) {
            return Err(AlignerError::InvalidParameter(format!(
                "gap symbol must be '-' or '.', got '{}'",
                gap_symbol.escape_ascii()
            )));
        }
        self.gap_symbol = gap_symbol;
        Ok(self)
    }

    pub fn scores(&self) -> ScoreParams {
        self.scores
    }

    pub fn gap_symbol(&self) -> u8 {
        self.gap_symbol
    }
}
