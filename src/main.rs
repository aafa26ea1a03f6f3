use std::fmt::Write;

use clap::Parser;
use log::error;
use nw_aligner::{AlignerError, AlignerParameters, ScoreParams, Traceback};

/// Globally align two nucleotide sequences (IUPAC codes allowed) and print
/// the score grid and one optimal alignment.
#[derive(Parser, Debug)]
#[command(author, about)]
struct Cli {
    /// First sequence; the built-in example pair is used when omitted.
    #[arg(requires = "seq_b")]
    seq_a: Option<String>,

    /// Second sequence.
    seq_b: Option<String>,

    #[arg(long = "match", default_value_t = 1, allow_negative_numbers = true)]
    match_score: i32,

    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    mismatch: i32,

    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    gap: i32,

    /// Gap marker written into the aligned rows, '-' or '.'.
    #[arg(long, default_value_t = '-')]
    gap_symbol: char,
}

impl Cli {
    fn sequences(&self) -> (String, String) {
        match (&self.seq_a, &self.seq_b) {
            (Some(a), Some(b)) => (a.to_ascii_uppercase(), b.to_ascii_uppercase()),
            _ => ("GCATGCU".to_string(), "GATTACA".to_string()),
        }
    }

    fn params(&self) -> Result<AlignerParameters, AlignerError> {
        let gap_symbol = u8::try_from(self.gap_symbol).map_err(|_| {
            AlignerError::InvalidParameter(format!(
                "gap symbol '{}' is not a single byte",
                self.gap_symbol
            ))
        })?;
        AlignerParameters::new()
            .with_scores(ScoreParams::new(self.match_score, self.mismatch, self.gap))
            .with_gap_symbol(gap_symbol)
    }
}

/// Builds the grid once and traces the printed grid back into the alignment.
fn render(cli: &Cli) -> Result<String, AlignerError> {
    let params = cli.params()?;
    let scores = params.scores();
    let (seq_a, seq_b) = cli.sequences();
    let (seq_a, seq_b) = (seq_a.as_bytes(), seq_b.as_bytes());

    let grid = nw_aligner::build_grid(
        seq_a,
        seq_b,
        scores.match_score,
        scores.mismatch,
        scores.gap,
    )?;
    let result = Traceback::new(&grid, seq_a, seq_b, scores)
        .with_gap_symbol(params.gap_symbol())
        .reconstruct_alignment()?;

    let mut out = grid.to_string();
    // Writing to a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", String::from_utf8_lossy(&result.aligned_seq1));
    let _ = writeln!(out, "{}", String::from_utf8_lossy(&result.aligned_seq2));
    let _ = writeln!(out, "Score: {}  CIGAR: {}", result.score, result.cigar());
    Ok(out)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match render(&cli) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
