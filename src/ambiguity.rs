use crate::AlignerError;

const BASE_A: u8 = 0b0001;
const BASE_C: u8 = 0b0010;
const BASE_G: u8 = 0b0100;
const BASE_T: u8 = 0b1000;

/// Concrete bases in mask bit order.
const BASES: [(u8, u8); 4] = [(BASE_A, b'A'), (BASE_C, b'C'), (BASE_G, b'G'), (BASE_T, b'T')];

/// Set of concrete nucleotides (subset of `{A, C, G, T}`) denoted by one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AmbiguitySet(u8);

impl AmbiguitySet {
    pub fn intersection(self, other: AmbiguitySet) -> AmbiguitySet {
        AmbiguitySet(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(self, base: u8) -> bool {
        BASES
            .iter()
            .any(|&(bit, b)| b == base && self.0 & bit != 0)
    }

    /// Concrete bases of the set, in `A, C, G, T` order.
    pub fn bases(self) -> impl Iterator<Item = u8> {
        BASES
            .into_iter()
            .filter(move |&(bit, _)| self.0 & bit != 0)
            .map(|(_, b)| b)
    }
}

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    table[b'A' as usize] = BASE_A;
    table[b'C' as usize] = BASE_C;
    table[b'G' as usize] = BASE_G;
    table[b'T' as usize] = BASE_T;
    table[b'U' as usize] = BASE_T;
    table[b'N' as usize] = BASE_A | BASE_C | BASE_G | BASE_T;
    table[b'R' as usize] = BASE_A | BASE_G;
    table[b'Y' as usize] = BASE_C | BASE_T;
    table[b'S' as usize] = BASE_C | BASE_G;
    table[b'W' as usize] = BASE_A | BASE_T;
    table[b'K' as usize] = BASE_G | BASE_T;
    table[b'M' as usize] = BASE_A | BASE_C;
    table[b'B' as usize] = BASE_C | BASE_G | BASE_T;
    table[b'D' as usize] = BASE_A | BASE_G | BASE_T;
    table[b'H' as usize] = BASE_A | BASE_C | BASE_T;
    table[b'V' as usize] = BASE_A | BASE_C | BASE_G;
    table
}

// Zero marks a byte outside the alphabet.
static AMBIGUITY_TABLE: [u8; 256] = build_table();

pub fn is_gap(symbol: u8) -> bool {
    symbol == b'-' || symbol == b'.'
}

/// True for every symbol of the alignment alphabet, gap markers included.
pub fn is_valid(symbol: u8) -> bool {
    is_gap(symbol) || AMBIGUITY_TABLE[symbol as usize] != 0
}

/// Maps a nucleotide or IUPAC code to the bases it stands for.
///
/// Gap markers have no ambiguity set and are rejected like any other
/// unknown byte; callers are expected to intercept them first.
pub fn resolve(symbol: u8) -> Result<AmbiguitySet, AlignerError> {
    match AMBIGUITY_TABLE[symbol as usize] {
        0 => Err(AlignerError::UnknownSymbol {
            symbol: symbol as char,
            position: None,
        }),
        mask => Ok(AmbiguitySet(mask)),
    }
}

/// Checks a whole sequence up front, reporting the first offending symbol and its position.
pub fn validate(seq: &[u8]) -> Result<(), AlignerError> {
    match seq.iter().position(|&s| !is_valid(s)) {
        Some(position) => Err(AlignerError::UnknownSymbol {
            symbol: seq[position] as char,
            position: Some(position),
        }),
        None => Ok(()),
    }
}
