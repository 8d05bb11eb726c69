use crate::error::{Error, Result};

/// A bounded set of symbols. Ranks follow ascending symbol value, so iterating ranks in order
/// visits symbols in order.
#[derive(Clone, Debug)]
pub struct Alphabet {
    symbols: Vec<u8>,
    ranks: [Option<u8>; 256],
}

impl Alphabet {
    pub fn new(symbols: &[u8]) -> Result<Alphabet> {
        let mut sorted = symbols.to_vec();
        sorted.sort_unstable();

        let mut ranks = [None; 256];
        for (i, &symbol) in sorted.iter().enumerate() {
            if ranks[symbol as usize].is_some() {
                return Err(Error::DuplicateSymbol(symbol));
            }
            ranks[symbol as usize] = Some(i as u8);
        }

        Ok(Alphabet {
            symbols: sorted,
            ranks,
        })
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.ranks[symbol as usize].is_some()
    }

    pub fn rank_of_symbol(&self, symbol: u8) -> Option<u8> {
        self.ranks[symbol as usize]
    }

    pub fn symbol_of_rank(&self, rank: u8) -> u8 {
        self.symbols[rank as usize]
    }
}

lazy_static! {
    pub static ref ASCII_LOWERCASE: Alphabet =
        Alphabet::new(b"abcdefghijklmnopqrstuvwxyz").expect("lowercase letters are distinct");
    pub static ref ASCII_UPPERCASE: Alphabet =
        Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ").expect("uppercase letters are distinct");
    pub static ref ASCII: Alphabet =
        Alphabet::new(b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ")
            .expect("ascii letters are distinct");
    pub static ref DNA: Alphabet = Alphabet::new(b"ACGT").expect("nucleotides are distinct");
}
