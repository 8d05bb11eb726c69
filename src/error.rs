use std::fmt;
use std::result;

use thiserror::Error;

use crate::StringId;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("symbol {0:#04x} is not part of the alphabet")]
    SymbolOutsideAlphabet(u8),
    #[error("symbol {0:#04x} appears twice in alphabet")]
    DuplicateSymbol(u8),
    #[error("string id {0} was already inserted into this tree")]
    DuplicateStringId(StringId),
    /// The builder's bookkeeping no longer matches the tree. This is a bug in the construction,
    /// never a problem with the input.
    #[error("construction invariant violated at position {position}: {violation}")]
    InvariantViolation { position: usize, violation: Violation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// No active edge although the active node is not the root.
    DetachedActivePoint,
    /// The active path asks for an edge the node does not have.
    MissingEdge(u8),
    /// The skip/count walk tried to descend below a leaf.
    WalkedPastLeaf,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Violation::DetachedActivePoint => write!(f, "no active edge away from the root"),
            Violation::MissingEdge(symbol) => write!(f, "missing edge for symbol {:#04x}", symbol),
            Violation::WalkedPastLeaf => write!(f, "skip/count walk descended below a leaf"),
        }
    }
}
