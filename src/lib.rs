//! Suffix trees and generalized suffix trees over byte sequences, built online in linear time
//! with Ukkonen's algorithm.
//!
//! ```
//! use online_suffix_tree::SuffixTree;
//!
//! let tree = SuffixTree::from_sequence(b"abcabcdea")?;
//! assert!(tree.contains(b"bcab"));
//! assert_eq!(tree.suffix_paths().next(), Some("/abc/abcdea".to_owned()));
//! # Ok::<(), online_suffix_tree::Error>(())
//! ```

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod alphabet;
mod builder;
pub mod edges;
mod error;
mod query;
mod tree;

pub use builder::{InsertError, SuffixTreeBuilder, TraceEvent, TraceSink};
pub use edges::{ArrayEdgesFactory, EdgeStore, EdgeStoreFactory, MapEdgesFactory};
pub use error::{Error, Result, Violation};
pub use query::Leaves;
pub use tree::{Edge, EdgeId, Node, NodeId, StringId, SuffixTree, ROOT};

impl SuffixTree {
    /// Builds the suffix tree of a single sequence, identified as `StringId(0)`.
    pub fn from_sequence(sequence: &[u8]) -> Result<SuffixTree> {
        SuffixTree::from_sequences(&[sequence])
    }

    /// Builds a generalized suffix tree, the `i`-th sequence being identified as `StringId(i)`.
    pub fn from_sequences<S: AsRef<[u8]>>(sequences: &[S]) -> Result<SuffixTree> {
        let mut builder = SuffixTreeBuilder::new();
        for (i, sequence) in sequences.iter().enumerate() {
            builder = builder.add_sequence(StringId(i as u32), sequence.as_ref())?;
        }
        Ok(builder.build())
    }
}
