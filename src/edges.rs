//! Per-node storage of outgoing edges, keyed by the first symbol of their label.
//!
//! Both strategies hand out their edges in ascending symbol order. Traversal output depends on
//! this, so it is part of the contract rather than a property of the backing container.

use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::tree::{EdgeId, Node};

/// The `(first symbol, edge)` pairs of a node, ascending by symbol.
pub type EdgeList = SmallVec<[(u8, EdgeId); 4]>;

pub trait EdgeStore {
    fn get(&self, symbol: u8) -> Option<EdgeId>;

    fn insert(&mut self, symbol: u8, edge: EdgeId) -> Result<()>;

    /// All present edges, never placeholders, in ascending symbol order.
    fn all_edges(&self) -> EdgeList;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates the edge storage of every node in a tree.
pub trait EdgeStoreFactory {
    type Store: EdgeStore;

    fn create_store(&self) -> Self::Store;

    /// Whether stores made by this factory can hold an edge for `symbol`.
    fn supports(&self, _symbol: u8) -> bool {
        true
    }

    fn create_node(&self) -> Node<Self::Store> {
        Node::new(self.create_store())
    }
}

/// Unbounded alphabet, sorted on read.
#[derive(Debug, Default, Clone)]
pub struct MapEdges {
    edges: HashMap<u8, EdgeId>,
}

impl EdgeStore for MapEdges {
    fn get(&self, symbol: u8) -> Option<EdgeId> {
        self.edges.get(&symbol).cloned()
    }

    fn insert(&mut self, symbol: u8, edge: EdgeId) -> Result<()> {
        self.edges.insert(symbol, edge);
        Ok(())
    }

    fn all_edges(&self) -> EdgeList {
        let mut edges: EdgeList = self
            .edges
            .iter()
            .map(|(&symbol, &edge)| (symbol, edge))
            .collect();
        edges.sort_unstable_by_key(|&(symbol, _)| symbol);
        edges
    }

    fn len(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MapEdgesFactory;

impl EdgeStoreFactory for MapEdgesFactory {
    type Store = MapEdges;

    fn create_store(&self) -> MapEdges {
        MapEdges::default()
    }
}

/// One slot per symbol of a bounded alphabet.
#[derive(Debug, Clone)]
pub struct ArrayEdges {
    alphabet: Arc<Alphabet>,
    slots: Box<[Option<EdgeId>]>,
    len: usize,
}

impl EdgeStore for ArrayEdges {
    fn get(&self, symbol: u8) -> Option<EdgeId> {
        self.alphabet
            .rank_of_symbol(symbol)
            .and_then(|rank| self.slots[rank as usize])
    }

    fn insert(&mut self, symbol: u8, edge: EdgeId) -> Result<()> {
        let rank = self
            .alphabet
            .rank_of_symbol(symbol)
            .ok_or(Error::SymbolOutsideAlphabet(symbol))?;

        let slot = &mut self.slots[rank as usize];
        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(edge);

        Ok(())
    }

    fn all_edges(&self) -> EdgeList {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(rank, slot)| {
                slot.map(|edge| (self.alphabet.symbol_of_rank(rank as u8), edge))
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[derive(Debug, Clone)]
pub struct ArrayEdgesFactory {
    alphabet: Arc<Alphabet>,
}

impl ArrayEdgesFactory {
    pub fn new(alphabet: Alphabet) -> ArrayEdgesFactory {
        ArrayEdgesFactory {
            alphabet: Arc::new(alphabet),
        }
    }
}

impl EdgeStoreFactory for ArrayEdgesFactory {
    type Store = ArrayEdges;

    fn create_store(&self) -> ArrayEdges {
        ArrayEdges {
            alphabet: Arc::clone(&self.alphabet),
            slots: vec![None; self.alphabet.size()].into_boxed_slice(),
            len: 0,
        }
    }

    fn supports(&self, symbol: u8) -> bool {
        self.alphabet.contains(symbol)
    }
}
