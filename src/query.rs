//! Read-only traversals. None of them follow suffix links, only child edges, so they terminate on
//! any tree the builder produced and can be restarted at will.

use std::cmp;
use std::collections::VecDeque;

use bit_vec::BitVec;

use crate::edges::EdgeStoreFactory;
use crate::tree::{EdgeId, NodeId, SuffixTree, ROOT};

/// Root-to-leaf paths as lists of edge labels, in ascending symbol order.
pub struct Leaves<'a, F: EdgeStoreFactory> {
    tree: &'a SuffixTree<F>,
    stack: Vec<(EdgeId, usize)>,
    path: Vec<&'a [u8]>,
}

impl<'a, F: EdgeStoreFactory> Leaves<'a, F> {
    fn push_children(&mut self, node: NodeId, depth: usize) {
        let edges = self.tree.node(node).all_edges();
        self.stack
            .extend(edges.iter().rev().map(|&(_, edge)| (edge, depth)));
    }
}

impl<'a, F: EdgeStoreFactory> Iterator for Leaves<'a, F> {
    type Item = Vec<&'a [u8]>;

    fn next(&mut self) -> Option<Vec<&'a [u8]>> {
        while let Some((edge, depth)) = self.stack.pop() {
            let tree = self.tree;
            let edge = tree.edge(edge);

            self.path.truncate(depth);
            self.path.push(tree.label(edge));

            match edge.child {
                Some(child) => self.push_children(child, depth + 1),
                None => return Some(self.path.clone()),
            }
        }

        None
    }
}

impl<F: EdgeStoreFactory> SuffixTree<F> {
    /// Whether `query` is a substring of any inserted sequence. The empty query is contained in
    /// every tree.
    pub fn contains(&self, query: &[u8]) -> bool {
        let mut node = ROOT;
        let mut rest = query;

        while let Some(&first) = rest.first() {
            let edge = match self.node(node).edge(first) {
                Some(edge) => self.edge(edge),
                None => return false,
            };

            let label = self.label(edge);
            let n = cmp::min(label.len(), rest.len());
            if label[..n] != rest[..n] {
                return false;
            }
            rest = &rest[n..];

            match edge.child {
                Some(child) => node = child,
                None => return rest.is_empty(),
            }
        }

        true
    }

    pub fn leaves(&self) -> Leaves<'_, F> {
        let mut leaves = Leaves {
            tree: self,
            stack: Vec::new(),
            path: Vec::new(),
        };
        leaves.push_children(ROOT, 0);
        leaves
    }

    pub fn suffixes<'a>(&'a self) -> impl Iterator<Item = Vec<u8>> + 'a {
        self.leaves().map(|labels| labels.concat())
    }

    /// Like [`suffixes`](SuffixTree::suffixes) but keeps the edge boundaries visible, e.g.
    /// `/abc/abcdea`.
    pub fn suffix_paths<'a>(&'a self) -> impl Iterator<Item = String> + 'a {
        self.leaves().map(|labels| {
            labels
                .iter()
                .map(|label| format!("/{}", String::from_utf8_lossy(label)))
                .collect()
        })
    }

    pub fn node_count(&self) -> usize {
        let mut count = 1;
        let mut queue = VecDeque::new();
        queue.push_back(ROOT);

        while let Some(node) = queue.pop_front() {
            for (_, edge) in self.node(node).all_edges() {
                if let Some(child) = self.edge(edge).child {
                    count += 1;
                    queue.push_back(child);
                }
            }
        }

        count
    }

    /// The longest run of symbols that occurs in every inserted sequence, or `None` if there are
    /// fewer than two sequences or they share nothing.
    ///
    /// Only substrings that end at a branching node are considered, which is exact as long as each
    /// sequence ends with its own unique terminator.
    pub fn longest_common_substring(&self) -> Option<Vec<u8>> {
        let sequences = self.sources.len();
        if sequences < 2 {
            return None;
        }

        // Pre-order, so that walking it backwards visits children before their parents.
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut depth = vec![0; self.nodes.len()];
        let mut parent: Vec<Option<(NodeId, EdgeId)>> = vec![None; self.nodes.len()];

        let mut stack = vec![ROOT];
        while let Some(node) = stack.pop() {
            order.push(node);
            for (_, edge) in self.node(node).all_edges() {
                let e = self.edge(edge);
                if let Some(child) = e.child {
                    depth[child] = depth[node] + self.label_len(e);
                    parent[child] = Some((node, edge));
                    stack.push(child);
                }
            }
        }

        // Every edge's path occurs in the sequence the edge was cut from.
        let mut occurs_in = vec![BitVec::from_elem(sequences, false); self.nodes.len()];
        for &node in order.iter().rev() {
            let mut bits = BitVec::from_elem(sequences, false);
            for (_, edge) in self.node(node).all_edges() {
                let e = self.edge(edge);
                bits.set(e.source, true);
                if let Some(child) = e.child {
                    bits.or(&occurs_in[child]);
                }
            }
            occurs_in[node] = bits;
        }

        let deepest = order
            .iter()
            .cloned()
            .filter(|&node| node != ROOT && occurs_in[node].all())
            .max_by_key(|&node| depth[node])?;

        let mut labels = Vec::new();
        let mut node = deepest;
        while let Some((up, edge)) = parent[node] {
            labels.push(self.label(self.edge(edge)));
            node = up;
        }
        labels.reverse();

        Some(labels.concat())
    }
}
