use std::fmt;
use std::str;

use crate::edges::{EdgeList, EdgeStore, EdgeStoreFactory, MapEdgesFactory};
use crate::error::Result;

pub type NodeId = usize;
pub type EdgeId = usize;
pub(crate) type TerminalId = usize;

pub const ROOT: NodeId = 0;

/// Caller-chosen identifier of an inserted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(pub u32);

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Exclusive end of an edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum End {
    /// Shared with every other leaf created by the same insertion; moves forward with it.
    Open(TerminalId),
    Closed(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub(crate) source: usize,
    pub(crate) start: usize,
    pub(crate) end: End,
    pub(crate) child: Option<NodeId>,
}

impl Edge {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    pub fn is_leaf(&self) -> bool {
        self.child.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Node<S> {
    pub(crate) is_root: bool,
    pub(crate) suffix_link: NodeId,
    pub(crate) edges: S,
}

impl<S: EdgeStore> Node<S> {
    pub(crate) fn new(edges: S) -> Node<S> {
        Node {
            is_root: false,
            suffix_link: ROOT,
            edges,
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn suffix_link(&self) -> NodeId {
        self.suffix_link
    }

    pub fn edge(&self, symbol: u8) -> Option<EdgeId> {
        self.edges.get(symbol)
    }

    pub fn all_edges(&self) -> EdgeList {
        self.edges.all_edges()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Source {
    pub(crate) id: StringId,
    pub(crate) text: Vec<u8>,
}

/// A (generalized) suffix tree over one or more byte sequences.
///
/// Nodes and edges live in arenas and refer to each other by index, so suffix links (including
/// the root's link to itself) are plain data. Every edge remembers the sequence it was cut from
/// and its label is always read from that sequence.
pub struct SuffixTree<F: EdgeStoreFactory = MapEdgesFactory> {
    pub(crate) factory: F,
    pub(crate) nodes: Vec<Node<F::Store>>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) terminals: Vec<usize>,
    pub(crate) sources: Vec<Source>,
}

impl<F: EdgeStoreFactory> SuffixTree<F> {
    pub fn new(factory: F) -> SuffixTree<F> {
        let mut root = factory.create_node();
        root.is_root = true;
        root.suffix_link = ROOT;

        SuffixTree {
            factory,
            nodes: vec![root],
            edges: Vec::new(),
            terminals: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, node: NodeId) -> &Node<F::Store> {
        &self.nodes[node]
    }

    pub fn edge(&self, edge: EdgeId) -> &Edge {
        &self.edges[edge]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn source(&self, id: StringId) -> Option<&[u8]> {
        self.sources
            .iter()
            .find(|source| source.id == id)
            .map(|source| source.text.as_slice())
    }

    pub fn string_ids<'a>(&'a self) -> impl Iterator<Item = StringId> + 'a {
        self.sources.iter().map(|source| source.id)
    }

    pub fn string_id(&self, edge: &Edge) -> StringId {
        self.sources[edge.source].id
    }

    pub fn end(&self, edge: &Edge) -> usize {
        match edge.end {
            End::Open(terminal) => self.terminals[terminal],
            End::Closed(end) => end,
        }
    }

    pub fn label_len(&self, edge: &Edge) -> usize {
        self.end(edge) - edge.start
    }

    pub fn label(&self, edge: &Edge) -> &[u8] {
        &self.sources[edge.source].text[edge.start..self.end(edge)]
    }

    pub(crate) fn symbol_at(&self, edge: &Edge, offset: usize) -> u8 {
        self.sources[edge.source].text[edge.start + offset]
    }

    pub(crate) fn contains_id(&self, id: StringId) -> bool {
        self.sources.iter().any(|source| source.id == id)
    }

    pub(crate) fn add_source(&mut self, id: StringId, text: Vec<u8>) -> usize {
        self.sources.push(Source { id, text });
        self.sources.len() - 1
    }

    pub(crate) fn open_terminal(&mut self) -> TerminalId {
        self.terminals.push(0);
        self.terminals.len() - 1
    }

    pub(crate) fn create_node(&mut self) -> NodeId {
        let node = self.factory.create_node();
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub(crate) fn attach(&mut self, node: NodeId, symbol: u8, edge: Edge) -> Result<EdgeId> {
        self.edges.push(edge);
        let id = self.edges.len() - 1;
        self.nodes[node].edges.insert(symbol, id)?;
        Ok(id)
    }

    fn render_edge(&self, edge: EdgeId) -> Vec<String> {
        let edge = &self.edges[edge];
        let label = String::from_utf8_lossy(self.label(edge));
        match edge.child {
            Some(child) => self.render_node(child, format!("({}){}", child, label)),
            None => vec![label.into_owned()],
        }
    }

    fn render_node(&self, node: NodeId, text: String) -> Vec<String> {
        let edges = self.nodes[node].all_edges();
        if edges.is_empty() {
            return vec![text];
        }

        let padding = " ".repeat(text.chars().count());
        let mut lines = Vec::new();
        for (i, &(_, edge)) in edges.iter().enumerate() {
            for (j, line) in self.render_edge(edge).into_iter().enumerate() {
                let prefix = if i == 0 && j == 0 { &text } else { &padding };

                let line = if i == 0 && j == 0 {
                    format!("{}┳{}", prefix, line)
                } else if i < edges.len() - 1 && j == 0 {
                    format!("{}┣{}", prefix, line)
                } else if j == 0 {
                    format!("{}┗{}", prefix, line)
                } else if i < edges.len() - 1 {
                    format!("{}┃{}", prefix, line)
                } else {
                    format!("{} {}", prefix, line)
                };

                lines.push(line);
            }
        }

        lines
    }

    /// Draws the tree with one line per leaf. Internal nodes are prefixed with their id.
    pub fn render(&self) -> Vec<String> {
        self.render_node(ROOT, format!("({})", ROOT))
    }
}

impl<F: EdgeStoreFactory> fmt::Display for SuffixTree<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.render() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl<F: EdgeStoreFactory> fmt::Debug for SuffixTree<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SuffixTree{{")?;

        writeln!(f, "    sources: [")?;
        for source in &self.sources {
            let text = str::from_utf8(&source.text).unwrap_or("<invalid_string>");
            writeln!(f, "       {}: {}", source.id, text)?;
        }
        writeln!(f, "    ]")?;

        writeln!(f, "    nodes: [")?;
        for (i, node) in self.nodes.iter().enumerate() {
            let children: Vec<_> = node
                .all_edges()
                .into_iter()
                .map(|(symbol, edge)| (symbol as char, edge))
                .collect();

            writeln!(f, "       Node: {{")?;
            writeln!(f, "          id: {}", i)?;
            writeln!(f, "          root: {}", node.is_root)?;
            writeln!(f, "          edges: {:?}", children)?;
            writeln!(f, "          suffix_link: {}", node.suffix_link)?;
            writeln!(f, "       }}")?;
        }
        writeln!(f, "    ]")?;

        writeln!(f, "    edges: [")?;
        for (i, edge) in self.edges.iter().enumerate() {
            let text = str::from_utf8(self.label(edge)).unwrap_or("<invalid_string>");

            writeln!(f, "       Edge: {{")?;
            writeln!(f, "          id: {}", i)?;
            writeln!(f, "          source: {}", self.sources[edge.source].id)?;
            writeln!(f, "          text: {}", text)?;
            writeln!(f, "          open: {}", matches!(edge.end, End::Open(_)))?;
            writeln!(f, "          child: {:?}", edge.child)?;
            writeln!(f, "       }}")?;
        }
        writeln!(f, "    ]")?;

        writeln!(f, "}}")
    }
}
