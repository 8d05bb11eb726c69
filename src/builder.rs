//! Online construction of (generalized) suffix trees with Ukkonen's algorithm.
//!
//! Construction stays linear because of three pieces of state that survive from one symbol to
//! the next:
//!
//! * every leaf created while inserting a sequence ends at the same open terminal, so advancing
//!   that terminal once per symbol extends all of them,
//! * the active point remembers where in the tree the current suffix ends, and
//! * suffix links let the branch loop hop from one extension to the next instead of walking down
//!   from the root every time.

use std::error;
use std::fmt;
use std::result;

use crate::edges::{EdgeStoreFactory, MapEdgesFactory};
use crate::error::{Error, Result, Violation};
use crate::tree::{Edge, EdgeId, End, NodeId, StringId, SuffixTree, TerminalId, ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Recorded once for every position of the inserted sequence.
    Symbol { position: usize, symbol: u8 },
    /// A suffix link was followed inside the branch loop.
    SuffixLinkHop { to_root: bool },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TraceEvent::Symbol { symbol, .. } => write!(f, "Inserting char {}.", symbol as char),
            TraceEvent::SuffixLinkHop { to_root } => write!(f, "{}", to_root),
        }
    }
}

/// Receives [`TraceEvent`]s while a sequence is inserted. Recording must not affect the tree.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for () {
    fn record(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

impl<'a, T: TraceSink> TraceSink for &'a mut T {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

/// Inserts sequences one after another into the same tree.
///
/// ```
/// use online_suffix_tree::{StringId, SuffixTreeBuilder};
///
/// let tree = SuffixTreeBuilder::new()
///     .add_sequence(StringId(1), b"abcabc$")?
///     .add_sequence(StringId(2), b"defdef%")?
///     .build();
///
/// assert!(tree.contains(b"cabc"));
/// assert!(tree.contains(b"fdef%"));
/// assert!(!tree.contains(b"cd"));
/// # Ok::<(), online_suffix_tree::Error>(())
/// ```
pub struct SuffixTreeBuilder<F: EdgeStoreFactory = MapEdgesFactory, T = ()> {
    tree: SuffixTree<F>,
    trace: T,
}

impl SuffixTreeBuilder {
    pub fn new() -> SuffixTreeBuilder {
        SuffixTreeBuilder::with_factory(MapEdgesFactory)
    }
}

impl Default for SuffixTreeBuilder {
    fn default() -> SuffixTreeBuilder {
        SuffixTreeBuilder::new()
    }
}

impl<F: EdgeStoreFactory> SuffixTreeBuilder<F> {
    pub fn with_factory(factory: F) -> SuffixTreeBuilder<F> {
        SuffixTreeBuilder::resume(SuffixTree::new(factory))
    }

    pub fn resume(tree: SuffixTree<F>) -> SuffixTreeBuilder<F> {
        SuffixTreeBuilder { tree, trace: () }
    }
}

impl<F: EdgeStoreFactory, T: TraceSink> SuffixTreeBuilder<F, T> {
    pub fn with_trace<U: TraceSink>(self, trace: U) -> SuffixTreeBuilder<F, U> {
        SuffixTreeBuilder {
            tree: self.tree,
            trace,
        }
    }

    /// Inserts every suffix of `sequence`, tagging new edges with `id`.
    ///
    /// A rejected id or symbol hands the untouched builder back through
    /// [`InsertError::into_builder`]. If construction itself fails the tree is half built and is
    /// dropped. No sentinel is appended; sequences that should keep a leaf per suffix must end
    /// with a unique terminator.
    pub fn add_sequence(
        mut self,
        id: StringId,
        sequence: &[u8],
    ) -> result::Result<SuffixTreeBuilder<F, T>, InsertError<F, T>> {
        if let Err(error) = self.check(id, sequence) {
            return Err(InsertError {
                error,
                builder: Some(self),
            });
        }

        debug!("inserting sequence {} of length {}", id, sequence.len());

        let source = self.tree.add_source(id, sequence.to_vec());
        let terminal = self.tree.open_terminal();
        if let Err(error) = Ukkonen::new(&mut self.tree, &mut self.trace, source, terminal).run() {
            warn!("dropping tree after failed insertion of {}: {}", id, error);
            return Err(InsertError { error, builder: None });
        }

        debug!(
            "inserted sequence {}, tree has {} nodes and {} edges",
            id,
            self.tree.nodes.len(),
            self.tree.edges.len()
        );

        Ok(self)
    }

    fn check(&self, id: StringId, sequence: &[u8]) -> Result<()> {
        if self.tree.contains_id(id) {
            return Err(Error::DuplicateStringId(id));
        }
        match sequence.iter().find(|&&symbol| !self.tree.factory.supports(symbol)) {
            Some(&symbol) => Err(Error::SymbolOutsideAlphabet(symbol)),
            None => Ok(()),
        }
    }

    pub fn build(self) -> SuffixTree<F> {
        self.tree
    }

    pub fn into_parts(self) -> (SuffixTree<F>, T) {
        (self.tree, self.trace)
    }
}

/// Why [`SuffixTreeBuilder::add_sequence`] failed, plus the builder when it is still intact.
pub struct InsertError<F: EdgeStoreFactory, T> {
    error: Error,
    builder: Option<SuffixTreeBuilder<F, T>>,
}

impl<F: EdgeStoreFactory, T> InsertError<F, T> {
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// `None` after an invariant violation.
    pub fn into_builder(self) -> Option<SuffixTreeBuilder<F, T>> {
        self.builder
    }

    pub fn into_error(self) -> Error {
        self.error
    }
}

impl<F: EdgeStoreFactory, T> fmt::Debug for InsertError<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .field("recoverable", &self.builder.is_some())
            .finish()
    }
}

impl<F: EdgeStoreFactory, T> fmt::Display for InsertError<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<F: EdgeStoreFactory, T> error::Error for InsertError<F, T> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<F: EdgeStoreFactory, T> From<InsertError<F, T>> for Error {
    fn from(err: InsertError<F, T>) -> Error {
        err.error
    }
}

#[derive(Debug, Clone, Copy)]
struct ActivePoint {
    node: NodeId,
    edge: Option<EdgeId>,
    length: usize,
}

enum Step {
    Along,
    // The active edge is exhausted and its child continues with the symbol.
    Into(NodeId, EdgeId),
    Branch,
}

struct Ukkonen<'t, F: EdgeStoreFactory, T> {
    tree: &'t mut SuffixTree<F>,
    trace: &'t mut T,
    source: usize,
    terminal: TerminalId,

    active: ActivePoint,
    /// Number of suffixes of the current prefix that already end in a leaf.
    peg: usize,
    position: usize,
}

impl<'t, F: EdgeStoreFactory, T: TraceSink> Ukkonen<'t, F, T> {
    fn new(
        tree: &'t mut SuffixTree<F>,
        trace: &'t mut T,
        source: usize,
        terminal: TerminalId,
    ) -> Self {
        Ukkonen {
            tree,
            trace,
            source,
            terminal,

            active: ActivePoint {
                node: ROOT,
                edge: None,
                length: 0,
            },
            peg: 0,
            position: 0,
        }
    }

    fn len(&self) -> usize {
        self.tree.sources[self.source].text.len()
    }

    fn symbol(&self, position: usize) -> u8 {
        self.tree.sources[self.source].text[position]
    }

    fn violation(&self, violation: Violation) -> Error {
        Error::InvariantViolation {
            position: self.position,
            violation,
        }
    }

    fn run(&mut self) -> Result<()> {
        let mut traced = None;

        while self.position < self.len() {
            let c = self.symbol(self.position);

            if traced != Some(self.position) {
                trace!("position {}, inserting '{}', peg {}", self.position, c as char, self.peg);
                self.trace.record(TraceEvent::Symbol {
                    position: self.position,
                    symbol: c,
                });
                traced = Some(self.position);
            }

            match self.active.edge {
                None => {
                    if self.active.node != ROOT {
                        return Err(self.violation(Violation::DetachedActivePoint));
                    }

                    match self.tree.nodes[ROOT].edge(c) {
                        Some(edge) => {
                            self.active.edge = Some(edge);
                            self.active.length += 1;
                        }
                        None => {
                            self.add_leaf(ROOT, c)?;
                            self.peg += 1;
                        }
                    }
                    self.position += 1;
                }
                Some(edge) => match self.step(edge, c) {
                    Step::Along => {
                        self.active.length += 1;
                        self.position += 1;
                    }
                    Step::Into(node, edge) => {
                        self.active = ActivePoint {
                            node,
                            edge: Some(edge),
                            length: 1,
                        };
                        self.position += 1;
                    }
                    Step::Branch => {
                        // Branching consumes the position only when it runs into a suffix that is
                        // already present. Otherwise every pending suffix got its leaf and the
                        // same position starts over from the root.
                        if !self.branch(c)? {
                            continue;
                        }
                    }
                },
            }

            self.tree.terminals[self.terminal] += 1;
        }

        Ok(())
    }

    fn step(&self, edge: EdgeId, c: u8) -> Step {
        let edge = &self.tree.edges[edge];

        if self.active.length < self.tree.label_len(edge) {
            if self.tree.symbol_at(edge, self.active.length) == c {
                Step::Along
            } else {
                Step::Branch
            }
        } else {
            edge.child
                .and_then(|child| {
                    let next = self.tree.nodes[child].edge(c)?;
                    Some(Step::Into(child, next))
                })
                .unwrap_or(Step::Branch)
        }
    }

    /// Adds the current symbol to every pending suffix that does not have it yet. Returns whether
    /// the position was consumed because a suffix turned out to be present already.
    fn branch(&mut self, c: u8) -> Result<bool> {
        // Internal node created earlier in this round that still waits for its suffix link.
        let mut pending: Option<NodeId> = None;

        while self.peg < self.position {
            let edge_id = self.resolve()?;
            let edge = self.tree.edges[edge_id];
            let length = self.active.length;

            if length < self.tree.label_len(&edge) {
                if self.tree.symbol_at(&edge, length) == c {
                    self.active.length += 1;
                    self.position += 1;
                    return Ok(true);
                }

                let internal = self.split(edge_id, c)?;
                self.chain(&mut pending, internal);
            } else if let Some(child) = edge.child {
                if let Some(next) = self.tree.nodes[child].edge(c) {
                    if let Some(node) = pending.take() {
                        self.tree.nodes[node].suffix_link = child;
                    }

                    self.active = ActivePoint {
                        node: child,
                        edge: Some(next),
                        length: 1,
                    };
                    self.position += 1;
                    return Ok(true);
                }

                self.add_leaf(child, c)?;
                if let Some(node) = pending.take() {
                    self.tree.nodes[node].suffix_link = child;
                }
            } else {
                let internal = self.grow_closed_leaf(edge_id, c)?;
                self.chain(&mut pending, internal);
            }

            self.follow_suffix_link();
            self.peg += 1;
        }

        self.active.edge = None;
        self.active.length = 0;

        Ok(false)
    }

    /// Finds the edge the pending suffix ends on, skipping whole edges on the way down. From the
    /// root the distance is recomputed from the number of pending suffixes.
    fn resolve(&mut self) -> Result<EdgeId> {
        if self.active.node == ROOT {
            self.active.length = self.position - self.peg;
        }

        let mut edge = self.edge_from(self.active.node)?;
        loop {
            let label_len = self.tree.label_len(&self.tree.edges[edge]);
            if self.active.length <= label_len {
                break;
            }

            self.active.length -= label_len;
            self.active.node = self.tree.edges[edge]
                .child
                .ok_or_else(|| self.violation(Violation::WalkedPastLeaf))?;
            edge = self.edge_from(self.active.node)?;
        }

        self.active.edge = Some(edge);
        Ok(edge)
    }

    fn edge_from(&self, node: NodeId) -> Result<EdgeId> {
        let symbol = self.symbol(self.position - self.active.length);
        self.tree.nodes[node]
            .edge(symbol)
            .ok_or_else(|| self.violation(Violation::MissingEdge(symbol)))
    }

    fn add_leaf(&mut self, node: NodeId, c: u8) -> Result<EdgeId> {
        let leaf = Edge {
            source: self.source,
            start: self.position,
            end: End::Open(self.terminal),
            child: None,
        };
        self.tree.attach(node, c, leaf)
    }

    /// Splits `edge_id` after `active.length` symbols and hangs a new leaf for `c` off the new
    /// internal node.
    fn split(&mut self, edge_id: EdgeId, c: u8) -> Result<NodeId> {
        let internal = self.tree.create_node();

        let edge = self.tree.edges[edge_id];
        let boundary = edge.start + self.active.length;
        let remainder = Edge {
            source: edge.source,
            start: boundary,
            end: edge.end,
            child: edge.child,
        };
        let remainder_symbol = self.tree.symbol_at(&edge, self.active.length);

        {
            let edge = &mut self.tree.edges[edge_id];
            edge.end = End::Closed(boundary);
            edge.child = Some(internal);
        }

        self.tree.attach(internal, remainder_symbol, remainder)?;
        self.add_leaf(internal, c)?;

        Ok(internal)
    }

    /// The active point sits at the end of a leaf left behind by an earlier sequence. The leaf
    /// becomes an internal edge with the new leaf below it.
    fn grow_closed_leaf(&mut self, edge_id: EdgeId, c: u8) -> Result<NodeId> {
        let internal = self.tree.create_node();

        let end = self.tree.end(&self.tree.edges[edge_id]);
        {
            let edge = &mut self.tree.edges[edge_id];
            edge.end = End::Closed(end);
            edge.child = Some(internal);
        }

        self.add_leaf(internal, c)?;

        Ok(internal)
    }

    fn chain(&mut self, pending: &mut Option<NodeId>, internal: NodeId) {
        if let Some(previous) = *pending {
            self.tree.nodes[previous].suffix_link = internal;
        }
        *pending = Some(internal);

        // A chain ends once the extensions bottom out at the root; the next one starts fresh.
        let node = self.active.node;
        if node != ROOT && self.tree.nodes[node].suffix_link == ROOT {
            *pending = None;
        }
    }

    fn follow_suffix_link(&mut self) {
        let from = self.active.node;
        self.active.node = self.tree.nodes[from].suffix_link;

        let to_root = self.tree.nodes[self.active.node].is_root;
        trace!("suffix link {} -> {}", from, self.active.node);
        self.trace.record(TraceEvent::SuffixLinkHop { to_root });
    }
}
