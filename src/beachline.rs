//! The beachline: an ordered binary tree over the sweep frontier.
//!
//! Leaves are arcs (one per site currently shaping the frontier) and
//! interior nodes are the edges between adjacent arcs. Read left to right,
//! the leaves match the left-to-right order of the arcs at the current sweep
//! position. There is no stored sort key: an interior node's key is the `x`
//! where its two neighboring arcs' parabolas cross, recomputed from the
//! sweep position on demand.
//!
//! Nodes live in an arena and link parent/children by index, so the
//! two-variant node type stays free of pointer cycles.

use crate::edges::EdgeIdx;
use crate::geom::{Parabola, Point};
use crate::queue::EventIdx;

/// An index into the beachline's node arena.
///
/// Removal detaches a node but never reuses its slot, so indices stay valid
/// for the duration of one sweep.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub usize);

/// A vector of beachline nodes, indexed by [`NodeIdx`].
#[derive(Clone, Debug)]
pub struct NodeVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(NodeVec, NodeIdx, "n");

#[derive(Clone, Debug)]
enum NodeKind {
    /// A leaf: the exposed part of one site's parabola.
    Arc {
        focus: Point,
        /// The pending circle event that would collapse this arc, if one is
        /// scheduled. At most one at a time.
        circle: Option<EventIdx>,
    },
    /// An interior node: the boundary ray between the two neighboring arcs.
    Edge(EdgeIdx),
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeIdx>,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
    kind: NodeKind,
}

/// The beachline tree.
#[derive(Clone, Debug, Default)]
pub struct Beachline {
    nodes: NodeVec<Node>,
    root: Option<NodeIdx>,
}

impl Beachline {
    pub fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    pub fn set_root(&mut self, node: NodeIdx) {
        self.root = Some(node);
        self.nodes[node].parent = None;
    }

    /// Allocate a new, unlinked arc leaf.
    pub fn new_arc(&mut self, focus: Point) -> NodeIdx {
        self.nodes.push(Node {
            parent: None,
            left: None,
            right: None,
            kind: NodeKind::Arc {
                focus,
                circle: None,
            },
        })
    }

    /// Allocate a new, unlinked edge node.
    pub fn new_edge_node(&mut self, edge: EdgeIdx) -> NodeIdx {
        self.nodes.push(Node {
            parent: None,
            left: None,
            right: None,
            kind: NodeKind::Edge(edge),
        })
    }

    pub fn is_arc(&self, node: NodeIdx) -> bool {
        matches!(self.nodes[node].kind, NodeKind::Arc { .. })
    }

    /// The focus of an arc leaf.
    ///
    /// Panics if `node` is an edge; callers only reach arcs through
    /// leaf-returning queries.
    pub fn focus(&self, node: NodeIdx) -> Point {
        match &self.nodes[node].kind {
            NodeKind::Arc { focus, .. } => *focus,
            NodeKind::Edge(_) => unreachable!("focus() called on an edge node"),
        }
    }

    /// The edge handle of an interior node.
    pub fn edge(&self, node: NodeIdx) -> EdgeIdx {
        match &self.nodes[node].kind {
            NodeKind::Edge(edge) => *edge,
            NodeKind::Arc { .. } => unreachable!("edge() called on an arc node"),
        }
    }

    pub fn parent(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.nodes[node].parent
    }

    /// The pending circle event on an arc, if any.
    pub fn circle(&self, node: NodeIdx) -> Option<EventIdx> {
        match &self.nodes[node].kind {
            NodeKind::Arc { circle, .. } => *circle,
            NodeKind::Edge(_) => unreachable!("circle() called on an edge node"),
        }
    }

    pub fn set_circle(&mut self, node: NodeIdx, event: Option<EventIdx>) {
        match &mut self.nodes[node].kind {
            NodeKind::Arc { circle, .. } => *circle = event,
            NodeKind::Edge(_) => unreachable!("set_circle() called on an edge node"),
        }
    }

    /// Clear and return the pending circle event on an arc.
    pub fn take_circle(&mut self, node: NodeIdx) -> Option<EventIdx> {
        match &mut self.nodes[node].kind {
            NodeKind::Arc { circle, .. } => circle.take(),
            NodeKind::Edge(_) => unreachable!("take_circle() called on an edge node"),
        }
    }

    pub fn set_left(&mut self, parent: NodeIdx, child: Option<NodeIdx>) {
        self.nodes[parent].left = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    pub fn set_right(&mut self, parent: NodeIdx, child: Option<NodeIdx>) {
        self.nodes[parent].right = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    /// The leftmost leaf of the subtree rooted at `node`.
    pub fn minimum(&self, node: NodeIdx) -> NodeIdx {
        let mut current = node;
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        current
    }

    /// The rightmost leaf of the subtree rooted at `node`.
    pub fn maximum(&self, node: NodeIdx) -> NodeIdx {
        let mut current = node;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        current
    }

    /// The in-order successor of `node`, or `None` at the right boundary.
    ///
    /// Arcs and edges strictly alternate in-order, so the successor of an
    /// edge is always an arc and vice versa.
    pub fn successor(&self, node: NodeIdx) -> Option<NodeIdx> {
        if let Some(right) = self.nodes[node].right {
            return Some(self.minimum(right));
        }
        let mut current = node;
        loop {
            let parent = self.nodes[current].parent?;
            if self.nodes[parent].right == Some(current) {
                current = parent;
            } else {
                return Some(parent);
            }
        }
    }

    /// The in-order predecessor of `node`, or `None` at the left boundary.
    pub fn predecessor(&self, node: NodeIdx) -> Option<NodeIdx> {
        if let Some(left) = self.nodes[node].left {
            return Some(self.maximum(left));
        }
        let mut current = node;
        loop {
            let parent = self.nodes[current].parent?;
            if self.nodes[parent].left == Some(current) {
                current = parent;
            } else {
                return Some(parent);
            }
        }
    }

    /// The `x` where the two arcs adjacent to the edge at `node` cross, at
    /// sweep position `sweep_y`.
    ///
    /// Subtracting the two parabolas leaves a quadratic; if the leading
    /// terms cancel (equal-height foci) the linear residual has the single
    /// crossing. Otherwise the quadratic has two roots, one per side of the
    /// narrower parabola; the focus with the lower `y` decides which root is
    /// the crossing in left-to-right order.
    pub fn breakpoint_x(&self, node: NodeIdx, sweep_y: f64) -> f64 {
        // unwrap: an interior node has both subtrees, so both neighbors exist.
        let left_focus = self.focus(self.predecessor(node).unwrap());
        let right_focus = self.focus(self.successor(node).unwrap());
        let lp = Parabola::from_focus(left_focus, sweep_y);
        let rp = Parabola::from_focus(right_focus, sweep_y);

        let a = lp.a - rp.a;
        let b = lp.b - rp.b;
        let c = lp.c - rp.c;

        if a == 0.0 {
            return -c / b;
        }

        let discriminant = b * b - 4.0 * a * c;
        let x1 = (-b + discriminant.sqrt()) / (2.0 * a);
        let x2 = (-b - discriminant.sqrt()) / (2.0 * a);

        if left_focus.y < right_focus.y {
            x1.max(x2)
        } else {
            x1.min(x2)
        }
    }

    /// Descend from the root to the arc covering `x` at sweep position
    /// `sweep_y`, or `None` if the beachline is empty.
    ///
    /// A NaN breakpoint (a degenerate arc whose focus sits on the sweep
    /// line) compares false and falls right, matching the descent order the
    /// rest of the algorithm assumes.
    pub fn arc_at(&self, x: f64, sweep_y: f64) -> Option<NodeIdx> {
        let mut current = self.root?;
        while !self.is_arc(current) {
            current = if self.breakpoint_x(current, sweep_y) > x {
                // unwrap: edge nodes have both children
                self.nodes[current].left.unwrap()
            } else {
                self.nodes[current].right.unwrap()
            };
        }
        Some(current)
    }

    /// Substitute `other` for `current`, adopting `current`'s parent and
    /// children. `current` is left detached.
    pub fn replace(&mut self, current: NodeIdx, other: NodeIdx) {
        match self.nodes[current].parent {
            None => self.set_root(other),
            Some(parent) => {
                if self.nodes[parent].left == Some(current) {
                    self.set_left(parent, Some(other));
                } else {
                    self.set_right(parent, Some(other));
                }
            }
        }
        self.set_left(other, self.nodes[current].left);
        self.set_right(other, self.nodes[current].right);
    }

    /// Standard binary-tree deletion of `node`.
    pub fn remove(&mut self, node: NodeIdx) {
        let (left, right) = (self.nodes[node].left, self.nodes[node].right);
        match (left, right) {
            (None, _) => self.shift_nodes(node, right),
            (_, None) => self.shift_nodes(node, left),
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                if self.nodes[successor].parent != Some(node) {
                    let successor_right = self.nodes[successor].right;
                    self.shift_nodes(successor, successor_right);
                    self.set_right(successor, self.nodes[node].right);
                }
                self.shift_nodes(node, Some(successor));
                self.set_left(successor, Some(left));
            }
        }
    }

    /// Replace the subtree at `u` with the subtree at `v` (possibly empty).
    fn shift_nodes(&mut self, u: NodeIdx, v: Option<NodeIdx>) {
        match self.nodes[u].parent {
            None => {
                self.root = v;
            }
            Some(parent) => {
                if self.nodes[parent].left == Some(u) {
                    self.nodes[parent].left = v;
                } else {
                    self.nodes[parent].right = v;
                }
            }
        }
        if let Some(v) = v {
            self.nodes[v].parent = self.nodes[u].parent;
        }
    }

    /// Every edge still on the beachline when the sweep completes. These
    /// are the diagram's unbounded edges, to be clipped to the bounds.
    pub fn edge_nodes(&self) -> Vec<NodeIdx> {
        let mut result = Vec::new();
        if let Some(root) = self.root {
            self.collect_edge_nodes(root, &mut result);
        }
        result
    }

    fn collect_edge_nodes(&self, node: NodeIdx, out: &mut Vec<NodeIdx>) {
        if self.is_arc(node) {
            return;
        }
        // unwrap: edge nodes have both children
        self.collect_edge_nodes(self.nodes[node].left.unwrap(), out);
        self.collect_edge_nodes(self.nodes[node].right.unwrap(), out);
        out.push(node);
    }
}
