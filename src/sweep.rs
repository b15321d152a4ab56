//! The sweep-line orchestrator.
//!
//! One diagram computation is one synchronous pass: seed a site event per
//! input site, then pop events in sweep order (decreasing `y`). Site events
//! split an arc and start a pair of boundary edges; circle events collapse
//! an arc into a Voronoi vertex, finalize the edges that meet there, and
//! start the merged boundary between the surviving neighbors. When the
//! queue drains, edges still on the beachline are clipped to the bounds and
//! partnered edge halves are joined.

use kurbo::Rect;

use crate::beachline::{Beachline, NodeIdx};
use crate::edges::{Edge, EdgeIdx, EdgeVec, HalfEdge};
use crate::geom::{Parabola, Point};
use crate::queue::{Event, EventKind, EventQueue, EventVec};

/// Computes one Voronoi diagram.
///
/// A sweeper exclusively owns its beachline, queue and edge list; it is
/// consumed by [`Sweeper::run`] and cannot be reused across computations.
pub struct Sweeper {
    beachline: Beachline,
    queue: EventQueue,
    events: EventVec<Event>,
    edges: EdgeVec<HalfEdge>,
    /// Edges that belong to the output, in emission order. Of a partnered
    /// pair only the first half is emitted; the second half lives on in the
    /// arena and contributes its endpoint when the pair is joined.
    emitted: Vec<EdgeIdx>,
    bounds: Rect,
}

impl Sweeper {
    /// A sweeper clipping its diagram to `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Sweeper {
            beachline: Beachline::default(),
            queue: EventQueue::new(),
            events: EventVec::default(),
            edges: EdgeVec::default(),
            emitted: Vec::new(),
            bounds,
        }
    }

    /// Run the sweep over `sites` and return the finished edge list.
    ///
    /// Fewer than two sites produce no edges.
    pub fn run(mut self, sites: &[Point]) -> Vec<Edge> {
        if sites.len() < 2 {
            return Vec::new();
        }

        for &site in sites {
            let idx = self.events.push(Event {
                point: site,
                kind: EventKind::Site,
            });
            self.queue.push(self.events[idx].key(), idx);
        }

        while let Some(idx) = self.queue.pop() {
            let event = self.events[idx];
            match event.kind {
                EventKind::Site => self.handle_site(event.point),
                EventKind::Circle { arc, center } => {
                    self.handle_circle(arc, center, event.point.y)
                }
            }
        }

        self.finish()
    }

    /// The sweep line reaches `site`: insert its arc into the beachline.
    fn handle_site(&mut self, site: Point) {
        let sweep_y = site.y;

        if self.beachline.root().is_none() {
            let arc = self.beachline.new_arc(site);
            self.beachline.set_root(arc);
            return;
        }

        // unwrap: the beachline is non-empty, so the descent reaches a leaf.
        let covering = self.beachline.arc_at(site.x, sweep_y).unwrap();
        self.cancel_circle(covering);
        let focus = self.beachline.focus(covering);

        // Degenerate case: the covering arc's focus sits on the sweep line,
        // so neither parabola extends yet and the split point cannot be
        // evaluated. This happens exactly when several sites share the
        // topmost row; the boundary is their vertical bisector, started at
        // the top bound. Vertical rays never converge with their neighbors,
        // so no circle check is needed.
        if focus.y - site.y < f64::EPSILON {
            let middle = Point::new((site.x + focus.x) / 2.0, self.bounds.max_y());
            let (left_focus, right_focus) = if site.x > focus.x {
                (focus, site)
            } else {
                (site, focus)
            };
            let edge = self.edges.push(HalfEdge::new(middle, left_focus, right_focus));
            let edge_node = self.beachline.new_edge_node(edge);
            let left = self.beachline.new_arc(left_focus);
            let right = self.beachline.new_arc(right_focus);
            self.beachline.replace(covering, edge_node);
            self.beachline.set_left(edge_node, Some(left));
            self.beachline.set_right(edge_node, Some(right));
            self.emitted.push(edge);
            return;
        }

        // General case: split the covering arc into three.
        let split = Point::new(
            site.x,
            Parabola::from_focus(focus, sweep_y).eval(site.x),
        );

        // Two partnered edge halves grow from the split point in opposite
        // directions; only the left half is emitted.
        let left_edge = self.edges.push(HalfEdge::new(split, focus, site));
        let right_edge = self.edges.push(HalfEdge::new(split, site, focus));
        self.edges[left_edge].partner = Some(right_edge);
        self.emitted.push(left_edge);

        // The covering arc becomes: [copy] left_edge [new] right_edge [copy].
        let right_node = self.beachline.new_edge_node(right_edge);
        let left_node = self.beachline.new_edge_node(left_edge);
        self.beachline.replace(covering, right_node);

        let outer_left = self.beachline.new_arc(focus);
        let new_arc = self.beachline.new_arc(site);
        let outer_right = self.beachline.new_arc(focus);
        self.beachline.set_left(right_node, Some(left_node));
        self.beachline.set_right(right_node, Some(outer_right));
        self.beachline.set_left(left_node, Some(outer_left));
        self.beachline.set_right(left_node, Some(new_arc));

        self.check_circle(outer_left, sweep_y);
        self.check_circle(outer_right, sweep_y);
    }

    /// The arc at `arc` shrinks to nothing at the Voronoi vertex `vertex`:
    /// finalize the two boundaries that meet there and merge them into one.
    fn handle_circle(&mut self, arc: NodeIdx, vertex: Point, sweep_y: f64) {
        // A scheduled circle event's arc is interior: it has edges and arcs
        // on both sides. (check_circle refused it otherwise, and
        // cancellation removed the event before any restructuring.)
        let Some(pred) = self.beachline.predecessor(arc) else {
            return;
        };
        let Some(succ) = self.beachline.successor(arc) else {
            return;
        };
        let Some(outer_left) = self.beachline.predecessor(pred) else {
            return;
        };
        let Some(outer_right) = self.beachline.successor(succ) else {
            return;
        };

        // Their adjacency is about to change, so any convergence predicted
        // for the outer arcs no longer holds.
        self.cancel_circle(outer_left);
        self.cancel_circle(outer_right);

        self.edges[self.beachline.edge(pred)].end = Some(vertex);
        self.edges[self.beachline.edge(succ)].end = Some(vertex);

        // Of the two boundary edges, one is the collapsing arc's parent and
        // the other sits higher in the tree. The merged edge replaces the
        // higher one; the parent is deleted along with the arc.
        let parent = self.beachline.parent(arc);
        let higher = if parent == Some(pred) { succ } else { pred };

        let merged = self.edges.push(HalfEdge::new(
            vertex,
            self.beachline.focus(outer_left),
            self.beachline.focus(outer_right),
        ));
        let merged_node = self.beachline.new_edge_node(merged);
        self.beachline.replace(higher, merged_node);
        self.emitted.push(merged);

        self.beachline.remove(arc);
        if let Some(parent) = parent {
            self.beachline.remove(parent);
        }

        self.check_circle(outer_left, sweep_y);
        self.check_circle(outer_right, sweep_y);
    }

    /// Predict whether `arc` will be squeezed out by its neighbors, and if
    /// so schedule the circle event.
    fn check_circle(&mut self, arc: NodeIdx, sweep_y: f64) {
        let Some(pred) = self.beachline.predecessor(arc) else {
            return;
        };
        let Some(succ) = self.beachline.successor(arc) else {
            return;
        };
        let Some(outer_left) = self.beachline.predecessor(pred) else {
            return;
        };
        let Some(outer_right) = self.beachline.successor(succ) else {
            return;
        };

        // Equal outer foci means both boundaries bisect the same pair of
        // sites; there is no convergence, just one region wrapping around.
        if self.beachline.focus(outer_left) == self.beachline.focus(outer_right) {
            return;
        }

        let Some(center) = self.edges[self.beachline.edge(pred)]
            .intersection(&self.edges[self.beachline.edge(succ)])
        else {
            return;
        };

        // The event fires when the sweep line touches the bottom of the
        // circumcircle. A candidate above the sweep describes a convergence
        // the sweep has already passed.
        let radius = self.beachline.focus(outer_left).distance(center);
        let vertex_y = center.y - radius;
        if vertex_y.is_nan() || vertex_y > sweep_y {
            return;
        }

        let event = self.events.push(Event {
            point: Point::new(center.x, vertex_y),
            kind: EventKind::Circle { arc, center },
        });
        self.beachline.set_circle(arc, Some(event));
        self.queue.push(self.events[event].key(), event);
    }

    /// Cancel the pending circle event on `arc`, if any: clear the arc's
    /// back-reference and drop the event from the queue.
    fn cancel_circle(&mut self, arc: NodeIdx) {
        if let Some(event) = self.beachline.take_circle(arc) {
            self.queue.remove(event);
        }
    }

    /// Clip the still-open edges to the bounds and join partnered halves
    /// into continuous edges.
    fn finish(mut self) -> Vec<Edge> {
        for node in self.beachline.edge_nodes() {
            self.edges[self.beachline.edge(node)].clip_to(&self.bounds);
        }

        for &idx in &self.emitted {
            if let Some(partner) = self.edges[idx].partner {
                // unwrap: the partner was finalized by a circle event or
                // clipped just above; either way its end is known.
                let joined_start = self.edges[partner].end.unwrap();
                self.edges[idx].start = joined_start;
            }
        }

        self.emitted
            .iter()
            .map(|&idx| {
                let e = &self.edges[idx];
                Edge {
                    start: e.start,
                    // unwrap: emitted edges were finalized or clipped.
                    end: e.end.unwrap(),
                    focus_a: e.focus_a,
                    focus_b: e.focus_b,
                }
            })
            .collect()
    }
}
