//! The event arena and the sweep's priority queue.
//!
//! Events pop in sweep order: decreasing `y`, ties broken by increasing `x`
//! and then by kind (site before circle). The queue is a binary heap with a
//! handle-to-slot index, so scheduling, popping and cancelling a pending
//! event are all logarithmic.

use crate::beachline::NodeIdx;
use crate::geom::Point;
use crate::num::CheapOrderedFloat;

/// An index into the event arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventIdx(usize);

/// A vector of events, indexed by [`EventIdx`].
#[derive(Clone, Debug)]
pub struct EventVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(EventVec, EventIdx, "ev");

/// A scheduled sweep event.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    /// Where the event fires. The sweep position when it is processed is
    /// `point.y`.
    pub point: Point,
    pub kind: EventKind,
}

#[derive(Clone, Copy, Debug)]
pub enum EventKind {
    /// The sweep line reaches a site; a new arc is inserted.
    Site,
    /// An arc is predicted to shrink to nothing, producing a Voronoi vertex.
    Circle {
        /// The arc that collapses when this event fires.
        arc: NodeIdx,
        /// The circumcenter of the three involved sites: the Voronoi vertex
        /// this event produces. The event's `point` is the bottom of the
        /// circumcircle, where the sweep line triggers it.
        center: Point,
    },
}

impl Event {
    fn rank(&self) -> u8 {
        match self.kind {
            EventKind::Site => 0,
            EventKind::Circle { .. } => 1,
        }
    }

    /// The queue ordering key for this event.
    pub fn key(&self) -> EventKey {
        EventKey {
            y: self.point.y.into(),
            x: self.point.x.into(),
            rank: self.rank(),
        }
    }
}

/// A queue key; smaller keys pop first.
///
/// The sweep descends, so larger `y` comes first; among equal `y`, smaller
/// `x`; among equal positions, site events before circle events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventKey {
    y: CheapOrderedFloat,
    x: CheapOrderedFloat,
    rank: u8,
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .y
            .cmp(&self.y)
            .then_with(|| self.x.cmp(&other.x))
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for EventKey {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A min-heap of pending events, keyed by [`EventKey`].
///
/// `slot` maps an event handle to its current heap position, which is what
/// makes [`EventQueue::remove`] logarithmic instead of a linear scan.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: Vec<(EventKey, EventIdx)>,
    slot: Vec<Option<usize>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Schedule `ev` with ordering key `key`. No deduplication.
    pub fn push(&mut self, key: EventKey, ev: EventIdx) {
        if ev.0 >= self.slot.len() {
            self.slot.resize(ev.0 + 1, None);
        }
        let i = self.heap.len();
        self.heap.push((key, ev));
        self.slot[ev.0] = Some(i);
        self.sift_up(i);
    }

    /// Remove and return the next event in sweep order.
    pub fn pop(&mut self) -> Option<EventIdx> {
        if self.heap.is_empty() {
            return None;
        }
        let (_, ev) = self.heap.swap_remove(0);
        self.slot[ev.0] = None;
        if let Some(&(_, moved)) = self.heap.first() {
            self.slot[moved.0] = Some(0);
            self.sift_down(0);
        }
        Some(ev)
    }

    /// Cancel a pending event. A no-op if `ev` is not in the queue (it may
    /// already have been popped or removed).
    pub fn remove(&mut self, ev: EventIdx) {
        let Some(i) = self.slot.get(ev.0).copied().flatten() else {
            return;
        };
        self.slot[ev.0] = None;
        self.heap.swap_remove(i);
        if i < self.heap.len() {
            let moved = self.heap[i].1;
            self.slot[moved.0] = Some(i);
            self.sift_down(i);
            self.sift_up(i);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let mut smallest = i;
            for child in [2 * i + 1, 2 * i + 2] {
                if child < self.heap.len() && self.heap[child].0 < self.heap[smallest].0 {
                    smallest = child;
                }
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.slot[self.heap[i].1 .0] = Some(i);
        self.slot[self.heap[j].1 .0] = Some(j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(events: &mut EventVec<Event>, x: f64, y: f64) -> EventIdx {
        events.push(Event {
            point: Point::new(x, y),
            kind: EventKind::Site,
        })
    }

    fn queue_of(events: &EventVec<Event>) -> EventQueue {
        let mut queue = EventQueue::new();
        for (idx, ev) in events.iter() {
            queue.push(ev.key(), idx);
        }
        queue
    }

    fn drain(events: &EventVec<Event>, queue: &mut EventQueue) -> Vec<Point> {
        std::iter::from_fn(|| queue.pop()).map(|ev| events[ev].point).collect()
    }

    #[test]
    fn pops_in_descending_y() {
        let mut events = EventVec::default();
        for &(x, y) in &[(0.0, 1.0), (0.0, 5.0), (0.0, 3.0), (0.0, 4.0)] {
            site(&mut events, x, y);
        }
        let mut queue = queue_of(&events);
        let ys: Vec<f64> = drain(&events, &mut queue).iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![5.0, 4.0, 3.0, 1.0]);
    }

    #[test]
    fn equal_y_ties_break_by_x() {
        let mut events = EventVec::default();
        for &(x, y) in &[(7.0, 2.0), (1.0, 2.0), (4.0, 2.0)] {
            site(&mut events, x, y);
        }
        let mut queue = queue_of(&events);
        let xs: Vec<f64> = drain(&events, &mut queue).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 4.0, 7.0]);
    }

    #[test]
    fn site_pops_before_circle_at_same_point() {
        let mut events = EventVec::default();
        let circle = events.push(Event {
            point: Point::new(3.0, 3.0),
            kind: EventKind::Circle {
                arc: NodeIdx(0),
                center: Point::new(3.0, 4.0),
            },
        });
        let site = site(&mut events, 3.0, 3.0);
        let mut queue = EventQueue::new();
        queue.push(events[circle].key(), circle);
        queue.push(events[site].key(), site);
        assert_eq!(queue.pop(), Some(site));
        assert_eq!(queue.pop(), Some(circle));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn remove_cancels_a_pending_event() {
        let mut events = EventVec::default();
        let a = site(&mut events, 0.0, 5.0);
        let b = site(&mut events, 0.0, 4.0);
        let c = site(&mut events, 0.0, 3.0);
        let mut queue = queue_of(&events);

        queue.remove(b);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(a));
        assert_eq!(queue.pop(), Some(c));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn remove_is_a_noop_when_absent() {
        let mut events = EventVec::default();
        let a = site(&mut events, 0.0, 5.0);
        let b = site(&mut events, 0.0, 4.0);
        let mut queue = EventQueue::new();
        queue.push(events[a].key(), a);

        // b was never scheduled; a was, so removing it twice exercises the
        // already-removed path too.
        queue.remove(b);
        queue.remove(a);
        queue.remove(a);
        assert!(queue.is_empty());
    }

    #[test]
    fn interleaved_push_pop_remove_keeps_order() {
        let mut events = EventVec::default();
        let mut queue = EventQueue::new();
        let mut push = |events: &mut EventVec<Event>, queue: &mut EventQueue, y: f64| {
            let idx = site(events, 0.0, y);
            queue.push(events[idx].key(), idx);
            idx
        };

        let a = push(&mut events, &mut queue, 10.0);
        let _b = push(&mut events, &mut queue, 8.0);
        let c = push(&mut events, &mut queue, 9.0);
        assert_eq!(queue.pop(), Some(a));
        queue.remove(c);
        let d = push(&mut events, &mut queue, 7.0);
        let e = push(&mut events, &mut queue, 11.0);
        let order: Vec<EventIdx> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(order, vec![e, _b, d]);
    }
}
