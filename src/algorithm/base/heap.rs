use std::cmp::Reverse;
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;


pub type MyMinHeap<I> = PriorityQueue<I, Priority>;


/// Smaller distance first; on equal distance the smaller tie-break key wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority (Reverse<(OrderedFloat<f64>, usize)>);

impl Priority {
    pub fn new(dist: f64, tiebreak: usize) -> Self {
        Self (Reverse((OrderedFloat(dist), tiebreak)))
    }
    pub fn dist(&self) -> f64 {
        ((self.0).0).0.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn it_pops_smallest_then_lowest_key() {
        let mut heap = MyMinHeap::new();
        heap.push("far", Priority::new(3.0, 0));
        heap.push("tied-late", Priority::new(1.0, 7));
        heap.push("tied-early", Priority::new(1.0, 2));
        assert_eq!(heap.pop().map(|(i, _)| i), Some("tied-early"));
        assert_eq!(heap.pop().map(|(i, _)| i), Some("tied-late"));
        let (item, priority) = heap.pop().unwrap();
        assert_eq!(item, "far");
        assert_eq!(priority.dist(), 3.0);
    }
}
