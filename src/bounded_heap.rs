use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Upper bound on the slots reserved up front; larger capacities grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// A min-heap that keeps only the `capacity` greatest items pushed into it.
///
/// The smallest retained item sits on top, so each push is one comparison plus at most
/// one `O(log N)` replacement, and memory stays at `O(N)` however many items stream past.
///
/// An item equal to the current minimum does not displace it: earlier items win ties.
/// Types that need a specific tie order should encode it in their `Ord`.
pub struct BoundedMinHeap<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
    capacity: usize,
}

impl<T: Ord> BoundedMinHeap<T> {
    /// Creates a new bounded min-heap with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    /// Offer an item. It is kept if there is room or if it beats the current minimum,
    /// which is then evicted.
    pub fn push(&mut self, item: T) {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(item));
        } else if let Some(Reverse(min)) = self.heap.peek() {
            if &item > min {
                self.heap.pop();
                self.heap.push(Reverse(item));
            }
        }
    }

    /// Consumes the heap and returns the items in descending order (largest first).
    pub fn into_sorted_vec(self) -> Vec<T> {
        // Ascending order of Reverse<T> is descending order of T.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(x)| x)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_heap_basic() {
        let mut heap = BoundedMinHeap::new(3);

        heap.push(5);
        heap.push(2);
        heap.push(8);

        let sorted = heap.into_sorted_vec();
        assert_eq!(sorted, vec![8, 5, 2]);
    }

    #[test]
    fn test_bounded_heap_eviction() {
        let mut heap = BoundedMinHeap::new(3);

        heap.push(5);
        heap.push(2);
        heap.push(8);

        // 10 evicts 2
        heap.push(10);

        let sorted = heap.into_sorted_vec();
        assert_eq!(sorted, vec![10, 8, 5]);
    }

    #[test]
    fn test_bounded_heap_no_eviction_on_tie() {
        let mut heap = BoundedMinHeap::new(2);

        heap.push((5, "first"));
        heap.push((7, "second"));
        heap.push((5, "first"));

        assert_eq!(heap.into_sorted_vec(), vec![(7, "second"), (5, "first")]);
    }

    #[test]
    fn test_bounded_heap_keeps_largest_n() {
        let mut heap = BoundedMinHeap::new(5);

        for i in 0..100 {
            heap.push(i);
        }

        let sorted = heap.into_sorted_vec();
        assert_eq!(sorted, vec![99, 98, 97, 96, 95]);
    }

    #[test]
    fn test_bounded_heap_zero_capacity_keeps_nothing() {
        let mut heap = BoundedMinHeap::new(0);
        heap.push(42);
        assert_eq!(heap.into_sorted_vec(), Vec::<i32>::new());
    }

    #[test]
    fn test_bounded_heap_huge_capacity_does_not_preallocate() {
        let mut heap = BoundedMinHeap::new(usize::MAX);
        heap.push(1);
        heap.push(3);
        assert_eq!(heap.into_sorted_vec(), vec![3, 1]);
    }
}
