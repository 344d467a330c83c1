//! Binary heap ordered by a caller-supplied comparator.
//!
//! The root always compares greater than or equal to every other element,
//! so `|a, b| a.cmp(b)` gives a max-heap and `|a, b| b.cmp(a)` a min-heap.
//!
//! ```
//! use prim_maze::heap::Heap;
//!
//! let mut heap = Heap::new(|a: &u32, b: &u32| b.cmp(a));
//! heap.insert(3);
//! heap.insert(1);
//! heap.insert(2);
//!
//! assert_eq!(heap.extract(), Some(1));
//! assert_eq!(heap.extract(), Some(2));
//! assert_eq!(heap.extract(), Some(3));
//! assert_eq!(heap.extract(), None);
//! ```

use std::{cmp::Ordering, fmt};

pub struct Heap<T, F> {
    data: Vec<T>,
    cmp: F,
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    pub fn new(cmp: F) -> Self {
        Self {
            data: Vec::new(),
            cmp,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Insert an element, sifting it up while its parent compares lower.
    pub fn insert(&mut self, x: T) {
        self.data.push(x);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the root.
    ///
    /// Returns `None` when the heap is empty.
    pub fn extract(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }

        // last element takes the root's place
        let top = self.data.swap_remove(0);
        self.sift_down(0);

        Some(top)
    }

    /// Return the root without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The heap's backing array in level order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;

            if (self.cmp)(&self.data[parent], &self.data[i]) != Ordering::Less {
                break;
            }

            self.data.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.data.len();

        loop {
            let left = i * 2 + 1;
            let right = i * 2 + 2;

            // right child only wins when strictly higher than the left one
            let mut top = i;
            if left < len && (self.cmp)(&self.data[top], &self.data[left]) == Ordering::Less {
                top = left;
            }
            if right < len && (self.cmp)(&self.data[top], &self.data[right]) == Ordering::Less {
                top = right;
            }

            if top == i {
                break;
            }

            self.data.swap(top, i);
            i = top;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Heap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap").field("data", &self.data).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn max_heap() -> Heap<i32, impl Fn(&i32, &i32) -> Ordering> {
        Heap::new(|a: &i32, b: &i32| a.cmp(b))
    }

    #[test]
    fn test_is_empty() {
        let mut heap = max_heap();
        assert!(heap.is_empty());

        heap.insert(1);
        assert!(!heap.is_empty());

        heap.extract();
        assert!(heap.is_empty());
    }

    #[test]
    fn test_insert_layout() {
        let mut heap = max_heap();

        heap.insert(2);
        assert_eq!(heap.as_slice(), &[2]);

        // children lower than root stay in place
        heap.insert(0);
        heap.insert(1);
        assert_eq!(heap.as_slice(), &[2, 0, 1]);

        heap.insert(3);
        assert_eq!(heap.as_slice(), &[3, 2, 1, 0]);

        heap.insert(4);
        assert_eq!(heap.as_slice(), &[4, 3, 1, 0, 2]);
    }

    #[test]
    fn test_insert_bubbles_to_root() {
        let mut heap = max_heap();
        for x in [11, 5, 8, 3, 4] {
            heap.insert(x);
        }
        assert_eq!(heap.as_slice(), &[11, 5, 8, 3, 4]);

        heap.insert(15);
        assert_eq!(heap.as_slice(), &[15, 5, 11, 3, 4, 8]);
    }

    #[test]
    fn test_extract() {
        let mut heap = max_heap();
        assert_eq!(heap.extract(), None);

        heap.insert(1);
        assert_eq!(heap.extract(), Some(1));
        assert!(heap.as_slice().is_empty());

        for x in [11, 5, 8, 3, 4] {
            heap.insert(x);
        }
        assert_eq!(heap.extract(), Some(11));
        assert_eq!(heap.as_slice(), &[8, 5, 4, 3]);
    }

    #[test]
    fn test_sift_down_prefers_left_on_tie() {
        // (priority, tag)
        let mut heap = Heap::new(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
        heap.insert((9, 'r'));
        heap.insert((5, 'a'));
        heap.insert((5, 'b'));
        heap.insert((1, 'c'));

        assert_eq!(heap.extract(), Some((9, 'r')));
        assert_eq!(heap.peek(), Some(&(5, 'a')));
    }

    #[test]
    fn test_min_heap() {
        let mut heap = Heap::with_capacity(4, |a: &u32, b: &u32| b.cmp(a));
        for x in [7, 3, 9, 3, 0] {
            heap.insert(x);
        }

        let drained: Vec<_> = std::iter::from_fn(|| heap.extract()).collect();
        assert_eq!(drained, vec![0, 3, 3, 7, 9]);
    }

    proptest! {
        #[test]
        fn extraction_is_never_below_remaining(
            ops in prop::collection::vec(prop::option::of(-50i32..50), 0..200)
        ) {
            let mut heap = max_heap();

            for op in ops {
                match op {
                    Some(x) => heap.insert(x),
                    None => {
                        if let Some(top) = heap.extract() {
                            prop_assert!(heap.as_slice().iter().all(|&x| top >= x));
                        }
                    }
                }
            }
        }
    }
}
