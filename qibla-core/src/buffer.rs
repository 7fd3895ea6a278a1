//! Fixed-Size Circular Buffer for Recent Sensor Values
//!
//! ## Overview
//!
//! A ring buffer whose capacity is a const generic. The compass keeps its
//! calibration window here: the newest heading always goes in, and once the
//! buffer is full the oldest one falls out. No allocation ever happens after
//! construction.
//!
//! ## Design Rationale
//!
//! ### Why Not `heapless::Vec`?
//!
//! `heapless::Vec::push` fails when full. A sliding window wants the
//! opposite behavior (evict the oldest, keep the newest), and it wants
//! iteration in arrival order regardless of where the write cursor sits.
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<f64, 5> after 7 pushes (values 1..=7):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  6  │  7  │  3  │  4  │  5  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── write_pos = 2, also the oldest element
//!
//! Logical view (iter): [3, 4, 5, 6, 7]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use qibla_core::buffer::CircularBuffer;
//!
//! let mut window: CircularBuffer<f64, 3> = CircularBuffer::new();
//! for heading in [10.0, 11.0, 12.0, 13.0] {
//!     window.push(heading);
//! }
//!
//! let kept: Vec<f64> = window.iter().copied().collect();
//! assert_eq!(kept, vec![11.0, 12.0, 13.0]);
//! ```

/// Fixed-size circular buffer
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - iteration yields items oldest to newest
///
/// ## Thread Safety
///
/// Not synchronized. The compass engine owns its buffer exclusively; wrap
/// the owner in a mutex when samples arrive on several threads.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Option instead of MaybeUninit keeps this free of unsafe code
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Number of valid items, saturates at N
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds an item, overwriting the oldest one when full
    pub fn push(&mut self, item: T) {
        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of items held
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The oldest item still held
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// The most recent item
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Item by logical index (0 = oldest)
    ///
    /// When full, the oldest element sits at `write_pos`:
    ///
    /// ```text
    /// physical [D, E, A, B, C]  write_pos = 2
    /// logical  [A, B, C, D, E]  logical[i] = physical[(2 + i) % 5]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
