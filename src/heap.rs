//! An indexed binary min-heap with stable handles (component C2).
//!
//! Ported from `ad_pq`: the heap array holds handle indices rather than
//! values directly, so a caller's [`Handle`] stays valid across any number
//! of `update_key` calls and across growth — only the element's *slot*
//! moves, never its identity.

/// An opaque, stable reference to a heap element.
///
/// `Handle`s are never invalidated by subsequent heap operations; they are
/// indices into an arena of entries, not positions in the binary-heap array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: f64,
    info: i64,
    /// Current position of this entry in `heap`, kept in sync by every sift.
    pos: usize,
}

/// Binary min-heap keyed by `f64`, carrying an `i64` payload per element.
///
/// `put` sifts a new element up by shifting parents down into the gap and
/// writing the new element last, saving a comparison relative to
/// insert-then-sift-up. `update_key` sifts in the direction implied by
/// whether the key grew or shrank, and is a no-op if it didn't change.
#[derive(Debug, Clone, Default)]
pub struct IndexedHeap {
    entries: Vec<Entry>,
    /// `heap[i]` is the handle index occupying binary-heap slot `i`.
    heap: Vec<usize>,
}

impl IndexedHeap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            heap: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            heap: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    /// Inserts `(key, info)` and returns a stable handle to it.
    pub fn put(&mut self, key: f64, info: i64) -> Handle {
        let idx = self.entries.len();
        self.entries.push(Entry { key, info, pos: 0 });

        let mut hole = self.heap.len();
        self.heap.push(0); // placeholder, overwritten below
        while hole > 0 {
            let p = Self::parent(hole);
            let p_idx = self.heap[p];
            if self.entries[p_idx].key <= key {
                break;
            }
            self.heap[hole] = p_idx;
            self.entries[p_idx].pos = hole;
            hole = p;
        }
        self.heap[hole] = idx;
        self.entries[idx].pos = hole;
        Handle(idx)
    }

    pub fn peek_key(&self) -> Option<f64> {
        self.heap.first().map(|&idx| self.entries[idx].key)
    }

    pub fn peek_info(&self) -> Option<i64> {
        self.heap.first().map(|&idx| self.entries[idx].info)
    }

    pub fn key_of(&self, h: Handle) -> f64 {
        self.entries[h.0].key
    }

    pub fn info_of(&self, h: Handle) -> i64 {
        self.entries[h.0].info
    }

    /// Updates the key at `h`, re-establishing heap order. No-op if the key
    /// is unchanged.
    pub fn update_key(&mut self, h: Handle, new_key: f64) {
        self.update_node(h, new_key, self.entries[h.0].info);
    }

    /// Updates both key and payload at `h`, re-establishing heap order.
    pub fn update_node(&mut self, h: Handle, new_key: f64, new_info: i64) {
        let idx = h.0;
        let old_key = self.entries[idx].key;
        self.entries[idx].key = new_key;
        self.entries[idx].info = new_info;
        if new_key < old_key {
            self.sift_up(self.entries[idx].pos);
        } else if new_key > old_key {
            self.sift_down(self.entries[idx].pos);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        let idx = self.heap[i];
        let key = self.entries[idx].key;
        while i > 0 {
            let p = Self::parent(i);
            let p_idx = self.heap[p];
            if self.entries[p_idx].key <= key {
                break;
            }
            self.heap[i] = p_idx;
            self.entries[p_idx].pos = i;
            i = p;
        }
        self.heap[i] = idx;
        self.entries[idx].pos = i;
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        let idx = self.heap[i];
        let key = self.entries[idx].key;
        loop {
            let l = Self::left(i);
            if l >= n {
                break;
            }
            let r = l + 1;
            let mut smallest = l;
            if r < n && self.entries[self.heap[r]].key < self.entries[self.heap[l]].key {
                smallest = r;
            }
            let smallest_idx = self.heap[smallest];
            if self.entries[smallest_idx].key >= key {
                break;
            }
            self.heap[i] = smallest_idx;
            self.entries[smallest_idx].pos = i;
            i = smallest;
        }
        self.heap[i] = idx;
        self.entries[idx].pos = i;
    }
}
