//! Dynamic bit vector with nearest-neighbor set-bit queries.
//!
//! [`NnDict`] stores a fixed-capacity vector of `n` bits and answers, besides
//! point get/set, the two nearest-neighbor queries: `next(i)` (leftmost set
//! bit at or after `i`) and `prev(i)` (rightmost set bit at or before `i`).
//! All four operations run in $O(\log_{64} n)$, which for any realistic `n`
//! means at most four word inspections up and four down.
//!
//! # Layout
//!
//! The bits live in the leaves of a 64-ary tree laid out breadth-first in one
//! flat word array. A leaf word holds 64 consecutive logical bits; bit `k` of
//! an internal word summarizes child `k`: it is 1 iff that child's subtree
//! contains at least one set bit. Queries climb from a leaf to the nearest
//! ancestor whose word still has a qualifying candidate, then descend
//! straight back to the exact leaf; mutations push emptiness changes upward
//! and stop as soon as an ancestor's summary is already correct.
//!
//! A complete 64-ary tree would waste most of its slots for n well below a
//! power of 64, so only as many nodes as needed to cover `n` bits are
//! materialized per level. Node positions therefore come in two flavors,
//! kept as distinct types: a *virtual* index in the idealized complete tree,
//! where parent/child arithmetic is closed-form, and a *real* index into the
//! compacted storage, obtained by subtracting the per-level count of skipped
//! slots. The skip table is computed once at construction and never changes.
//!
//! Space: the summaries add one word per 64 leaf words per level, roughly
//! $n/63$ bits on top of the $n$ payload bits.

use std::io::{Read, Write};
use std::iter::FusedIterator;
use std::mem;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::broadword::BitScan;
use crate::error::{Error, Result};
use crate::words::WordArray;

/// Position of a node in the idealized complete 64-ary tree, breadth-first
/// from the root at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct VirtualIdx(usize);

/// Position of a node's word in the compacted storage array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RealIdx(usize);

impl VirtualIdx {
    fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Parent node, plus the child slot this node occupies in it.
    fn parent(self) -> (VirtualIdx, usize) {
        (VirtualIdx((self.0 - 1) >> 6), (self.0 - 1) & 63)
    }

    /// Child node at `slot` (0..64).
    fn child(self, slot: usize) -> VirtualIdx {
        VirtualIdx((self.0 << 6) + 1 + slot)
    }
}

/// A fixed-capacity dynamic bit vector supporting `prev` and `next`.
#[derive(Clone)]
pub struct NnDict {
    /// Number of tree levels below the root (0 = the root is the only leaf).
    depth: usize,
    /// Virtual position of the first leaf.
    leaf_base: VirtualIdx,
    /// Number of logical bits.
    size: usize,
    /// Per-level count of virtual slots skipped before that level.
    offset: WordArray,
    /// Every materialized node, root first, leaves last.
    tree: WordArray,
}

impl std::fmt::Debug for NnDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NnDict")
            .field("size", &self.size)
            .field("depth", &self.depth)
            .finish()
    }
}

impl Default for NnDict {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NnDict {
    /// Create a dictionary of `n` bits, all unset.
    ///
    /// `n = 0` yields a degenerate structure on which every indexed
    /// operation is out of bounds.
    #[must_use]
    pub fn new(n: usize) -> Self {
        if n == 0 {
            return Self {
                depth: 0,
                leaf_base: VirtualIdx(0),
                size: 0,
                offset: WordArray::zeroed(0),
                tree: WordArray::zeroed(0),
            };
        }

        // depth = floor(log_64 n); a tree of this depth has capacity for at
        // least n bits in its leaves.
        let depth = ((usize::BITS - 1 - n.leading_zeros()) / 6) as usize;
        // Virtual position of the first leaf = number of nodes above the
        // leaf level in the complete tree: 1 + 64 + ... + 64^(depth-1).
        let leaf_base = VirtualIdx((1usize << (6 * depth)) / 63);

        // Walk levels bottom-up: `real` is the materialized node count of
        // the level at hand, and the gap to the complete tree's 64^level is
        // what lookups at the level *below* must skip.
        let mut offset = WordArray::zeroed(depth + 2);
        let mut nodes = 1usize;
        let mut real = n;
        for level in (1..=depth).rev() {
            real = real.div_ceil(64);
            offset.set(level + 1, (1u64 << (6 * level)) - real as u64);
            nodes += real;
        }
        // Prefix sums: offset[level] = total slots skipped before `level`.
        for level in 1..=depth {
            let skipped = offset.get(level - 1) + offset.get(level);
            offset.set(level, skipped);
        }

        Self {
            depth,
            leaf_base,
            size: n,
            offset,
            tree: WordArray::zeroed(nodes),
        }
    }

    /// Number of logical bits.
    ///
    /// This is also the sentinel [`next`](Self::next) and
    /// [`prev`](Self::prev) return when no qualifying bit exists.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of logical bits (alias of [`size`](Self::size)).
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Return true if the dictionary has capacity zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of tree levels below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Approximate heap memory usage in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.offset.heap_bytes() + self.tree.heap_bytes()
    }

    /// Return the bit at `idx`.
    pub fn get(&self, idx: usize) -> Result<bool> {
        self.check_bounds(idx)?;
        let word = self.word(self.depth, self.leaf_for(idx));
        Ok((word >> (idx & 63)) & 1 == 1)
    }

    /// Set the bit at `idx` to `value`.
    ///
    /// Writing the value a bit already has is a no-op that touches nothing.
    /// Otherwise the leaf word changes and the summary bits along the
    /// root-to-leaf path are updated only as far up as the change actually
    /// flips a subtree between empty and non-empty.
    pub fn set(&mut self, idx: usize, value: bool) -> Result<()> {
        self.check_bounds(idx)?;
        if value {
            self.set_one(idx);
        } else {
            self.set_zero(idx);
        }
        Ok(())
    }

    fn set_one(&mut self, idx: usize) {
        let mut level = self.depth;
        let mut v = self.leaf_for(idx);
        let mut bit = (idx & 63) as u32;
        loop {
            let real = self.to_real(level, v);
            let word = self.node(real);
            if (word >> bit) & 1 == 1 {
                return;
            }
            self.set_node(real, word | (1 << bit));
            if word != 0 || level == 0 {
                // The subtree was already non-empty (or we are at the
                // root), so every ancestor summary is already correct.
                return;
            }
            let (parent, slot) = v.parent();
            level -= 1;
            v = parent;
            bit = slot as u32;
        }
    }

    fn set_zero(&mut self, idx: usize) {
        let mut level = self.depth;
        let mut v = self.leaf_for(idx);
        let mut bit = (idx & 63) as u32;
        loop {
            let real = self.to_real(level, v);
            let word = self.node(real);
            if (word >> bit) & 1 == 0 {
                return;
            }
            let cleared = word & !(1 << bit);
            self.set_node(real, cleared);
            if cleared != 0 || level == 0 {
                // The subtree is still non-empty (or we are at the root):
                // ancestors keep their summary bit.
                return;
            }
            let (parent, slot) = v.parent();
            level -= 1;
            v = parent;
            bit = slot as u32;
        }
    }

    /// Leftmost set bit at or after `idx`, or [`size`](Self::size) if none
    /// exists.
    pub fn next(&self, idx: usize) -> Result<usize> {
        self.check_bounds(idx)?;
        let mut level = self.depth;
        let mut v = self.leaf_for(idx);
        // Candidates at or after idx within its own leaf.
        let mut word = self.word(level, v) & (u64::MAX << (idx & 63));

        // Climb until some ancestor still has a candidate to the right.
        while word == 0 {
            if v.is_root() {
                return Ok(self.size);
            }
            let (parent, slot) = v.parent();
            level -= 1;
            v = parent;
            // Children up to and including `slot` are exhausted.
            word = if slot == 63 {
                0
            } else {
                self.word(level, v) & (u64::MAX << (slot + 1))
            };
        }

        // The lowest candidate picks the leftmost qualifying subtree; from
        // here on any set bit qualifies, so descend on full words.
        let mut pos = word.lowest_set_bit();
        while v < self.leaf_base {
            level += 1;
            v = v.child(pos as usize);
            pos = self.word(level, v).lowest_set_bit();
        }
        Ok(self.leaf_start(v) + pos as usize)
    }

    /// Rightmost set bit at or before `idx`, or [`size`](Self::size) if none
    /// exists.
    pub fn prev(&self, idx: usize) -> Result<usize> {
        self.check_bounds(idx)?;
        let mut level = self.depth;
        let mut v = self.leaf_for(idx);
        // Candidates at or before idx within its own leaf.
        let mut word = self.word(level, v) & (u64::MAX >> (63 - (idx & 63)));

        // Climb until some ancestor still has a candidate to the left.
        while word == 0 {
            if v.is_root() {
                return Ok(self.size);
            }
            let (parent, slot) = v.parent();
            level -= 1;
            v = parent;
            // Only children strictly before `slot` may hold earlier bits.
            word = if slot == 0 {
                0
            } else {
                self.word(level, v) & (u64::MAX >> (64 - slot))
            };
        }

        // Mirror image of `next`: the highest candidate at every step.
        let mut pos = word.highest_set_bit();
        while v < self.leaf_base {
            level += 1;
            v = v.child(pos as usize);
            pos = self.word(level, v).highest_set_bit();
        }
        Ok(self.leaf_start(v) + pos as usize)
    }

    /// Unset every bit, keeping capacity and allocation.
    pub fn clear(&mut self) {
        self.tree.fill_zero();
    }

    /// Exchange the entire state with `other` in O(1).
    ///
    /// Array handles are swapped, never element-wise copied, and the
    /// exchange is never observable as partial.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.depth, &mut other.depth);
        mem::swap(&mut self.leaf_base, &mut other.leaf_base);
        mem::swap(&mut self.size, &mut other.size);
        self.offset.swap(&mut other.offset);
        self.tree.swap(&mut other.tree);
    }

    /// Iterate over the indices of set bits, ascending; the iterator is
    /// double-ended.
    #[must_use]
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            dict: self,
            front: 0,
            back: self.size,
        }
    }

    /// Write the dictionary to `writer` and return the number of bytes
    /// written.
    ///
    /// The format is the three shape scalars (depth, first-leaf position,
    /// size) as little-endian u64, followed by the offset table and the node
    /// store in [`WordArray`]'s own format. There is no version header;
    /// callers are responsible for format compatibility.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<usize> {
        writer.write_u64::<LittleEndian>(self.depth as u64)?;
        writer.write_u64::<LittleEndian>(self.leaf_base.0 as u64)?;
        writer.write_u64::<LittleEndian>(self.size as u64)?;
        let mut written = 3 * mem::size_of::<u64>();
        written += self.offset.serialize(writer)?;
        written += self.tree.serialize(writer)?;
        Ok(written)
    }

    /// Read a dictionary previously written by
    /// [`serialize`](Self::serialize), leaving `reader` positioned
    /// immediately after it.
    ///
    /// The serialized shape parameters are trusted verbatim; nothing is
    /// recomputed or validated beyond what the stream itself enforces.
    pub fn load<R: Read>(reader: &mut R) -> Result<Self> {
        let depth = reader.read_u64::<LittleEndian>()? as usize;
        let leaf_base = VirtualIdx(reader.read_u64::<LittleEndian>()? as usize);
        let size = reader.read_u64::<LittleEndian>()? as usize;
        let offset = WordArray::load(reader)?;
        let tree = WordArray::load(reader)?;
        Ok(Self {
            depth,
            leaf_base,
            size,
            offset,
            tree,
        })
    }

    fn check_bounds(&self, idx: usize) -> Result<()> {
        if idx >= self.size {
            return Err(Error::IndexOutOfBounds(idx));
        }
        Ok(())
    }

    /// Virtual position of the leaf covering logical bit `idx`.
    fn leaf_for(&self, idx: usize) -> VirtualIdx {
        VirtualIdx(self.leaf_base.0 + (idx >> 6))
    }

    /// First logical bit covered by leaf `v`.
    fn leaf_start(&self, v: VirtualIdx) -> usize {
        (v.0 - self.leaf_base.0) << 6
    }

    /// Translate a virtual node position at `level` into compacted storage.
    fn to_real(&self, level: usize, v: VirtualIdx) -> RealIdx {
        RealIdx(v.0 - self.offset.get(level) as usize)
    }

    fn word(&self, level: usize, v: VirtualIdx) -> u64 {
        self.node(self.to_real(level, v))
    }

    fn node(&self, real: RealIdx) -> u64 {
        self.tree.get(real.0)
    }

    fn set_node(&mut self, real: RealIdx, word: u64) {
        self.tree.set(real.0, word);
    }
}

/// Double-ended iterator over the indices of set bits in an [`NnDict`].
///
/// Created by [`NnDict::ones`]. Each step is one `next`/`prev` walk, so a
/// full pass over $k$ set bits costs $O(k \log_{64} n)$.
pub struct Ones<'a> {
    dict: &'a NnDict,
    /// Next candidate position, inclusive.
    front: usize,
    /// Upper bound, exclusive.
    back: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.front >= self.back {
            return None;
        }
        // front < back <= size, so the walker's precondition holds.
        match self.dict.next(self.front) {
            Ok(i) if i < self.back => {
                self.front = i + 1;
                Some(i)
            }
            _ => {
                self.front = self.back;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back - self.front))
    }
}

impl DoubleEndedIterator for Ones<'_> {
    fn next_back(&mut self) -> Option<usize> {
        if self.back <= self.front {
            return None;
        }
        match self.dict.prev(self.back - 1) {
            Ok(i) if i >= self.front && i < self.back => {
                self.back = i;
                Some(i)
            }
            _ => {
                self.back = self.front;
                None
            }
        }
    }
}

impl FusedIterator for Ones<'_> {}
