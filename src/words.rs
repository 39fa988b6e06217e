//! Fixed-size storage of 64-bit words.
//!
//! [`WordArray`] is the storage collaborator for the tree-indexed structures
//! in this crate: a flat run of machine words allocated once, with no
//! growth or shrink API at all. Tree layouts address into it by precomputed
//! indices, so element access is plain slice indexing; anything fancier
//! (bounds recovery, reallocation) would only hide caller bugs.
//!
//! # Serialized form
//!
//! The array is self-describing on disk: a little-endian `u64` word count
//! followed by the raw words, also little-endian. `load` consumes exactly
//! that sequence and leaves the stream positioned on the next byte, so
//! several arrays can be concatenated in one stream.

use std::io::{Read, Write};
use std::mem;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;

/// A fixed-size array of `u64` words with stream serialization.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WordArray {
    words: Box<[u64]>,
}

impl std::fmt::Debug for WordArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordArray")
            .field("len", &self.words.len())
            .finish()
    }
}

impl WordArray {
    /// Allocate `len` words, all zero.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0u64; len].into_boxed_slice(),
        }
    }

    /// Return the number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Return true if the array holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Return the word at index `i`.
    ///
    /// Panics if `i` is out of range; callers size the array to cover every
    /// index they will ever present.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> u64 {
        self.words[i]
    }

    /// Store `word` at index `i`.
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, word: u64) {
        self.words[i] = word;
    }

    /// Read-only view of the underlying words.
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.words
    }

    /// Reset every word to zero, keeping the allocation.
    pub fn fill_zero(&mut self) {
        self.words.fill(0);
    }

    /// Exchange contents with `other` in O(1) (handle exchange, not
    /// element-wise copy).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.words, &mut other.words);
    }

    /// Approximate heap memory usage in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.words.len() * mem::size_of::<u64>()
    }

    /// Write the array to `writer` and return the number of bytes written.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<usize> {
        writer.write_u64::<LittleEndian>(self.words.len() as u64)?;
        for &w in self.words.iter() {
            writer.write_u64::<LittleEndian>(w)?;
        }
        Ok((1 + self.words.len()) * mem::size_of::<u64>())
    }

    /// Read an array previously written by [`serialize`](Self::serialize),
    /// leaving `reader` positioned immediately after it.
    pub fn load<R: Read>(reader: &mut R) -> Result<Self> {
        let len = reader.read_u64::<LittleEndian>()? as usize;
        let mut words = Vec::with_capacity(len);
        for _ in 0..len {
            words.push(reader.read_u64::<LittleEndian>()?);
        }
        Ok(Self {
            words: words.into_boxed_slice(),
        })
    }
}
