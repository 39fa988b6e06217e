//! # Nearest-Neighbor Bit Dictionaries
//!
//! *Fixed-capacity bit vectors that answer `prev`/`next` in a handful of word probes.*
//!
//! ## Intuition First
//!
//! Picture a very long street of houses, a few of which have their lights on.
//! Standing at house `i`, you want the nearest lit house to your left or
//! right without walking door to door. The trick: group houses into blocks
//! of 64 and light a lamp at the block office whenever anything in the block
//! is lit; group the offices into blocks of 64 the same way, and so on up.
//! Walking up to the right office and back down takes a handful of steps no
//! matter how long the street is, and flipping one house's light only
//! touches the offices whose lamps actually change.
//!
//! ## The Problem
//!
//! The two obvious representations each fail one half of the job:
//! - **Flat bitmap**: $O(1)$ point reads and writes, but a neighbor scan
//!   degenerates to $O(n/64)$ word probes over sparse data.
//! - **Ordered set of positions**: $O(\log n)$ neighbor queries, but
//!   pointer-chasing nodes and allocator traffic on every mutation, with a
//!   memory footprint 50-100x the information content.
//!
//! ## Historical Context
//!
//! ```text
//! 1975  van Emde Boas  Successor/predecessor in log log u time
//! 1983  Willard        y-fast tries: the same bound in linear space
//! 1989  Jacobson       The succinct paradigm: queries on bit-packed data
//! 2013  Beller et al.  Dynamic neighbor dictionaries drive LCP construction
//! 2014  Gog et al.     Plug-and-play succinct toolkits reach production
//! ```
//!
//! The version here takes the engineering route rather than the
//! asymptotically fanciest one: a complete 64-ary tree of OR-summaries over
//! the payload words. Every level divides the remaining distance by 64 and
//! costs one word probe, so for anything that fits in memory a query is at
//! most four probes up and four probes down.
//!
//! ## Mathematical Formulation
//!
//! For a bit vector $B[0, n)$ and a position $i < n$:
//! - `next(i)` $= \min \{ j \geq i : B[j] = 1 \}$
//! - `prev(i)` $= \max \{ j \leq i : B[j] = 1 \}$
//!
//! with $n$ itself returned when the set is empty. Both run in
//! $O(\log_{64} n)$ time. The summaries add $\sum_{l \geq 1} n / 64^l <
//! n/63$ bits on top of the $n$ payload bits.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(\log_{64} n)$ for `get`, `set`, `next`, `prev`; mutation
//!   usually terminates after the leaf word because ancestor summaries only
//!   change when a subtree flips between empty and non-empty.
//! - **Space**: $n + n/63 + O(\log n)$ bits, one contiguous word array.
//!
//! ## What Could Go Wrong
//!
//! 1. **Fixed capacity**: the bit count is chosen at construction and never
//!    changes. Growing means building a new dictionary and swapping it in.
//! 2. **No interior locking**: mutation needs exclusive access; concurrent
//!    readers are fine, concurrent writers are the caller's problem.
//! 3. **Trusting deserialization**: `load` takes the stream's shape
//!    parameters verbatim. Feeding it bytes produced by anything other than
//!    `serialize` yields garbage, not an error.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`NnDict`**: the dynamic nearest-neighbor dictionary itself.
//! - **`WordArray`**: flat u64 storage with stream (de)serialization.
//! - **`broadword`**: single-word bit scans backing the tree walks.
//!
//! ## References
//!
//! - van Emde Boas, P. (1975). "Preserving Order in a Forest in Less Than Logarithmic Time."
//! - Beller, T., et al. (2013). "Computing the longest common prefix array based on the Burrows-Wheeler transform."
//! - Gog, S., et al. (2014). "From Theory to Practice: Plug and Play with Succinct Data Structures."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod broadword;
pub mod error;
pub mod nn_dict;
pub mod words;

pub use broadword::BitScan;
pub use error::Error;
pub use nn_dict::NnDict;
pub use words::WordArray;
