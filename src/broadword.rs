//! Bit-scan primitives over machine words.
//!
//! The tree walker needs exactly two leaf-level operations: the position of
//! the lowest set bit (to pick the *leftmost* qualifying child) and the
//! position of the highest set bit (to pick the *rightmost*). Both are
//! undefined for a zero word; callers must test for emptiness first, which
//! the walker does anyway to decide whether to keep climbing.
//!
//! The trait methods lower to single hardware instructions (`tzcnt`/`lzcnt`
//! or their `bsf`/`bsr` ancestors) on every mainstream target. A portable
//! De Bruijn-multiplication implementation is kept alongside and
//! cross-checked in tests, so the scan semantics never silently depend on
//! what the intrinsics happen to do for inputs outside the contract.

/// Single-word bit-scan operations.
///
/// Both positions are counted from the least-significant bit (bit 0).
pub trait BitScan {
    /// Position of the lowest set bit, in `0..64`.
    ///
    /// Undefined for a zero word; callers must not invoke it on a word
    /// already known to be zero.
    fn lowest_set_bit(self) -> u32;

    /// Position of the highest set bit, in `0..64`.
    ///
    /// Undefined for a zero word; callers must not invoke it on a word
    /// already known to be zero.
    fn highest_set_bit(self) -> u32;
}

impl BitScan for u64 {
    #[inline]
    fn lowest_set_bit(self) -> u32 {
        debug_assert!(self != 0, "lowest_set_bit on zero word");
        self.trailing_zeros()
    }

    #[inline]
    fn highest_set_bit(self) -> u32 {
        debug_assert!(self != 0, "highest_set_bit on zero word");
        63 - self.leading_zeros()
    }
}

/// A 64-bit De Bruijn sequence: every 6-bit window over its cyclic shifts is
/// distinct, so multiplying an isolated bit by it and taking the top 6 bits
/// yields a perfect hash of the bit's position.
const DEBRUIJN64: u64 = 0x0218_a392_cd3d_5dbf;

/// Maps `(isolated_bit * DEBRUIJN64) >> 58` back to the bit position.
const DEBRUIJN64_POS: [u32; 64] = [
    0, 1, 2, 7, 3, 13, 8, 19, //
    4, 25, 14, 28, 9, 34, 20, 40, //
    5, 17, 26, 38, 15, 46, 29, 48, //
    10, 31, 35, 54, 21, 50, 41, 57, //
    63, 6, 12, 18, 24, 27, 33, 39, //
    16, 37, 45, 47, 30, 53, 49, 56, //
    62, 11, 23, 32, 36, 44, 52, 55, //
    61, 22, 43, 51, 60, 42, 59, 58, //
];

/// Portable `lowest_set_bit`: isolate the lowest bit with two's-complement
/// arithmetic, then locate it through the De Bruijn table.
///
/// Same contract as [`BitScan::lowest_set_bit`]: undefined for zero.
pub fn lowest_set_bit_portable(word: u64) -> u32 {
    debug_assert!(word != 0, "lowest_set_bit_portable on zero word");
    let isolated = word & word.wrapping_neg();
    DEBRUIJN64_POS[(isolated.wrapping_mul(DEBRUIJN64) >> 58) as usize]
}

/// Portable `highest_set_bit`: smear the highest bit downward, isolate it by
/// xoring out everything below, then locate it through the same table.
///
/// Same contract as [`BitScan::highest_set_bit`]: undefined for zero.
pub fn highest_set_bit_portable(word: u64) -> u32 {
    debug_assert!(word != 0, "highest_set_bit_portable on zero word");
    let mut smeared = word;
    smeared |= smeared >> 1;
    smeared |= smeared >> 2;
    smeared |= smeared >> 4;
    smeared |= smeared >> 8;
    smeared |= smeared >> 16;
    smeared |= smeared >> 32;
    let isolated = smeared ^ (smeared >> 1);
    DEBRUIJN64_POS[(isolated.wrapping_mul(DEBRUIJN64) >> 58) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bits() {
        for i in 0..64u32 {
            let w = 1u64 << i;
            assert_eq!(w.lowest_set_bit(), i);
            assert_eq!(w.highest_set_bit(), i);
            assert_eq!(lowest_set_bit_portable(w), i);
            assert_eq!(highest_set_bit_portable(w), i);
        }
    }

    #[test]
    fn portable_matches_intrinsic() {
        // A spread of dense, sparse, and boundary patterns; xorshift fills
        // in arbitrary-looking words without pulling in an RNG crate.
        let mut patterns = vec![
            u64::MAX,
            1,
            1 << 63,
            (1 << 63) | 1,
            0xAAAA_AAAA_AAAA_AAAA,
            0x5555_5555_5555_5555,
            0x8000_0000_0000_0001,
            0x0000_0001_0000_0000,
        ];
        let mut x = 0x9E37_79B9_7F4A_7C15u64;
        for _ in 0..4096 {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            patterns.push(x);
        }
        for w in patterns {
            assert_ne!(w, 0);
            assert_eq!(lowest_set_bit_portable(w), w.lowest_set_bit(), "w={w:#x}");
            assert_eq!(highest_set_bit_portable(w), w.highest_set_bit(), "w={w:#x}");
        }
    }

    #[test]
    fn scan_ends() {
        assert_eq!(u64::MAX.lowest_set_bit(), 0);
        assert_eq!(u64::MAX.highest_set_bit(), 63);
        assert_eq!((3u64 << 40).lowest_set_bit(), 40);
        assert_eq!((3u64 << 40).highest_set_bit(), 41);
    }
}
