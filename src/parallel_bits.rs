//! Parallel bit iterator (spec §4.6): given `N` equal-length bit arrays,
//! yields an `N`-wide vector of lanes where lane `j` holds a window of bits
//! from array `j` starting at the current position.
//!
//! The original source realizes this with a 32-byte-wide SIMD transpose
//! (`examples/original_source/include/dpf/parallel_bit_iterable.hpp`),
//! choosing a 64/32/16/8-bit lane width depending on `N`. This crate
//! provides the portable scalar reference only (Design Notes §9: "provide a
//! portable fallback and an accelerated path gated on target feature
//! detection"); no `target_feature`-gated accelerated path is implemented,
//! and every lane is returned as a `u128` regardless of its nominal width so
//! a single generic type covers every supported `N`.

use crate::bitarray::BitArray;

/// The nominal lane width in bits for a given fan-in `N`, matching spec §4.6.
pub const fn lane_bits(n: usize) -> u32 {
    match n {
        2 => 128,
        4 => 64,
        8 => 32,
        16 => 16,
        32 => 8,
        _ => 0,
    }
}

pub struct ParallelBitIter<'a, const N: usize> {
    arrays: [&'a BitArray; N],
    pos: usize,
    len: usize,
}

impl<'a, const N: usize> ParallelBitIter<'a, N> {
    pub fn new(arrays: [&'a BitArray; N]) -> Self {
        assert!(lane_bits(N) > 0, "N must be one of 2, 4, 8, 16, 32");
        let len = arrays[0].len();
        debug_assert!(
            arrays.iter().all(|a| a.len() == len),
            "all arrays must share the same length"
        );
        ParallelBitIter { arrays, pos: 0, len }
    }

    fn scalar_window(&self, j: usize, pos: usize) -> u128 {
        let width = lane_bits(N) as usize;
        let mut window = 0u128;
        for b in 0..width {
            let idx = pos + b;
            if idx < self.len && self.arrays[j].get(idx) {
                window |= 1u128 << b;
            }
        }
        window
    }
}

impl<'a, const N: usize> Iterator for ParallelBitIter<'a, N> {
    type Item = [u128; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let mut lanes = [0u128; N];
        for (j, lane) in lanes.iter_mut().enumerate() {
            *lane = self.scalar_window(j, self.pos);
        }
        self.pos += 1;
        Some(lanes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_matches_scalar_window_at_every_position() {
        let mut a = BitArray::zeroed(40);
        let mut b = BitArray::zeroed(40);
        for i in (0..40).step_by(3) {
            a.set(i);
        }
        for i in (0..40).step_by(5) {
            b.set(i);
        }
        let iter = ParallelBitIter::<2>::new([&a, &b]);
        let expected_width = lane_bits(2) as usize;
        for (p, lanes) in iter.enumerate() {
            for (j, array) in [&a, &b].iter().enumerate() {
                let mut expected = 0u128;
                for bit in 0..expected_width {
                    if p + bit < array.len() && array.get(p + bit) {
                        expected |= 1u128 << bit;
                    }
                }
                assert_eq!(lanes[j], expected, "mismatch at position {}, lane {}", p, j);
            }
        }
    }

    #[test]
    fn supports_every_documented_fan_in() {
        let arrays8: Vec<BitArray> = (0..8).map(|_| BitArray::zeroed(16)).collect();
        let refs: [&BitArray; 8] = [
            &arrays8[0], &arrays8[1], &arrays8[2], &arrays8[3], &arrays8[4], &arrays8[5],
            &arrays8[6], &arrays8[7],
        ];
        let mut iter = ParallelBitIter::<8>::new(refs);
        assert!(iter.next().is_some());
    }
}
