/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The bit-aligned integer code: the signed sibling of the
//! [natural code](crate::codes::NaturalCode).
//!
//! Levels have the same lengths and populations; inside each level the first
//! half of the indices covers a block of non-negative values and the second
//! half a block of negative ones, both growing away from zero. With `k` = 4:
//!
//! ```text
//! 0000 … 0011         0 … 3
//! 0100 … 0111         −4 … −1
//! 10000000 … 10011111 4 … 35
//! 10100000 … 10111111 −36 … −5
//! 110000000000 …      36 …
//! ```
//!
//! Values close to zero on either side are cheap, so the code suits signed
//! quantities with a roughly symmetric distribution around zero.

use std::collections::HashMap;

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use super::natural::best_bit_align;
use crate::error::{Error, Result};
use crate::traits::{BitRead, BitWrite, PrefixCode};

/// The bit-aligned prefix code over the signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct IntegerCode {
    bit_align: u32,
}

impl IntegerCode {
    /// Create the code with the given bit alignment, between 2 and 64.
    pub fn new(bit_align: u32) -> Result<Self> {
        if !(2..=64).contains(&bit_align) {
            return Err(Error::InvalidArgument(
                "bit alignment must be between 2 and 64",
            ));
        }
        Ok(Self { bit_align })
    }

    /// Return the bit alignment provided at construction time.
    pub fn bit_align(&self) -> u32 {
        self.bit_align
    }

    /// Size of each of the two signed segments of the given level.
    fn half(&self, level: u32) -> u128 {
        1u128 << (level * (self.bit_align - 1) - 1)
    }

    /// Return the level of `value` and its index inside the level.
    fn level_of(&self, value: i64) -> (u32, u128) {
        if value >= 0 {
            let mut level = 1;
            let mut base = 0;
            let mut next_base = self.half(1);
            while value as u128 >= next_base {
                level += 1;
                base = next_base;
                next_base += self.half(level);
            }
            (level, value as u128 - base)
        } else {
            let magnitude = value.unsigned_abs() as u128;
            let mut level = 1;
            let mut reach = self.half(1);
            while magnitude > reach {
                level += 1;
                reach += self.half(level);
            }
            (level, self.half(level) + (reach - magnitude))
        }
    }

    /// Return the length in bits of the codeword of `value`.
    pub fn len(&self, value: i64) -> u32 {
        self.level_of(value).0 * self.bit_align
    }

    /// Select the bit alignment minimizing the total encoded length of the
    /// given value-to-frequency profile; ties go to the smaller alignment.
    pub fn with_frequencies(frequencies: &HashMap<i64, u64>) -> Result<Self> {
        let max_magnitude = frequencies
            .keys()
            .map(|value| value.unsigned_abs())
            .max()
            .ok_or(Error::InvalidArgument("frequency map must not be empty"))?;
        let bit_align = best_bit_align(max_magnitude, |bit_align| {
            let code = Self { bit_align };
            frequencies
                .iter()
                .map(|(&value, &freq)| code.len(value) as u128 * freq as u128)
                .sum()
        });
        Ok(Self { bit_align })
    }
}

impl PrefixCode for IntegerCode {
    type Symbol = i64;

    fn symbols_with_bits(&self, bits: u32) -> u64 {
        if bits == 0 || bits % self.bit_align != 0 {
            return 0;
        }
        let level = bits / self.bit_align;
        let shift = level as u64 * (self.bit_align - 1) as u64;
        // Saturates for levels deeper than the 64-bit domain.
        if shift >= 64 {
            u64::MAX
        } else {
            1 << shift
        }
    }

    fn symbol(&self, bits: u32, index: u64) -> i64 {
        debug_assert!(index < self.symbols_with_bits(bits));
        let level = bits / self.bit_align;
        let index = index as u128;
        let half = self.half(level);
        if index < half {
            let mut base = 0;
            for m in 1..level {
                base += self.half(m);
            }
            (base + index) as i64
        } else {
            let mut reach = 0;
            for m in 1..=level {
                reach += self.half(m);
            }
            -((reach - (index - half)) as i128) as i64
        }
    }

    fn encode<W: BitWrite + ?Sized>(&self, writer: &mut W, symbol: &i64) -> Result<usize> {
        let (level, index) = self.level_of(*symbol);
        let payload_bits = level * (self.bit_align - 1);
        let written = writer.write_unary(level as u64 - 1)?;
        for i in (0..payload_bits).rev() {
            writer.write_bit((index >> i) & 1 != 0)?;
        }
        Ok(written + payload_bits as usize)
    }

    fn decode<R: BitRead + ?Sized>(&self, reader: &mut R) -> Result<i64> {
        let level = reader.read_unary()? + 1;
        let payload_bits = level * (self.bit_align as u64 - 1);
        if payload_bits > 127 {
            return Err(Error::InvalidArgument(
                "decoded value does not fit in 64 bits",
            ));
        }
        let level = level as u32;

        let mut index = 0u128;
        for _ in 0..payload_bits {
            index = (index << 1) | reader.read_bit()? as u128;
        }

        let half = self.half(level);
        let value = if index < half {
            let mut base = 0;
            for m in 1..level {
                base += self.half(m);
            }
            i128::try_from(base + index)
                .map_err(|_| Error::InvalidArgument("decoded value does not fit in 64 bits"))?
        } else {
            let mut reach = 0;
            for m in 1..=level {
                reach += self.half(m);
            }
            -(i128::try_from(reach - (index - half))
                .map_err(|_| Error::InvalidArgument("decoded value does not fit in 64 bits"))?)
        };
        i64::try_from(value)
            .map_err(|_| Error::InvalidArgument("decoded value does not fit in 64 bits"))
    }
}
