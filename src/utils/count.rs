/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::{BitRead, BitWrite};

/// Wrapping struct that keeps track of written bits. Optionally, prints to
/// standard error information about methods called.
#[derive(Debug)]
pub struct CountBitWriter<BW: BitWrite, const PRINT: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: usize,
}

impl<BW: BitWrite, const PRINT: bool> CountBitWriter<BW, PRINT> {
    /// Wrap a [`BitWrite`].
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    /// Unwrap the underlying [`BitWrite`].
    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite, const PRINT: bool> BitWrite for CountBitWriter<BW, PRINT> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.bit_write.write_bit(bit).map(|()| {
            self.bits_written += 1;
            if PRINT {
                eprintln!("write_bit({}) (total = {})", bit, self.bits_written);
            }
        })
    }

    fn write_bits(&mut self, value: u64, n: u32) -> Result<usize> {
        self.bit_write.write_bits(value, n).map(|x| {
            self.bits_written += x;
            if PRINT {
                eprintln!(
                    "write_bits({:#016x}, {}) = {} (total = {})",
                    value, n, x, self.bits_written
                );
            }
            x
        })
    }

    fn write_unary(&mut self, n: u64) -> Result<usize> {
        self.bit_write.write_unary(n).map(|x| {
            self.bits_written += x;
            if PRINT {
                eprintln!("write_unary({}) = {} (total = {})", n, x, self.bits_written);
            }
            x
        })
    }
}

/// Wrapping struct that keeps track of read bits. Optionally, prints to
/// standard error information about methods called.
#[derive(Debug)]
pub struct CountBitReader<BR: BitRead, const PRINT: bool = false> {
    bit_read: BR,
    /// The number of bits read so far from the underlying [`BitRead`].
    pub bits_read: usize,
}

impl<BR: BitRead, const PRINT: bool> CountBitReader<BR, PRINT> {
    /// Wrap a [`BitRead`].
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    /// Unwrap the underlying [`BitRead`].
    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead, const PRINT: bool> BitRead for CountBitReader<BR, PRINT> {
    fn read_bit(&mut self) -> Result<bool> {
        self.bit_read.read_bit().map(|bit| {
            self.bits_read += 1;
            if PRINT {
                eprintln!("read_bit() = {} (total = {})", bit, self.bits_read);
            }
            bit
        })
    }

    fn read_bits(&mut self, n: u32) -> Result<u64> {
        self.bit_read.read_bits(n).map(|x| {
            self.bits_read += n as usize;
            if PRINT {
                eprintln!("read_bits({}) = {:#016x} (total = {})", n, x, self.bits_read);
            }
            x
        })
    }

    fn read_unary(&mut self) -> Result<u64> {
        self.bit_read.read_unary().map(|x| {
            self.bits_read += x as usize + 1;
            if PRINT {
                eprintln!("read_unary() = {} (total = {})", x, self.bits_read);
            }
            x
        })
    }
}
