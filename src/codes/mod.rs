/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The code families and the traits for reading and writing symbols.
//!
//! Every code implements [`PrefixCode`](crate::traits::PrefixCode);
//! [`HuffmanRead`] and [`HuffmanWrite`] are implemented by every
//! [`BitRead`]/[`BitWrite`] and move single symbols, whole
//! [`HuffmanCode`] tables, and strings across the stream.
//!
//! A [`HuffmanCode`] is self-describing: [`HuffmanWrite::write_code`] emits
//! first the population of each level — each count as a
//! [ranged code](RangedCode) over `[0, max]`, where `max` halves-and-doubles
//! along the level recurrence until the codeword space is exhausted — and
//! then the symbols in canonical order, each through a caller-supplied
//! writer. [`HuffmanRead::read_code`] mirrors this, so two peers only need
//! to agree on the symbol codec.
//!
//! The `_diff` variants thread the previous symbol of the level into the
//! callback, letting sorted symbol domains encode small deltas instead of
//! full symbols.

use crate::error::{Error, Result};
use crate::traits::{BitRead, BitWrite, PrefixCode};

pub mod ranged;
pub use ranged::RangedCode;

pub mod natural;
pub use natural::NaturalCode;

pub mod integer;
pub use integer::IntegerCode;

pub mod huffman;
pub use huffman::HuffmanCode;

/// How many UTF-16 code units a string codec moves per symbol.
const STRING_BIT_ALIGN: u32 = 8;

fn write_code_levels<W, S>(
    writer: &mut W,
    code: &HuffmanCode<S>,
    symbol_writer: &mut dyn FnMut(&mut W, &S) -> Result<()>,
    mut diff_writer: Option<&mut dyn FnMut(&mut W, &S, &S) -> Result<()>>,
) -> Result<()>
where
    W: BitWrite,
{
    let mut max = 1u64;
    let mut bits = 0;
    while max > 0 {
        let count = code.level(bits).len() as u64;
        RangedCode::new(0, max as i64)?.encode(writer, &(count as i64))?;
        max = (max - count).saturating_mul(2).min(i64::MAX as u64);
        bits += 1;
    }

    for bits in 0..=code.max_bits() {
        let mut prev = None;
        for symbol in code.level(bits) {
            match (&mut diff_writer, prev) {
                (Some(diff), Some(previous)) => diff(writer, previous, symbol)?,
                _ => symbol_writer(writer, symbol)?,
            }
            prev = Some(symbol);
        }
    }
    Ok(())
}

fn read_code_levels<R, S>(
    reader: &mut R,
    symbol_reader: &mut dyn FnMut(&mut R) -> Result<S>,
    mut diff_reader: Option<&mut dyn FnMut(&mut R, &S) -> Result<S>>,
) -> Result<HuffmanCode<S>>
where
    R: BitRead,
{
    let mut counts = Vec::new();
    let mut max = 1u64;
    while max > 0 {
        let count = RangedCode::new(0, max as i64)?.decode(reader)? as u64;
        counts.push(count);
        max = (max - count).saturating_mul(2).min(i64::MAX as u64);
    }

    let mut levels = Vec::with_capacity(counts.len());
    for count in counts {
        let mut level: Vec<S> = Vec::with_capacity((count as usize).min(1 << 20));
        if count > 0 {
            level.push(symbol_reader(reader)?);
            for _ in 1..count {
                let symbol = match &mut diff_reader {
                    Some(diff) => diff(reader, level.last().unwrap())?,
                    None => symbol_reader(reader)?,
                };
                level.push(symbol);
            }
        }
        levels.push(level);
    }
    HuffmanCode::from_levels(levels)
}

/// Trait for writing symbols, Huffman codes, and strings on a [`BitWrite`].
pub trait HuffmanWrite: BitWrite + Sized {
    /// Encode `symbol` with `code` and return the number of bits written.
    fn write_symbol<C: PrefixCode>(&mut self, code: &C, symbol: &C::Symbol) -> Result<usize>
    where
        C::Symbol: PartialEq,
    {
        code.encode(self, symbol)
    }

    /// Write `code` itself into the stream, using `symbol_writer` for each
    /// of its symbols.
    fn write_code<S, F>(&mut self, code: &HuffmanCode<S>, mut symbol_writer: F) -> Result<()>
    where
        F: FnMut(&mut Self, &S) -> Result<()>,
    {
        write_code_levels(self, code, &mut symbol_writer, None)
    }

    /// Write `code` itself into the stream; every symbol after the first of
    /// each level goes through `diff_writer(previous, current)` instead of
    /// `symbol_writer`.
    fn write_code_diff<S, F, D>(
        &mut self,
        code: &HuffmanCode<S>,
        mut symbol_writer: F,
        mut diff_writer: D,
    ) -> Result<()>
    where
        F: FnMut(&mut Self, &S) -> Result<()>,
        D: FnMut(&mut Self, &S, &S) -> Result<()>,
    {
        write_code_levels(self, code, &mut symbol_writer, Some(&mut diff_writer))
    }

    /// Write a string as a length followed by one symbol per UTF-16 code
    /// unit, all through a [`NaturalCode`] with bit alignment 8.
    fn write_string(&mut self, value: &str) -> Result<()> {
        let code = NaturalCode::new(STRING_BIT_ALIGN)?;
        let units: Vec<u16> = value.encode_utf16().collect();
        self.write_symbol(&code, &(units.len() as u64))?;
        for unit in units {
            self.write_symbol(&code, &(unit as u64))?;
        }
        Ok(())
    }
}

/// Trait for reading symbols, Huffman codes, and strings from a [`BitRead`].
pub trait HuffmanRead: BitRead + Sized {
    /// Decode one symbol of `code`.
    fn read_symbol<C: PrefixCode>(&mut self, code: &C) -> Result<C::Symbol> {
        code.decode(self)
    }

    /// Read back a [`HuffmanCode`] written by
    /// [`write_code`](HuffmanWrite::write_code).
    fn read_code<S, F>(&mut self, mut symbol_reader: F) -> Result<HuffmanCode<S>>
    where
        F: FnMut(&mut Self) -> Result<S>,
    {
        read_code_levels(self, &mut symbol_reader, None)
    }

    /// Read back a [`HuffmanCode`] written by
    /// [`write_code_diff`](HuffmanWrite::write_code_diff);
    /// `diff_reader(previous)` decodes every symbol after the first of each
    /// level.
    fn read_code_diff<S, F, D>(
        &mut self,
        mut symbol_reader: F,
        mut diff_reader: D,
    ) -> Result<HuffmanCode<S>>
    where
        F: FnMut(&mut Self) -> Result<S>,
        D: FnMut(&mut Self, &S) -> Result<S>,
    {
        read_code_levels(self, &mut symbol_reader, Some(&mut diff_reader))
    }

    /// Read back a string written by [`write_string`](HuffmanWrite::write_string).
    fn read_string(&mut self) -> Result<String> {
        let code = NaturalCode::new(STRING_BIT_ALIGN)?;
        let len = self.read_symbol(&code)? as usize;
        let mut units = Vec::with_capacity(len.min(1 << 20));
        for _ in 0..len {
            let unit = self.read_symbol(&code)?;
            units.push(
                u16::try_from(unit)
                    .map_err(|_| Error::InvalidArgument("character unit out of range"))?,
            );
        }
        String::from_utf16(&units).map_err(|_| Error::InvalidArgument("malformed UTF-16 string"))
    }
}

impl<W: BitWrite> HuffmanWrite for W {}
impl<R: BitRead> HuffmanRead for R {}
