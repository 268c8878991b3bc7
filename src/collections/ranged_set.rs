/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A codec for sets of distinct integers drawn from a known interval.
//!
//! The elements go out in ascending order, and both sides keep track of two
//! bounds while they advance: everything at or below the previous element is
//! already spoken for, and enough headroom must remain above for the
//! elements still to come. The `i`-th of `n` elements is therefore coded
//! with a [`RangedCode`](crate::codes::RangedCode) over
//! `[prev + 1, max − (n − 1 − i)]`, which is the tightest uniform code the
//! remaining information allows.

use std::collections::BTreeSet;

use crate::codes::RangedCode;
use crate::error::{Error, Result};
use crate::traits::{BitRead, BitWrite, PrefixCode};

fn check_bounds(min: i64, max: i64, len: usize) -> Result<()> {
    if max < min {
        return Err(Error::InvalidArgument(
            "minimum must be lower than or equal to maximum",
        ));
    }
    if len as u128 > max.abs_diff(min) as u128 + 1 {
        return Err(Error::InvalidArgument(
            "length exceeds the number of values in the range",
        ));
    }
    Ok(())
}

/// Trait for writing sets of distinct ranged integers on a [`BitWrite`].
pub trait RangedSetWrite: BitWrite + Sized {
    /// Write the length of `set` through `len_encoder`, then the elements in
    /// ascending order, each with the tightest ranged code available at its
    /// position.
    fn write_ranged_int_set<L>(
        &mut self,
        len_encoder: L,
        min: i64,
        max: i64,
        set: &BTreeSet<i64>,
    ) -> Result<()>
    where
        L: FnOnce(&mut Self, usize) -> Result<()>,
    {
        check_bounds(min, max, set.len())?;
        let len = set.len();
        len_encoder(self, len)?;

        let mut low = min;
        for (i, &element) in set.iter().enumerate() {
            let high = max - (len - 1 - i) as i64;
            if element < low || element > high {
                return Err(Error::InvalidArgument(
                    "set element is outside of the range",
                ));
            }
            RangedCode::new(low, high)?.encode(self, &element)?;
            low = element.wrapping_add(1);
        }
        Ok(())
    }
}

/// Trait for reading sets of distinct ranged integers from a [`BitRead`].
pub trait RangedSetRead: BitRead + Sized {
    /// Read back a set written by
    /// [`write_ranged_int_set`](RangedSetWrite::write_ranged_int_set).
    fn read_ranged_int_set<L>(
        &mut self,
        len_decoder: L,
        min: i64,
        max: i64,
    ) -> Result<BTreeSet<i64>>
    where
        L: FnOnce(&mut Self) -> Result<usize>,
    {
        let len = len_decoder(self)?;
        check_bounds(min, max, len)?;

        let mut set = BTreeSet::new();
        let mut low = min;
        for i in 0..len {
            let high = max - (len - 1 - i) as i64;
            let element = RangedCode::new(low, high)?.decode(self)?;
            set.insert(element);
            low = element.wrapping_add(1);
        }
        Ok(set)
    }
}

impl<W: BitWrite> RangedSetWrite for W {}
impl<R: BitRead> RangedSetRead for R {}
