/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Defined Huffman codes: finite, exhaustive prefix codes built from symbol
//! frequencies and serializable within the bitstream itself.

use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::error::{Error, Result};
use crate::traits::PrefixCode;

/// A finite, exhaustive prefix code over symbols of type `S`.
///
/// The code is stored canonically: all symbols concatenated in order of
/// increasing codeword length, plus one offset per level marking where the
/// symbols of that length begin. Two codes built from the same frequencies
/// and the same symbol order are identical, bit by bit, regardless of how
/// the frequency map iterates.
///
/// A single-symbol code keeps its symbol in the length-0 bucket: encoding it
/// emits nothing and decoding consumes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct HuffmanCode<S> {
    /// Symbols concatenated in order of increasing codeword length.
    symbols: Vec<S>,
    /// `offsets[b]` is the position in `symbols` of the first symbol with a
    /// `b`-bit codeword; the last entry is `symbols.len()`.
    offsets: Vec<usize>,
}

impl<S> HuffmanCode<S> {
    /// Build the optimal code for the given symbol frequencies.
    ///
    /// `order` is a total order on the symbol domain; it fixes the canonical
    /// position of symbols sharing a codeword length, making construction
    /// deterministic. All frequencies must be positive.
    pub fn with_frequencies<F>(frequencies: &HashMap<S, u64>, order: F) -> Result<Self>
    where
        S: Clone,
        F: Fn(&S, &S) -> Ordering,
    {
        let mut pairs: Vec<(S, u64)> = frequencies
            .iter()
            .map(|(symbol, &freq)| (symbol.clone(), freq))
            .collect();
        pairs.sort_by(|a, b| order(&a.0, &b.0));
        Self::from_sorted_frequencies(pairs)
    }

    /// Build the optimal code for a sample of symbols, counting occurrences
    /// first.
    pub fn from_symbols<I, F>(symbols: I, order: F) -> Result<Self>
    where
        S: Clone + Eq + Hash,
        I: IntoIterator<Item = S>,
        F: Fn(&S, &S) -> Ordering,
    {
        let mut frequencies = HashMap::new();
        for symbol in symbols {
            *frequencies.entry(symbol).or_insert(0u64) += 1;
        }
        Self::with_frequencies(&frequencies, order)
    }

    fn from_sorted_frequencies(pairs: Vec<(S, u64)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::InvalidArgument("frequency map must not be empty"));
        }
        if pairs.iter().any(|(_, freq)| *freq == 0) {
            return Err(Error::InvalidArgument(
                "symbol frequencies must be positive",
            ));
        }

        let depths = if pairs.len() == 1 {
            vec![0]
        } else {
            symbol_depths(&pairs)
        };

        let max_depth = *depths.iter().max().unwrap() as usize;
        let mut levels: Vec<Vec<S>> = (0..=max_depth).map(|_| Vec::new()).collect();
        for ((symbol, _), depth) in pairs.into_iter().zip(&depths) {
            levels[*depth as usize].push(symbol);
        }

        Self::from_levels(levels)
    }

    /// Build a code directly from its levels: `levels[b]` lists the symbols
    /// with a `b`-bit codeword, already in canonical order.
    ///
    /// Fails with [`Error::OverSpecified`] if the length-0 level is
    /// over-populated (it may hold one symbol, and only alone) and with
    /// [`Error::NonExhaustive`] if the level populations do not tile the
    /// codeword space exactly.
    pub fn from_levels(mut levels: Vec<Vec<S>>) -> Result<Self> {
        while levels.last().map_or(false, Vec::is_empty) {
            levels.pop();
        }

        let total: usize = levels.iter().map(Vec::len).sum();
        if total == 0 {
            return Err(Error::InvalidArgument("code must contain at least one symbol"));
        }
        if levels[0].len() > 1 || (levels[0].len() == 1 && total > 1) {
            return Err(Error::OverSpecified);
        }

        let mut remaining = 1u64;
        for level in &levels {
            let count = level.len() as u64;
            if count > remaining {
                return Err(Error::NonExhaustive);
            }
            remaining = (remaining - count).saturating_mul(2);
        }
        if remaining != 0 {
            return Err(Error::NonExhaustive);
        }

        let mut offsets = Vec::with_capacity(levels.len() + 1);
        let mut symbols = Vec::with_capacity(total);
        for level in levels {
            offsets.push(symbols.len());
            symbols.extend(level);
        }
        offsets.push(symbols.len());
        Ok(Self { symbols, offsets })
    }

    /// Return the symbols with a `bits`-bit codeword, in canonical order.
    pub fn level(&self, bits: u32) -> &[S] {
        let bits = bits as usize;
        if bits + 1 >= self.offsets.len() {
            return &[];
        }
        &self.symbols[self.offsets[bits]..self.offsets[bits + 1]]
    }

    /// Return the length in bits of the longest codeword.
    pub fn max_bits(&self) -> u32 {
        (self.offsets.len() - 2) as u32
    }

    /// Return the length in bits of the codeword of `symbol`, or `None` if
    /// the symbol is not part of the code.
    pub fn len(&self, symbol: &S) -> Option<u32>
    where
        S: PartialEq,
    {
        let position = self.symbols.iter().position(|s| s == symbol)?;
        Some(self.offsets.partition_point(|&offset| offset <= position) as u32 - 1)
    }
}

/// Assign a codeword length to every symbol by the classical merge of the
/// two least-frequent trees.
///
/// The tree is a transient: only the leaf depths survive. Nodes live in a
/// flat pool and the heap is keyed by `(frequency, creation order)`, so
/// equal frequencies always merge the same way and the resulting lengths do
/// not depend on the order in which the caller supplied the pairs.
fn symbol_depths<S>(pairs: &[(S, u64)]) -> Vec<u32> {
    let mut children: Vec<Option<(usize, usize)>> = vec![None; pairs.len()];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = pairs
        .iter()
        .enumerate()
        .map(|(node, (_, freq))| Reverse((*freq, node)))
        .collect();

    while heap.len() > 1 {
        let Reverse((first_freq, first)) = heap.pop().unwrap();
        let Reverse((second_freq, second)) = heap.pop().unwrap();
        let merged = children.len();
        children.push(Some((first, second)));
        heap.push(Reverse((first_freq.saturating_add(second_freq), merged)));
    }

    let Reverse((_, root)) = heap.pop().unwrap();
    let mut depths = vec![0u32; children.len()];
    let mut stack: Vec<(usize, u32)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        depths[node] = depth;
        if let Some((left, right)) = children[node] {
            stack.push((left, depth + 1));
            stack.push((right, depth + 1));
        }
    }
    depths.truncate(pairs.len());
    depths
}

impl<S: Clone + PartialEq> PrefixCode for HuffmanCode<S> {
    type Symbol = S;

    fn symbols_with_bits(&self, bits: u32) -> u64 {
        self.level(bits).len() as u64
    }

    fn symbol(&self, bits: u32, index: u64) -> S {
        self.level(bits)[index as usize].clone()
    }
}
