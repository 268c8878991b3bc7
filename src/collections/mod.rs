/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Length-prefixed codecs for lists, sets, and maps.
//!
//! Every operation takes its length code and its element codecs as closures
//! receiving the stream, so the caller freely mixes, say, a Huffman-coded
//! length with ranged-coded elements. A collection costs exactly one length
//! emission plus one emission per element; an empty collection is only its
//! length prefix.
//!
//! Sets and maps are emitted in the order of a caller-supplied comparator —
//! the keys are copied out and sorted first, since the iteration order of
//! the source containers is not reproducible. The `_diff` variants
//! additionally thread the previously emitted key into the key codec, which
//! sorted domains exploit to encode deltas; decoding then needs the matching
//! `_diff` reader. Without the diff path the wire format is independent of
//! the emission order.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::Result;
use crate::traits::{BitRead, BitWrite};

pub mod ranged_set;
pub use ranged_set::{RangedSetRead, RangedSetWrite};

/// Trait for writing length-prefixed collections on a [`BitWrite`].
pub trait CollectionWrite: BitWrite + Sized {
    /// Write the length of `items`, then every element in order.
    fn write_list<T, L, F>(&mut self, len_encoder: L, mut element_writer: F, items: &[T]) -> Result<()>
    where
        L: FnOnce(&mut Self, usize) -> Result<()>,
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        len_encoder(self, items.len())?;
        for item in items {
            element_writer(self, item)?;
        }
        Ok(())
    }

    /// Write the length of `set`, then every element in the order given by
    /// `order`.
    fn write_set<T, L, F, O>(
        &mut self,
        len_encoder: L,
        mut element_writer: F,
        order: O,
        set: &HashSet<T>,
    ) -> Result<()>
    where
        T: Eq + Hash,
        L: FnOnce(&mut Self, usize) -> Result<()>,
        F: FnMut(&mut Self, &T) -> Result<()>,
        O: Fn(&T, &T) -> Ordering,
    {
        let mut elements: Vec<&T> = set.iter().collect();
        elements.sort_by(|a, b| order(a, b));
        len_encoder(self, elements.len())?;
        for element in elements {
            element_writer(self, element)?;
        }
        Ok(())
    }

    /// Like [`write_set`](CollectionWrite::write_set), but every element
    /// after the first goes through `diff_writer(previous, current)`.
    fn write_set_diff<T, L, F, D, O>(
        &mut self,
        len_encoder: L,
        mut element_writer: F,
        mut diff_writer: D,
        order: O,
        set: &HashSet<T>,
    ) -> Result<()>
    where
        T: Eq + Hash,
        L: FnOnce(&mut Self, usize) -> Result<()>,
        F: FnMut(&mut Self, &T) -> Result<()>,
        D: FnMut(&mut Self, &T, &T) -> Result<()>,
        O: Fn(&T, &T) -> Ordering,
    {
        let mut elements: Vec<&T> = set.iter().collect();
        elements.sort_by(|a, b| order(a, b));
        len_encoder(self, elements.len())?;
        let mut prev: Option<&T> = None;
        for element in elements {
            match prev {
                None => element_writer(self, element)?,
                Some(previous) => diff_writer(self, previous, element)?,
            }
            prev = Some(element);
        }
        Ok(())
    }

    /// Write the length of `map`, then every key/value pair with the keys in
    /// the order given by `order`.
    fn write_map<K, V, L, KW, VW, O>(
        &mut self,
        len_encoder: L,
        mut key_writer: KW,
        order: O,
        mut value_writer: VW,
        map: &HashMap<K, V>,
    ) -> Result<()>
    where
        K: Eq + Hash,
        L: FnOnce(&mut Self, usize) -> Result<()>,
        KW: FnMut(&mut Self, &K) -> Result<()>,
        VW: FnMut(&mut Self, &V) -> Result<()>,
        O: Fn(&K, &K) -> Ordering,
    {
        let mut keys: Vec<&K> = map.keys().collect();
        keys.sort_by(|a, b| order(a, b));
        len_encoder(self, keys.len())?;
        for key in keys {
            key_writer(self, key)?;
            value_writer(self, &map[key])?;
        }
        Ok(())
    }

    /// Like [`write_map`](CollectionWrite::write_map), but every key after
    /// the first goes through `diff_key_writer(previous, current)`.
    fn write_map_diff<K, V, L, KW, DW, VW, O>(
        &mut self,
        len_encoder: L,
        mut key_writer: KW,
        mut diff_key_writer: DW,
        order: O,
        mut value_writer: VW,
        map: &HashMap<K, V>,
    ) -> Result<()>
    where
        K: Eq + Hash,
        L: FnOnce(&mut Self, usize) -> Result<()>,
        KW: FnMut(&mut Self, &K) -> Result<()>,
        DW: FnMut(&mut Self, &K, &K) -> Result<()>,
        VW: FnMut(&mut Self, &V) -> Result<()>,
        O: Fn(&K, &K) -> Ordering,
    {
        let mut keys: Vec<&K> = map.keys().collect();
        keys.sort_by(|a, b| order(a, b));
        len_encoder(self, keys.len())?;
        let mut prev: Option<&K> = None;
        for key in keys {
            match prev {
                None => key_writer(self, key)?,
                Some(previous) => diff_key_writer(self, previous, key)?,
            }
            prev = Some(key);
            value_writer(self, &map[key])?;
        }
        Ok(())
    }
}

/// Trait for reading length-prefixed collections from a [`BitRead`].
pub trait CollectionRead: BitRead + Sized {
    /// Read back a list written by [`write_list`](CollectionWrite::write_list).
    fn read_list<T, L, F>(&mut self, len_decoder: L, mut element_reader: F) -> Result<Vec<T>>
    where
        L: FnOnce(&mut Self) -> Result<usize>,
        F: FnMut(&mut Self) -> Result<T>,
    {
        let len = len_decoder(self)?;
        let mut items = Vec::with_capacity(len.min(1 << 20));
        for _ in 0..len {
            items.push(element_reader(self)?);
        }
        Ok(items)
    }

    /// Read back a set written by [`write_set`](CollectionWrite::write_set).
    fn read_set<T, L, F>(&mut self, len_decoder: L, mut element_reader: F) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
        L: FnOnce(&mut Self) -> Result<usize>,
        F: FnMut(&mut Self) -> Result<T>,
    {
        let len = len_decoder(self)?;
        let mut set = HashSet::with_capacity(len.min(1 << 20));
        for _ in 0..len {
            set.insert(element_reader(self)?);
        }
        Ok(set)
    }

    /// Read back a set written by
    /// [`write_set_diff`](CollectionWrite::write_set_diff).
    fn read_set_diff<T, L, F, D>(
        &mut self,
        len_decoder: L,
        mut element_reader: F,
        mut diff_reader: D,
    ) -> Result<HashSet<T>>
    where
        T: Clone + Eq + Hash,
        L: FnOnce(&mut Self) -> Result<usize>,
        F: FnMut(&mut Self) -> Result<T>,
        D: FnMut(&mut Self, &T) -> Result<T>,
    {
        let len = len_decoder(self)?;
        let mut set = HashSet::with_capacity(len.min(1 << 20));
        let mut prev: Option<T> = None;
        for _ in 0..len {
            let element = match &prev {
                None => element_reader(self)?,
                Some(previous) => diff_reader(self, previous)?,
            };
            prev = Some(element.clone());
            set.insert(element);
        }
        Ok(set)
    }

    /// Read back a map written by [`write_map`](CollectionWrite::write_map).
    fn read_map<K, V, L, KR, VR>(
        &mut self,
        len_decoder: L,
        mut key_reader: KR,
        mut value_reader: VR,
    ) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
        L: FnOnce(&mut Self) -> Result<usize>,
        KR: FnMut(&mut Self) -> Result<K>,
        VR: FnMut(&mut Self) -> Result<V>,
    {
        let len = len_decoder(self)?;
        let mut map = HashMap::with_capacity(len.min(1 << 20));
        for _ in 0..len {
            let key = key_reader(self)?;
            let value = value_reader(self)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Read back a map written by
    /// [`write_map_diff`](CollectionWrite::write_map_diff).
    fn read_map_diff<K, V, L, KR, DR, VR>(
        &mut self,
        len_decoder: L,
        mut key_reader: KR,
        mut diff_key_reader: DR,
        mut value_reader: VR,
    ) -> Result<HashMap<K, V>>
    where
        K: Clone + Eq + Hash,
        L: FnOnce(&mut Self) -> Result<usize>,
        KR: FnMut(&mut Self) -> Result<K>,
        DR: FnMut(&mut Self, &K) -> Result<K>,
        VR: FnMut(&mut Self) -> Result<V>,
    {
        let len = len_decoder(self)?;
        let mut map = HashMap::with_capacity(len.min(1 << 20));
        let mut prev: Option<K> = None;
        for _ in 0..len {
            let key = match &prev {
                None => key_reader(self)?,
                Some(previous) => diff_key_reader(self, previous)?,
            };
            prev = Some(key.clone());
            let value = value_reader(self)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<W: BitWrite> CollectionWrite for W {}
impl<R: BitRead> CollectionRead for R {}
