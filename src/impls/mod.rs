/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of [`BitRead`](crate::traits::BitRead) and
//! [`BitWrite`](crate::traits::BitWrite) over byte-oriented streams.
//!
//! Within each octet, bit 0 (the least significant) is the earliest bit of
//! the stream and bit 7 the latest. At the end of a write session the last
//! partial byte is emitted with its unused high bits set to zero; those
//! padding bits are not logically part of any value, so readers must rely on
//! length prefixes, not on end of input, to delimit a message.

pub mod bit_reader;
pub use bit_reader::ByteBitReader;

pub mod bit_writer;
pub use bit_writer::ByteBitWriter;
