/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Core traits: bit-by-bit stream access and the prefix-code interface.

pub mod bits;
pub use bits::{BitRead, BitWrite};

pub mod code;
pub use code::{Levels, PrefixCode};
