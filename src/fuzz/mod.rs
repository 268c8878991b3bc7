/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Helpers for fuzzing the codecs; used by the harnesses in the `fuzz/`
//! directory, behind the `fuzz` feature.

pub mod codes;
