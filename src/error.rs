/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Errors shared by every codec in the crate.

use thiserror::Error;

/// The errors a bit stream or codec operation can return.
///
/// Encoders validate their argument eagerly and report
/// [`InvalidArgument`](Error::InvalidArgument) or
/// [`UnknownSymbol`](Error::UnknownSymbol) before touching the stream;
/// decoders that run out of input mid-value report
/// [`PrematureEnd`](Error::PrematureEnd). Errors of the underlying byte
/// source or sink are passed through verbatim.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying byte source or sink reported an error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source was exhausted while more bits were needed.
    #[error("bit stream ended in the middle of a value")]
    PrematureEnd,

    /// The stream was used after [`close`](crate::impls::ByteBitWriter::close).
    #[error("stream already closed")]
    StreamClosed,

    /// A value outside the code's domain, an inverted range, or a
    /// malformed parameter.
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// The symbol to encode is not present in the given code.
    #[error("symbol is not present in the given code")]
    UnknownSymbol,

    /// The codeword lengths do not tile the code space (Kraft sum ≠ 1).
    #[error("code is not exhaustive")]
    NonExhaustive,

    /// A zero-bit codeword in a code with more than one symbol.
    #[error("only a single-symbol code may use a zero-bit codeword")]
    OverSpecified,
}

/// A [`Result`](core::result::Result) with this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
