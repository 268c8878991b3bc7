/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::Read;

use crate::error::{Error, Result};
use crate::traits::BitRead;

/// An implementation of [`BitRead`] over a [`std::io::Read`].
///
/// Bits are consumed from the least-significant position of a one-byte
/// buffer, refilled from the backend every eighth bit. Reaching the end of
/// the backend while a bit is needed is reported as
/// [`Error::PrematureEnd`]; any other backend error is passed through.
#[derive(Debug)]
pub struct ByteBitReader<R: Read> {
    backend: R,
    /// Unconsumed bits, next one in the lowest position.
    buffer: u8,
    /// Number of valid bits in the buffer, from 0 to 8.
    bits_in_buffer: u32,
    closed: bool,
}

impl<R: Read> ByteBitReader<R> {
    /// Create a new [`ByteBitReader`] around a [`std::io::Read`].
    pub fn new(backend: R) -> Self {
        Self {
            backend,
            buffer: 0,
            bits_in_buffer: 0,
            closed: false,
        }
    }

    /// Discard any buffered bits and mark the stream as closed.
    ///
    /// Like the writer's [`close`](crate::impls::ByteBitWriter::close), this
    /// is not idempotent: a second call returns [`Error::StreamClosed`].
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::StreamClosed);
        }
        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.closed = true;
        Ok(())
    }
}

impl<R: Read> BitRead for ByteBitReader<R> {
    fn read_bit(&mut self) -> Result<bool> {
        if self.closed {
            return Err(Error::StreamClosed);
        }
        if self.bits_in_buffer == 0 {
            let mut byte = [0];
            self.backend.read_exact(&mut byte).map_err(|e| {
                if e.kind() == std::io::ErrorKind::UnexpectedEof {
                    Error::PrematureEnd
                } else {
                    Error::Io(e)
                }
            })?;
            self.buffer = byte[0];
            self.bits_in_buffer = 8;
        }
        let bit = self.buffer & 1 != 0;
        self.buffer >>= 1;
        self.bits_in_buffer -= 1;
        Ok(bit)
    }
}
