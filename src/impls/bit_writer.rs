/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::Write;

use crate::error::{Error, Result};
use crate::traits::BitWrite;

/// An implementation of [`BitWrite`] over a [`std::io::Write`].
///
/// Bits accumulate in a one-byte buffer, least-significant position first,
/// and the buffer is emitted every eighth bit, so the backend sees one write
/// per completed octet.
///
/// [`close`](ByteBitWriter::close) emits the pending partial byte (upper
/// bits zero) and flushes the backend; it must be called to terminate the
/// stream, and it is not idempotent — a second call, like any write after
/// the first, returns [`Error::StreamClosed`]. Dropping an unclosed writer
/// flushes on a best-effort basis, losing any error.
#[derive(Debug)]
pub struct ByteBitWriter<W: Write> {
    backend: W,
    /// Pending bits, in the lowest `bits_in_buffer` positions.
    buffer: u8,
    /// Number of valid bits in the buffer, from 0 to 7 between operations.
    bits_in_buffer: u32,
    closed: bool,
}

impl<W: Write> ByteBitWriter<W> {
    /// Create a new [`ByteBitWriter`] around a [`std::io::Write`].
    pub fn new(backend: W) -> Self {
        Self {
            backend,
            buffer: 0,
            bits_in_buffer: 0,
            closed: false,
        }
    }

    /// Emit the pending partial byte, if any, flush the backend, and mark
    /// the stream as closed.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::StreamClosed);
        }
        if self.bits_in_buffer > 0 {
            self.backend.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.backend.flush()?;
        self.closed = true;
        Ok(())
    }
}

impl<W: Write> BitWrite for ByteBitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.closed {
            return Err(Error::StreamClosed);
        }
        if bit {
            self.buffer |= 1 << self.bits_in_buffer;
        }
        self.bits_in_buffer += 1;
        if self.bits_in_buffer == 8 {
            self.backend.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        Ok(())
    }
}

impl<W: Write> Drop for ByteBitWriter<W> {
    fn drop(&mut self) {
        // During a drop we can't save anything if it goes bad :/
        if !self.closed {
            let _ = self.close();
        }
    }
}
