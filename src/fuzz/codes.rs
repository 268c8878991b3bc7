/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

/// A random sequence of codec operations to round-trip.
#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Bit(bool),
    Bits(u64, u32),
    Unary(u64),
    Ranged(i64, i64, i64),
    Natural(u64, u32),
    Integer(i64, u32),
}

/// Write every command of `data` on a fresh stream, read the stream back,
/// and assert that every value survives unchanged.
pub fn harness(data: FuzzCase) {
    let mut data = data;
    for command in &mut data.commands {
        match command {
            RandomCommand::Bit(_) => {}
            RandomCommand::Bits(value, n_bits) => {
                *n_bits = 1 + *n_bits % 63;
                *value &= (1u64 << *n_bits) - 1;
            }
            RandomCommand::Unary(value) => {
                *value %= 300;
            }
            RandomCommand::Ranged(min, max, value) => {
                *min %= 1 << 40;
                *max %= 1 << 40;
                if min > max {
                    core::mem::swap(min, max);
                }
                let span = *max - *min + 1;
                *value = *min + value.rem_euclid(span);
            }
            RandomCommand::Natural(_, bit_align) => {
                *bit_align = 2 + *bit_align % 63;
            }
            RandomCommand::Integer(_, bit_align) => {
                *bit_align = 2 + *bit_align % 63;
            }
        }
    }

    let mut buffer = Vec::new();
    {
        let mut writer = ByteBitWriter::new(&mut buffer);
        for command in &data.commands {
            match command {
                RandomCommand::Bit(bit) => writer.write_bit(*bit).unwrap(),
                RandomCommand::Bits(value, n_bits) => {
                    writer.write_bits(*value, *n_bits).unwrap();
                }
                RandomCommand::Unary(value) => {
                    writer.write_unary(*value).unwrap();
                }
                RandomCommand::Ranged(min, max, value) => {
                    let code = RangedCode::new(*min, *max).unwrap();
                    writer.write_symbol(&code, value).unwrap();
                }
                RandomCommand::Natural(value, bit_align) => {
                    let code = NaturalCode::new(*bit_align).unwrap();
                    writer.write_symbol(&code, value).unwrap();
                }
                RandomCommand::Integer(value, bit_align) => {
                    let code = IntegerCode::new(*bit_align).unwrap();
                    writer.write_symbol(&code, value).unwrap();
                }
            };
        }
        writer.close().unwrap();
    }

    let mut reader = ByteBitReader::new(buffer.as_slice());
    for command in &data.commands {
        match command {
            RandomCommand::Bit(bit) => {
                assert_eq!(reader.read_bit().unwrap(), *bit);
            }
            RandomCommand::Bits(value, n_bits) => {
                assert_eq!(reader.read_bits(*n_bits).unwrap(), *value);
            }
            RandomCommand::Unary(value) => {
                assert_eq!(reader.read_unary().unwrap(), *value);
            }
            RandomCommand::Ranged(min, max, value) => {
                let code = RangedCode::new(*min, *max).unwrap();
                assert_eq!(reader.read_symbol(&code).unwrap(), *value);
            }
            RandomCommand::Natural(value, bit_align) => {
                let code = NaturalCode::new(*bit_align).unwrap();
                assert_eq!(reader.read_symbol(&code).unwrap(), *value);
            }
            RandomCommand::Integer(value, bit_align) => {
                let code = IntegerCode::new(*bit_align).unwrap();
                assert_eq!(reader.read_symbol(&code).unwrap(), *value);
            }
        }
    }
}
