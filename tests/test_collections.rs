/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;
use huffstream::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn int_order(a: &i64, b: &i64) -> core::cmp::Ordering {
    a.cmp(b)
}

#[test]
fn test_list_round_trip() -> Result<()> {
    let natural = NaturalCode::new(8)?;
    let items: Vec<u64> = vec![3, 1, 4, 1, 5, 9, 2, 6];

    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);
    writer.write_list(
        |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
        |w, item: &u64| w.write_symbol(&natural, item).map(|_| ()),
        &items,
    )?;
    writer.close()?;
    drop(writer);

    let mut reader = ByteBitReader::new(buffer.as_slice());
    let decoded = reader.read_list(
        |r| Ok(r.read_symbol(&natural)? as usize),
        |r| r.read_symbol(&natural),
    )?;
    assert_eq!(decoded, items);
    Ok(())
}

#[test]
fn test_list_of_strings_round_trip() -> Result<()> {
    let natural = NaturalCode::new(8)?;
    let items: Vec<String> = ["", "a", "b", "ab", "A", "1418528"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);
    writer.write_list(
        |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
        |w, item: &String| w.write_string(item),
        &items,
    )?;
    writer.close()?;
    drop(writer);

    let mut reader = ByteBitReader::new(buffer.as_slice());
    let decoded = reader.read_list(
        |r| Ok(r.read_symbol(&natural)? as usize),
        |r| r.read_string(),
    )?;
    assert_eq!(decoded, items);
    Ok(())
}

#[test]
fn test_empty_collections_cost_only_the_length() -> Result<()> {
    let natural = NaturalCode::new(8)?;

    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);
    writer.write_list(
        |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
        |_, _: &u64| panic!("no elements to write"),
        &[],
    )?;
    writer.close()?;
    drop(writer);

    // Eight bits for the zero length, nothing else.
    assert_eq!(buffer.len(), 1);

    let mut reader = ByteBitReader::new(buffer.as_slice());
    let decoded: Vec<u64> = reader.read_list(
        |r| Ok(r.read_symbol(&natural)? as usize),
        |_| panic!("no elements to read"),
    )?;
    assert!(decoded.is_empty());

    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);
    writer.write_map(
        |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
        |_, _: &i64| panic!("no keys to write"),
        int_order,
        |_, _: &String| panic!("no values to write"),
        &HashMap::new(),
    )?;
    writer.close()?;
    drop(writer);
    assert_eq!(buffer.len(), 1);
    Ok(())
}

#[test]
fn test_map_with_diff_keys() -> Result<()> {
    // Keys go out sorted: -42 as an integer, then the gaps 41 and 24 as
    // naturals; values are strings of UTF-16 code units.
    let natural = NaturalCode::new(8)?;
    let integer = IntegerCode::new(8)?;

    let mut map = HashMap::new();
    map.insert(-42i64, "0".to_string());
    map.insert(0, "3".to_string());
    map.insert(25, "7".to_string());

    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);
    writer.write_map_diff(
        |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
        |w, key: &i64| w.write_symbol(&integer, key).map(|_| ()),
        |w, prev: &i64, key: &i64| {
            w.write_symbol(&natural, &((key - prev - 1) as u64)).map(|_| ())
        },
        int_order,
        |w, value: &String| w.write_string(value),
        &map,
    )?;
    writer.close()?;
    drop(writer);

    let mut reader = ByteBitReader::new(buffer.as_slice());
    let decoded = reader.read_map_diff(
        |r| Ok(r.read_symbol(&natural)? as usize),
        |r| r.read_symbol(&integer),
        |r, prev: &i64| Ok(prev + r.read_symbol(&natural)? as i64 + 1),
        |r| r.read_string(),
    )?;
    assert_eq!(decoded, map);
    Ok(())
}

#[test]
fn test_maps_with_and_without_diff() -> Result<()> {
    let natural = NaturalCode::new(8)?;
    let integer = IntegerCode::new(8)?;
    let values = [-42i64, -5, -1, 0, 1, 2, 25];

    for use_diff in [false, true] {
        for a in 0..values.len() {
            for b in a..values.len() {
                for c in b..values.len() {
                    let mut map = HashMap::new();
                    map.insert(values[a], a.to_string());
                    map.insert(values[b], b.to_string());
                    map.insert(values[c], c.to_string());

                    let mut buffer = Vec::new();
                    let mut writer = ByteBitWriter::new(&mut buffer);
                    let len_enc = |w: &mut ByteBitWriter<&mut Vec<u8>>, len: usize| {
                        w.write_symbol(&natural, &(len as u64)).map(|_| ())
                    };
                    if use_diff {
                        writer.write_map_diff(
                            len_enc,
                            |w, key: &i64| w.write_symbol(&integer, key).map(|_| ()),
                            |w, prev: &i64, key: &i64| {
                                w.write_symbol(&natural, &((key - prev - 1) as u64))
                                    .map(|_| ())
                            },
                            int_order,
                            |w, value: &String| w.write_string(value),
                            &map,
                        )?;
                    } else {
                        writer.write_map(
                            len_enc,
                            |w, key: &i64| w.write_symbol(&integer, key).map(|_| ()),
                            int_order,
                            |w, value: &String| w.write_string(value),
                            &map,
                        )?;
                    }
                    writer.close()?;
                    drop(writer);

                    let mut reader = ByteBitReader::new(buffer.as_slice());
                    let decoded = if use_diff {
                        reader.read_map_diff(
                            |r| Ok(r.read_symbol(&natural)? as usize),
                            |r| r.read_symbol(&integer),
                            |r, prev: &i64| {
                                Ok(prev + r.read_symbol(&natural)? as i64 + 1)
                            },
                            |r| r.read_string(),
                        )?
                    } else {
                        reader.read_map(
                            |r| Ok(r.read_symbol(&natural)? as usize),
                            |r| r.read_symbol(&integer),
                            |r| r.read_string(),
                        )?
                    };
                    assert_eq!(decoded, map);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_set_with_diff() -> Result<()> {
    let natural = NaturalCode::new(8)?;
    let set: HashSet<u64> = [0, 1, 5, 127, 128, 16511].into_iter().collect();

    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);
    writer.write_set_diff(
        |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
        |w, element: &u64| w.write_symbol(&natural, element).map(|_| ()),
        |w, prev: &u64, element: &u64| {
            w.write_symbol(&natural, &(element - prev - 1)).map(|_| ())
        },
        |a, b| a.cmp(b),
        &set,
    )?;
    writer.close()?;
    drop(writer);

    let mut reader = ByteBitReader::new(buffer.as_slice());
    let decoded = reader.read_set_diff(
        |r| Ok(r.read_symbol(&natural)? as usize),
        |r| r.read_symbol(&natural),
        |r, prev: &u64| Ok(prev + r.read_symbol(&natural)? + 1),
    )?;
    assert_eq!(decoded, set);
    Ok(())
}

#[test]
fn test_ranged_set_exact_cost() -> Result<()> {
    // {-49, 0, 15} in [-49, 15]: the elements narrow to [-49, 13],
    // [-48, 14] and [1, 15], which cost 5, 6 and 4 bits; the length, over
    // [0, 3], costs 2 more.
    let set: BTreeSet<i64> = [-49, 0, 15].into_iter().collect();
    let length_code = RangedCode::new(0, 3)?;

    let mut buffer = Vec::new();
    let mut writer: CountBitWriter<_> = CountBitWriter::new(ByteBitWriter::new(&mut buffer));
    writer.write_ranged_int_set(
        |w, len| w.write_symbol(&length_code, &(len as i64)).map(|_| ()),
        -49,
        15,
        &set,
    )?;
    assert_eq!(writer.bits_written, 17);
    writer.into_inner().close()?;

    let mut reader = ByteBitReader::new(buffer.as_slice());
    let decoded = reader.read_ranged_int_set(
        |r| Ok(r.read_symbol(&length_code)? as usize),
        -49,
        15,
    )?;
    assert_eq!(decoded, set);
    Ok(())
}

#[test]
fn test_ranged_set_sweep() -> Result<()> {
    let values = [-49i64, -48, -47, -46, -3, -1, 0, 1, 2, 12, 13, 14, 15];
    let length_code = HuffmanCode::from_symbols(0i64..=3, int_order)?;

    for min in values {
        for max in values {
            if min > max {
                continue;
            }
            let mut random = SmallRng::seed_from_u64((min * 1000 + max) as u64);
            for _ in 0..20 {
                let mut set = BTreeSet::new();
                for _ in 0..3 {
                    let candidate = values[random.gen_range(0..values.len())];
                    if candidate >= min && candidate <= max {
                        set.insert(candidate);
                    }
                }

                let mut buffer = Vec::new();
                let mut writer = ByteBitWriter::new(&mut buffer);
                writer.write_ranged_int_set(
                    |w, len| w.write_symbol(&length_code, &(len as i64)).map(|_| ()),
                    min,
                    max,
                    &set,
                )?;
                writer.close()?;
                drop(writer);

                let mut reader = ByteBitReader::new(buffer.as_slice());
                let decoded = reader.read_ranged_int_set(
                    |r| Ok(r.read_symbol(&length_code)? as usize),
                    min,
                    max,
                )?;
                assert_eq!(decoded, set);
            }
        }
    }
    Ok(())
}

#[test]
fn test_ranged_set_validates_bounds() -> Result<()> {
    let natural = NaturalCode::new(8)?;
    let mut buffer = Vec::new();
    let mut writer = ByteBitWriter::new(&mut buffer);

    let out_of_range: BTreeSet<i64> = [0, 100].into_iter().collect();
    assert!(matches!(
        writer.write_ranged_int_set(
            |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
            0,
            9,
            &out_of_range,
        ),
        Err(Error::InvalidArgument(_))
    ));

    let too_many: BTreeSet<i64> = (0..5).collect();
    assert!(matches!(
        writer.write_ranged_int_set(
            |w, len| w.write_symbol(&natural, &(len as u64)).map(|_| ()),
            0,
            2,
            &too_many,
        ),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}
