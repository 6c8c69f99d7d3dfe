// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::fmt::{Debug, Display};
use core::hash::Hash;
use gpt_image_builder::GptDescriptor;
use gpt_image_types::{guid, GptPartitionEntry, GptPartitionType, LbaLe};
use std::collections::hash_map::DefaultHasher;

#[allow(dead_code)]
pub fn check_derives<T>()
where
    T: Clone
        + Copy
        + Debug
        + Default
        + Display
        + Eq
        + PartialEq
        + Hash
        + Ord
        + PartialOrd,
{
    let a = T::default();

    // PartialEq
    assert_eq!(a, a);

    // Clone / Copy
    assert_eq!(a, a.clone());
    let c: T = a;
    assert_eq!(a, c);

    // PartialOrd
    assert!(a >= a);

    // Debug/Display
    assert!(!format!("{a:?}").is_empty());
    format!("{a}");

    // Hash
    let mut hasher = DefaultHasher::new();
    a.hash(&mut hasher);
}

#[allow(dead_code)]
pub fn create_partition_entry() -> GptPartitionEntry {
    GptPartitionEntry {
        partition_type_guid: GptPartitionType(guid!(
            "ccf0994f-f7e0-4e26-a011-843e38aa2eac"
        )),
        unique_partition_guid: guid!("37c75ffd-8932-467a-9c56-8cf1f0456b12"),
        starting_lba: LbaLe::from_u64(34),
        ending_lba: LbaLe::from_u64(2014),
        attributes: Default::default(),
        name: "hello world!".parse().unwrap(),
    }
}

/// A 1 MiB disk with one partition spanning most of the usable region.
#[allow(dead_code)]
pub fn create_descriptor() -> GptDescriptor {
    GptDescriptor {
        block_size: 512,
        number_of_blocks: 2048,
        disk_guid: guid!("57a7feb6-8cd5-4922-b7bd-c78b0914e870"),
        partitions: vec![create_partition_entry()],
    }
}

/// Read a little-endian `u32` at `offset`.
#[allow(dead_code)]
pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Read a little-endian `u64` at `offset`.
#[allow(dead_code)]
pub fn u64_at(bytes: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap())
}
