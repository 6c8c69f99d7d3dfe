// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::{GptDescriptor, GptLayout, InvalidDescriptor};
use bytemuck::bytes_of;
use core::mem;
use gpt_image_types::{
    BlockSize, Crc32, GptHeader, Lba, LbaRangeInclusive, MasterBootRecord,
    U32Le,
};

/// The two byte blobs that bracket a GPT disk image, the output of
/// [`make_gpt`].
///
/// Writing `header` at byte offset zero and `footer` ending exactly at
/// the last byte of a device of `block_size * number_of_blocks` bytes
/// yields a complete, self-consistent GPT layout; every byte of the
/// image not covered by a blob belongs to the partition data region.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GptData {
    /// The protective MBR, the primary GPT header, and the primary
    /// partition entry array, padded to whole blocks.
    pub header: Vec<u8>,

    /// The backup partition entry array and the backup GPT header,
    /// padded to whole blocks.
    pub footer: Vec<u8>,
}

/// Check every layout rule against `descriptor` and derive its
/// [`GptLayout`]. Rules are applied in a fixed order and the first
/// violation is returned.
pub fn validate(
    descriptor: &GptDescriptor,
) -> Result<GptLayout, InvalidDescriptor> {
    let block_size = BlockSize::from_u64(descriptor.block_size)
        .ok_or(InvalidDescriptor::BlockSize(descriptor.block_size))?;

    if descriptor.partitions.is_empty() {
        return Err(InvalidDescriptor::NoPartitions);
    }

    let num_entries = u32::try_from(descriptor.partitions.len()).map_err(
        |_| InvalidDescriptor::TooManyPartitions(descriptor.partitions.len()),
    )?;

    let layout =
        GptLayout::new(block_size, descriptor.number_of_blocks, num_entries)
            .ok_or_else(|| {
                let partition_entry_blocks =
                    GptLayout::entry_array_blocks(block_size, num_entries);
                match GptLayout::min_blocks(partition_entry_blocks) {
                    Some(required) => InvalidDescriptor::TooFewBlocks {
                        actual: descriptor.number_of_blocks,
                        required,
                    },
                    None => InvalidDescriptor::Overflow,
                }
            })?;

    let first_usable = layout.first_usable_lba();
    let last_usable = layout.last_usable_lba();

    let mut ranges = Vec::with_capacity(descriptor.partitions.len());
    for (index, partition) in descriptor.partitions.iter().enumerate() {
        let starting = Lba::from(partition.starting_lba);
        let ending = Lba::from(partition.ending_lba);

        if starting.to_u64() < first_usable.to_u64() {
            return Err(InvalidDescriptor::StartBeforeUsable {
                index,
                starting,
                first_usable,
            });
        }
        if ending.to_u64() > last_usable.to_u64() {
            return Err(InvalidDescriptor::EndAfterUsable {
                index,
                ending,
                last_usable,
            });
        }
        let range = LbaRangeInclusive::new(starting, ending).ok_or(
            InvalidDescriptor::StartAfterEnd {
                index,
                starting,
                ending,
            },
        )?;
        ranges.push(range);
    }

    for (first, a) in ranges.iter().enumerate() {
        for (second, b) in ranges.iter().enumerate().skip(first + 1) {
            // Endpoint containment only: a partition nested strictly
            // inside an earlier one is not caught here.
            if b.contains(a.start()) || b.contains(a.end()) {
                return Err(InvalidDescriptor::Overlap { first, second });
            }
        }
    }

    Ok(layout)
}

/// Synthesize the GPT byte blobs for `descriptor`.
///
/// The descriptor is validated first (see [`validate`]); nothing is
/// allocated until every rule passes. On success the returned
/// [`GptData`] holds freshly allocated blobs of
/// `(2 + partition_entry_blocks) * block_size` and
/// `(1 + partition_entry_blocks) * block_size` bytes. All bytes not
/// covered by a placed record are zero.
pub fn make_gpt(
    descriptor: &GptDescriptor,
) -> Result<GptData, InvalidDescriptor> {
    let layout = validate(descriptor)?;

    let block_size = layout
        .block_size()
        .to_usize()
        .ok_or(InvalidDescriptor::Overflow)?;

    // One copy of the partition entry array, protected by its CRC.
    let num_bytes = layout
        .entry_array_num_bytes_exact_as_usize()
        .ok_or(InvalidDescriptor::Overflow)?;
    let mut entry_array = Vec::with_capacity(num_bytes);
    for entry in &descriptor.partitions {
        entry_array.extend_from_slice(bytes_of(entry));
    }
    let entry_array_crc32 = Crc32::of(&entry_array);

    let mbr = MasterBootRecord::protective_mbr(descriptor.number_of_blocks);

    let mut primary = GptHeader {
        my_lba: layout.primary_header_lba().into(),
        alternate_lba: layout.backup_header_lba().into(),
        first_usable_lba: layout.first_usable_lba().into(),
        last_usable_lba: layout.last_usable_lba().into(),
        disk_guid: descriptor.disk_guid,
        partition_entry_lba: layout.primary_entry_lba().into(),
        number_of_partition_entries: U32Le::from_u32(layout.num_entries()),
        partition_entry_array_crc32: entry_array_crc32,
        ..GptHeader::default()
    };
    primary.update_header_crc32();

    let mut backup = GptHeader {
        my_lba: layout.backup_header_lba().into(),
        alternate_lba: layout.primary_header_lba().into(),
        partition_entry_lba: layout.backup_entry_lba().into(),
        ..primary
    };
    backup.update_header_crc32();

    let header_num_bytes = layout
        .header_num_bytes_as_usize()
        .ok_or(InvalidDescriptor::Overflow)?;
    let mut header = vec![0; header_num_bytes];
    header[..mem::size_of::<MasterBootRecord>()]
        .copy_from_slice(bytes_of(&mbr));
    header[block_size..block_size + mem::size_of::<GptHeader>()]
        .copy_from_slice(bytes_of(&primary));
    header[block_size * 2..block_size * 2 + entry_array.len()]
        .copy_from_slice(&entry_array);

    let footer_num_bytes = layout
        .footer_num_bytes_as_usize()
        .ok_or(InvalidDescriptor::Overflow)?;
    let mut footer = vec![0; footer_num_bytes];
    footer[..entry_array.len()].copy_from_slice(&entry_array);
    let backup_offset = footer_num_bytes - block_size;
    footer[backup_offset..backup_offset + mem::size_of::<GptHeader>()]
        .copy_from_slice(bytes_of(&backup));

    Ok(GptData { header, footer })
}
