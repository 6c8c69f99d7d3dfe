// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::mem;
use gpt_image_types::{BlockSize, GptPartitionEntry, Lba};

#[allow(clippy::as_conversions)]
const PARTITION_ENTRY_SIZE: u64 = mem::size_of::<GptPartitionEntry>() as u64;

/// Disk geometry derived from a descriptor: where each GPT structure
/// lives and how large the two image blobs are.
///
/// ```text
/// LBA 0                                                  LBA num_blocks-1
/// ┌───┬───────┬───────────┬─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─┬───────────┬───────┐
/// │MBR│Primary│Entry array│first_usable..        │Entry array│Backup │
/// │   │header │(primary)  │        ..last_usable │(backup)   │header │
/// └───┴───────┴───────────┴─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─┴───────────┴───────┘
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GptLayout {
    block_size: BlockSize,
    number_of_blocks: u64,
    num_entries: u32,
    partition_entry_blocks: u64,
}

impl GptLayout {
    /// Get the number of blocks needed for one copy of a partition
    /// entry array of `num_entries` entries, rounding up to a whole
    /// block.
    #[must_use]
    pub fn entry_array_blocks(block_size: BlockSize, num_entries: u32) -> u64 {
        (u64::from(num_entries) * PARTITION_ENTRY_SIZE)
            .div_ceil(block_size.to_u64())
    }

    /// Create a layout for a disk of `number_of_blocks` blocks holding
    /// `num_entries` partition entries. Returns `None` if the disk is
    /// too small: the MBR, two headers, and two entry arrays must fit,
    /// with at least one usable block left over.
    #[must_use]
    pub fn new(
        block_size: BlockSize,
        number_of_blocks: u64,
        num_entries: u32,
    ) -> Option<Self> {
        let partition_entry_blocks =
            Self::entry_array_blocks(block_size, num_entries);
        if number_of_blocks < Self::min_blocks(partition_entry_blocks)? {
            return None;
        }

        Some(Self {
            block_size,
            number_of_blocks,
            num_entries,
            partition_entry_blocks,
        })
    }

    /// Get the minimum block count for a disk whose partition entry
    /// array needs `partition_entry_blocks` blocks per copy. Returns
    /// `None` if overflow occurs.
    #[must_use]
    pub fn min_blocks(partition_entry_blocks: u64) -> Option<u64> {
        // MBR + two headers + two entry arrays + one usable block.
        partition_entry_blocks.checked_mul(2)?.checked_add(4)
    }

    /// Size of a logical block in bytes.
    #[must_use]
    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Total number of logical blocks on the device.
    #[must_use]
    pub fn number_of_blocks(&self) -> u64 {
        self.number_of_blocks
    }

    /// Number of entries in the partition entry array.
    #[must_use]
    pub fn num_entries(&self) -> u32 {
        self.num_entries
    }

    /// Number of blocks covered by one copy of the partition entry
    /// array.
    #[must_use]
    pub fn partition_entry_blocks(&self) -> u64 {
        self.partition_entry_blocks
    }

    /// LBA of the primary GPT header.
    #[must_use]
    pub fn primary_header_lba(&self) -> Lba {
        Lba(1)
    }

    /// First LBA of the primary partition entry array.
    #[must_use]
    pub fn primary_entry_lba(&self) -> Lba {
        Lba(2)
    }

    /// First LBA that can be used for partition data.
    #[must_use]
    pub fn first_usable_lba(&self) -> Lba {
        Lba(2 + self.partition_entry_blocks)
    }

    /// Last LBA that can be used for partition data.
    #[must_use]
    pub fn last_usable_lba(&self) -> Lba {
        Lba(self.number_of_blocks - self.partition_entry_blocks - 2)
    }

    /// First LBA of the backup partition entry array.
    #[must_use]
    pub fn backup_entry_lba(&self) -> Lba {
        Lba(self.number_of_blocks - 1 - self.partition_entry_blocks)
    }

    /// LBA of the backup GPT header.
    #[must_use]
    pub fn backup_header_lba(&self) -> Lba {
        Lba(self.number_of_blocks - 1)
    }

    /// Get the number of bytes covered by the entries of one partition
    /// entry array, ignoring the padding needed at the end to match the
    /// block size. This corresponds to the number of bytes that are
    /// covered by the [`partition_entry_array_crc32`].
    ///
    /// [`partition_entry_array_crc32`]: gpt_image_types::GptHeader::partition_entry_array_crc32
    #[must_use]
    pub fn entry_array_num_bytes_exact(&self) -> u64 {
        u64::from(self.num_entries) * PARTITION_ENTRY_SIZE
    }

    /// [`entry_array_num_bytes_exact`] as a [`usize`]. Returns `None`
    /// if overflow occurs.
    ///
    /// [`entry_array_num_bytes_exact`]: Self::entry_array_num_bytes_exact
    #[must_use]
    pub fn entry_array_num_bytes_exact_as_usize(&self) -> Option<usize> {
        self.entry_array_num_bytes_exact().try_into().ok()
    }

    /// Number of blocks in the header blob: the protective MBR, the
    /// primary header, and the primary partition entry array.
    #[must_use]
    pub fn header_num_blocks(&self) -> u64 {
        2 + self.partition_entry_blocks
    }

    /// Number of blocks in the footer blob: the backup partition entry
    /// array and the backup header.
    #[must_use]
    pub fn footer_num_blocks(&self) -> u64 {
        1 + self.partition_entry_blocks
    }

    /// Size of the header blob in bytes. Returns `None` if overflow
    /// occurs.
    #[must_use]
    pub fn header_num_bytes(&self) -> Option<u64> {
        self.header_num_blocks()
            .checked_mul(self.block_size.to_u64())
    }

    /// [`header_num_bytes`] as a [`usize`]. Returns `None` if overflow
    /// occurs.
    ///
    /// [`header_num_bytes`]: Self::header_num_bytes
    #[must_use]
    pub fn header_num_bytes_as_usize(&self) -> Option<usize> {
        self.header_num_bytes()?.try_into().ok()
    }

    /// Size of the footer blob in bytes. Returns `None` if overflow
    /// occurs.
    #[must_use]
    pub fn footer_num_bytes(&self) -> Option<u64> {
        self.footer_num_blocks()
            .checked_mul(self.block_size.to_u64())
    }

    /// [`footer_num_bytes`] as a [`usize`]. Returns `None` if overflow
    /// occurs.
    ///
    /// [`footer_num_bytes`]: Self::footer_num_bytes
    #[must_use]
    pub fn footer_num_bytes_as_usize(&self) -> Option<usize> {
        self.footer_num_bytes()?.try_into().ok()
    }
}
