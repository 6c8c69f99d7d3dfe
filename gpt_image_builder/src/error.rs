// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use gpt_image_types::Lba;
use thiserror::Error;

/// Error type for [`validate`] and [`make_gpt`]: the descriptor broke
/// one of the layout rules. The variants follow the order in which the
/// rules are checked; no output is produced once any rule fails.
///
/// [`validate`]: crate::validate
/// [`make_gpt`]: crate::make_gpt
#[derive(Clone, Debug, Error, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum InvalidDescriptor {
    /// The block size is zero or not a multiple of 512.
    #[error("block size {0} is not a non-zero multiple of 512")]
    BlockSize(u64),

    /// The partition list is empty.
    #[error("partition list is empty")]
    NoPartitions,

    /// More partitions than the header's 32-bit entry count can hold.
    #[error("number of partitions ({0}) does not fit in a u32")]
    TooManyPartitions(usize),

    /// The device has too few blocks to hold the GPT structures and at
    /// least one usable block.
    #[error(
        "disk of {actual} blocks is too small for the layout \
         (minimum {required} blocks)"
    )]
    TooFewBlocks {
        /// Blocks in the descriptor.
        actual: u64,
        /// Minimum block count for this partition entry array.
        required: u64,
    },

    /// A partition starts in the region reserved for the GPT
    /// structures.
    #[error(
        "partition {index} starts at {starting}, \
         before the first usable LBA {first_usable}"
    )]
    StartBeforeUsable {
        /// Index of the offending partition.
        index: usize,
        /// Starting LBA of the partition.
        starting: Lba,
        /// First LBA available for partition data.
        first_usable: Lba,
    },

    /// A partition ends in the region reserved for the backup GPT
    /// structures.
    #[error(
        "partition {index} ends at {ending}, \
         after the last usable LBA {last_usable}"
    )]
    EndAfterUsable {
        /// Index of the offending partition.
        index: usize,
        /// Ending LBA of the partition.
        ending: Lba,
        /// Last LBA available for partition data.
        last_usable: Lba,
    },

    /// A partition's starting LBA is greater than its ending LBA.
    #[error("partition {index} starts at {starting}, after its end {ending}")]
    StartAfterEnd {
        /// Index of the offending partition.
        index: usize,
        /// Starting LBA of the partition.
        starting: Lba,
        /// Ending LBA of the partition.
        ending: Lba,
    },

    /// Two partitions cover overlapping block ranges.
    #[error("partitions {first} and {second} overlap")]
    Overlap {
        /// Index of the earlier partition.
        first: usize,
        /// Index of the later partition.
        second: usize,
    },

    /// Numeric overflow occurred while deriving the layout.
    #[error("numeric overflow occurred")]
    Overflow,
}
