// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Library of GPT on-disk record types.
//!
//! # GPT disk components
//!
//! ```text
//! ┌───┬───────┬─────────────────┬─────────┬───────────────────┬─────────┐
//! │MBR│Primary│Primary partition│Partition│Backup partition   │Backup   │
//! │   │header │entry array      │data     │entry array        │header   │
//! └───┴───────┴─────────────────┴─────────┴───────────────────┴─────────┘
//! ```
//!
//! 1. The first block of the disk contains a protective MBR. See
//! [`MasterBootRecord::protective_mbr`].
//! 2. The second block of the disk contains the primary GPT header. See
//! [`GptHeader`].
//! 3. Additional blocks after the header contain the partition entry
//! array. See [`GptPartitionEntry`].
//! 4. At the end of the disk is a backup partition entry array and a
//! backup GPT header.
//!
//! # Endianness
//!
//! The UEFI Specification specifies that data structures are little
//! endian (section 1.8.1 "Data Structure Descriptions"). All multi-byte
//! fields in this library are stored as little-endian byte arrays — see
//! [`U32Le`], [`U64Le`], and [`LbaLe`] — so a record's in-memory
//! representation is already its wire representation and serialization
//! is [`bytemuck::bytes_of`]. Bytes within each field will appear
//! reversed when compared with a flat hex dump of GPT data.
//!
//! [`Guid`] is an exception only in that it has no integer fields at
//! all: it is 16 opaque bytes, stored and serialized in the order the
//! caller supplied them.
//!
//! # Features
//!
//! * `serde`: `Serialize`/`Deserialize` for [`Guid`] via its string
//!   form. Off by default.

#![no_std]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(unused_crate_dependencies)]
#![warn(clippy::pedantic)]
#![warn(clippy::as_conversions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

// The record types rely on reinterpreting host memory as wire bytes.
#[cfg(target_endian = "big")]
compile_error!("gpt_image_types does not support big-endian hosts");

mod block;
mod crc32;
mod guid;
mod header;
mod mbr;
mod num;
mod partition_entry;

// Re-export dependencies.
pub use bytemuck;
pub use crc;

pub use block::{BlockSize, Lba, LbaLe, LbaRangeInclusive};
pub use crc32::Crc32;
pub use guid::{Guid, GuidFromStrError};
pub use header::{GptHeader, GptHeaderRevision, GptHeaderSignature};
pub use mbr::{Chs, MasterBootRecord, MbrPartitionRecord};
pub use num::{U32Le, U64Le};
pub use partition_entry::{
    GptPartitionAttributes, GptPartitionEntry, GptPartitionName,
    GptPartitionNameFromStrError, GptPartitionType,
};
