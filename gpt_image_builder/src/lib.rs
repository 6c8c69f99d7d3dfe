// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Library for synthesizing the GPT structures of a disk image.
//!
//! Given a [`GptDescriptor`] — block size, block count, disk GUID, and
//! an ordered list of partition entries — [`make_gpt`] produces the two
//! byte blobs that bracket a GPT-formatted disk image:
//!
//! ```text
//!          header blob                              footer blob
//! ┌───┬───────┬─────────────────┐─ ─ ─ ─ ─┌───────────────────┬─────────┐
//! │MBR│Primary│Primary partition│Partition│Backup partition   │Backup   │
//! │   │header │entry array      │data     │entry array        │header   │
//! └───┴───────┴─────────────────┘─ ─ ─ ─ ─└───────────────────┴─────────┘
//! ```
//!
//! The `header` blob is written at byte offset zero of the image; the
//! `footer` blob is written so that it ends exactly at the end of the
//! device. Everything in between is partition data, which this library
//! does not produce.
//!
//! The builder is a pure function: it validates the descriptor, then
//! derives every field of the protective MBR, both GPT headers (with
//! their self-referential CRCs), and both copies of the partition entry
//! array. Equal descriptors always produce byte-identical blobs.
//!
//! # Examples
//!
//! ```
//! use gpt_image_builder::{make_gpt, GptDescriptor};
//! use gpt_image_types::{guid, GptPartitionEntry, LbaLe};
//!
//! let descriptor = GptDescriptor {
//!     block_size: 512,
//!     number_of_blocks: 2048,
//!     disk_guid: guid!("57a7feb6-8cd5-4922-b7bd-c78b0914e870"),
//!     partitions: vec![GptPartitionEntry {
//!         unique_partition_guid: guid!(
//!             "37c75ffd-8932-467a-9c56-8cf1f0456b12"
//!         ),
//!         starting_lba: LbaLe::from_u64(34),
//!         ending_lba: LbaLe::from_u64(2014),
//!         name: "hello world!".parse().unwrap(),
//!         ..GptPartitionEntry::default()
//!     }],
//! };
//!
//! let data = make_gpt(&descriptor).unwrap();
//! assert_eq!(data.header.len(), 3 * 512);
//! assert_eq!(data.footer.len(), 2 * 512);
//! assert_eq!(&data.header[512..520], b"EFI PART");
//! ```

#![warn(missing_docs)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::as_conversions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod builder;
mod descriptor;
mod error;
mod layout;

// Re-export dependencies.
pub use gpt_image_types;

pub use builder::{make_gpt, validate, GptData};
pub use descriptor::GptDescriptor;
pub use error::InvalidDescriptor;
pub use layout::GptLayout;
