// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Load a [`GptDescriptor`] from its JSON document form.
//!
//! ```json
//! { "block_size": 512, "number_of_blocks": 2048,
//!   "disk_guid": "57a7feb6-8cd5-4922-b7bd-c78b0914e870",
//!   "partitions": [ { "partition_type_guid": "…",
//!                     "unique_partition_guid": "…",
//!                     "starting_lba": 34, "ending_lba": 2014,
//!                     "attributes": 0, "partition_name": "data" } ] }
//! ```
//!
//! GUIDs are dashed-hex strings; `partition_name` is UTF-8 of at most
//! 36 UTF-16 code units. Layout rules (block size, bounds, overlaps)
//! are not checked here — that is the builder's job.

use anyhow::{anyhow, Result};
use gpt_image_builder::GptDescriptor;
use gpt_image_types::{
    GptPartitionAttributes, GptPartitionEntry, GptPartitionName,
    GptPartitionType, Guid, LbaLe,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiskDoc {
    block_size: u64,
    number_of_blocks: u64,
    disk_guid: Guid,
    partitions: Vec<PartitionDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartitionDoc {
    partition_type_guid: Guid,
    unique_partition_guid: Guid,
    starting_lba: u64,
    ending_lba: u64,
    attributes: u64,
    partition_name: String,
}

/// Read and parse the descriptor document at `path`.
pub fn load_descriptor(path: &Path) -> Result<GptDescriptor> {
    parse_descriptor(&fs::read_to_string(path)?)
}

fn parse_descriptor(json: &str) -> Result<GptDescriptor> {
    let doc: DiskDoc = serde_json::from_str(json)?;

    let mut partitions = Vec::with_capacity(doc.partitions.len());
    for (index, partition) in doc.partitions.into_iter().enumerate() {
        let name: GptPartitionName = partition
            .partition_name
            .parse()
            .map_err(|err| anyhow!("partition {index}: {err}"))?;
        partitions.push(GptPartitionEntry {
            partition_type_guid: GptPartitionType(
                partition.partition_type_guid,
            ),
            unique_partition_guid: partition.unique_partition_guid,
            starting_lba: LbaLe::from_u64(partition.starting_lba),
            ending_lba: LbaLe::from_u64(partition.ending_lba),
            attributes: GptPartitionAttributes::from_u64(partition.attributes),
            name,
        });
    }

    Ok(GptDescriptor {
        block_size: doc.block_size,
        number_of_blocks: doc.number_of_blocks,
        disk_guid: doc.disk_guid,
        partitions,
    })
}
