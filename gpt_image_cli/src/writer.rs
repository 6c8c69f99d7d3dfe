// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Write the builder's output blobs into an image file.

use anyhow::{Context, Result};
use gpt_image_builder::{GptData, GptDescriptor};
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Create `path` as a file of `block_size * number_of_blocks` bytes
/// with `data.header` at offset zero and `data.footer` ending at the
/// last byte. The region in between is a hole and reads back as zeros.
pub fn write_image(
    path: &Path,
    descriptor: &GptDescriptor,
    data: &GptData,
) -> Result<()> {
    let device_size = descriptor
        .block_size
        .checked_mul(descriptor.number_of_blocks)
        .context("device size overflows a u64")?;
    let footer_offset = device_size
        .checked_sub(u64::try_from(data.footer.len())?)
        .context("footer is larger than the device")?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.set_len(device_size)?;
    file.write_all(&data.header)?;
    file.seek(SeekFrom::Start(footer_offset))?;
    file.write_all(&data.footer)?;
    file.sync_all()?;

    debug!(device_size, footer_offset, "image written");
    Ok(())
}
