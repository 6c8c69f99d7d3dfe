// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod loader;
mod writer;

use anyhow::{Context, Result};
use clap::Parser;
use gpt_image_builder::make_gpt;
use std::path::PathBuf;
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "gptimg")]
#[command(about = "Write a GPT disk image from a JSON descriptor")]
struct Cli {
    /// Path of the JSON disk descriptor
    descriptor: PathBuf,

    /// Path of the image file to create
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let descriptor = loader::load_descriptor(&cli.descriptor).with_context(
        || format!("failed to load descriptor {}", cli.descriptor.display()),
    )?;
    debug!(
        block_size = descriptor.block_size,
        number_of_blocks = descriptor.number_of_blocks,
        partitions = descriptor.partitions.len(),
        "loaded descriptor"
    );

    let data = make_gpt(&descriptor).context("invalid descriptor")?;

    writer::write_image(&cli.output, &descriptor, &data).with_context(
        || format!("failed to write image {}", cli.output.display()),
    )?;
    info!("wrote {}", cli.output.display());

    Ok(())
}
