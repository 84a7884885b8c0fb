// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Standalone binary to rewrite the `version` field of a JSON manifest file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use manifest::set_version;

/// Overwrite the `version` field of a JSON manifest file in place.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the manifest file, resolved against the current directory
    manifest_path: PathBuf,

    /// Replacement value for the `version` field, stored verbatim
    #[arg(allow_hyphen_values = true)]
    new_version: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_version(&args.manifest_path, &args.new_version)?;
    Ok(())
}
