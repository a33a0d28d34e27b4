use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use res_resolver_zip::{ZipArchive, ZipEntryRo};

pub(crate) fn command_entries(path: &Path) -> Result<()> {
    let archive =
        ZipArchive::open(path).with_context(|| format!("got error while opening bundle: {:?}", path))?;

    println!("{}: {}", "Entries".blue().bold(), archive.len());

    for entry in archive.entries() {
        let method = match entry.compression_method() {
            ZipEntryRo::STORED => "stored".to_owned(),
            ZipEntryRo::DEFLATED => "deflated".to_owned(),
            other => format!("method {other}"),
        };

        println!(
            "  {} ({}, {} -> {} bytes, offset 0x{:x})",
            entry.name().green(),
            method,
            entry.compressed_size(),
            entry.uncompressed_size(),
            entry.local_header_offset()
        );
    }

    Ok(())
}
