//! Zip packaging of documentation directories.
use log::*;
use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::error::{PublishError, Result};

/// Package every file and directory below `source` into an in-memory zip
/// archive. Entry names are relative to `source` and use `/` separators.
pub fn archive_directory(source: &Path) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated);

    let mut file_count = 0;

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(source, entry.path())?;

        if entry.file_type().is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
        } else if entry.file_type().is_file() {
            let content = fs::read(entry.path())
                .map_err(|err| PublishError::file(entry.path(), err))?;
            writer.start_file(name, options)?;
            writer.write_all(&content)?;
            file_count += 1;
        }
    }

    let archive = writer.finish()?.into_inner();

    debug!(
        "packaged {file_count} files from {} ({} bytes)",
        source.display(),
        archive.len()
    );

    Ok(archive)
}

fn entry_name(source: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(source).map_err(|_| {
        PublishError::Transfer(format!(
            "{} is outside of {}",
            path.display(),
            source.display()
        ))
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
