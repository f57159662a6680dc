//! Common functionality shared between commands
use log::*;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

use crate::result::Result;

/// Print `value` as pretty JSON, or write it to `out_file` when given.
pub async fn write_json<T: Serialize>(
    value: &T,
    out_file: Option<&Path>,
) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;

    let Some(file_path) = out_file else {
        println!("{content}");
        return Ok(());
    };

    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).await?;
    }

    info!("writing json to: {}", file_path.display());
    fs::write(file_path, &content).await?;

    Ok(())
}
