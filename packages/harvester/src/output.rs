//! Serialization of capital change records.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::error::Result;
use crate::types::CapitalChangeRecord;

/// Output format for record lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render records in the given format.
pub fn render_records(records: &[CapitalChangeRecord], format: OutputFormat) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(records)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Write records to `path`, creating parent directories as needed.
///
/// The content is written to a temporary sibling file first and renamed into
/// place, so an interrupted run never leaves a truncated file behind.
pub fn save_records(
    records: &[CapitalChangeRecord],
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = render_records(records, format)?;
    let temp_file = path.with_extension(format!("{}.tmp", format.extension()));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}
