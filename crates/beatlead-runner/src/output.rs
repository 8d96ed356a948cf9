use crate::Result;
use beatlead_contact::ContactRecord;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand `{timestamp}` in an output path template.
pub fn resolve_output_path(template: &str) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    PathBuf::from(template.replace("{timestamp}", &stamp))
}

/// Write records as a JSON array, creating parent directories as needed.
pub fn write_leads(path: &Path, leads: &[ContactRecord], pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = if pretty {
        serde_json::to_string_pretty(leads)?
    } else {
        serde_json::to_string(leads)?
    };
    fs::write(path, json)?;
    Ok(())
}

/// Read back a file written by [`write_leads`].
pub fn read_leads(path: &Path) -> Result<Vec<ContactRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
