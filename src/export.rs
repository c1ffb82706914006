use crate::api::decode_embedded;
use crate::errors::ClientError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// A downloadable dump of one RPG's events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventExport {
    pub filename: String,
    pub contents: String,
}

impl EventExport {
    pub fn build(value: Value, rpg_name: &str, now: DateTime<Utc>) -> Result<Self, ClientError> {
        let events = decode_embedded(value)?;

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        events.serialize(&mut serializer).map_err(ClientError::Encode)?;
        let contents =
            String::from_utf8(buffer).map_err(|err| ClientError::shape(err.to_string()))?;

        Ok(Self {
            filename: export_filename(rpg_name, now),
            contents,
        })
    }

    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf, ClientError> {
        fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        fs::write(&path, self.contents.as_bytes()).await?;
        info!("exported rpg events to {}", path.display());
        Ok(path)
    }
}

pub fn export_filename(rpg_name: &str, now: DateTime<Utc>) -> String {
    let name: String = rpg_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let timestamp = now.format("%Y-%m-%dT%H-%M-%S-%3fZ");
    format!("rpg_events_{name}-{timestamp}.json")
}
