/*!
Persists a built [MaintainerRegistry] as one versioned JSON document.

Snapshots are written to a temporary file and renamed into place, and are gzip-compressed when
the path ends in `.gz`. Loading checks [SNAPSHOT_VERSION] before decoding the maintainers, so a
snapshot from another schema fails with [InetStatsError::IncompatibleSnapshot] instead of
producing a partial registry.
*/
use crate::error::InetStatsError;
use crate::io::{get_reader, write_file};
use crate::registry::MaintainerRegistry;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Schema version written into every snapshot. Bump on any change of the serialized model.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub maintainers: MaintainerRegistry,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

impl Snapshot {
    pub fn new(maintainers: MaintainerRegistry) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            maintainers,
        }
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), InetStatsError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Snapshot, InetStatsError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let header: SnapshotHeader = serde_json::from_str(&content)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(InetStatsError::IncompatibleSnapshot {
                found: header.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), InetStatsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = temporary_path(path);
        if let Err(e) = write_file(&tmp_path, |writer| self.to_writer(writer)) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }
        std::fs::rename(&tmp_path, path)?;
        info!(
            "saved snapshot of {} maintainers to {}",
            self.maintainers.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Snapshot, InetStatsError> {
        let snapshot = Snapshot::from_reader(get_reader(&path.to_string_lossy())?)?;
        info!(
            "loaded snapshot of {} maintainers from {} (created {})",
            snapshot.maintainers.len(),
            path.display(),
            snapshot.created_at
        );
        Ok(snapshot)
    }
}

/// `dir/.name.tmp.gz` for `dir/name.gz`, keeping the extension that selects compression.
fn temporary_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_name = match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!(".{}.tmp.{}", stem, ext),
        None => format!(".{}.tmp", file_name),
    };
    path.with_file_name(tmp_name)
}
