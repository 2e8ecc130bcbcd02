/*!
error module defines the error types used in inetstats.
*/
use oneio::OneIoError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InetStatsError {
    /// A general IO error triggered by a dataset reader or the snapshot writer.
    ///
    /// ## Occurs during:
    ///  - Reading lines of a dataset dump
    ///  - Writing or renaming a snapshot file
    #[error(transparent)]
    IoError(#[from] io::Error),
    /// Downloading, opening or decompressing a dataset or snapshot failed.
    #[error(transparent)]
    OneIoError(#[from] OneIoError),
    /// An `org-type` value does not match any known organisation classification.
    ///
    /// ## Occurs during:
    ///  - Processing of the organisation dataset
    #[error("unrecognized org-type {value:?} for organisation {org_name:?}")]
    UnknownOrgType { org_name: String, value: String },
    /// The snapshot was written by a different schema version.
    #[error("incompatible snapshot version {found}, expected {expected}")]
    IncompatibleSnapshot { found: u32, expected: u32 },
    /// The snapshot could not be decoded or encoded.
    #[error("malformed snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

impl InetStatsError {
    /// Snapshot errors that mean "the stored data is unusable", as opposed to
    /// failing to access it at all.
    pub fn is_incompatible_snapshot(&self) -> bool {
        matches!(
            self,
            InetStatsError::IncompatibleSnapshot { .. } | InetStatsError::SnapshotFormat(_)
        )
    }
}
