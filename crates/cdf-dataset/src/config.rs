use serde::{Deserialize, Serialize};

use cdf_types::FormatVariant;

/// When a modified header is written back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Write the header at `enddef`, `close`, or an explicit sync.
    #[default]
    Deferred,
    /// Write the header after every data-mode metadata change, so other
    /// readers of a shared file see it immediately.
    Immediate,
}

/// Configuration applied when a dataset is created or opened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// On-disk format variant; decides the dimension size bound.
    pub format: FormatVariant,
    /// Header write-back policy.
    pub sync_policy: SyncPolicy,
    /// Open without write permission. Ignored by `create`.
    pub read_only: bool,
    /// Record count of an opened dataset.
    pub initial_numrecs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            format: FormatVariant::Classic,
            sync_policy: SyncPolicy::Deferred,
            read_only: false,
            initial_numrecs: 0,
        }
    }
}

impl DatasetConfig {
    /// Configuration for a file shared with other processes: every
    /// data-mode header change is written through.
    pub fn shared() -> Self {
        Self {
            sync_policy: SyncPolicy::Immediate,
            ..Default::default()
        }
    }

    /// Same configuration with a different format variant.
    pub fn with_format(self, format: FormatVariant) -> Self {
        Self { format, ..self }
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
