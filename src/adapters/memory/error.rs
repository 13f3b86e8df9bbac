//! Fixture loading errors for the in-memory adapter.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixtures from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("broadcast for stream {stream_id} references unknown platform {platform_id}")]
    UnknownPlatform { stream_id: u64, platform_id: u64 },
    #[error("broadcast references unknown stream {0}")]
    UnknownStream(u64),
}
