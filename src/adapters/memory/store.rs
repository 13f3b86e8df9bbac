//! Shared in-process tables.

use super::error::FixtureError;
use crate::domain::livestream::{
    LiveStream, StreamAnalytics, StreamBroadcast, StreamChat, StreamPlatform,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Seed document for [`MemoryRepository`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub platforms: Vec<StreamPlatform>,
    #[serde(default)]
    pub streams: Vec<LiveStream>,
    #[serde(default)]
    pub broadcasts: Vec<StreamBroadcast>,
    #[serde(default)]
    pub analytics: Vec<StreamAnalytics>,
    #[serde(default)]
    pub chat_messages: Vec<StreamChat>,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub platforms: BTreeMap<u64, StreamPlatform>,
    pub streams: BTreeMap<u64, LiveStream>,
    pub broadcasts: Vec<StreamBroadcast>,
    pub analytics: HashMap<u64, StreamAnalytics>,
    pub chat: Vec<StreamChat>,
}

/// Repository adapter that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    pub(super) tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from fixtures, rejecting broadcasts that point at missing rows.
    pub fn from_fixtures(fixtures: Fixtures) -> Result<Self, FixtureError> {
        let platforms: BTreeMap<u64, StreamPlatform> = fixtures
            .platforms
            .into_iter()
            .map(|platform| (platform.id, platform))
            .collect();
        let streams: BTreeMap<u64, LiveStream> = fixtures
            .streams
            .into_iter()
            .map(|stream| (stream.id, stream))
            .collect();

        for broadcast in &fixtures.broadcasts {
            if !streams.contains_key(&broadcast.stream_id) {
                return Err(FixtureError::UnknownStream(broadcast.stream_id));
            }
            if !platforms.contains_key(&broadcast.platform_id) {
                return Err(FixtureError::UnknownPlatform {
                    stream_id: broadcast.stream_id,
                    platform_id: broadcast.platform_id,
                });
            }
        }

        if let Some(message) = fixtures
            .chat_messages
            .iter()
            .find(|message| !streams.contains_key(&message.stream_id))
        {
            return Err(FixtureError::UnknownStream(message.stream_id));
        }

        let mut chat = fixtures.chat_messages;
        chat.sort_by_key(|message| message.timestamp);

        let analytics = fixtures
            .analytics
            .into_iter()
            .map(|analytics| (analytics.stream_id, analytics))
            .collect();

        tracing::debug!(
            platforms = platforms.len(),
            streams = streams.len(),
            broadcasts = fixtures.broadcasts.len(),
            "Loaded livestream fixtures"
        );

        Ok(Self {
            tables: Arc::new(RwLock::new(Tables {
                platforms,
                streams,
                broadcasts: fixtures.broadcasts,
                analytics,
                chat,
            })),
        })
    }

    /// Read a JSON fixtures file.
    pub async fn load(path: &Path) -> Result<Self, FixtureError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FixtureError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let fixtures: Fixtures = serde_json::from_str(&raw)?;
        Self::from_fixtures(fixtures)
    }
}
