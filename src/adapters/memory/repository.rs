//! In-memory LiveStreamRepository implementation.

use super::store::MemoryRepository;
use crate::domain::livestream::{
    LiveStream, StreamAnalytics, StreamBroadcast, StreamChat, StreamPlatform,
};
use crate::ports::repository::LiveStreamRepository;
use async_trait::async_trait;
use std::error::Error;

#[async_trait]
impl LiveStreamRepository for MemoryRepository {
    async fn get_stream(
        &self,
        stream_id: u64,
    ) -> Result<Option<LiveStream>, Box<dyn Error + Send + Sync>> {
        let tables = self.tables.read().await;
        Ok(tables.streams.get(&stream_id).cloned())
    }

    async fn list_streams(&self) -> Result<Vec<LiveStream>, Box<dyn Error + Send + Sync>> {
        let tables = self.tables.read().await;
        let mut streams: Vec<LiveStream> = tables.streams.values().cloned().collect();
        streams.sort_by(|a, b| b.scheduled_start.cmp(&a.scheduled_start));
        Ok(streams)
    }

    async fn save_stream(&self, stream: &LiveStream) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tables = self.tables.write().await;
        tables.streams.insert(stream.id, stream.clone());
        Ok(())
    }

    async fn broadcasts_for(
        &self,
        stream_id: u64,
    ) -> Result<Vec<(StreamBroadcast, StreamPlatform)>, Box<dyn Error + Send + Sync>> {
        let tables = self.tables.read().await;
        let broadcasts = tables
            .broadcasts
            .iter()
            .filter(|broadcast| broadcast.stream_id == stream_id)
            .filter_map(|broadcast| match tables.platforms.get(&broadcast.platform_id) {
                Some(platform) => Some((broadcast.clone(), platform.clone())),
                None => {
                    tracing::warn!(
                        stream_id,
                        platform_id = broadcast.platform_id,
                        "Skipping broadcast with missing platform"
                    );
                    None
                }
            })
            .collect();
        Ok(broadcasts)
    }

    async fn list_platforms(&self) -> Result<Vec<StreamPlatform>, Box<dyn Error + Send + Sync>> {
        let tables = self.tables.read().await;
        let mut platforms: Vec<StreamPlatform> = tables.platforms.values().cloned().collect();
        platforms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(platforms)
    }

    async fn get_analytics(
        &self,
        stream_id: u64,
    ) -> Result<Option<StreamAnalytics>, Box<dyn Error + Send + Sync>> {
        let tables = self.tables.read().await;
        Ok(tables.analytics.get(&stream_id).cloned())
    }

    async fn chat_messages(
        &self,
        stream_id: u64,
    ) -> Result<Vec<StreamChat>, Box<dyn Error + Send + Sync>> {
        let tables = self.tables.read().await;
        Ok(tables
            .chat
            .iter()
            .filter(|message| message.stream_id == stream_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FixtureError, Fixtures};
    use crate::domain::livestream::{StreamStatus, StreamType};
    use crate::domain::platform::PlatformType;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn stream(id: u64, day: u32) -> LiveStream {
        let start = Utc.with_ymd_and_hms(2026, 10, day, 10, 0, 0).unwrap();
        LiveStream {
            id,
            title: format!("Service {}", id),
            description: String::new(),
            stream_type: StreamType::Service,
            scheduled_start: start,
            scheduled_end: None,
            actual_start: None,
            actual_end: None,
            is_public: true,
            enable_chat: true,
            enable_recording: true,
            status: StreamStatus::Scheduled,
            viewer_count: 0,
            obs_scene_collection: String::new(),
            obs_profile: String::new(),
            thumbnail: String::new(),
            created_at: start,
        }
    }

    fn platform(id: u64, name: &str) -> StreamPlatform {
        StreamPlatform {
            id,
            name: name.to_string(),
            platform_type: PlatformType::YouTube,
            rtmp_url: String::new(),
            stream_key: String::new(),
            api_key: String::new(),
            is_active: true,
        }
    }

    fn broadcast(stream_id: u64, platform_id: u64) -> StreamBroadcast {
        StreamBroadcast {
            stream_id,
            platform_id,
            platform_stream_id: String::new(),
            platform_url: "https://youtu.be/abc".to_string(),
            custom_title: String::new(),
            custom_description: String::new(),
            is_active: true,
            broadcast_started: None,
            broadcast_ended: None,
            viewer_count: 0,
        }
    }

    #[tokio::test]
    async fn test_streams_listed_newest_first() {
        let repo = MemoryRepository::from_fixtures(Fixtures {
            streams: vec![stream(1, 4), stream(2, 18), stream(3, 11)],
            ..Fixtures::default()
        })
        .unwrap();

        let ids: Vec<u64> = repo
            .list_streams()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_save_replaces_stream() {
        let repo = MemoryRepository::new();
        let mut s = stream(7, 18);
        repo.save_stream(&s).await.unwrap();

        s.status = StreamStatus::Live;
        repo.save_stream(&s).await.unwrap();

        let stored = repo.get_stream(7).await.unwrap().unwrap();
        assert_eq!(stored.status, StreamStatus::Live);
        assert_eq!(repo.list_streams().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_broadcasts_joined_with_platform() {
        let repo = MemoryRepository::from_fixtures(Fixtures {
            platforms: vec![platform(1, "Main YouTube"), platform(2, "Backup")],
            streams: vec![stream(1, 18), stream(2, 25)],
            broadcasts: vec![broadcast(1, 1), broadcast(1, 2), broadcast(2, 1)],
            ..Fixtures::default()
        })
        .unwrap();

        let joined = repo.broadcasts_for(1).await.unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].1.name, "Main YouTube");
        assert_eq!(joined[1].1.name, "Backup");
        assert!(repo.broadcasts_for(99).await.unwrap().is_empty());
    }

    #[test]
    fn test_fixtures_reject_dangling_broadcast() {
        let err = MemoryRepository::from_fixtures(Fixtures {
            platforms: vec![],
            streams: vec![stream(1, 18)],
            broadcasts: vec![broadcast(1, 5)],
            ..Fixtures::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            FixtureError::UnknownPlatform {
                stream_id: 1,
                platform_id: 5
            }
        ));
    }

    #[test]
    fn test_fixtures_reject_chat_for_missing_stream() {
        let err = MemoryRepository::from_fixtures(Fixtures {
            streams: vec![stream(1, 18)],
            chat_messages: vec![StreamChat {
                id: 1,
                stream_id: 4,
                username: "visitor".to_string(),
                message: "Amen".to_string(),
                platform: String::new(),
                is_moderator: false,
                is_hidden: false,
                timestamp: Utc.with_ymd_and_hms(2026, 10, 18, 10, 5, 0).unwrap(),
            }],
            ..Fixtures::default()
        })
        .unwrap_err();
        assert!(matches!(err, FixtureError::UnknownStream(4)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "platforms": [{{"id": 3, "name": "Twitch", "platform_type": "twitch"}}],
                "streams": [{{
                    "id": 1,
                    "title": "Prayer Night",
                    "stream_type": "prayer",
                    "scheduled_start": "2026-10-20T19:00:00Z",
                    "status": "scheduled",
                    "obs_profile": "Evening",
                    "created_at": "2026-10-01T12:00:00Z"
                }}],
                "broadcasts": [{{
                    "stream_id": 1,
                    "platform_id": 3,
                    "platform_url": "https://twitch.tv/grace",
                    "custom_description": "Join us in prayer",
                    "broadcast_started": "2026-10-20T19:01:00Z",
                    "broadcast_ended": "2026-10-20T20:15:00Z"
                }}],
                "analytics": [{{
                    "stream_id": 1,
                    "peak_viewers": 42,
                    "average_watch_time": 1800,
                    "likes_count": 17,
                    "shares_count": 3,
                    "dropped_frames": 12,
                    "bitrate_average": 4500
                }}],
                "chat_messages": [
                    {{"id": 2, "stream_id": 1, "username": "usher", "message": "Welcome all",
                      "is_moderator": true, "timestamp": "2026-10-20T19:03:00Z"}},
                    {{"id": 1, "stream_id": 1, "username": "visitor", "message": "Hello from Ohio",
                      "platform": "twitch", "timestamp": "2026-10-20T19:02:00Z"}}
                ]
            }}"#
        )
        .unwrap();

        let repo = MemoryRepository::load(file.path()).await.unwrap();
        let stream = repo.get_stream(1).await.unwrap().unwrap();
        assert_eq!(stream.stream_type, StreamType::Prayer);
        assert!(stream.enable_chat);
        assert_eq!(stream.obs_profile, "Evening");
        assert!(stream.obs_scene_collection.is_empty());

        let analytics = repo.get_analytics(1).await.unwrap().unwrap();
        assert_eq!(analytics.peak_viewers, 42);
        assert_eq!(analytics.average_watch_time, Some(1800));
        assert_eq!(analytics.likes_count, 17);
        assert_eq!(analytics.shares_count, 3);
        assert_eq!(analytics.dropped_frames, 12);
        assert_eq!(analytics.bitrate_average, 4500);
        assert_eq!(analytics.total_chat_messages, 0);

        let broadcasts = repo.broadcasts_for(1).await.unwrap();
        assert_eq!(broadcasts.len(), 1);
        let (broadcast, _) = &broadcasts[0];
        assert_eq!(broadcast.custom_description, "Join us in prayer");
        assert_eq!(
            broadcast.broadcast_started,
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 19, 1, 0).unwrap())
        );
        assert_eq!(
            broadcast.broadcast_ended,
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 20, 15, 0).unwrap())
        );

        let chat = repo.chat_messages(1).await.unwrap();
        let ids: Vec<u64> = chat.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(chat[0].platform, "twitch");
        assert!(chat[1].is_moderator);
        assert!(!chat[1].is_hidden);
        assert!(repo.chat_messages(9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_reports_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = MemoryRepository::load(file.path()).await.unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));
    }
}
