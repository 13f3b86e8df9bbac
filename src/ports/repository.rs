use crate::domain::livestream::{
    LiveStream, StreamAnalytics, StreamBroadcast, StreamChat, StreamPlatform,
};
use async_trait::async_trait;
use std::error::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveStreamRepository: Send + Sync {
    /// Get a stream by id
    async fn get_stream(
        &self,
        stream_id: u64,
    ) -> Result<Option<LiveStream>, Box<dyn Error + Send + Sync>>;

    /// All streams, newest scheduled start first
    async fn list_streams(&self) -> Result<Vec<LiveStream>, Box<dyn Error + Send + Sync>>;

    /// Insert or replace a stream
    async fn save_stream(&self, stream: &LiveStream) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Broadcasts of a stream, each paired with its platform
    async fn broadcasts_for(
        &self,
        stream_id: u64,
    ) -> Result<Vec<(StreamBroadcast, StreamPlatform)>, Box<dyn Error + Send + Sync>>;

    async fn list_platforms(&self) -> Result<Vec<StreamPlatform>, Box<dyn Error + Send + Sync>>;

    async fn get_analytics(
        &self,
        stream_id: u64,
    ) -> Result<Option<StreamAnalytics>, Box<dyn Error + Send + Sync>>;

    /// Chat of a stream ordered by timestamp, hidden messages included
    async fn chat_messages(
        &self,
        stream_id: u64,
    ) -> Result<Vec<StreamChat>, Box<dyn Error + Send + Sync>>;
}
