use super::error::{ServiceError, ServiceResult};
use crate::domain::embed;
use crate::domain::livestream::{
    LiveStream, StreamAnalytics, StreamBroadcast, StreamChat, StreamPlatform, StreamStatus,
};
use crate::ports::repository::LiveStreamRepository;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 20;
const UPCOMING_WINDOW_DAYS: i64 = 7;
const DASHBOARD_UPCOMING: usize = 5;
const DASHBOARD_RECENT: usize = 10;
const DASHBOARD_ANALYTICS: usize = 5;

/// Query parameters accepted by the stream listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamFilter {
    pub status: Option<String>,
    pub stream_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StreamListing {
    pub streams: Vec<LiveStream>,
    pub page: usize,
    pub num_pages: usize,
    pub total: usize,
    pub live_count: usize,
    pub upcoming_count: usize,
}

/// A broadcast together with the URL a page can put in an iframe.
#[derive(Debug, Serialize)]
pub struct ResolvedBroadcast {
    #[serde(flatten)]
    pub broadcast: StreamBroadcast,
    pub platform: StreamPlatform,
    pub embed_url: String,
}

#[derive(Debug, Serialize)]
pub struct StreamDetail {
    pub stream: LiveStream,
    pub is_live: bool,
    pub is_upcoming: bool,
    pub duration_seconds: Option<i64>,
    pub broadcasts: Vec<ResolvedBroadcast>,
    pub analytics: Option<StreamAnalytics>,
    /// Visible chat in posting order; empty when chat is disabled
    pub chat_messages: Vec<StreamChat>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StreamStatusView {
    pub status: StreamStatus,
    pub viewer_count: u32,
    pub is_live: bool,
    pub actual_start: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    pub success: bool,
    pub status: StreamStatus,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_streams: usize,
    pub live_count: usize,
    pub scheduled_count: usize,
    pub total_platforms: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub stream_id: u64,
    pub title: String,
    pub actual_end: Option<DateTime<Utc>>,
    pub analytics: StreamAnalytics,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub live_streams: Vec<LiveStream>,
    pub upcoming_streams: Vec<LiveStream>,
    pub recent_streams: Vec<LiveStream>,
    pub recent_analytics: Vec<AnalyticsSummary>,
    pub stats: DashboardStats,
}

#[derive(Debug, Serialize)]
pub struct PlatformView {
    #[serde(flatten)]
    pub platform: StreamPlatform,
    pub label: &'static str,
}

pub struct LiveStreamService<R> {
    repo: R,
}

impl<R> LiveStreamService<R>
where
    R: LiveStreamRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    async fn require_stream(&self, stream_id: u64) -> ServiceResult<LiveStream> {
        self.repo
            .get_stream(stream_id)
            .await?
            .ok_or(ServiceError::StreamNotFound(stream_id))
    }

    /// Stream with every broadcast resolved to an embeddable URL for `host`.
    pub async fn stream_detail(
        &self,
        stream_id: u64,
        host: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<StreamDetail> {
        let stream = self.require_stream(stream_id).await?;

        let broadcasts = self
            .repo
            .broadcasts_for(stream_id)
            .await?
            .into_iter()
            .map(|(broadcast, platform)| {
                let embed_url = embed::resolve_platform(
                    platform.platform_type,
                    broadcast.platform_url.trim(),
                    host,
                );
                ResolvedBroadcast {
                    broadcast,
                    platform,
                    embed_url,
                }
            })
            .collect();

        let analytics = self.repo.get_analytics(stream_id).await?;

        let chat_messages = if stream.enable_chat {
            self.repo
                .chat_messages(stream_id)
                .await?
                .into_iter()
                .filter(|message| !message.is_hidden)
                .collect()
        } else {
            Vec::new()
        };

        Ok(StreamDetail {
            is_live: stream.is_live(),
            is_upcoming: stream.is_upcoming(now),
            duration_seconds: stream.duration().map(|d| d.num_seconds()),
            stream,
            broadcasts,
            analytics,
            chat_messages,
        })
    }

    pub async fn stream_status(&self, stream_id: u64) -> ServiceResult<StreamStatusView> {
        let stream = self.require_stream(stream_id).await?;
        Ok(StreamStatusView {
            status: stream.status,
            viewer_count: stream.viewer_count,
            is_live: stream.is_live(),
            actual_start: stream.actual_start,
        })
    }

    /// Apply a status submitted by staff. `raw_status` must be one of the
    /// stored status tags.
    pub async fn update_status(
        &self,
        stream_id: u64,
        raw_status: Option<&str>,
        now: DateTime<Utc>,
    ) -> ServiceResult<StatusUpdate> {
        let mut stream = self.require_stream(stream_id).await?;

        let next = raw_status
            .and_then(|raw| raw.parse::<StreamStatus>().ok())
            .ok_or_else(|| ServiceError::InvalidStatus(raw_status.map(str::to_string)))?;

        let previous = stream.status;
        stream.transition(next, now);
        self.repo.save_stream(&stream).await?;

        tracing::info!(
            stream_id,
            from = %previous,
            to = %next,
            "Stream status updated"
        );

        Ok(StatusUpdate {
            success: true,
            status: stream.status,
            message: format!("Stream status updated to {}", next.label()),
        })
    }

    pub async fn list_streams(
        &self,
        filter: &StreamFilter,
        now: DateTime<Utc>,
    ) -> ServiceResult<StreamListing> {
        let all = self.repo.list_streams().await?;

        let live_count = all.iter().filter(|s| s.is_live()).count();
        let upcoming_count = all.iter().filter(|s| s.is_upcoming(now)).count();

        let status = non_empty(&filter.status);
        let stream_type = non_empty(&filter.stream_type);
        let search = non_empty(&filter.search).map(str::to_lowercase);

        let matching: Vec<LiveStream> = all
            .into_iter()
            .filter(|s| status.map_or(true, |wanted| s.status.as_str() == wanted))
            .filter(|s| stream_type.map_or(true, |wanted| s.stream_type.as_str() == wanted))
            .filter(|s| {
                search.as_deref().map_or(true, |needle| {
                    s.title.to_lowercase().contains(needle)
                        || s.description.to_lowercase().contains(needle)
                })
            })
            .collect();

        let total = matching.len();
        let num_pages = total.div_ceil(PAGE_SIZE).max(1);
        let page = filter.page.unwrap_or(1).clamp(1, num_pages);

        let streams = matching
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Ok(StreamListing {
            streams,
            page,
            num_pages,
            total,
            live_count,
            upcoming_count,
        })
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> ServiceResult<Dashboard> {
        let all = self.repo.list_streams().await?;
        let platforms = self.repo.list_platforms().await?;

        let live_streams: Vec<LiveStream> = all.iter().filter(|s| s.is_live()).cloned().collect();

        let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);
        let mut upcoming_streams: Vec<LiveStream> = all
            .iter()
            .filter(|s| {
                s.status == StreamStatus::Scheduled
                    && s.scheduled_start >= now
                    && s.scheduled_start <= window_end
            })
            .cloned()
            .collect();
        upcoming_streams.sort_by_key(|s| s.scheduled_start);
        upcoming_streams.truncate(DASHBOARD_UPCOMING);

        let mut recent_streams = all.clone();
        recent_streams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_streams.truncate(DASHBOARD_RECENT);

        let mut ended: Vec<&LiveStream> = all
            .iter()
            .filter(|s| s.status == StreamStatus::Ended)
            .collect();
        ended.sort_by(|a, b| b.actual_end.cmp(&a.actual_end));

        let mut recent_analytics = Vec::new();
        for stream in ended {
            if recent_analytics.len() == DASHBOARD_ANALYTICS {
                break;
            }
            if let Some(analytics) = self.repo.get_analytics(stream.id).await? {
                recent_analytics.push(AnalyticsSummary {
                    stream_id: stream.id,
                    title: stream.title.clone(),
                    actual_end: stream.actual_end,
                    analytics,
                });
            }
        }

        let stats = DashboardStats {
            total_streams: all.len(),
            live_count: live_streams.len(),
            scheduled_count: all
                .iter()
                .filter(|s| s.status == StreamStatus::Scheduled)
                .count(),
            total_platforms: platforms.iter().filter(|p| p.is_active).count(),
        };

        Ok(Dashboard {
            live_streams,
            upcoming_streams,
            recent_streams,
            recent_analytics,
            stats,
        })
    }

    pub async fn list_platforms(&self) -> ServiceResult<Vec<PlatformView>> {
        let platforms = self.repo.list_platforms().await?;
        Ok(platforms
            .into_iter()
            .map(|platform| PlatformView {
                label: platform.platform_type.label(),
                platform,
            })
            .collect())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
