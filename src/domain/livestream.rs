use super::platform::PlatformType;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Scheduled,
    Live,
    Ended,
    Cancelled,
}

impl StreamStatus {
    pub const ALL: [StreamStatus; 4] = [
        StreamStatus::Scheduled,
        StreamStatus::Live,
        StreamStatus::Ended,
        StreamStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamStatus::Scheduled => "scheduled",
            StreamStatus::Live => "live",
            StreamStatus::Ended => "ended",
            StreamStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreamStatus::Scheduled => "Scheduled",
            StreamStatus::Live => "Live Now",
            StreamStatus::Ended => "Ended",
            StreamStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown stream status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    #[default]
    Service,
    Prayer,
    BibleStudy,
    Conference,
    SpecialEvent,
    Other,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::Service => "service",
            StreamType::Prayer => "prayer",
            StreamType::BibleStudy => "bible_study",
            StreamType::Conference => "conference",
            StreamType::SpecialEvent => "special_event",
            StreamType::Other => "other",
        }
    }
}

/// A streaming destination configured by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamPlatform {
    pub id: u64,
    pub name: String,
    pub platform_type: PlatformType,
    #[serde(default)]
    pub rtmp_url: String,
    /// Ingest credentials, accepted from fixtures but never written out
    #[serde(default, skip_serializing)]
    pub stream_key: String,
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A scheduled service or event that is streamed to one or more platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStream {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stream_type: StreamType,
    pub scheduled_start: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default = "default_true")]
    pub enable_chat: bool,
    #[serde(default = "default_true")]
    pub enable_recording: bool,
    pub status: StreamStatus,
    #[serde(default)]
    pub viewer_count: u32,
    /// OBS scene collection and profile the operators load for this stream
    #[serde(default)]
    pub obs_scene_collection: String,
    #[serde(default)]
    pub obs_profile: String,
    /// Storage path of the preview image, empty when none was uploaded
    #[serde(default)]
    pub thumbnail: String,
    pub created_at: DateTime<Utc>,
}

impl LiveStream {
    pub fn is_live(&self) -> bool {
        self.status == StreamStatus::Live
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == StreamStatus::Scheduled && self.scheduled_start > now
    }

    /// Length of the broadcast once it has both started and ended.
    pub fn duration(&self) -> Option<Duration> {
        match (self.actual_start, self.actual_end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Move to `next`, stamping `actual_start` when going live and
    /// `actual_end` when a live stream ends.
    pub fn transition(&mut self, next: StreamStatus, now: DateTime<Utc>) {
        let previous = self.status;
        self.status = next;

        match (previous, next) {
            (prev, StreamStatus::Live) if prev != StreamStatus::Live => {
                self.actual_start = Some(now);
            }
            (StreamStatus::Live, StreamStatus::Ended) => {
                self.actual_end = Some(now);
            }
            _ => {}
        }
    }
}

/// Link between a stream and one platform it goes out on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamBroadcast {
    pub stream_id: u64,
    pub platform_id: u64,
    #[serde(default)]
    pub platform_stream_id: String,
    /// Link to the stream on the platform, as entered by staff
    #[serde(default)]
    pub platform_url: String,
    #[serde(default)]
    pub custom_title: String,
    #[serde(default)]
    pub custom_description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub broadcast_started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub broadcast_ended: Option<DateTime<Utc>>,
    #[serde(default)]
    pub viewer_count: u32,
}

/// A chat message shown next to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChat {
    pub id: u64,
    pub stream_id: u64,
    pub username: String,
    pub message: String,
    /// Platform the message was relayed from, empty for site chat
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub is_moderator: bool,
    #[serde(default)]
    pub is_hidden: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamAnalytics {
    pub stream_id: u64,
    #[serde(default)]
    pub peak_viewers: u32,
    #[serde(default)]
    pub total_views: u32,
    /// Seconds
    #[serde(default)]
    pub average_watch_time: Option<u64>,
    #[serde(default)]
    pub total_chat_messages: u32,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub shares_count: u32,
    /// e.g. "1080p"
    #[serde(default)]
    pub stream_quality: String,
    #[serde(default)]
    pub dropped_frames: u32,
    /// Average bitrate in kbps
    #[serde(default)]
    pub bitrate_average: u32,
}

fn default_true() -> bool {
    true
}
