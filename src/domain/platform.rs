use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External service a broadcast is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    YouTube,
    Facebook,
    Twitch,
    Vimeo,
    /// Plain RTMP ingest, no hosted player
    Direct,
    Custom,
}

impl PlatformType {
    pub const ALL: [PlatformType; 6] = [
        PlatformType::YouTube,
        PlatformType::Facebook,
        PlatformType::Twitch,
        PlatformType::Vimeo,
        PlatformType::Direct,
        PlatformType::Custom,
    ];

    /// Tag as stored on platform records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformType::YouTube => "youtube",
            PlatformType::Facebook => "facebook",
            PlatformType::Twitch => "twitch",
            PlatformType::Vimeo => "vimeo",
            PlatformType::Direct => "direct",
            PlatformType::Custom => "custom",
        }
    }

    /// Human readable name shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            PlatformType::YouTube => "YouTube Live",
            PlatformType::Facebook => "Facebook Live",
            PlatformType::Twitch => "Twitch",
            PlatformType::Vimeo => "Vimeo Live",
            PlatformType::Direct => "Direct RTMP",
            PlatformType::Custom => "Custom Platform",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform type: {}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for PlatformType {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformType::ALL
            .into_iter()
            .find(|platform| platform.as_str() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
