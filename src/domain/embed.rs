//! Embeddable player URLs for broadcast links.
//!
//! Broadcast records store whatever link staff pasted in (a watch page, a
//! short link, a channel page). Pages need something that plays inside an
//! iframe, so each supported platform gets its link rewritten to the
//! platform's player endpoint. Anything that cannot be rewritten is handed
//! back unchanged so the page can still link to it.

use super::platform::PlatformType;
use url::form_urlencoded;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_PLAYER: &str = "https://player.vimeo.com/video/";
const TWITCH_PLAYER: &str = "https://player.twitch.tv/?";
const FACEBOOK_PLUGIN: &str = "https://www.facebook.com/plugins/video.php?";

/// Resolve a stored broadcast link into an embeddable player URL.
///
/// `platform_type` is the raw tag from the platform record. Unknown tags,
/// `direct` and `custom` return `platform_url` untouched. An empty
/// `platform_url` always yields an empty string. `requesting_host` is only
/// used by Twitch, whose player refuses to load without a `parent` naming
/// the embedding domain.
///
/// This never fails: links that do not match the expected shape for their
/// platform come back as they were.
pub fn resolve(platform_type: &str, platform_url: &str, requesting_host: &str) -> String {
    if platform_url.is_empty() {
        return String::new();
    }

    match platform_type.parse::<PlatformType>() {
        Ok(platform) => resolve_platform(platform, platform_url, requesting_host),
        Err(_) => platform_url.to_string(),
    }
}

/// Same as [`resolve`] for an already parsed platform.
pub fn resolve_platform(platform: PlatformType, platform_url: &str, requesting_host: &str) -> String {
    if platform_url.is_empty() {
        return String::new();
    }

    let embed = match platform {
        PlatformType::YouTube => youtube(platform_url),
        PlatformType::Vimeo => vimeo(platform_url),
        PlatformType::Twitch => Some(twitch(platform_url, requesting_host)),
        PlatformType::Facebook => Some(facebook(platform_url)),
        PlatformType::Direct | PlatformType::Custom => None,
    };

    embed.unwrap_or_else(|| platform_url.to_string())
}

/// A link split into its components as written: no validation, no
/// normalization, no percent-decoding. Host checks need to see links like
/// `//youtube.com/watch?v=ID` or `https://youtube.com:99999/...` that a
/// strict parser rejects.
#[derive(Debug, PartialEq)]
struct LinkParts<'a> {
    netloc: &'a str,
    path: &'a str,
    query: &'a str,
}

impl<'a> LinkParts<'a> {
    fn split(raw: &'a str) -> Self {
        let rest = match raw.split_once(':') {
            Some((scheme, rest)) if is_scheme(scheme) => rest,
            _ => raw,
        };
        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (netloc, path) = match rest.strip_prefix("//") {
            Some(authority) => authority.split_at(authority.find('/').unwrap_or(authority.len())),
            None => ("", rest),
        };

        LinkParts { netloc, path, query }
    }

    fn host_contains(&self, needle: &str) -> bool {
        self.netloc.contains(needle)
    }

    fn first_segment(&self) -> Option<&'a str> {
        self.path.split('/').find(|segment| !segment.is_empty())
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// `youtube.com/watch?v=ID` and `youtu.be/ID` become `/embed/ID`.
/// Links already pointing at `/embed/` fall through unchanged.
fn youtube(raw: &str) -> Option<String> {
    let link = LinkParts::split(raw);

    let video_id = if link.host_contains("youtube.com") {
        form_urlencoded::parse(link.query.as_bytes())
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    } else if link.host_contains("youtu.be") {
        Some(link.path.trim_matches('/').to_string())
    } else {
        None
    };

    video_id
        .filter(|id| !id.is_empty())
        .map(|id| format!("{YOUTUBE_EMBED}{id}?autoplay=0&rel=0"))
}

fn vimeo(raw: &str) -> Option<String> {
    let link = LinkParts::split(raw);
    if !link.host_contains("vimeo.com") {
        return None;
    }
    let id = link.first_segment()?;
    if id.chars().all(|c| c.is_ascii_digit()) {
        Some(format!("{VIMEO_PLAYER}{id}"))
    } else {
        None
    }
}

/// The first path segment is taken as the channel, so `/videos/123` embeds
/// a channel named "videos". Without a channel the player is still built
/// with `parent` and `autoplay`.
fn twitch(raw: &str, requesting_host: &str) -> String {
    let link = LinkParts::split(raw);
    let channel = if link.host_contains("twitch.tv") {
        link.first_segment()
    } else {
        None
    };

    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(channel) = channel {
        query.append_pair("channel", channel);
    }
    query
        .append_pair("parent", requesting_host)
        .append_pair("autoplay", "false");

    format!("{TWITCH_PLAYER}{}", query.finish())
}

fn facebook(raw: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("href", raw)
        .append_pair("show_text", "false")
        .append_pair("autoplay", "false")
        .finish();

    format!("{FACEBOOK_PLUGIN}{query}")
}
