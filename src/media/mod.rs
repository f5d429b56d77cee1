use serde::Deserialize;

/// Extensions that are rendered as video. Everything else is an image.
pub const VIDEO_EXTENSIONS: [&str; 2] = ["mp4", "webm"];

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// How the extension is compared against `VIDEO_EXTENSIONS`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionMatch {
    /// Compare the extension as received, so `a.MP4` is an image.
    #[default]
    Exact,
    IgnoreCase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(url: String, matcher: ExtensionMatch) -> Self {
        let kind = classify(&url, matcher);
        Self { url, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JokeItem {
    pub setup: String,
    pub punchline: String,
}

/// The substring after the last `.`, or the whole string when there is none.
pub fn extension(url: &str) -> &str {
    url.rsplit('.').next().unwrap_or(url)
}

pub fn classify(url: &str, matcher: ExtensionMatch) -> MediaKind {
    let ext = extension(url);
    let is_video = VIDEO_EXTENSIONS.iter().any(|v| match matcher {
        ExtensionMatch::Exact => *v == ext,
        ExtensionMatch::IgnoreCase => v.eq_ignore_ascii_case(ext),
    });
    if is_video {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extensions_are_videos() {
        for url in ["https://random.dog/a.mp4", "https://random.dog/b.webm"] {
            assert_eq!(classify(url, ExtensionMatch::Exact), MediaKind::Video, "{url}");
        }
    }

    #[test]
    fn other_extensions_are_images() {
        for url in [
            "https://random.dog/a.jpg",
            "https://random.dog/a.png",
            "https://random.dog/a.gif",
            "https://random.dog/a.mp4.jpg",
            "no-extension-at-all",
        ] {
            assert_eq!(classify(url, ExtensionMatch::Exact), MediaKind::Image, "{url}");
        }
    }

    #[test]
    fn extension_without_dot_is_whole_string() {
        assert_eq!(extension("mp4"), "mp4");
        assert_eq!(extension("https://random.dog/x.webm"), "webm");
        assert_eq!(classify("https://random", ExtensionMatch::Exact), MediaKind::Image);
    }

    #[test]
    fn uppercase_depends_on_matcher() {
        let url = "https://random.dog/LOUD.MP4";
        assert_eq!(classify(url, ExtensionMatch::Exact), MediaKind::Image);
        assert_eq!(classify(url, ExtensionMatch::IgnoreCase), MediaKind::Video);
    }

    #[test]
    fn media_item_keeps_url_verbatim() {
        let item = MediaItem::new("https://example.com/a.webm".to_string(), ExtensionMatch::Exact);
        assert_eq!(item.url, "https://example.com/a.webm");
        assert_eq!(item.kind, MediaKind::Video);

        let item = MediaItem::new("https://example.com/a.jpg".to_string(), ExtensionMatch::Exact);
        assert_eq!(item.kind, MediaKind::Image);
    }
}
