//! Media inventory: players, source files, embeds and stream manifests
//!
//! Every scanner appends to one list; ephemeral `blob:` sources are
//! skipped and duplicates are dropped by source URL, first kind wins.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::page::Page;
use crate::page::dom::{attr, non_empty_attr, text_content};
use crate::static_selector;
use crate::utils::{is_ephemeral_source, resolve_url};

static_selector!(VIDEO_SELECTOR, "video");
static_selector!(SOURCE_SELECTOR, "source");
static_selector!(SOURCE_WITH_SRC_SELECTOR, "source[src]");
static_selector!(AUDIO_SELECTOR, "audio, audio source");
static_selector!(IFRAME_SELECTOR, "iframe");
static_selector!(
    DATA_VIDEO_SELECTOR,
    "[data-video-url], [data-src], [data-video-id]"
);
static_selector!(INLINE_SCRIPT_SELECTOR, "script:not([src])");
static_selector!(
    OG_VIDEO_SELECTOR,
    r#"meta[property="og:video"], meta[property="og:video:url"]"#
);

static MEDIA_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(mp4|webm|m3u8|mpd)").expect("BUG: hardcoded media file regex is invalid")
});
static VIDEO_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube|youtu\.be|vimeo|wistia|dailymotion|player")
        .expect("BUG: hardcoded video host regex is invalid")
});

/// Manifest kinds searched for in inline scripts, one hit each per script
static SCRIPT_MANIFESTS: LazyLock<Vec<(MediaKind, Regex)>> = LazyLock::new(|| {
    [
        (MediaKind::HlsManifest, "m3u8"),
        (MediaKind::DashManifest, "mpd"),
        (MediaKind::Mp4, "mp4"),
    ]
    .into_iter()
    .map(|(kind, ext)| {
        let pattern = format!(r#"["'](https?://[^"']+\.{ext}[^"']*)"#);
        let regex = Regex::new(&pattern).expect("BUG: hardcoded manifest regex is invalid");
        (kind, regex)
    })
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    Video,
    VideoSource,
    Audio,
    EmbeddedVideo,
    DataAttributeVideo,
    HlsManifest,
    DashManifest,
    Mp4,
    OgVideo,
}

impl MediaKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::VideoSource => "Video Source",
            Self::Audio => "Audio",
            Self::EmbeddedVideo => "Embedded Video",
            Self::DataAttributeVideo => "Video (data-attr)",
            Self::HlsManifest => "HLS Manifest",
            Self::DashManifest => "DASH Manifest",
            Self::Mp4 => "MP4",
            Self::OgVideo => "OG Video",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub src: String,
    pub poster: Option<String>,
}

impl MediaItem {
    fn new(kind: MediaKind, src: String) -> Self {
        Self {
            kind,
            src,
            poster: None,
        }
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        match &self.poster {
            Some(poster) => format!("- **{}:** {} (poster: {poster})", self.kind.label(), self.src),
            None => format!("- **{}:** {}", self.kind.label(), self.src),
        }
    }
}

type MediaScanner = fn(&Page, &mut Vec<MediaItem>);

const SCANNERS: &[MediaScanner] = &[
    scan_videos,
    scan_sources,
    scan_audio,
    scan_embedded_players,
    scan_data_attributes,
    scan_inline_scripts,
    scan_og_video,
];

#[must_use]
pub fn extract_media(page: &Page) -> Vec<MediaItem> {
    let mut found = Vec::new();
    for scan in SCANNERS {
        scan(page, &mut found);
    }

    let mut seen = HashSet::new();
    let media: Vec<MediaItem> = found
        .into_iter()
        .filter(|item| !item.src.is_empty() && !is_ephemeral_source(&item.src))
        .filter(|item| seen.insert(item.src.clone()))
        .collect();
    if media.is_empty() {
        tracing::debug!("No media found");
    }
    media
}

fn scan_videos(page: &Page, found: &mut Vec<MediaItem>) {
    for video in page.select_all(&VIDEO_SELECTOR) {
        let src = non_empty_attr(&video, "src").or_else(|| {
            video
                .select(&SOURCE_SELECTOR)
                .next()
                .and_then(|s| non_empty_attr(&s, "src"))
        });
        let Some(src) = src else { continue };
        found.push(MediaItem {
            kind: MediaKind::Video,
            src: resolve_url(page.url(), src),
            poster: non_empty_attr(&video, "poster").map(|p| resolve_url(page.url(), p)),
        });
    }
}

fn scan_sources(page: &Page, found: &mut Vec<MediaItem>) {
    for source in page.select_all(&SOURCE_WITH_SRC_SELECTOR) {
        let src = resolve_url(page.url(), attr(&source, "src").unwrap_or(""));
        if MEDIA_FILE.is_match(&src) {
            found.push(MediaItem::new(MediaKind::VideoSource, src));
        }
    }
}

fn scan_audio(page: &Page, found: &mut Vec<MediaItem>) {
    for audio in page.select_all(&AUDIO_SELECTOR) {
        if let Some(src) = non_empty_attr(&audio, "src") {
            found.push(MediaItem::new(MediaKind::Audio, resolve_url(page.url(), src)));
        }
    }
}

fn scan_embedded_players(page: &Page, found: &mut Vec<MediaItem>) {
    for frame in page.select_all(&IFRAME_SELECTOR) {
        if let Some(src) = non_empty_attr(&frame, "src")
            && VIDEO_HOST.is_match(src)
        {
            found.push(MediaItem::new(
                MediaKind::EmbeddedVideo,
                resolve_url(page.url(), src),
            ));
        }
    }
}

fn scan_data_attributes(page: &Page, found: &mut Vec<MediaItem>) {
    for el in page.select_all(&DATA_VIDEO_SELECTOR) {
        if let Some(src) = non_empty_attr(&el, "data-video-url").or_else(|| non_empty_attr(&el, "data-src")) {
            found.push(MediaItem::new(
                MediaKind::DataAttributeVideo,
                resolve_url(page.url(), src),
            ));
        }
    }
}

fn scan_inline_scripts(page: &Page, found: &mut Vec<MediaItem>) {
    for script in page.select_all(&INLINE_SCRIPT_SELECTOR) {
        let body = text_content(&script);
        for (kind, regex) in SCRIPT_MANIFESTS.iter() {
            if let Some(url) = regex.captures(&body).and_then(|c| c.get(1)) {
                found.push(MediaItem::new(*kind, url.as_str().to_string()));
            }
        }
    }
}

fn scan_og_video(page: &Page, found: &mut Vec<MediaItem>) {
    if let Some(content) = page
        .select_first(&OG_VIDEO_SELECTOR)
        .and_then(|meta| non_empty_attr(&meta, "content"))
    {
        found.push(MediaItem::new(MediaKind::OgVideo, content.to_string()));
    }
}
