//! Section extractors
//!
//! Each extractor reads the page independently and returns an empty result
//! when it finds nothing; none of them fail.

pub mod code_blocks;
pub mod embeds;
pub mod forms;
pub mod media;
pub mod metadata;
pub mod navigation;
pub mod transcript;

pub use code_blocks::{CodeBlock, NOTEBOOK_DEFAULT_LANGUAGE, extract_code_blocks};
pub use embeds::{EmbeddedFrame, extract_embeds};
pub use forms::{EMPTY_VALUE, FormBlock, FormField, FormLine, NOT_SELECTED, extract_forms};
pub use media::{MediaItem, MediaKind, extract_media};
pub use metadata::{PageMetadata, extract_metadata, page_title};
pub use navigation::{
    Crumb, NavLink, breadcrumb_markdown, extract_breadcrumb, extract_nav_links,
};
pub use transcript::{TranscriptResult, TranscriptSegment, extract_transcript};
