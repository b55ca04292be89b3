//! Shared configuration constants for pagecopy
//!
//! Default values used by `ExtractionConfig` and the extractors, kept in one
//! place to avoid magic numbers scattered through the heuristics.

/// Minimum trimmed text length for a locator candidate to be accepted
pub const MIN_CANDIDATE_TEXT_LEN: usize = 80;

/// A main landmark must be this many times longer than the candidate to win
pub const LANDMARK_OVERRIDE_RATIO: f64 = 1.5;

/// A main landmark must exceed this text length to win the override
pub const LANDMARK_OVERRIDE_MIN_LEN: usize = 500;

/// Settle delay after the expansion operation: 500 ms
///
/// Gives lazily revealed regions time to appear before rendering starts.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Fixed delay between sequential notebook file downloads: 350 ms
pub const DEFAULT_FILE_DELAY_MS: u64 = 350;

/// Timeout for a single notebook API request: 30 seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Inline input values longer than this are treated as noise
pub const MAX_INLINE_VALUE_LEN: usize = 200;

/// Opaque identifiers are hex runs of at least this many characters
pub const OPAQUE_ID_MIN_LEN: usize = 20;

/// Maximum slug length for downloaded file names (before the extension)
pub const MAX_SLUG_LEN: usize = 80;

/// Navigation link labels are truncated to this many characters
pub const MAX_NAV_LABEL_CHARS: usize = 120;

/// Navigation lists larger than this are treated as site chrome and dropped
pub const MAX_NAV_LINKS: usize = 30;

/// Code blocks shorter than this (trimmed) are ignored
pub const MIN_CODE_BLOCK_LEN: usize = 3;

/// Transcript containers must exceed this length to be considered
pub const MIN_TRANSCRIPT_CONTAINER_LEN: usize = 500;

/// Transcripts shorter than this are rejected
pub const MIN_TRANSCRIPT_LEN: usize = 100;

/// More than this many timestamp controls enable the timestamp strategy
pub const MIN_TIMESTAMP_CONTROLS: usize = 5;

/// How many ancestors the transcript heading walk climbs
pub const TRANSCRIPT_ANCESTOR_DEPTH: usize = 4;

/// User agent for notebook API and page fetches
pub const USER_AGENT: &str = concat!("kodegen-pagecopy/", env!("CARGO_PKG_VERSION"));
