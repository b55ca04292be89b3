pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{
    collapse_newline_runs, collapse_paragraph_breaks, collapse_whitespace, is_opaque_identifier,
    safe_truncate_chars, split_camel_case, squash,
};
pub use url_utils::{is_ephemeral_source, is_placeholder_href, resolve_url, slugify_url};
