//! URL helpers: resolution against the page location and file naming.

use url::Url;

use super::constants::MAX_SLUG_LEN;

/// Resolve `href` against `base`. Returns the input unchanged when there is
/// no base or the join fails, so callers keep the text the page shows.
#[must_use]
pub fn resolve_url(base: Option<&Url>, href: &str) -> String {
    match base {
        Some(base) => base
            .join(href)
            .map_or_else(|_| href.to_string(), |u| u.to_string()),
        None => href.to_string(),
    }
}

/// Hrefs that point nowhere: empty, a bare fragment marker, or script.
#[must_use]
pub fn is_placeholder_href(href: &str) -> bool {
    let href = href.trim();
    href.is_empty() || href == "#" || href.to_ascii_lowercase().starts_with("javascript:")
}

/// In-memory object URLs die with the page and cannot be linked to.
#[must_use]
pub fn is_ephemeral_source(src: &str) -> bool {
    src.starts_with("blob:")
}

/// Build a download file name from the page location:
/// host + path, non-alphanumerics collapsed to `-`, edges trimmed.
#[must_use]
pub fn slugify_url(url: &Url, extension: &str) -> String {
    let raw = format!("{}{}", url.host_str().unwrap_or(""), url.path());
    let mut slug = String::with_capacity(raw.len());
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_matches('-');
    let slug = super::safe_truncate_chars(slug, MAX_SLUG_LEN);
    let slug = if slug.is_empty() { "page" } else { slug };
    format!("{slug}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_root_relative_links() {
        let base = Url::parse("https://a.b/c/").ok();
        assert_eq!(resolve_url(base.as_ref(), "/docs/x"), "https://a.b/docs/x");
        assert_eq!(resolve_url(base.as_ref(), "y"), "https://a.b/c/y");
        assert_eq!(resolve_url(None, "/docs/x"), "/docs/x");
    }

    #[test]
    fn placeholder_hrefs() {
        assert!(is_placeholder_href(""));
        assert!(is_placeholder_href("#"));
        assert!(is_placeholder_href("javascript:void(0)"));
        assert!(!is_placeholder_href("#section"));
    }

    #[test]
    fn slug_from_host_and_path() {
        let url = Url::parse("https://docs.example.com/guide/intro?x=1").expect("valid url");
        assert_eq!(slugify_url(&url, "md"), "docs-example-com-guide-intro.md");

        let url = Url::parse("https://example.com/").expect("valid url");
        assert_eq!(slugify_url(&url, "md"), "example-com.md");
    }

    #[test]
    fn slug_is_bounded() {
        let long = format!("https://example.com/{}", "a".repeat(200));
        let url = Url::parse(&long).expect("valid url");
        let name = slugify_url(&url, "md");
        assert_eq!(name.len(), MAX_SLUG_LEN + 3);
    }
}
