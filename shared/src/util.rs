//! Small shared utilities

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Derive a URL-safe slug from a display title.
///
/// Lowercases, maps whitespace runs to single hyphens, drops everything that
/// is not `[a-z0-9-]`, and collapses repeated hyphens. Returns an empty
/// string when nothing survives; callers decide the fallback.
///
/// # Examples
///
/// ```
/// use shared::util::slugify;
///
/// assert_eq!(slugify("La Bella  Pizza"), "la-bella-pizza");
/// assert_eq!(slugify("Café 24/7"), "caf-247");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_hyphen = true; // suppress leading hyphen
    for ch in title.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            slug.push(lower);
            last_hyphen = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
        }
        // everything else (accents, punctuation) is dropped
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Validate a slug as stored on a menu record.
///
/// Non-empty, `[a-z0-9-]` only, no leading/trailing/doubled hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
