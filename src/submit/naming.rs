//! Branch name derivation

use chrono::{DateTime, Utc};

/// Fallback slug when a bucket name has no usable characters
const EMPTY_SLUG: &str = "bucket";

/// Lower-case `name`, collapse every run of non-alphanumerics into one `-`
/// and cut the result to `max_len` characters
pub fn slugify(name: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    // Slug is pure ASCII, so byte and char lengths match
    slug.truncate(max_len);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Time-derived tag that keeps branch names unique across runs
pub fn branch_suffix(now: DateTime<Utc>) -> String {
    format!("{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

/// Full branch name for a bucket: `<prefix><slug>-<suffix>`
pub fn branch_name(prefix: &str, bucket: &str, suffix: &str, max_slug_len: usize) -> String {
    format!("{prefix}{}-{suffix}", slugify(bucket, max_slug_len))
}
