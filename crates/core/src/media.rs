//! Public URLs for stored media.
//!
//! Rows keep bare filenames; URLs are built at read time so the media host
//! can change without a data migration.

/// Build the public URL for a stored file name.
///
/// Absolute `http(s)` references pass through untouched. Blank names yield
/// `None`.
pub fn public_url(base: &str, filename: &str) -> Option<String> {
    let filename = filename.trim();
    if filename.is_empty() {
        return None;
    }
    if filename.starts_with("http://") || filename.starts_with("https://") {
        return Some(filename.to_string());
    }
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        filename.trim_start_matches('/')
    ))
}

/// Map every stored file name to its public URL, dropping blanks.
pub fn public_urls(base: &str, filenames: &[String]) -> Vec<String> {
    filenames
        .iter()
        .filter_map(|f| public_url(base, f))
        .collect()
}
