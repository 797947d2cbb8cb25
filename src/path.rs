//! Path helpers for repository files and mirror locations

/// Returns true when the final component of `path` is exactly `file_name`.
///
/// Repository paths always use `/` separators regardless of the host
/// platform, so this does not go through `std::path`.
pub fn file_name_matches(path: &str, file_name: &str) -> bool {
    path.rsplit('/').next() == Some(file_name)
}

/// Returns true when `path` names a file whose name ends with `suffix`.
///
/// A bare suffix (e.g. a file literally called `.spec`) still counts.
pub fn has_suffix(path: &str, suffix: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|name| name.ends_with(suffix))
}

/// Encode a URL into a single filesystem-safe path component.
///
/// The encoding is injective: distinct URLs always map to distinct names,
/// so two repositories can never share a mirror directory.
pub fn encode_url_path(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}
