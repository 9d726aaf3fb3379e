//! Helpers for matching recorded resource paths against on-disk files.
//!
//! Manifests record resource paths with whichever separator the author's
//! platform used, so matching works on `/`- or `\`-delimited text.

/// Separators recognised between path components.
const SEPARATORS: [char; 2] = ['/', '\\'];

/// Returns the recorded path with every `/` replaced by `\`.
///
/// # Examples
///
/// ```
/// use schemapack_common::path::backslashed;
///
/// assert_eq!(backslashed("org/example/spring-beans.xsd"), "org\\example\\spring-beans.xsd");
/// ```
#[must_use]
pub fn backslashed(recorded: &str) -> String {
    recorded.replace('/', "\\")
}

/// Returns `true` when `path` ends with `suffix` on a component boundary.
///
/// The suffix must either be the whole path or be preceded by a separator,
/// so `spring-beans.xsd` matches `org/spring-beans.xsd` but not
/// `org/other-spring-beans.xsd`. A leading separator on the suffix is
/// ignored. Empty suffixes never match.
///
/// # Examples
///
/// ```
/// use schemapack_common::path::ends_with_components;
///
/// assert!(ends_with_components("org/example/beans.xsd", "example/beans.xsd"));
/// assert!(!ends_with_components("org/example/mybeans.xsd", "beans.xsd"));
/// ```
#[must_use]
pub fn ends_with_components(path: &str, suffix: &str) -> bool {
    let suffix = suffix.trim_start_matches(SEPARATORS);
    if suffix.is_empty() {
        return false;
    }
    match path.strip_suffix(suffix) {
        Some("") => true,
        Some(head) => head.ends_with(SEPARATORS),
        None => false,
    }
}

/// Returns the final component of a `/`- or `\`-delimited path.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit(SEPARATORS).next().unwrap_or(path)
}
