//! Short-name extraction for schema namespace identifiers.
//!
//! Manifest keys look like
//! `http://www.springframework.org/schema/beans/spring-beans-4.3.xsd`. The
//! short name is the path segment between `schema/` and `/spring-`; it names
//! the archive directory that receives the schema file.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// The fixed extraction rule applied to every manifest key.
///
/// Both wildcards are greedy: the last `schema/` and the last `/spring-` win.
pub const SHORT_NAME_PATTERN: &str = "http.*schema/(.*)/spring-.*";

#[expect(
    clippy::expect_used,
    reason = "the pattern is a compile-time constant covered by unit tests"
)]
static SHORT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(SHORT_NAME_PATTERN).expect("short-name pattern compiles"));

/// A namespace key the extraction rule could not reduce to a short name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortNameError {
    /// The key does not have the `http...schema/<name>/spring-...` shape.
    #[error("namespace `{key}` does not match `{pattern}`", pattern = SHORT_NAME_PATTERN)]
    PatternMismatch {
        /// The offending key.
        key: String,
    },

    /// The key matched but the captured segment was empty.
    #[error("namespace `{key}` has an empty short-name segment")]
    EmptySegment {
        /// The offending key.
        key: String,
    },

    /// The captured segment would not stay inside its archive directory:
    /// it has an empty, `.` or `..` component.
    #[error("namespace `{key}` has short name `{short_name}`, which is not a plain relative path")]
    UnsafeSegment {
        /// The offending key.
        key: String,
        /// The rejected short name.
        short_name: String,
    },
}

/// Extracts the short name from a namespace key.
///
/// The match is replaced by its captured segment, so any text preceding
/// `http` survives in the result. A key that comes back unchanged did not
/// match.
///
/// # Errors
///
/// Returns [`ShortNameError::PatternMismatch`] when the rule leaves the key
/// untouched, [`ShortNameError::EmptySegment`] when it reduces the key to
/// nothing, and [`ShortNameError::UnsafeSegment`] when the short name has an
/// empty, `.` or `..` component (for example `..` or `/beans`).
///
/// # Examples
///
/// ```
/// use schemapack_common::namespace::extract_short_name;
///
/// let key = "http://www.springframework.org/schema/beans/spring-beans-4.3.xsd";
/// assert_eq!(extract_short_name(key).expect("matches"), "beans");
/// assert!(extract_short_name("urn:example:beans").is_err());
/// ```
pub fn extract_short_name(key: &str) -> Result<String, ShortNameError> {
    let short_name = SHORT_NAME.replace(key, "$1");
    if short_name == key {
        return Err(ShortNameError::PatternMismatch {
            key: key.to_owned(),
        });
    }
    if short_name.is_empty() {
        return Err(ShortNameError::EmptySegment {
            key: key.to_owned(),
        });
    }
    if short_name
        .split(['/', '\\'])
        .any(|component| matches!(component, "" | "." | ".."))
    {
        return Err(ShortNameError::UnsafeSegment {
            key: key.to_owned(),
            short_name: short_name.into_owned(),
        });
    }
    Ok(short_name.into_owned())
}
