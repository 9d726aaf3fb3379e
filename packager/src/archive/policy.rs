//! Conflict policy for archive destinations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happens when a second file claims an occupied archive path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// The later file replaces the earlier one.
    Overwrite,
    /// The later file is dropped and the first one kept.
    #[default]
    Exclude,
    /// Packaging fails with a duplicate-destination error.
    Error,
}

impl ConflictPolicy {
    /// The lowercase name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Exclude => "exclude",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_is_exclude() {
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Exclude);
    }

    #[derive(Deserialize)]
    struct Holder {
        policy: ConflictPolicy,
    }

    #[rstest]
    #[case("overwrite", ConflictPolicy::Overwrite)]
    #[case("exclude", ConflictPolicy::Exclude)]
    #[case("error", ConflictPolicy::Error)]
    fn deserialises_lowercase_names(#[case] name: &str, #[case] expected: ConflictPolicy) {
        let holder: Holder =
            toml::from_str(&format!("policy = \"{name}\"")).expect("policy parses");
        assert_eq!(holder.policy, expected);
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    fn rejects_unknown_names() {
        let outcome: Result<Holder, _> = toml::from_str("policy = \"merge\"");
        assert!(outcome.is_err());
    }
}
