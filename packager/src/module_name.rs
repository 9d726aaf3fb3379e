//! Module identifiers as they appear in configuration, errors, and listings.

use std::fmt;

use serde::Serialize;

/// A module contributing schemas to the archive.
///
/// Names are checked (non-blank, unique) when configuration is loaded; here
/// they are opaque keys, ordered so resource indexes iterate predictably.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// The name as written in configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for ModuleName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn serialises_as_a_bare_string() {
        let json = serde_json::to_string(&ModuleName::from("spring-beans")).expect("serialise");
        assert_eq!(json, "\"spring-beans\"");
    }

    #[rstest]
    fn orders_by_name() {
        let mut names = vec![ModuleName::from("spring-tx"), ModuleName::from("spring-aop")];
        names.sort();
        assert_eq!(
            names.iter().map(ModuleName::as_str).collect::<Vec<_>>(),
            vec!["spring-aop", "spring-tx"]
        );
    }
}
