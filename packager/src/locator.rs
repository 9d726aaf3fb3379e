//! Resource lookup abstraction used by the resolver.

use camino::Utf8PathBuf;

use crate::error::Result;
use crate::module_name::ModuleName;

/// Searches a module's packaged resources by path suffix.
///
/// The suffix is matched literally against each resource's recorded path, so
/// callers that need to tolerate either separator convention ask twice.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceLocator {
    /// Return every resource file in `module` whose path ends with `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the module is unknown to the locator.
    fn find_by_suffix(&self, module: &ModuleName, suffix: &str) -> Result<Vec<Utf8PathBuf>>;
}
