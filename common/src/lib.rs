//! Shared parsing helpers for schemapack: property-file manifests, namespace
//! short names, and separator-aware resource paths.

pub mod namespace;
pub mod path;
pub mod properties;

pub use namespace::{SHORT_NAME_PATTERN, ShortNameError, extract_short_name};
pub use path::{backslashed, ends_with_components, file_name};
pub use properties::{Properties, PropertiesError, decode_properties};
