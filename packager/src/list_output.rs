//! Output formatting for planned archive contents.
//!
//! This module renders an [`ArchivePlan`] for the `list` command, either as
//! an indented human-readable listing or as JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::archive::{ArchiveEntry, ArchivePlan, ConflictPolicy};

/// Format a plan for human-readable output, grouped by short name.
///
/// # Examples
///
/// ```
/// use schemapack_packager::archive::ArchivePlan;
/// use schemapack_packager::list_output::format_human;
///
/// let output = format_human(&ArchivePlan::default());
/// assert!(output.contains("No schemas"));
/// ```
#[must_use]
pub fn format_human(plan: &ArchivePlan) -> String {
    if plan.is_empty() {
        return String::from("No schemas found in any module manifest.");
    }

    let mut output = format!(
        "Schema archive ({} files, conflict policy: {}):\n",
        plan.len(),
        plan.policy()
    );
    for (short_name, entries) in group_by_short_name(plan.entries()) {
        output.push_str(&format!("\n{short_name}/\n"));
        for entry in entries {
            let file_name = schemapack_common::file_name(&entry.destination);
            output.push_str(&format!(
                "  {file_name}  <- {} ({})\n",
                entry.source_file, entry.module
            ));
        }
    }
    output
}

/// Format a plan as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use schemapack_packager::archive::ArchivePlan;
/// use schemapack_packager::list_output::format_json;
///
/// let json = format_json(&ArchivePlan::default());
/// assert!(json.contains("\"entries\""));
/// ```
#[must_use]
pub fn format_json(plan: &ArchivePlan) -> String {
    let listing = ArchiveListingJson {
        conflict_policy: plan.policy(),
        entries: plan.entries(),
    };
    serde_json::to_string_pretty(&listing).unwrap_or_else(|_| "{}".to_owned())
}

/// JSON-serializable view of a plan.
#[derive(Debug, Serialize)]
struct ArchiveListingJson<'a> {
    conflict_policy: ConflictPolicy,
    entries: &'a [ArchiveEntry],
}

fn group_by_short_name(entries: &[ArchiveEntry]) -> BTreeMap<&str, Vec<&ArchiveEntry>> {
    let mut groups: BTreeMap<&str, Vec<&ArchiveEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.short_name.as_str()).or_default().push(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_name::ModuleName;
    use crate::resolver::ResolvedEntry;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};

    #[fixture]
    fn plan() -> ArchivePlan {
        let mut plan = ArchivePlan::default();
        for (module, short_name, source) in [
            ("spring-context", "context", "ctx/spring-context.xsd"),
            ("spring-beans", "beans", "beans/spring-beans.xsd"),
            ("spring-beans", "beans", "beans/spring-tool.xsd"),
        ] {
            plan.add(ArchiveEntry::from_resolved(ResolvedEntry {
                module: ModuleName::from(module),
                key: format!("http://x/schema/{short_name}/spring-{short_name}.xsd"),
                short_name: short_name.to_owned(),
                source_file: Utf8PathBuf::from(source),
            }))
            .expect("plan add");
        }
        plan
    }

    #[rstest]
    fn human_output_groups_by_short_name(plan: ArchivePlan) {
        let output = format_human(&plan);
        assert!(output.contains("3 files, conflict policy: exclude"));
        let beans = output.find("beans/").expect("beans group");
        let context = output.find("context/").expect("context group");
        assert!(beans < context, "groups are sorted");
        assert!(output.contains("spring-tool.xsd  <- beans/spring-tool.xsd (spring-beans)"));
    }

    #[rstest]
    fn json_output_lists_every_entry(plan: ArchivePlan) {
        let json = format_json(&plan);
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["conflict_policy"], "exclude");
        let entries = parsed["entries"].as_array().expect("entries array");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["destination"], "context/spring-context.xsd");
        assert_eq!(entries[0]["module"], "spring-context");
    }
}
