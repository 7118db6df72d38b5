//! Component name conflict resolution.
//!
//! Runs as a synchronous pre-pass over the source project's migration set,
//! before any parallel file work starts. By the time the fan-out begins the
//! rename map is complete, so workers only ever read it.

use crate::logging::MigrationLog;
use crate::options::MigrationOptions;
use crate::types::{FileCategory, ProjectAnalysis};

/// Categories whose files participate in migration (and therefore in
/// conflict checking).
pub const MIGRATED_CATEGORIES: &[FileCategory] = &[
    FileCategory::Component,
    FileCategory::Page,
    FileCategory::Util,
    FileCategory::Config,
];

/// Rename source-project components whose names collide with a component in
/// the target project. The file's relative path is rewritten in place and
/// the old name -> new name mapping is registered for the adapter's tag
/// rewriting. Already-registered names are left alone, so a second pass is
/// a no-op.
pub fn resolve_conflicts(
    source: &mut ProjectAnalysis,
    target: &ProjectAnalysis,
    options: &MigrationOptions,
    log: &MigrationLog,
) {
    let mut indices = Vec::new();
    for category in MIGRATED_CATEGORIES {
        if let Some(idxs) = source.categorized.get(category) {
            indices.extend(idxs.iter().copied());
        }
    }

    for idx in indices {
        let Some(name) = source.files[idx].component_name.clone() else {
            continue;
        };
        if target.component_map.contains_key(&name) && options.rename_for(&name).is_none() {
            let file = &mut source.files[idx];
            let new_name = format!("{name}B");
            let new_file_name = format!("{new_name}{}", file.extension);
            file.relative_path = match file.relative_path.rsplit_once('/') {
                Some((dir, _)) => format!("{dir}/{new_file_name}"),
                None => new_file_name,
            };
            options
                .component_renames
                .lock()
                .expect("rename map poisoned")
                .insert(name.clone(), new_name.clone());
            log.warn(format!(
                "Component '{name}' exists in both projects. Renaming to '{new_name}'."
            ));
        }
    }
}
