//! Project structure scanning and categorization.
//!
//! Walks a project tree, filters by extension and ignore rules, categorizes
//! every accepted file, builds the component-name index, and runs style
//! extraction for each stylesheet encountered.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::aliases::resolve_aliases;
use crate::css::{extract_style_record, StyleSyntax};
use crate::error::{MigrateError, Result};
use crate::framework::detect_framework;
use crate::logging::MigrationLog;
use crate::options::{MigrationOptions, STYLE_EXTENSIONS, UI_SOURCE_EXTENSIONS};
use crate::paths::to_slash;
use crate::types::{FileCategory, FileInfo, ProjectAnalysis};

/// Scan a project root into a `ProjectAnalysis` with `files`,
/// `categorized`, `component_map` and `style_info` populated.
pub fn scan_project(
    root: &Path,
    options: &MigrationOptions,
    log: &MigrationLog,
) -> Result<ProjectAnalysis> {
    log.info(format!("Analyzing project structure: {}", root.display()));

    if !root.is_dir() {
        return Err(MigrateError::Fatal(format!(
            "project root is not a readable directory: {}",
            root.display()
        )));
    }

    let package_json = read_package_json(root, log);
    let framework = detect_framework(&package_json);
    let aliases = resolve_aliases(root, log);
    log.info(format!(
        "Detected framework: {}",
        framework.map(|f| f.name()).unwrap_or("Unknown")
    ));
    log.info(format!(
        "Detected import aliases: {}",
        serde_json::to_string(
            &aliases
                .iter()
                .map(|a| (a.pattern.clone(), a.targets.clone()))
                .collect::<Vec<_>>()
        )
        .unwrap_or_default()
    ));

    let mut analysis = ProjectAnalysis {
        root_path: root.to_path_buf(),
        framework,
        aliases,
        package_json,
        ..ProjectAnalysis::default()
    };

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let rel = match entry.path().strip_prefix(root) {
                Ok(rel) => to_slash(rel),
                Err(_) => return true,
            };
            if rel.is_empty() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !options
                .ignore_dirs
                .iter()
                .any(|dir| rel.starts_with(dir.as_str()) || name == dir.as_str())
        });

    for entry in walker {
        // Unreadable directories or files abort the traversal.
        let entry = entry.map_err(|e| MigrateError::Fatal(format!("traversal failed: {e}")))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let extension = entry
            .path()
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        if !options.accepts_extension(&extension) {
            continue;
        }

        let relative_path = to_slash(entry.path().strip_prefix(root).unwrap_or(entry.path()));
        let file_name = entry.file_name().to_string_lossy().to_string();

        let mut info = FileInfo {
            file_path: entry.path().to_path_buf(),
            relative_path,
            file_name,
            extension,
            category: FileCategory::Other,
            component_name: None,
        };
        categorize(&mut info, options);

        // Style extraction runs for every stylesheet encountered, whatever
        // directory rule categorized it.
        if let Some(syntax) = StyleSyntax::from_extension(&info.extension) {
            let content = fs::read_to_string(&info.file_path)?;
            match extract_style_record(&content, syntax) {
                Ok(record) => {
                    analysis.style_info.insert(info.relative_path.clone(), record);
                }
                Err(err) => {
                    let err = MigrateError::StyleParse {
                        path: info.file_path.clone(),
                        message: err,
                    };
                    log.error(format!("Style extraction skipped: {err}"));
                    analysis
                        .style_info
                        .insert(info.relative_path.clone(), Default::default());
                }
            }
        }

        let idx = analysis.files.len();
        if let Some(name) = &info.component_name {
            if let Some(prev) = analysis.component_map.insert(name.clone(), idx) {
                log.warn(format!(
                    "Duplicate component basename '{}': {} replaces {}",
                    name, info.relative_path, analysis.files[prev].relative_path
                ));
            }
        }
        analysis
            .categorized
            .entry(info.category)
            .or_default()
            .push(idx);
        analysis.files.push(info);
    }

    log.info(format!("Found {} relevant files.", analysis.files.len()));
    Ok(analysis)
}

/// Fixed-order categorization; first matching rule wins.
fn categorize(info: &mut FileInfo, options: &MigrationOptions) {
    let rel = &info.relative_path;
    let under = |dirs: &[String]| dirs.iter().any(|dir| rel.starts_with(dir.as_str()));

    if under(&options.component_dirs) && UI_SOURCE_EXTENSIONS.contains(&info.extension.as_str()) {
        info.category = if rel.contains("pages") || rel.contains("views") {
            FileCategory::Page
        } else {
            FileCategory::Component
        };
        info.component_name = Some(
            info.file_name
                .strip_suffix(&info.extension)
                .unwrap_or(&info.file_name)
                .to_string(),
        );
    } else if under(&options.util_dirs) {
        info.category = FileCategory::Util;
    } else if under(&options.asset_dirs) {
        info.category = FileCategory::Asset;
    } else if under(&options.config_dirs) {
        info.category = FileCategory::Config;
    } else if STYLE_EXTENSIONS.contains(&info.extension.as_str()) {
        info.category = FileCategory::Style;
    } else {
        info.category = FileCategory::Other;
    }
}

fn read_package_json(root: &Path, log: &MigrationLog) -> serde_json::Value {
    let path = root.join("package.json");
    match fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(|content| {
        serde_json::from_str::<serde_json::Value>(&content).map_err(|e| e.to_string())
    }) {
        Ok(value) => value,
        Err(err) => {
            log.warn(format!(
                "Could not read package.json for {}: {}",
                root.display(),
                err
            ));
            serde_json::json!({})
        }
    }
}
