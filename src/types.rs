//! Data model for the migration pipeline.
//!
//! `ProjectAnalysis` is built once per project per run and mutated in place
//! as later pipeline stages fill in the dependency graph, semantic context
//! and pattern fields; a given file's entry in those maps is written by
//! exactly one analyzer pass.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use crate::framework::Framework;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileCategory {
    Component,
    Page,
    Util,
    Asset,
    Config,
    Style,
    Other,
}

/// One discovered file. Immutable after scanning, except `relative_path`,
/// which the conflict resolver may rewrite once before the file is
/// transformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub file_name: String,
    pub extension: String,
    pub category: FileCategory,
    /// Inferred component name (basename without extension) for
    /// component/page files.
    pub component_name: Option<String>,
}

/// Import path alias: a pattern such as `@/*` mapped to one or more target
/// path patterns such as `src/*`. Order follows the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasEntry {
    pub pattern: String,
    pub targets: Vec<String>,
}

/// Per-stylesheet extraction record. Ordered sets keep serialization
/// reproducible without depending on discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub colors: BTreeSet<String>,
    pub font_families: BTreeSet<String>,
    pub font_sizes: BTreeSet<String>,
    pub properties: BTreeMap<String, BTreeSet<String>>,
    pub selectors: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileRole {
    #[default]
    Unknown,
    Component,
}

/// Output of the semantic analyzer for one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticInsights {
    pub role: FileRole,
    pub exported_entities: Vec<String>,
    pub data_flow: Vec<String>,
    pub uses_hooks: bool,
    pub inline_styles: Vec<String>,
}

/// Detected architectural signatures. Coarse heuristics, not semantic
/// guarantees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitecturalPatterns {
    pub redux: bool,
    /// File names that import something context-flavored in a React project.
    pub context_api: Vec<String>,
}

/// Full structural/semantic model of one project. Discarded at the end of
/// the run; nothing persists across runs.
#[derive(Debug, Default)]
pub struct ProjectAnalysis {
    pub root_path: PathBuf,
    pub framework: Option<Framework>,
    pub files: Vec<FileInfo>,
    /// Category -> indices into `files`.
    pub categorized: HashMap<FileCategory, Vec<usize>>,
    /// Component name -> index into `files`. Unique within one project;
    /// last write wins on duplicate basenames.
    pub component_map: HashMap<String, usize>,
    /// Relative path -> resolved module specifiers, in order of appearance.
    pub dependency_graph: HashMap<String, Vec<String>>,
    pub patterns: ArchitecturalPatterns,
    pub semantic_context: HashMap<String, SemanticInsights>,
    /// Relative path -> extracted style record for stylesheet files.
    pub style_info: HashMap<String, StyleRecord>,
    pub aliases: Vec<AliasEntry>,
    pub package_json: serde_json::Value,
}

impl ProjectAnalysis {
    pub fn files_in(&self, category: FileCategory) -> impl Iterator<Item = &FileInfo> {
        self.categorized
            .get(&category)
            .into_iter()
            .flatten()
            .map(|&idx| &self.files[idx])
    }

    pub fn component(&self, name: &str) -> Option<&FileInfo> {
        self.component_map.get(name).map(|&idx| &self.files[idx])
    }

    /// Union of all color literals observed across the project's stylesheets.
    pub fn all_colors(&self) -> BTreeSet<String> {
        self.style_info
            .values()
            .flat_map(|record| record.colors.iter().cloned())
            .collect()
    }

    pub fn all_font_families(&self) -> BTreeSet<String> {
        self.style_info
            .values()
            .flat_map(|record| record.font_families.iter().cloned())
            .collect()
    }

    pub fn all_font_sizes(&self) -> BTreeSet<String> {
        self.style_info
            .values()
            .flat_map(|record| record.font_sizes.iter().cloned())
            .collect()
    }

    pub fn all_property_names(&self) -> BTreeSet<String> {
        self.style_info
            .values()
            .flat_map(|record| record.properties.keys().cloned())
            .collect()
    }
}
