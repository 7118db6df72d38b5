//! Migration orchestration.
//!
//! Drives the full pipeline: analyze both projects, resolve name conflicts,
//! fan the per-file migration out over a worker pool, then run the advisory
//! stages (routes, state, style comparison) and the selected output mode.
//!
//! Ordering rules: both analyses and the conflict pre-pass complete before
//! any parallel file work starts, so workers only ever read shared state.
//! Per-file failures are logged and skipped; only fatal setup errors abort
//! the run.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use rayon::prelude::*;

use crate::adapter::{adapt_source, AcceptAllMatcher, AdaptContext, AestheticMatcher};
use crate::ast::parse_program;
use crate::conflicts::{resolve_conflicts, MIGRATED_CATEGORIES};
use crate::depgraph::build_dependencies;
use crate::error::{MigrateError, Result};
use crate::framework::Framework;
use crate::logging::MigrationLog;
use crate::options::{MigrationOptions, OutputMode, SCRIPT_EXTENSIONS, STYLE_EXTENSIONS};
use crate::patterns::recognize_patterns;
use crate::scanner::scan_project;
use crate::semantic::analyze_program;
use crate::style_transform::{transform_inline_styles, transform_stylesheet};
use crate::types::{FileCategory, FileInfo, ProjectAnalysis};

/// Directory under the target's `src/` that receives migrated files.
pub const MIGRATION_DIR: &str = "components_migrated_from_B";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    Idle,
    AnalyzingTarget,
    AnalyzingSource,
    MigratingComponents,
    HarmonizingRoutes,
    IntegratingState,
    ComparingStyles,
    Done,
    Failed,
}

pub struct MigrationOrchestrator {
    target_root: PathBuf,
    source_root: PathBuf,
    options: MigrationOptions,
    log: MigrationLog,
    matcher: Box<dyn AestheticMatcher>,
    phase: MigrationPhase,
    pub target_analysis: Option<ProjectAnalysis>,
    pub source_analysis: Option<ProjectAnalysis>,
}

impl MigrationOrchestrator {
    pub fn new(
        target_root: impl Into<PathBuf>,
        source_root: impl Into<PathBuf>,
        options: MigrationOptions,
    ) -> Self {
        MigrationOrchestrator {
            target_root: target_root.into(),
            source_root: source_root.into(),
            options,
            log: MigrationLog::new(),
            matcher: Box::new(AcceptAllMatcher),
            phase: MigrationPhase::Idle,
            target_analysis: None,
            source_analysis: None,
        }
    }

    pub fn with_log(mut self, log: MigrationLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_matcher(mut self, matcher: Box<dyn AestheticMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn log(&self) -> &MigrationLog {
        &self.log
    }

    pub fn phase(&self) -> MigrationPhase {
        self.phase
    }

    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Run the whole pipeline. Already-written files are not rolled back on
    /// failure.
    pub fn run(&mut self) -> Result<()> {
        match self.execute() {
            Ok(()) => {
                self.phase = MigrationPhase::Done;
                Ok(())
            }
            Err(err) => {
                self.log.error(format!("Migration failed: {err}"));
                self.phase = MigrationPhase::Failed;
                Err(err)
            }
        }
    }

    fn execute(&mut self) -> Result<()> {
        self.log.info("--- Starting Frontend Migration ---");
        if self.options.dry_run {
            self.log
                .warn("DRY RUN mode enabled. No files will be written.");
        }

        self.phase = MigrationPhase::AnalyzingTarget;
        let target_root = self.target_root.clone();
        let target = self.analyze(&target_root)?;

        self.phase = MigrationPhase::AnalyzingSource;
        let source_root = self.source_root.clone();
        let mut source = self.analyze(&source_root)?;

        if let (Some(target_fw), Some(source_fw)) = (target.framework, source.framework) {
            if target_fw != source_fw {
                self.log.warn(format!(
                    "Framework mismatch: target is {}, source is {}. Proceeding with {} adaptation.",
                    target_fw.name(),
                    source_fw.name(),
                    format!("{:?}", self.options.mismatch_strategy).to_lowercase()
                ));
            }
        }

        self.phase = MigrationPhase::MigratingComponents;
        self.migrate_components(&target, &mut source)?;

        self.phase = MigrationPhase::HarmonizingRoutes;
        self.harmonize_routes(&target, &source);

        self.phase = MigrationPhase::IntegratingState;
        self.integrate_state(&source);

        self.phase = MigrationPhase::ComparingStyles;
        self.compare_styles(&target, &source);

        match self.options.output_mode {
            OutputMode::Migrate => {}
            OutputMode::Prototype => self.generate_prototype(&target, &source)?,
            OutputMode::Diff => self
                .log
                .info("Diff output mode: analysis and decision log only."),
        }

        self.log.info("--- Migration Complete ---");
        self.target_analysis = Some(target);
        self.source_analysis = Some(source);
        Ok(())
    }

    /// Structure scan followed by the sequential AST pass. Each script file
    /// is parsed once; semantic insights, dependency edges and pattern flags
    /// all come from that one tree.
    fn analyze(&self, root: &Path) -> Result<ProjectAnalysis> {
        let mut analysis = scan_project(root, &self.options, &self.log)?;

        let mut indices = Vec::new();
        for category in MIGRATED_CATEGORIES {
            if let Some(idxs) = analysis.categorized.get(category) {
                indices.extend(idxs.iter().copied());
            }
        }

        for idx in indices {
            let file = analysis.files[idx].clone();
            if !SCRIPT_EXTENSIONS.contains(&file.extension.as_str()) {
                continue;
            }
            let content = match fs::read_to_string(&file.file_path) {
                Ok(content) => content,
                Err(err) => {
                    self.log.error(format!(
                        "Could not read {}: {}",
                        file.file_path.display(),
                        err
                    ));
                    continue;
                }
            };
            let allocator = Allocator::default();
            match parse_program(&allocator, &content) {
                Ok(program) => {
                    let insights = analyze_program(&program, &content, analysis.framework);
                    let dependencies = build_dependencies(&program, &analysis.aliases);
                    recognize_patterns(
                        &program,
                        &file.file_name,
                        analysis.framework,
                        &mut analysis.patterns,
                    );
                    analysis
                        .semantic_context
                        .insert(file.relative_path.clone(), insights);
                    analysis
                        .dependency_graph
                        .insert(file.relative_path.clone(), dependencies);
                }
                Err(msg) => {
                    self.log.error(format!(
                        "Failed to parse {}: {}",
                        file.file_path.display(),
                        msg
                    ));
                }
            }
        }

        Ok(analysis)
    }

    fn migrate_components(
        &self,
        target: &ProjectAnalysis,
        source: &mut ProjectAnalysis,
    ) -> Result<()> {
        self.log.info("--- Migrating Components ---");

        // Conflict resolution must finish before the fan-out so workers see
        // a frozen rename map.
        resolve_conflicts(source, target, &self.options, &self.log);

        let migration_root = target.root_path.join("src").join(MIGRATION_DIR);
        if !self.options.dry_run {
            fs::create_dir_all(&migration_root)?;
        }

        let source: &ProjectAnalysis = source;
        let target_colors = target.all_colors();
        let source_colors = source.all_colors();
        let files: Vec<FileInfo> = MIGRATED_CATEGORIES
            .iter()
            .flat_map(|&category| source.files_in(category).cloned())
            .collect();

        files.par_iter().for_each(|file| {
            if let Err(err) = self.migrate_file(
                file,
                &migration_root,
                target,
                source,
                &target_colors,
                &source_colors,
            ) {
                self.log.error(format!(
                    "Failed to migrate {}: {}",
                    file.relative_path, err
                ));
            }
        });

        self.log.info(format!(
            "Processed {} files into {}",
            files.len(),
            migration_root.display()
        ));
        Ok(())
    }

    fn migrate_file(
        &self,
        file: &FileInfo,
        migration_root: &Path,
        target: &ProjectAnalysis,
        source_project: &ProjectAnalysis,
        target_colors: &BTreeSet<String>,
        source_colors: &BTreeSet<String>,
    ) -> Result<()> {
        let destination = migration_root.join(&file.relative_path);

        if SCRIPT_EXTENSIONS.contains(&file.extension.as_str()) {
            let content = fs::read_to_string(&file.file_path)?;
            let ctx = AdaptContext {
                source_file: file,
                target,
                source_project,
                options: &self.options,
                matcher: self.matcher.as_ref(),
                log: &self.log,
            };
            let output = match adapt_source(&content, &ctx) {
                Ok(adapted) => transform_inline_styles(
                    &adapted,
                    file,
                    target_colors,
                    source_colors,
                    &self.options,
                    &self.log,
                )?,
                // Unparseable sources are copied unchanged.
                Err(MigrateError::Parse { path, message }) => {
                    self.log.error(format!(
                        "Failed to parse {}: {}. Copying unchanged.",
                        path.display(),
                        message
                    ));
                    content
                }
                Err(err) => return Err(err),
            };
            self.write_migrated(&destination, output.as_bytes(), &file.relative_path)?;

            if self.options.generate_tests
                && matches!(file.category, FileCategory::Component | FileCategory::Page)
                && file.component_name.is_some()
            {
                self.write_component_test(file, migration_root)?;
            }
        } else if STYLE_EXTENSIONS.contains(&file.extension.as_str()) {
            let content = fs::read_to_string(&file.file_path)?;
            let transformed =
                transform_stylesheet(&content, file, source_colors, &self.options, &self.log)?;
            self.write_migrated(&destination, transformed.as_bytes(), &file.relative_path)?;
        } else {
            let bytes = fs::read(&file.file_path)?;
            self.write_migrated(&destination, &bytes, &file.relative_path)?;
        }

        Ok(())
    }

    fn write_migrated(&self, destination: &Path, bytes: &[u8], relative: &str) -> Result<()> {
        if self.options.dry_run {
            self.log.info(format!(
                "DRY RUN: Would copy and transform: {} -> {}",
                relative,
                destination.display()
            ));
            return Ok(());
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(destination, bytes)?;
        self.log.info(format!(
            "Copied and transformed: {} -> {}",
            relative,
            destination.display()
        ));
        Ok(())
    }

    /// Smoke test scaffold next to the migrated component, using the
    /// post-rename basename for both file name and import.
    fn write_component_test(&self, file: &FileInfo, migration_root: &Path) -> Result<()> {
        let basename = file.relative_path.rsplit('/').next().unwrap_or_default();
        let stem = basename.strip_suffix(&file.extension).unwrap_or(basename);

        let test_dir = match file.relative_path.rsplit_once('/') {
            Some((dir, _)) => migration_root.join(dir).join("__tests__"),
            None => migration_root.join("__tests__"),
        };
        let test_path = test_dir.join(format!("{stem}.test{}", file.extension));
        let content = format!(
            "import React from 'react';\n\
             import {{ render }} from '@testing-library/react';\n\
             import {stem} from '../{stem}';\n\
             \n\
             describe('{stem}', () => {{\n\
             \x20 it('renders without crashing', () => {{\n\
             \x20   render(<{stem} />);\n\
             \x20 }});\n\
             }});\n"
        );

        if self.options.dry_run {
            self.log.info(format!(
                "DRY RUN: Would generate test: {}",
                test_path.display()
            ));
            return Ok(());
        }
        fs::create_dir_all(&test_dir)?;
        fs::write(&test_path, content)?;
        self.log
            .info(format!("Generated test: {}", test_path.display()));
        Ok(())
    }

    fn harmonize_routes(&self, target: &ProjectAnalysis, source: &ProjectAnalysis) {
        self.log.info("--- Harmonizing Routes ---");
        if target.framework == Some(Framework::React) {
            for page in source.files_in(FileCategory::Page) {
                let Some(name) = &page.component_name else {
                    continue;
                };
                let name = self
                    .options
                    .rename_for(name)
                    .unwrap_or_else(|| name.clone());
                self.log.info(format!(
                    "Suggested route: {{ path: '/{}', element: <{} /> }}",
                    name.to_lowercase(),
                    name
                ));
            }
        } else {
            self.log
                .info("Route harmonization currently supports React targets only.");
        }
        self.log.info("Route harmonization complete.");
    }

    fn integrate_state(&self, source: &ProjectAnalysis) {
        self.log.info("--- Integrating State Management ---");
        if source.patterns.redux {
            self.log.info(
                "Source project uses Redux. Combine its reducers into the target store.",
            );
            self.log.info(
                "Wrap migrated components in the target <Provider>, or mount their slice reducers.",
            );
        }
        if !source.patterns.context_api.is_empty() {
            self.log.info(format!(
                "Context providers detected in: {}",
                source.patterns.context_api.join(", ")
            ));
        }
    }

    fn compare_styles(&self, target: &ProjectAnalysis, source: &ProjectAnalysis) {
        self.log.info("--- Comparing Styles ---");
        let sections: [(&str, BTreeSet<String>, BTreeSet<String>); 4] = [
            ("Colors", target.all_colors(), source.all_colors()),
            (
                "Font families",
                target.all_font_families(),
                source.all_font_families(),
            ),
            ("Font sizes", target.all_font_sizes(), source.all_font_sizes()),
            (
                "Properties",
                target.all_property_names(),
                source.all_property_names(),
            ),
        ];
        for (label, target_set, source_set) in &sections {
            let common: BTreeSet<_> = target_set.intersection(source_set).cloned().collect();
            let target_only: BTreeSet<_> = target_set.difference(source_set).cloned().collect();
            let source_only: BTreeSet<_> = source_set.difference(target_set).cloned().collect();
            self.log.info(format!(
                "{label} - common: {}; target only: {}; source only: {}",
                format_set(&common),
                format_set(&target_only),
                format_set(&source_only)
            ));
        }
    }

    /// Prototype scaffolding: directory plus a reconciled package manifest.
    /// Dependency installation is deliberately left to the operator.
    fn generate_prototype(
        &self,
        target: &ProjectAnalysis,
        source: &ProjectAnalysis,
    ) -> Result<()> {
        self.log.info("--- Generating Prototype ---");
        let prototype_dir = target.root_path.join(&self.options.prototype_dir);
        if !self.options.dry_run {
            fs::create_dir_all(&prototype_dir)?;
        }

        self.log.info(format!(
            "Aesthetic profile: {}",
            format!("{:?}", self.options.aesthetic_profile).to_lowercase()
        ));

        let target_deps = dependency_map(&target.package_json);
        let source_deps = dependency_map(&source.package_json);
        let missing: Vec<(String, String)> = source_deps
            .iter()
            .filter(|(name, _)| !target_deps.contains_key(*name))
            .map(|(name, version)| (name.clone(), version.clone()))
            .collect();
        if !missing.is_empty() {
            self.log.info(format!(
                "Source dependencies missing from target: {}",
                missing
                    .iter()
                    .map(|(name, version)| format!("{name}@{version}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        let mut dependencies = serde_json::Map::new();
        for (name, version) in target_deps.iter().chain(missing.iter().map(|(n, v)| (n, v))) {
            dependencies.insert(name.clone(), serde_json::Value::String(version.clone()));
        }
        let manifest = serde_json::json!({
            "name": "migration-prototype",
            "version": "0.1.0",
            "private": true,
            "dependencies": dependencies,
        });

        let manifest_path = prototype_dir.join("package.json");
        if self.options.dry_run {
            self.log.info(format!(
                "DRY RUN: Would write prototype manifest: {}",
                manifest_path.display()
            ));
        } else {
            let rendered = serde_json::to_string_pretty(&manifest)
                .map_err(|e| MigrateError::Fatal(format!("prototype manifest: {e}")))?;
            fs::write(&manifest_path, rendered + "\n")?;
            self.log.info(format!(
                "Wrote prototype manifest: {}",
                manifest_path.display()
            ));
        }
        self.log
            .info("Prototype scaffold ready. Install dependencies manually to run it.");
        Ok(())
    }
}

fn format_set(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "None".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Declared packages of a parsed manifest, in name order. Runtime entries
/// shadow dev entries of the same name.
fn dependency_map(package_json: &serde_json::Value) -> std::collections::BTreeMap<String, String> {
    let mut map = std::collections::BTreeMap::new();
    for section in ["devDependencies", "dependencies"] {
        if let Some(deps) = package_json.get(section).and_then(|d| d.as_object()) {
            for (name, version) in deps {
                if let Some(version) = version.as_str() {
                    map.insert(name.clone(), version.to_string());
                }
            }
        }
    }
    map
}
