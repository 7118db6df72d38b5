//! Frontend source-tree migration pipeline.
//!
//! Two project trees go in: a target that receives components and a source
//! that contributes them. The pipeline scans and categorizes both trees,
//! detects frameworks and import aliases, extracts style palettes, builds
//! per-file semantic context and dependency edges from the syntax tree,
//! resolves component name collisions, and rewrites each migrated file to
//! the target's conventions via byte-span replacements so untouched
//! formatting survives verbatim.
//!
//! `MigrationOrchestrator` drives the whole run; the other modules are
//! usable on their own for analysis-only workflows.

pub mod adapter;
pub mod aliases;
pub mod ast;
pub mod conflicts;
pub mod css;
pub mod depgraph;
pub mod error;
pub mod framework;
pub mod logging;
pub mod options;
pub mod orchestrator;
pub mod paths;
pub mod patterns;
pub mod scanner;
pub mod semantic;
pub mod style_transform;
pub mod types;

pub use adapter::{AcceptAllMatcher, AestheticMatcher};
pub use error::{MigrateError, Result};
pub use logging::{LogLevel, MigrationLog};
pub use options::{
    AestheticProfile, MigrationOptions, MismatchStrategy, OutputMode, StyleStrategy,
};
pub use orchestrator::{MigrationOrchestrator, MigrationPhase};
pub use types::{FileCategory, FileInfo, ProjectAnalysis, StyleRecord};
