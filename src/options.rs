//! Migration configuration.
//!
//! `MigrationOptions` is a read-only snapshot built from defaults plus
//! overrides, with one exception: the component rename map, which the
//! conflict resolver fills in during a synchronous pre-pass before the
//! parallel migration fan-out. The map sits behind a mutex so that the
//! check-then-insert is serialized even if a caller bypasses the pre-pass.

use clap::ValueEnum;
use std::collections::HashMap;
use std::sync::Mutex;

/// Extensions treated as UI source when categorizing component/page files.
pub const UI_SOURCE_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".vue"];

/// Extensions handled by the stylesheet pipeline.
pub const STYLE_EXTENSIONS: &[&str] = &[".css", ".scss", ".less"];

/// Extensions that go through AST-based analysis and adaptation.
pub const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StyleStrategy {
    #[default]
    None,
    BasicMapping,
    PrefixStyles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    #[default]
    Migrate,
    Prototype,
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MismatchStrategy {
    Strict,
    #[default]
    Approximate,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AestheticProfile {
    #[default]
    Auto,
    Minimalist,
    Vibrant,
    Custom,
}

#[derive(Debug)]
pub struct MigrationOptions {
    pub component_dirs: Vec<String>,
    pub util_dirs: Vec<String>,
    pub asset_dirs: Vec<String>,
    pub config_dirs: Vec<String>,
    pub ignore_dirs: Vec<String>,
    pub file_extensions: Vec<String>,
    pub dry_run: bool,
    /// Old component name -> disambiguated basename. Written by the conflict
    /// resolver, read by the AST adapter.
    pub component_renames: Mutex<HashMap<String, String>>,
    /// Exact-match import specifier overrides. Take precedence over all other
    /// import rewriting.
    pub import_path_rewrites: HashMap<String, String>,
    pub generate_tests: bool,
    pub style_strategy: StyleStrategy,
    pub style_prefix: String,
    pub output_mode: OutputMode,
    pub prototype_dir: String,
    pub aesthetic_profile: AestheticProfile,
    pub mismatch_strategy: MismatchStrategy,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        MigrationOptions {
            component_dirs: to_strings(&["src/components", "src/pages", "src/views"]),
            util_dirs: to_strings(&["src/utils", "src/helpers", "src/lib"]),
            asset_dirs: to_strings(&["src/assets", "public"]),
            config_dirs: to_strings(&["src/config", "src/constants", "src/services"]),
            ignore_dirs: to_strings(&["node_modules", ".git", "dist", "build", "coverage"]),
            file_extensions: to_strings(&[
                ".js", ".jsx", ".ts", ".tsx", ".vue", ".html", ".css", ".scss", ".less", ".json",
                ".svg", ".png", ".jpg", ".jpeg", ".gif",
            ]),
            dry_run: false,
            component_renames: Mutex::new(HashMap::new()),
            import_path_rewrites: HashMap::new(),
            generate_tests: false,
            style_strategy: StyleStrategy::None,
            style_prefix: "migrated-".to_string(),
            output_mode: OutputMode::Migrate,
            prototype_dir: "prototypes/generated".to_string(),
            aesthetic_profile: AestheticProfile::Auto,
            mismatch_strategy: MismatchStrategy::Approximate,
        }
    }
}

impl MigrationOptions {
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.file_extensions.iter().any(|e| e == ext)
    }

    /// Current rename for a component name, if one has been registered.
    pub fn rename_for(&self, name: &str) -> Option<String> {
        self.component_renames
            .lock()
            .expect("rename map poisoned")
            .get(name)
            .cloned()
    }

    /// Snapshot of the rename map (for the adapter's tag rewriting).
    pub fn renames_snapshot(&self) -> HashMap<String, String> {
        self.component_renames
            .lock()
            .expect("rename map poisoned")
            .clone()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension_set() {
        let options = MigrationOptions::default();
        assert!(options.accepts_extension(".tsx"));
        assert!(options.accepts_extension(".scss"));
        assert!(!options.accepts_extension(".rs"));
    }

    #[test]
    fn test_rename_map_roundtrip() {
        let options = MigrationOptions::default();
        options
            .component_renames
            .lock()
            .unwrap()
            .insert("Header".to_string(), "HeaderB".to_string());
        assert_eq!(options.rename_for("Header"), Some("HeaderB".to_string()));
        assert_eq!(options.rename_for("Footer"), None);
    }
}
