//! Import path alias resolution.
//!
//! Aliases come from a TypeScript-style config: the nested
//! `compilerOptions.paths` mapping of alias pattern to target path patterns.
//! The mapping is returned verbatim, in config-file order.

use std::fs;
use std::path::Path;

use crate::error::MigrateError;
use crate::logging::MigrationLog;
use crate::types::AliasEntry;

/// Read `tsconfig.json` under `project_root` and extract path aliases.
/// Missing or malformed config yields an empty mapping with a warning;
/// never fatal.
pub fn resolve_aliases(project_root: &Path, log: &MigrationLog) -> Vec<AliasEntry> {
    let tsconfig_path = project_root.join("tsconfig.json");
    let parsed: Result<serde_json::Value, String> = fs::read_to_string(&tsconfig_path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));

    let tsconfig = match parsed {
        Ok(value) => value,
        Err(message) => {
            let err = MigrateError::ConfigParse {
                path: tsconfig_path,
                message,
            };
            log.warn(format!("Alias resolution skipped: {err}"));
            return Vec::new();
        }
    };

    let paths = tsconfig
        .get("compilerOptions")
        .and_then(|opts| opts.get("paths"))
        .and_then(|paths| paths.as_object());

    let Some(paths) = paths else {
        return Vec::new();
    };

    paths
        .iter()
        .map(|(pattern, targets)| {
            let targets = match targets {
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(|t| t.as_str().map(str::to_string))
                    .collect(),
                serde_json::Value::String(single) => vec![single.clone()],
                _ => Vec::new(),
            };
            AliasEntry {
                pattern: pattern.clone(),
                targets,
            }
        })
        .collect()
}

/// Alias pattern with its wildcard suffix stripped: `@/*` -> `@/`.
/// The bare `/*` form collapses to the pattern head.
pub fn strip_wildcard(pattern: &str) -> &str {
    match pattern.find("/*") {
        Some(idx) => &pattern[..idx + 1],
        None => pattern,
    }
}

/// Rewrite a module specifier's prefix through the alias list, in order.
/// Each alias whose stripped pattern prefixes the current value replaces
/// that prefix with its first target's stripped prefix.
pub fn apply_aliases(specifier: &str, aliases: &[AliasEntry]) -> String {
    let mut resolved = specifier.to_string();
    for alias in aliases {
        let pattern = strip_wildcard(&alias.pattern);
        if let Some(rest) = resolved.strip_prefix(pattern) {
            if let Some(target) = alias.targets.first() {
                resolved = format!("{}{}", strip_wildcard(target), rest);
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn alias(pattern: &str, target: &str) -> AliasEntry {
        AliasEntry {
            pattern: pattern.to_string(),
            targets: vec![target.to_string()],
        }
    }

    #[test]
    fn test_strip_wildcard() {
        assert_eq!(strip_wildcard("@/*"), "@/");
        assert_eq!(strip_wildcard("~components/*"), "~components/");
        assert_eq!(strip_wildcard("exact"), "exact");
    }

    #[test]
    fn test_apply_alias() {
        let aliases = vec![alias("@/*", "src/*")];
        assert_eq!(apply_aliases("@/utils/foo", &aliases), "src/utils/foo");
        assert_eq!(apply_aliases("react", &aliases), "react");
    }

    #[test]
    fn test_resolve_from_tsconfig() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r##"{ "compilerOptions": { "paths": { "@/*": ["src/*"], "#lib/*": ["src/lib/*"] } } }"##,
        )
        .unwrap();

        let log = MigrationLog::quiet();
        let aliases = resolve_aliases(dir.path(), &log);
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases[0].pattern, "@/*");
        assert_eq!(aliases[0].targets, vec!["src/*".to_string()]);
    }

    #[test]
    fn test_missing_tsconfig_is_nonfatal() {
        let dir = tempfile::tempdir().unwrap();
        let log = MigrationLog::quiet();
        let aliases = resolve_aliases(dir.path(), &log);
        assert!(aliases.is_empty());
        assert!(log.entries().iter().any(|e| e.contains("[WARN]")));
    }

    #[test]
    fn test_malformed_tsconfig_is_nonfatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{ not json").unwrap();
        let log = MigrationLog::quiet();
        assert!(resolve_aliases(dir.path(), &log).is_empty());
        assert!(log.entries().iter().any(|e| e.contains("[WARN]")));
    }
}
