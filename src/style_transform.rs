//! Stylesheet and inline-style transformation strategies.
//!
//! All strategies rewrite via recorded byte spans, so untouched source is
//! preserved byte-for-byte. `basic-mapping` currently maps every source
//! color to itself; the traversal, logging and rewrite path are live so a
//! real palette map drops in without structural changes.

use std::collections::{BTreeMap, BTreeSet};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Expression, JSXAttribute, JSXAttributeName, JSXAttributeValue, JSXExpression,
    ObjectPropertyKind, PropertyKey,
};
use oxc_ast_visit::{walk, Visit};

use crate::ast::{apply_replacements, parse_program};
use crate::css::{contains_color_literal, is_color_property, parse_rules, StyleSyntax};
use crate::error::{MigrateError, Result};
use crate::logging::MigrationLog;
use crate::options::{MigrationOptions, StyleStrategy};
use crate::types::FileInfo;

/// Transform one stylesheet according to the configured strategy. Parse
/// failures are transformation errors; the caller decides whether the file
/// is skipped or the batch aborts.
pub fn transform_stylesheet(
    source: &str,
    file: &FileInfo,
    source_colors: &BTreeSet<String>,
    options: &MigrationOptions,
    log: &MigrationLog,
) -> Result<String> {
    match options.style_strategy {
        StyleStrategy::None => Ok(source.to_string()),
        StyleStrategy::BasicMapping => {
            apply_basic_mapping(source, file, source_colors, log)
        }
        StyleStrategy::PrefixStyles => {
            apply_selector_prefix(source, file, &options.style_prefix, log)
        }
    }
}

fn syntax_for(file: &FileInfo) -> Result<StyleSyntax> {
    StyleSyntax::from_extension(&file.extension).ok_or_else(|| {
        MigrateError::transform(
            &file.file_path,
            format!("not a stylesheet extension: {}", file.extension),
        )
    })
}

fn apply_basic_mapping(
    source: &str,
    file: &FileInfo,
    source_colors: &BTreeSet<String>,
    log: &MigrationLog,
) -> Result<String> {
    let syntax = syntax_for(file)?;
    let rules = parse_rules(source, syntax)
        .map_err(|msg| MigrateError::transform(&file.file_path, msg))?;

    // Identity palette until a real cross-project mapping exists.
    let color_map: BTreeMap<&String, &String> =
        source_colors.iter().map(|c| (c, c)).collect();

    let mut replacements = Vec::new();
    for rule in &rules {
        for decl in &rule.declarations {
            if !is_color_property(&decl.property) || !contains_color_literal(&decl.value) {
                continue;
            }
            if let Some(mapped) = color_map.get(&decl.value) {
                replacements.push((
                    decl.value_span.0 as u32,
                    decl.value_span.1 as u32,
                    (*mapped).clone(),
                ));
            }
        }
    }

    log.info(format!(
        "Applied basic color mapping to {}",
        file.relative_path
    ));
    Ok(apply_replacements(source, replacements))
}

fn apply_selector_prefix(
    source: &str,
    file: &FileInfo,
    prefix: &str,
    log: &MigrationLog,
) -> Result<String> {
    let syntax = syntax_for(file)?;
    let rules = parse_rules(source, syntax)
        .map_err(|msg| MigrateError::transform(&file.file_path, msg))?;

    let mut replacements = Vec::new();
    for rule in &rules {
        if rule.is_at_rule || rule.selector.is_empty() {
            continue;
        }
        let prefixed = rule
            .selector
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| format!("{prefix}{part}"))
            .collect::<Vec<_>>()
            .join(", ");
        replacements.push((
            rule.selector_span.0 as u32,
            rule.selector_span.1 as u32,
            prefixed,
        ));
    }

    log.info(format!(
        "Prefixed selectors in {} with '{}'",
        file.relative_path, prefix
    ));
    Ok(apply_replacements(source, replacements))
}

/// Check inline style colors in a script file against the target palette.
/// Observations are logged; the source is returned unchanged.
pub fn transform_inline_styles(
    source: &str,
    file: &FileInfo,
    target_colors: &BTreeSet<String>,
    source_colors: &BTreeSet<String>,
    options: &MigrationOptions,
    log: &MigrationLog,
) -> Result<String> {
    if options.style_strategy == StyleStrategy::None {
        return Ok(source.to_string());
    }

    let allocator = Allocator::default();
    let program = parse_program(&allocator, source)
        .map_err(|msg| MigrateError::transform(&file.file_path, msg))?;

    let mut checker = InlineStyleChecker {
        file,
        target_colors,
        source_colors,
        log,
    };
    checker.visit_program(&program);

    Ok(source.to_string())
}

struct InlineStyleChecker<'c> {
    file: &'c FileInfo,
    target_colors: &'c BTreeSet<String>,
    source_colors: &'c BTreeSet<String>,
    log: &'c MigrationLog,
}

impl<'c, 'a> Visit<'a> for InlineStyleChecker<'c> {
    fn visit_jsx_attribute(&mut self, attr: &JSXAttribute<'a>) {
        if let JSXAttributeName::Identifier(name) = &attr.name {
            if name.name == "style" {
                if let Some(JSXAttributeValue::ExpressionContainer(container)) = &attr.value {
                    if let JSXExpression::ObjectExpression(obj) = &container.expression {
                        for prop in &obj.properties {
                            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                                continue;
                            };
                            let key = match &prop.key {
                                PropertyKey::StaticIdentifier(id) => id.name.as_str(),
                                PropertyKey::StringLiteral(s) => s.value.as_str(),
                                _ => continue,
                            };
                            if !is_color_property(&key.to_lowercase()) {
                                continue;
                            }
                            let Expression::StringLiteral(value) = &prop.value else {
                                continue;
                            };
                            let color = value.value.as_str();
                            if self.source_colors.contains(color)
                                && !self.target_colors.contains(color)
                            {
                                self.log.info(format!(
                                    "Inline style color '{}' in {} not present in target palette. Keeping as is.",
                                    color, self.file.relative_path
                                ));
                            }
                        }
                    }
                }
            }
        }
        walk::walk_jsx_attribute(self, attr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileCategory;
    use std::path::PathBuf;

    fn style_file(name: &str, ext: &str) -> FileInfo {
        FileInfo {
            file_path: PathBuf::from(format!("/b/src/styles/{name}")),
            relative_path: format!("src/styles/{name}"),
            file_name: name.to_string(),
            extension: ext.to_string(),
            category: FileCategory::Style,
            component_name: None,
        }
    }

    fn script_file(name: &str) -> FileInfo {
        FileInfo {
            file_path: PathBuf::from(format!("/b/src/components/{name}")),
            relative_path: format!("src/components/{name}"),
            file_name: name.to_string(),
            extension: ".jsx".to_string(),
            category: FileCategory::Component,
            component_name: None,
        }
    }

    #[test]
    fn test_none_strategy_passthrough() {
        let options = MigrationOptions::default();
        let log = MigrationLog::quiet();
        let file = style_file("main.css", ".css");
        let source = ".a { color: #fff; }";
        let out =
            transform_stylesheet(source, &file, &BTreeSet::new(), &options, &log).unwrap();
        assert_eq!(out, source);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_basic_mapping_preserves_content() {
        let mut options = MigrationOptions::default();
        options.style_strategy = StyleStrategy::BasicMapping;
        let log = MigrationLog::quiet();
        let file = style_file("main.css", ".css");
        let source = ".a {\n  color: #fff;\n  padding: 4px;\n}\n";
        let colors: BTreeSet<String> = ["#fff".to_string()].into_iter().collect();
        let out = transform_stylesheet(source, &file, &colors, &options, &log).unwrap();
        assert_eq!(out, source);
        assert!(log
            .entries()
            .iter()
            .any(|e| e.contains("Applied basic color mapping")));
    }

    #[test]
    fn test_prefix_strategy_splits_selector_groups() {
        let mut options = MigrationOptions::default();
        options.style_strategy = StyleStrategy::PrefixStyles;
        let log = MigrationLog::quiet();
        let file = style_file("card.css", ".css");
        let source = ".card, .card--active { color: red; }";
        let out = transform_stylesheet(source, &file, &BTreeSet::new(), &options, &log).unwrap();
        assert_eq!(
            out,
            "migrated-.card, migrated-.card--active { color: red; }"
        );
    }

    #[test]
    fn test_prefix_skips_at_rules() {
        let mut options = MigrationOptions::default();
        options.style_strategy = StyleStrategy::PrefixStyles;
        let log = MigrationLog::quiet();
        let file = style_file("media.css", ".css");
        let source = "@media (max-width: 600px) { .a { color: red; } }";
        let out = transform_stylesheet(source, &file, &BTreeSet::new(), &options, &log).unwrap();
        assert_eq!(
            out,
            "@media (max-width: 600px) { migrated-.a { color: red; } }"
        );
    }

    #[test]
    fn test_malformed_stylesheet_is_transform_error() {
        let mut options = MigrationOptions::default();
        options.style_strategy = StyleStrategy::PrefixStyles;
        let log = MigrationLog::quiet();
        let file = style_file("broken.css", ".css");
        let result =
            transform_stylesheet(".a { color: red;", &file, &BTreeSet::new(), &options, &log);
        assert!(matches!(result, Err(MigrateError::Transform { .. })));
    }

    #[test]
    fn test_inline_check_logs_without_mutating() {
        let mut options = MigrationOptions::default();
        options.style_strategy = StyleStrategy::BasicMapping;
        let log = MigrationLog::quiet();
        let file = script_file("Banner.jsx");
        let source = "const B = () => <div style={{ color: '#123456' }} />;";
        let source_colors: BTreeSet<String> = ["#123456".to_string()].into_iter().collect();
        let out = transform_inline_styles(
            source,
            &file,
            &BTreeSet::new(),
            &source_colors,
            &options,
            &log,
        )
        .unwrap();
        assert_eq!(out, source);
        assert!(log
            .entries()
            .iter()
            .any(|e| e.contains("Inline style color '#123456'")));
    }

    #[test]
    fn test_inline_check_quiet_when_color_shared() {
        let mut options = MigrationOptions::default();
        options.style_strategy = StyleStrategy::BasicMapping;
        let log = MigrationLog::quiet();
        let file = script_file("Banner.jsx");
        let source = "const B = () => <div style={{ color: '#123456' }} />;";
        let shared: BTreeSet<String> = ["#123456".to_string()].into_iter().collect();
        transform_inline_styles(source, &file, &shared, &shared, &options, &log).unwrap();
        assert!(log.entries().is_empty());
    }
}
