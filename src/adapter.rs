//! AST adaptation: rewriting a source file to the target project's
//! conventions before it lands in the target tree.
//!
//! Rewrites are span replacements against the original text, so everything
//! the adapter does not touch keeps its formatting byte-for-byte.

use oxc_allocator::Allocator;
use std::collections::HashMap;

use oxc_ast::ast::{
    Expression, ImportDeclaration, JSXAttribute, JSXAttributeName, JSXAttributeValue,
    JSXElementName, JSXExpression, ObjectPropertyKind, PropertyKey,
};
use oxc_ast_visit::{walk, Visit};

use crate::aliases::strip_wildcard;
use crate::ast::{apply_replacements, parse_program};
use crate::error::{MigrateError, Result};
use crate::framework::Framework;
use crate::logging::MigrationLog;
use crate::options::{AestheticProfile, MigrationOptions};
use crate::paths::{normalize, relative_to, to_slash};
use crate::types::{FileInfo, ProjectAnalysis};

/// Judges whether a style value fits the target aesthetic, and supplies a
/// replacement when it does not. Pluggable; the default accepts everything,
/// so no substitution ever fires.
pub trait AestheticMatcher: Send + Sync {
    fn matches(&self, value: &str, profile: AestheticProfile) -> bool;
    fn substitute(&self, value: &str) -> String;
}

/// Default matcher: every value matches the profile. The substitution value
/// is a fixed neutral gradient, kept for callers that plug in a real
/// predicate but no substitution function.
#[derive(Debug, Default)]
pub struct AcceptAllMatcher;

impl AestheticMatcher for AcceptAllMatcher {
    fn matches(&self, _value: &str, _profile: AestheticProfile) -> bool {
        true
    }

    fn substitute(&self, _value: &str) -> String {
        "linear-gradient(to right, #ccc, #eee)".to_string()
    }
}

pub struct AdaptContext<'c> {
    pub source_file: &'c FileInfo,
    pub target: &'c ProjectAnalysis,
    pub source_project: &'c ProjectAnalysis,
    pub options: &'c MigrationOptions,
    pub matcher: &'c dyn AestheticMatcher,
    pub log: &'c MigrationLog,
}

/// Rewrite one source file's text to the target project's conventions:
/// import specifiers, renamed JSX tags, and background substitutions.
pub fn adapt_source(source: &str, ctx: &AdaptContext) -> Result<String> {
    ctx.log.info(format!(
        "Adapting {} to target conventions",
        ctx.source_file.relative_path
    ));

    bridge_frameworks(ctx);

    let allocator = Allocator::default();
    let program = parse_program(&allocator, source)
        .map_err(|msg| MigrateError::parse(&ctx.source_file.file_path, msg))?;

    let mut visitor = AdaptVisitor {
        replacements: Vec::new(),
        renames: ctx.options.renames_snapshot(),
        source,
        ctx,
    };
    visitor.visit_program(&program);

    Ok(apply_replacements(source, visitor.replacements))
}

/// Extension point for cross-framework conversion. No structural conversion
/// is performed for any known pair today.
fn bridge_frameworks(ctx: &AdaptContext) {
    let (source_fw, target_fw) = (ctx.source_project.framework, ctx.target.framework);
    if source_fw != target_fw
        && source_fw == Some(Framework::Vue)
        && target_fw == Some(Framework::React)
    {
        ctx.log.info(format!(
            "Attempting to bridge Vue component to React: {}",
            ctx.source_file.relative_path
        ));
    }
}

struct AdaptVisitor<'c, 's> {
    replacements: Vec<(u32, u32, String)>,
    renames: HashMap<String, String>,
    source: &'s str,
    ctx: &'c AdaptContext<'c>,
}

impl<'c, 's> AdaptVisitor<'c, 's> {
    /// Replace a string literal's contents, keeping its original quote
    /// character. The span covers the quotes.
    fn replace_string_literal(&mut self, span: oxc_span::Span, new_value: &str) {
        let quote = self
            .source
            .as_bytes()
            .get(span.start as usize)
            .copied()
            .unwrap_or(b'\'') as char;
        self.replacements
            .push((span.start, span.end, format!("{quote}{new_value}{quote}")));
    }

    fn rewrite_import_specifier(&self, specifier: &str) -> Option<String> {
        // Explicit overrides take precedence over all other rewriting.
        if let Some(mapped) = self.ctx.options.import_path_rewrites.get(specifier) {
            return Some(mapped.clone());
        }

        if !specifier.starts_with("./") && !specifier.starts_with("../") {
            return None;
        }

        // Re-express the relative import against the target's source root,
        // through the target's first alias.
        let alias = self.ctx.target.aliases.first()?;
        let source_dir = self.ctx.source_file.file_path.parent()?;
        let absolute = normalize(&source_dir.join(specifier));
        let target_src = self.ctx.target.root_path.join("src");
        let relative = relative_to(&target_src, &absolute);
        Some(format!(
            "{}{}",
            strip_wildcard(&alias.pattern),
            to_slash(&relative)
        ))
    }
}

impl<'c, 's, 'a> Visit<'a> for AdaptVisitor<'c, 's> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let specifier = decl.source.value.as_str();
        if let Some(new_specifier) = self.rewrite_import_specifier(specifier) {
            if new_specifier != specifier {
                self.replace_string_literal(decl.source.span, &new_specifier);
            }
        }
        walk::walk_import_declaration(self, decl);
    }

    fn visit_jsx_element_name(&mut self, name: &JSXElementName<'a>) {
        match name {
            JSXElementName::Identifier(id) => {
                if let Some(new_name) = self.renames.get(id.name.as_str()) {
                    self.replacements
                        .push((id.span.start, id.span.end, new_name.clone()));
                }
            }
            JSXElementName::IdentifierReference(id) => {
                if let Some(new_name) = self.renames.get(id.name.as_str()) {
                    self.replacements
                        .push((id.span.start, id.span.end, new_name.clone()));
                }
            }
            _ => {}
        }
        walk::walk_jsx_element_name(self, name);
    }

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
                            if key != "background" {
                                continue;
                            }
                            let Expression::StringLiteral(value) = &prop.value else {
                                continue;
                            };
                            let profile = self.ctx.options.aesthetic_profile;
                            if !self.ctx.matcher.matches(value.value.as_str(), profile) {
                                let substituted =
                                    self.ctx.matcher.substitute(value.value.as_str());
                                self.replace_string_literal(value.span, &substituted);
                                self.ctx.log.info(format!(
                                    "Substituted background in {}: {} -> {}",
                                    self.ctx.source_file.relative_path,
                                    value.value.as_str(),
                                    substituted
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
    use crate::types::{AliasEntry, FileCategory};
    use std::path::PathBuf;

    fn file_info(path: &str, rel: &str) -> FileInfo {
        FileInfo {
            file_path: PathBuf::from(path),
            relative_path: rel.to_string(),
            file_name: rel.rsplit('/').next().unwrap().to_string(),
            extension: ".jsx".to_string(),
            category: FileCategory::Component,
            component_name: None,
        }
    }

    fn target_analysis(root: &str, aliases: Vec<AliasEntry>) -> ProjectAnalysis {
        ProjectAnalysis {
            root_path: PathBuf::from(root),
            framework: Some(Framework::React),
            aliases,
            ..ProjectAnalysis::default()
        }
    }

    fn adapt(
        source: &str,
        file: &FileInfo,
        target: &ProjectAnalysis,
        options: &MigrationOptions,
    ) -> String {
        let source_project = ProjectAnalysis {
            framework: Some(Framework::React),
            ..ProjectAnalysis::default()
        };
        let log = MigrationLog::quiet();
        let ctx = AdaptContext {
            source_file: file,
            target,
            source_project: &source_project,
            options,
            matcher: &AcceptAllMatcher,
            log: &log,
        };
        adapt_source(source, &ctx).unwrap()
    }

    #[test]
    fn test_import_override_takes_precedence() {
        let file = file_info("/proj/src/components/Foo.jsx", "src/components/Foo.jsx");
        let target = target_analysis(
            "/proj",
            vec![AliasEntry {
                pattern: "@/*".to_string(),
                targets: vec!["src/*".to_string()],
            }],
        );
        let mut options = MigrationOptions::default();
        options
            .import_path_rewrites
            .insert("old-lib".to_string(), "new-lib".to_string());

        let out = adapt("import x from 'old-lib';", &file, &target, &options);
        assert_eq!(out, "import x from 'new-lib';");
    }

    #[test]
    fn test_relative_import_rewritten_through_alias() {
        let file = file_info("/proj/src/components/Foo.jsx", "src/components/Foo.jsx");
        let target = target_analysis(
            "/proj",
            vec![AliasEntry {
                pattern: "@/*".to_string(),
                targets: vec!["src/*".to_string()],
            }],
        );
        let options = MigrationOptions::default();

        let out = adapt("import Button from './Button';", &file, &target, &options);
        assert_eq!(out, "import Button from '@/components/Button';");

        let out = adapt("import util from '../utils/math';", &file, &target, &options);
        assert_eq!(out, "import util from '@/utils/math';");
    }

    #[test]
    fn test_relative_import_without_target_alias_unchanged() {
        let file = file_info("/proj/src/components/Foo.jsx", "src/components/Foo.jsx");
        let target = target_analysis("/proj", Vec::new());
        let options = MigrationOptions::default();

        let source = "import Button from './Button';";
        assert_eq!(adapt(source, &file, &target, &options), source);
    }

    #[test]
    fn test_bare_specifier_unchanged() {
        let file = file_info("/proj/src/components/Foo.jsx", "src/components/Foo.jsx");
        let target = target_analysis(
            "/proj",
            vec![AliasEntry {
                pattern: "@/*".to_string(),
                targets: vec!["src/*".to_string()],
            }],
        );
        let options = MigrationOptions::default();
        let source = "import React from 'react';";
        assert_eq!(adapt(source, &file, &target, &options), source);
    }

    #[test]
    fn test_jsx_tag_rename_open_and_close() {
        let file = file_info("/proj/src/components/App.jsx", "src/components/App.jsx");
        let target = target_analysis("/proj", Vec::new());
        let options = MigrationOptions::default();
        options
            .component_renames
            .lock()
            .unwrap()
            .insert("Header".to_string(), "HeaderB".to_string());

        let source = "const App = () => <Header title=\"x\"><Header /></Header>;";
        let out = adapt(source, &file, &target, &options);
        assert_eq!(
            out,
            "const App = () => <HeaderB title=\"x\"><HeaderB /></HeaderB>;"
        );
    }

    #[test]
    fn test_background_substitution_with_rejecting_matcher() {
        struct RejectAll;
        impl AestheticMatcher for RejectAll {
            fn matches(&self, _value: &str, _profile: AestheticProfile) -> bool {
                false
            }
            fn substitute(&self, _value: &str) -> String {
                "linear-gradient(to right, #ccc, #eee)".to_string()
            }
        }

        let file = file_info("/proj/src/components/App.jsx", "src/components/App.jsx");
        let target = target_analysis("/proj", Vec::new());
        let source_project = ProjectAnalysis::default();
        let options = MigrationOptions::default();
        let log = MigrationLog::quiet();
        let ctx = AdaptContext {
            source_file: &file,
            target: &target,
            source_project: &source_project,
            options: &options,
            matcher: &RejectAll,
            log: &log,
        };

        let source = "const App = () => <div style={{ background: '#123456' }} />;";
        let out = adapt_source(source, &ctx).unwrap();
        assert_eq!(
            out,
            "const App = () => <div style={{ background: 'linear-gradient(to right, #ccc, #eee)' }} />;"
        );
        assert!(log
            .entries()
            .iter()
            .any(|e| e.contains("Substituted background")));
    }

    #[test]
    fn test_default_matcher_never_substitutes() {
        let file = file_info("/proj/src/components/App.jsx", "src/components/App.jsx");
        let target = target_analysis("/proj", Vec::new());
        let options = MigrationOptions::default();
        let source = "const App = () => <div style={{ background: 'hotpink' }} />;";
        assert_eq!(adapt(source, &file, &target, &options), source);
    }

    #[test]
    fn test_parse_error_propagates() {
        let file = file_info("/proj/src/components/App.jsx", "src/components/App.jsx");
        let target = target_analysis("/proj", Vec::new());
        let source_project = ProjectAnalysis::default();
        let options = MigrationOptions::default();
        let log = MigrationLog::quiet();
        let ctx = AdaptContext {
            source_file: &file,
            target: &target,
            source_project: &source_project,
            options: &options,
            matcher: &AcceptAllMatcher,
            log: &log,
        };
        assert!(matches!(
            adapt_source("const = broken {", &ctx),
            Err(MigrateError::Parse { .. })
        ));
    }
}
