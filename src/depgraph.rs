//! Dependency graph reconstruction from import statements.
//!
//! Static import specifiers are resolved through the owning project's alias
//! list; dynamic imports contribute their literal specifier unresolved.
//! That asymmetry is inherited behavior that downstream consumers may rely
//! on, so it is kept.

use oxc_ast::ast::{Expression, ImportDeclaration, ImportExpression, Program};
use oxc_ast_visit::{walk, Visit};

use crate::aliases::apply_aliases;
use crate::types::AliasEntry;

/// Collect a file's resolved module specifiers, in order of appearance.
pub fn build_dependencies(program: &Program, aliases: &[AliasEntry]) -> Vec<String> {
    let mut collector = DependencyCollector {
        dependencies: Vec::new(),
        aliases,
    };
    collector.visit_program(program);
    collector.dependencies
}

struct DependencyCollector<'al> {
    dependencies: Vec<String>,
    aliases: &'al [AliasEntry],
}

impl<'al, 'a> Visit<'a> for DependencyCollector<'al> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let specifier = decl.source.value.to_string();
        self.dependencies.push(apply_aliases(&specifier, self.aliases));
        walk::walk_import_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        // Dynamic imports bypass alias rewriting.
        if let Expression::StringLiteral(s) = &expr.source {
            self.dependencies.push(s.value.to_string());
        }
        walk::walk_import_expression(self, expr);
    }
}
