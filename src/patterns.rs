//! Architectural pattern recognition.
//!
//! Coarse import-based heuristics: a known state-management package flags
//! the redux pattern; context-flavored import specifiers in a React project
//! flag context-provider usage. False positives on unrelated specifiers
//! containing "context" are expected and acceptable.

use oxc_ast::ast::{ImportDeclaration, Program};
use oxc_ast_visit::{walk, Visit};

use crate::framework::Framework;
use crate::types::ArchitecturalPatterns;

const STATE_MANAGEMENT_PACKAGE: &str = "react-redux";

/// Scan one file's imports, accumulating into the project's pattern record.
pub fn recognize_patterns(
    program: &Program,
    file_name: &str,
    framework: Option<Framework>,
    patterns: &mut ArchitecturalPatterns,
) {
    let mut recognizer = PatternRecognizer {
        patterns,
        file_name,
        is_react: framework == Some(Framework::React),
    };
    recognizer.visit_program(program);
}

struct PatternRecognizer<'p> {
    patterns: &'p mut ArchitecturalPatterns,
    file_name: &'p str,
    is_react: bool,
}

impl<'p, 'a> Visit<'a> for PatternRecognizer<'p> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let specifier = decl.source.value.as_str();
        if specifier == STATE_MANAGEMENT_PACKAGE {
            self.patterns.redux = true;
        }
        if specifier.contains("context") && self.is_react {
            self.patterns.context_api.push(self.file_name.to_string());
        }
        walk::walk_import_declaration(self, decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;
    use oxc_allocator::Allocator;

    fn recognize(source: &str, framework: Option<Framework>) -> ArchitecturalPatterns {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source).unwrap();
        let mut patterns = ArchitecturalPatterns::default();
        recognize_patterns(&program, "file.jsx", framework, &mut patterns);
        patterns
    }

    #[test]
    fn test_redux_detection() {
        let patterns = recognize(
            "import { useSelector } from 'react-redux';",
            Some(Framework::React),
        );
        assert!(patterns.redux);
    }

    #[test]
    fn test_context_requires_react() {
        let source = "import { ThemeContext } from './context/theme';";
        let react = recognize(source, Some(Framework::React));
        assert_eq!(react.context_api, vec!["file.jsx".to_string()]);

        let vue = recognize(source, Some(Framework::Vue));
        assert!(vue.context_api.is_empty());
    }

    #[test]
    fn test_unrelated_imports_ignored() {
        let patterns = recognize("import axios from 'axios';", Some(Framework::React));
        assert!(!patterns.redux);
        assert!(patterns.context_api.is_empty());
    }
}
