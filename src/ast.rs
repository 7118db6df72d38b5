//! Shared oxc parsing and span-rewrite plumbing.
//!
//! All rewrites in this crate are expressed as `(start, end, replacement)`
//! byte spans against the original source and applied back-to-front, which
//! keeps untouched formatting byte-identical.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Parse JS/TS/JSX source into a program. Module + TypeScript + JSX are
/// always enabled so that one grammar covers the whole accepted extension
/// set.
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a str,
) -> Result<Program<'a>, String> {
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true);
    let ret = Parser::new(allocator, source, source_type).parse();
    if let Some(first) = ret.errors.first() {
        return Err(format!(
            "{} parse error(s), first: {:?}",
            ret.errors.len(),
            first
        ));
    }
    Ok(ret.program)
}

/// Apply span replacements to the source, last-to-first so earlier spans
/// stay valid.
pub fn apply_replacements(source: &str, mut replacements: Vec<(u32, u32, String)>) -> String {
    replacements.sort_by(|a, b| b.0.cmp(&a.0));
    let mut result = source.to_string();
    for (start, end, replacement) in replacements {
        result.replace_range(start as usize..end as usize, &replacement);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsx() {
        let allocator = Allocator::default();
        let program = parse_program(
            &allocator,
            "const App = () => <div style={{ color: 'red' }} />;",
        )
        .unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_error_reported() {
        let allocator = Allocator::default();
        assert!(parse_program(&allocator, "const = ;;;").is_err());
    }

    #[test]
    fn test_apply_replacements_reverse_order() {
        let out = apply_replacements(
            "abc def ghi",
            vec![(0, 3, "X".to_string()), (8, 11, "Y".to_string())],
        );
        assert_eq!(out, "X def Y");
    }
}
