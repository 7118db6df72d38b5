//! Semantic analysis of parsed source files.
//!
//! Classifies file role (component vs. other), detects framework hook
//! usage, and collects inline style literals from JSX attributes.

use oxc_ast::ast::{
    CallExpression, Declaration, Expression, ExportDefaultDeclarationKind, JSXAttribute,
    JSXAttributeName, JSXAttributeValue, JSXExpression, ObjectExpression, ObjectPropertyKind,
    Program, PropertyKey, Statement,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::GetSpan;

use crate::framework::Framework;
use crate::types::{FileRole, SemanticInsights};

/// Analyze one parsed module. The caller writes the result into the owning
/// project's semantic-context map, keyed by relative path.
pub fn analyze_program(
    program: &Program,
    source: &str,
    framework: Option<Framework>,
) -> SemanticInsights {
    let mut insights = SemanticInsights::default();

    // A top-level function declaration with an uppercase identifier marks
    // the file as a component.
    for stmt in &program.body {
        let func = match stmt {
            Statement::FunctionDeclaration(func) => Some(func),
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::FunctionDeclaration(func)) => Some(func),
                _ => None,
            },
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => Some(func),
                _ => None,
            },
            _ => None,
        };
        if let Some(func) = func {
            if let Some(id) = &func.id {
                if id.name.chars().next().is_some_and(|c| c.is_uppercase()) {
                    insights.role = FileRole::Component;
                    insights.exported_entities.push(id.name.to_string());
                }
            }
        }
    }

    let mut collector = InsightCollector {
        insights: &mut insights,
        source,
        hooks_supported: framework == Some(Framework::React),
    };
    collector.visit_program(program);

    insights
}

struct InsightCollector<'i, 's> {
    insights: &'i mut SemanticInsights,
    source: &'s str,
    hooks_supported: bool,
}

impl<'i, 's, 'a> Visit<'a> for InsightCollector<'i, 's> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if self.hooks_supported {
            if let Expression::Identifier(ident) = &call.callee {
                if ident.name.starts_with("use") {
                    self.insights.uses_hooks = true;
                    self.insights.data_flow.push(format!("Hook: {}", ident.name));
                }
            }
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_jsx_attribute(&mut self, attr: &JSXAttribute<'a>) {
        if let JSXAttributeName::Identifier(name) = &attr.name {
            if name.name == "style" {
                if let Some(JSXAttributeValue::ExpressionContainer(container)) = &attr.value {
                    if let JSXExpression::ObjectExpression(obj) = &container.expression {
                        self.insights
                            .inline_styles
                            .push(serialize_style_object(obj, self.source));
                    }
                }
            }
        }
        walk::walk_jsx_attribute(self, attr);
    }
}

/// Render `{ color: 'red', margin: 4 }` as `color: red; margin: 4`.
fn serialize_style_object(obj: &ObjectExpression, source: &str) -> String {
    let mut pairs = Vec::new();
    for prop in &obj.properties {
        if let ObjectPropertyKind::ObjectProperty(prop) = prop {
            let key = match &prop.key {
                PropertyKey::StaticIdentifier(id) => id.name.to_string(),
                PropertyKey::StringLiteral(s) => s.value.to_string(),
                other => source[other.span().start as usize..other.span().end as usize].to_string(),
            };
            let value = match &prop.value {
                Expression::StringLiteral(s) => s.value.to_string(),
                other => source[other.span().start as usize..other.span().end as usize].to_string(),
            };
            pairs.push(format!("{key}: {value}"));
        }
    }
    pairs.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;
    use oxc_allocator::Allocator;

    fn analyze(source: &str, framework: Option<Framework>) -> SemanticInsights {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source).unwrap();
        analyze_program(&program, source, framework)
    }

    #[test]
    fn test_uppercase_function_marks_component() {
        let insights = analyze("function Header() { return null; }", Some(Framework::React));
        assert_eq!(insights.role, FileRole::Component);
        assert_eq!(insights.exported_entities, vec!["Header".to_string()]);
    }

    #[test]
    fn test_exported_component_detected() {
        let insights = analyze(
            "export default function App() { return null; }",
            Some(Framework::React),
        );
        assert_eq!(insights.role, FileRole::Component);
    }

    #[test]
    fn test_lowercase_function_is_not_component() {
        let insights = analyze("function helper() {}", Some(Framework::React));
        assert_eq!(insights.role, FileRole::Unknown);
        assert!(insights.exported_entities.is_empty());
    }

    #[test]
    fn test_hooks_detected_for_react_only() {
        let source = "function Counter() { const [n, setN] = useState(0); useEffect(() => {}); }";
        let react = analyze(source, Some(Framework::React));
        assert!(react.uses_hooks);
        assert_eq!(
            react.data_flow,
            vec!["Hook: useState".to_string(), "Hook: useEffect".to_string()]
        );

        let vue = analyze(source, Some(Framework::Vue));
        assert!(!vue.uses_hooks);
        assert!(vue.data_flow.is_empty());
    }

    #[test]
    fn test_inline_style_serialization() {
        let source = r#"const x = <div style={{ color: 'red', "font-size": '12px' }} />;"#;
        let insights = analyze(source, Some(Framework::React));
        assert_eq!(insights.inline_styles, vec!["color: red; font-size: 12px".to_string()]);
    }
}
