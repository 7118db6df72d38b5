//! CSS-family parsing and style extraction.
//!
//! One parse function over a closed syntax variant (`Css`, `Scss`, `Less`)
//! instead of swapping grammars at the call site. The parser is a lenient,
//! comment- and string-aware block scanner: it records the byte spans of
//! selectors and declaration values so that transformation strategies can
//! rewrite them in place without reformatting the rest of the file.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::StyleRecord;

lazy_static! {
    /// Properties that may carry color literals.
    static ref COLOR_PROPERTY_RE: Regex = Regex::new(r"(color|background|border)").unwrap();

    /// Recognized color literal grammar: hex, rgb(), rgba(), hsl(), hsla().
    static ref COLOR_VALUE_RE: Regex = Regex::new(
        r"#([a-fA-F0-9]{3}){1,2}|rgb\(\d+,\d+,\d+\)|rgba\(\d+,\d+,\d+,[0-9.]+\)|hsl\(\d+,\d+%,\d+%\)|hsla\(\d+,\d+%,\d+%,[0-9.]+\)"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSyntax {
    Css,
    Scss,
    Less,
}

impl StyleSyntax {
    /// Syntax variant for a file extension (with leading dot, lowercase).
    pub fn from_extension(ext: &str) -> Option<StyleSyntax> {
        match ext {
            ".css" => Some(StyleSyntax::Css),
            ".scss" => Some(StyleSyntax::Scss),
            ".less" => Some(StyleSyntax::Less),
            _ => None,
        }
    }

    /// Sass-like supersets allow `//` line comments.
    fn line_comments(self) -> bool {
        !matches!(self, StyleSyntax::Css)
    }
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    /// Byte span of the trimmed value in the original source.
    pub value_span: (usize, usize),
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub selector: String,
    /// Byte span of the trimmed selector prelude in the original source.
    pub selector_span: (usize, usize),
    pub declarations: Vec<Declaration>,
    /// Prelude starts with `@` (media query, font-face, keyframes, ...).
    pub is_at_rule: bool,
}

/// Parse a stylesheet into a flat rule list (nested rules included, in
/// document order). Errors on unbalanced braces.
pub fn parse_rules(source: &str, syntax: StyleSyntax) -> Result<Vec<Rule>, String> {
    let mut rules = Vec::new();
    let mut scanner = Scanner {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        syntax,
    };
    scanner.scan_block(&mut rules, None, 0)?;
    Ok(rules)
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    syntax: StyleSyntax,
}

impl<'a> Scanner<'a> {
    /// Scan the body of one block (or the whole sheet when `depth == 0`).
    /// Declarations land on `current_rule`; nested rules append to `rules`.
    fn scan_block(
        &mut self,
        rules: &mut Vec<Rule>,
        current_rule: Option<usize>,
        depth: usize,
    ) -> Result<(), String> {
        let mut chunk_start = self.pos;
        let mut paren_depth = 0usize;

        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment()?,
                b'/' if self.peek(1) == Some(b'/') && self.syntax.line_comments() => {
                    self.skip_line_comment()
                }
                b'"' | b'\'' => self.skip_string()?,
                b'(' => {
                    paren_depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'{' => {
                    let (selector, span) = self.trimmed(chunk_start, self.pos);
                    let is_at_rule = selector.starts_with('@');
                    rules.push(Rule {
                        selector,
                        selector_span: span,
                        declarations: Vec::new(),
                        is_at_rule,
                    });
                    let rule_idx = rules.len() - 1;
                    self.pos += 1;
                    self.scan_block(rules, Some(rule_idx), depth + 1)?;
                    chunk_start = self.pos;
                }
                b'}' => {
                    if depth == 0 {
                        return Err(format!("unexpected '}}' at byte {}", self.pos));
                    }
                    self.push_declaration(rules, current_rule, chunk_start, self.pos);
                    self.pos += 1;
                    return Ok(());
                }
                b';' if paren_depth == 0 => {
                    self.push_declaration(rules, current_rule, chunk_start, self.pos);
                    self.pos += 1;
                    chunk_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }

        if depth > 0 {
            return Err("unbalanced braces: unexpected end of input".to_string());
        }
        Ok(())
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn skip_block_comment(&mut self) -> Result<(), String> {
        let start = self.pos;
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.peek(1) == Some(b'/') {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(format!("unterminated comment at byte {start}"))
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_string(&mut self) -> Result<(), String> {
        let quote = self.bytes[self.pos];
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(format!("unterminated string at byte {start}"))
    }

    /// Trimmed slice of `[start, end)` plus the byte span of the trimmed text.
    fn trimmed(&self, start: usize, end: usize) -> (String, (usize, usize)) {
        let raw = &self.source[start..end];
        let trimmed = raw.trim();
        let lead = raw.len() - raw.trim_start().len();
        let span = (start + lead, start + lead + trimmed.len());
        (trimmed.to_string(), span)
    }

    fn push_declaration(
        &self,
        rules: &mut Vec<Rule>,
        current_rule: Option<usize>,
        start: usize,
        end: usize,
    ) {
        let Some(rule_idx) = current_rule else {
            return;
        };
        let raw = self.source[start..end].trim();
        if raw.is_empty() {
            return;
        }
        let Some(colon) = raw.find(':') else {
            return;
        };
        let property = raw[..colon].trim().to_string();
        if property.is_empty() {
            return;
        }

        // Span of the trimmed value within the original source.
        let raw_start = start + (self.source[start..end].len()
            - self.source[start..end].trim_start().len());
        let value_raw = &raw[colon + 1..];
        let lead = value_raw.len() - value_raw.trim_start().len();
        let value = value_raw.trim().to_string();
        let value_start = raw_start + colon + 1 + lead;
        rules[rule_idx].declarations.push(Declaration {
            value_span: (value_start, value_start + value.len()),
            property,
            value,
        });
    }
}

/// True when the property name may carry a color literal.
pub fn is_color_property(property: &str) -> bool {
    COLOR_PROPERTY_RE.is_match(property)
}

/// True when the value contains a recognized color literal.
pub fn contains_color_literal(value: &str) -> bool {
    COLOR_VALUE_RE.is_match(value)
}

/// Extract a style record from stylesheet source. Parse errors propagate so
/// the caller can log them and fall back to an empty record.
pub fn extract_style_record(source: &str, syntax: StyleSyntax) -> Result<StyleRecord, String> {
    let rules = parse_rules(source, syntax)?;
    let mut record = StyleRecord::default();

    for rule in &rules {
        if !rule.is_at_rule {
            record.selectors.insert(rule.selector.clone());
        }
        for decl in &rule.declarations {
            if is_color_property(&decl.property) && contains_color_literal(&decl.value) {
                record.colors.insert(decl.value.clone());
            }
            if decl.property == "font-family" {
                for font in decl.value.split(',') {
                    let font = font.trim().replace(['\'', '"'], "");
                    if !font.is_empty() {
                        record.font_families.insert(font);
                    }
                }
            }
            if decl.property == "font-size" {
                record.font_sizes.insert(decl.value.clone());
            }
            record
                .properties
                .entry(decl.property.clone())
                .or_default()
                .insert(decl.value.clone());
        }
    }

    Ok(record)
}
