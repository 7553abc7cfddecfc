//! Scanner for the `wp-config.php` constant-definition subset.
//!
//! The source format is declarative PHP: `define('KEY', <literal>);` calls,
//! a `$table_prefix` assignment, and a trailing `require_once` bootstrap
//! line. The scanner extracts those into a [`RawSource`] table without
//! evaluating anything. Guard constructs such as
//! `if (!defined('ABSPATH')) { ... }` are scanned through, not interpreted.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConfigError, Result};

/// A single recognized literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A quoted string literal.
    Str(String),
    /// A bare `true` / `false` literal.
    Bool(bool),
    /// A `__DIR__ . '<suffix>'` expression, relative to the source file.
    DirRelative(String),
}

/// The raw key/value table scanned from a configuration source.
///
/// Unrecognized `define()` names are retained here so the loader can ignore
/// them; nothing is dropped at scan time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSource {
    /// All `define()` constants in the source, by canonical name.
    pub defines: BTreeMap<String, RawValue>,
    /// The `$table_prefix` assignment, if present.
    pub table_prefix: Option<String>,
    /// The `require_once ABSPATH . '...'` bootstrap target, if present.
    /// Recorded verbatim; its contract is unknown and never interpreted.
    pub bootstrap: Option<String>,
}

fn define_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^define\s*\(\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*,\s*(.+?)\s*\)\s*;\s*$"#)
            .expect("define regex is valid")
    })
}

fn prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\$table_prefix\s*=\s*['"]([^'"]*)['"]\s*;\s*$"#)
            .expect("table prefix regex is valid")
    })
}

fn require_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^require(?:_once)?\s+ABSPATH\s*\.\s*['"]([^'"]+)['"]\s*;\s*$"#)
            .expect("require regex is valid")
    })
}

fn dir_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^__DIR__\s*(?:\.\s*['"]([^'"]*)['"]\s*)?$"#).expect("dir regex is valid")
    })
}

/// Scan a configuration source into its raw key/value table.
///
/// Fails with [`ConfigError::ParseFailed`] (carrying the 1-based line
/// number) when a `define()` is malformed or uses an unsupported value
/// expression. Error messages name the key, never the value.
pub fn scan(source: &str) -> Result<RawSource> {
    let mut raw = RawSource::default();
    let mut in_block_comment = false;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let stripped = strip_comments(line, &mut in_block_comment);
        let mut trimmed = stripped.trim();
        if let Some(rest) = trimmed.strip_prefix("<?php") {
            trimmed = rest.trim();
        }
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = define_re().captures(trimmed) {
            let name = caps[1].to_string();
            let value = parse_value(&name, &caps[2], line_no)?;
            raw.defines.insert(name, value);
        } else if let Some(caps) = prefix_re().captures(trimmed) {
            raw.table_prefix = Some(caps[1].to_string());
        } else if let Some(caps) = require_re().captures(trimmed) {
            raw.bootstrap = Some(caps[1].to_string());
        } else if trimmed.starts_with("define") {
            return Err(ConfigError::ParseFailed {
                line: line_no,
                message: "malformed define()".to_string(),
            });
        }
        // Everything else (guards, braces, closing tags) is scanned through.
    }

    Ok(raw)
}

/// Parse the value expression of a single `define()`.
fn parse_value(name: &str, raw: &str, line: usize) -> Result<RawValue> {
    if let Some(s) = parse_string_literal(raw) {
        return Ok(RawValue::Str(s));
    }
    if raw.eq_ignore_ascii_case("true") {
        return Ok(RawValue::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(RawValue::Bool(false));
    }
    if let Some(caps) = dir_re().captures(raw) {
        let suffix = caps.get(1).map_or(String::new(), |m| m.as_str().to_string());
        return Ok(RawValue::DirRelative(suffix));
    }

    Err(ConfigError::ParseFailed {
        line,
        message: format!("unsupported value expression for {name}"),
    })
}

/// Parse a complete single- or double-quoted string literal.
///
/// Returns `None` when `raw` is not exactly one quoted literal (e.g. a
/// concatenation), letting the caller try other forms. Handles `\\` and
/// escaped quotes; other escape sequences pass through verbatim, matching
/// PHP single-quote semantics.
fn parse_string_literal(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let quote = match chars.next() {
        Some(q @ ('\'' | '"')) => q,
        _ => return None,
    };

    let mut out = String::new();
    let mut closed = false;
    while let Some(c) = chars.next() {
        if closed {
            // Trailing content after the closing quote: not a plain literal.
            return None;
        }
        if c == '\\' {
            // `\'` and `\\` resolve; other escapes pass through verbatim.
            match chars.next() {
                Some(n) if n == quote || n == '\\' => out.push(n),
                Some(n) => {
                    out.push('\\');
                    out.push(n);
                }
                None => return None,
            }
        } else if c == quote {
            closed = true;
        } else {
            out.push(c);
        }
    }
    closed.then_some(out)
}

/// Remove `//`, `#`, and `/* ... */` comments from one line.
///
/// Quote-aware so comment markers inside string values survive. Block
/// comment state carries across lines via `in_block`.
fn strip_comments(line: &str, in_block: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if *in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block = false;
            }
            continue;
        }
        match quote {
            Some(q) => {
                out.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    out.push(c);
                }
                '#' => break,
                '/' => match chars.peek() {
                    Some('/') => break,
                    Some('*') => {
                        chars.next();
                        *in_block = true;
                    }
                    _ => out.push(c),
                },
                _ => out.push(c),
            },
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defines_and_prefix() {
        let source = r#"<?php
// Database settings
define('DB_NAME', 'test_database');
define("DB_HOST", "localhost");
define('WP_DEBUG', false);
$table_prefix = 'wp_';
"#;
        let raw = scan(source).unwrap();
        assert_eq!(
            raw.defines.get("DB_NAME"),
            Some(&RawValue::Str("test_database".to_string()))
        );
        assert_eq!(
            raw.defines.get("DB_HOST"),
            Some(&RawValue::Str("localhost".to_string()))
        );
        assert_eq!(raw.defines.get("WP_DEBUG"), Some(&RawValue::Bool(false)));
        assert_eq!(raw.table_prefix.as_deref(), Some("wp_"));
    }

    #[test]
    fn test_scan_dir_expression_and_guard() {
        let source = r#"
if (!defined('ABSPATH')) {
    define('ABSPATH', __DIR__ . '/');
}
require_once ABSPATH . 'wp-settings.php';
"#;
        let raw = scan(source).unwrap();
        assert_eq!(
            raw.defines.get("ABSPATH"),
            Some(&RawValue::DirRelative("/".to_string()))
        );
        assert_eq!(raw.bootstrap.as_deref(), Some("wp-settings.php"));
    }

    #[test]
    fn test_scan_bare_dir_expression() {
        let raw = scan("define('ABSPATH', __DIR__);").unwrap();
        assert_eq!(
            raw.defines.get("ABSPATH"),
            Some(&RawValue::DirRelative(String::new()))
        );
    }

    #[test]
    fn test_unknown_defines_are_retained() {
        let raw = scan("define('WP_MEMORY_LIMIT', '256M');").unwrap();
        assert!(raw.defines.contains_key("WP_MEMORY_LIMIT"));
    }

    #[test]
    fn test_comment_markers_inside_values_survive() {
        let raw = scan("define('AUTH_KEY', 'ab//cd#ef'); // trailing").unwrap();
        assert_eq!(
            raw.defines.get("AUTH_KEY"),
            Some(&RawValue::Str("ab//cd#ef".to_string()))
        );
    }

    #[test]
    fn test_block_comments_span_lines() {
        let source = "/* start\ndefine('DB_NAME', 'commented_out');\nend */\ndefine('DB_NAME', 'real');";
        let raw = scan(source).unwrap();
        assert_eq!(
            raw.defines.get("DB_NAME"),
            Some(&RawValue::Str("real".to_string()))
        );
    }

    #[test]
    fn test_escaped_quote_in_value() {
        let raw = scan(r"define('AUTH_SALT', 'it\'s salty');").unwrap();
        assert_eq!(
            raw.defines.get("AUTH_SALT"),
            Some(&RawValue::Str("it's salty".to_string()))
        );
    }

    #[test]
    fn test_malformed_define_reports_line() {
        let source = "define('DB_NAME', 'ok');\ndefine('DB_USER' 'broken');";
        let err = scan(source).unwrap_err();
        match err {
            ConfigError::ParseFailed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_expression_names_key_not_value() {
        let err = scan("define('NONCE_KEY', getenv('NK'));").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NONCE_KEY"));
        assert!(!message.contains("getenv"));
    }

    #[test]
    fn test_true_literal_case_insensitive() {
        let raw = scan("define('WP_DEBUG', TRUE);").unwrap();
        assert_eq!(raw.defines.get("WP_DEBUG"), Some(&RawValue::Bool(true)));
    }
}
