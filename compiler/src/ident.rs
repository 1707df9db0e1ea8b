use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Go keywords, plus names that collide with the generated API or the runtime package.
    static ref RESERVED: HashSet<&'static str> = [
        "break", "default", "func", "interface", "select",
        "case", "defer", "go", "map", "struct",
        "chan", "else", "goto", "package", "switch",
        "const", "fallthrough", "if", "range", "type",
        "continue", "for", "import", "return", "var",
        "table", "union", "string", "builder", "flatbuffers", "init",
    ]
    .into_iter()
    .collect();

    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Turns a schema name into a Go identifier.
///
/// A name whose stem (trailing underscores removed) is reserved gets one more `_`,
/// then `snake_case` becomes `camelCase` (`CamelCase` with `first_upper`).
/// Trailing underscores survive camel-casing, so `type`, `type_` and `type__`
/// stay distinct: `Type_`, `Type__`, `Type___`.
pub fn resolve(raw: &str, first_upper: bool) -> String {
    let escaped;
    let name = if is_reserved(raw.trim_end_matches('_')) {
        escaped = format!("{}_", raw);
        escaped.as_str()
    } else {
        raw
    };
    camel(name, first_upper)
}

/// `snake_case` to camel case. An underscore is dropped only when the next
/// character is not another underscore, and that character is upper-cased.
fn camel(name: &str, first_upper: bool) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    if let Some(first) = chars.next() {
        if first_upper {
            out.extend(first.to_uppercase());
        } else {
            out.push(first);
        }
    }

    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next != '_' {
                    chars.next();
                    out.extend(next.to_uppercase());
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(resolve("hit_points", true), "HitPoints");
        assert_eq!(resolve("hit_points", false), "hitPoints");
        assert_eq!(resolve("pos", true), "Pos");
        assert_eq!(resolve("Vec3", true), "Vec3");
        assert_eq!(resolve("a_b_c", true), "ABC");
    }

    #[test]
    fn test_reserved_words_are_escaped() {
        assert_eq!(resolve("type", true), "Type_");
        assert_eq!(resolve("type", false), "type_");
        assert_eq!(resolve("string", true), "String_");
        assert_eq!(resolve("flatbuffers", false), "flatbuffers_");
        assert_eq!(resolve("types", true), "Types");
    }

    #[test]
    fn test_escape_is_injective_over_trailing_underscores() {
        let names = ["type", "type_", "type__", "my_type", "my_type_"];
        let resolved: HashSet<String> = names.iter().map(|n| resolve(n, true)).collect();
        assert_eq!(resolved.len(), names.len());
        assert_eq!(resolve("type_", true), "Type__");
        assert_eq!(resolve("type__", true), "Type___");
    }

    #[test]
    fn test_identifier_pattern() {
        assert!(is_identifier("MyGame"));
        assert!(is_identifier("_x9"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("my-game"));
        assert!(!is_identifier(""));
    }
}
