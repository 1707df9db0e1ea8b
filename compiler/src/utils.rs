/// A double-quoted Go string literal. JSON escaping is a subset Go accepts.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Doc lines as `//` comments, each line prefixed with `indent`.
pub fn comment(doc: &[String], indent: &str, code: &mut String) {
    for line in doc {
        let line = line.trim_end();
        if line.trim().is_empty() {
            code.push_str(&format!("{}//\n", indent));
        } else if line.starts_with(' ') {
            code.push_str(&format!("{}//{}\n", indent, line));
        } else {
            code.push_str(&format!("{}// {}\n", indent, line));
        }
    }
}

/// Drops trailing blank lines so a file ends with exactly one newline.
pub fn trim_trailing_blank_lines(code: &mut String) {
    while code.ends_with("\n\n") {
        code.pop();
    }
}

/// Pads `text` with spaces to `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
