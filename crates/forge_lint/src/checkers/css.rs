//! Brace-balance checker for CSS files.

use crate::diagnostic::{Category, Diagnostic};

/// Check `{`/`}` balance with a running counter.
///
/// Every line after which the counter is negative is reported; the counter is
/// never clamped. A positive residual is reported once at the last line.
pub fn check(file: &str, content: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut depth: i64 = 0;
    let mut line_count = 0;

    for (index, line) in content.split('\n').enumerate() {
        line_count = index + 1;
        depth += line.matches('{').count() as i64;
        depth -= line.matches('}').count() as i64;

        if depth < 0 {
            diagnostics.push(Diagnostic::new(
                file,
                line_count,
                Category::Css,
                "Unexpected closing brace }",
            ));
        }
    }

    if depth > 0 {
        diagnostics.push(Diagnostic::new(
            file,
            line_count,
            Category::Css,
            format!("{} unclosed braces", depth),
        ));
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        let css = "body {\n  margin: 0;\n}\n.a { color: red; }\n";
        assert!(check("style.css", css).is_empty());
    }

    #[test]
    fn test_residual_reported_at_last_line() {
        let diagnostics = check("style.css", "{\n{\n}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(diagnostics[0].message, "1 unclosed braces");
        assert_eq!(diagnostics[0].category, Category::Css);
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        let diagnostics = check("style.css", "a {\n  color: red;\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
    }

    #[test]
    fn test_stray_closing_brace() {
        let css = "a { color: red; }\nb { color: blue; }\n}\n";
        let diagnostics = check("style.css", css);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(diagnostics[0].message, "Unexpected closing brace }");
        // The counter stays negative for the trailing empty line as well.
        assert_eq!(diagnostics[1].line, 4);
    }

    #[test]
    fn test_negative_counter_is_not_clamped() {
        let diagnostics = check("style.css", "}\na {\n}");
        let lines: Vec<_> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }
}
