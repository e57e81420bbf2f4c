//! Strict JSON check for the project's `package.json`.

use crate::diagnostic::{Category, Diagnostic};

/// File name checked by the JSON pass.
pub const PACKAGE_JSON: &str = "package.json";

/// Parse the whole document; a parse failure yields one diagnostic.
pub fn check(file: &str, content: &str) -> Vec<Diagnostic> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(_) => Vec::new(),
        Err(e) => vec![Diagnostic::new(
            file,
            e.line(),
            Category::Json,
            format!("Invalid JSON: {}", e),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package_json() {
        let content = r#"{ "name": "demo", "version": "1.0.0", "scripts": { "start": "serve ." } }"#;
        assert!(check(PACKAGE_JSON, content).is_empty());
    }

    #[test]
    fn test_invalid_json_reports_parser_line() {
        let diagnostics = check(PACKAGE_JSON, "{\n  \"name\": \"demo\",\n  \"a\": }\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(diagnostics[0].category, Category::Json);
        assert!(diagnostics[0].message.starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_single_line_invalid() {
        let diagnostics = check(PACKAGE_JSON, r#"{"a": }"#);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 1);
    }

    #[test]
    fn test_empty_document() {
        let diagnostics = check(PACKAGE_JSON, "");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 1);
    }
}
