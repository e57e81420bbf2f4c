//! Tag-balance checker for HTML files.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostic::{Category, Diagnostic};

/// Elements that never take a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "br", "hr", "img", "input", "meta", "link", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

static OPENING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)[^>]*>").expect("valid regex"));
static CLOSING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</(\w+)>").expect("valid regex"));

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Opening tags on a line, excluding self-closing and void elements.
fn opening_tags(line: &str) -> impl Iterator<Item = &str> {
    OPENING_TAG.captures_iter(line).filter_map(|caps| {
        let whole = caps.get(0)?.as_str();
        if whole.ends_with("/>") {
            return None;
        }
        let name = caps.get(1)?.as_str();
        (!is_void(name)).then_some(name)
    })
}

/// Check tag balance line by line.
///
/// Opening tags on a line are pushed before its closing tags are matched. A
/// closing tag that does not match the top of the stack is reported and the
/// stack is left as it was.
pub fn check(file: &str, content: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut open: Vec<(&str, usize)> = Vec::new();

    for (index, line) in content.split('\n').enumerate() {
        let line_no = index + 1;

        for tag in opening_tags(line) {
            open.push((tag, line_no));
        }

        for caps in CLOSING_TAG.captures_iter(line) {
            let tag = &caps[1];
            match open.last() {
                Some((top, _)) if top.eq_ignore_ascii_case(tag) => {
                    open.pop();
                }
                _ => diagnostics.push(Diagnostic::new(
                    file,
                    line_no,
                    Category::Html,
                    format!("Unexpected closing tag: </{}>", tag),
                )),
            }
        }
    }

    diagnostics.extend(open.into_iter().map(|(tag, line_no)| {
        Diagnostic::new(file, line_no, Category::Html, format!("Unclosed tag: <{}>", tag))
    }));

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(diagnostics: &[Diagnostic]) -> Vec<(usize, &str)> {
        diagnostics.iter().map(|d| (d.line, d.message.as_str())).collect()
    }

    #[test]
    fn test_balanced_document() {
        let html = "<!DOCTYPE html>\n<html>\n<head><title>x</title></head>\n<body>\n<p>Hi</p>\n</body>\n</html>";
        assert!(check("index.html", html).is_empty());
    }

    #[test]
    fn test_void_and_self_closing_ignored() {
        let html = "<div>\n<br><img src=\"a.png\"><input type=\"text\">\n<custom-el />\n<span/>\n<META charset=\"utf-8\">\n</div>";
        assert!(check("index.html", html).is_empty());
    }

    #[test]
    fn test_unclosed_tags_reported_at_opening_line() {
        let html = "<div>\n<section>\n<p>text";
        let diagnostics = check("index.html", html);
        assert_eq!(
            messages(&diagnostics),
            vec![
                (1, "Unclosed tag: <div>"),
                (2, "Unclosed tag: <section>"),
                (3, "Unclosed tag: <p>"),
            ]
        );
        assert!(diagnostics.iter().all(|d| d.category == Category::Html));
    }

    #[test]
    fn test_mismatched_closing_leaves_stack() {
        let diagnostics = check("index.html", "<a><b></a></b>");
        assert_eq!(
            messages(&diagnostics),
            vec![(1, "Unexpected closing tag: </a>"), (1, "Unclosed tag: <a>")]
        );
    }

    #[test]
    fn test_mismatch_across_lines() {
        let html = "<a>\n<b>\n</a>\n</b>";
        let diagnostics = check("page.html", html);
        let unexpected: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.message.starts_with("Unexpected"))
            .collect();
        assert_eq!(unexpected.len(), 1);
        assert_eq!(unexpected[0].line, 3);
        assert_eq!(unexpected[0].message, "Unexpected closing tag: </a>");
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(check("index.html", "<DIV>\n</div>").is_empty());
    }

    #[test]
    fn test_stray_closing_on_empty_stack() {
        let diagnostics = check("index.html", "<p>x</p>\n</div>");
        assert_eq!(messages(&diagnostics), vec![(2, "Unexpected closing tag: </div>")]);
    }
}
