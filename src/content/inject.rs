//! Live-reload script injection
//!
//! The script tag is placed right after the first matching anchor tag, on
//! the same line. Served line numbers have to match the file on disk so that
//! debuggers mapping breakpoints by line keep working.

use regex::Regex;
use std::sync::LazyLock;

/// Insertion anchors in order of preference
pub const INSERTION_ANCHORS: [&str; 4] = ["head", "body", "html", "!DOCTYPE"];

const SCRIPT_TEMPLATE: &str = include_str!("../../assets/injected_script.js");
const SOCKET_URL_PLACEHOLDER: &str = "{{RELOAD_SOCKET_URL}}";

static ANCHOR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    INSERTION_ANCHORS
        .iter()
        .map(|tag| {
            Regex::new(&format!("(?i)<{}[^>]*>", regex::escape(tag)))
                .expect("anchor patterns are valid regexes")
        })
        .collect()
});

/// Holds the script tag markup and the script body it points at
#[derive(Debug, Clone)]
pub struct ScriptInjector {
    markup: String,
    script: String,
}

impl ScriptInjector {
    /// Build an injector whose tag loads the script from `script_path`
    pub fn new(script_path: &str, reload_socket_url: &str) -> Self {
        Self {
            markup: format!(r#"<script type="text/javascript" src="{script_path}"></script>"#),
            script: SCRIPT_TEMPLATE.replace(SOCKET_URL_PLACEHOLDER, reload_socket_url),
        }
    }

    /// The `<script>` tag inserted into HTML payloads
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The live-reload client served at the script path
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Insert the script tag into an HTML document
    pub fn inject(&self, contents: &str) -> String {
        insert(&self.markup, contents)
    }
}

/// Insert `markup` after the preferred anchor of `contents`
///
/// Anchors are tried in [`INSERTION_ANCHORS`] order and the first one that
/// matches anywhere wins, regardless of where other anchors sit in the text.
/// Without any anchor the markup is prepended. Already injected content gets
/// another copy.
pub fn insert(markup: &str, contents: &str) -> String {
    let offset = insertion_offset(contents);

    let mut injected = String::with_capacity(contents.len() + markup.len());
    injected.push_str(&contents[..offset]);
    injected.push_str(markup);
    injected.push_str(&contents[offset..]);
    injected
}

/// Byte offset right after the preferred anchor tag, 0 without any
pub fn insertion_offset(contents: &str) -> usize {
    ANCHOR_PATTERNS
        .iter()
        .find_map(|pattern| anchor_end(pattern, contents))
        .unwrap_or(0)
}

/// End offset of the first match of one anchor pattern
///
/// A match always spans at least `<x>`, so `Some(0)` cannot occur.
fn anchor_end(pattern: &Regex, contents: &str) -> Option<usize> {
    pattern.find(contents).map(|m| m.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &str = "<script src=\"/reload.js\"></script>";

    fn newlines_before(text: &str, offset: usize) -> usize {
        text[..offset].matches('\n').count()
    }

    #[test]
    fn test_head_wins_over_earlier_body() {
        let html = "<body>\n<p>x</p>\n</body>\n<head><title>t</title></head>";
        let out = insert(TAG, html);
        let head_end = html.find("<head>").unwrap() + "<head>".len();
        assert_eq!(&out[head_end..head_end + TAG.len()], TAG);
        assert!(out.starts_with("<body>\n<p>x</p>"));
    }

    #[test]
    fn test_head_with_attributes_and_case() {
        let html = "<!DOCTYPE html>\n<HTML>\n<HEAD lang=\"en\">\n<title>t</title>";
        let out = insert(TAG, html);
        assert_eq!(
            out,
            format!("<!DOCTYPE html>\n<HTML>\n<HEAD lang=\"en\">{TAG}\n<title>t</title>")
        );
    }

    #[test]
    fn test_fallback_order() {
        assert_eq!(
            insert(TAG, "<html>\n<body class=\"a\">hi</body></html>"),
            format!("<html>\n<body class=\"a\">{TAG}hi</body></html>")
        );
        assert_eq!(
            insert(TAG, "<!doctype html>\n<html lang=\"en\">x</html>"),
            format!("<!doctype html>\n<html lang=\"en\">{TAG}x</html>")
        );
        assert_eq!(
            insert(TAG, "<!DOCTYPE html>\n<p>bare</p>"),
            format!("<!DOCTYPE html>{TAG}\n<p>bare</p>")
        );
    }

    #[test]
    fn test_no_anchor_prepends() {
        let text = "<p>fragment</p>\n<div></div>";
        assert_eq!(insert(TAG, text), format!("{TAG}{text}"));
        assert_eq!(insert(TAG, ""), TAG);
    }

    #[test]
    fn test_repeated_insert_adds_another_copy() {
        let once = insert(TAG, "<head></head>");
        let twice = insert(TAG, &once);
        assert_eq!(twice.matches(TAG).count(), 2);
        assert_eq!(twice, format!("<head>{TAG}{TAG}</head>"));
    }

    #[test]
    fn test_line_numbers_preserved() {
        let inputs = [
            "<!DOCTYPE html>\n<html>\n  <head>\n    <title>a</title>\n  </head>\n</html>\n",
            "\n\n<body>\n<h1>b</h1>\n</body>",
            "no anchors\nat all\n",
            "<html\n  lang=\"en\">\n<p>c</p>",
        ];

        for input in inputs {
            let offset = insertion_offset(input);
            let out = insert(TAG, input);
            assert_eq!(
                newlines_before(&out, offset),
                newlines_before(input, offset),
                "{input:?}"
            );
            assert_eq!(out.matches('\n').count(), input.matches('\n').count());
        }
    }

    #[test]
    fn test_offset_is_never_zero_for_a_match() {
        assert_eq!(insertion_offset("<head>"), "<head>".len());
        assert_eq!(insertion_offset("plain"), 0);
    }

    #[test]
    fn test_injector_renders_script() {
        let injector = ScriptInjector::new("/__reload.js", "ws://127.0.0.1:9000");
        assert_eq!(
            injector.markup(),
            r#"<script type="text/javascript" src="/__reload.js"></script>"#
        );
        assert!(injector.script().contains("ws://127.0.0.1:9000"));
        assert!(!injector.script().contains(SOCKET_URL_PLACEHOLDER));
        assert_eq!(
            injector.inject("<head></head>"),
            format!("<head>{}</head>", injector.markup())
        );
    }
}
