use std::sync::OnceLock;

use regex::Regex;

/// Comments, declarations (`<!DOCTYPE html>`) and element tags. Quoted
/// attribute values may contain `>`. Processing instructions (`<?php`) are
/// not element markup and are left alone.
fn markup_pattern() -> &'static Regex {
    static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?s)<!--.*?-->|<![A-Za-z][^<>]*>|</?[A-Za-z][A-Za-z0-9:-]*(?:[^<>"']|"[^"]*"|'[^']*')*>"#,
        )
        .expect("Invalid markup regex")
    })
}

/// Strips markup tags from a code fragment, keeping their text content.
///
/// Everything that is not a tag is preserved byte for byte. Stripping
/// repeats until no tag is left, since removing one tag can splice a new one
/// together (`<<b>i>`); this makes the result idempotent.
pub fn sanitize(code: &str) -> String {
    let pattern = markup_pattern();
    let mut clean = code.to_string();
    while pattern.is_match(&clean) {
        clean = pattern.replace_all(&clean, "").into_owned();
    }
    clean
}
