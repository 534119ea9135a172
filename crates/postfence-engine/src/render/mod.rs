//! Turns segments into blocks a presentation layer can draw directly.
//!
//! Prose is split into paragraphs. Code runs through the pipeline
//! sanitize → classify → alias resolution and picks up display metadata.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::language::{Classifier, Language, resolve_alias};
use crate::parsing::{CodeFence, Segment, segment, trim_line_breaks};
use crate::sanitize::sanitize;

/// Display settings passed explicitly into [`present`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_line_numbers: bool,
    /// Language used when a block has no tag and no heuristic matches.
    pub fallback_language: Language,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            fallback_language: Language::TypeScript,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderBlock {
    /// Prose, one entry per paragraph, never empty.
    Paragraphs { paragraphs: Vec<String> },
    Code(CodeBlock),
}

/// A code block ready for a syntax-highlighting surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub language: Language,
    /// The fence tag as the author wrote it, `None` for an untagged fence.
    pub label: Option<String>,
    /// Sanitized code.
    pub code: String,
    pub show_line_numbers: bool,
    /// 1-based line numbers to emphasize.
    pub highlight_lines: BTreeSet<usize>,
}

/// One line of a [`CodeBlock`] as a highlighter walks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLine<'a> {
    pub number: usize,
    pub text: &'a str,
    pub highlighted: bool,
}

impl CodeBlock {
    #[must_use]
    pub fn with_highlighted_lines(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.highlight_lines.extend(lines.into_iter().filter(|&n| n > 0));
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = CodeLine<'_>> {
        self.code.lines().enumerate().map(|(i, text)| CodeLine {
            number: i + 1,
            text,
            highlighted: self.highlight_lines.contains(&(i + 1)),
        })
    }
}

/// Builds render blocks from segments, in order.
pub fn present(segments: &[Segment], options: &RenderOptions) -> Vec<RenderBlock> {
    let classifier = Classifier::new(options.fallback_language.clone());

    segments
        .iter()
        .filter_map(|s| match s {
            Segment::Text { content, .. } => {
                let paragraphs = split_paragraphs(content);
                (!paragraphs.is_empty()).then_some(RenderBlock::Paragraphs { paragraphs })
            }
            Segment::Code {
                language, content, ..
            } => Some(RenderBlock::Code(present_code(
                &classifier,
                language,
                content,
                options,
            ))),
        })
        .collect()
}

/// Segments and presents a raw body in one step.
pub fn render_content(raw: &str, options: &RenderOptions) -> Vec<RenderBlock> {
    present(&segment(raw), options)
}

fn present_code(
    classifier: &Classifier,
    tag: &str,
    content: &str,
    options: &RenderOptions,
) -> CodeBlock {
    let code = sanitize(content);

    let hint = (tag != CodeFence::DEFAULT_LANGUAGE).then_some(tag);
    let detected = classifier.classify(hint, &code);
    let language = resolve_alias(detected.as_str());

    CodeBlock {
        language,
        label: hint.map(str::to_string),
        code,
        show_line_numbers: options.show_line_numbers,
        highlight_lines: BTreeSet::new(),
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(trim_line_breaks)
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code_block(block: &RenderBlock) -> &CodeBlock {
        match block {
            RenderBlock::Code(code) => code,
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let blocks = render_content("one\n\ntwo\n\n\nthree", &RenderOptions::default());
        assert_eq!(
            blocks,
            vec![RenderBlock::Paragraphs {
                paragraphs: vec!["one".into(), "two".into(), "three".into()],
            }]
        );
    }

    #[test]
    fn single_newlines_stay_inside_paragraph() {
        let blocks = render_content("line one\nline two", &RenderOptions::default());
        assert_eq!(
            blocks,
            vec![RenderBlock::Paragraphs {
                paragraphs: vec!["line one\nline two".into()],
            }]
        );
    }

    #[test]
    fn tagged_code_resolves_alias() {
        let blocks = render_content("```js\nconsole.log(1)\n```", &RenderOptions::default());
        let code = code_block(&blocks[0]);
        assert_eq!(code.language, Language::JavaScript);
        assert_eq!(code.label.as_deref(), Some("js"));
        assert_eq!(code.code, "console.log(1)");
        assert!(code.show_line_numbers);
        assert!(code.highlight_lines.is_empty());
    }

    #[test]
    fn untagged_code_is_detected() {
        let blocks = render_content("```\nSELECT * FROM posts\n```", &RenderOptions::default());
        let code = code_block(&blocks[0]);
        assert_eq!(code.language, Language::Sql);
        assert_eq!(code.label, None);
    }

    #[test]
    fn untagged_code_uses_configured_fallback() {
        let options = RenderOptions {
            show_line_numbers: false,
            fallback_language: Language::Text,
        };
        let blocks = render_content("```\nhello there\n```", &options);
        let code = code_block(&blocks[0]);
        assert_eq!(code.language, Language::Text);
        assert!(!code.show_line_numbers);
    }

    #[test]
    fn code_is_sanitized_before_detection() {
        let blocks = render_content(
            "```\n<b>SELECT</b> * FROM posts\n```",
            &RenderOptions::default(),
        );
        let code = code_block(&blocks[0]);
        assert_eq!(code.code, "SELECT * FROM posts");
        assert_eq!(code.language, Language::Sql);
    }

    #[test]
    fn php_survives_sanitizing() {
        let blocks = render_content("```\n<?php echo 1; ?>\n```", &RenderOptions::default());
        let code = code_block(&blocks[0]);
        assert_eq!(code.code, "<?php echo 1; ?>");
        assert_eq!(code.language, Language::Php);
    }

    #[test]
    fn unknown_tag_passes_through() {
        let blocks = render_content("```zig\nconst x = 1;\n```", &RenderOptions::default());
        assert_eq!(
            code_block(&blocks[0]).language,
            Language::Other("zig".to_string())
        );
    }

    #[test]
    fn document_order_is_kept() {
        let raw = "intro\n\n```py\nx = 1\n```\n\nmiddle\n\n```sh\nls\n```\n\nend";
        let blocks = render_content(raw, &RenderOptions::default());
        let kinds: Vec<_> = blocks
            .iter()
            .map(|b| match b {
                RenderBlock::Paragraphs { .. } => "p",
                RenderBlock::Code(_) => "code",
            })
            .collect();
        assert_eq!(kinds, ["p", "code", "p", "code", "p"]);
        assert_eq!(code_block(&blocks[1]).language, Language::Python);
        assert_eq!(code_block(&blocks[3]).language, Language::Other("sh".into()));
    }

    #[test]
    fn highlighted_lines() {
        let blocks = render_content("```\na\nb\nc\n```", &RenderOptions::default());
        let code = code_block(&blocks[0]).clone().with_highlighted_lines([2, 0]);
        let lines: Vec<_> = code.lines().map(|l| (l.number, l.text, l.highlighted)).collect();
        assert_eq!(lines, vec![(1, "a", false), (2, "b", true), (3, "c", false)]);
        assert_eq!(code.highlight_lines, BTreeSet::from([2]));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_content("", &RenderOptions::default()).is_empty());
    }

    #[test]
    fn serializes_with_type_tags() {
        let blocks = render_content("hi\n\n```py\nx\n```", &RenderOptions::default());
        let json = serde_json::to_value(&blocks).unwrap();
        assert_eq!(json[0]["type"], "paragraphs");
        assert_eq!(json[1]["type"], "code");
        assert_eq!(json[1]["language"], "python");
        assert_eq!(json[1]["highlight_lines"], serde_json::json!([]));
    }
}
