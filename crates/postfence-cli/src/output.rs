use crossterm::style::Stylize;
use postfence_engine::{CodeBlock, RenderBlock};

/// Plain-text rendering: paragraphs separated by blank lines, code blocks
/// with a language header and a numbered gutter. Highlighted lines are
/// marked with `>` in the gutter.
pub fn render_text(blocks: &[RenderBlock], color: bool) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            RenderBlock::Paragraphs { paragraphs } => {
                for paragraph in paragraphs {
                    out.push_str(paragraph);
                    out.push_str("\n\n");
                }
            }
            RenderBlock::Code(code) => {
                push_code_text(code, color, &mut out);
                out.push('\n');
            }
        }
    }
    out
}

fn push_code_text(code: &CodeBlock, color: bool, out: &mut String) {
    let header = match code.label.as_deref() {
        Some(label) if label != code.language.as_str() => {
            format!("--- {} ({label}) ---", code.language)
        }
        _ => format!("--- {} ---", code.language),
    };
    if color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    let width = code.lines().count().max(1).to_string().len();
    for line in code.lines() {
        let marker = if line.highlighted { '>' } else { ' ' };
        let gutter = if code.show_line_numbers {
            format!("{marker}{:>width$} | ", line.number)
        } else {
            format!("{marker} ")
        };

        // Blank code lines get no gutter padding; code text is never trimmed.
        let gutter = if line.text.is_empty() {
            gutter.trim_end()
        } else {
            gutter.as_str()
        };

        if color {
            let text = if line.highlighted {
                line.text.yellow().to_string()
            } else {
                line.text.to_string()
            };
            out.push_str(&format!("{}{}", gutter.dark_grey(), text));
        } else {
            out.push_str(gutter);
            out.push_str(line.text);
        }
        out.push('\n');
    }
}

/// HTML fragment: `<p>` per paragraph and `<pre><code class="language-x">`
/// per code block, in the shape Prism-style highlighters expect.
pub fn render_html(blocks: &[RenderBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            RenderBlock::Paragraphs { paragraphs } => {
                for paragraph in paragraphs {
                    out.push_str(&format!("<p>{}</p>\n", html_escape::encode_text(paragraph)));
                }
            }
            RenderBlock::Code(code) => push_code_html(code, &mut out),
        }
    }
    out
}

fn push_code_html(code: &CodeBlock, out: &mut String) {
    out.push_str("<pre");
    if code.show_line_numbers {
        out.push_str(" class=\"line-numbers\"");
    }
    if !code.highlight_lines.is_empty() {
        let lines = code
            .highlight_lines
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!(" data-line=\"{lines}\""));
    }
    out.push_str(&format!(
        "><code class=\"language-{}\">{}</code></pre>\n",
        html_escape::encode_double_quoted_attribute(code.language.as_str()),
        html_escape::encode_text(&code.code)
    ));
}

pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
