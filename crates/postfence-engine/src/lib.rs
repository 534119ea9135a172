pub mod language;
pub mod models;
pub mod parsing;
pub mod render;
pub mod sanitize;

// Re-export key types for easier usage
pub use language::{Classifier, Language, classify, resolve_alias};
pub use models::*;
pub use parsing::{
    ExtractedCode, Segment, Span, extract_code_blocks, normalize_fences, parse_filtered, segment,
};
pub use render::{CodeBlock, CodeLine, RenderBlock, RenderOptions, present, render_content};
pub use sanitize::sanitize;
