use super::Language;

/// Short fence tags accepted as spellings of a canonical language.
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("jsx", "jsx"),
    ("tsx", "tsx"),
    ("html", "html"),
    ("css", "css"),
    ("json", "json"),
    ("py", "python"),
    ("rb", "ruby"),
    ("go", "go"),
    ("java", "java"),
    ("php", "php"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("cs", "csharp"),
    ("", "text"),
];

/// Resolves a fence tag to the token a highlighting surface expects.
///
/// Lookup is case-insensitive; tags not in the table pass through
/// lowercased.
pub fn resolve_alias(tag: &str) -> Language {
    let tag = tag.trim().to_lowercase();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map_or(tag.as_str(), |(_, canonical)| canonical);
    Language::from_tag(canonical)
}
