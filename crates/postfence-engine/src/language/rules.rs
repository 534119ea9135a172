use std::sync::OnceLock;

use regex::Regex;

use super::Language;

/// One heuristic: if `pattern` matches the code, the code is `language`.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub language: Language,
    pattern: Regex,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, language: Language) -> Self {
        Self {
            name,
            language,
            pattern: Regex::new(pattern).expect("Invalid language rule regex"),
        }
    }

    pub fn is_match(&self, code: &str) -> bool {
        self.pattern.is_match(code)
    }
}

/// The heuristic table in priority order.
///
/// Word classes are ASCII (`[A-Za-z0-9_]`), so accented identifiers or prose
/// never count as a word for the annotation and keyword rules.
///
/// Several rules can match the same sample (PHP echoing a string trips the
/// shell rule, a `$`-prefixed query trips both SQL and shell), so order is
/// part of the contract: earlier rules win.
pub fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new("php-open-tag", r"<\?php", Language::Php),
            Rule::new("html-element", r"<(html|div|span|p)[\s>]", Language::Html),
            Rule::new("python-keyword", r"(def|import)\s+[A-Za-z0-9_]+", Language::Python),
            Rule::new("java-package", r"package\s+[A-Za-z0-9_.]+;", Language::Java),
            Rule::new("html-tag-pair", r"<[A-Za-z0-9_]+.*?>.*?</[A-Za-z0-9_]+>", Language::Html),
            Rule::new(
                "typescript-annotation",
                r"\(ts\)|:\s*[A-Za-z0-9_]+[\s;]",
                Language::TypeScript,
            ),
            Rule::new(
                "javascript-function",
                r"\(js\)|function\s+[A-Za-z0-9_]+\(",
                Language::JavaScript,
            ),
            Rule::new("jsx-component", r"import React|</?[A-Z]", Language::Jsx),
            Rule::new(
                "tsx-declaration",
                r"import React.*from 'react'|interface [A-Za-z0-9_]+|type [A-Za-z0-9_]+",
                Language::Tsx,
            ),
            Rule::new("css-rule", r"#[A-Za-z0-9_]+|\.[A-Za-z0-9_]+\s*\{", Language::Css),
            Rule::new("sql-keyword", r"SELECT|INSERT|UPDATE|DELETE", Language::Sql),
            Rule::new("shell-command", r"^\$|echo|git|npm|yarn", Language::Bash),
        ]
    })
}

/// Returns the first rule in priority order that matches `code`.
pub fn matching_rule(code: &str) -> Option<&'static Rule> {
    rules().iter().find(|rule| rule.is_match(code))
}
