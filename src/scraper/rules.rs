// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::sync::LazyLock;
use regex::Regex;

/// A named predicate that marks a candidate string as not worth translating.
///
/// Rules are independent of each other: a candidate is dropped as soon as any
/// rule matches, so the order of the list never changes the result.
#[derive(Clone, Copy)]
pub struct ExclusionRule {
    pub name: &'static str,
    matches: fn(&str) -> bool,
}

impl ExclusionRule {
    pub const fn new(name: &'static str, matches: fn(&str) -> bool) -> Self {
        Self { name, matches }
    }

    pub fn matches(&self, text: &str) -> bool {
        (self.matches)(text)
    }
}

impl std::fmt::Debug for ExclusionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExclusionRule").field(&self.name).finish()
    }
}

static DIGITS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());
static SINGLE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.+@.+\..+$").unwrap());
static PUNCTUATION_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^[,.!?;:'"`~]+$"#).unwrap());
static AT_PREFIXED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@.+$").unwrap());

/// Rules applied by the scraper when no custom list is given.
pub const DEFAULT_RULES: &[ExclusionRule] = &[
    ExclusionRule::new("digits-only", |text| DIGITS_ONLY.is_match(text)),
    ExclusionRule::new("url", |text| URL.is_match(text)),
    // identifiers, css classes, enum-ish tokens
    ExclusionRule::new("single-token", |text| SINGLE_TOKEN.is_match(text)),
    ExclusionRule::new("blank", |text| BLANK.is_match(text)),
    ExclusionRule::new("email", |text| EMAIL.is_match(text)),
    ExclusionRule::new("punctuation-only", |text| PUNCTUATION_ONLY.is_match(text)),
    // decorators and mentions
    ExclusionRule::new("at-prefixed", |text| AT_PREFIXED.is_match(text)),
];

/// Returns the first rule that excludes `text`, if any.
pub fn first_match<'a>(text: &str, rules: &'a [ExclusionRule]) -> Option<&'a ExclusionRule> {
    rules.iter().find(|rule| rule.matches(text))
}

/// Whether an already trimmed candidate should end up in the extraction result.
pub fn is_translatable(text: &str, rules: &[ExclusionRule]) -> bool {
    !text.trim().is_empty() && first_match(text, rules).is_none()
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn excluded_by(text: &str) -> Option<&'static str> {
        first_match(text, DEFAULT_RULES).map(|rule| rule.name)
    }

    #[test]
    fn tst_default_rules_exclude_noise() {
        assert_eq!(excluded_by("12345"), Some("digits-only"));
        assert_eq!(excluded_by("https://example.com/a b"), Some("url"));
        assert_eq!(excluded_by("http://localhost"), Some("url"));
        assert_eq!(excluded_by("submitButton"), Some("single-token"));
        assert_eq!(excluded_by("   "), Some("blank"));
        assert_eq!(excluded_by("mail me at john@example.com"), Some("email"));
        assert_eq!(excluded_by("...!?"), Some("punctuation-only"));
        assert_eq!(excluded_by("@Component me"), Some("at-prefixed"));
    }

    #[test]
    fn tst_default_rules_keep_sentences() {
        assert!(is_translatable("Hello world", DEFAULT_RULES));
        assert!(is_translatable("Save changes?", DEFAULT_RULES));
        assert!(is_translatable("Xin chào", DEFAULT_RULES));
        // a path is not a single alphanumeric run, the heuristic lets it through
        assert!(is_translatable("./components/Button", DEFAULT_RULES));
    }

    #[test]
    fn tst_empty_candidate_is_never_translatable() {
        assert!(!is_translatable("", DEFAULT_RULES));
        assert!(!is_translatable("", &[]));
        assert!(is_translatable("anything", &[]));
    }

    #[test]
    fn tst_custom_rule_list() {
        let rules = [ExclusionRule::new("todo", |text| text.starts_with("TODO"))];
        assert!(!is_translatable("TODO remove this", &rules));
        assert!(is_translatable("12345", &rules));
        assert_eq!(format!("{:?}", rules[0]), "ExclusionRule(\"todo\")");
    }
}
