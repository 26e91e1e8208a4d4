//! Keyword Gap Analyzer: flags posting keywords that never appear in the CV.
//!
//! Pure-Rust, deterministic, no LLM call. Matching is literal: a keyword counts
//! as covered when it occurs anywhere in the CV, case-insensitively.
//!
//! Known edge case: highlighting replaces one keyword at a time over the
//! already-annotated HTML. Overlapping keywords, or a keyword that also occurs
//! inside the inserted markup (`bold`, `color`, `span`...), follow
//! last-applied-wins and can produce nested or broken spans.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

const HIGHLIGHT_OPEN: &str = r#"<span style="color:red;font-weight:bold">"#;
const HIGHLIGHT_CLOSE: &str = "</span>";

/// Tokens shorter than this (in chars) are never treated as keywords.
const MIN_KEYWORD_CHARS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    /// Posting keywords absent from the CV, sorted.
    pub missing_keywords: Vec<String>,
    /// HTML-escaped posting with every missing keyword highlighted.
    pub highlighted_html: String,
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    // Static pattern; cannot fail to compile.
    TOKEN.get_or_init(|| Regex::new(r"[A-Za-z][A-Za-z+#-]*").unwrap())
}

/// Candidate skill keywords in `text`: a letter followed by letters, `+`, `-` or `#`,
/// longer than two characters, deduplicated.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    token_regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// Keywords from `posting_text` that do not occur (case-insensitively) in `cv_text`.
pub fn find_missing_keywords(posting_text: &str, cv_text: &str) -> Vec<String> {
    let cv_lower = cv_text.to_lowercase();
    extract_keywords(posting_text)
        .into_iter()
        .filter(|kw| !cv_lower.contains(&kw.to_lowercase()))
        .collect()
}

/// Wraps every whole-word, case-insensitive occurrence of each keyword in a
/// bold red span. Applied sequentially in the order given.
pub fn highlight_keywords(posting_text: &str, keywords: &[String]) -> String {
    let mut html = escape_html(posting_text);
    for keyword in keywords {
        let pattern = format!(r"\b{}\b", regex::escape(keyword));
        let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            continue;
        };
        html = re
            .replace_all(&html, |caps: &regex::Captures| {
                format!("{HIGHLIGHT_OPEN}{}{HIGHLIGHT_CLOSE}", &caps[0])
            })
            .into_owned();
    }
    html
}

/// Runs the full analysis: missing keywords plus the annotated posting.
pub fn analyze_gaps(posting_text: &str, cv_text: &str) -> GapReport {
    let missing_keywords = find_missing_keywords(posting_text, cv_text);
    debug!("Keyword gap analysis: {} missing", missing_keywords.len());
    let highlighted_html = highlight_keywords(posting_text, &missing_keywords);
    GapReport {
        missing_keywords,
        highlighted_html,
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
