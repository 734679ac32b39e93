//! Double-quoted value scanner.
//!
//! Both the roster file and the remote payload are read the same way: every
//! `"..."` span, left to right, shortest match, no escape handling. A lone
//! trailing quote is ignored.

use std::sync::OnceLock;

use regex::Regex;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""(.*?)""#).expect("quoted-value pattern is valid"))
}

/// Every quoted substring of `text`, in order, without the quotes.
pub fn quoted_values(text: &str) -> Vec<&str> {
    pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
