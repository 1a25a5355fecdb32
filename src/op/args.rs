//! Argument lists: `key=value` pairs (or bare positional values) separated by
//! top-level commas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    /// None for a positional value such as the `4096` in `ZF(4096)`.
    pub key: Option<String>,
    pub value: String,
}

impl Arg {
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    pub fn positional(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    pub fn to_text(&self) -> String {
        match &self.key {
            Some(k) => format!("{}={}", k, self.value),
            None => self.value.clone(),
        }
    }
}

/// Split on commas that are not inside `'...'`, `"..."` or `[...]`.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    out.push(&s[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    out.push(&s[start..]);
    out
}

/// Parse the text between an operation's parentheses.
pub fn parse_args(s: &str) -> Vec<Arg> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(s)
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_one)
        .collect()
}

fn parse_one(piece: &str) -> Arg {
    if let Some(eq) = piece.find('=') {
        let key = piece[..eq].trim();
        if is_key(key) {
            return Arg::keyed(key, piece[eq + 1..].trim());
        }
    }
    Arg::positional(piece)
}

fn is_key(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn join_args(args: &[Arg]) -> String {
    args.iter()
        .map(Arg::to_text)
        .collect::<Vec<_>>()
        .join(",")
}

/// Strip one layer of `'...'` or `"..."` quoting from a value.
pub fn unquote(value: &str) -> &str {
    let v = value.trim();
    for q in ['\'', '"'] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_respect_quotes_and_brackets() {
        assert_eq!(
            split_top_level("a=1,b='x,y',c=[1,2],d=\"p,q\""),
            vec!["a=1", "b='x,y'", "c=[1,2]", "d=\"p,q\""]
        );
    }

    #[test]
    fn parses_keyed_and_positional() {
        let args = parse_args(" lb=1.0 , 4096,label='a=b'");
        assert_eq!(
            args,
            vec![
                Arg::keyed("lb", "1.0"),
                Arg::positional("4096"),
                Arg::keyed("label", "'a=b'"),
            ]
        );
        assert_eq!(join_args(&args), "lb=1.0,4096,label='a=b'");
    }

    #[test]
    fn empty_and_blank_pieces() {
        assert!(parse_args("").is_empty());
        assert!(parse_args("   ").is_empty());
        assert_eq!(parse_args("a=1,,b=2").len(), 2);
    }

    #[test]
    fn quoted_equals_is_positional() {
        assert_eq!(parse_args("'k=v'"), vec![Arg::positional("'k=v'")]);
    }

    #[test]
    fn unquote_strips_one_layer() {
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("[1,2]"), "[1,2]");
        assert_eq!(unquote("'"), "'");
    }
}
