//! Token classification: what kind of command-line element one raw token is.

/// One raw argument, classified without looking at the option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `--name` or `--name=value`. The value may be empty (`--name=`).
    Long { name: &'a str, value: Option<&'a str> },
    /// `-abc`: the characters after the leading `-`.
    Cluster(&'a str),
    /// Exactly `--`; every later token is an operand.
    DoubleDash,
    /// An operand, including a bare `-`.
    Positional,
}

pub fn classify(token: &str) -> Token<'_> {
    if token == "--" {
        return Token::DoubleDash;
    }
    if let Some(body) = token.strip_prefix("--") {
        return match body.split_once('=') {
            Some((name, value)) => Token::Long {
                name,
                value: Some(value),
            },
            None => Token::Long {
                name: body,
                value: None,
            },
        };
    }
    match token.strip_prefix('-') {
        Some(cluster) if !cluster.is_empty() => Token::Cluster(cluster),
        _ => Token::Positional,
    }
}
