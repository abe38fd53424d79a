use std::sync::OnceLock;

use regex::Regex;

// Grammar: [LINE 5], [LINE 5(3)], [LINE 5(3/8)]. Everything else is literal.
fn line_token_regex() -> &'static Regex {
    static LINE_TOKEN: OnceLock<Regex> = OnceLock::new();
    LINE_TOKEN.get_or_init(|| {
        Regex::new(r"(?i)\[LINE\s+(\d+)(?:\((\d+)(?:/(\d+))?\))?\]")
            .expect("line token regex compiles")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    LineRef {
        line: usize,
        start: Option<usize>,
        end: Option<usize>,
    },
}

pub fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for captures in line_token_regex().captures_iter(pattern) {
        let Some(matched) = captures.get(0) else {
            continue;
        };

        if matched.start() > cursor {
            tokens.push(Token::Literal(pattern[cursor..matched.start()].to_string()));
        }
        cursor = matched.end();

        // A number too large for usize keeps the token literal.
        let line = captures.get(1).and_then(|m| m.as_str().parse::<usize>().ok());
        let start = match captures.get(2) {
            Some(m) => match m.as_str().parse::<usize>() {
                Ok(value) => Some(Some(value)),
                Err(_) => None,
            },
            None => Some(None),
        };
        let end = match captures.get(3) {
            Some(m) => match m.as_str().parse::<usize>() {
                Ok(value) => Some(Some(value)),
                Err(_) => None,
            },
            None => Some(None),
        };

        match (line, start, end) {
            (Some(line), Some(start), Some(end)) => {
                tokens.push(Token::LineRef { line, start, end });
            }
            _ => tokens.push(Token::Literal(matched.as_str().to_string())),
        }
    }

    if cursor < pattern.len() {
        tokens.push(Token::Literal(pattern[cursor..].to_string()));
    }

    tokens
}

pub fn resolve(lines: &[String], pattern: &str) -> String {
    let mut resolved = String::new();

    for token in tokenize(pattern) {
        match token {
            Token::Literal(text) => resolved.push_str(&text),
            Token::LineRef { line, start, end } => {
                resolved.push_str(&line_slice(lines, line, start, end));
            }
        }
    }

    resolved
}

fn line_slice(lines: &[String], line: usize, start: Option<usize>, end: Option<usize>) -> String {
    let Some(text) = lines.get(line) else {
        return String::new();
    };

    // Positions are 1-based characters with an exclusive end bound.
    let sliced: String = match (start, end) {
        (None, _) => text.clone(),
        (Some(start), None) => text.chars().skip(start.saturating_sub(1)).collect(),
        (Some(start), Some(end)) => {
            let from = start.saturating_sub(1);
            let take = end.saturating_sub(1).saturating_sub(from);
            text.chars().skip(from).take(take).collect()
        }
    };

    sliced.trim().to_string()
}
