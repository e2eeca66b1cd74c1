//! Tokenizer and argument parsers for console command lines.

use std::num::NonZeroUsize;

use super::error::CommandError;

/// Cursor over a single command line.
///
/// Tokens are separated by whitespace. `(` and `)` are always tokens of
/// their own, so `(1 2 3)` and `( 1 2 3 )` parse the same. A double-quoted
/// token may contain spaces. `//` starts a comment that runs to the end of
/// the line.
#[derive(Debug, Clone, Copy)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Everything not yet consumed, without leading whitespace.
    pub fn remainder(&self) -> &'a str {
        self.rest.trim_start()
    }

    pub fn is_empty(&self) -> bool {
        let mut probe = *self;
        probe.next_token().is_none()
    }

    pub fn next_token(&mut self) -> Option<&'a str> {
        loop {
            self.rest = self.rest.trim_start();
            if let Some(after) = self.rest.strip_prefix("//") {
                self.rest = after.find('\n').map_or("", |i| &after[i..]);
                continue;
            }
            break;
        }

        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;

        if first == '(' || first == ')' {
            let token = &self.rest[..1];
            self.rest = &self.rest[1..];
            return Some(token);
        }

        if first == '"' {
            let body = &self.rest[1..];
            return match body.find('"') {
                Some(end) => {
                    self.rest = &body[end + 1..];
                    Some(&body[..end])
                }
                None => {
                    self.rest = "";
                    Some(body)
                }
            };
        }

        let end = self
            .rest
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(self.rest.len());
        let token = &self.rest[..end];
        self.rest = &self.rest[end..];
        Some(token)
    }
}

/// Parses `( v0 v1 ... vN-1 )`.
pub fn parse_vector_argument<const N: usize>(
    tokens: &mut Tokens<'_>,
    argument: &'static str,
) -> Result<[f32; N], CommandError> {
    if tokens.next_token() != Some("(") {
        return Err(CommandError::MissingOpenParen { argument });
    }

    let mut values = [0.0; N];
    for value in values.iter_mut() {
        let token = match tokens.next_token() {
            None | Some(")") => return Err(CommandError::MissingElement { argument }),
            Some(t) => t,
        };
        *value = parse_number(token, argument)?;
    }

    if tokens.next_token() != Some(")") {
        return Err(CommandError::MissingCloseParen { argument });
    }
    Ok(values)
}

pub fn parse_number(token: &str, argument: &'static str) -> Result<f32, CommandError> {
    token
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber {
            argument,
            token: token.to_string(),
        })
}

/// Next token as a number that must be non-zero.
pub fn parse_nonzero(tokens: &mut Tokens<'_>, argument: &'static str) -> Result<f32, CommandError> {
    let token = tokens.next_token().unwrap_or("");
    match token.parse::<f32>() {
        Ok(v) if v != 0.0 && v.is_finite() => Ok(v),
        _ => Err(CommandError::InvalidValue {
            argument,
            token: token.to_string(),
        }),
    }
}

/// Particle count for `init`: a positive integer.
pub fn parse_count(
    tokens: &mut Tokens<'_>,
    system: &'static str,
) -> Result<NonZeroUsize, CommandError> {
    let token = tokens.next_token().unwrap_or("");
    token
        .parse::<NonZeroUsize>()
        .map_err(|_| CommandError::InvalidCount {
            system,
            token: token.to_string(),
        })
}
