//! Scripted command parser.
//!
//! # Grammar
//!
//! ```text
//! command := "submit" SP digit SP digit SP digit
//! digit   := integer in [0, 19]
//! ```
//!
//! The keyword is matched case-insensitively and any run of spaces separates
//! tokens. Other whitespace, such as tabs, is not a separator. Anything else,
//! including extra tokens, is not a command.

use dialock_core::constants::{CODE_LENGTH, SUBMIT_KEYWORD};
use dialock_core::{DialPosition, PassCode};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// A parsed scripted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "digits")]
pub enum Command {
    /// Dial the three digits in order: right, left, right.
    Submit(PassCode),
}

impl Command {
    /// Parse a command line.
    ///
    /// Returns `None` for anything that is not a well-formed command; the
    /// caller ignores such input.
    pub fn parse(input: &str) -> Option<Self> {
        let lowered = input.to_lowercase();
        let tokens: Vec<&str> = lowered.split(' ').filter(|t| !t.is_empty()).collect();

        let Some((&keyword, digits)) = tokens.split_first() else {
            trace!("Empty command");
            return None;
        };

        if keyword != SUBMIT_KEYWORD || digits.len() != CODE_LENGTH {
            trace!(input, "Not a submit command");
            return None;
        }

        let mut code = [DialPosition::ZERO; CODE_LENGTH];
        for (slot, token) in code.iter_mut().zip(digits) {
            *slot = parse_digit(token)?;
        }

        Some(Command::Submit(PassCode::new(code)))
    }

    /// Digits to dial, in entry order.
    pub fn digits(&self) -> &[DialPosition; CODE_LENGTH] {
        match self {
            Command::Submit(code) => code.digits(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Submit(code) => write!(f, "{SUBMIT_KEYWORD} {code}"),
        }
    }
}

/// Parse one digit token, rejecting values off the dial.
fn parse_digit(token: &str) -> Option<DialPosition> {
    let value: i64 = match token.parse() {
        Ok(value) => value,
        Err(_) => {
            trace!(token, "Digit is not an integer");
            return None;
        }
    };

    u8::try_from(value)
        .ok()
        .and_then(|value| DialPosition::new(value).ok())
        .or_else(|| {
            trace!(value, "Digit off the dial");
            None
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn submit(values: [u8; 3]) -> Option<Command> {
        Some(Command::Submit(PassCode::from_values(&values).unwrap()))
    }

    #[rstest]
    #[case("submit 5 10 15", [5, 10, 15])]
    #[case("SUBMIT 5 10 15", [5, 10, 15])]
    #[case("Submit 0 0 0", [0, 0, 0])]
    #[case("  submit   19  1   2 ", [19, 1, 2])]
    #[case("submit +5 -0 07", [5, 0, 7])]
    fn test_parse_valid(#[case] input: &str, #[case] expected: [u8; 3]) {
        assert_eq!(Command::parse(input), submit(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("submit")]
    #[case("submit 5 10")]
    #[case("submit 5 10 15 20")]
    #[case("submit\t5\t10\t15")]
    #[case("submit 5 10\t15")]
    #[case("submit 5 10 25")]
    #[case("submit 20 0 0")]
    #[case("submit -1 0 0")]
    #[case("submit a b c")]
    #[case("submit 5.0 10 15")]
    #[case("submitt 5 10 15")]
    #[case("enter 5 10 15")]
    #[case("submit 99999999999999999999 0 0")]
    fn test_parse_invalid(#[case] input: &str) {
        assert_eq!(Command::parse(input), None);
    }

    #[test]
    fn test_display() {
        let command = Command::parse("SUBMIT 1 2 3").unwrap();
        assert_eq!(command.to_string(), "submit 1 2 3");

        let digits: Vec<u8> = command.digits().iter().map(|d| d.as_u8()).collect();
        assert_eq!(digits, vec![1, 2, 3]);
    }

    #[test]
    fn test_serialization() {
        let command = Command::parse("submit 4 5 6").unwrap();
        let json = serde_json::to_value(command).unwrap();
        assert_eq!(json["command"], "submit");
        assert_eq!(json["digits"], serde_json::json!([4, 5, 6]));
    }
}
