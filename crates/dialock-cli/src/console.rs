//! Interactive console commands.
//!
//! Each stdin line is one command:
//!
//! ```text
//! left | l              press left
//! right | r             press right
//! reset                 press reset
//! submit a b c          run a scripted submission in the background
//! solve                 mark one more host module solved
//! codes a b ...         set the rotating codes (no values clears them)
//! status                print the dial
//! help                  list commands
//! quit | exit           leave
//! ```

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Left,
    Right,
    Reset,
    /// Raw line, handed to the scripted command interpreter as is.
    Submit(String),
    Solve,
    Codes(Vec<u32>),
    Status,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one console line.
    ///
    /// Returns `None` for blank lines.
    ///
    /// # Errors
    /// Returns a message for unknown commands and bad `codes` values.
    pub fn parse(line: &str) -> Option<Result<Self, String>> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next()?.to_lowercase();

        let command = match keyword.as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "reset" => Ok(Self::Reset),
            "submit" => Ok(Self::Submit(line.trim().to_string())),
            "solve" => Ok(Self::Solve),
            "codes" => tokens
                .map(|t| t.parse::<u32>().map_err(|_| format!("Invalid code: {t}")))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Codes),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {other} (try 'help')")),
        };

        Some(command)
    }
}

/// One-line summary of the console commands.
pub const HELP: &str =
    "commands: left, right, reset, submit a b c, solve, codes a b ..., status, help, quit";

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("left", ConsoleCommand::Left)]
    #[case("L", ConsoleCommand::Left)]
    #[case("  right ", ConsoleCommand::Right)]
    #[case("reset", ConsoleCommand::Reset)]
    #[case("solve", ConsoleCommand::Solve)]
    #[case("status", ConsoleCommand::Status)]
    #[case("?", ConsoleCommand::Help)]
    #[case("EXIT", ConsoleCommand::Quit)]
    #[case("codes", ConsoleCommand::Codes(vec![]))]
    #[case("codes 42 17", ConsoleCommand::Codes(vec![42, 17]))]
    fn test_parse(#[case] line: &str, #[case] expected: ConsoleCommand) {
        assert_eq!(ConsoleCommand::parse(line), Some(Ok(expected)));
    }

    #[test]
    fn test_submit_keeps_raw_line() {
        // Validation is left to the interpreter, which ignores bad input
        assert_eq!(
            ConsoleCommand::parse(" SUBMIT 5 10 99 "),
            Some(Ok(ConsoleCommand::Submit("SUBMIT 5 10 99".to_string())))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ConsoleCommand::parse(""), None);
        assert_eq!(ConsoleCommand::parse("   "), None);
        assert!(matches!(ConsoleCommand::parse("spin"), Some(Err(_))));
        assert!(matches!(ConsoleCommand::parse("codes 4x"), Some(Err(_))));
    }
}
