//! Line-oriented command parser for the interactive loop

use std::fmt;

/// A parsed cache command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `put <key> <value>`; the value is the rest of the line
    Put { key: String, value: String },
    /// `get <key>`
    Get(String),
    /// `peek <key>`
    Peek(String),
    /// `del <key>`
    Del(String),
    /// `show`
    Show,
    /// `len`
    Len,
    /// `clear`
    Clear,
    /// `quit` or `exit`
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    WrongArity(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(cmd) => write!(f, "ERR unknown command '{}'", cmd),
            ParseError::WrongArity(cmd) => {
                write!(f, "ERR wrong number of arguments for '{}' command", cmd)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, tail) = split_word(line);
        let verb = verb.to_lowercase();
        let (first, rest) = split_word(tail);
        let first = Some(first).filter(|s| !s.is_empty());
        let rest = Some(rest).filter(|s| !s.is_empty());

        let cmd = match (verb.as_str(), first, rest) {
            ("put" | "set", Some(key), Some(value)) => Command::Put {
                key: key.to_string(),
                value: value.to_string(),
            },
            ("get", Some(key), None) => Command::Get(key.to_string()),
            ("peek", Some(key), None) => Command::Peek(key.to_string()),
            ("del", Some(key), None) => Command::Del(key.to_string()),
            ("show", None, _) => Command::Show,
            ("len", None, _) => Command::Len,
            ("clear", None, _) => Command::Clear,
            ("quit" | "exit", None, _) => Command::Quit,
            (
                "put" | "set" | "get" | "peek" | "del" | "show" | "len" | "clear" | "quit"
                | "exit",
                _,
                _,
            ) => return Err(ParseError::WrongArity(verb)),
            _ => return Err(ParseError::UnknownCommand(verb)),
        };

        Ok(Some(cmd))
    }
}

/// Split off the first whitespace-delimited word; the remainder is trimmed.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_keeps_spaces_in_value() {
        let cmd = Command::parse("put greeting hello  world\n").unwrap();
        assert_eq!(
            cmd,
            Some(Command::Put {
                key: "greeting".to_string(),
                value: "hello  world".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_collapses_separators() {
        assert_eq!(
            Command::parse("  put   k    v ").unwrap(),
            Some(Command::Put {
                key: "k".to_string(),
                value: "v".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            Command::parse("GET k").unwrap(),
            Some(Command::Get("k".to_string()))
        );
        assert_eq!(Command::parse("Show").unwrap(), Some(Command::Show));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_arity_errors() {
        let arity = |cmd: &str| Err(ParseError::WrongArity(cmd.to_string()));

        assert_eq!(Command::parse("put k"), arity("put"));
        assert_eq!(Command::parse("get"), arity("get"));
        assert_eq!(Command::parse("del a b"), arity("del"));
        assert_eq!(Command::parse("len 3"), arity("len"));
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::parse("flush all").unwrap_err();
        assert_eq!(err.to_string(), "ERR unknown command 'flush'");
    }
}
