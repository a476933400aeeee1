// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Token definitions

use crate::ast::TrigFn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping delimiter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delim {
    Paren,
    Brace,
    Bracket,
}

impl Delim {
    pub fn open_char(self) -> char {
        match self {
            Delim::Paren => '(',
            Delim::Brace => '{',
            Delim::Bracket => '[',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            Delim::Paren => ')',
            Delim::Brace => '}',
            Delim::Bracket => ']',
        }
    }
}

/// Backslash command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Trig(TrigFn),
    Frac,
    Sqrt,
    Ln,
    Log,
    Lg,
    LeftAbs,
    RightAbs,
}

impl Command {
    /// Look up a command by the name written after the backslash
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "frac" => Command::Frac,
            "sqrt" => Command::Sqrt,
            "ln" => Command::Ln,
            "log" => Command::Log,
            "lg" => Command::Lg,
            "left|" => Command::LeftAbs,
            "right|" => Command::RightAbs,
            other => Command::Trig(TrigFn::from_name(other)?),
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Trig(func) => func.name(),
            Command::Frac => "frac",
            Command::Sqrt => "sqrt",
            Command::Ln => "ln",
            Command::Log => "log",
            Command::Lg => "lg",
            Command::LeftAbs => "left|",
            Command::RightAbs => "right|",
        }
    }
}

/// A lexical unit. Tokens carry no position, only their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    Number(f64),
    Variable(char),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Equals,
    Underscore,
    Open(Delim),
    Close(Delim),
    Command(Command),
}

impl Token {
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Token::Variable(_))
    }

    /// `(`, `{`, `[`, or `\left|`
    pub fn is_opening(&self) -> bool {
        matches!(self, Token::Open(_) | Token::Command(Command::LeftAbs))
    }

    /// `)`, `}`, `]`, or `\right|`
    pub fn is_closing(&self) -> bool {
        matches!(self, Token::Close(_) | Token::Command(Command::RightAbs))
    }

    /// Whether a juxtaposed token after a number, variable or closed group
    /// starts a new factor
    pub fn starts_factor(&self) -> bool {
        match self {
            Token::Number(_) | Token::Variable(_) | Token::Open(_) => true,
            Token::Command(command) => *command != Command::RightAbs,
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(v) => write!(f, "{}", v),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Caret => f.write_str("^"),
            Token::Equals => f.write_str("="),
            Token::Underscore => f.write_str("_"),
            Token::Open(d) => write!(f, "{}", d.open_char()),
            Token::Close(d) => write!(f, "{}", d.close_char()),
            Token::Command(c) => f.write_str(c.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup() {
        assert_eq!(Command::from_name("frac"), Some(Command::Frac));
        assert_eq!(
            Command::from_name("arccot"),
            Some(Command::Trig(TrigFn::Arccot))
        );
        assert_eq!(Command::from_name("right|"), Some(Command::RightAbs));
        assert_eq!(Command::from_name("cdot"), None);
    }

    #[test]
    fn test_right_abs_does_not_start_factor() {
        assert!(Token::Command(Command::LeftAbs).starts_factor());
        assert!(!Token::Command(Command::RightAbs).starts_factor());
        assert!(!Token::Plus.starts_factor());
    }
}
