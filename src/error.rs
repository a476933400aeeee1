// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for lexing, parsing, evaluation and tessellation

use crate::parser::Token;
use thiserror::Error;

/// Failure while turning source text into tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// Character that is neither a symbol, letter, digit nor whitespace
    #[error("lexing error: invalid token '{0}'")]
    InvalidToken(char),

    /// Backslash command outside the recognized set
    #[error("lexing error: invalid operator \\{0}")]
    InvalidOperator(String),

    /// Numeric literal with two decimal points, or a lone point
    #[error("lexing error: invalid number {0}")]
    InvalidNumber(String),
}

/// Failure while building an AST from tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("parsing error: empty expression")]
    Empty,

    #[error("parsing error: unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("parsing error: unexpected token {found}, expected {expected}")]
    UnexpectedToken {
        found: Token,
        expected: &'static str,
    },

    #[error("parsing error: mismatched delimiter, expected {expected} but found {found}")]
    MismatchedDelimiter { expected: Token, found: Token },

    #[error("parsing error: unclosed delimiter {0}")]
    UnclosedDelimiter(Token),

    #[error("parsing error: trailing input starting at {0}")]
    TrailingInput(Token),

    /// Groups or operator chains nested past the supported depth
    #[error("parsing error: expression nests deeper than {0} levels")]
    TooDeep(usize),
}

/// Failure while evaluating an AST
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Variable with no entry in the binding table
    #[error("evaluating error: undefined variable {0}")]
    UndefinedVariable(String),

    /// Secant evaluated at a pole of cosine
    #[error("evaluating error: division by 0")]
    DivisionByZero,
}

/// Invalid sampling grid parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid step must be at least 2, got {0}")]
    InvalidStep(usize),

    #[error("grid range must be finite and positive, got {0}")]
    InvalidRange(f32),

    #[error("display bound must be finite and positive, got {0}")]
    InvalidDisplayBound(f32),
}

/// Universal error type for texsurf
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
