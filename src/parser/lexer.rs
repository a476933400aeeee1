// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tokenizer for LaTeX-style formulas

use super::token::{Command, Delim, Token};
use crate::error::LexError;
use logos::Logos;

/// Context-free lexemes. Sign runs are resolved against the preceding
/// token afterwards.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme<'source> {
    /// Letters after a backslash, optionally closed by a single pipe
    /// (`left|`, `right|`)
    #[regex(r"\\[a-zA-Z]+\|?", |lex| &lex.slice()[1..])]
    Command(&'source str),

    #[regex(r"[0-9.]+")]
    Number(&'source str),

    /// Run of `+`/`-`, carrying its count of minus signs
    #[regex(r"[+-]+", |lex| lex.slice().bytes().filter(|&b| b == b'-').count())]
    Signs(usize),

    #[regex(r"[a-zA-Z]", |lex| lex.slice().chars().next())]
    Variable(char),

    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("=")]
    Equals,
    #[token("_")]
    Underscore,
    #[token("(", |_| Delim::Paren)]
    #[token("{", |_| Delim::Brace)]
    #[token("[", |_| Delim::Bracket)]
    Open(Delim),
    #[token(")", |_| Delim::Paren)]
    #[token("}", |_| Delim::Brace)]
    #[token("]", |_| Delim::Bracket)]
    Close(Delim),
}

/// Turn source text into a flat token stream, without implicit
/// multiplication
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();

    for (lexeme, span) in Lexeme::lexer(source).spanned() {
        let lexeme = lexeme.map_err(|_| {
            let c = source
                .get(span.start..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or_default();
            LexError::InvalidToken(c)
        })?;

        let token = match lexeme {
            Lexeme::Command(name) => Command::from_name(name)
                .map(Token::Command)
                .ok_or_else(|| LexError::InvalidOperator(name.to_string()))?,
            Lexeme::Number(text) => Token::Number(number(text)?),
            Lexeme::Signs(minuses) => {
                push_signs(&mut tokens, minuses);
                continue;
            }
            Lexeme::Variable(c) => Token::Variable(c),
            Lexeme::Star => Token::Star,
            Lexeme::Slash => Token::Slash,
            Lexeme::Caret => Token::Caret,
            Lexeme::Equals => Token::Equals,
            Lexeme::Underscore => Token::Underscore,
            Lexeme::Open(delim) => Token::Open(delim),
            Lexeme::Close(delim) => Token::Close(delim),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Collapse a sign run by the parity of its minus signs
fn push_signs(tokens: &mut Vec<Token>, minuses: usize) {
    let leading = tokens.last().map_or(true, Token::is_opening);
    if minuses % 2 == 1 {
        // Unary minus becomes subtraction from zero
        if leading {
            tokens.push(Token::Number(0.0));
        }
        tokens.push(Token::Minus);
    } else if !leading {
        tokens.push(Token::Plus);
    }
}

/// At most one decimal point; the error carries the text up to the second
fn number(text: &str) -> Result<f64, LexError> {
    if let Some((first, _)) = text.match_indices('.').nth(1) {
        return Err(LexError::InvalidNumber(text[..=first].to_string()));
    }
    text.parse::<f64>()
        .map_err(|_| LexError::InvalidNumber(text.to_string()))
}
