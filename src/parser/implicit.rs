// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Implicit multiplication rewriter
//!
//! LaTeX writes products by juxtaposition (`2x`, `x(y+1)`, `2\sin{x}`). This
//! pass walks the token stream with a cursor and inserts explicit `*`
//! tokens. `\frac{a}{b}`, `\log_{b}{a}` and `\sqrt[n]{a}` consume two groups
//! each; both groups are rewritten recursively before the construct as a
//! whole is checked for a following factor.

use super::token::{Command, Delim, Token};
use super::MAX_DEPTH;
use crate::error::ParseError;

/// Insert explicit multiplication tokens where juxtaposition implies one
///
/// Fails only when groups nest deeper than the parser would accept.
pub fn insert_implicit_multiplication(tokens: &[Token]) -> Result<Vec<Token>, ParseError> {
    let mut rewriter = Rewriter {
        tokens,
        pos: 0,
        depth: 0,
        out: Vec::with_capacity(tokens.len() * 2),
    };

    // A stray closer ends a group early; keep going so every token is
    // copied and the parser can report the imbalance.
    while rewriter.pos < tokens.len() {
        rewriter.rewrite_group()?;
    }
    Ok(rewriter.out)
}

struct Rewriter<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    out: Vec<Token>,
}

impl<'a> Rewriter<'a> {
    /// Copy the current token to the output and advance past it
    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.out.push(token.clone());
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn multiply_if_factor_follows(&mut self) {
        if self.peek().is_some_and(Token::starts_factor) {
            self.out.push(Token::Star);
        }
    }

    /// Rewrite tokens up to and including the closer of the current group
    /// (or the end of input)
    fn rewrite_group(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }

        while let Some(token) = self.advance() {
            match token {
                t if t.is_closing() => break,
                Token::Command(Command::Frac) => self.two_groups()?,
                t if t.is_opening() => {
                    self.rewrite_group()?;
                    self.multiply_if_factor_follows();
                }
                Token::Number(_) => {
                    if self.peek().is_some_and(|next| !next.is_number() && next.starts_factor()) {
                        self.out.push(Token::Star);
                    }
                }
                Token::Command(Command::Log) => {
                    if self.peek() == Some(&Token::Underscore) {
                        self.advance();
                        self.two_groups()?;
                    }
                }
                Token::Command(Command::Sqrt) => {
                    if self.peek() == Some(&Token::Open(Delim::Bracket)) {
                        self.two_groups()?;
                    }
                }
                Token::Variable(_) => self.multiply_if_factor_follows(),
                _ => {}
            }
        }

        self.depth -= 1;
        Ok(())
    }

    /// `{a}{b}`: two independently rewritten groups, then a factor check on
    /// whatever follows the pair
    fn two_groups(&mut self) -> Result<(), ParseError> {
        if self.group()? && self.group()? {
            self.multiply_if_factor_follows();
        }
        Ok(())
    }

    /// A delimited group, or a single atomic token standing in for one.
    /// Returns false at end of input.
    fn group(&mut self) -> Result<bool, ParseError> {
        match self.advance() {
            Some(token) if token.is_opening() => {
                self.rewrite_group()?;
                Ok(true)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }
}
