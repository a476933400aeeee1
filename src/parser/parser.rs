// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Recursive-descent parser
//!
//! Precedence, low to high: `+ -`, `* /`, unary minus, `^` (right
//! associative), primaries. `( )`, `{ }` and `[ ]` group interchangeably but
//! must close with their own kind. Nesting, and the length of operator
//! chains, is capped so that hostile input fails instead of exhausting the
//! stack.

use super::token::{Command, Delim, Token};
use super::MAX_DEPTH;
use crate::ast::{BinaryOp, Expr};
use crate::error::ParseError;

/// Parse a token stream that already has explicit multiplication
pub fn parse_tokens(tokens: &[Token]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    // `z = ...` plots its right-hand side
    if let [Token::Variable(_), Token::Equals, ..] = tokens {
        parser.pos = 2;
    }

    let expr = parser.additive()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::TrailingInput(token.clone())),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    /// Each operator in a left-associative chain deepens the tree by one
    fn additive(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let right = self.multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let right = self.unary()?;
            left = Expr::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    /// Every recursive path (groups, function arguments, exponents) passes
    /// through here
    fn unary(&mut self) -> Result<Expr, ParseError> {
        self.descend()?;
        let expr = self.signed();
        self.depth -= 1;
        expr
    }

    fn signed(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                let operand = self.unary()?;
                Ok(Expr::binary(BinaryOp::Sub, Expr::number(0.0), operand))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.primary()?;
        if self.eat(&Token::Caret) {
            let exponent = self.unary()?;
            Ok(Expr::binary(BinaryOp::Pow, base, exponent))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.next().ok_or(ParseError::UnexpectedEnd("operand"))?;
        match token {
            Token::Number(value) => Ok(Expr::number(*value)),
            Token::Variable(name) => Ok(Expr::variable(name.to_string())),
            Token::Open(delim) => self.delimited(*delim),
            Token::Command(command) => self.command(*command),
            other => Err(ParseError::UnexpectedToken {
                found: other.clone(),
                expected: "operand",
            }),
        }
    }

    /// Body of a group whose opener was just consumed
    fn delimited(&mut self, delim: Delim) -> Result<Expr, ParseError> {
        let inner = self.additive()?;
        self.close(Token::Open(delim), Token::Close(delim))?;
        Ok(inner)
    }

    fn close(&mut self, open: Token, expected: Token) -> Result<(), ParseError> {
        match self.next() {
            Some(found) if *found == expected => Ok(()),
            Some(found) if found.is_closing() => Err(ParseError::MismatchedDelimiter {
                expected,
                found: found.clone(),
            }),
            Some(found) => Err(ParseError::UnexpectedToken {
                found: found.clone(),
                expected: "closing delimiter",
            }),
            None => Err(ParseError::UnclosedDelimiter(open)),
        }
    }

    fn command(&mut self, command: Command) -> Result<Expr, ParseError> {
        let expr = match command {
            Command::Frac => {
                let numerator = self.group()?;
                let denominator = self.group()?;
                Expr::Fraction {
                    numerator: Box::new(numerator),
                    denominator: Box::new(denominator),
                }
            }
            Command::Sqrt => {
                let degree = if self.eat(&Token::Open(Delim::Bracket)) {
                    self.delimited(Delim::Bracket)?
                } else {
                    Expr::number(2.0)
                };
                let radicand = self.unary()?;
                Expr::Root {
                    radicand: Box::new(radicand),
                    degree: Box::new(degree),
                }
            }
            Command::Log => {
                let base = if self.eat(&Token::Underscore) {
                    self.group()?
                } else {
                    Expr::number(10.0)
                };
                let argument = self.unary()?;
                Expr::Logarithm {
                    base: Box::new(base),
                    argument: Box::new(argument),
                }
            }
            Command::Ln => Expr::NaturalLog(Box::new(self.unary()?)),
            Command::Lg => Expr::Log2(Box::new(self.unary()?)),
            Command::Trig(func) => Expr::Trig {
                func,
                argument: Box::new(self.unary()?),
            },
            Command::LeftAbs => {
                let inner = self.additive()?;
                self.close(
                    Token::Command(Command::LeftAbs),
                    Token::Command(Command::RightAbs),
                )?;
                Expr::AbsoluteValue(Box::new(inner))
            }
            Command::RightAbs => {
                return Err(ParseError::UnexpectedToken {
                    found: Token::Command(command),
                    expected: "operand",
                })
            }
        };
        Ok(expr)
    }

    /// A delimited group, or a single number or variable
    fn group(&mut self) -> Result<Expr, ParseError> {
        match self.next() {
            Some(Token::Open(delim)) => self.delimited(*delim),
            Some(Token::Number(value)) => Ok(Expr::number(*value)),
            Some(Token::Variable(name)) => Ok(Expr::variable(name.to_string())),
            Some(other) => Err(ParseError::UnexpectedToken {
                found: other.clone(),
                expected: "group",
            }),
            None => Err(ParseError::UnexpectedEnd("group")),
        }
    }
}
