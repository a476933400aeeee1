// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parser module - tokenizing, implicit multiplication and parsing
//!
//! text -> [`tokenize`] -> [`insert_implicit_multiplication`] ->
//! [`parse_tokens`] -> [`Expr`]

mod implicit;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod token;

pub use implicit::insert_implicit_multiplication;
pub use lexer::tokenize;
pub use parser::parse_tokens;
pub use token::{Command, Delim, Token};

use crate::ast::Expr;
use crate::error::Result;

/// Deepest nesting of groups and operator chains accepted from source
const MAX_DEPTH: usize = 256;

/// Tokenize and rewrite, producing the stream the parser consumes
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let tokens = tokenize(source)?;
    Ok(insert_implicit_multiplication(&tokens)?)
}

/// Parse a LaTeX-style formula into an AST
pub fn parse_expression(source: &str) -> Result<Expr> {
    let tokens = lex(source)?;
    Ok(parse_tokens(&tokens)?)
}
