// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Abstract Syntax Tree module
//!
//! Defines the expression tree produced by the parser and its evaluator

mod evaluator;
mod node;

pub use evaluator::{evaluate, Bindings, Evaluator};
pub use node::{BinaryOp, Expr, TrigFn};
