// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! AST Evaluator - reduces an expression to a number
//!
//! Evaluation is total over the reals: undefined points (division by zero,
//! logarithms of zero, poles of `tan`/`csc`/`cot`) produce NaN, which the
//! tessellator later cuts out of the mesh. Only an unbound variable and the
//! pole of `sec` are reported as errors.

use super::{BinaryOp, Expr, TrigFn};
use crate::error::{EvalError, Result};
use crate::parser::parse_expression;
use crate::utils::near_zero;
use ahash::AHashMap;

/// Variable name to current value
pub type Bindings = AHashMap<String, f64>;

/// Evaluate `expr` against a binding table
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<f64, EvalError> {
    let value = match expr {
        Expr::Number(value) => *value,
        Expr::Variable(name) => *bindings
            .get(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?,
        Expr::BinaryOp { op, left, right } => {
            let left = evaluate(left, bindings)?;
            let right = evaluate(right, bindings)?;
            match op {
                BinaryOp::Add => left + right,
                BinaryOp::Sub => left - right,
                BinaryOp::Mul => left * right,
                BinaryOp::Div => guarded_div(left, right),
                BinaryOp::Pow => left.powf(right),
            }
        }
        Expr::Fraction {
            numerator,
            denominator,
        } => {
            let numerator = evaluate(numerator, bindings)?;
            guarded_div(numerator, evaluate(denominator, bindings)?)
        }
        Expr::Root { radicand, degree } => {
            let radicand = evaluate(radicand, bindings)?;
            let degree = evaluate(degree, bindings)?;
            if near_zero(degree) {
                f64::NAN
            } else {
                radicand.powf(1.0 / degree)
            }
        }
        Expr::Logarithm { base, argument } => {
            let base = evaluate(base, bindings)?;
            let argument = evaluate(argument, bindings)?;
            if near_zero(base) || near_zero(base.ln()) || near_zero(argument) {
                f64::NAN
            } else {
                argument.ln() / base.ln()
            }
        }
        Expr::NaturalLog(argument) => {
            let argument = evaluate(argument, bindings)?;
            if near_zero(argument) {
                f64::NAN
            } else {
                argument.ln()
            }
        }
        Expr::Log2(argument) => {
            let argument = evaluate(argument, bindings)?;
            if near_zero(argument) {
                f64::NAN
            } else {
                argument.log2()
            }
        }
        Expr::Trig { func, argument } => trig(*func, evaluate(argument, bindings)?)?,
        Expr::AbsoluteValue(argument) => evaluate(argument, bindings)?.abs(),
    };
    Ok(value)
}

fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if near_zero(denominator) {
        f64::NAN
    } else {
        numerator / denominator
    }
}

fn trig(func: TrigFn, x: f64) -> Result<f64, EvalError> {
    let value = match func {
        TrigFn::Sin => x.sin(),
        TrigFn::Cos => x.cos(),
        TrigFn::Tan => guarded_div(x.sin(), x.cos()),
        TrigFn::Csc => guarded_div(1.0, x.sin()),
        TrigFn::Sec => {
            let cos = x.cos();
            if near_zero(cos) {
                return Err(EvalError::DivisionByZero);
            }
            1.0 / cos
        }
        TrigFn::Cot => guarded_div(x.cos(), x.sin()),
        TrigFn::Arcsin => x.asin(),
        TrigFn::Arccos => x.acos(),
        TrigFn::Arctan => x.atan(),
        TrigFn::Arccsc => guarded_div(1.0, x).asin(),
        TrigFn::Arcsec => guarded_div(1.0, x).acos(),
        TrigFn::Arccot => guarded_div(1.0, x).atan(),
        TrigFn::Sinh => x.sinh(),
        TrigFn::Cosh => x.cosh(),
        TrigFn::Tanh => x.tanh(),
    };
    Ok(value)
}

/// An AST together with its own binding table
///
/// The binding table is scratch state for one sweep. Concurrent sweeps each
/// take a [`copy`](Evaluator::copy) instead of sharing an instance.
#[derive(Debug, Clone)]
pub struct Evaluator {
    ast: Expr,
    bindings: Bindings,
}

impl Evaluator {
    pub fn new(ast: Expr) -> Self {
        Self {
            ast,
            bindings: Bindings::new(),
        }
    }

    /// Parse `source` and wrap the resulting AST
    pub fn from_source(source: &str) -> Result<Self> {
        Ok(Self::new(parse_expression(source)?))
    }

    pub fn with_bindings<I, K>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        self.bind_all(bindings);
        self
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Replace the AST, discarding the old tree and every binding
    pub fn replace_ast(&mut self, ast: Expr) {
        self.ast = ast;
        self.bindings.clear();
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Set a variable, reusing the existing slot when already bound
    pub fn bind(&mut self, name: &str, value: f64) {
        match self.bindings.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.bindings.insert(name.to_owned(), value);
            }
        }
    }

    pub fn bind_all<I, K>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        for (name, value) in bindings {
            self.bind(name.as_ref(), value);
        }
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    /// Free variables of the AST with no binding, ignoring `preset` names
    /// the caller will bind itself
    pub fn unbound_variables<'a>(&'a self, preset: &[&str]) -> Vec<&'a str> {
        self.ast
            .variables()
            .into_iter()
            .filter(|name| !preset.contains(name) && !self.bindings.contains_key(*name))
            .collect()
    }

    pub fn evaluate(&self) -> Result<f64, EvalError> {
        evaluate(&self.ast, &self.bindings)
    }

    /// Deep copy of the AST with an empty binding table
    pub fn copy(&self) -> Self {
        Self::new(self.ast.clone())
    }
}
