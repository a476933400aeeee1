// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! AST node definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Trigonometric, inverse trigonometric and hyperbolic functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
    Arccsc,
    Arcsec,
    Arccot,
    Sinh,
    Cosh,
    Tanh,
}

impl TrigFn {
    pub const ALL: [TrigFn; 15] = [
        TrigFn::Sin,
        TrigFn::Cos,
        TrigFn::Tan,
        TrigFn::Csc,
        TrigFn::Sec,
        TrigFn::Cot,
        TrigFn::Arcsin,
        TrigFn::Arccos,
        TrigFn::Arctan,
        TrigFn::Arccsc,
        TrigFn::Arcsec,
        TrigFn::Arccot,
        TrigFn::Sinh,
        TrigFn::Cosh,
        TrigFn::Tanh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::Csc => "csc",
            TrigFn::Sec => "sec",
            TrigFn::Cot => "cot",
            TrigFn::Arcsin => "arcsin",
            TrigFn::Arccos => "arccos",
            TrigFn::Arctan => "arctan",
            TrigFn::Arccsc => "arccsc",
            TrigFn::Arcsec => "arcsec",
            TrigFn::Arccot => "arccot",
            TrigFn::Sinh => "sinh",
            TrigFn::Cosh => "cosh",
            TrigFn::Tanh => "tanh",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Expression tree. Every node owns its children; cloning is a deep copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Variable(String),
    BinaryOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Fraction {
        numerator: Box<Expr>,
        denominator: Box<Expr>,
    },
    Root {
        radicand: Box<Expr>,
        degree: Box<Expr>,
    },
    Logarithm {
        base: Box<Expr>,
        argument: Box<Expr>,
    },
    NaturalLog(Box<Expr>),
    Log2(Box<Expr>),
    Trig {
        func: TrigFn,
        argument: Box<Expr>,
    },
    AbsoluteValue(Box<Expr>),
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Get child nodes in evaluation order
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Number(_) | Expr::Variable(_) => Vec::new(),
            Expr::BinaryOp { left, right, .. } => vec![&**left, &**right],
            Expr::Fraction {
                numerator,
                denominator,
            } => vec![&**numerator, &**denominator],
            Expr::Root { radicand, degree } => vec![&**radicand, &**degree],
            Expr::Logarithm { base, argument } => vec![&**base, &**argument],
            Expr::NaturalLog(e) | Expr::Log2(e) | Expr::AbsoluteValue(e) => vec![&**e],
            Expr::Trig { argument, .. } => vec![&**argument],
        }
    }

    /// Names of all free variables, sorted
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Expr::Variable(name) = node {
                names.insert(name.as_str());
            }
            stack.extend(node.children());
        }
        names
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(Expr::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_are_collected_once() {
        let expr = Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Mul, Expr::variable("x"), Expr::variable("x")),
            Expr::Trig {
                func: TrigFn::Sin,
                argument: Box::new(Expr::variable("y")),
            },
        );
        let vars: Vec<_> = expr.variables().into_iter().collect();
        assert_eq!(vars, vec!["x", "y"]);
        assert_eq!(expr.node_count(), 6);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Expr::NaturalLog(Box::new(Expr::variable("x")));
        let mut copy = original.clone();
        if let Expr::NaturalLog(arg) = &mut copy {
            **arg = Expr::number(2.0);
        }
        assert_eq!(original, Expr::NaturalLog(Box::new(Expr::variable("x"))));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_trig_names_round_trip() {
        for func in TrigFn::ALL {
            assert_eq!(TrigFn::from_name(func.name()), Some(func));
        }
        assert_eq!(TrigFn::from_name("sech"), None);
    }
}
