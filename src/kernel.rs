// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API for one user-edited formula

use crate::ast::{Evaluator, Expr};
use crate::config::GridConfig;
use crate::error::Result;
use crate::geometry::{IndexedSurface, SurfaceMesh, Tessellator};
use crate::parser::parse_expression;

/// Compiled formula plus the variable values the host has set on it
#[derive(Debug, Clone)]
pub struct Kernel {
    source: String,
    evaluator: Evaluator,
}

impl Kernel {
    /// Compile `source` and bind `variables`
    pub fn new<I, K>(source: &str, variables: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let evaluator = Evaluator::from_source(source)?.with_bindings(variables);
        Ok(Self {
            source: source.to_owned(),
            evaluator,
        })
    }

    /// Replace the formula after an edit
    ///
    /// Bindings from the previous formula are dropped and `variables` bound
    /// instead. On a lex or parse error the kernel keeps its previous state.
    pub fn update<I, K>(&mut self, source: &str, variables: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let ast = parse_expression(source)?;
        self.evaluator.replace_ast(ast);
        self.evaluator.bind_all(variables);
        self.source = source.to_owned();
        Ok(())
    }

    pub fn bind(&mut self, name: &str, value: f64) {
        self.evaluator.bind(name, value);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expr {
        self.evaluator.ast()
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Value of the formula at `(x, y)` with the current bindings
    pub fn evaluate_at(&self, x: f64, y: f64) -> Result<f64> {
        let mut local = self.evaluator.clone();
        local.bind("x", x);
        local.bind("y", y);
        Ok(local.evaluate()?)
    }

    /// A tessellation pass detached from this kernel
    pub fn tessellator(&self, config: GridConfig) -> Result<Tessellator> {
        Tessellator::new(&self.evaluator, config)
    }

    pub fn generate(&self, config: GridConfig) -> Result<SurfaceMesh> {
        self.tessellator(config)?.generate()
    }

    pub fn generate_indexed(&self, config: GridConfig) -> Result<IndexedSurface> {
        self.tessellator(config)?.generate_indexed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, EvalError};

    const NO_VARS: [(&str, f64); 0] = [];

    #[test]
    fn test_kernel_basic_generate() {
        let kernel = Kernel::new("z=a x+y", [("a", 2.0)]).unwrap();
        assert_eq!(kernel.source(), "z=a x+y");
        assert_eq!(kernel.evaluate_at(1.0, 1.0).unwrap(), 3.0);

        let mesh = kernel.generate(GridConfig::new(4, 1.0, false)).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 3 * 3);
    }

    #[test]
    fn test_update_clears_bindings() {
        let mut kernel = Kernel::new("a x", [("a", 2.0)]).unwrap();
        kernel.update("b y", [("b", 3.0)]).unwrap();
        assert!(kernel.evaluator().bindings().get("a").is_none());
        assert_eq!(kernel.evaluate_at(0.0, 2.0).unwrap(), 6.0);

        kernel.update("a y", NO_VARS).unwrap();
        assert_eq!(
            kernel.evaluate_at(0.0, 1.0),
            Err(Error::Eval(EvalError::UndefinedVariable("a".into())))
        );
    }

    #[test]
    fn test_failed_update_keeps_previous_formula() {
        let mut kernel = Kernel::new("a x", [("a", 2.0)]).unwrap();
        assert!(kernel.update("\\frac{x", NO_VARS).is_err());
        assert_eq!(kernel.source(), "a x");
        assert_eq!(kernel.evaluate_at(3.0, 0.0).unwrap(), 6.0);
    }

    #[test]
    fn test_bind_then_generate_indexed() {
        let mut kernel = Kernel::new("k", NO_VARS).unwrap();
        assert!(kernel.generate_indexed(GridConfig::new(3, 1.0, true)).is_err());
        kernel.bind("k", 0.5);
        let surface = kernel.generate_indexed(GridConfig::new(3, 1.0, true)).unwrap();
        assert_eq!(surface.vertex_count(), 9);
    }
}
