// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Height field sampling over a square grid

use super::Vec3;
use crate::ast::Evaluator;
use crate::config::GridConfig;
use crate::error::{EvalError, Result};
use crate::utils::snap_to_zero;
use rayon::prelude::*;

/// Samples of `z = f(x, y)` on a `step × step` grid, row-major with `y`
/// increasing by row and `x` by column
#[derive(Debug, Clone)]
pub struct HeightField {
    step: usize,
    points: Vec<Vec3>,
}

impl HeightField {
    /// Evaluate `evaluator` at every grid corner
    ///
    /// `x` and `y` are bound per sample; every other variable keeps the
    /// value bound on `evaluator`. Rows are sampled in parallel, each worker
    /// with its own evaluator copy.
    pub fn sample(evaluator: &Evaluator, config: &GridConfig) -> Result<Self> {
        config.validate()?;

        if let Some(name) = evaluator.unbound_variables(&["x", "y"]).first() {
            return Err(EvalError::UndefinedVariable(name.to_string()).into());
        }

        let step = config.step;
        let range = config.range as f64;
        let step_size = config.step_size();

        let rows = (0..step)
            .into_par_iter()
            .map_init(
                || {
                    let mut local = evaluator.copy();
                    local.bind_all(evaluator.bindings().iter().map(|(k, v)| (k, *v)));
                    local
                },
                |local, row| {
                    let y = snap_to_zero(-range + row as f64 * step_size);
                    local.bind("y", y);
                    (0..step)
                        .map(|col| {
                            let x = snap_to_zero(-range + col as f64 * step_size);
                            local.bind("x", x);
                            let z = match local.evaluate() {
                                Ok(z) => snap_to_zero(z),
                                // A secant pole is a hole in the surface, not a failed pass
                                Err(EvalError::DivisionByZero) => f64::NAN,
                                Err(e) => return Err(e),
                            };
                            Ok(Vec3::new(x as f32, y as f32, z as f32))
                        })
                        .collect::<Result<Vec<_>, EvalError>>()
                },
            )
            .collect::<Result<Vec<_>, EvalError>>()?;

        Ok(Self {
            step,
            points: rows.into_iter().flatten().collect(),
        })
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn point(&self, row: usize, col: usize) -> Vec3 {
        self.points[row * self.step + col]
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().map(|p| p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn grid(step: usize, range: f32) -> GridConfig {
        GridConfig::new(step, range, true)
    }

    #[test]
    fn test_paraboloid_samples() {
        let evaluator = Evaluator::from_source("x^2+y^2").unwrap();
        let field = HeightField::sample(&evaluator, &grid(3, 1.0)).unwrap();

        let heights: Vec<f32> = field.heights().collect();
        assert_eq!(heights, vec![2.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 2.0]);
        assert_eq!(field.point(0, 2), Vec3::new(1.0, -1.0, 2.0));
        assert_eq!(field.point(2, 0), Vec3::new(-1.0, 1.0, 2.0));
    }

    #[test]
    fn test_extra_bindings_are_used() {
        let evaluator = Evaluator::from_source("a x").unwrap().with_bindings([("a", 2.0)]);
        let field = HeightField::sample(&evaluator, &grid(2, 1.0)).unwrap();
        let heights: Vec<f32> = field.heights().collect();
        assert_eq!(heights, vec![-2.0, 2.0, -2.0, 2.0]);
        // Caller's table is untouched
        assert_eq!(evaluator.bindings().len(), 1);
    }

    #[test]
    fn test_unbound_variable_fails_before_sampling() {
        let evaluator = Evaluator::from_source("x+b").unwrap();
        assert_eq!(
            HeightField::sample(&evaluator, &grid(3, 1.0)).unwrap_err(),
            Error::Eval(EvalError::UndefinedVariable("b".into()))
        );
    }

    #[test]
    fn test_undefined_points_are_nan() {
        let evaluator = Evaluator::from_source("\\frac{1}{x}").unwrap();
        let field = HeightField::sample(&evaluator, &grid(3, 1.0)).unwrap();
        assert!(field.point(1, 1).z.is_nan());
        assert_eq!(field.point(1, 2).z, 1.0);
    }

    #[test]
    fn test_noise_snapped_to_zero() {
        let evaluator = Evaluator::from_source("\\sin{x}").unwrap();
        let field = HeightField::sample(
            &evaluator,
            &grid(3, std::f32::consts::PI),
        )
        .unwrap();
        assert_eq!(field.point(0, 0).z, 0.0);
        assert_eq!(field.point(0, 2).z, 0.0);
    }

    #[test]
    fn test_invalid_grid() {
        let evaluator = Evaluator::from_source("x").unwrap();
        assert!(matches!(
            HeightField::sample(&evaluator, &grid(1, 1.0)),
            Err(Error::Grid(_))
        ));
    }
}
