// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Texsurf
//!
//! Compiles LaTeX-style formulas such as `z = \sin{x} \cos{y}` and
//! tessellates them into clipped, continuity-aware surface meshes with
//! per-vertex normals.

pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod jobs;
pub mod kernel;
pub mod parser;
pub mod utils;

pub use ast::{Evaluator, Expr};
pub use config::GridConfig;
pub use error::{Error, Result};
pub use geometry::{IndexedSurface, SurfaceMesh, Tessellator};
pub use jobs::{MeshPublisher, Regenerator};
pub use kernel::Kernel;
pub use parser::parse_expression;

/// Main entry point for rendering a formula without extra variables
pub fn render(source: &str, config: &GridConfig) -> Result<SurfaceMesh> {
    let evaluator = Evaluator::from_source(source)?;
    Tessellator::new(&evaluator, *config)?.generate()
}
