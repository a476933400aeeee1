// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Surface tessellation
//!
//! One pass runs Sample → Clip/Stitch → Normal-Accumulate → Done and either
//! returns complete buffers or an error; partial output is never exposed.
//!
//! Grid quads are split along the same diagonal everywhere. For the quad
//! whose upper edge is grid row `r`:
//!
//! ```text
//!   (r, c) ---- (r, c+1)
//!     |  \   T1    |
//!     | T0  \      |
//!  (r-1, c) -- (r-1, c+1)
//! ```
//!
//! Gradients of a triangle are compared against the same-orientation
//! triangle of the quads left/right (x axis) and below/above (y axis).

use super::clip::clip_triangle;
use super::continuity::{
    triangle_gradient, AxisNeighbors, DiscontinuityDetector, Gradient, Surrounding,
};
use super::{
    triangle_strip_indices, HeightField, IndexedSurface, NormalAccumulator, SurfaceMesh,
    Triangle, Vec3Ext,
};
use crate::ast::Evaluator;
use crate::config::GridConfig;
use crate::error::Result;
use log::debug;
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

/// Progress of a tessellation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sample,
    Stitch,
    Normals,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Sample => "sample",
            Stage::Stitch => "clip/stitch",
            Stage::Normals => "normals",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// A single generation request
///
/// Owns its own evaluator copy, so the caller's evaluator can be rebound or
/// replaced while the pass runs.
#[derive(Debug, Clone)]
pub struct Tessellator {
    evaluator: Evaluator,
    config: GridConfig,
}

impl Tessellator {
    pub fn new(evaluator: &Evaluator, config: GridConfig) -> Result<Self> {
        config.validate()?;
        let mut local = evaluator.copy();
        local.bind_all(evaluator.bindings().iter().map(|(k, v)| (k, *v)));
        Ok(Self {
            evaluator: local,
            config,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn sample(&self) -> Result<HeightField> {
        HeightField::sample(&self.evaluator, &self.config)
    }

    /// Triangles of `field` that survive discontinuity detection and, when
    /// enabled, clipping against `z = ±range`
    pub fn stitch(&self, field: &HeightField) -> Vec<Triangle> {
        let step = field.step();
        let quads = step - 1;
        let detector = DiscontinuityDetector::new(self.config.range);

        let quad_triangles = |qr: usize, c: usize| -> [Triangle; 2] {
            let r = qr + 1;
            [
                [field.point(r, c), field.point(r - 1, c), field.point(r, c + 1)],
                [
                    field.point(r, c + 1),
                    field.point(r - 1, c),
                    field.point(r - 1, c + 1),
                ],
            ]
        };

        let gradients: Vec<[Gradient; 2]> = (0..quads * quads)
            .into_par_iter()
            .map(|q| quad_triangles(q / quads, q % quads).map(|t| triangle_gradient(&t)))
            .collect();
        let gradient = |qr: usize, c: usize, k: usize| gradients[qr * quads + c][k];

        (0..quads)
            .into_par_iter()
            .flat_map_iter(|qr| {
                let mut out = Vec::with_capacity(2 * quads);
                for c in 0..quads {
                    for (k, tri) in quad_triangles(qr, c).iter().enumerate() {
                        let surrounding = Surrounding {
                            x: AxisNeighbors::new(
                                (c > 0).then(|| gradient(qr, c - 1, k).x),
                                (c + 1 < quads).then(|| gradient(qr, c + 1, k).x),
                            ),
                            y: AxisNeighbors::new(
                                (qr > 0).then(|| gradient(qr - 1, c, k).y),
                                (qr + 1 < quads).then(|| gradient(qr + 1, c, k).y),
                            ),
                        };

                        if detector.is_discontinuous(tri, &surrounding) {
                            continue;
                        }
                        if self.config.clip {
                            clip_triangle(tri, self.config.range, &mut out);
                        } else {
                            out.push(*tri);
                        }
                    }
                }
                out
            })
            .collect()
    }

    /// Run a full pass and return the triangle soup with smooth normals
    pub fn generate(&self) -> Result<SurfaceMesh> {
        self.generate_with(|_| {})
    }

    /// [`generate`](Self::generate), reporting each stage as it starts
    pub fn generate_with(&self, mut on_stage: impl FnMut(Stage)) -> Result<SurfaceMesh> {
        on_stage(Stage::Sample);
        let start = Instant::now();
        let field = self.sample()?;
        debug!(
            "{}: {}x{} grid in {:?}",
            Stage::Sample,
            field.step(),
            field.step(),
            start.elapsed()
        );

        on_stage(Stage::Stitch);
        let start = Instant::now();
        let triangles = self.stitch(&field);
        debug!(
            "{}: kept {} triangles in {:?}",
            Stage::Stitch,
            triangles.len(),
            start.elapsed()
        );

        on_stage(Stage::Normals);
        let start = Instant::now();
        let mut normals = NormalAccumulator::with_capacity(triangles.len());
        let mut mesh = SurfaceMesh::with_capacity(triangles.len());
        for tri in &triangles {
            normals.add_triangle(tri);
            mesh.push_triangle(tri);
        }
        mesh.normals = normals.normals_for(&mesh.vertices);
        if let Some(scale) = self.config.display_scale() {
            mesh.scale(scale);
        }
        debug!(
            "{}: {} distinct positions in {:?}",
            Stage::Normals,
            normals.len(),
            start.elapsed()
        );

        on_stage(Stage::Done);
        Ok(mesh)
    }

    /// Sampled grid as shared vertices drawn through a triangle strip
    ///
    /// No clipping or discontinuity removal is applied; undefined samples
    /// stay NaN and get a zero normal.
    pub fn generate_indexed(&self) -> Result<IndexedSurface> {
        let field = self.sample()?;
        let step = field.step();

        let mut normals = NormalAccumulator::with_capacity(step * step);
        for r in 1..step {
            for c in 0..step - 1 {
                let lower = [field.point(r, c), field.point(r - 1, c), field.point(r, c + 1)];
                let upper = [
                    field.point(r, c + 1),
                    field.point(r - 1, c),
                    field.point(r - 1, c + 1),
                ];
                for tri in [lower, upper] {
                    if tri.iter().all(Vec3Ext::all_finite) {
                        normals.add_triangle(&tri);
                    }
                }
            }
        }

        let mut vertices: Vec<f32> = field.points().iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        let normals = normals.normals_for(&vertices);
        if let Some(scale) = self.config.display_scale() {
            for v in &mut vertices {
                *v *= scale;
            }
        }

        debug!("indexed surface: {} vertices", step * step);
        Ok(IndexedSurface {
            vertices,
            normals,
            indices: triangle_strip_indices(step, step),
        })
    }
}
