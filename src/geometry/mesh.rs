// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Output buffers of a tessellation pass

use super::{BoundingBox, Triangle, Vec3};
use serde::{Deserialize, Serialize};

/// Unindexed triangle soup with per-vertex normals
///
/// Vertex `i` occupies `vertices[3i..3i + 3]`; its normal sits at the same
/// offset in `normals`. Every three consecutive vertices form a triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
}

impl SurfaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangle_count * 9),
            normals: Vec::with_capacity(triangle_count * 9),
        }
    }

    /// Append the positions of one triangle; normals are filled separately
    pub fn push_triangle(&mut self, tri: &Triangle) {
        for v in tri {
            self.vertices.extend_from_slice(&[v.x, v.y, v.z]);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_column_slice(&self.vertices[3 * i..3 * i + 3])
    }

    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::from_column_slice(&self.normals[3 * i..3 * i + 3])
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(move |t| {
            [
                self.position(3 * t),
                self.position(3 * t + 1),
                self.position(3 * t + 2),
            ]
        })
    }

    /// Multiply every position by `factor`; normals are unaffected by a
    /// uniform scale
    pub fn scale(&mut self, factor: f32) {
        for c in &mut self.vertices {
            *c *= factor;
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_positions(&self.vertices)
    }
}

/// Grid vertices drawn through a triangle-strip index buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedSurface {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl IndexedSurface {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_positions(&self.vertices)
    }
}
