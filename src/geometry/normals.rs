// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smooth per-vertex normals

use super::continuity::face_normal;
use super::{Triangle, Vec3, Vec3Ext, VertexKey};
use ahash::AHashMap;

/// Sums unnormalized face normals per vertex position
///
/// Coincident corners of neighbouring triangles share one entry, so the
/// resulting normal is area-weighted across every face touching that point.
#[derive(Debug, Default)]
pub struct NormalAccumulator {
    sums: AHashMap<VertexKey, Vec3>,
}

impl NormalAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            sums: AHashMap::with_capacity(vertices),
        }
    }

    pub fn add_triangle(&mut self, tri: &Triangle) {
        let normal = face_normal(tri);
        for corner in tri {
            *self.sums.entry(VertexKey::new(corner)).or_insert_with(Vec3::zeros) += normal;
        }
    }

    /// Unit normal at `position`, zero if nothing was accumulated there or
    /// the contributions cancel out
    pub fn normal_at(&self, position: &Vec3) -> Vec3 {
        self.sums
            .get(&VertexKey::new(position))
            .map(Vec3Ext::normalize_or_zero)
            .unwrap_or_else(Vec3::zeros)
    }

    /// Flat normal buffer matching a flat position buffer
    pub fn normals_for(&self, vertices: &[f32]) -> Vec<f32> {
        let mut normals = Vec::with_capacity(vertices.len());
        for chunk in vertices.chunks_exact(3) {
            let n = self.normal_at(&Vec3::new(chunk[0], chunk[1], chunk[2]));
            normals.extend_from_slice(&[n.x, n.y, n.z]);
        }
        normals
    }

    /// Number of distinct positions seen
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}
