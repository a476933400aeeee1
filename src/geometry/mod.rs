// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - height field sampling and surface tessellation

mod bbox;
pub mod clip;
pub mod continuity;
mod grid;
mod mesh;
mod normals;
mod strip;
mod tessellator;
mod vec3;

pub use bbox::BoundingBox;
pub use clip::clip_triangle;
pub use continuity::DiscontinuityDetector;
pub use grid::HeightField;
pub use mesh::{IndexedSurface, SurfaceMesh};
pub use normals::NormalAccumulator;
pub use strip::triangle_strip_indices;
pub use tessellator::{Stage, Tessellator};
pub use vec3::{Triangle, Vec3, Vec3Ext, VertexKey};
