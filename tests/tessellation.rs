// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end tessellation tests

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use texsurf::geometry::{clip_triangle, Vec3};
use texsurf::{render, Evaluator, GridConfig, Tessellator};

fn raw(step: usize, range: f32, clip: bool) -> GridConfig {
    GridConfig::new(step, range, clip).with_display_bound(None)
}

#[test]
fn test_paraboloid_grid_samples() {
    let evaluator = Evaluator::from_source("x^2+y^2").unwrap();
    let field = Tessellator::new(&evaluator, raw(3, 1.0, true))
        .unwrap()
        .sample()
        .unwrap();

    let heights: Vec<f32> = field.heights().collect();
    assert_eq!(heights, vec![2.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 2.0]);

    let corners: Vec<(f32, f32)> = field.points().iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(corners[0], (-1.0, -1.0));
    assert_eq!(corners[4], (0.0, 0.0));
    assert_eq!(corners[8], (1.0, 1.0));
}

#[test]
fn test_normal_buffer_invariant() {
    let mesh = render("\\sin{x}\\cos{y}", &GridConfig::new(30, 3.0, true)).unwrap();
    assert!(!mesh.is_empty());
    assert_eq!(mesh.normals.len(), mesh.vertices.len());

    for i in 0..mesh.vertex_count() {
        let n = mesh.normal(i);
        if n != Vec3::zeros() {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_clipping_inside_mesh_is_identity() {
    // |0.2xy| <= 0.8 stays within the ±2 bound
    let evaluator = Evaluator::from_source("0.2xy").unwrap();
    let clipped = Tessellator::new(&evaluator, raw(12, 2.0, true))
        .unwrap()
        .generate()
        .unwrap();
    let unclipped = Tessellator::new(&evaluator, raw(12, 2.0, false))
        .unwrap()
        .generate()
        .unwrap();
    assert_eq!(clipped, unclipped);
}

#[test]
fn test_clipping_is_idempotent() {
    let evaluator = Evaluator::from_source("x^3-y").unwrap();
    let mesh = Tessellator::new(&evaluator, raw(15, 2.0, true))
        .unwrap()
        .generate()
        .unwrap();

    let first: Vec<_> = mesh.triangles().collect();
    let mut again = Vec::new();
    for tri in &first {
        clip_triangle(tri, 2.0, &mut again);
    }
    assert_eq!(again, first);
}

#[test]
fn test_smooth_surfaces_lose_no_triangles() {
    let mut rng = StdRng::seed_from_u64(7);
    let step = 9;

    for _ in 0..20 {
        let coefficients: Vec<(&str, f64)> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|name| (name, rng.gen_range(-1.0..1.0)))
            .collect();
        let evaluator = Evaluator::from_source("a x^2 + b x y + c y^2 + d x + e y")
            .unwrap()
            .with_bindings(coefficients.clone());

        let mesh = Tessellator::new(&evaluator, raw(step, 1.0, false))
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(
            mesh.triangle_count(),
            2 * (step - 1) * (step - 1),
            "dropped triangles for {coefficients:?}"
        );
    }
}

#[test]
fn test_tangent_poles_are_cut_out() {
    let evaluator = Evaluator::from_source("\\tan{x}").unwrap();
    let tessellator = Tessellator::new(&evaluator, raw(61, 3.0, false)).unwrap();
    let mesh = tessellator.generate().unwrap();

    assert!(mesh.triangle_count() < 2 * 60 * 60);
    for tri in mesh.triangles() {
        let (lo, hi) = tri
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.z), hi.max(v.z))
            });
        assert!(hi - lo < 40.0, "wall across a pole survived: {tri:?}");
    }
}

#[test]
fn test_sign_jump_is_cut_out() {
    // x = 0 falls between two grid columns, so every sample is finite
    let evaluator = Evaluator::from_source("\\frac{x}{\\left|x\\right|}").unwrap();
    let mesh = Tessellator::new(&evaluator, raw(250, 10.0, false))
        .unwrap()
        .generate()
        .unwrap();

    for tri in mesh.triangles() {
        let (lo, hi) = tri
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.z), hi.max(v.z))
            });
        assert!(hi - lo < 1.5, "wall across the jump survived: {tri:?}");
    }
    // Only the column of quads straddling x = 0 is removed
    assert_eq!(mesh.triangle_count(), 2 * 249 * 249 - 2 * 249);
}

#[test]
fn test_holes_from_undefined_samples() {
    let mesh = render("\\frac{1}{x+y}", &GridConfig::new(11, 1.0, true)).unwrap();
    assert!(mesh.vertices.iter().all(|c| c.is_finite()));
    assert!(mesh.triangle_count() < 2 * 10 * 10);
}

#[test]
fn test_display_remap_is_uniform() {
    let config = GridConfig::new(5, 2.0, true).with_display_bound(Some(10.0));
    let mesh = render("x", &config).unwrap();
    let bbox = mesh.bounding_box();
    assert_eq!((bbox.min.x, bbox.max.x), (-10.0, 10.0));
    assert_eq!((bbox.min.y, bbox.max.y), (-10.0, 10.0));
    assert_eq!((bbox.min.z, bbox.max.z), (-10.0, 10.0));
}

#[test]
fn test_indexed_surface() {
    let evaluator = Evaluator::from_source("\\sin{x}+y").unwrap();
    let surface = Tessellator::new(&evaluator, GridConfig::new(6, 1.0, true))
        .unwrap()
        .generate_indexed()
        .unwrap();

    assert_eq!(surface.vertex_count(), 36);
    assert_eq!(surface.normals.len(), surface.vertices.len());
    assert!(surface
        .indices
        .iter()
        .all(|&i| (i as usize) < surface.vertex_count()));
    // One degenerate join between each pair of strips
    assert_eq!(surface.indices.len(), 5 * 12 + 4);
}
