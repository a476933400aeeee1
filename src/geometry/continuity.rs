// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Discontinuity detection
//!
//! A triangle spanning a singularity (a pole of `tan`, a jump of `1/x`) shows
//! up as a nearly vertical wall whose slope flips sign relative to the
//! surface on either side of it. Such triangles are dropped instead of
//! rendered.

use super::{Triangle, Vec3, Vec3Ext};
use crate::utils::EPSILON;
use nalgebra::Vector2;

/// Estimated `(dz/dx, dz/dy)` of a triangle
pub type Gradient = Vector2<f32>;

/// Unit-normal z below which a triangle counts as a vertical wall
pub const VERTICAL_NORMAL_Z: f32 = 0.05;

/// Solve `g · (Δx, Δy) = Δz` for the two edges leaving `v0`, by Cramer's rule
///
/// Degenerate in-plane edges give a non-finite gradient.
pub fn triangle_gradient(tri: &Triangle) -> Gradient {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let det = e1.x * e2.y - e2.x * e1.y;
    Gradient::new(
        (e1.z * e2.y - e2.z * e1.y) / det,
        (e1.x * e2.z - e2.x * e1.z) / det,
    )
}

/// Three-valued sign: flat slopes (of either zero sign) agree only with
/// each other
fn slope_sign(g: f32) -> i8 {
    if g.abs() <= EPSILON as f32 {
        0
    } else if g > 0.0 {
        1
    } else {
        -1
    }
}

/// Unnormalized face normal, pointing to +z for grid triangles
pub fn face_normal(tri: &Triangle) -> Vec3 {
    (tri[2] - tri[1]).cross(&(tri[0] - tri[1]))
}

/// Same-axis gradient components of the neighbours on either side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisNeighbors {
    pub before: Option<f32>,
    pub after: Option<f32>,
}

impl AxisNeighbors {
    pub fn new(before: Option<f32>, after: Option<f32>) -> Self {
        Self {
            before: before.filter(|g| g.is_finite()),
            after: after.filter(|g| g.is_finite()),
        }
    }

    /// Both sides, substituting the opposite side for a missing one
    fn resolve(&self) -> Option<(f32, f32)> {
        match (self.before, self.after) {
            (Some(a), Some(b)) => Some((a, b)),
            (Some(a), None) => Some((a, a)),
            (None, Some(b)) => Some((b, b)),
            (None, None) => None,
        }
    }
}

/// Gradients of the up-to-four triangles around a candidate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surrounding {
    pub x: AxisNeighbors,
    pub y: AxisNeighbors,
}

#[derive(Debug, Clone, Copy)]
pub struct DiscontinuityDetector {
    threshold: f32,
}

impl DiscontinuityDetector {
    /// The slope jump threshold shrinks as the sampled range grows
    pub fn new(range: f32) -> Self {
        Self {
            threshold: 50.0 / (range * 0.25),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_discontinuous(&self, tri: &Triangle, surrounding: &Surrounding) -> bool {
        if !tri.iter().all(Vec3Ext::all_finite) {
            return true;
        }

        let gradient = triangle_gradient(tri);
        if !(gradient.x.is_finite() && gradient.y.is_finite()) {
            return true;
        }

        let vertical = face_normal(tri).normalize_or_zero().z < VERTICAL_NORMAL_Z;
        vertical
            && (self.axis_flips(gradient.x, &surrounding.x)
                || self.axis_flips(gradient.y, &surrounding.y))
    }

    /// Neighbours agree with each other, the candidate disagrees with both
    /// in sign and by more than the threshold
    fn axis_flips(&self, g: f32, neighbors: &AxisNeighbors) -> bool {
        let Some((a, b)) = neighbors.resolve() else {
            return false;
        };
        let side = slope_sign(a);
        side == slope_sign(b)
            && slope_sign(g) != side
            && (g - a).abs() > self.threshold
            && (g - b).abs() > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(z: [f32; 3]) -> Triangle {
        [
            Vec3::new(0.0, 1.0, z[0]),
            Vec3::new(0.0, 0.0, z[1]),
            Vec3::new(1.0, 1.0, z[2]),
        ]
    }

    fn both_sides(x: f32, y: f32) -> Surrounding {
        Surrounding {
            x: AxisNeighbors::new(Some(x), Some(x)),
            y: AxisNeighbors::new(Some(y), Some(y)),
        }
    }

    #[test]
    fn test_gradient_of_plane() {
        // z = 2x + 3y
        let t = [
            Vec3::new(0.0, 1.0, 3.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 5.0),
        ];
        let g = triangle_gradient(&t);
        assert_relative_eq!(g.x, 2.0);
        assert_relative_eq!(g.y, 3.0);
    }

    #[test]
    fn test_degenerate_gradient_is_not_finite() {
        let t = [Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 2.0), Vec3::new(2.0, 2.0, 3.0)];
        let g = triangle_gradient(&t);
        assert!(!(g.x.is_finite() && g.y.is_finite()));
    }

    #[test]
    fn test_face_normal_points_up() {
        assert!(face_normal(&tri([0.0, 0.0, 0.0])).z > 0.0);
    }

    #[test]
    fn test_non_finite_vertex_is_discontinuous() {
        let detector = DiscontinuityDetector::new(10.0);
        assert!(detector.is_discontinuous(&tri([0.0, f32::NAN, 0.0]), &Surrounding::default()));
        assert!(detector.is_discontinuous(
            &tri([0.0, f32::INFINITY, 0.0]),
            &Surrounding::default()
        ));
    }

    #[test]
    fn test_sign_flip_on_wall_is_discontinuous() {
        let detector = DiscontinuityDetector::new(10.0);
        // Steep negative x slope between neighbours sloping gently upwards
        let wall = tri([0.0, 0.0, -1000.0]);
        assert!(triangle_gradient(&wall).x < -detector.threshold());
        assert!(detector.is_discontinuous(&wall, &both_sides(1.0, 0.0)));
    }

    #[test]
    fn test_agreeing_gradient_is_kept() {
        let detector = DiscontinuityDetector::new(10.0);
        // Just as steep, but in the same direction as its neighbours
        let wall = tri([0.0, 0.0, 1000.0]);
        assert!(!detector.is_discontinuous(&wall, &both_sides(1.0, 0.0)));
    }

    #[test]
    fn test_gentle_triangle_is_kept() {
        let detector = DiscontinuityDetector::new(10.0);
        // Disagrees in sign but is far from vertical
        let slope = tri([0.0, 0.0, -1.0]);
        assert!(!detector.is_discontinuous(&slope, &both_sides(1.0, 0.0)));
    }

    #[test]
    fn test_step_between_flat_neighbours_is_discontinuous() {
        let detector = DiscontinuityDetector::new(10.0);
        // A unit jump over a narrow column, flanked by plateaus
        let wall = [
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.05, 1.0, 1.0),
        ];
        assert!(triangle_gradient(&wall).x > detector.threshold());
        assert!(detector.is_discontinuous(&wall, &both_sides(0.0, 0.0)));
        assert!(detector.is_discontinuous(&wall, &both_sides(-0.0, 0.0)));

        let flat = Surrounding {
            x: AxisNeighbors::new(Some(0.0), Some(-0.0)),
            y: AxisNeighbors::new(Some(-0.0), Some(0.0)),
        };
        assert!(detector.is_discontinuous(&wall, &flat));
    }

    #[test]
    fn test_signed_zero_slopes_agree() {
        assert_eq!(slope_sign(0.0), slope_sign(-0.0));
        assert_eq!(slope_sign(1e-9), 0);
        assert_eq!(slope_sign(-3.0), -1);
        assert_eq!(slope_sign(3.0), 1);
    }

    #[test]
    fn test_missing_side_falls_back_to_opposite() {
        let detector = DiscontinuityDetector::new(10.0);
        let wall = tri([0.0, 0.0, -1000.0]);
        let surrounding = Surrounding {
            x: AxisNeighbors::new(None, Some(1.0)),
            y: AxisNeighbors::default(),
        };
        assert!(detector.is_discontinuous(&wall, &surrounding));

        let no_neighbors = Surrounding::default();
        assert!(!detector.is_discontinuous(&wall, &no_neighbors));
    }

    #[test]
    fn test_non_finite_neighbor_is_ignored() {
        let neighbors = AxisNeighbors::new(Some(f32::NAN), Some(2.0));
        assert_eq!(neighbors, AxisNeighbors::new(None, Some(2.0)));
    }
}
