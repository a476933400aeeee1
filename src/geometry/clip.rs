// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Clipping triangles against the `z = ±bound` planes

use super::{Triangle, Vec3};
use crate::utils::math::inverse_lerp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Inside,
    Above,
    Below,
}

impl Side {
    fn of(z: f32, bound: f32) -> Self {
        if z > bound {
            Side::Above
        } else if z < -bound {
            Side::Below
        } else {
            Side::Inside
        }
    }

    fn plane(self, bound: f32) -> f32 {
        match self {
            Side::Below => -bound,
            _ => bound,
        }
    }
}

/// Point where the edge from `inside` to `outside` meets the plane `z`
fn crossing(inside: Vec3, outside: Vec3, z: f32) -> Vec3 {
    let mut p = inside.lerp(&outside, inverse_lerp(inside.z, outside.z, z));
    p.z = z;
    p
}

/// Clip one triangle, appending the zero, one or two triangles that remain
/// within `[-bound, bound]` to `out`. Winding is preserved.
pub fn clip_triangle(tri: &Triangle, bound: f32, out: &mut Vec<Triangle>) {
    let sides = tri.map(|v| Side::of(v.z, bound));
    let inside: Vec<usize> = (0..3).filter(|&i| sides[i] == Side::Inside).collect();

    match inside.as_slice() {
        [_, _, _] => out.push(*tri),

        // Each outside corner slides towards the inside one until it meets
        // its own plane; this also covers one corner above and one below
        [k] => {
            let mut clipped = *tri;
            for i in (0..3).filter(|i| i != k) {
                clipped[i] = crossing(tri[*k], tri[i], sides[i].plane(bound));
            }
            out.push(clipped);
        }

        // One corner out: the remaining quad is split in two
        [_, _] => {
            let o = (0..3).find(|&i| sides[i] != Side::Inside).unwrap_or(0);
            let next = (o + 1) % 3;
            let prev = (o + 2) % 3;
            let plane = sides[o].plane(bound);
            let c_next = crossing(tri[next], tri[o], plane);
            let c_prev = crossing(tri[prev], tri[o], plane);

            let mut first = *tri;
            first[o] = c_next;
            first[prev] = c_prev;
            out.push(first);

            let mut second = *tri;
            second[o] = c_prev;
            out.push(second);
        }

        _ => {}
    }
}
