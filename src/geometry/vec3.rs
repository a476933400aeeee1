// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 3D vector value and position keys

use nalgebra::Vector3;
use std::hash::{Hash, Hasher};

/// 3D Vector type alias
pub type Vec3 = Vector3<f32>;

/// Three corner positions, counter-clockwise when seen from +z
pub type Triangle = [Vec3; 3];

/// Helpers missing from nalgebra for mesh work
pub trait Vec3Ext {
    /// All three components are finite
    fn all_finite(&self) -> bool;

    /// Unit vector, or zero for a zero-length input
    fn normalize_or_zero(&self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn all_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }

    fn normalize_or_zero(&self) -> Self {
        self.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
    }
}

/// Number of hash buckets per unit length along each axis
const BUCKETS_PER_UNIT: f32 = 64.0;

/// Position used as a map key so that coincident vertices merge
///
/// Equality is exact on the bit pattern (with `-0.0` folded into `0.0`);
/// the hash only looks at a coarse bucket, which keeps it stable for
/// positions produced by different triangles.
#[derive(Debug, Clone, Copy)]
pub struct VertexKey([u32; 3]);

impl VertexKey {
    pub fn new(position: &Vec3) -> Self {
        // Adding 0.0 turns -0.0 into 0.0
        Self([
            (position.x + 0.0).to_bits(),
            (position.y + 0.0).to_bits(),
            (position.z + 0.0).to_bits(),
        ])
    }

    fn bucket(bits: u32) -> i32 {
        (f32::from_bits(bits) * BUCKETS_PER_UNIT).floor() as i32
    }
}

impl PartialEq for VertexKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for VertexKey {}

impl Hash for VertexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for bits in self.0 {
            Self::bucket(bits).hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(Vec3::zeros().normalize_or_zero(), Vec3::zeros());
        let n = Vec3::new(3.0, 0.0, 4.0).normalize_or_zero();
        assert_relative_eq!(n.norm(), 1.0);
    }

    #[test]
    fn test_all_finite() {
        assert!(Vec3::new(1.0, 2.0, 3.0).all_finite());
        assert!(!Vec3::new(1.0, f32::NAN, 3.0).all_finite());
        assert!(!Vec3::new(f32::INFINITY, 0.0, 0.0).all_finite());
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 8.0);
        assert_eq!(a.lerp(&b, 0.5), Vec3::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn test_coincident_positions_merge() {
        let mut map: AHashMap<VertexKey, u32> = AHashMap::new();
        *map.entry(VertexKey::new(&Vec3::new(0.0, 1.5, 2.0))).or_default() += 1;
        *map.entry(VertexKey::new(&Vec3::new(-0.0, 1.5, 2.0))).or_default() += 1;
        *map.entry(VertexKey::new(&Vec3::new(0.001, 1.5, 2.0))).or_default() += 1;
        assert_eq!(map.len(), 2);
        assert_eq!(map[&VertexKey::new(&Vec3::new(0.0, 1.5, 2.0))], 2);
    }
}
