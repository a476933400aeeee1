// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle-strip index buffer over a row-major grid

/// Indices drawing a `rows × cols` grid as one connected strip
///
/// Each row pair is swept left to right on even rows and right to left on
/// odd rows. Consecutive row pairs are joined by repeating the last index,
/// which yields zero-area triangles instead of a primitive restart.
pub fn triangle_strip_indices(rows: usize, cols: usize) -> Vec<u32> {
    if rows < 2 || cols == 0 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity((rows - 1) * (2 * cols + 1));
    for r in 0..rows - 1 {
        if let Some(&last) = indices.last() {
            indices.push(last);
        }

        let mut push_column = |c: usize| {
            indices.push((r * cols + c) as u32);
            indices.push(((r + 1) * cols + c) as u32);
        };
        if r % 2 == 0 {
            (0..cols).for_each(&mut push_column);
        } else {
            (0..cols).rev().for_each(&mut push_column);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quad() {
        assert_eq!(triangle_strip_indices(2, 2), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_rows_alternate_with_degenerate_join() {
        assert_eq!(
            triangle_strip_indices(3, 2),
            vec![0, 2, 1, 3, 3, 3, 5, 2, 4]
        );
    }

    #[test]
    fn test_indices_in_range() {
        let (rows, cols) = (5, 4);
        let indices = triangle_strip_indices(rows, cols);
        assert!(indices.iter().all(|&i| (i as usize) < rows * cols));
        assert_eq!(indices.len(), (rows - 1) * 2 * cols + (rows - 2));
    }

    #[test]
    fn test_too_small() {
        assert!(triangle_strip_indices(1, 4).is_empty());
        assert!(triangle_strip_indices(4, 0).is_empty());
    }
}
