use glam::*;

use crate::{QUAD_INDICES, SplatStore};

/// Splat indices in draw order, farthest from the eye first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityPermutation(pub Vec<u32>);

impl VisibilityPermutation {
    /// Create the identity permutation of `len` splats.
    pub fn identity(len: usize) -> Self {
        Self((0..len as u32).collect())
    }

    /// Get the number of splats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no splats.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the splat indices in draw order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Get the splat indices in draw order.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Build the triangle list indices of the quads in draw order.
    ///
    /// Each splat contributes the 6 indices of [`QUAD_INDICES`] offset by its first vertex.
    pub fn to_indices(&self) -> Vec<u32> {
        self.iter()
            .flat_map(|i| QUAD_INDICES.map(|corner| i * 4 + corner))
            .collect()
    }
}

impl AsRef<[u32]> for VisibilityPermutation {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

/// Back-to-front sorter of splats.
///
/// The depth scratch buffer is kept between calls to avoid reallocating for every sort.
#[derive(Debug, Clone, Default)]
pub struct DepthSorter {
    depths: Vec<f32>,
}

impl DepthSorter {
    /// Create a new sorter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort the splats by descending squared distance from `eye`.
    ///
    /// Splats at equal distance are in unspecified order.
    pub fn sort(&mut self, store: &SplatStore, eye: Vec3) -> VisibilityPermutation {
        self.depths.clear();
        self.depths.extend(
            store
                .positions()
                .iter()
                .map(|pos| pos.distance_squared(eye)),
        );

        let depths = &self.depths;
        let mut indices = VisibilityPermutation::identity(store.len()).0;
        indices.sort_unstable_by(|&a, &b| depths[b as usize].total_cmp(&depths[a as usize]));

        log::debug!("Sorted {} splats from eye {eye}", indices.len());

        VisibilityPermutation(indices)
    }
}

/// Sort the splats by descending squared distance from `eye`.
///
/// This is a shorthand for [`DepthSorter::sort`] with a new sorter.
pub fn sort(store: &SplatStore, eye: Vec3) -> VisibilityPermutation {
    DepthSorter::new().sort(store, eye)
}
