use glam::*;
use itertools::izip;

use crate::{FormatError, SplatStoreError};

/// A single splat.
///
/// This is the resolved form of one PLY record, see [`decode`](crate::decode) for how each
/// field is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splat {
    /// World space center.
    pub pos: Vec3,
    /// Linear color in \[0, 1\].
    pub color: Vec3,
    /// World space radii along the local axes.
    pub scale: Vec2,
    /// Opacity in \[0, 1\].
    pub opacity: f32,
    /// In-plane rotation of the billboard in radians.
    pub angle: f32,
}

impl Splat {
    /// The color used when a record has no color properties.
    pub const DEFAULT_COLOR: Vec3 = Vec3::splat(0.8);

    /// The opacity used when a record has no opacity property.
    pub const DEFAULT_OPACITY: f32 = 0.8;

    /// The scale used when a record has no scale properties.
    pub const DEFAULT_SCALE: Vec2 = Vec2::splat(0.02);
}

impl Default for Splat {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            color: Self::DEFAULT_COLOR,
            scale: Self::DEFAULT_SCALE,
            opacity: Self::DEFAULT_OPACITY,
            angle: 0.0,
        }
    }
}

/// The splats of one loaded scene.
///
/// Attributes are stored as parallel arrays of the same length, the index of a splat is shared
/// by every array and by the [`VisibilityPermutation`](crate::VisibilityPermutation).
/// The store cannot be modified after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplatStore {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    scales: Vec<Vec2>,
    opacities: Vec<f32>,
    angles: Vec<f32>,
}

impl SplatStore {
    /// Create a new store from parallel attribute arrays.
    pub fn new(
        positions: Vec<Vec3>,
        colors: Vec<Vec3>,
        scales: Vec<Vec2>,
        opacities: Vec<f32>,
        angles: Vec<f32>,
    ) -> Result<Self, SplatStoreError> {
        let len = positions.len();
        if [colors.len(), scales.len(), opacities.len(), angles.len()]
            .iter()
            .any(|&l| l != len)
        {
            return Err(SplatStoreError::LengthMismatch {
                positions: positions.len(),
                colors: colors.len(),
                scales: scales.len(),
                opacities: opacities.len(),
                angles: angles.len(),
            });
        }

        Ok(Self {
            positions,
            colors,
            scales,
            opacities,
            angles,
        })
    }

    /// Decode a store from the bytes of a PLY file.
    ///
    /// This is the same as [`decode`](crate::decode).
    pub fn from_ply_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        crate::decode(bytes)
    }

    /// Decode a store from a PLY file.
    pub fn read_ply_file(path: impl AsRef<std::path::Path>) -> Result<Self, std::io::Error> {
        let bytes = std::fs::read(path)?;
        crate::decode(&bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Get the number of splats.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if there are no splats.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get the splat at `index`.
    pub fn get(&self, index: usize) -> Option<Splat> {
        Some(Splat {
            pos: *self.positions.get(index)?,
            color: *self.colors.get(index)?,
            scale: *self.scales.get(index)?,
            opacity: *self.opacities.get(index)?,
            angle: *self.angles.get(index)?,
        })
    }

    /// Iterate over the splats.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Splat> + '_ {
        izip!(
            &self.positions,
            &self.colors,
            &self.scales,
            &self.opacities,
            &self.angles
        )
        .map(|(&pos, &color, &scale, &opacity, &angle)| Splat {
            pos,
            color,
            scale,
            opacity,
            angle,
        })
    }

    /// Get the positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Get the colors.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Get the scales.
    pub fn scales(&self) -> &[Vec2] {
        &self.scales
    }

    /// Get the opacities.
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Get the billboard angles.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Get the arithmetic mean of all positions.
    ///
    /// Returns [`Vec3::ZERO`] for an empty store.
    pub fn centroid(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }

        let sum = self
            .positions
            .iter()
            .fold(DVec3::ZERO, |sum, pos| sum + pos.as_dvec3());

        (sum / self.len() as f64).as_vec3()
    }
}

impl FromIterator<Splat> for SplatStore {
    fn from_iter<T: IntoIterator<Item = Splat>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        let mut store = Self {
            positions: Vec::with_capacity(lower),
            colors: Vec::with_capacity(lower),
            scales: Vec::with_capacity(lower),
            opacities: Vec::with_capacity(lower),
            angles: Vec::with_capacity(lower),
        };

        for splat in iter {
            store.positions.push(splat.pos);
            store.colors.push(splat.color);
            store.scales.push(splat.scale);
            store.opacities.push(splat.opacity);
            store.angles.push(splat.angle);
        }

        store
    }
}

impl From<Vec<Splat>> for SplatStore {
    fn from(splats: Vec<Splat>) -> Self {
        splats.into_iter().collect()
    }
}
