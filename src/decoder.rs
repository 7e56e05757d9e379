use glam::*;

use crate::{FormatError, PlyHeader, PlyLayout, PlyProperty, Splat, SplatStore};

/// The zeroth order spherical harmonics basis constant.
pub const SH_C0: f32 = 0.282_094_8;

/// Decode the bytes of a PLY file into a [`SplatStore`].
///
/// Both the Gaussian splat dialect (`f_dc_*`, `opacity`, `scale_*`, `rot_0`) and plain colored
/// point clouds (`red`, `green`, `blue`) are accepted, missing attributes fall back to the
/// defaults in [`Splat`]. The body is always read as little endian.
pub fn decode(bytes: &[u8]) -> Result<SplatStore, FormatError> {
    let header = PlyHeader::parse(bytes)?;
    let layout = &header.layout;

    let body = &bytes[header.body_offset..];
    let expected = layout.body_size().ok_or(FormatError::TruncatedBody {
        expected: usize::MAX,
        actual: body.len(),
    })?;
    if body.len() < expected {
        return Err(FormatError::TruncatedBody {
            expected,
            actual: body.len(),
        });
    }

    log::info!(
        "Decoding PLY with {} splats ({} bytes per record)",
        layout.count,
        layout.record_size
    );

    let attributes = SplatAttributes::resolve(layout);

    (0..layout.count)
        .map(|i| {
            let start = i * layout.record_size;
            body.get(start..start + layout.record_size)
                .and_then(|record| attributes.decode_record(record))
                .ok_or(FormatError::TruncatedBody {
                    expected,
                    actual: body.len(),
                })
        })
        .collect()
}

/// The source of a splat's color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource<'a> {
    /// Spherical harmonics DC coefficients `f_dc_0`, `f_dc_1`, `f_dc_2`.
    ShDc([&'a PlyProperty; 3]),
    /// 8-bit colors `red`, `green`, `blue`.
    Rgb([&'a PlyProperty; 3]),
    /// [`Splat::DEFAULT_COLOR`].
    Default,
}

/// The properties backing each splat attribute.
///
/// This is resolved once per file from the [`PlyLayout`], a [`None`] attribute falls back to
/// its default in [`Splat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatAttributes<'a> {
    pub pos: Option<[&'a PlyProperty; 3]>,
    pub color: ColorSource<'a>,
    pub opacity: Option<&'a PlyProperty>,
    pub scale: Option<[&'a PlyProperty; 2]>,
    pub angle: Option<&'a PlyProperty>,
}

impl<'a> SplatAttributes<'a> {
    /// Resolve the attributes by property name.
    pub fn resolve(layout: &'a PlyLayout) -> Self {
        let group = |names: &[&str]| -> Option<Vec<&'a PlyProperty>> {
            let properties = names
                .iter()
                .filter_map(|name| layout.property(name))
                .collect::<Vec<_>>();

            match properties.len() {
                0 => None,
                len if len == names.len() => Some(properties),
                _ => {
                    log::warn!("Incomplete PLY properties {names:?}, ignored");
                    None
                }
            }
        };

        let pos = group(&["x", "y", "z"]).and_then(|p| p.try_into().ok());

        let color = match (
            group(&["f_dc_0", "f_dc_1", "f_dc_2"]).and_then(|p| p.try_into().ok()),
            group(&["red", "green", "blue"]).and_then(|p| p.try_into().ok()),
        ) {
            (Some(sh), _) => ColorSource::ShDc(sh),
            (None, Some(rgb)) => ColorSource::Rgb(rgb),
            (None, None) => ColorSource::Default,
        };

        let opacity = layout.property("opacity");

        let scale = group(&["scale_0", "scale_1"]).and_then(|p| p.try_into().ok());

        let angle = layout.property("rot_0");

        let attributes = Self {
            pos,
            color,
            opacity,
            scale,
            angle,
        };
        log::debug!("Resolved PLY attributes: {attributes:?}");

        attributes
    }

    /// Decode one record.
    ///
    /// Returns [`None`] if the record is shorter than the layout.
    pub fn decode_record(&self, record: &[u8]) -> Option<Splat> {
        let read3 = |props: &[&PlyProperty; 3]| -> Option<Vec3> {
            Some(Vec3::new(
                props[0].read(record)?,
                props[1].read(record)?,
                props[2].read(record)?,
            ))
        };

        let pos = match &self.pos {
            Some(props) => read3(props)?,
            None => Vec3::ZERO,
        };

        let color = match &self.color {
            ColorSource::ShDc(props) => {
                (Vec3::splat(0.5) + read3(props)? * SH_C0).clamp(Vec3::ZERO, Vec3::ONE)
            }
            ColorSource::Rgb(props) => read3(props)? / 255.0,
            ColorSource::Default => Splat::DEFAULT_COLOR,
        };

        let opacity = match self.opacity {
            Some(prop) => sigmoid(prop.read(record)?),
            None => Splat::DEFAULT_OPACITY,
        };

        let scale = match &self.scale {
            Some([x, y]) => Vec2::new(x.read(record)?, y.read(record)?).exp(),
            None => Splat::DEFAULT_SCALE,
        };

        let angle = match self.angle {
            Some(prop) => prop.read(record)?,
            None => 0.0,
        };

        Some(Splat {
            pos,
            color,
            scale,
            opacity,
            angle,
        })
    }
}

/// The logistic function.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
