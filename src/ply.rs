use itertools::Itertools;

use crate::FormatError;

/// The token terminating the textual PLY header.
pub const PLY_HEADER_TERMINATOR: &[u8] = b"end_header";

/// The scalar type of a PLY property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyScalarType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl PlyScalarType {
    /// Parse a PLY type name.
    ///
    /// Both the classic names (`uchar`, `float`, ...) and the sized names (`uint8`, `float32`,
    /// ...) are accepted. Returns [`None`] for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "char" | "int8" => Some(Self::Int8),
            "uchar" | "uint8" => Some(Self::UInt8),
            "short" | "int16" => Some(Self::Int16),
            "ushort" | "uint16" => Some(Self::UInt16),
            "int" | "int32" => Some(Self::Int32),
            "uint" | "uint32" => Some(Self::UInt32),
            "float" | "float32" => Some(Self::Float32),
            "double" | "float64" => Some(Self::Float64),
            _ => None,
        }
    }

    /// Get the size in bytes.
    pub const fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

/// A scalar property of the vertex element.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyProperty {
    pub name: String,
    pub ty: PlyScalarType,
    /// Byte offset from the start of the record.
    pub offset: usize,
    pub size: usize,
}

impl PlyProperty {
    /// Read the property from a record as [`prim@f32`].
    ///
    /// Values are always little endian. Returns [`None`] if the record is too short.
    pub fn read(&self, record: &[u8]) -> Option<f32> {
        let bytes = record.get(self.offset..self.offset + self.size)?;

        macro_rules! le {
            ($ty:ty) => {
                <$ty>::from_le_bytes(bytes.try_into().ok()?) as f32
            };
        }

        Some(match self.ty {
            PlyScalarType::Int8 => le!(i8),
            PlyScalarType::UInt8 => le!(u8),
            PlyScalarType::Int16 => le!(i16),
            PlyScalarType::UInt16 => le!(u16),
            PlyScalarType::Int32 => le!(i32),
            PlyScalarType::UInt32 => le!(u32),
            PlyScalarType::Float32 => le!(f32),
            PlyScalarType::Float64 => le!(f64),
        })
    }
}

/// The fixed size binary record layout of the vertex element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlyLayout {
    /// Properties in declaration order.
    pub properties: Vec<PlyProperty>,
    /// Number of records.
    pub count: usize,
    /// Size of each record in bytes.
    pub record_size: usize,
}

impl PlyLayout {
    /// Find a property by name.
    ///
    /// The first declaration wins if the name is declared more than once.
    pub fn property(&self, name: &str) -> Option<&PlyProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Get the number of bytes the body must hold.
    ///
    /// Returns [`None`] on overflow.
    pub fn body_size(&self) -> Option<usize> {
        self.count.checked_mul(self.record_size)
    }
}

/// Header of a PLY file.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyHeader {
    /// The vertex record layout.
    pub layout: PlyLayout,
    /// Offset of the first body byte in the file.
    pub body_offset: usize,
}

impl PlyHeader {
    /// Parse the header at the start of `bytes`.
    ///
    /// The header ends at the first line consisting of exactly [`PLY_HEADER_TERMINATOR`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        let (terminator, body_offset) =
            Self::find_terminator_line(bytes).ok_or(FormatError::NoHeader)?;

        let text = String::from_utf8_lossy(&bytes[..terminator]);

        let mut count = None;
        let mut in_vertex = false;
        let mut first_element: Option<&str> = None;
        let mut properties = Vec::<PlyProperty>::new();
        let mut record_size = 0;

        for line in text.lines().map(str::trim) {
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                Some("format") => {
                    if tokens.next() != Some("binary_little_endian") {
                        log::warn!("PLY format `{line}` is read as binary little endian");
                    }
                }
                Some("element") => {
                    let element = tokens.next().unwrap_or_default();
                    in_vertex = element == "vertex";
                    if in_vertex {
                        if let Some(first) = first_element {
                            return Err(FormatError::VertexElementNotFirst {
                                first: first.to_string(),
                            });
                        }

                        let value = tokens.next().unwrap_or_default();
                        count = Some(
                            value
                                .parse::<usize>()
                                .map_err(|_| FormatError::InvalidVertexCount(value.to_string()))?,
                        );
                    }
                    first_element.get_or_insert(element);
                }
                Some("property") if in_vertex => {
                    let (ty, name) = match tokens.collect_vec().as_slice() {
                        ["list", .., name] => {
                            return Err(FormatError::UnsupportedListProperty {
                                name: name.to_string(),
                            });
                        }
                        [ty, name, ..] => (*ty, *name),
                        _ => {
                            log::warn!("Malformed PLY property line: {line}");
                            continue;
                        }
                    };

                    let ty = PlyScalarType::from_name(ty).unwrap_or_else(|| {
                        log::warn!("Unknown PLY property type `{ty}` of `{name}`, read as float");
                        PlyScalarType::Float32
                    });

                    if properties.iter().any(|p| p.name == name) {
                        log::warn!("Duplicated PLY property `{name}`, the first one is used");
                    }

                    properties.push(PlyProperty {
                        name: name.to_string(),
                        ty,
                        offset: record_size,
                        size: ty.size(),
                    });
                    record_size += ty.size();
                }
                _ => {}
            }
        }

        let count = count.ok_or(FormatError::MissingVertexElement)?;

        Ok(Self {
            layout: PlyLayout {
                properties,
                count,
                record_size,
            },
            body_offset,
        })
    }

    /// Find the terminator line.
    ///
    /// Returns the offsets of the terminator and of the first body byte.
    fn find_terminator_line(bytes: &[u8]) -> Option<(usize, usize)> {
        memchr::memmem::find_iter(bytes, PLY_HEADER_TERMINATOR).find_map(|start| {
            if start > 0 && bytes[start - 1] != b'\n' {
                return None;
            }

            let end = start + PLY_HEADER_TERMINATOR.len();
            match &bytes[end..] {
                [] => Some((start, end)),
                [b'\n', ..] => Some((start, end + 1)),
                [b'\r', b'\n', ..] => Some((start, end + 2)),
                _ => None,
            }
        })
    }
}
