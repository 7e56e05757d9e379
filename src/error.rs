use thiserror::Error;

/// The error type for [`decode`](crate::decode) and [`PlyHeader::parse`](crate::PlyHeader::parse).
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no PLY header found, missing `end_header`")]
    NoHeader,
    #[error("vertex element not found in PLY header")]
    MissingVertexElement,
    #[error("invalid vertex count in PLY header: {0:?}")]
    InvalidVertexCount(String),
    #[error("vertex element must be the first element, found `{first}` before it")]
    VertexElementNotFirst { first: String },
    #[error("list property `{name}` is not supported in the vertex element")]
    UnsupportedListProperty { name: String },
    #[error("PLY body truncated: {expected} bytes expected, {actual} available")]
    TruncatedBody { expected: usize, actual: usize },
}

/// The error type for [`SplatStore::new`](crate::SplatStore::new).
#[derive(Debug, Error)]
pub enum SplatStoreError {
    #[error(
        "attribute length mismatch: \
        positions {positions}, colors {colors}, scales {scales}, \
        opacities {opacities}, angles {angles}\
        "
    )]
    LengthMismatch {
        positions: usize,
        colors: usize,
        scales: usize,
        opacities: usize,
        angles: usize,
    },
}

/// The error type for downloading buffer.
#[derive(Debug, Error)]
pub enum DownloadBufferError {
    #[error("{0}")]
    OneShotRecv(#[from] oneshot::RecvError),
    #[error("{0}")]
    Async(#[from] wgpu::BufferAsyncError),
    #[error("{0}")]
    Poll(#[from] wgpu::PollError),
}

/// The error type for [`SplatIndexBuffer`](crate::SplatIndexBuffer) update functions.
#[derive(Debug, Error)]
pub enum SplatIndexBufferUpdateError {
    #[error("splat count mismatch: {count} != {expected_count}")]
    CountMismatch { count: usize, expected_count: usize },
}

/// The error type for [`FixedSizeBufferWrapper`](crate::FixedSizeBufferWrapper).
#[derive(Debug, Error)]
pub enum FixedSizeBufferWrapperError {
    #[error("buffer size and expected size mismatch: {buffer_size} != {expected_size}")]
    BufferSizeMismatched {
        buffer_size: wgpu::BufferAddress,
        expected_size: wgpu::BufferAddress,
    },
}
