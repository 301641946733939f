/// Error type for the few fallible constructors in the core.
///
/// Drawing never fails: out-of-range pixels and degenerate triangles are
/// skipped silently. Only building a device view over a foreign buffer and
/// the validated matrix builders can reject their input.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("pixel buffer holds {actual} pixels, expected {expected} ({width}x{height})")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("look-at basis is degenerate: {axis} axis has zero length")]
    DegenerateBasis { axis: &'static str },

    #[error("invalid perspective projection: {reason}")]
    InvalidProjection { reason: &'static str },
}
