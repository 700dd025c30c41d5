//! Module containing the isomesh universal error type
use thiserror::Error;

/// Universal error type for isomesh
#[derive(Error, Debug)]
pub enum Error {
    /// Grid size must be a non-zero power of two
    #[error("grid size {0} is not a non-zero power of two")]
    BadGridSize(u32),

    /// Isolevel must be finite
    #[error("isolevel {0} is not finite")]
    BadIsoLevel(f32),

    /// Grid resolution must be finite and positive
    #[error("grid resolution {0} is not finite and positive")]
    BadResolution(f32),

    /// A line in a point file could not be parsed
    #[error("could not parse point on line {line}: {text:?}")]
    BadPoint {
        /// Line number (1-based)
        line: usize,
        /// Text of the offending line
        text: String,
    },

    /// A point in a point file has a NaN or infinite coordinate
    #[error("point on line {0} has a non-finite coordinate")]
    NonFinitePoint(usize),

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
