//! Errors raised while constructing or analysing collision shapes

use thiserror::Error;

/// Shape construction and shape analysis errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A size parameter was zero, negative, or not finite
    #[error("{shape} {parameter} must be positive and finite, got {value}")]
    InvalidDimension {
        /// Shape kind being constructed
        shape: &'static str,
        /// Offending parameter
        parameter: &'static str,
        /// Value supplied
        value: f32,
    },

    /// A point-based shape received too few points
    #[error("{shape} needs at least {min} points, got {count}")]
    TooFewPoints {
        /// Shape kind being constructed
        shape: &'static str,
        /// Minimum accepted point count
        min: usize,
        /// Points supplied
        count: usize,
    },

    /// A point-based shape received too many points
    #[error("{shape} accepts at most {max} points, got {count}")]
    TooManyPoints {
        /// Shape kind being constructed
        shape: &'static str,
        /// Maximum accepted point count
        max: usize,
        /// Points supplied
        count: usize,
    },

    /// A point-based shape received a NaN or infinite coordinate
    #[error("{shape} point {index} is not finite")]
    NonFinitePoint {
        /// Shape kind being constructed
        shape: &'static str,
        /// Index of the offending point
        index: usize,
    },

    /// A compound operation needs at least one child
    #[error("compound shape has no children")]
    EmptyCompound,

    /// Principal-axes input did not provide one mass per child
    #[error("expected {expected} masses (one per child), got {actual}")]
    MassCountMismatch {
        /// Number of children in the compound
        expected: usize,
        /// Number of masses supplied
        actual: usize,
    },

    /// The masses supplied for principal axes do not sum to a positive value
    #[error("total mass must be positive and finite, got {0}")]
    NonPositiveMass(f32),

    /// The shape kind has no closed-form volume
    #[error("volume is not available for {0} shapes")]
    VolumeUnavailable(&'static str),

    /// Margins must be non-negative
    #[error("margin must be non-negative and finite, got {0}")]
    InvalidMargin(f32),

    /// Scale components must be positive
    #[error("scale components must be positive and finite, got {0:?}")]
    InvalidScale([f32; 3]),
}

/// Result alias for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;
