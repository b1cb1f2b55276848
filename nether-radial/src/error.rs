//! Error types for radial mesh generation

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RadialError>;

/// Rejected shape parameters or registry lookups
///
/// Parameters are validated when a shape is configured and are never clamped.
/// Invariant violations inside the engine (out-of-range indices, mismatched
/// ring lists) are bugs and panic instead.
#[derive(Debug, Error)]
pub enum RadialError {
    /// A radius that must be positive was zero, negative or not finite
    #[error("{what} radius must be > 0.0 (got {value})")]
    InvalidRadius {
        /// Which radius was rejected
        what: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Inner radius outside `0.0..outer`
    #[error("inner radius {inner} must be in 0.0..{outer}")]
    InvalidInnerRadius {
        /// The rejected inner radius
        inner: f32,
        /// Outer radius of the same ring
        outer: f32,
    },

    /// Wall thickness would push the inner wall through the axis
    #[error("wall thickness {thickness} must be less than radius {radius}")]
    ThicknessExceedsRadius {
        /// Configured wall thickness
        thickness: f32,
        /// Outer radius of the ring being added
        radius: f32,
    },

    /// Wall thickness negative, not finite, or zero where an inner ring must be derived
    #[error("invalid wall thickness {0} (must be >= 0.0, and > 0.0 to derive inner rings)")]
    InvalidThickness(f32),

    /// Fewer than three faces around a full circle
    #[error("face count {0} is too low (must be >= 3)")]
    TooFewFaces(u32),

    /// Panel count of zero
    #[error("panel count must be >= 1")]
    NoPanels,

    /// Sweep end not after sweep start, or wider than one revolution
    #[error("invalid sweep {start}..{end} degrees (end must be > start, at most 360 apart)")]
    InvalidSweep {
        /// Sweep start angle in degrees
        start: f32,
        /// Sweep end angle in degrees
        end: f32,
    },

    /// Rings must be added bottom to top
    #[error("ring at height {height} is not above the previous ring at {previous}")]
    RingOrder {
        /// Height of the rejected ring
        height: f32,
        /// Height of the last accepted ring
        previous: f32,
    },

    /// Walls need at least two rings
    #[error("panel has {0} ring(s), at least 2 are required")]
    TooFewRings(usize),

    /// A height or length parameter was zero, negative or not finite
    #[error("{what} must be > 0.0 (got {value})")]
    InvalidHeight {
        /// Which parameter was rejected
        what: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Bolt bands leave no room for the panel body
    #[error("bolt bands ({bands}) leave no room in a stack of height {height}")]
    InvalidBandHeight {
        /// Combined height of all bolt bands
        bands: f32,
        /// Total stack height
        height: f32,
    },

    /// Registry has no layout with this name
    #[error("unknown UV layout '{0}'")]
    UnknownLayout(String),

    /// Layout has no region with this name
    #[error("UV layout '{layout}' has no region '{region}'")]
    UnknownRegion {
        /// Layout that was searched
        layout: String,
        /// Missing region name
        region: String,
    },

    /// Registry has no preset with this name
    #[error("unknown shape preset '{0}'")]
    UnknownPreset(String),

    /// Registry TOML failed to parse
    #[error("failed to parse shape registry: {0}")]
    Parse(#[from] toml::de::Error),

    /// Registry file could not be read
    #[error("failed to read shape registry: {0}")]
    Io(#[from] std::io::Error),
}

/// Require a finite, strictly positive radius
pub(crate) fn positive_radius(what: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RadialError::InvalidRadius { what, value })
    }
}

/// Require a finite, strictly positive length
pub(crate) fn positive_length(what: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RadialError::InvalidHeight { what, value })
    }
}

/// Require at least three faces around a full circle
pub(crate) fn face_count(faces: u32) -> Result<u32> {
    if faces >= 3 {
        Ok(faces)
    } else {
        Err(RadialError::TooFewFaces(faces))
    }
}
