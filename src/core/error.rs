//! Error types for orbital_lattice
//!
//! This module provides structured error handling using thiserror.

use std::fmt;

use thiserror::Error;

/// Result type alias for lattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;

/// The foreseeable geometric degeneracies of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneracyKind {
    /// Two bodies share a Cartesian position (zero-distance pull)
    CoincidentBodies,
    /// A body sits at `r = 0`, where the harmonic radial factor diverges
    ZeroRadius,
}

impl fmt::Display for DegeneracyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegeneracyKind::CoincidentBodies => write!(f, "coincident bodies (distance 0)"),
            DegeneracyKind::ZeroRadius => write!(f, "zero orbital radius"),
        }
    }
}

/// Errors that can occur while forging or relating celestial bodies
#[derive(Error, Debug)]
pub enum LatticeError {
    /// Input rejected at body construction
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Geometry where a quantity is undefined
    #[error("Degenerate geometry: {kind}")]
    DegenerateGeometry { kind: DegeneracyKind },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error during archive or config file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LatticeError>,
    },
}

impl LatticeError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LatticeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LatticeError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        LatticeError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a degenerate geometry error
    pub fn degenerate(kind: DegeneracyKind) -> Self {
        LatticeError::DegenerateGeometry { kind }
    }

    /// Whether this error (or the error it wraps) is a geometric degeneracy
    pub fn is_degenerate(&self) -> bool {
        match self {
            LatticeError::DegenerateGeometry { .. } => true,
            LatticeError::WithContext { source, .. } => source.is_degenerate(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
