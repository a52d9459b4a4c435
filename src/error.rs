//! Error types for graph construction.

use thiserror::Error;

/// Errors surfaced while building an expression graph.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
  /// The exponent passed to `powf` was NaN or infinite. Exponents must be
  /// finite real constants; the gradient rule for a variable exponent is
  /// unsupported.
  #[error("power exponent must be a finite real constant, got {0}")]
  NonFiniteExponent(f64),
}

/// Result type alias for fallible graph construction.
pub type Result<T> = std::result::Result<T, Error>;
