//! Error types for graph construction, parsing, and solver invariants.

use thiserror::Error;

/// Everything that can go wrong building or solving a cycle-ratio instance.
///
/// Acyclic or empty input is deliberately *not* an error: solvers return
/// `f64::INFINITY` (or `NEG_INFINITY` for the max variant) for those, per
/// the driver's pruning contract.
#[derive(Debug, Error)]
pub enum CycleRatioError {
    #[error("malformed DIMACS input at line {line}: {message}")]
    DimacsParse { line: usize, message: String },

    #[error("Burns's method requires a critical graph free of zero-transit-time cycles")]
    ZeroTransitCycle,

    #[error("monotonicity invariant violated: lambda went from {previous} to {next}")]
    MonotonicityViolation { previous: f64, next: f64 },

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CycleRatioError>;
