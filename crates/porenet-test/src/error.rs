//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// A fixture row contained a character other than `.` or `#`
    #[error("invalid character {found:?} at row {row}, column {col}")]
    InvalidPixel { row: usize, col: usize, found: char },

    /// Fixture rows or slices of unequal size
    #[error("ragged fixture: {0}")]
    Ragged(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
