use thiserror::Error;

use crate::models::CellNumber;

/// Validation failures of the highlight controller.
///
/// The `Display` text is what the error banner shows to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("Please enter a number.")]
    EmptyInput,
    #[error("Please enter a valid number.")]
    InvalidNumber,
    #[error("Please enter a number between 1 and 100.")]
    OutOfRange,
    #[error("{0} is already highlighted.")]
    AlreadyHighlighted(CellNumber),
    #[error("All numbers are already highlighted.")]
    AllHighlighted,
}
