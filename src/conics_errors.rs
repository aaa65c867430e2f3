use thiserror::Error;

/// Errors raised by the fallible surfaces of the crate (configuration, calendar
/// conversion, element tables).
///
/// The numerical core never returns these: non-convergence and display-range
/// truncation are reported as annotations on the results themselves.
#[derive(Error, Debug)]
pub enum ConicsError {
    #[error("Invalid engine parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    #[error("Invalid element conversion: {0}")]
    InvalidConversion(String),

    #[error("Unable to read element table: {0}")]
    ElementTable(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for ConicsError {
    fn eq(&self, other: &Self) -> bool {
        use ConicsError::*;
        match (self, other) {
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (InvalidCalendarDate(a), InvalidCalendarDate(b)) => a == b,
            (InvalidConversion(a), InvalidConversion(b)) => a == b,

            // not comparable, same variant is enough
            (ElementTable(_), ElementTable(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
