use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("Data too long: {bits} bits exceed the largest capacity of {capacity} bits")]
    TooLong { bits: usize, capacity: usize },
    #[error("Capacity overflow: Cannot encode {bits} bits into {capacity}-bit code")]
    Overflow { bits: usize, capacity: usize },
    #[error("Encoding not supported")]
    UnsupportedEncoding,
    #[error("Invalid version: {0}")]
    InvalidVersion(usize),
    #[error("Invalid masking pattern: {0}")]
    InvalidMask(u8),
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        let err = QRError::Overflow { bits: 160, capacity: 152 };
        assert_eq!(err.to_string(), "Capacity overflow: Cannot encode 160 bits into 152-bit code");
        let err = QRError::TooLong { bits: 23662, capacity: 23648 };
        assert_eq!(
            err.to_string(),
            "Data too long: 23662 bits exceed the largest capacity of 23648 bits"
        );
        assert_eq!(QRError::UnsupportedEncoding.to_string(), "Encoding not supported");
        assert_eq!(QRError::InvalidVersion(41).to_string(), "Invalid version: 41");
        assert_eq!(QRError::InvalidMask(8).to_string(), "Invalid masking pattern: 8");
    }
}
