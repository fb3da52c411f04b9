//! Types needed in multiple modules

/// Enumeration of binary symbol values
#[derive(Clone, Eq, PartialEq, Debug, Copy)]
pub enum Bit {
    /// Binary symbol `0`
    Zero = 0,
    /// Binary symbol `1`
    One = 1,
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

/// Custom error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid argument error
    #[error("{0}")]
    InvalidArgument(String),
    /// Storage for encoder output could not be obtained
    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] std::collections::TryReserveError),
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_from_bool() {
        assert_eq!(Bit::from(false), Bit::Zero);
        assert_eq!(Bit::from(true), Bit::One);
    }

    #[test]
    fn test_u8_from_bit() {
        assert_eq!(u8::from(Bit::Zero), 0);
        assert_eq!(u8::from(Bit::One), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("Callsign cannot be empty".to_string());
        assert_eq!(err.to_string(), "Callsign cannot be empty");
        let mut buf: Vec<u8> = Vec::new();
        let err = Error::from(buf.try_reserve_exact(usize::MAX).unwrap_err());
        assert!(err.to_string().starts_with("Allocation failure"));
    }
}
