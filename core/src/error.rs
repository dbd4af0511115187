//! # Basalt Error Handling
//!
//! Unified error types for the board support layer.
//!
//! Error handling in Basalt follows these principles:
//! - Errors are typed and categorized
//! - No panics in production code paths
//! - Errors are `no_std` compatible
//! - Environment failures (mapping, allocation) propagate unchanged

use core::fmt;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// Basalt Result type alias
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Basalt unified error type
///
/// Covers every error condition across the board support layer. The success
/// case is the `Ok` branch of [`Result`]; for callers that speak the classic
/// integer convention, [`Error::errno`] yields the matching POSIX code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Contract Errors
    // =========================================================================
    /// Malformed input: unknown device or timeout kind, out-of-range value,
    /// mapping set that does not match the device description
    InvalidParameter,
    /// Operation not supported on this hardware
    NotSupported,

    // =========================================================================
    // Timer Errors
    // =========================================================================
    /// An absolute deadline had already passed when the timeout was armed
    TimerExpired,

    // =========================================================================
    // Environment Errors
    // =========================================================================
    /// The memory-mapping service could not map a device region
    MappingFailed,
    /// The environment could not allocate backing memory
    AllocationFailed,
    /// No device with the requested identifier exists on this platform
    DeviceNotFound,
}

impl Error {
    /// POSIX-style integer code for this error
    ///
    /// This is the compatibility surface for callers that consume classic
    /// errno values; 0 (success) is never produced because success is `Ok`.
    pub const fn errno(self) -> i32 {
        match self {
            Error::InvalidParameter => 22, // EINVAL
            Error::NotSupported => 38,     // ENOSYS
            Error::TimerExpired => 62,     // ETIME
            Error::MappingFailed => 14,    // EFAULT
            Error::AllocationFailed => 12, // ENOMEM
            Error::DeviceNotFound => 19,   // ENODEV
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "invalid parameter"),
            Error::NotSupported => write!(f, "operation not supported"),
            Error::TimerExpired => write!(f, "timeout already expired"),
            Error::MappingFailed => write!(f, "device mapping failed"),
            Error::AllocationFailed => write!(f, "allocation failed"),
            Error::DeviceNotFound => write!(f, "device not found"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_codes() {
        assert_eq!(Error::InvalidParameter.errno(), 22);
        assert_eq!(Error::NotSupported.errno(), 38);
        assert_eq!(Error::TimerExpired.errno(), 62);
        assert_eq!(Error::MappingFailed.errno(), 14);
        assert_eq!(Error::AllocationFailed.errno(), 12);
        assert_eq!(Error::DeviceNotFound.errno(), 19);
    }

    #[test]
    fn test_result_alias() {
        fn ok() -> Result<u32> {
            Ok(7)
        }
        fn err() -> Result<u32> {
            Err(Error::TimerExpired)
        }
        assert_eq!(ok().unwrap(), 7);
        assert_eq!(err().unwrap_err(), Error::TimerExpired);
    }
}
