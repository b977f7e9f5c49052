use core::fmt;

/// Errors returned by the driver, generic over the I2C bus error `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The underlying bus transaction failed.
    Bus(E),
    /// A continuous reading was requested while the device is in standby and no one-shot
    /// measurement has been triggered.
    InvalidState,
    /// A value does not fit the register field it is written to. Holds the rejected value.
    InvalidArgument(u8),
    /// The data-ready flag did not come up within the configured number of status polls.
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(err) => write!(f, "I2C bus error: {:?}", err),
            Error::InvalidState => f.write_str("device is in standby mode; cannot get readings"),
            Error::InvalidArgument(value) => write!(f, "value {} does not fit the register field", value),
            Error::Timeout => f.write_str("timed out waiting for data ready"),
        }
    }
}
