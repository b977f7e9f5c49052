use crate::registers::{ctrl_reg1, f_setup};

/// Selects what the pressure channel measures.
///
/// Stored by the driver and encoded into the ALT bit of CTRL_REG1 whenever the driver itself
/// writes that register (one-shot readings and [crate::Mpl3115a2::init]). Changing it with
/// [crate::Mpl3115a2::set_mode] does not touch the device.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OperatingMode {
    /// Pressure in hectopascals. This is the power-on default of the device.
    #[default]
    Barometer = 0,
    /// Altitude in metres.
    Altimeter = 1,
}

impl OperatingMode {
    /// The ALT bit of CTRL_REG1 for this mode.
    pub fn alt_bits(self) -> u8 {
        match self {
            Self::Barometer => 0,
            Self::Altimeter => ctrl_reg1::ALT,
        }
    }
}

/// Oversample ratio, the OS[2:0] field of CTRL_REG1.
///
/// Higher ratios reduce noise at the cost of conversion time (6 ms at 1x up to 512 ms at 128x).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum Oversample {
    /// One sample per measurement.
    X1 = ctrl_reg1::OSR1,
    /// Two samples per measurement.
    X2 = ctrl_reg1::OSR2,
    /// Four samples per measurement.
    X4 = ctrl_reg1::OSR4,
    /// Eight samples per measurement.
    X8 = ctrl_reg1::OSR8,
    /// Sixteen samples per measurement.
    X16 = ctrl_reg1::OSR16,
    /// Thirty-two samples per measurement.
    X32 = ctrl_reg1::OSR32,
    /// Sixty-four samples per measurement.
    X64 = ctrl_reg1::OSR64,
    /// One hundred twenty-eight samples per measurement. The maximum and the default.
    #[default]
    X128 = ctrl_reg1::OSR128,
}

impl Oversample {
    /// Bits to OR into CTRL_REG1.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// How long a reading waits for the data-ready flag in STATUS.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DataReadyWait {
    /// Poll STATUS until the flag is set, forever. A device that never answers hangs the caller.
    #[default]
    Unbounded,
    /// Give up with [crate::Error::Timeout] after this many STATUS reads.
    Polls(u32),
}

/// FIFO operating mode, F_MODE[1:0] of F_SETUP.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FifoMode {
    /// FIFO disabled. Power-on default.
    #[default]
    Disabled = 0b00,
    /// The oldest sample is discarded when the FIFO is full.
    Circular = 0b01,
    /// Sampling into the FIFO stops once it overflows.
    StopOnOverflow = 0b10,
}

impl FifoMode {
    /// Bits to OR into F_SETUP.
    pub fn bits(self) -> u8 {
        (self as u8) << f_setup::F_MODE_SHIFT
    }
}

/// Settings applied by [crate::Mpl3115a2::init].
///
/// ```rust
/// use mpl3115a2::{Config, DataReadyWait, OperatingMode, Oversample};
///
/// let config = Config::default()
///     .with_mode(OperatingMode::Altimeter)
///     .with_oversample(Oversample::X32)
///     .with_wait(DataReadyWait::Polls(1_000));
/// assert_eq!(config.oversample, Oversample::X32);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Config {
    /// Barometer or altimeter.
    pub mode: OperatingMode,
    /// Oversample ratio, 128x by default.
    pub oversample: Oversample,
    /// Data-ready wait strategy used by subsequent readings.
    pub wait: DataReadyWait,
}

impl Config {
    /// Set the operating mode.
    pub fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the oversample ratio.
    pub fn with_oversample(mut self, oversample: Oversample) -> Self {
        self.oversample = oversample;
        self
    }

    /// Set the data-ready wait strategy.
    pub fn with_wait(mut self, wait: DataReadyWait) -> Self {
        self.wait = wait;
        self
    }

    /// CTRL_REG1 value for this configuration, standby bit clear.
    pub(crate) fn ctrl_reg1(&self) -> u8 {
        self.mode.alt_bits() | self.oversample.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_barometer_at_max_oversample() {
        let config = Config::default();
        assert_eq!(config.mode, OperatingMode::Barometer);
        assert_eq!(config.oversample, Oversample::X128);
        assert_eq!(config.wait, DataReadyWait::Unbounded);
        assert_eq!(config.ctrl_reg1(), ctrl_reg1::OSR128);
    }

    #[test]
    fn altimeter_sets_alt_bit() {
        let config = Config::default()
            .with_mode(OperatingMode::Altimeter)
            .with_oversample(Oversample::X1);
        assert_eq!(config.ctrl_reg1(), ctrl_reg1::ALT);
    }

    #[test]
    fn oversample_bits_match_register_map() {
        assert_eq!(Oversample::X2.bits(), ctrl_reg1::OSR2);
        assert_eq!(Oversample::X64.bits(), ctrl_reg1::OSR64);
        assert!(Oversample::X8 < Oversample::X16);
    }

    #[test]
    fn fifo_mode_bits() {
        assert_eq!(FifoMode::Disabled.bits(), 0);
        assert_eq!(FifoMode::Circular.bits(), 0b0100_0000);
        assert_eq!(FifoMode::StopOnOverflow.bits(), 0b1000_0000);
    }
}
