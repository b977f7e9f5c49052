//! I2C driver for the NXP MPL3115A2 pressure, altitude and temperature sensor.
//!
//! The sensor answers on the I2C address 0x60. Borrow the bus into an [Mpl3115a2], bring it up
//! with [Mpl3115a2::init] and read decoded samples. Pressure is reported in hectopascals in
//! barometer mode and altitude in metres in altimeter mode; temperature is always in degrees
//! Celsius.
//!
//! ```rust, ignore
//! use mpl3115a2::*;
//!
//! let mut sensor = Mpl3115a2::new(&mut i2c);
//! sensor.init(&Config::default()).unwrap();
//! let reading = sensor.get_pressure_reading().unwrap();
//! ```
//!
//! For a single measurement that leaves the device in standby afterwards, use
//! [Mpl3115a2::get_single_pressure_reading]:
//!
//! ```rust, ignore
//! let reading = sensor.get_single_pressure_reading(Some(OperatingMode::Altimeter)).unwrap();
//! ```
//!
//! Samples buffered in the on-chip FIFO are drained with [Mpl3115a2::read_fifo]:
//!
//! ```rust, ignore
//! sensor.to_standby()?;
//! sensor.set_fifo_mode(FifoMode::Circular)?;
//! sensor.set_sample_time(2)?;
//! sensor.to_active()?;
//! // ... later
//! for reading in sensor.read_fifo()? {
//!     println!("{} hPa", reading.pressure);
//! }
//! ```
//!
//! By default readings spin on the data-ready flag until it is set. Use
//! [Mpl3115a2::set_data_ready_wait] with [DataReadyWait::Polls] to give up with
//! [Error::Timeout] instead.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(not(test), no_std)]

extern crate embedded_hal as hal;

use hal::blocking::i2c::{Write, WriteRead};
use log::{debug, trace, warn};

mod config;
mod decode;
mod error;
pub mod registers;

pub use config::{Config, DataReadyWait, FifoMode, OperatingMode, Oversample};
pub use decode::{
    barometric_altitude, decode_pressure, decode_temperature, temperature_from_word, RawSample,
    Reading,
};
pub use error::Error;

use registers::*;

/// Readings drained from the FIFO, oldest first.
pub type FifoReadings = heapless::Vec<Reading, FIFO_CAPACITY>;

/// Where the five bytes of a sample are read from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Acquisition {
    /// The output registers OUT_P_MSB..OUT_T_LSB, addressed one by one.
    Direct,
    /// Five reads of F_DATA. The device steps through the bytes of the oldest buffered sample.
    Fifo,
}

/// System mode as reported by the SYSMOD register.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SystemMode {
    /// No measurements are taken.
    Standby,
    /// Measuring.
    Active,
}

/// Snapshot of the F_STATUS register.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FifoStatus {
    /// More samples arrived than the FIFO could hold.
    pub overflow: bool,
    /// The sample count exceeds the configured watermark.
    pub watermark: bool,
    /// Number of samples held, 0 to 32.
    pub depth: u8,
}

impl From<u8> for FifoStatus {
    fn from(reg: u8) -> Self {
        FifoStatus {
            overflow: reg & f_status::F_OVF != 0,
            watermark: reg & f_status::F_WMRK_FLAG != 0,
            depth: reg & f_status::F_CNT,
        }
    }
}

/// Interrupt flags. INT_SOURCE, CTRL_REG4 and CTRL_REG5 share the bit layout found in
/// [registers::int_source] and [registers::ctrl_reg4].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Interrupts(pub u8);

impl Interrupts {
    /// Data ready interrupt.
    pub const DATA_READY: Self = Self(int_source::SRC_DRDY);
    /// FIFO overflow or watermark interrupt.
    pub const FIFO: Self = Self(int_source::SRC_FIFO);
    /// Pressure/altitude alerter window.
    pub const PRESSURE_WINDOW: Self = Self(int_source::SRC_PW);
    /// Temperature alerter window.
    pub const TEMPERATURE_WINDOW: Self = Self(int_source::SRC_TW);
    /// Pressure/altitude threshold.
    pub const PRESSURE_THRESHOLD: Self = Self(int_source::SRC_PTH);
    /// Temperature threshold.
    pub const TEMPERATURE_THRESHOLD: Self = Self(int_source::SRC_TTH);
    /// Pressure/altitude change.
    pub const PRESSURE_CHANGE: Self = Self(int_source::SRC_PCHG);
    /// Temperature change.
    pub const TEMPERATURE_CHANGE: Self = Self(int_source::SRC_TCHG);

    /// `true` if every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for Interrupts {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Outcome of the standby check that precedes a reading.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Guard {
    Pass,
    /// Standby, but an earlier one-shot left the flag set. Continuous readings are let through.
    Bypass,
    Reject,
}

/// `single_shot` is the sticky one-shot flag, `one_shot` is whether this reading was triggered
/// by a one-shot measurement.
fn standby_guard(standby: bool, single_shot: bool, one_shot: bool) -> Guard {
    match (standby, single_shot, one_shot) {
        (false, _, _) => Guard::Pass,
        (true, false, _) => Guard::Reject,
        (true, true, true) => Guard::Pass,
        (true, true, false) => Guard::Bypass,
    }
}

/// The MPL3115A2 sensor.
///
/// The driver keeps no copy of the device state: standby, FIFO flags and depth are read from
/// the device on every query. The only local state is the operating mode used to tag and
/// request readings, the data-ready wait strategy and the one-shot flag.
#[derive(Debug)]
pub struct Mpl3115a2<'a, I2C>
where
    I2C: Write + WriteRead,
{
    i2c: &'a mut I2C,
    address: u8,
    mode: OperatingMode,
    wait: DataReadyWait,
    single_shot: bool,
}

impl<'a, I2C, E> Mpl3115a2<'a, I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Create a driver at the default address. Nothing is written to the device.
    pub fn new(i2c: &'a mut I2C) -> Self {
        Mpl3115a2 {
            i2c,
            address: ADDR,
            mode: OperatingMode::Barometer,
            wait: DataReadyWait::Unbounded,
            single_shot: false,
        }
    }

    /// 7-bit I2C address used for every transaction.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Change the I2C address.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// The stored operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Set the stored operating mode.
    ///
    /// This does not write the device. It selects the ALT bit of later one-shot readings and the
    /// mode readings are tagged with. The device keeps whatever mode it was last configured
    /// with until [Mpl3115a2::init] or [Mpl3115a2::get_single_pressure_reading] writes CTRL_REG1.
    pub fn set_mode(&mut self, mode: OperatingMode) {
        debug!("operating mode set to {:?}", mode);
        self.mode = mode;
    }

    /// The data-ready wait strategy.
    pub fn data_ready_wait(&self) -> DataReadyWait {
        self.wait
    }

    /// Set how readings wait for the data-ready flag.
    pub fn set_data_ready_wait(&mut self, wait: DataReadyWait) {
        self.wait = wait;
    }

    /// Configure the device and activate it.
    ///
    /// Writes the mode and oversample ratio to CTRL_REG1, enables data ready events for both
    /// pressure and temperature, then sets the active bit keeping the other CTRL_REG1 bits.
    pub fn init(&mut self, config: &Config) -> Result<(), Error<E>> {
        debug!("init {:?}", config);
        self.mode = config.mode;
        self.wait = config.wait;
        self.write(CTRL_REG1, config.ctrl_reg1())?;
        self.write(PT_DATA_CFG, pt_data_cfg::DREM | pt_data_cfg::PDEFE | pt_data_cfg::TDEFE)?;
        self.to_active()
    }

    /// Bring the device into continuous barometer mode at 128x oversampling.
    ///
    /// Unlike [Mpl3115a2::init] this writes fixed values and does not read CTRL_REG1 back.
    pub fn init_continuous(&mut self) -> Result<(), Error<E>> {
        debug!("init continuous");
        self.write(CTRL_REG1, ctrl_reg1::OSR128)?;
        self.write(PT_DATA_CFG, pt_data_cfg::DREM | pt_data_cfg::PDEFE | pt_data_cfg::TDEFE)?;
        self.write(CTRL_REG1, ctrl_reg1::OSR128 | ctrl_reg1::SBYB)?;
        Ok(())
    }

    /// Device identifier, [DEVICE_ID] on a genuine part.
    pub fn who_am_i(&mut self) -> Result<u8, Error<E>> {
        Ok(self.read8(WHO_AM_I)?)
    }

    /// `true` if the standby/active bit of CTRL_REG1 is clear.
    pub fn is_standby(&mut self) -> Result<bool, Error<E>> {
        Ok(self.read8(CTRL_REG1)? & ctrl_reg1::SBYB == 0)
    }

    /// Put the device in standby. The other CTRL_REG1 bits are kept.
    pub fn to_standby(&mut self) -> Result<(), Error<E>> {
        let reg = self.read8(CTRL_REG1)?;
        self.write(CTRL_REG1, reg & !ctrl_reg1::SBYB)?;
        Ok(())
    }

    /// Activate the device. The other CTRL_REG1 bits are kept.
    pub fn to_active(&mut self) -> Result<(), Error<E>> {
        let reg = self.read8(CTRL_REG1)?;
        self.write(CTRL_REG1, reg | ctrl_reg1::SBYB)?;
        Ok(())
    }

    /// System mode reported by SYSMOD.
    pub fn system_mode(&mut self) -> Result<SystemMode, Error<E>> {
        Ok(match self.read8(SYSMOD)? & sysmod::SYSMOD {
            0 => SystemMode::Standby,
            _ => SystemMode::Active,
        })
    }

    /// Software reset. All registers return to their power-on values.
    pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
        debug!("soft reset");
        self.write(CTRL_REG1, ctrl_reg1::RST)?;
        Ok(())
    }

    /// `true` if new pressure/altitude or temperature data is available. Reads STATUS once.
    pub fn data_ready(&mut self) -> Result<bool, Error<E>> {
        Ok(self.read8(STATUS)? & status::PTDR != 0)
    }

    /// Trigger a single measurement and read it.
    ///
    /// `None` uses the stored operating mode. The device returns to standby by itself once the
    /// measurement completes. Do not mix this with continuous (active) operation.
    ///
    /// After the first call, [Mpl3115a2::get_pressure_reading] no longer fails on a device in
    /// standby: the one-shot flag that lets this reading pass the standby check is never reset.
    pub fn get_single_pressure_reading(
        &mut self,
        mode: Option<OperatingMode>,
    ) -> Result<Reading, Error<E>> {
        let mode = mode.unwrap_or(self.mode);
        self.write(CTRL_REG1, mode.alt_bits() | ctrl_reg1::OSR128 | ctrl_reg1::SBYB)?;
        self.single_shot = true;
        self.write(CTRL_REG1, ctrl_reg1::OSR128 | ctrl_reg1::OST | mode.alt_bits())?;
        self.reading(mode, true)
    }

    /// Wait for and read the latest sample of an active device, tagged with the stored mode.
    ///
    /// Fails with [Error::InvalidState] if the device is in standby and no one-shot measurement
    /// has been triggered.
    pub fn get_pressure_reading(&mut self) -> Result<Reading, Error<E>> {
        self.reading(self.mode, false)
    }

    /// Read the five bytes of one sample.
    ///
    /// Does not wait for the data-ready flag.
    pub fn read_sample(&mut self, acquisition: Acquisition) -> Result<RawSample, Error<E>> {
        let sample = match acquisition {
            Acquisition::Direct => {
                let p_msb = self.read8(OUT_P_MSB)?;
                let p_csb = self.read8(OUT_P_CSB)?;
                let p_lsb = self.read8(OUT_P_LSB)?;
                let [t_msb, t_lsb] = self.read_word(OUT_T_MSB)?;
                RawSample([p_msb, p_csb, p_lsb, t_msb, t_lsb])
            }
            Acquisition::Fifo => {
                let mut bytes = [0u8; SAMPLE_LEN];
                for byte in bytes.iter_mut() {
                    *byte = self.read8(F_DATA)?;
                }
                RawSample(bytes)
            }
        };
        trace!("{:?} sample {:02x?}", acquisition, sample.0);
        Ok(sample)
    }

    /// Number of samples held in the FIFO.
    pub fn fifo_depth(&mut self) -> Result<u8, Error<E>> {
        Ok(self.fifo_status()?.depth)
    }

    /// `true` if the FIFO has overflowed.
    pub fn fifo_overflow(&mut self) -> Result<bool, Error<E>> {
        Ok(self.fifo_status()?.overflow)
    }

    /// `true` if the FIFO sample count exceeds the watermark.
    pub fn fifo_watermark(&mut self) -> Result<bool, Error<E>> {
        Ok(self.fifo_status()?.watermark)
    }

    /// Read F_STATUS.
    pub fn fifo_status(&mut self) -> Result<FifoStatus, Error<E>> {
        Ok(FifoStatus::from(self.read8(F_STATUS)?))
    }

    /// Drain the FIFO, oldest sample first.
    ///
    /// The depth is read once up front. Readings are tagged with the stored operating mode.
    pub fn read_fifo(&mut self) -> Result<FifoReadings, Error<E>> {
        let depth = self.fifo_depth()? as usize;
        let count = depth.min(FIFO_CAPACITY);
        if count < depth {
            warn!("FIFO reports {} samples, reading {}", depth, count);
        }
        let mut readings = FifoReadings::new();
        for _ in 0..count {
            let sample = self.read_sample(Acquisition::Fifo)?;
            // count is at most FIFO_CAPACITY, push cannot fail
            readings.push(sample.decode(self.mode)).ok();
        }
        Ok(readings)
    }

    /// Set the time between samples to 2^`st` seconds, the ST field of CTRL_REG2.
    ///
    /// `st` must be 0 to 15. Larger values fail with [Error::InvalidArgument] before anything is
    /// written. The upper four bits of CTRL_REG2 are kept.
    pub fn set_sample_time(&mut self, st: u8) -> Result<(), Error<E>> {
        if st > ctrl_reg2::ST {
            return Err(Error::InvalidArgument(st));
        }
        let reg = self.read8(CTRL_REG2)?;
        self.write(CTRL_REG2, (reg & !ctrl_reg2::ST) | st)?;
        Ok(())
    }

    /// Set the FIFO mode, keeping the watermark. The device should be in standby.
    pub fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error<E>> {
        let reg = self.read8(F_SETUP)?;
        self.write(F_SETUP, (reg & f_setup::F_WMRK) | mode.bits())?;
        Ok(())
    }

    /// Set the FIFO watermark, 0 to 32 samples, keeping the FIFO mode.
    pub fn set_fifo_watermark(&mut self, samples: u8) -> Result<(), Error<E>> {
        if samples as usize > FIFO_CAPACITY {
            return Err(Error::InvalidArgument(samples));
        }
        let reg = self.read8(F_SETUP)?;
        self.write(F_SETUP, (reg & f_setup::F_MODE) | samples)?;
        Ok(())
    }

    /// Pending interrupt sources, from INT_SOURCE.
    pub fn interrupt_source(&mut self) -> Result<Interrupts, Error<E>> {
        Ok(Interrupts(self.read8(INT_SOURCE)?))
    }

    /// Enable exactly the given interrupts (CTRL_REG4).
    pub fn enable_interrupts(&mut self, interrupts: Interrupts) -> Result<(), Error<E>> {
        self.write(CTRL_REG4, interrupts.0)?;
        Ok(())
    }

    /// Route the given interrupts to INT1, the rest to INT2 (CTRL_REG5).
    pub fn route_interrupts(&mut self, int1: Interrupts) -> Result<(), Error<E>> {
        self.write(CTRL_REG5, int1.0)?;
        Ok(())
    }

    fn reading(&mut self, mode: OperatingMode, one_shot: bool) -> Result<Reading, Error<E>> {
        let standby = self.is_standby()?;
        match standby_guard(standby, self.single_shot, one_shot) {
            Guard::Reject => return Err(Error::InvalidState),
            Guard::Bypass => warn!("device is in standby, reading anyway after an earlier one-shot"),
            Guard::Pass => {}
        }
        self.wait_data_ready()?;
        let reading = self.read_sample(Acquisition::Direct)?.decode(mode);
        debug!("{:?}", reading);
        Ok(reading)
    }

    fn wait_data_ready(&mut self) -> Result<(), Error<E>> {
        match self.wait {
            DataReadyWait::Unbounded => {
                while !self.data_ready()? {}
                Ok(())
            }
            DataReadyWait::Polls(polls) => {
                for _ in 0..polls {
                    if self.data_ready()? {
                        return Ok(());
                    }
                }
                warn!("no data ready after {} polls", polls);
                Err(Error::Timeout)
            }
        }
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), E> {
        self.i2c.write(self.address, &[reg, value])
    }

    fn read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), E> {
        self.i2c.write_read(self.address, &[reg], buffer)
    }

    fn read8(&mut self, reg: u8) -> Result<u8, E> {
        let mut buffer = [0u8];
        self.read(reg, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Two consecutive registers in bus order.
    fn read_word(&mut self, reg: u8) -> Result<[u8; 2], E> {
        let mut buffer = [0u8; 2];
        self.read(reg, &mut buffer)?;
        Ok(buffer)
    }
}
