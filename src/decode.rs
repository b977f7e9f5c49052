//! Conversion of raw output bytes into engineering units.

use crate::config::OperatingMode;

/// Five bytes of one sample: pressure MSB, CSB, LSB then temperature MSB, LSB.
///
/// The same layout is produced by the output registers OUT_P_MSB..OUT_T_LSB and by five
/// consecutive reads of F_DATA.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RawSample(pub [u8; 5]);

impl RawSample {
    /// Decode both channels and tag the result with `mode`.
    pub fn decode(&self, mode: OperatingMode) -> Reading {
        let [p_msb, p_csb, p_lsb, t_msb, t_lsb] = self.0;
        Reading {
            pressure: decode_pressure(p_msb, p_csb, p_lsb),
            temperature: decode_temperature(t_msb, t_lsb),
            mode,
        }
    }
}

/// A decoded sample.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Reading {
    /// Hectopascals in [OperatingMode::Barometer]. In [OperatingMode::Altimeter] the same
    /// arithmetic is applied and the value is read as metres.
    pub pressure: f32,
    /// Degrees Celsius, 0.5 degree resolution.
    pub temperature: f32,
    /// Mode the sample was taken in.
    pub mode: OperatingMode,
}

impl Reading {
    /// Altitude in metres.
    ///
    /// In altimeter mode this is [Reading::pressure] itself. In barometer mode it is derived
    /// from the pressure and the given sea level pressure in hectopascals.
    pub fn altitude(&self, sea_level_hpa: f32) -> f32 {
        match self.mode {
            OperatingMode::Altimeter => self.pressure,
            OperatingMode::Barometer => barometric_altitude(self.pressure, sea_level_hpa),
        }
    }
}

/// Decode the Q18.2 pressure in OUT_P_MSB/CSB/LSB and scale it to hectopascals.
///
/// The integer part is MSB, CSB and bits 7:6 of LSB. Bits 5 and 4 of LSB add 0.5 and 0.25.
pub fn decode_pressure(msb: u8, csb: u8, lsb: u8) -> f32 {
    let integer = (((msb as u32) << 8 | csb as u32) << 2) | (lsb as u32 & 0b1100_0000) >> 6;
    let mut pressure = integer as f32;
    pressure += ((lsb & 0b0010_0000) >> 5) as f32 / 2.0;
    pressure += ((lsb & 0b0001_0000) >> 4) as f32 / 4.0;
    pressure / 100.0
}

/// Decode OUT_T_MSB/LSB into degrees Celsius.
///
/// The bytes are combined as an SMBus word (MSB in the low byte), matching a 16-bit word read
/// at OUT_T_MSB. Negative values take the one's complement of the low byte of the half-degree
/// count.
pub fn decode_temperature(msb: u8, lsb: u8) -> f32 {
    temperature_from_word(u16::from_le_bytes([msb, lsb]))
}

/// Decode a 16-bit word read at OUT_T_MSB into degrees Celsius.
pub fn temperature_from_word(raw: u16) -> f32 {
    let half_degrees = ((raw & 0xFF) << 1) | (raw >> 15);
    if half_degrees & 0x100 == 0 {
        half_degrees as f32 / 2.0
    } else {
        -((!half_degrees & 0xFF) as f32 / 2.0)
    }
}

/// Altitude in metres for a pressure, both pressures in hectopascals.
pub fn barometric_altitude(pressure_hpa: f32, sea_level_hpa: f32) -> f32 {
    44330.0 * (1.0 - libm::powf(pressure_hpa / sea_level_hpa, 0.1903))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_integer_part_uses_top_bits_of_lsb() {
        // (0x3E80 << 2) | 0b11 = 64003 Pa
        assert_eq!(decode_pressure(0x3E, 0x80, 0xC0), 640.03);
    }

    #[test]
    fn pressure_fractional_bits() {
        assert_eq!(decode_pressure(0x3E, 0x80, 0xE0), 640.035);
        assert_eq!(decode_pressure(0x3E, 0x80, 0xD0), 640.0325);
        assert_eq!(decode_pressure(0x3E, 0x80, 0xF0), 640.0375);
        // bits 3:0 are unused
        assert_eq!(decode_pressure(0x3E, 0x80, 0xCF), 640.03);
    }

    #[test]
    fn pressure_standard_atmosphere() {
        // 101325 Pa as Q18.2 left aligned in 24 bits
        assert_eq!(decode_pressure(0x62, 0xF3, 0x40), 1013.25);
        assert_eq!(decode_pressure(0, 0, 0), 0.0);
    }

    #[test]
    fn temperature_zero() {
        assert_eq!(decode_temperature(0x00, 0x00), 0.0);
    }

    #[test]
    fn temperature_positive() {
        assert_eq!(decode_temperature(0x16, 0x00), 22.0);
        assert_eq!(decode_temperature(0x16, 0x80), 22.5);
        // only bit 7 of LSB is used
        assert_eq!(decode_temperature(0x16, 0x7F), 22.0);
        assert_eq!(decode_temperature(0x7F, 0x80), 127.5);
    }

    #[test]
    fn temperature_negative_uses_ones_complement() {
        assert_eq!(decode_temperature(0xFF, 0x00), -0.5);
        assert_eq!(decode_temperature(0xFF, 0x80), 0.0);
        assert_eq!(decode_temperature(0xF6, 0x00), -9.5);
        assert_eq!(decode_temperature(0x80, 0x80), -127.0);
    }

    #[test]
    fn word_and_bytes_agree() {
        for (msb, lsb) in [(0x16, 0x00), (0x16, 0x80), (0xF6, 0x00), (0x80, 0x80), (0x00, 0xFF)] {
            let word = (lsb as u16) << 8 | msb as u16;
            assert_eq!(temperature_from_word(word), decode_temperature(msb, lsb));
        }
    }

    #[test]
    fn raw_sample_decodes_both_channels() {
        let reading = RawSample([0x62, 0xF3, 0x40, 0x16, 0x80]).decode(OperatingMode::Barometer);
        assert_eq!(
            reading,
            Reading { pressure: 1013.25, temperature: 22.5, mode: OperatingMode::Barometer }
        );
    }

    #[test]
    fn altitude_in_each_mode() {
        let reading = Reading { pressure: 1013.25, temperature: 20.0, mode: OperatingMode::Barometer };
        assert_eq!(reading.altitude(1013.25), 0.0);
        assert!(reading.altitude(1020.0) > 0.0);

        let reading = Reading { pressure: 152.5, temperature: 20.0, mode: OperatingMode::Altimeter };
        assert_eq!(reading.altitude(1020.0), 152.5);
    }
}
