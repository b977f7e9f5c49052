//! Register addresses and bitfields of the MPL3115A2.
//!
//! Values follow the NXP MPL3115A2 datasheet and application note AN4519.

#![allow(missing_docs)]

/// Default 7-bit I2C address.
pub const ADDR: u8 = 0x60;

/// Value of [WHO_AM_I] on a genuine part.
pub const DEVICE_ID: u8 = 0xC4;

/// Number of samples the FIFO can hold.
pub const FIFO_CAPACITY: usize = 32;

/// Bytes per sample, both in the output registers and in the FIFO.
pub const SAMPLE_LEN: usize = 5;

pub const STATUS: u8 = 0x00;
pub const OUT_P_MSB: u8 = 0x01;
pub const OUT_P_CSB: u8 = 0x02;
pub const OUT_P_LSB: u8 = 0x03;
pub const OUT_T_MSB: u8 = 0x04;
pub const OUT_T_LSB: u8 = 0x05;
pub const DR_STATUS: u8 = 0x06;
pub const OUT_P_DELTA_MSB: u8 = 0x07;
pub const OUT_P_DELTA_CSB: u8 = 0x08;
pub const OUT_P_DELTA_LSB: u8 = 0x09;
pub const OUT_T_DELTA_MSB: u8 = 0x0A;
pub const OUT_T_DELTA_LSB: u8 = 0x0B;
/// Read-only device identifier.
pub const WHO_AM_I: u8 = 0x0C;
pub const F_STATUS: u8 = 0x0D;
/// Read-only. Successive reads walk P_MSB, P_CSB, P_LSB, T_MSB, T_LSB of the
/// oldest sample.
pub const F_DATA: u8 = 0x0E;
pub const F_SETUP: u8 = 0x0F;
/// Ticks since the last FIFO write.
pub const TIME_DLY: u8 = 0x10;
pub const SYSMOD: u8 = 0x11;
pub const INT_SOURCE: u8 = 0x12;
pub const PT_DATA_CFG: u8 = 0x13;
pub const CTRL_REG1: u8 = 0x26;
pub const CTRL_REG2: u8 = 0x27;
pub const CTRL_REG3: u8 = 0x28;
pub const CTRL_REG4: u8 = 0x29;
pub const CTRL_REG5: u8 = 0x30;

/// STATUS register.
pub mod status {
    /// Pressure/altitude or temperature data ready.
    pub const PTDR: u8 = 0b0000_1000;
    pub const PDR: u8 = 0b0000_0100;
    pub const TDR: u8 = 0b0000_0010;
}

/// F_STATUS register.
pub mod f_status {
    pub const F_OVF: u8 = 0b1000_0000;
    pub const F_WMRK_FLAG: u8 = 0b0100_0000;
    /// F_CNT[5:0], number of samples held.
    pub const F_CNT: u8 = 0b0011_1111;
}

/// F_SETUP register.
pub mod f_setup {
    /// F_MODE[1:0].
    pub const F_MODE: u8 = 0b1100_0000;
    pub const F_MODE_SHIFT: u8 = 6;
    /// F_WMRK[5:0].
    pub const F_WMRK: u8 = 0b0011_1111;
}

/// SYSMOD register.
pub mod sysmod {
    /// 0 = standby, 1 = active.
    pub const SYSMOD: u8 = 0b0000_0001;
}

/// INT_SOURCE register.
pub mod int_source {
    pub const SRC_DRDY: u8 = 0b1000_0000;
    pub const SRC_FIFO: u8 = 0b0100_0000;
    pub const SRC_PW: u8 = 0b0010_0000;
    pub const SRC_TW: u8 = 0b0001_0000;
    pub const SRC_PTH: u8 = 0b0000_1000;
    pub const SRC_TTH: u8 = 0b0000_0100;
    pub const SRC_PCHG: u8 = 0b0000_0010;
    pub const SRC_TCHG: u8 = 0b0000_0001;
}

/// PT_DATA_CFG register.
pub mod pt_data_cfg {
    /// Data ready event mode.
    pub const DREM: u8 = 0b0000_0100;
    /// Data event flag enable on new pressure/altitude.
    pub const PDEFE: u8 = 0b0000_0010;
    /// Data event flag enable on new temperature.
    pub const TDEFE: u8 = 0b0000_0001;
}

/// CTRL_REG1 register.
pub mod ctrl_reg1 {
    /// Altimeter when set, barometer when clear.
    pub const ALT: u8 = 0b1000_0000;
    /// OS[2:0] oversample ratio field.
    pub const OS: u8 = 0b0011_1000;
    pub const OSR1: u8 = 0b0000_0000;
    pub const OSR2: u8 = 0b0000_1000;
    pub const OSR4: u8 = 0b0001_0000;
    pub const OSR8: u8 = 0b0001_1000;
    pub const OSR16: u8 = 0b0010_0000;
    pub const OSR32: u8 = 0b0010_1000;
    pub const OSR64: u8 = 0b0011_0000;
    pub const OSR128: u8 = 0b0011_1000;
    /// Software reset.
    pub const RST: u8 = 0b0000_0100;
    /// One-shot measurement trigger.
    pub const OST: u8 = 0b0000_0010;
    /// Active when set, standby when clear.
    pub const SBYB: u8 = 0b0000_0001;
}

/// CTRL_REG2 register.
pub mod ctrl_reg2 {
    pub const LOAD_OUTPUT: u8 = 0b0010_0000;
    pub const ALARM_SEL: u8 = 0b0001_0000;
    /// ST[3:0], 2^ST seconds between samples.
    pub const ST: u8 = 0b0000_1111;
}

/// CTRL_REG3 register.
pub mod ctrl_reg3 {
    pub const IPOL1: u8 = 0b0010_0000;
    pub const PP_OD1: u8 = 0b0001_0000;
    pub const IPOL2: u8 = 0b0000_0010;
    pub const PP_OD2: u8 = 0b0000_0001;
}

/// CTRL_REG4 (interrupt enable) and CTRL_REG5 (interrupt routing, 1 = INT1)
/// share this layout.
pub mod ctrl_reg4 {
    pub const INT_EN_DRDY: u8 = 0b1000_0000;
    pub const INT_EN_FIFO: u8 = 0b0100_0000;
    pub const INT_EN_PW: u8 = 0b0010_0000;
    pub const INT_EN_TW: u8 = 0b0001_0000;
    pub const INT_EN_PTH: u8 = 0b0000_1000;
    pub const INT_EN_TTH: u8 = 0b0000_0100;
    pub const INT_EN_PCHG: u8 = 0b0000_0010;
    pub const INT_EN_TCHG: u8 = 0b0000_0001;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversample_field_covers_every_ratio() {
        for osr in [
            ctrl_reg1::OSR1,
            ctrl_reg1::OSR2,
            ctrl_reg1::OSR4,
            ctrl_reg1::OSR8,
            ctrl_reg1::OSR16,
            ctrl_reg1::OSR32,
            ctrl_reg1::OSR64,
            ctrl_reg1::OSR128,
        ] {
            assert_eq!(osr & !ctrl_reg1::OS, 0);
        }
    }

    #[test]
    fn ctrl_reg1_single_bits_do_not_overlap() {
        let bits = [ctrl_reg1::ALT, ctrl_reg1::OS, ctrl_reg1::RST, ctrl_reg1::OST, ctrl_reg1::SBYB];
        let mut seen = 0u8;
        for bit in bits {
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, 0b1011_1111);
    }

    #[test]
    fn f_status_layout() {
        assert_eq!(f_status::F_OVF | f_status::F_WMRK_FLAG | f_status::F_CNT, 0xFF);
        assert_eq!(status::PTDR, 1 << 3);
    }
}
