use std::thread;
use std::time::Duration;

use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::I2cdev;
use mpl3115a2::{Error, FifoMode, Mpl3115a2};

fn run(sensor: &mut Mpl3115a2<'_, I2cdev>) -> Result<(), Error<LinuxI2CError>> {
    sensor.to_standby()?;
    sensor.set_fifo_mode(FifoMode::Circular)?;
    // one sample every 2^2 seconds
    sensor.set_sample_time(2)?;
    sensor.to_active()?;

    thread::sleep(Duration::from_secs(10));

    println!("FIFO buffer size: {}", sensor.fifo_depth()?);
    for reading in sensor.read_fifo()? {
        println!("pressure: {:.4} hPa, temperature: {:.1}\u{00B0}C", reading.pressure, reading.temperature);
    }
    sensor.to_standby()
}

fn main() {
    let mut i2c = match I2cdev::new("/dev/i2c-1") {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Failed to open I2C device: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut sensor = Mpl3115a2::new(&mut i2c);
    if let Err(e) = run(&mut sensor) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
