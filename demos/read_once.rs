use linux_embedded_hal::I2cdev;
use mpl3115a2::{Mpl3115a2, OperatingMode};

fn main() {
    let mut i2c = match I2cdev::new("/dev/i2c-1") {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Failed to open I2C device: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut sensor = Mpl3115a2::new(&mut i2c);
    sensor.set_mode(OperatingMode::Altimeter);

    let reading = match sensor.get_single_pressure_reading(Some(OperatingMode::Barometer)) {
        Ok(reading) => reading,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match reading.mode {
        OperatingMode::Altimeter => println!("altitude: {} m", reading.pressure),
        OperatingMode::Barometer => println!("pressure: {:.4} hPa", reading.pressure),
    }
    println!("temperature: {:.1}\u{00B0}C", reading.temperature);

    match sensor.is_standby() {
        Ok(standby) => println!("device standby: {}", standby),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
