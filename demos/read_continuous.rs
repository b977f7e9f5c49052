use linux_embedded_hal::I2cdev;
use mpl3115a2::Mpl3115a2;

fn main() {
    let debug = std::env::var_os("MPL3115A2_DEBUG").is_some();

    let mut i2c = match I2cdev::new("/dev/i2c-1") {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Failed to open I2C device: {:?}", e);
            std::process::exit(1);
        }
    };
    let mut sensor = Mpl3115a2::new(&mut i2c);

    if debug {
        println!("initializing...");
    }
    if let Err(e) = sensor.init_continuous() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if debug {
        println!("start get readings...");
    }
    let reading = match sensor.get_pressure_reading() {
        Ok(reading) => reading,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if debug {
        println!("readings received");
    }

    println!("pressure: {:.4} hPa", reading.pressure);
    println!("temperature: {:.1}\u{00B0}C", reading.temperature);
}
