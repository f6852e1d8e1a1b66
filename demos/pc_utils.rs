#![allow(dead_code)]
// Shared between the PC demos: the host's serial port stands in for the UART.

use serialport::{available_ports, ClearBuffer, SerialPort};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};
use zfm_fingerprint::{packet, Sensor, SensorConfig, Transport};

pub const DEFAULT_BAUD_RATE: u32 = 57600;

pub struct PcTransport(pub Box<dyn SerialPort>);

impl Transport for PcTransport {
    type Error = io::Error;

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.write_all(bytes)?;
        self.0.flush()?;
        Ok(bytes.len())
    }

    fn read(&mut self, buffer: &mut [u8], timeout_ms: u32) -> io::Result<usize> {
        let deadline = Instant::now() + Duration::from_millis(u64::from(timeout_ms));
        let mut received = 0;
        while received < buffer.len() && Instant::now() < deadline {
            match self.0.read(&mut buffer[received..]) {
                Ok(n) => {
                    received += n;
                    if let Some(total) = packet::expected_frame_len(&buffer[..received]) {
                        if received >= total {
                            break;
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(received)
    }

    fn flush_input(&mut self) -> io::Result<()> {
        self.0.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}

pub fn print_ports() {
    let ports = available_ports().unwrap();
    for port in ports {
        println!("Available port: {} ({:#?})", port.port_name, port.port_type);
    }
}

/// Opens `port_name` and starts a session with a factory-default module.
pub fn open_sensor(port_name: &str) -> Sensor<PcTransport> {
    println!("Using port {}", port_name);
    let port = serialport::new(port_name, DEFAULT_BAUD_RATE)
        .timeout(Duration::from_millis(20))
        .open()
        .unwrap();
    let config = SensorConfig::default().with_baud_rate(DEFAULT_BAUD_RATE);
    let mut sensor = Sensor::init(config, PcTransport(port)).unwrap();

    println!("Verifying password");
    match sensor.verify_password(0x00000000) {
        Ok(true) => {}
        Ok(false) => panic!("Sensor refused the default password"),
        Err(e) => panic!("Error: {:#?}", e),
    }
    sensor
}

/// Polls until a finger is on the sensor, then converts the image into `buffer`.
pub fn capture_into(sensor: &mut Sensor<PcTransport>, buffer: u8) {
    loop {
        match sensor.capture_image() {
            Ok(()) => break,
            Err(e) if e.is_negative_outcome() => print!("."),
            Err(e) => panic!("Error: {:#?}", e),
        }
        io::stdout().flush().ok();
    }
    println!();
    sensor.image_to_template(buffer).unwrap();
}
