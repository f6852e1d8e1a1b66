use crate::error::{Error, Result};

/// Address every module answers to out of the box.
pub const DEFAULT_ADDRESS: u32 = 0xFFFF_FFFF;

/// Factory baud rate of most modules in this family.
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// How long a command waits for its acknowledge.
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// Session settings handed to [`Sensor::init`](crate::Sensor::init).
///
/// `port`, `tx_pin`, `rx_pin` and `baud_rate` describe how the caller set up the UART behind the
/// transport. The driver does not configure the UART itself; it checks the values for obvious
/// mistakes and logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    pub port: u8,
    pub tx_pin: u8,
    pub rx_pin: u8,
    pub baud_rate: u32,
    /// Device address written into every frame.
    pub address: u32,
    /// Receive window for each command.
    pub timeout_ms: u32,
    /// Check the checksum of every acknowledge before trusting it.
    pub verify_checksum: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            port: 1,
            tx_pin: 17,
            rx_pin: 16,
            baud_rate: DEFAULT_BAUD_RATE,
            address: DEFAULT_ADDRESS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            verify_checksum: true,
        }
    }
}

impl SensorConfig {
    pub fn with_port(mut self, port: u8, tx_pin: u8, rx_pin: u8) -> Self {
        self.port = port;
        self.tx_pin = tx_pin;
        self.rx_pin = rx_pin;
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_address(mut self, address: u32) -> Self {
        self.address = address;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Turning verification off reproduces the bare acknowledge parsing of simpler drivers.
    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(Error::InvalidArgument("baud rate must be non-zero"));
        }
        if self.timeout_ms == 0 {
            return Err(Error::InvalidArgument("timeout must be non-zero"));
        }
        if self.tx_pin == self.rx_pin {
            return Err(Error::InvalidArgument("tx and rx pins must differ"));
        }
        Ok(())
    }
}
