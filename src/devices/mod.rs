//! Implements opening and talking to a Velocio PLC over its USB serial port.

use std::io::{Read, Write};

use serialport::SerialPort;

use crate::errors::DeviceError;

#[cfg(test)]
pub(crate) mod mock;

/// The port the PLC enumerates as when plugged in over USB
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// The PLC only talks at 9600 baud
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// The default timeout for a serial read in seconds
pub const SERIAL_TIMEOUT_SECONDS: u64 = 1;

/// The default timeout for a serial read in nanoseconds
pub const SERIAL_TIMEOUT_NS: u32 = 0;

/// A byte stream connection to the device.
///
/// Implementors only move bytes; framing is left to the protocol layer.
pub trait Transport {
    /// Writes every byte of `data` to the device
    fn write_all(&mut self, data: &[u8]) -> Result<(), DeviceError>;

    /// Returns how many received bytes are waiting to be read
    fn bytes_available(&mut self) -> Result<u32, DeviceError>;

    /// Reads the bytes that are waiting without blocking for more
    fn read_available(&mut self) -> Result<Vec<u8>, DeviceError>;

    /// Discards anything that has been received but not yet read
    fn flush_input(&mut self) -> Result<(), DeviceError>;
}

/// Settings used to open the serial port.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub data_bits: serialport::DataBits,
    pub timeout: std::time::Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            data_bits: serialport::DataBits::Eight,
            timeout: std::time::Duration::new(SERIAL_TIMEOUT_SECONDS, SERIAL_TIMEOUT_NS),
        }
    }
}

/// A transport over an opened serial port. The port is closed when this is dropped.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        SerialTransport { port }
    }

    pub fn name(&self) -> Option<String> {
        self.port.name()
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), DeviceError> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<u32, DeviceError> {
        Ok(self.port.bytes_to_read()?)
    }

    fn read_available(&mut self) -> Result<Vec<u8>, DeviceError> {
        let waiting = self.port.bytes_to_read()? as usize;
        let mut buf = vec![0; waiting];

        // Only ask for what the driver says is there so the read never blocks on the timeout
        let mut filled = 0;
        while filled < waiting {
            let n = self.port.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);
        Ok(buf)
    }

    fn flush_input(&mut self) -> Result<(), DeviceError> {
        Ok(self.port.clear(serialport::ClearBuffer::Input)?)
    }
}

/// Opens the serial port described by `config`.
pub fn open_device(config: &SerialConfig) -> Result<SerialTransport, DeviceError> {
    let port = serialport::new(&config.port_name, config.baud_rate)
        .parity(config.parity)
        .stop_bits(config.stop_bits)
        .data_bits(config.data_bits)
        .timeout(config.timeout)
        .open()?;

    Ok(SerialTransport::new(port))
}
