use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("IO Error")]
    IoError(#[from] std::io::Error),
    #[error("Serialport Error")]
    SerialportError(#[from] serialport::Error),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Unexpected response, expected header {expected:02X?}")]
    ProtocolMismatch {
        expected: Vec<u8>,
        received: Vec<u8>,
    },
    #[error("Device Error")]
    DeviceError(#[from] DeviceError),
}
