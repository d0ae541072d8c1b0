pub mod commands;
pub mod devices;
pub mod errors;
pub mod handlers;
pub mod protocol;

/// Every Velocio instruction frame starts with this marker byte.
pub const FRAME_MARKER: u8 = 0x56;

/// Broadcast address used for every frame sent over the USB serial link.
pub const DEVICE_ADDRESS: [u8; 3] = [0xff, 0xff, 0x00];

/// Number of bytes preceding the payload: marker, address and length.
pub const FRAME_HEADER_LEN: usize = 1 + DEVICE_ADDRESS.len() + 1;
