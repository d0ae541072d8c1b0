//! Implements the digital output write instruction.

use std::fmt;

use bitflags::bitflags;

use super::Instruction;

bitflags! {
    /// The six digital outputs of the PLC, one bit each
    pub struct Outputs: u8 {
        const OUTPUT_1 = 0x01;
        const OUTPUT_2 = 0x02;
        const OUTPUT_3 = 0x04;
        const OUTPUT_4 = 0x08;
        const OUTPUT_5 = 0x10;
        const OUTPUT_6 = 0x20;
    }
}

impl Outputs {
    /// Number of digital outputs on the device
    pub const COUNT: u8 = 6;

    /// Returns the flag for a 1-based output number, or `None` if it is out of range
    pub fn from_number(output: u8) -> Option<Outputs> {
        if output == 0 || output > Self::COUNT {
            return None;
        }
        Outputs::from_bits(1 << (output - 1))
    }
}

/// The level to drive an output to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputState {
    Off = 0x00,
    On = 0x01,
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputState::Off => f.write_str("off"),
            OutputState::On => f.write_str("on"),
        }
    }
}

/// Writes the state of the masked outputs.
///
/// The frame is 21 bytes long. The mask sits three bytes before the end and
/// the final byte carries the on/off flag.
#[derive(Copy, Clone, Debug)]
pub struct SetOutput {
    pub outputs: Outputs,
    pub state: OutputState,
}

impl Instruction for SetOutput {
    fn payload(&self) -> Vec<u8> {
        let mut payload = vec![
            0x11, 0x01, 0x00, 0x01, 0x00, 0x00, 0x09, 0x01, 0x00, 0x00, 0x01, 0x00,
        ];
        payload.push(self.outputs.bits());
        payload.extend([0x00, 0x00]);
        payload.push(self.state as u8);
        payload
    }
}
