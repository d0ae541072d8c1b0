//! Implements the single bit query used by the read_*_bits commands.

use super::Instruction;

/// Selects one bit channel to query. Channel numbers are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BitChannel {
    Input(u8),
    Output(u8),
}

impl BitChannel {
    /// Channels per group
    pub const COUNT: u8 = 6;

    /// Inputs occupy opcodes 0x01..=0x06, outputs 0x07..=0x0C
    pub fn opcode(self) -> u8 {
        match self {
            BitChannel::Input(n) => n,
            BitChannel::Output(n) => Self::COUNT + n,
        }
    }
}

/// An 8 byte bit query frame
#[derive(Copy, Clone, Debug)]
pub struct ReadBit(pub BitChannel);

impl Instruction for ReadBit {
    fn payload(&self) -> Vec<u8> {
        vec![0x0a, 0x00, self.0.opcode()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_ranges() {
        assert_eq!(BitChannel::Input(1).opcode(), 0x01);
        assert_eq!(BitChannel::Input(6).opcode(), 0x06);
        assert_eq!(BitChannel::Output(1).opcode(), 0x07);
        assert_eq!(BitChannel::Output(6).opcode(), 0x0c);
    }

    #[test]
    fn test_read_bit_frame() {
        let frame = ReadBit(BitChannel::Output(4)).encode_request();
        assert_eq!(frame.as_bytes(), &[0x56, 0xff, 0xff, 0x00, 0x08, 0x0a, 0x00, 0x0a]);
    }
}
