//! Implements the run control and debugger instructions.

use super::Instruction;

/// Run control opcodes live in group 0xF1, debug mode toggles in group 0xF0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlOp {
    Play,
    Pause,
    StepInto,
    StepOut,
    StepOver,
    Reset,
    EnterDebug,
    ExitDebug,
}

impl ControlOp {
    /// Returns the (group, opcode) pair for this operation
    pub fn opcode(self) -> (u8, u8) {
        match self {
            ControlOp::Play => (0xf1, 0x01),
            ControlOp::Pause => (0xf1, 0x02),
            ControlOp::StepInto => (0xf1, 0x03),
            ControlOp::StepOut => (0xf1, 0x04),
            ControlOp::StepOver => (0xf1, 0x05),
            ControlOp::Reset => (0xf1, 0x06),
            ControlOp::EnterDebug => (0xf0, 0x02),
            ControlOp::ExitDebug => (0xf0, 0x01),
        }
    }
}

/// A 7 byte control frame
#[derive(Copy, Clone, Debug)]
pub struct Control(pub ControlOp);

impl Instruction for Control {
    fn payload(&self) -> Vec<u8> {
        let (group, op) = self.0.opcode();
        vec![group, op]
    }
}
