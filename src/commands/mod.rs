// Module that contains all instructions that can be sent to the Velocio PLC

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

mod control;
pub use control::{Control, ControlOp};

mod output;
pub use output::{OutputState, Outputs, SetOutput};

mod read;
pub use read::{BitChannel, ReadBit};

mod tags;
pub use tags::{extract_tag_name, TagCount, TagName, TAG_COUNT_HEADER, TAG_NAME_HEADER, TAG_NAME_OFFSET};

use crate::errors::DecodeError;

/// An instruction trait that every frame encoder implements
pub trait Instruction {
    /// Returns the bytes that follow the frame header
    fn payload(&self) -> Vec<u8>;

    /// Encodes the library->PLC request
    fn encode_request(&self) -> Frame {
        Frame::new(&self.payload())
    }
}

/// A complete instruction frame, ready to be written to the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Wraps a payload with the marker, device address and total length byte.
    pub fn new(payload: &[u8]) -> Self {
        let mut packet = vec![crate::FRAME_MARKER];
        packet.extend(crate::DEVICE_ADDRESS);

        // The length byte counts the whole frame, header included
        packet.push((crate::FRAME_HEADER_LEN + payload.len()) as u8);

        packet.extend(payload);
        Frame(packet)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", hex::encode_upper(&self.0))
    }
}

/// How a command is grouped in the usage listing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Control,
    Read,
    Debug,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Control => "Control Instructions",
            Category::Read => "Read Instructions",
            Category::Debug => "Debug Instructions",
        }
    }
}

/// The closed vocabulary of commands the controller understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Play,
    Pause,
    Reset,
    StepInto,
    StepOut,
    StepOver,
    EnterDebug,
    ExitDebug,
    /// Drive one of the six digital outputs. The output number is 1-based.
    SetOutput(u8, OutputState),
    ReadInputBits,
    ReadOutputBits,
    ReadTags,
}

impl Command {
    /// Every command, in the order they are listed to the operator
    pub fn all() -> Vec<Command> {
        let mut commands = vec![Command::Play, Command::Pause, Command::Reset];
        for state in [OutputState::Off, OutputState::On] {
            for output in 1..=Outputs::COUNT {
                commands.push(Command::SetOutput(output, state));
            }
        }
        commands.extend([
            Command::ReadInputBits,
            Command::ReadOutputBits,
            Command::ReadTags,
            Command::EnterDebug,
            Command::ExitDebug,
            Command::StepInto,
            Command::StepOut,
            Command::StepOver,
        ]);
        commands
    }

    pub fn name(&self) -> String {
        match self {
            Command::Play => "play".into(),
            Command::Pause => "pause".into(),
            Command::Reset => "reset".into(),
            Command::StepInto => "step_into".into(),
            Command::StepOut => "step_out".into(),
            Command::StepOver => "step_over".into(),
            Command::EnterDebug => "enter_debug".into(),
            Command::ExitDebug => "exit_debug".into(),
            Command::SetOutput(output, state) => format!("set_output_{}_{}", output, state),
            Command::ReadInputBits => "read_input_bits".into(),
            Command::ReadOutputBits => "read_output_bits".into(),
            Command::ReadTags => "read_tags".into(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Command::Play => "start the routine at current position".into(),
            Command::Pause => "pause the routine at current position".into(),
            Command::Reset => "reset the routine to the beginning".into(),
            Command::StepInto | Command::StepOut | Command::StepOver => "standard procedure".into(),
            Command::EnterDebug => "put the device into debug mode for testing".into(),
            Command::ExitDebug => "exit the device debug mode for normal operation".into(),
            Command::SetOutput(output, state) => format!("set output {} to {}", output, state),
            Command::ReadInputBits => "query the input bits and print the response".into(),
            Command::ReadOutputBits => "query the output bits and print the response".into(),
            Command::ReadTags => "get the friendly names of tags on the device".into(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Command::Play | Command::Pause | Command::Reset | Command::SetOutput(..) => Category::Control,
            Command::ReadInputBits | Command::ReadOutputBits | Command::ReadTags => Category::Read,
            Command::EnterDebug
            | Command::ExitDebug
            | Command::StepInto
            | Command::StepOut
            | Command::StepOver => Category::Debug,
        }
    }

    /// Encodes the frames this command sends, in order
    pub fn frames(&self) -> Vec<Frame> {
        match *self {
            Command::Play => vec![Control(ControlOp::Play).encode_request()],
            Command::Pause => vec![Control(ControlOp::Pause).encode_request()],
            Command::Reset => vec![Control(ControlOp::Reset).encode_request()],
            Command::StepInto => vec![Control(ControlOp::StepInto).encode_request()],
            Command::StepOut => vec![Control(ControlOp::StepOut).encode_request()],
            Command::StepOver => vec![Control(ControlOp::StepOver).encode_request()],
            Command::EnterDebug => vec![Control(ControlOp::EnterDebug).encode_request()],
            Command::ExitDebug => vec![Control(ControlOp::ExitDebug).encode_request()],
            Command::SetOutput(output, state) => {
                // Commands are only built from the vocabulary, so the output is always in range
                let outputs = Outputs::from_number(output).unwrap_or_else(Outputs::empty);
                vec![SetOutput { outputs, state }.encode_request()]
            }
            Command::ReadInputBits => (1..=BitChannel::COUNT)
                .map(|n| ReadBit(BitChannel::Input(n)).encode_request())
                .collect(),
            Command::ReadOutputBits => (1..=BitChannel::COUNT)
                .map(|n| ReadBit(BitChannel::Output(n)).encode_request())
                .collect(),
            Command::ReadTags => vec![TagCount.encode_request()],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Command {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::all()
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DecodeError::UnknownCommand(s.to_string()))
    }
}

/// Renders the command vocabulary grouped by category, for the usage text.
pub fn usage() -> String {
    let mut text = String::new();
    for category in [Category::Control, Category::Read, Category::Debug] {
        text.push_str(category.title());
        text.push_str(":\n");
        for command in Command::all().iter().filter(|c| c.category() == category) {
            text.push_str(&format!("    {:<20}{}\n", command.name(), command.description()));
        }
        text.push('\n');
    }
    text
}

/// Immutable association from command identifier to the frames it sends.
pub struct Catalog {
    entries: HashMap<String, (Command, Vec<Frame>)>,
}

impl Catalog {
    /// Builds the catalog for every command in the vocabulary
    pub fn new() -> Self {
        let entries = Command::all()
            .into_iter()
            .map(|c| (c.name(), (c, c.frames())))
            .collect();
        Catalog { entries }
    }

    /// Resolves an identifier to its command and frame sequence
    pub fn lookup(&self, name: &str) -> Result<(Command, &[Frame]), DecodeError> {
        match self.entries.get(name) {
            Some((command, frames)) => Ok((*command, frames.as_slice())),
            None => Err(DecodeError::UnknownCommand(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
