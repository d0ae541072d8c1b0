//! Response handlers turn the raw bytes of a response into operator output.

use log::{debug, error, info};

use crate::commands::{extract_tag_name, Command, TagName, TAG_COUNT_HEADER};
use crate::commands::Instruction;
use crate::devices::Transport;
use crate::errors::DecodeError;
use crate::protocol::ResponseCollector;

mod dump;
pub use dump::hexdump;

/// Interprets the response to one frame of a command.
///
/// Handlers get the transport and collector so they can continue the
/// conversation with the device when a response calls for it.
pub trait ResponseHandler {
    fn handle(
        &self,
        transport: &mut dyn Transport,
        collector: &ResponseCollector,
        command: Command,
        response: &[u8],
    ) -> Result<(), DecodeError>;
}

/// Logs the raw response as a hexdump.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultHandler;

impl ResponseHandler for DefaultHandler {
    fn handle(
        &self,
        _transport: &mut dyn Transport,
        _collector: &ResponseCollector,
        command: Command,
        response: &[u8],
    ) -> Result<(), DecodeError> {
        debug!("Response for command {}", command);
        for line in hexdump(response) {
            debug!("{}", line);
        }
        Ok(())
    }
}

/// A named tag on the device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// 1-based position of the tag on the device
    pub index: u8,
    pub name: String,
}

/// Reads the tag count, then asks for each tag's name in turn.
#[derive(Copy, Clone, Debug, Default)]
pub struct TagEnumeration;

impl TagEnumeration {
    /// Runs the name queries for a tag count response.
    ///
    /// Every query is a full exchange, so this costs one round trip per tag.
    pub fn enumerate(
        &self,
        transport: &mut dyn Transport,
        collector: &ResponseCollector,
        count_response: &[u8],
    ) -> Result<Vec<Tag>, DecodeError> {
        if !count_response.starts_with(&TAG_COUNT_HEADER) {
            return Err(DecodeError::ProtocolMismatch {
                expected: TAG_COUNT_HEADER.to_vec(),
                received: count_response.to_vec(),
            });
        }

        // The header is not empty, so neither is the response
        let count = count_response[count_response.len() - 1];
        info!("Reading {} tag names...", count);

        let mut tags = Vec::with_capacity(count as usize);
        for index in 1..=count {
            let response = collector.exchange(transport, &TagName(index).encode_request())?;
            let name = extract_tag_name(&response);
            info!("Read tag {} name: \t{}", index, name);
            tags.push(Tag { index, name });
        }

        Ok(tags)
    }
}

impl ResponseHandler for TagEnumeration {
    fn handle(
        &self,
        transport: &mut dyn Transport,
        collector: &ResponseCollector,
        _command: Command,
        response: &[u8],
    ) -> Result<(), DecodeError> {
        match self.enumerate(transport, collector, response) {
            Err(DecodeError::ProtocolMismatch { expected, received }) => {
                error!("Unexpected response for tag count: ");
                for line in hexdump(&received) {
                    error!("{}", line);
                }
                Err(DecodeError::ProtocolMismatch { expected, received })
            }
            result => result.map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::MockTransport;
    use std::time::Duration;

    fn instant() -> ResponseCollector {
        ResponseCollector::new(Duration::ZERO)
    }

    fn name_response(name: &str) -> Vec<u8> {
        let mut response = vec![0x56, 0xff, 0xff, 0x00, 0x1a, 0x0a, 0x00, 0x01, 0x02];
        response.extend_from_slice(name.as_bytes());
        response.push(b' ');
        response.extend_from_slice(b"trailing");
        response
    }

    #[test]
    fn test_enumerate_three_tags() {
        let mut transport = MockTransport::new([
            name_response("MOTOR1"),
            name_response("VALVE"),
            name_response("LEVEL_HI"),
        ]);
        let count = [0x56, 0xff, 0xff, 0x00, 0x0a, 0xac, 0x06, 0x03];

        let tags = TagEnumeration.enumerate(&mut transport, &instant(), &count).unwrap();

        assert_eq!(
            tags,
            vec![
                Tag { index: 1, name: "MOTOR1".to_string() },
                Tag { index: 2, name: "VALVE".to_string() },
                Tag { index: 3, name: "LEVEL_HI".to_string() },
            ]
        );
        assert_eq!(
            transport.writes,
            vec![
                vec![0x56, 0xff, 0xff, 0x00, 0x08, 0x0a, 0x00, 0x01],
                vec![0x56, 0xff, 0xff, 0x00, 0x08, 0x0a, 0x00, 0x02],
                vec![0x56, 0xff, 0xff, 0x00, 0x08, 0x0a, 0x00, 0x03],
            ]
        );
    }

    #[test]
    fn test_zero_tags_sends_nothing() {
        let mut transport = MockTransport::default();
        let count = [0x56, 0xff, 0xff, 0x00, 0x0a, 0xac, 0x06, 0x00];

        let tags = TagEnumeration.enumerate(&mut transport, &instant(), &count).unwrap();

        assert!(tags.is_empty());
        assert!(transport.writes.is_empty());
    }

    #[test]
    fn test_count_is_last_byte_of_response() {
        let mut transport = MockTransport::new([name_response("X"), name_response("Y")]);
        let count = [0x56, 0xff, 0xff, 0x00, 0x0a, 0xac, 0x06, 0x00, 0x00, 0x02];

        let tags = TagEnumeration.enumerate(&mut transport, &instant(), &count).unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(transport.writes.len(), 2);
    }

    #[test]
    fn test_bad_header_is_protocol_mismatch() {
        let mut transport = MockTransport::new([name_response("MOTOR1")]);
        let bogus = [0x56, 0xff, 0xff, 0x00, 0x0a, 0xad, 0x06, 0x03];

        let result = TagEnumeration.handle(&mut transport, &instant(), Command::ReadTags, &bogus);

        match result {
            Err(DecodeError::ProtocolMismatch { expected, received }) => {
                assert_eq!(expected, TAG_COUNT_HEADER.to_vec());
                assert_eq!(received, bogus.to_vec());
            }
            other => panic!("expected ProtocolMismatch, got {:?}", other),
        }
        assert!(transport.writes.is_empty());
    }

    #[test]
    fn test_empty_count_response_is_protocol_mismatch() {
        let mut transport = MockTransport::default();

        let result = TagEnumeration.enumerate(&mut transport, &instant(), &[]);

        assert!(matches!(result, Err(DecodeError::ProtocolMismatch { .. })));
        assert!(transport.writes.is_empty());
    }

    #[test]
    fn test_default_handler_never_writes() {
        let mut transport = MockTransport::default();

        DefaultHandler
            .handle(&mut transport, &instant(), Command::Play, &[0x01, 0x02])
            .unwrap();

        assert!(transport.writes.is_empty());
    }
}
