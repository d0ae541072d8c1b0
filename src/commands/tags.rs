//! Implements the two instructions of the tag enumeration exchange.

use super::Instruction;

/// A tag count response starts with these bytes; the count is the final byte of the response
pub const TAG_COUNT_HEADER: [u8; 7] = [0x56, 0xff, 0xff, 0x00, 0x0a, 0xac, 0x06];

/// Fixed prefix of a tag name query, followed by the 1-based tag index
pub const TAG_NAME_HEADER: [u8; 7] = [0x56, 0xff, 0xff, 0x00, 0x08, 0x0a, 0x00];

/// Bytes to skip in a tag name response before the name starts
pub const TAG_NAME_OFFSET: usize = 9;

/// Asks the device how many tags it holds
#[derive(Copy, Clone, Debug)]
pub struct TagCount;

impl Instruction for TagCount {
    fn payload(&self) -> Vec<u8> {
        vec![0xac]
    }
}

/// Asks the device for the name of one tag
#[derive(Copy, Clone, Debug)]
pub struct TagName(pub u8);

impl Instruction for TagName {
    fn payload(&self) -> Vec<u8> {
        let mut payload = TAG_NAME_HEADER[crate::FRAME_HEADER_LEN..].to_vec();
        payload.push(self.0);
        payload
    }
}

/// Pulls the tag name out of a tag name response.
///
/// The name starts after a fixed offset and runs up to the first space. A
/// response too short to hold a name yields an empty string.
pub fn extract_tag_name(response: &[u8]) -> String {
    let body = response.get(TAG_NAME_OFFSET..).unwrap_or(&[]);
    let name = body.split(|b| *b == b' ').next().unwrap_or(&[]);
    String::from_utf8_lossy(name).into_owned()
}
